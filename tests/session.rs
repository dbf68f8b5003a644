// Integration test: Full command path from typed line to audio processor
//
// Session -> tree resolution -> SequencerApp -> bridge -> SequencerProcessor

use stepline::{
    CommandSession, EngineParams, MessageLevel, SequencerApp, SequencerProcessor, StepPattern,
    TransportState, build_command_tree, create_bridge,
};

fn setup() -> (CommandSession<SequencerApp>, SequencerProcessor) {
    let tree = build_command_tree().unwrap();
    let (bridge, processor) =
        create_bridge(EngineParams::default(), StepPattern::default(), 48_000, 16);
    let app = SequencerApp::new(&tree, EngineParams::default(), StepPattern::default(), bridge);
    (CommandSession::new(tree, app), processor)
}

fn render(processor: &mut SequencerProcessor, frames: usize) -> Vec<f32> {
    let mut block = vec![0.0f32; frames];
    processor.process_block(&mut block, 1);
    block
}

#[test]
fn test_line_reaches_audio_thread() {
    let (mut session, mut processor) = setup();

    let message = session.submit("tempo 60; step clear; step on 0; play");
    assert_eq!(message.level, MessageLevel::Info);
    assert_eq!(message.text, "Playing");

    let block = render(&mut processor, 1_024);
    assert!(block.iter().any(|s| *s != 0.0));

    let meter = session.executor().bridge().meter();
    assert_eq!(meter.transport, TransportState::Playing);
    assert_eq!(session.executor().params().bpm, 60.0);
    assert_eq!(session.history().entries(), ["tempo 60; step clear; step on 0; play"]);
}

#[test]
fn test_cleared_pattern_is_silent() {
    let (mut session, mut processor) = setup();
    session.submit("step clear; play");

    let block = render(&mut processor, 4_096);
    assert!(block.iter().all(|s| *s == 0.0));
}

#[test]
fn test_resolution_errors_are_messages() {
    let (mut session, _processor) = setup();

    let message = session.submit("tempo");
    assert!(message.is_error());
    assert!(message.text.contains("bpm"));

    let message = session.submit("jump 3");
    assert_eq!(message.text, "Command not found: jump");

    let message = session.submit("set");
    assert!(message.is_error());

    assert_eq!(session.history().len(), 3);
}

#[test]
fn test_stop_rewinds_processor() {
    let (mut session, mut processor) = setup();
    session.submit("play");
    render(&mut processor, 20_000);
    assert!(session.executor().bridge().meter().current_step > 0);

    session.submit("stop");
    render(&mut processor, 16);
    let meter = session.executor().bridge().meter();
    assert_eq!(meter.transport, TransportState::Stopped);
    assert_eq!(meter.current_step, 0);
}

#[test]
fn test_quit_ends_session() {
    let (mut session, _processor) = setup();
    assert!(!session.should_quit());
    session.submit("quit; play");
    assert!(session.should_quit());
    assert_eq!(session.last_message().map(|m| m.text.as_str()), Some("Bye"));
}

#[test]
fn test_guide_text_in_session() {
    let (session, _processor) = setup();
    assert_eq!(session.guide_text("set st"), "eps [count]");
    assert_eq!(session.guide_text("play; vol"), "ume [level=0.8]");
    assert_eq!(session.complete_id("play; vol"), "ume");
}
