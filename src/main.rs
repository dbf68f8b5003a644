use stepline::ui::Console;
use stepline::{
    AppConfig, AudioEngine, CommandSession, EngineParams, SequencerApp, StepPattern,
    build_command_tree, create_bridge,
};

fn main() {
    let config = AppConfig::load_or_default();

    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or(config.log_filter.as_str()),
    )
    .init();
    log::debug!("Configuration: {:?}", config);

    if let Err(e) = config.validate() {
        eprintln!("ERROR: {}", e);
        return;
    }

    let tree = match build_command_tree() {
        Ok(tree) => tree,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    let params = EngineParams::default();
    let pattern = StepPattern::default();
    let (bridge, processor) = create_bridge(
        params,
        pattern,
        config.sample_rate,
        config.transport_queue_capacity,
    );

    #[cfg(feature = "cpal")]
    let engine = AudioEngine::start_device(processor, config.block_size);
    #[cfg(not(feature = "cpal"))]
    let engine = AudioEngine::start_simulated(processor, config.block_size);

    let mut engine = match engine {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("ERROR: {}", e);
            return;
        }
    };

    println!("=== Stepline ===");
    println!(
        "Audio running at {} Hz, {} frames per block",
        engine.sample_rate(),
        engine.block_size()
    );

    let app = SequencerApp::new(&tree, params, pattern, bridge);
    let mut session = CommandSession::new(tree, app).with_separator(config.command_separator);
    let mut console = Console::new(config.prompt.clone());

    if let Err(e) = console.run(&mut session) {
        eprintln!("ERROR: console failed: {}", e);
    }

    engine.stop();
}
