// Sequencer vocabulary - The command tree offered by the console

use crate::command::args::{ArgKind, ArgumentSpec};
use crate::command::error::TreeError;
use crate::command::tree::{Command, CommandGroup, CommandNode, CommandTree};

fn command(name: &str, description: &str, args: Vec<ArgumentSpec>) -> Result<CommandNode, TreeError> {
    Command::new(name, description, args).map(CommandNode::from)
}

fn step_index() -> Vec<ArgumentSpec> {
    vec![ArgumentSpec::new("index", ArgKind::Unsigned)]
}

/// Build the full sequencer command tree
pub fn build_command_tree() -> Result<CommandTree, TreeError> {
    let set = CommandGroup::with_children(
        "set",
        [
            command(
                "frequency",
                "Set the click frequency in Hz.",
                vec![ArgumentSpec::new("hz", ArgKind::Float).with_default("440")],
            )?,
            command(
                "steps",
                "Set the pattern length (1 to 16 steps).",
                vec![ArgumentSpec::new("count", ArgKind::Unsigned)],
            )?,
            command(
                "division",
                "Set how many steps make one beat.",
                vec![ArgumentSpec::new("steps_per_beat", ArgKind::Unsigned).with_default("4")],
            )?,
        ],
    )?;

    let step = CommandGroup::with_children(
        "step",
        [
            command("on", "Activate a step.", step_index())?,
            command("off", "Deactivate a step.", step_index())?,
            command("toggle", "Flip a step.", step_index())?,
            command("clear", "Deactivate every step.", vec![])?,
        ],
    )?;

    CommandTree::new([
        command("play", "Start playback.", vec![])?,
        command("pause", "Pause playback.", vec![])?,
        command("stop", "Stop playback and rewind to the first step.", vec![])?,
        command(
            "seek",
            "Jump to a step.",
            vec![ArgumentSpec::new("step", ArgKind::Unsigned)],
        )?,
        command(
            "tempo",
            "Set the tempo in beats per minute.",
            vec![ArgumentSpec::new("bpm", ArgKind::Float)],
        )?,
        command(
            "volume",
            "Set the output volume (0.0 to 1.0).",
            vec![ArgumentSpec::new("level", ArgKind::Float).with_default("0.8")],
        )?,
        command(
            "mute",
            "Mute or unmute the output.",
            vec![ArgumentSpec::new("state", ArgKind::one_of(&["on", "off"])).with_default("on")],
        )?,
        set.into(),
        step.into(),
        command("status", "Show transport, tempo and pattern.", vec![])?,
        command("help", "List every command.\nAlso written to the log as JSON.", vec![])?,
        command("quit", "Leave the console.", vec![])?,
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::guide_text::{complete_id, generate_guide_text};

    #[test]
    fn test_tree_builds() {
        let tree = build_command_tree().unwrap();
        assert!(tree.root().child("set").is_some());
        assert!(tree.root().child("quit").is_some());
    }

    #[test]
    fn test_vocabulary_guide_text() {
        let tree = build_command_tree().unwrap();
        assert_eq!(generate_guide_text(&tree, "p"), "[pause, play]");
        assert_eq!(generate_guide_text(&tree, "tem"), "po [bpm]");
        assert_eq!(generate_guide_text(&tree, "set f"), "requency [hz=440]");
        assert_eq!(generate_guide_text(&tree, "step t"), "oggle [index]");
        assert_eq!(generate_guide_text(&tree, "mute o"), "[on, off]");
        assert_eq!(generate_guide_text(&tree, "mute of"), "f");
        assert_eq!(complete_id(&tree, "st"), "");
    }
}
