// Guide text - Autocompletion hints for a partially typed command line

use crate::command::tokenizer::SplitInput;
use crate::command::tree::CommandTree;

/// Generate guide text that completes `partial_command` and lists argument info
/// where applicable. The result never repeats characters already typed.
pub fn generate_guide_text(tree: &CommandTree, partial_command: &str) -> String {
    // Nothing is proposed at the top level until something is typed
    if partial_command.trim().is_empty() {
        return String::new();
    }

    tree.complete_text(&SplitInput::parse(partial_command))
}

/// The missing part of the identifier currently being typed, or an empty string.
///
/// Safe to append verbatim to the input line. Argument listings and ambiguous
/// candidate lists start with `[` and are never returned.
pub fn complete_id(tree: &CommandTree, partial_command: &str) -> String {
    let guide = generate_guide_text(tree, partial_command);
    match guide.split_whitespace().next() {
        Some(word) if !word.starts_with('[') => word.to_string(),
        _ => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::args::{ArgKind, ArgumentSpec};
    use crate::command::tree::Command;

    fn transport_tree() -> CommandTree {
        CommandTree::new([
            Command::new("play", "", vec![]).unwrap().into(),
            Command::new("pause", "", vec![]).unwrap().into(),
            Command::new(
                "tempo",
                "",
                vec![ArgumentSpec::new("bpm", ArgKind::Float).with_default("120")],
            )
            .unwrap()
            .into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_blank_input_has_no_guide() {
        let tree = transport_tree();
        assert_eq!(generate_guide_text(&tree, ""), "");
        assert_eq!(generate_guide_text(&tree, "     "), "");
    }

    #[test]
    fn test_unique_and_ambiguous_prefix() {
        let tree = transport_tree();
        assert_eq!(generate_guide_text(&tree, "pl"), "ay");
        assert_eq!(generate_guide_text(&tree, "p"), "[pause, play]");
        assert_eq!(complete_id(&tree, "pl"), "ay");
        assert_eq!(complete_id(&tree, "p"), "");
    }

    #[test]
    fn test_complete_id_stops_before_arguments() {
        let tree = transport_tree();
        assert_eq!(generate_guide_text(&tree, "te"), "mpo [bpm=120]");
        assert_eq!(complete_id(&tree, "te"), "mpo");
        assert_eq!(complete_id(&tree, "tempo"), "");
        assert_eq!(complete_id(&tree, "tempo "), "");
        assert_eq!(complete_id(&tree, "zzz"), "");
    }
}
