// Command reference - Documentation generated from the command tree

use serde::Serialize;

use crate::command::tree::{CommandGroup, CommandNode, CommandTree};

/// Documentation for one leaf command
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Documentation {
    /// Full path, e.g. `set tempo`
    pub path: String,
    /// Path followed by typed arguments, e.g. `set tempo [Float: bpm]`
    pub signature: String,
    pub description: String,
}

/// Every command of the tree, depth first in name order
pub fn collect(tree: &CommandTree) -> Vec<Documentation> {
    let mut docs = Vec::new();
    collect_group(tree.root(), "", &mut docs);
    docs
}

fn collect_group(group: &CommandGroup, prefix: &str, docs: &mut Vec<Documentation>) {
    for child in group.children() {
        let path = if prefix.is_empty() {
            child.name().to_string()
        } else {
            format!("{} {}", prefix, child.name())
        };

        match child {
            CommandNode::Group(group) => collect_group(group, &path, docs),
            CommandNode::Command(command) => {
                let signature = std::iter::once(path.clone())
                    .chain(command.args().iter().map(|arg| arg.signature()))
                    .collect::<Vec<_>>()
                    .join(" ");

                docs.push(Documentation {
                    path,
                    signature,
                    description: command.description().to_string(),
                });
            }
        }
    }
}

/// Markdown table of every command
pub fn markdown_table(tree: &CommandTree) -> String {
    let mut table = String::from("name | signature | description\n---- | --------- | -----------\n");
    for doc in collect(tree) {
        table.push_str(&format!(
            "{} | `{}` | {}\n",
            doc.path,
            doc.signature,
            doc.description.replace('\n', "<br>")
        ));
    }
    table
}

/// Reference serialized as a JSON array
pub fn to_json(tree: &CommandTree) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&collect(tree))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::command::args::{ArgKind, ArgumentSpec};
    use crate::command::tree::Command;

    fn tree() -> CommandTree {
        CommandTree::new([
            Command::new("play", "Start playback.", vec![]).unwrap().into(),
            CommandGroup::with_children(
                "set",
                [Command::new(
                    "tempo",
                    "Set the tempo.\nIn beats per minute.",
                    vec![ArgumentSpec::new("bpm", ArgKind::Float).with_default("120")],
                )
                .unwrap()
                .into()],
            )
            .unwrap()
            .into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_collect_walks_groups() {
        let docs = collect(&tree());
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].path, "play");
        assert_eq!(docs[0].signature, "play");
        assert_eq!(docs[1].path, "set tempo");
        assert_eq!(docs[1].signature, "set tempo [Float: bpm=120]");
    }

    #[test]
    fn test_markdown_table() {
        let table = markdown_table(&tree());
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "name | signature | description");
        assert_eq!(lines[2], "play | `play` | Start playback.");
        assert_eq!(
            lines[3],
            "set tempo | `set tempo [Float: bpm=120]` | Set the tempo.<br>In beats per minute."
        );
    }

    #[test]
    fn test_json_export() {
        let json = to_json(&tree()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[1]["path"], "set tempo");
    }
}
