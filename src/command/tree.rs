// Command tree - Immutable hierarchical grammar of command groups and commands
//
// The tree is built once by the application and only read afterwards. Names are
// matched exactly (case-sensitive). Traversal consumes one word per group level;
// once a leaf command is reached, the remaining words are its positional arguments.

use std::collections::BTreeMap;

use crate::command::args::{ArgKind, ArgumentSpec};
use crate::command::error::TreeError;
use crate::command::tokenizer::SplitInput;

/// A node of the command tree
#[derive(Debug, Clone)]
pub enum CommandNode {
    Group(CommandGroup),
    Command(Command),
}

impl CommandNode {
    pub fn name(&self) -> &str {
        match self {
            CommandNode::Group(group) => &group.name,
            CommandNode::Command(command) => &command.name,
        }
    }
}

impl From<CommandGroup> for CommandNode {
    fn from(group: CommandGroup) -> Self {
        CommandNode::Group(group)
    }
}

impl From<Command> for CommandNode {
    fn from(command: Command) -> Self {
        CommandNode::Command(command)
    }
}

/// Node names are ASCII letters, digits, `_` or `-`. Anything else could collide
/// with word, command or bracket delimiters.
fn validate_name(name: &str) -> Result<(), TreeError> {
    if name.is_empty() {
        return Err(TreeError::EmptyName);
    }
    if !name
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
    {
        return Err(TreeError::InvalidName(name.to_string()));
    }
    Ok(())
}

/// Argument names are non-empty ASCII letters or `_`, unique within a command
fn validate_arg_names(command: &str, args: &[ArgumentSpec]) -> Result<(), TreeError> {
    for (index, arg) in args.iter().enumerate() {
        if arg.name.is_empty() || !arg.name.chars().all(|c| c.is_ascii_alphabetic() || c == '_') {
            return Err(TreeError::InvalidArgumentName {
                command: command.to_string(),
                argument: arg.name.clone(),
            });
        }
        if args[..index].iter().any(|earlier| earlier.name == arg.name) {
            return Err(TreeError::DuplicateArgument {
                command: command.to_string(),
                argument: arg.name.clone(),
            });
        }
    }
    Ok(())
}

/// A named group of child nodes, ordered by name
#[derive(Debug, Clone, Default)]
pub struct CommandGroup {
    name: String,
    children: BTreeMap<String, CommandNode>,
}

impl CommandGroup {
    pub fn new(name: impl Into<String>) -> Result<Self, TreeError> {
        let name = name.into();
        validate_name(&name)?;
        Ok(Self {
            name,
            children: BTreeMap::new(),
        })
    }

    /// Build a group from its children in one go
    pub fn with_children(
        name: impl Into<String>,
        children: impl IntoIterator<Item = CommandNode>,
    ) -> Result<Self, TreeError> {
        let mut group = Self::new(name)?;
        for child in children {
            group.add(child)?;
        }
        Ok(group)
    }

    /// Add a child node. Names must be unique within the group.
    pub fn add(&mut self, node: impl Into<CommandNode>) -> Result<(), TreeError> {
        let node = node.into();
        let name = node.name().to_string();
        if self.children.contains_key(&name) {
            return Err(TreeError::DuplicateName {
                group: self.name.clone(),
                name,
            });
        }
        self.children.insert(name, node);
        Ok(())
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Child with exactly this name
    pub fn child(&self, name: &str) -> Option<&CommandNode> {
        self.children.get(name)
    }

    /// Children in name order
    pub fn children(&self) -> impl Iterator<Item = &CommandNode> {
        self.children.values()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }

    /// Children whose name starts with `prefix`, in name order
    pub fn candidates(&self, prefix: &str) -> Vec<&CommandNode> {
        self.children
            .range(prefix.to_string()..)
            .take_while(|(name, _)| name.starts_with(prefix))
            .map(|(_, node)| node)
            .collect()
    }
}

/// A leaf command with positional arguments
#[derive(Debug, Clone)]
pub struct Command {
    name: String,
    description: String,
    args: Vec<ArgumentSpec>,
}

impl Command {
    /// Create a command, checking that no required argument follows an optional
    /// one and that every default parses as its argument kind.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        args: Vec<ArgumentSpec>,
    ) -> Result<Self, TreeError> {
        let name = name.into();
        validate_name(&name)?;
        validate_arg_names(&name, &args)?;

        let mut seen_optional = false;
        for arg in &args {
            match &arg.default {
                Some(default) => {
                    if arg.kind.parse(default).is_none() {
                        return Err(TreeError::InvalidDefault {
                            command: name,
                            argument: arg.name.clone(),
                            expected: arg.kind.type_name(),
                            default: default.clone(),
                        });
                    }
                    seen_optional = true;
                }
                None if seen_optional => {
                    return Err(TreeError::RequiredAfterOptional {
                        command: name,
                        argument: arg.name.clone(),
                    });
                }
                None => {}
            }
        }

        Ok(Self {
            name,
            description: description.into(),
            args,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn args(&self) -> &[ArgumentSpec] {
        &self.args
    }

    /// Number of arguments without a default
    pub fn required_count(&self) -> usize {
        self.args.iter().take_while(|arg| !arg.is_optional()).count()
    }

    /// Classify how many argument words were supplied
    pub fn arity(&self, given: usize) -> Arity {
        if given > self.args.len() {
            Arity::TooMany(given - self.args.len())
        } else if given < self.required_count() {
            Arity::Missing(self.required_count() - given)
        } else {
            Arity::Complete
        }
    }

    /// Guide text for this command given the argument words typed so far.
    ///
    /// While the last argument is still being typed and is an enum, its options
    /// are completed like identifiers. Otherwise the unfilled arguments are listed.
    pub fn complete_text(&self, typed: &[String], trailing_separator: bool) -> String {
        if !trailing_separator {
            if let Some(completion) = self.complete_enum(typed) {
                return completion;
            }
        }

        self.listing(typed.len(), trailing_separator)
    }

    fn complete_enum(&self, typed: &[String]) -> Option<String> {
        let partial = typed.last()?;
        let ArgKind::Enum(options) = &self.args.get(typed.len() - 1)?.kind else {
            return None;
        };
        if options.iter().any(|option| option == partial) {
            return None;
        }

        let matches: Vec<&str> = options
            .iter()
            .map(String::as_str)
            .filter(|option| option.starts_with(partial.as_str()))
            .collect();

        match matches.as_slice() {
            [] => None,
            [only] => Some(format!(
                "{}{}",
                &(*only)[partial.len()..],
                self.listing(typed.len(), false)
            )),
            many => Some(format!("[{}]", many.join(", "))),
        }
    }

    /// `[arg] [arg=default]` for every argument from `from` on
    fn listing(&self, from: usize, trailing_separator: bool) -> String {
        let remaining: Vec<String> = self
            .args
            .iter()
            .skip(from)
            .map(ArgumentSpec::display)
            .collect();

        if remaining.is_empty() {
            return String::new();
        }

        let prefix = if trailing_separator { "" } else { " " };
        format!("{}{}", prefix, remaining.join(" "))
    }
}

/// How the supplied argument count relates to a command's signature
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    Complete,
    /// This many required arguments are missing
    Missing(usize),
    /// This many surplus words were given
    TooMany(usize),
}

/// Outcome of walking the tree with a list of words
#[derive(Debug, Clone)]
pub enum MatchResult<'t, 'i> {
    /// Input ran out while positioned at a group
    Group {
        group: &'t CommandGroup,
        path: Vec<&'t str>,
    },
    /// A word did not name any child of the group
    Unmatched {
        group: &'t CommandGroup,
        path: Vec<&'t str>,
        token: &'i str,
        /// Children whose name starts with `token`
        candidates: Vec<&'t str>,
    },
    /// Reached a leaf command; the remaining words are its arguments
    Command {
        command: &'t Command,
        path: Vec<&'t str>,
        args: &'i [String],
        arity: Arity,
    },
}

/// The whole grammar: an unnamed root group
#[derive(Debug, Clone, Default)]
pub struct CommandTree {
    root: CommandGroup,
}

impl CommandTree {
    pub fn new(children: impl IntoIterator<Item = CommandNode>) -> Result<Self, TreeError> {
        let mut root = CommandGroup::default();
        for child in children {
            root.add(child)?;
        }
        Ok(Self { root })
    }

    pub fn root(&self) -> &CommandGroup {
        &self.root
    }

    /// Walk the tree with `tokens`
    pub fn lookup<'t, 'i>(&'t self, tokens: &'i [String]) -> MatchResult<'t, 'i> {
        let mut group = &self.root;
        let mut path = Vec::new();

        for (index, token) in tokens.iter().enumerate() {
            match group.child(token) {
                Some(CommandNode::Group(child)) => {
                    path.push(child.name());
                    group = child;
                }
                Some(CommandNode::Command(command)) => {
                    path.push(command.name());
                    let args = &tokens[index + 1..];
                    return MatchResult::Command {
                        command,
                        path,
                        args,
                        arity: command.arity(args.len()),
                    };
                }
                None => {
                    return MatchResult::Unmatched {
                        group,
                        path,
                        token,
                        candidates: group
                            .candidates(token)
                            .into_iter()
                            .map(CommandNode::name)
                            .collect(),
                    };
                }
            }
        }

        MatchResult::Group { group, path }
    }

    /// Guide text for a partially typed line. Never repeats what was typed.
    ///
    /// - nothing typed at a group: empty
    /// - unique prefix match: the missing suffix of the child's name
    /// - several prefix matches: `[a, b]`
    /// - at a command: its unfilled arguments, `[arg] [arg=default]`
    pub fn complete_text(&self, input: &SplitInput) -> String {
        let words = &input.words;
        let mut group = &self.root;

        for (index, word) in words.iter().enumerate() {
            let still_typing = index + 1 == words.len() && !input.trailing_separator;

            match group.child(word) {
                Some(CommandNode::Group(child)) => {
                    if still_typing {
                        return String::new();
                    }
                    group = child;
                    continue;
                }
                Some(CommandNode::Command(command)) => {
                    return command.complete_text(&words[index + 1..], input.trailing_separator);
                }
                None => {}
            }

            if !still_typing {
                return String::new();
            }

            return match group.candidates(word).as_slice() {
                [] => String::new(),
                [CommandNode::Command(command)] => {
                    format!("{}{}", &command.name()[word.len()..], command.complete_text(&[], false))
                }
                [CommandNode::Group(child)] => child.name()[word.len()..].to_string(),
                many => {
                    let names: Vec<&str> = many.iter().map(|node| node.name()).collect();
                    format!("[{}]", names.join(", "))
                }
            };
        }

        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(line: &str) -> Vec<String> {
        crate::command::tokenizer::tokenize(line)
    }

    fn sample_tree() -> CommandTree {
        CommandTree::new([
            Command::new("play", "Start playback.", vec![]).unwrap().into(),
            Command::new("pause", "Pause playback.", vec![]).unwrap().into(),
            Command::new(
                "move",
                "Move the selection.",
                vec![
                    ArgumentSpec::new("direction", ArgKind::one_of(&["up", "down"])),
                    ArgumentSpec::new("amount", ArgKind::Unsigned).with_default("1"),
                ],
            )
            .unwrap()
            .into(),
            CommandGroup::with_children(
                "set",
                [
                    Command::new(
                        "tempo",
                        "Set the tempo.",
                        vec![ArgumentSpec::new("bpm", ArgKind::Float)],
                    )
                    .unwrap()
                    .into(),
                    Command::new("volume", "Set the volume.", vec![]).unwrap().into(),
                ],
            )
            .unwrap()
            .into(),
        ])
        .unwrap()
    }

    #[test]
    fn test_duplicate_child_rejected() {
        let mut group = CommandGroup::new("set").unwrap();
        group.add(Command::new("tempo", "", vec![]).unwrap()).unwrap();
        let err = group.add(Command::new("tempo", "", vec![]).unwrap()).unwrap_err();
        assert_eq!(
            err,
            TreeError::DuplicateName {
                group: "set".into(),
                name: "tempo".into()
            }
        );
    }

    #[test]
    fn test_required_after_optional_rejected() {
        let result = Command::new(
            "bad",
            "",
            vec![
                ArgumentSpec::new("a", ArgKind::Int).with_default("1"),
                ArgumentSpec::new("b", ArgKind::Int),
            ],
        );
        assert!(matches!(result, Err(TreeError::RequiredAfterOptional { .. })));
    }

    #[test]
    fn test_invalid_default_rejected() {
        let result = Command::new(
            "bad",
            "",
            vec![ArgumentSpec::new("a", ArgKind::Int).with_default("one")],
        );
        assert!(matches!(result, Err(TreeError::InvalidDefault { .. })));
    }

    #[test]
    fn test_invalid_names_rejected() {
        assert_eq!(CommandGroup::new("").unwrap_err(), TreeError::EmptyName);
        for name in ["two words", "x[y", "a;b", "a,b", "k=v", "tab\t", "\"q\""] {
            assert_eq!(
                Command::new(name, "", vec![]).unwrap_err(),
                TreeError::InvalidName(name.to_string()),
                "{name:?} should be rejected"
            );
        }
        assert!(CommandGroup::new("x]").is_err());
        assert!(Command::new("step-2", "", vec![]).is_ok());
        assert!(Command::new("steps_per_beat", "", vec![]).is_ok());
    }

    #[test]
    fn test_invalid_argument_names_rejected() {
        for name in ["", "a] [b", "level=1", "two words", "n2"] {
            let result = Command::new("nudge", "", vec![ArgumentSpec::new(name, ArgKind::Int)]);
            assert_eq!(
                result.unwrap_err(),
                TreeError::InvalidArgumentName {
                    command: "nudge".into(),
                    argument: name.into()
                }
            );
        }
        assert!(Command::new("nudge", "", vec![ArgumentSpec::new("steps_per_beat", ArgKind::Int)]).is_ok());
    }

    #[test]
    fn test_duplicate_argument_rejected() {
        let result = Command::new(
            "nudge",
            "",
            vec![
                ArgumentSpec::new("amount", ArgKind::Int),
                ArgumentSpec::new("amount", ArgKind::Int).with_default("7"),
            ],
        );
        assert_eq!(
            result.unwrap_err(),
            TreeError::DuplicateArgument {
                command: "nudge".into(),
                argument: "amount".into()
            }
        );
    }

    #[test]
    fn test_lookup_group_incomplete() {
        let tree = sample_tree();
        let tokens = words("set");
        match tree.lookup(&tokens) {
            MatchResult::Group { group, path } => {
                assert_eq!(group.name(), "set");
                assert_eq!(path, vec!["set"]);
            }
            other => panic!("unexpected {:?}", other),
        }

        assert!(matches!(tree.lookup(&[]), MatchResult::Group { path, .. } if path.is_empty()));
    }

    #[test]
    fn test_lookup_unmatched_lists_prefix_candidates() {
        let tree = sample_tree();
        let tokens = words("p");
        match tree.lookup(&tokens) {
            MatchResult::Unmatched {
                token, candidates, ..
            } => {
                assert_eq!(token, "p");
                assert_eq!(candidates, vec!["pause", "play"]);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_lookup_is_case_sensitive() {
        let tree = sample_tree();
        let tokens = words("Play");
        assert!(matches!(
            tree.lookup(&tokens),
            MatchResult::Unmatched { candidates, .. } if candidates.is_empty()
        ));
    }

    #[test]
    fn test_lookup_command_arity() {
        let tree = sample_tree();

        let tokens = words("set tempo");
        assert!(matches!(
            tree.lookup(&tokens),
            MatchResult::Command { arity: Arity::Missing(1), .. }
        ));

        let tokens = words("move up");
        assert!(matches!(
            tree.lookup(&tokens),
            MatchResult::Command { arity: Arity::Complete, .. }
        ));

        let tokens = words("move up 2 3");
        match tree.lookup(&tokens) {
            MatchResult::Command {
                command,
                path,
                args,
                arity,
            } => {
                assert_eq!(command.name(), "move");
                assert_eq!(path, vec!["move"]);
                assert_eq!(args, &["up", "2", "3"]);
                assert_eq!(arity, Arity::TooMany(1));
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_complete_text_rules() {
        let tree = sample_tree();
        let guide = |line: &str| tree.complete_text(&SplitInput::parse(line));

        assert_eq!(guide("pl"), "ay");
        assert_eq!(guide("p"), "[pause, play]");
        assert_eq!(guide("x"), "");
        assert_eq!(guide("se"), "t");
        assert_eq!(guide("set"), "");
        assert_eq!(guide("set "), "");
        assert_eq!(guide("set t"), "empo [bpm]");
        assert_eq!(guide("set tempo"), " [bpm]");
        assert_eq!(guide("set tempo "), "[bpm]");
        assert_eq!(guide("set tempo 120"), "");
        assert_eq!(guide("set tempo 120 "), "");
        assert_eq!(guide("nope more"), "");
    }

    #[test]
    fn test_complete_text_lists_remaining_arguments() {
        let tree = sample_tree();
        let guide = |line: &str| tree.complete_text(&SplitInput::parse(line));

        assert_eq!(guide("move"), " [direction] [amount=1]");
        assert_eq!(guide("move "), "[direction] [amount=1]");
        assert_eq!(guide("move up"), " [amount=1]");
        assert_eq!(guide("move up "), "[amount=1]");
        assert_eq!(guide("move up 3 4"), "");
    }

    #[test]
    fn test_complete_text_enum_argument() {
        let tree = sample_tree();
        let guide = |line: &str| tree.complete_text(&SplitInput::parse(line));

        assert_eq!(guide("move d"), "own [amount=1]");
        assert_eq!(guide("move x"), " [amount=1]");

        let tree = CommandTree::new([Command::new(
            "mode",
            "",
            vec![ArgumentSpec::new("mode", ArgKind::one_of(&["pitch", "pan", "velocity"]))],
        )
        .unwrap()
        .into()])
        .unwrap();
        assert_eq!(tree.complete_text(&SplitInput::parse("mode p")), "[pan, pitch]");
    }
}
