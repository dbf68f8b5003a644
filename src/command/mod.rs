// Command processing core
//
// This module turns typed text into commands:
// - tokenizer: line -> words (quoted spans stay whole)
// - tree: immutable grammar of groups and leaf commands, lookup and completion
// - guide_text: ghost-text hints and Tab completion for a partial line
// - invocation: resolution of a full line into a command with typed arguments
// - history: arrow-key recall of submitted lines
// - reference: documentation generated from the tree
//
// Everything here runs on the command/UI thread. Results that must reach the
// audio thread go through `crate::messaging`.

pub mod args;
pub mod error;
pub mod guide_text;
pub mod history;
pub mod invocation;
pub mod reference;
pub mod tokenizer;
pub mod tree;

pub use args::{ArgKind, ArgValue, ArgumentSpec};
pub use error::{ResolveError, TreeError};
pub use guide_text::{complete_id, generate_guide_text};
pub use history::CommandHistory;
pub use invocation::Invocation;
pub use tokenizer::{SplitInput, tokenize};
pub use tree::{Arity, Command, CommandGroup, CommandNode, CommandTree, MatchResult};
