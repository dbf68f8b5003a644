// Command session - Ties the tree, the history and an executor together
//
// The UI surface talks to a session only: it asks for guide text while the user
// types and submits whole lines on Enter. A line may hold several commands split on
// the separator; they run in order and the session reports one status message.

use crate::command::guide_text::{complete_id, generate_guide_text};
use crate::command::history::CommandHistory;
use crate::command::invocation::Invocation;
use crate::command::tokenizer::split_commands;
use crate::command::tree::CommandTree;
use crate::messaging::notification::Message;

/// Default separator between commands on one line
pub const DEFAULT_SEPARATOR: char = ';';

/// Performs the side effects of resolved commands
///
/// Implemented by the application. Executors run on the command thread and push
/// anything the audio thread needs through the bridge.
pub trait Executor {
    /// Run one resolved command and describe the outcome
    fn execute(&mut self, invocation: &Invocation<'_>) -> Message;

    /// True once a command asked the session to end
    fn should_quit(&self) -> bool {
        false
    }
}

pub struct CommandSession<E: Executor> {
    tree: CommandTree,
    history: CommandHistory,
    executor: E,
    separator: char,
    last_message: Option<Message>,
}

impl<E: Executor> CommandSession<E> {
    pub fn new(tree: CommandTree, executor: E) -> Self {
        Self {
            tree,
            history: CommandHistory::new(),
            executor,
            separator: DEFAULT_SEPARATOR,
            last_message: None,
        }
    }

    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Ghost text for the command currently being typed
    pub fn guide_text(&self, line: &str) -> String {
        generate_guide_text(&self.tree, self.current_command(line))
    }

    /// Text Tab should insert for the command currently being typed
    pub fn complete_id(&self, line: &str) -> String {
        complete_id(&self.tree, self.current_command(line))
    }

    // Only the part after the last separator is being edited
    fn current_command<'l>(&self, line: &'l str) -> &'l str {
        let mut in_quotes = false;
        let mut start = 0;
        for (index, c) in line.char_indices() {
            if c == '"' {
                in_quotes = !in_quotes;
            } else if c == self.separator && !in_quotes {
                start = index + c.len_utf8();
            }
        }
        line[start..].trim_start()
    }

    /// Resolve and run every command on `line`, stopping at the first error.
    /// The line is stored in history once, blank lines are not stored.
    pub fn submit(&mut self, line: &str) -> Message {
        let commands = split_commands(line, self.separator);
        if commands.is_empty() {
            let message = Message::error("No command given.");
            self.last_message = Some(message.clone());
            return message;
        }

        self.history.add_command(line.trim());

        let mut message = Message::debug("");
        for command in &commands {
            message = match self.tree.resolve(command) {
                Ok(invocation) => self.executor.execute(&invocation),
                Err(err) => Message::error(err.to_string()),
            };
            log::info!("'{}' -> {}", command, message);

            if message.is_error() || self.executor.should_quit() {
                break;
            }
        }

        self.last_message = Some(message.clone());
        message
    }

    /// Step back through history
    pub fn history_previous(&mut self) -> Option<String> {
        self.history.previous()
    }

    /// Step forward through history
    pub fn history_next(&mut self) -> Option<String> {
        self.history.next()
    }

    pub fn history(&self) -> &CommandHistory {
        &self.history
    }

    pub fn executor(&self) -> &E {
        &self.executor
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.last_message.as_ref()
    }

    pub fn should_quit(&self) -> bool {
        self.executor.should_quit()
    }
}
