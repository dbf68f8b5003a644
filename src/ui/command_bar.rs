// Command bar - Input line state: typing, Tab completion, history recall, ghost text
//
// Holds no terminal state so it can be driven by any front end (and by tests).
// The ghost text is recomputed after every edit.

use crate::messaging::notification::Message;
use crate::session::{CommandSession, Executor};

#[derive(Debug, Default, Clone)]
pub struct CommandBar {
    input: String,
    ghost: String,
}

impl CommandBar {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    /// Guide text shown dimmed after the cursor
    pub fn ghost_text(&self) -> &str {
        &self.ghost
    }

    pub fn insert_char<E: Executor>(&mut self, c: char, session: &CommandSession<E>) {
        self.input.push(c);
        self.refresh(session);
    }

    pub fn backspace<E: Executor>(&mut self, session: &CommandSession<E>) {
        self.input.pop();
        self.refresh(session);
    }

    pub fn clear(&mut self) {
        self.input.clear();
        self.ghost.clear();
    }

    /// Append the completable part of the current word plus a space
    pub fn complete<E: Executor>(&mut self, session: &CommandSession<E>) {
        let id = session.complete_id(&self.input);
        if !id.is_empty() {
            self.input.push_str(&id);
            self.input.push(' ');
        }
        self.refresh(session);
    }

    pub fn history_previous<E: Executor>(&mut self, session: &mut CommandSession<E>) {
        self.input = session.history_previous().unwrap_or_default();
        self.refresh(session);
    }

    pub fn history_next<E: Executor>(&mut self, session: &mut CommandSession<E>) {
        self.input = session.history_next().unwrap_or_default();
        self.refresh(session);
    }

    /// Submit the current line and reset the bar. Returns `None` for a blank line.
    pub fn submit<E: Executor>(&mut self, session: &mut CommandSession<E>) -> Option<Message> {
        let line = std::mem::take(&mut self.input);
        self.ghost.clear();
        if line.trim().is_empty() {
            return None;
        }
        Some(session.submit(&line))
    }

    fn refresh<E: Executor>(&mut self, session: &CommandSession<E>) {
        self.ghost = session.guide_text(&self.input);
    }
}
