// CommandHistory - Recall of previously submitted command lines
//
// This is independent of undo/redo of application state: it only stores the text
// the user typed. The cursor position `history.len()` is the 'live' line being
// edited, which has no stored string.

/// Linear log of submitted commands with a navigation cursor
///
/// # Invariants
/// - `current_index` is always in `0..=history.len()`
/// - no two adjacent entries are equal
/// - only `add_command` mutates the stored entries
#[derive(Debug, Clone, Default)]
pub struct CommandHistory {
    history: Vec<String>,
    current_index: usize,
}

impl CommandHistory {
    /// Create an empty history positioned at the live line
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a command, discarding every entry at and after the cursor when the
    /// user had navigated back. A command equal to the last entry is ignored.
    pub fn add_command(&mut self, command: &str) {
        if self.current_index != self.history.len() {
            log::debug!(
                "History truncated from {} to {} entries",
                self.history.len(),
                self.current_index
            );
            self.history.truncate(self.current_index);
        }

        if self.history.last().map(String::as_str) != Some(command) {
            self.history.push(command.to_string());
        }

        self.current_index = self.history.len();
    }

    /// Step back and return that entry. Clamps at the oldest entry.
    pub fn previous(&mut self) -> Option<String> {
        if self.history.is_empty() {
            return None;
        }

        if self.current_index != 0 {
            self.current_index -= 1;
        }

        self.history.get(self.current_index).cloned()
    }

    /// Step forward and return that entry, or `None` on reaching the live line.
    pub fn next(&mut self) -> Option<String> {
        if self.current_index < self.history.len() {
            self.current_index += 1;
        }

        self.history.get(self.current_index).cloned()
    }

    /// Entry under the cursor, `None` at the live line
    pub fn get_command(&self) -> Option<String> {
        self.history.get(self.current_index).cloned()
    }

    pub fn len(&self) -> usize {
        self.history.len()
    }

    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    /// Stored entries, oldest first
    pub fn entries(&self) -> &[String] {
        &self.history
    }
}
