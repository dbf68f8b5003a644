// Tokenizer - Splits a raw command line into words
//
// Words are separated by spaces. A double quote toggles quoted mode and is never
// part of a word, so `cmd "a b" c` yields three words. An unterminated quote is
// closed implicitly at the end of the line.

/// Separator between words outside of quotes
pub const WORD_SEPARATOR: char = ' ';

/// Quote character, toggles quoted mode
pub const QUOTE: char = '"';

/// Split `line` into words, honouring double-quoted spans.
pub fn tokenize(line: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            QUOTE => in_quotes = !in_quotes,
            WORD_SEPARATOR if !in_quotes => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
            _ => current.push(ch),
        }
    }

    if !current.is_empty() {
        words.push(current);
    }

    words
}

/// A tokenized command line that remembers whether the user is still typing the
/// last word.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SplitInput {
    pub words: Vec<String>,
    /// True when the line ends with a separator, i.e. the last word is finished
    pub trailing_separator: bool,
}

impl SplitInput {
    pub fn parse(line: &str) -> Self {
        Self {
            words: tokenize(line),
            trailing_separator: line.is_empty() || line.ends_with(WORD_SEPARATOR),
        }
    }
}

/// Split a submitted line into individual commands on `separator`, ignoring
/// separators inside double quotes. Empty commands are dropped.
pub fn split_commands(line: &str, separator: char) -> Vec<String> {
    let mut commands = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;

    for ch in line.chars() {
        if ch == QUOTE {
            in_quotes = !in_quotes;
        }

        if ch == separator && !in_quotes {
            if !current.trim().is_empty() {
                commands.push(current.trim().to_string());
            }
            current.clear();
        } else {
            current.push(ch);
        }
    }

    if !current.trim().is_empty() {
        commands.push(current.trim().to_string());
    }

    commands
}
