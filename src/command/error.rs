// Command errors - Tree construction and line resolution

/// Result type for resolving a command line
pub type ResolveResult<T> = Result<T, ResolveError>;

/// Errors raised while building a command tree
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TreeError {
    #[error("Command name cannot be empty")]
    EmptyName,

    #[error("Invalid command name '{0}': use letters, digits, '_' or '-'")]
    InvalidName(String),

    #[error("Command '{command}': invalid argument name '{argument}', use letters or '_'")]
    InvalidArgumentName { command: String, argument: String },

    #[error("Command '{command}': argument '{argument}' is declared twice")]
    DuplicateArgument { command: String, argument: String },

    #[error("Duplicate name '{name}' in group '{group}'")]
    DuplicateName { group: String, name: String },

    #[error("Command '{command}': required argument '{argument}' follows an optional one")]
    RequiredAfterOptional { command: String, argument: String },

    #[error("Command '{command}': default '{default}' is not a valid {expected} for '{argument}'")]
    InvalidDefault {
        command: String,
        argument: String,
        expected: &'static str,
        default: String,
    },
}

/// Errors raised while resolving a line against the tree
///
/// None of these are fatal: the session reports them as a status message and
/// skips execution.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolveError {
    #[error("No command given.")]
    Empty,

    #[error("Command not found: {token}")]
    NotFound { token: String },

    #[error("Incomplete command: '{path}' expects a subcommand")]
    Incomplete { path: String },

    #[error("Too many arguments for '{command}': expected at most {expected}, got {given}")]
    TooManyArguments {
        command: String,
        expected: usize,
        given: usize,
    },

    #[error("Missing argument '{argument}' for '{command}'")]
    MissingArgument { command: String, argument: String },

    #[error("Invalid value '{value}' for '{argument}': expected {expected}")]
    InvalidArgument {
        argument: String,
        expected: String,
        value: String,
    },
}
