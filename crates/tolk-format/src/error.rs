//! Error types for message formatting

use thiserror::Error;

/// Errors raised while parsing or rendering a message pattern
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FormatError {
    /// The locale tag could not be parsed as a language identifier
    #[error("Invalid language identifier: {0}")]
    InvalidLocale(String),

    /// The pattern is not valid MessageFormat syntax
    #[error("Syntax error at byte {position}: {message}")]
    Syntax { position: usize, message: String },

    /// The pattern references an argument that was not supplied
    #[error("Missing argument: {name}")]
    MissingArgument { name: String },

    /// A plural or number argument received a value that is not numeric
    #[error("Argument '{name}' is not a number")]
    NotANumber { name: String },

    /// The argument type (`date`, `time`, ...) is not rendered by this engine
    #[error("Unsupported type '{kind}' for argument '{name}'")]
    UnsupportedArgumentType { name: String, kind: String },

    /// The argument value is neither a string nor a number
    #[error("Unsupported value for argument '{name}'")]
    UnsupportedValue { name: String },
}

/// Result type for formatting operations
pub type FormatResult<T> = Result<T, FormatError>;
