//! Error types for grammar construction, configuration loading and rendering.

use std::io;

use thiserror::Error;

/// The error type for every fallible operation in this crate.
#[derive(Debug, Error)]
pub enum Error {
    /// An argument was outside the range the operation is defined for.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A symbol is bound to an action name the turtle does not know.
    #[error("unknown action `{name}` bound to symbol `{symbol}`")]
    UnknownAction {
        /// The character of the offending symbol.
        symbol: char,
        /// The unresolved action name.
        name: String,
    },

    /// The configuration document is well-formed JSON but has the wrong shape.
    #[error("configuration error: {0}")]
    Config(String),

    /// The configuration document is not valid JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Reading configuration or writing output failed.
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
}

impl Error {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        Self::InvalidArgument(message.into())
    }

    /// Creates a configuration shape error.
    #[must_use]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }
}

/// A convenience `Result` alias for [`Error`].
pub type Result<T> = std::result::Result<T, Error>;
