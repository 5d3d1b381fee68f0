//! Error types for rule construction and response resolution.

use thiserror::Error;

/// Everything that can go wrong while building or querying a resolver.
///
/// Only [`Error::EmptyInput`] and [`Error::InputTooLong`] come out of
/// resolution; the rest are raised while a rule table or fallback list is
/// being constructed.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Message cannot be empty")]
    EmptyInput,

    #[error("Message is too long (max {max} characters)")]
    InputTooLong { len: usize, max: usize },

    #[error("rule '{rule}' has an empty pattern")]
    EmptyPattern { rule: String },

    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid time format '{format}'")]
    InvalidTimeFormat { format: String },

    #[error("at least one fallback response is required")]
    NoFallbacks,

    #[error("invalid rule configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to read rule configuration: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// True for failures caused by the caller's input rather than by the
    /// resolver's own configuration.
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::InputTooLong { .. })
    }
}

pub type Result<T> = std::result::Result<T, Error>;
