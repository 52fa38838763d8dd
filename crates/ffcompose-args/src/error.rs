//! Error types for ffcompose-args.

/// Result type alias using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while constructing or rendering arguments.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// A required field was missing or empty at construction time.
    #[error("invalid {what}: {message}")]
    Configuration { what: String, message: String },

    /// A raw string flag contains a character reserved by the filtergraph
    /// syntax and was never passed through the escaper.
    #[error("unescaped value for {filter}:{key}: {value:?}")]
    UnescapedValue {
        filter: String,
        key: String,
        value: String,
    },

    /// A stream reference points at an input that was never registered.
    #[error("unknown input #{index} (command has {inputs} inputs)")]
    UnknownInput { index: usize, inputs: usize },

    /// A stream type letter could not be parsed.
    #[error("invalid stream type: {0}")]
    InvalidStreamType(String),
}

impl Error {
    /// Create a configuration error.
    pub fn configuration(what: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Configuration {
            what: what.into(),
            message: message.into(),
        }
    }

    /// Create an unescaped value error.
    pub fn unescaped_value(
        filter: impl Into<String>,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Self {
        Self::UnescapedValue {
            filter: filter.into(),
            key: key.into(),
            value: value.into(),
        }
    }

    /// Fail with a configuration error when `value` is empty.
    pub(crate) fn require_non_empty(what: &str, field: &str, value: &str) -> Result<()> {
        if value.trim().is_empty() {
            return Err(Self::configuration(what, format!("{field} must not be empty")));
        }
        Ok(())
    }
}
