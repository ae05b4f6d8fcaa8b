//! Unified error handling for trackalign.
//!
//! Every failure is fatal for the activity being converted: channel strings
//! either decode completely or the whole conversion aborts. There are no
//! retryable errors anywhere in the pipeline.

use thiserror::Error;

/// Result type alias for trackalign operations.
pub type Result<T> = std::result::Result<T, ExportError>;

/// Errors raised while converting one activity.
#[derive(Debug, Error)]
pub enum ExportError {
    /// A channel string contained a token that is not a signed integer.
    #[error("channel '{channel}': malformed token '{token}'")]
    MalformedChannel {
        channel: &'static str,
        token: String,
    },

    /// A channel field had fewer sub-fields than its layout requires.
    #[error("channel '{channel}': field '{field}' is missing sub-field {index}")]
    ShortField {
        channel: &'static str,
        field: String,
        index: usize,
    },

    /// A required activity field was absent from the input document.
    #[error("activity field '{field}' is missing")]
    MissingField { field: &'static str },

    /// A required activity field was present but not numeric.
    #[error("activity field '{field}' is not numeric: {value}")]
    InvalidField { field: &'static str, value: String },

    /// A trackpoint timestamp fell outside the representable date range.
    #[error("timestamp {seconds} is out of range")]
    InvalidTimestamp { seconds: i64 },

    /// I/O failure while reading input documents or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The input document was not valid JSON.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
