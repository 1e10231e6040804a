//! Cross-cutting error types for tally.
//!
//! Transport, report and configuration errors live in their own crates; the
//! binary converges them through `anyhow`.

use thiserror::Error;

/// Errors raised while resolving the reporting date window.
#[derive(Debug, Error)]
pub enum WindowError {
    /// A `--since`/`--until` value is not a `YYYY-MM-DD` date.
    #[error("invalid date '{value}' (expected YYYY-MM-DD): {source}")]
    InvalidDate {
        value: String,
        source: chrono::ParseError,
    },

    /// Local midnight of the given date does not exist (DST gap).
    #[error("local midnight of {date} does not exist in this time zone")]
    NonexistentLocalTime { date: chrono::NaiveDate },

    /// The window end is not after its start.
    #[error("empty date window: until ({until}) must be after since ({since})")]
    Empty { since: String, until: String },
}

/// Errors raised when naming record fields.
#[derive(Debug, Error)]
pub enum FieldError {
    #[error("unknown task field '{0}'")]
    Unknown(String),
}
