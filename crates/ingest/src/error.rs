//! Error types produced by the ingest crate.
//!
//! All errors are typed, cloneable and comparable so callers can match on
//! them and tests can assert on them directly.
//!
//! | Error | Description |
//! |-------|-------------|
//! | [`MalformedInput`](IngestError::MalformedInput) | Identifier empty or duplicated, or text absent |
//! | [`TextTooLarge`](IngestError::TextTooLarge) | Text exceeds `max_text_bytes` |
//! | [`Io`](IngestError::Io) | A file or directory could not be read |
use thiserror::Error;

/// Errors that can occur while turning raw input into [`Document`](crate::Document)s.
///
/// # Examples
///
/// ```rust
/// use ingest::IngestError;
///
/// let err = IngestError::MalformedInput("text is absent for \"a.txt\"".to_string());
/// assert!(err.to_string().starts_with("malformed input"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum IngestError {
    /// The identifier is empty or repeated, or the identifier maps to no text.
    ///
    /// Documents failing this check never reach shingling.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// Text exceeds [`IngestConfig::max_text_bytes`](crate::IngestConfig::max_text_bytes).
    #[error("text exceeds size limit: {0}")]
    TextTooLarge(String),

    /// Reading from the filesystem failed.
    #[error("i/o error: {0}")]
    Io(String),
}

impl From<std::io::Error> for IngestError {
    fn from(err: std::io::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}

impl From<walkdir::Error> for IngestError {
    fn from(err: walkdir::Error) -> Self {
        IngestError::Io(err.to_string())
    }
}
