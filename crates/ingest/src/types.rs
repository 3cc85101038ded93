//! Raw and validated document records.
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Where a document's text came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentSource {
    /// Text supplied directly by the caller.
    Inline,
    /// Text read from a file on disk.
    File { path: PathBuf },
}

/// Unvalidated input: an identifier and, if extraction succeeded, its text.
///
/// `text: None` models an identifier whose text could not be obtained; it
/// is rejected by [`ingest`](crate::ingest) as malformed input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawDocument {
    pub id: String,
    pub source: DocumentSource,
    pub text: Option<String>,
}

impl RawDocument {
    /// A document whose text is supplied inline.
    pub fn inline(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            source: DocumentSource::Inline,
            text: Some(text.into()),
        }
    }
}

/// A validated document, ready for shingling.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub source: DocumentSource,
    pub text: String,
}
