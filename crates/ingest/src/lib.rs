//! docsim Ingest Layer
//!
//! This is where documents enter the docsim pipeline. Text extraction happens
//! upstream; we receive an identifier plus (maybe) its text and hand back a
//! validated [`Document`] the LSH stage can shingle.
//!
//! ## What we do here
//!
//! - **Validate identifiers** - strip control characters, reject empty and
//!   duplicate identifiers.
//! - **Reject absent text** - an identifier without text is malformed input
//!   and never reaches shingling.
//! - **Enforce limits** - optional maximum text size.
//! - **Optionally normalize whitespace** - off by default so shingles see the
//!   text as supplied.
//! - **Load plain-text files** - single files, directories, or a mix.
//! - **Log everything** - structured logs via tracing.
//!
//! ## Example
//!
//! ```
//! use ingest::{ingest_all, IngestConfig, RawDocument};
//!
//! let raw = vec![
//!     RawDocument::inline("a.txt", "some text"),
//!     RawDocument { text: None, ..RawDocument::inline("b.txt", "") },
//! ];
//! let batch = ingest_all(raw, &IngestConfig::default());
//!
//! assert_eq!(batch.documents.len(), 1);
//! assert_eq!(batch.failures[0].id, "b.txt");
//! ```
//!
use std::collections::HashSet;
use std::time::Instant;

use tracing::{info, warn, Level};

mod config;
mod error;
mod loader;
mod types;

pub use crate::config::{ConfigError, IngestConfig};
pub use crate::error::IngestError;
pub use crate::loader::{load_directory, load_paths, load_text_file};
pub use crate::types::{Document, DocumentSource, RawDocument};

/// A document that did not survive ingest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IngestFailure {
    pub id: String,
    pub error: IngestError,
}

/// Result of ingesting a batch: accepted documents in input order plus the
/// rejected ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestBatch {
    pub documents: Vec<Document>,
    pub failures: Vec<IngestFailure>,
}

/// Validate one raw document.
pub fn ingest(raw: RawDocument, cfg: &IngestConfig) -> Result<Document, IngestError> {
    ingest_with_seen(raw, cfg, None)
}

/// Validate a batch, additionally rejecting repeated identifiers.
///
/// The first accepted occurrence of an identifier wins; later ones are
/// failures.
pub fn ingest_all<I>(raws: I, cfg: &IngestConfig) -> IngestBatch
where
    I: IntoIterator<Item = RawDocument>,
{
    let mut batch = IngestBatch::default();
    let mut seen = HashSet::new();
    for raw in raws {
        let raw_id = raw.id.clone();
        match ingest_with_seen(raw, cfg, Some(&mut seen)) {
            Ok(doc) => batch.documents.push(doc),
            Err(error) => batch.failures.push(IngestFailure { id: raw_id, error }),
        }
    }
    batch
}

fn ingest_with_seen(
    raw: RawDocument,
    cfg: &IngestConfig,
    seen: Option<&mut HashSet<String>>,
) -> Result<Document, IngestError> {
    let start = Instant::now();
    let span = tracing::span!(Level::INFO, "ingest.ingest", doc_id = %raw.id);
    let _guard = span.enter();

    match ingest_inner(raw, cfg, seen.as_deref()) {
        Ok(doc) => {
            if let Some(seen) = seen {
                seen.insert(doc.id.clone());
            }
            info!(
                doc_id = %doc.id,
                text_len = doc.text.len(),
                elapsed_micros = start.elapsed().as_micros(),
                "ingest_success"
            );
            Ok(doc)
        }
        Err(err) => {
            warn!(
                error = %err,
                elapsed_micros = start.elapsed().as_micros(),
                "ingest_failure"
            );
            Err(err)
        }
    }
}

fn ingest_inner(
    raw: RawDocument,
    cfg: &IngestConfig,
    seen: Option<&HashSet<String>>,
) -> Result<Document, IngestError> {
    let RawDocument { id, source, text } = raw;

    let id = sanitize_identifier(id, cfg.strip_control_chars)?;
    if seen.is_some_and(|seen| seen.contains(&id)) {
        return Err(IngestError::MalformedInput(format!(
            "duplicate document identifier {id:?}"
        )));
    }

    let Some(text) = text else {
        return Err(IngestError::MalformedInput(format!(
            "text is absent for {id:?}"
        )));
    };

    if let Some(limit) = cfg.max_text_bytes {
        if text.len() > limit {
            return Err(IngestError::TextTooLarge(format!(
                "text size {} exceeds limit of {limit}",
                text.len()
            )));
        }
    }

    let text = if cfg.normalize_whitespace {
        normalize_whitespace(&text)
    } else {
        text
    };

    Ok(Document { id, source, text })
}

/// Collapses repeated whitespace, trims edges, and turns newlines into ' '.
pub fn normalize_whitespace(s: &str) -> String {
    let mut normalized = String::with_capacity(s.len());
    for segment in s.split_whitespace() {
        if !normalized.is_empty() {
            normalized.push(' ');
        }
        normalized.push_str(segment);
    }
    normalized
}

fn sanitize_identifier(id: String, strip_control: bool) -> Result<String, IngestError> {
    let filtered = if strip_control {
        id.chars().filter(|c| !c.is_control()).collect::<String>()
    } else {
        id
    };
    let trimmed = filtered.trim();
    if trimmed.is_empty() {
        return Err(IngestError::MalformedInput(
            "document identifier is empty".to_string(),
        ));
    }
    Ok(trimmed.to_string())
}
