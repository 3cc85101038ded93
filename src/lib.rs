//! Workspace umbrella crate for docsim.
//!
//! This crate stitches together document intake and LSH candidate detection
//! so callers can go from raw identifiers and text (or files on disk) to a
//! list of candidate near-duplicate pairs with a single API entry point.
//!
//! ```
//! use docsim::{process_documents, DocsimConfig, RawDocument};
//!
//! let mut cfg = DocsimConfig::default();
//! cfg.lsh.seed = Some(7);
//!
//! let raw = vec![
//!     RawDocument::inline("a.txt", "the quick brown fox jumps over the lazy dog"),
//!     RawDocument::inline("b.txt", "the quick brown fox jumps over the lazy dog!"),
//! ];
//! let report = process_documents(raw, &cfg).unwrap();
//! assert_eq!(report.meta.seed, 7);
//! ```

pub mod config;

pub use crate::config::{ConfigLoadError, DocsimConfig};
pub use ingest::{
    ConfigError as IngestConfigError, Document, DocumentSource, IngestBatch, IngestConfig,
    IngestError, IngestFailure, RawDocument, ingest_all, load_directory, load_paths,
    load_text_file,
};
pub use lsh::{
    Band, BandedDocument, CandidatePair, DocumentFailure, LshConfig, LshError, LshMeta, LshReport,
    MinHashSignature,
};

use std::path::Path;
use std::sync::{Arc, OnceLock, RwLock};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a pipeline run.
///
/// Problems confined to a single document never surface here; they are
/// listed in [`PipelineReport::failures`] instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PipelineError {
    #[error("unsupported config version: {0}")]
    UnsupportedConfigVersion(String),
    #[error("ingest failure: {0}")]
    Ingest(#[from] IngestError),
    #[error("invalid ingest configuration: {0}")]
    IngestConfig(#[from] IngestConfigError),
    #[error("lsh failure: {0}")]
    Lsh(#[from] LshError),
}

/// Stage at which a document was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    Ingest,
    Lsh,
}

/// A document that did not make it to candidate comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PipelineFailure {
    pub id: String,
    pub stage: Stage,
    pub reason: String,
}

/// Outcome of [`process_documents`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PipelineReport {
    /// Candidate pairs in input order of their left document.
    pub candidates: Vec<CandidatePair>,
    /// Signatures and bands of the documents that were compared.
    pub documents: Vec<BandedDocument>,
    /// Ingest failures first, then documents the LSH stage excluded.
    pub failures: Vec<PipelineFailure>,
    pub meta: LshMeta,
}

impl PipelineReport {
    fn merge(ingest_failures: Vec<IngestFailure>, report: LshReport) -> Self {
        let mut failures: Vec<PipelineFailure> = ingest_failures
            .into_iter()
            .map(|failure| PipelineFailure {
                id: failure.id,
                stage: Stage::Ingest,
                reason: failure.error.to_string(),
            })
            .collect();
        failures.extend(report.failures.into_iter().map(|failure| PipelineFailure {
            id: failure.id,
            stage: Stage::Lsh,
            reason: failure.reason,
        }));

        Self {
            candidates: report.candidates,
            documents: report.documents,
            failures,
            meta: report.meta,
        }
    }

    /// True when `a` and `b` were reported as a candidate pair.
    pub fn is_candidate(&self, a: &str, b: &str) -> bool {
        self.candidates.iter().any(|pair| pair.joins(a, b))
    }

    pub fn failure_for(&self, id: &str) -> Option<&PipelineFailure> {
        self.failures.iter().find(|failure| failure.id == id)
    }
}

/// Metrics observer for pipeline stages.
pub trait PipelineMetrics: Send + Sync {
    fn record_ingest(&self, latency: Duration, accepted: usize, rejected: usize);
    fn record_lsh(&self, latency: Duration, result: Result<(), LshError>);
}

/// Install or clear the global pipeline metrics recorder.
pub fn set_pipeline_metrics(recorder: Option<Arc<dyn PipelineMetrics>>) {
    let mut guard = metrics_lock()
        .write()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    *guard = recorder;
}

fn metrics_lock() -> &'static RwLock<Option<Arc<dyn PipelineMetrics>>> {
    static METRICS: OnceLock<RwLock<Option<Arc<dyn PipelineMetrics>>>> = OnceLock::new();
    METRICS.get_or_init(|| RwLock::new(None))
}

fn metrics_recorder() -> Option<Arc<dyn PipelineMetrics>> {
    let guard = metrics_lock()
        .read()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    guard.clone()
}

struct MetricsSpan {
    recorder: Arc<dyn PipelineMetrics>,
    start: Instant,
}

impl MetricsSpan {
    fn start() -> Option<Self> {
        metrics_recorder().map(|recorder| Self {
            recorder,
            start: Instant::now(),
        })
    }

    fn record_ingest(self, batch: &IngestBatch) {
        self.recorder.record_ingest(
            self.start.elapsed(),
            batch.documents.len(),
            batch.failures.len(),
        );
    }

    fn record_lsh(self, result: Result<(), LshError>) {
        self.recorder.record_lsh(self.start.elapsed(), result);
    }
}

/// Run ingest and LSH candidate detection over `raw`, in order.
///
/// Documents rejected by ingest are reported and left out of the LSH run;
/// they do not influence the vocabulary or the permutations.
pub fn process_documents(
    raw: Vec<RawDocument>,
    cfg: &DocsimConfig,
) -> Result<PipelineReport, PipelineError> {
    validate_config(cfg)?;

    let ingest_metrics = MetricsSpan::start();
    let batch = ingest_all(raw, &cfg.ingest);
    if let Some(span) = ingest_metrics {
        span.record_ingest(&batch);
    }

    let pairs: Vec<(&str, &str)> = batch
        .documents
        .iter()
        .map(|doc| (doc.id.as_str(), doc.text.as_str()))
        .collect();

    let lsh_metrics = MetricsSpan::start();
    let report = match lsh::run(&pairs, &cfg.lsh) {
        Ok(report) => {
            if let Some(span) = lsh_metrics {
                span.record_lsh(Ok(()));
            }
            report
        }
        Err(err) => {
            if let Some(span) = lsh_metrics {
                span.record_lsh(Err(err.clone()));
            }
            return Err(PipelineError::Lsh(err));
        }
    };

    Ok(PipelineReport::merge(batch.failures, report))
}

/// Load files and directories from disk, then run [`process_documents`].
///
/// Unreadable paths abort the run; undecodable files are reported as
/// ingest failures.
pub fn process_paths<P: AsRef<Path>>(
    paths: &[P],
    cfg: &DocsimConfig,
) -> Result<PipelineReport, PipelineError> {
    validate_config(cfg)?;
    let raw = load_paths(paths, &cfg.ingest)?;
    process_documents(raw, cfg)
}

fn validate_config(cfg: &DocsimConfig) -> Result<(), PipelineError> {
    if !cfg.is_supported_version() {
        return Err(PipelineError::UnsupportedConfigVersion(cfg.version.clone()));
    }
    cfg.ingest.validate()?;
    cfg.lsh.validate()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, RwLock};
    use std::time::Duration;

    fn seeded(seed: u64) -> DocsimConfig {
        DocsimConfig {
            lsh: LshConfig::default().with_seed(seed),
            ..Default::default()
        }
    }

    #[test]
    fn process_documents_flags_identical_texts() {
        let raw = vec![
            RawDocument::inline("a", "identical text in both documents"),
            RawDocument::inline("b", "identical text in both documents"),
            RawDocument::inline("c", "zzzzzzzzzzzzzzzzzzzzzzzzzzzzzz"),
        ];

        let report = process_documents(raw, &seeded(11)).expect("pipeline should succeed");
        assert!(report.is_candidate("a", "b"));
        assert!(!report.is_candidate("a", "c"));
        assert!(report.failures.is_empty());
        assert_eq!(report.documents.len(), 3);
    }

    #[test]
    fn process_documents_merges_failures_from_both_stages() {
        let raw = vec![
            RawDocument::inline("short", "ab"),
            RawDocument {
                text: None,
                ..RawDocument::inline("missing", "")
            },
            RawDocument::inline("ok", "plenty of characters here"),
        ];

        let report = process_documents(raw, &seeded(3)).unwrap();
        let stages: Vec<(&str, Stage)> = report
            .failures
            .iter()
            .map(|f| (f.id.as_str(), f.stage))
            .collect();
        assert_eq!(stages, vec![("missing", Stage::Ingest), ("short", Stage::Lsh)]);
        assert_eq!(report.documents.len(), 1);
        assert!(report.candidates.is_empty());
    }

    #[test]
    fn process_documents_rejects_bad_bands_before_work() {
        let mut cfg = seeded(1);
        cfg.lsh.bands = 7;

        let result = process_documents(vec![RawDocument::inline("a", "abcdef")], &cfg);
        assert_eq!(
            result,
            Err(PipelineError::Lsh(LshError::InvalidBandConfiguration {
                signature_len: 20,
                bands: 7,
            }))
        );
    }

    #[test]
    fn process_documents_rejects_bad_ingest_config() {
        let mut cfg = seeded(1);
        cfg.ingest.max_text_bytes = Some(0);

        let result = process_documents(Vec::new(), &cfg);
        assert!(matches!(result, Err(PipelineError::IngestConfig(_))));
    }

    #[test]
    fn process_documents_rejects_unknown_config_version() {
        let cfg = DocsimConfig {
            version: "2.0".into(),
            ..seeded(1)
        };

        let result = process_documents(vec![RawDocument::inline("a", "abcdef")], &cfg);
        assert_eq!(
            result,
            Err(PipelineError::UnsupportedConfigVersion("2.0".into()))
        );
    }

    #[derive(Default)]
    struct CountingMetrics {
        events: Arc<RwLock<Vec<&'static str>>>,
    }

    impl CountingMetrics {
        fn snapshot(&self) -> Vec<&'static str> {
            self.events.read().unwrap().clone()
        }
    }

    impl PipelineMetrics for CountingMetrics {
        fn record_ingest(&self, _latency: Duration, _accepted: usize, rejected: usize) {
            let label = if rejected == 0 {
                "ingest_ok"
            } else {
                "ingest_partial"
            };
            self.events.write().unwrap().push(label);
        }

        fn record_lsh(&self, _latency: Duration, result: Result<(), LshError>) {
            let label = if result.is_ok() { "lsh_ok" } else { "lsh_err" };
            self.events.write().unwrap().push(label);
        }
    }

    #[test]
    fn metrics_recorder_tracks_pipeline_outcome() {
        let metrics = Arc::new(CountingMetrics::default());
        set_pipeline_metrics(Some(metrics.clone()));

        let raw = vec![
            RawDocument::inline("m1", "metrics validation payload"),
            RawDocument {
                text: None,
                ..RawDocument::inline("m2", "")
            },
        ];
        let result = process_documents(raw, &seeded(5));

        assert!(result.is_ok());

        let events = metrics.snapshot();
        assert!(events.contains(&"ingest_partial"));
        assert!(events.contains(&"lsh_ok"));

        set_pipeline_metrics(None);
    }
}
