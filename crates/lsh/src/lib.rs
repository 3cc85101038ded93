//! # docsim LSH
//!
//! Near-duplicate detection for small document collections using character
//! shingles, permutation MinHash and LSH banding.
//!
//! ## Contract
//!
//! - Input is an ordered list of `(identifier, text)` pairs already held in
//!   memory. Reading files and extracting text happens upstream.
//! - The run is a pure function of `(documents, config, seed)`. With a fixed
//!   [`LshConfig::seed`] the [`LshReport`] is bit identical across runs and
//!   across `use_parallel` settings.
//!
//! ## Pipeline
//!
//! 1.  **Shingling**: each text becomes the set of its `k`-character windows.
//! 2.  **Vocabulary**: the union of all shingle sets, indexed in first-seen
//!     order. It fixes the dimension `V` for the rest of the run.
//! 3.  **One-hot encoding**: one presence bit per vocabulary entry.
//! 4.  **Permutations**: `num_hashes` uniform shuffles of `1..=V` drawn from a
//!     seeded generator, shared by every document.
//! 5.  **MinHash**: per permutation, the active index with the smallest rank.
//! 6.  **Banding**: the signature is cut into `bands` slices of equal width.
//! 7.  **Candidates**: a pair is reported as soon as one band position holds
//!     identical values in both documents.
//!
//! ## Errors
//!
//! Configuration errors, including a band count that does not divide
//! `num_hashes`, abort the run before any document is touched. A document
//! with no shingles, an empty identifier or a repeated identifier is dropped
//! from comparison and listed in [`LshReport::failures`].
//!
//! ## Example Usage
//!
//! ```
//! use lsh::{run, LshConfig};
//!
//! let docs = vec![
//!     ("a.txt", "the quick brown fox jumps over the lazy dog"),
//!     ("b.txt", "the quick brown fox jumps over the lazy dog!"),
//!     ("c.txt", "ab"),
//! ];
//! let cfg = LshConfig::default().with_seed(42);
//!
//! let report = run(&docs, &cfg).unwrap();
//!
//! assert!(report.is_candidate("a.txt", "b.txt"));
//! assert!(report.failure_for("c.txt").is_some());
//! ```
//!
pub mod banding;
pub mod candidates;
pub mod config;
pub mod minhash;
pub mod onehot;
pub mod permutation;
pub mod report;
pub mod shingles;
pub mod vocabulary;

use std::collections::HashSet;
use std::time::Instant;

use rayon::prelude::*;
use tracing::{debug, info, warn, Level};

pub use crate::banding::{split_into_bands, Band};
pub use crate::candidates::{detect_candidate_pairs, BandedDocument, CandidatePair};
pub use crate::config::{LshConfig, LshError};
pub use crate::minhash::{minhash_signature, MinHashSignature};
pub use crate::onehot::{encode, OneHotVector};
pub use crate::permutation::{Permutation, PermutationHasher};
pub use crate::report::{DocumentFailure, LshMeta, LshReport};
pub use crate::shingles::{shingle, ShingleSet};
pub use crate::vocabulary::Vocabulary;

/// Current LSH algorithm version for this crate.
pub const LSH_VERSION: u16 = 1;

/// Human-readable algorithm identifier.
pub const LSH_ALGORITHM: &str = "charshingle_permminhash_band_v1";

/// Run the full pipeline over `docs`.
///
/// Document order is significant: it fixes vocabulary indices and the order
/// of reported pairs.
pub fn run<I, T>(docs: &[(I, T)], cfg: &LshConfig) -> Result<LshReport, LshError>
where
    I: AsRef<str> + Sync,
    T: AsRef<str> + Sync,
{
    // --- Configuration validation ---
    cfg.validate()?;
    let rows_per_band = cfg.rows_per_band()?;

    let start = Instant::now();
    let span = tracing::span!(
        Level::INFO,
        "lsh.run",
        documents = docs.len(),
        k = cfg.k,
        num_hashes = cfg.num_hashes,
        bands = cfg.bands
    );
    let _guard = span.enter();

    let mut failures = Vec::new();

    // Step 1: Reject unusable identifiers and shingle the rest.
    let mut seen: HashSet<&str> = HashSet::with_capacity(docs.len());
    let mut accepted: Vec<(&str, ShingleSet)> = Vec::with_capacity(docs.len());
    for (id, text) in docs {
        let id = id.as_ref();
        if let Err(err) = check_identifier(id, &seen) {
            warn!(doc_id = %id, error = %err, "lsh_document_rejected");
            failures.push(DocumentFailure::new(id, err));
            continue;
        }
        seen.insert(id);
        accepted.push((id, shingle(text.as_ref(), cfg.k)));
    }

    // Step 2: One vocabulary for the whole run.
    let vocabulary = Vocabulary::build(accepted.iter().map(|(_, set)| set));

    // Step 3: One permutation family for the whole run.
    let seed = cfg.seed.unwrap_or_else(|| fastrand::u64(..));
    let permutations = PermutationHasher::with_seed(seed).generate(vocabulary.len(), cfg.num_hashes);

    // Step 4: Encode, sign and band each document.
    let signed: Vec<Result<BandedDocument, (String, LshError)>> = if cfg.use_parallel {
        accepted
            .par_iter()
            .map(|(id, set)| sign_document(id, set, &vocabulary, &permutations, cfg.bands))
            .collect()
    } else {
        accepted
            .iter()
            .map(|(id, set)| sign_document(id, set, &vocabulary, &permutations, cfg.bands))
            .collect()
    };

    let mut documents = Vec::with_capacity(signed.len());
    for outcome in signed {
        match outcome {
            Ok(doc) => documents.push(doc),
            Err((id, err)) if err.is_document_error() => {
                warn!(doc_id = %id, error = %err, "lsh_document_excluded");
                failures.push(DocumentFailure::new(id, err));
            }
            Err((_, err)) => return Err(err),
        }
    }

    // Step 5: Compare every pair band by band.
    let candidates = detect_candidate_pairs(&documents, cfg.use_parallel);
    for pair in &candidates {
        debug!(
            left = %pair.left,
            right = %pair.right,
            band_index = pair.band_index,
            band = ?pair.band.values(),
            "lsh_candidate_pair"
        );
    }

    info!(
        vocabulary_size = vocabulary.len(),
        signed = documents.len(),
        failed = failures.len(),
        candidates = candidates.len(),
        seed,
        elapsed_micros = start.elapsed().as_micros(),
        "lsh_success"
    );

    Ok(LshReport {
        documents,
        candidates,
        failures,
        meta: LshMeta {
            lsh_version: LSH_VERSION,
            algorithm_name: LSH_ALGORITHM.to_string(),
            k: cfg.k,
            num_hashes: cfg.num_hashes,
            bands: cfg.bands,
            rows_per_band,
            seed,
            use_parallel: cfg.use_parallel,
            config_version: cfg.version,
            vocabulary_size: vocabulary.len(),
        },
    })
}

fn sign_document(
    id: &str,
    set: &ShingleSet,
    vocabulary: &Vocabulary,
    permutations: &[Permutation],
    bands: usize,
) -> Result<BandedDocument, (String, LshError)> {
    let vector = encode(vocabulary, set);
    let signature =
        minhash_signature(&vector, permutations, false).map_err(|err| (id.to_string(), err))?;
    let bands = split_into_bands(&signature, bands).map_err(|err| (id.to_string(), err))?;
    Ok(BandedDocument {
        id: id.to_string(),
        signature,
        bands,
    })
}

fn check_identifier(id: &str, seen: &HashSet<&str>) -> Result<(), LshError> {
    if id.trim().is_empty() {
        return Err(LshError::MalformedInput(
            "document identifier is empty".to_string(),
        ));
    }
    if seen.contains(id) {
        return Err(LshError::MalformedInput(format!(
            "duplicate document identifier {id:?}"
        )));
    }
    Ok(())
}
