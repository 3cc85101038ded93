use docsim::{DocsimConfig, LshConfig, PipelineReport, RawDocument, process_documents};

fn corpus() -> Vec<RawDocument> {
    vec![
        RawDocument::inline("D1", "The quick brown fox jumps over the lazy dog"),
        RawDocument::inline("D2", "The quick brown fox jumped over the lazy dog"),
        RawDocument::inline("D3", "Pack my box with five dozen liquor jugs"),
        RawDocument::inline("D4", "Pack my box with five dozen liquor jugs."),
        RawDocument::inline("D5", "xy"),
        RawDocument::inline("D6", "Sphinx of black quartz, judge my vow"),
    ]
}

fn run(lsh: LshConfig) -> PipelineReport {
    let cfg = DocsimConfig {
        lsh,
        ..Default::default()
    };
    process_documents(corpus(), &cfg).expect("pipeline run")
}

#[test]
fn same_seed_gives_identical_reports() {
    let first = run(LshConfig::default().with_seed(0xF00D));
    let second = run(LshConfig::default().with_seed(0xF00D));

    assert_eq!(first, second);
}

#[test]
fn parallel_matches_sequential() {
    for seed in [1u64, 2, 3, 1_732_584_193] {
        let sequential = run(LshConfig::default().with_seed(seed));
        let parallel = run(LshConfig::default().with_seed(seed).with_parallel(true));

        assert_eq!(sequential.documents, parallel.documents);
        assert_eq!(sequential.candidates, parallel.candidates);
        assert_eq!(sequential.failures, parallel.failures);
        assert_eq!(sequential.meta.seed, parallel.meta.seed);
    }
}

#[test]
fn unseeded_run_can_be_replayed_from_meta() {
    let unseeded = run(LshConfig::default());
    let replay = run(LshConfig::default().with_seed(unseeded.meta.seed));

    assert_eq!(unseeded.documents, replay.documents);
    assert_eq!(unseeded.candidates, replay.candidates);
}

#[test]
fn failed_documents_do_not_shift_signatures() {
    // a document rejected at ingest never reaches the vocabulary
    let cfg = DocsimConfig {
        lsh: LshConfig::default().with_seed(21),
        ..Default::default()
    };
    let mut with_missing = corpus();
    with_missing.insert(
        0,
        RawDocument {
            text: None,
            ..RawDocument::inline("missing", "")
        },
    );

    let base = process_documents(corpus(), &cfg).unwrap();
    let other = process_documents(with_missing, &cfg).unwrap();

    assert_eq!(base.documents, other.documents);
    assert_eq!(base.meta.vocabulary_size, other.meta.vocabulary_size);
}

#[test]
fn pair_comparison_is_symmetric() {
    let report = run(LshConfig::default().with_seed(8));
    for (i, a) in report.documents.iter().enumerate() {
        for b in &report.documents[i + 1..] {
            let forward = lsh::candidates::compare_pair(a, b);
            let backward = lsh::candidates::compare_pair(b, a);
            assert_eq!(forward.is_some(), backward.is_some());
            if let (Some(f), Some(r)) = (forward, backward) {
                assert_eq!(f.band_index, r.band_index);
                assert_eq!(f.band, r.band);
            }
            assert_eq!(
                report.is_candidate(&a.id, &b.id),
                report.is_candidate(&b.id, &a.id)
            );
        }
    }
}
