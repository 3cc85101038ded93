use ingest::{ingest_all, IngestConfig, RawDocument};

fn main() {
    let cfg = IngestConfig {
        max_text_bytes: Some(32),
        normalize_whitespace: true,
        ..Default::default()
    };

    let raw = vec![
        RawDocument::inline("D1.txt", "  Hello   world\nThis  is\ta demo  "),
        RawDocument::inline("D1.txt", "duplicate identifier"),
        RawDocument::inline("D2.txt", "this text is far too long for the configured limit"),
        RawDocument {
            text: None,
            ..RawDocument::inline("D3.txt", "")
        },
    ];

    let batch = ingest_all(raw, &cfg);
    for doc in &batch.documents {
        println!("accepted {}: {:?}", doc.id, doc.text);
    }
    for failure in &batch.failures {
        eprintln!("rejected {}: {}", failure.id, failure.error);
    }
}
