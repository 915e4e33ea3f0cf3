//! Minimal span analysis over an in-code corpus.
//!
//! ```bash
//! cargo run --example span_profile
//! ```

use spanscope::{Corpus, Document, SmoothingConfig, SpanAnalyzer};

fn main() {
    let mut doc = Document::from_words(
        "d0",
        vec!["The", "cat", "sat", "on", "the", "mat", "."],
    );
    doc.add_span("NP", 0, 2).unwrap();
    doc.add_span("NP", 4, 6).unwrap();
    doc.add_span("PP", 3, 6).unwrap();
    let corpus = Corpus::from_documents(vec![doc]);

    let analyzer = SpanAnalyzer::with_config(&corpus, SmoothingConfig::default());
    println!("labels: {:?}", analyzer.labels());
    for label in analyzer.labels() {
        println!(
            "{label}: frequency={} length={:?} span_distinctiveness={:?} boundary_distinctiveness={:?}",
            analyzer.frequency(&label),
            analyzer.length(&label).map(|l| l.mean),
            analyzer.span_distinctiveness(&label),
            analyzer.boundary_distinctiveness(&label),
        );
    }

    let report = analyzer.report();
    println!("{}", serde_json::to_string_pretty(&report).unwrap());
}
