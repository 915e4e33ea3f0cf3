//! # spanscope
//!
//! Span-corpus characterization: reproduce the span-difficulty predictors
//! used in span-identification research, so datasets and tasks can be
//! compared before any model is trained.
//!
//! Per label, four properties:
//! - **Frequency**: number of spans carrying the label
//! - **Length**: mean / population stddev / min / max (plus geometric mean)
//!   of span widths in tokens
//! - **Span distinctiveness**: smoothed KL divergence between the label's
//!   interior token distribution and the corpus background
//! - **Boundary distinctiveness**: the same divergence for the tokens at
//!   and immediately around span edges
//!
//! Corpus types live in `spanscope-core` and are re-exported here; any
//! parser that produces them (or the loaders in [`ingest`]) can feed the
//! analyzer.
//!
//! ```
//! use spanscope::{analyze, Corpus, Document, SmoothingConfig};
//!
//! let mut doc = Document::from_words("d0", vec!["The", "cat", "sat", "on", "the", "mat"]);
//! doc.add_span("NP", 0, 2).unwrap();
//! doc.add_span("NP", 4, 6).unwrap();
//! let corpus = Corpus::from_documents(vec![doc]);
//!
//! let report = analyze(&corpus, SmoothingConfig::default());
//! assert_eq!(report.get("NP").unwrap().frequency, 2);
//! ```

#![warn(missing_docs)]

pub mod analyzer;
pub mod distribution;
pub mod ingest;
pub mod metrics;
pub mod report;

// Re-export core types so downstream users need a single dependency
pub use spanscope_core::{normalize_token, Corpus, Document, Error, Result, Span, Token};

pub use analyzer::{analyze, SpanAnalyzer};
pub use distribution::{CorpusDistributions, TokenCountTable};
pub use metrics::{
    kl_divergence, length_stats, LengthStats, LogBase, SmoothingConfig, DEFAULT_EPSILON,
};
pub use report::{LabelReport, MetricReport};
