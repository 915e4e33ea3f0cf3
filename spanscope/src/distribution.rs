//! Token distribution accumulation over a corpus.
//!
//! A single pass over the documents produces, per label:
//! - an **interior** table counting every token inside spans of that label
//! - a **boundary** table counting a fixed four-position window per span:
//!   the first token, the last token, the token immediately before the span
//!   (if any) and the token immediately after it (if any)
//!
//! plus one corpus-wide **background** table counting every token of every
//! document exactly once, independent of span membership.
//!
//! Counting is over normalized token forms. Overlapping spans of different
//! labels each contribute their own counts; a token may be counted under
//! several labels. With the `parallel` feature, documents are accumulated
//! into partial tables and merged by summation, which yields the same
//! result as the serial pass.

use std::collections::HashMap;

use spanscope_core::{Corpus, Document};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

// =============================================================================
// Count tables
// =============================================================================

/// A mapping from normalized token to occurrence count.
///
/// Write-once-then-read: built by [`CorpusDistributions::build`], never
/// mutated afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenCountTable {
    counts: HashMap<String, u64>,
    total: u64,
}

impl TokenCountTable {
    /// Create a new empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one occurrence of a normalized token.
    pub fn increment(&mut self, token: &str) {
        *self.counts.entry(token.to_string()).or_insert(0) += 1;
        self.total += 1;
    }

    /// Count for a token (0 if unseen).
    #[must_use]
    pub fn count(&self, token: &str) -> u64 {
        self.counts.get(token).copied().unwrap_or(0)
    }

    /// Sum of all counts.
    #[must_use]
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Number of distinct tokens.
    #[must_use]
    pub fn distinct(&self) -> usize {
        self.counts.len()
    }

    /// True if no token has been counted.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Iterate over (token, count) pairs in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, &v)| (k.as_str(), v))
    }

    /// Fold another table into this one by elementwise summation.
    pub fn merge(&mut self, other: &TokenCountTable) {
        for (token, count) in &other.counts {
            *self.counts.entry(token.clone()).or_insert(0) += count;
        }
        self.total += other.total;
    }
}

// =============================================================================
// Corpus distributions
// =============================================================================

/// All count tables and span tallies produced by one pass over a corpus.
#[derive(Debug, Clone, Default)]
pub struct CorpusDistributions {
    interior: HashMap<String, TokenCountTable>,
    boundary: HashMap<String, TokenCountTable>,
    background: TokenCountTable,
    span_counts: HashMap<String, usize>,
    span_lengths: HashMap<String, Vec<usize>>,
    total_spans: usize,
}

impl CorpusDistributions {
    /// Accumulate every document of the corpus.
    ///
    /// With the `parallel` feature enabled, documents are processed in
    /// parallel and partial tables merged by summation; counts are
    /// commutative, so the result is identical to the serial pass.
    #[must_use]
    pub fn build(corpus: &Corpus) -> Self {
        #[cfg(feature = "parallel")]
        let dist = corpus
            .documents()
            .par_iter()
            .map(|doc| {
                let mut partial = Self::default();
                partial.accumulate(doc);
                partial
            })
            .reduce(Self::default, Self::merged);

        #[cfg(not(feature = "parallel"))]
        let dist = {
            let mut dist = Self::default();
            for doc in corpus.documents() {
                dist.accumulate(doc);
            }
            dist
        };

        log::debug!(
            "built distributions: {} labels, {} spans, {} background tokens ({} distinct)",
            dist.span_counts.len(),
            dist.total_spans,
            dist.background.total(),
            dist.background.distinct(),
        );
        dist
    }

    /// Fold one document into the tables.
    fn accumulate(&mut self, doc: &Document) {
        let tokens = doc.tokens();

        for token in tokens {
            self.background.increment(token.norm());
        }

        for span in doc.spans() {
            let label = span.label();
            *self.span_counts.entry(label.to_string()).or_insert(0) += 1;
            self.span_lengths
                .entry(label.to_string())
                .or_default()
                .push(span.len());
            self.total_spans += 1;

            let interior = self.interior.entry(label.to_string()).or_default();
            for token in &tokens[span.start()..span.end()] {
                interior.increment(token.norm());
            }

            // Boundary window: first, last, preceding, following. A
            // single-token span contributes its token under both the
            // "first" and "last" roles.
            let boundary = self.boundary.entry(label.to_string()).or_default();
            boundary.increment(tokens[span.start()].norm());
            boundary.increment(tokens[span.end() - 1].norm());
            if span.start() > 0 {
                boundary.increment(tokens[span.start() - 1].norm());
            }
            if span.end() < tokens.len() {
                boundary.increment(tokens[span.end()].norm());
            }
        }
    }

    /// Merge two partial accumulations by elementwise summation.
    ///
    /// This is what the `parallel` reduction uses; it is public so callers
    /// running their own document partitioning can combine partial results
    /// the same way.
    #[must_use]
    pub fn merged(mut self, other: Self) -> Self {
        for (label, table) in &other.interior {
            self.interior.entry(label.clone()).or_default().merge(table);
        }
        for (label, table) in &other.boundary {
            self.boundary.entry(label.clone()).or_default().merge(table);
        }
        self.background.merge(&other.background);
        for (label, count) in &other.span_counts {
            *self.span_counts.entry(label.clone()).or_insert(0) += count;
        }
        for (label, lengths) in other.span_lengths {
            self.span_lengths.entry(label).or_default().extend(lengths);
        }
        self.total_spans += other.total_spans;
        self
    }

    /// All labels observed in the corpus, sorted.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        let mut labels: Vec<String> = self.span_counts.keys().cloned().collect();
        labels.sort();
        labels
    }

    /// Interior token counts for a label.
    #[must_use]
    pub fn interior(&self, label: &str) -> Option<&TokenCountTable> {
        self.interior.get(label)
    }

    /// Boundary token counts for a label.
    #[must_use]
    pub fn boundary(&self, label: &str) -> Option<&TokenCountTable> {
        self.boundary.get(label)
    }

    /// Corpus-wide background token counts.
    #[must_use]
    pub fn background(&self) -> &TokenCountTable {
        &self.background
    }

    /// Number of spans carrying a label (0 if never seen).
    #[must_use]
    pub fn span_count(&self, label: &str) -> usize {
        self.span_counts.get(label).copied().unwrap_or(0)
    }

    /// Span lengths observed for a label, in corpus order.
    #[must_use]
    pub fn span_lengths(&self, label: &str) -> Option<&[usize]> {
        self.span_lengths.get(label).map(Vec::as_slice)
    }

    /// Total number of spans across all labels.
    #[must_use]
    pub fn total_spans(&self) -> usize {
        self.total_spans
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cat_corpus() -> Corpus {
        let mut doc =
            Document::from_words("d0", vec!["The", "cat", "sat", "on", "the", "mat"]);
        doc.add_span("NP", 0, 2).unwrap();
        doc.add_span("NP", 4, 6).unwrap();
        Corpus::from_documents(vec![doc])
    }

    #[test]
    fn test_background_counts_every_token_once() {
        let dist = CorpusDistributions::build(&cat_corpus());
        let bg = dist.background();
        assert_eq!(bg.total(), 6);
        // "The" and "the" normalize together
        assert_eq!(bg.count("the"), 2);
        assert_eq!(bg.count("cat"), 1);
        assert_eq!(bg.count("mat"), 1);
        assert_eq!(bg.distinct(), 5);
    }

    #[test]
    fn test_interior_counts() {
        let dist = CorpusDistributions::build(&cat_corpus());
        let np = dist.interior("NP").unwrap();
        assert_eq!(np.count("the"), 2);
        assert_eq!(np.count("cat"), 1);
        assert_eq!(np.count("mat"), 1);
        assert_eq!(np.count("sat"), 0);
        assert_eq!(np.total(), 4);
    }

    #[test]
    fn test_boundary_window_positions() {
        let dist = CorpusDistributions::build(&cat_corpus());
        let np = dist.boundary("NP").unwrap();
        // Span [0,2): first="the", last="cat", no preceding, following="sat"
        // Span [4,6): first="the", last="mat", preceding="on", no following
        assert_eq!(np.count("the"), 2);
        assert_eq!(np.count("cat"), 1);
        assert_eq!(np.count("sat"), 1);
        assert_eq!(np.count("on"), 1);
        assert_eq!(np.count("mat"), 1);
        assert_eq!(np.total(), 6);
    }

    #[test]
    fn test_single_token_span_counts_twice_in_boundary() {
        let mut doc = Document::from_words("d0", vec!["a", "b", "c"]);
        doc.add_span("X", 1, 2).unwrap();
        let dist = CorpusDistributions::build(&Corpus::from_documents(vec![doc]));
        let x = dist.boundary("X").unwrap();
        // "b" is both first and last token of the span
        assert_eq!(x.count("b"), 2);
        assert_eq!(x.count("a"), 1);
        assert_eq!(x.count("c"), 1);
    }

    #[test]
    fn test_overlapping_labels_count_independently() {
        let mut doc = Document::from_words("d0", vec!["a", "b", "c", "d"]);
        doc.add_span("X", 0, 3).unwrap();
        doc.add_span("Y", 1, 4).unwrap();
        let dist = CorpusDistributions::build(&Corpus::from_documents(vec![doc]));
        // "b" and "c" sit inside both spans and are counted under both labels
        assert_eq!(dist.interior("X").unwrap().count("b"), 1);
        assert_eq!(dist.interior("Y").unwrap().count("b"), 1);
        assert_eq!(dist.total_spans(), 2);
        assert_eq!(dist.span_count("X"), 1);
        assert_eq!(dist.span_count("Y"), 1);
    }

    #[test]
    fn test_span_lengths_collected_per_label() {
        let mut doc = Document::from_words("d0", vec!["a", "b", "c", "d", "e"]);
        doc.add_span("X", 0, 2).unwrap();
        doc.add_span("X", 1, 5).unwrap();
        let dist = CorpusDistributions::build(&Corpus::from_documents(vec![doc]));
        assert_eq!(dist.span_lengths("X").unwrap(), &[2, 4]);
    }

    #[test]
    fn test_empty_corpus_builds_empty_tables() {
        let dist = CorpusDistributions::build(&Corpus::new());
        assert!(dist.labels().is_empty());
        assert!(dist.background().is_empty());
        assert_eq!(dist.total_spans(), 0);
    }

    #[test]
    fn test_merge_matches_sequential_accumulation() {
        let mut doc_a = Document::from_words("a", vec!["x", "y"]);
        doc_a.add_span("L", 0, 2).unwrap();
        let mut doc_b = Document::from_words("b", vec!["y", "z"]);
        doc_b.add_span("L", 0, 1).unwrap();

        let together =
            CorpusDistributions::build(&Corpus::from_documents(vec![doc_a.clone(), doc_b.clone()]));

        let mut left = CorpusDistributions::default();
        left.accumulate(&doc_a);
        let mut right = CorpusDistributions::default();
        right.accumulate(&doc_b);
        let merged = left.merged(right);

        assert_eq!(merged.background(), together.background());
        assert_eq!(merged.interior("L"), together.interior("L"));
        assert_eq!(merged.boundary("L"), together.boundary("L"));
        assert_eq!(merged.total_spans(), together.total_spans());
        assert_eq!(merged.span_lengths("L"), together.span_lengths("L"));
    }
}
