//! Span analysis entry point.
//!
//! [`SpanAnalyzer`] runs the distribution pass once over a corpus and
//! answers all four span-difficulty questions from it: how often each label
//! occurs, how long its spans are, and how lexically distinct its interior
//! and boundary vocabularies are from the corpus at large. [`analyze`] is
//! the one-call wrapper that returns the assembled [`MetricReport`].

use spanscope_core::Corpus;

use crate::distribution::CorpusDistributions;
use crate::metrics::{kl_divergence, length_stats, LengthStats, SmoothingConfig};
use crate::report::{LabelReport, MetricReport};

/// One-shot span analysis over an immutable corpus.
///
/// Construction performs the single accumulation pass; every metric
/// afterwards is a pure read of the built tables, so querying is cheap and
/// repeated calls return identical values.
#[derive(Debug, Clone)]
pub struct SpanAnalyzer {
    distributions: CorpusDistributions,
    config: SmoothingConfig,
}

impl SpanAnalyzer {
    /// Analyze a corpus with the default smoothing configuration.
    #[must_use]
    pub fn new(corpus: &Corpus) -> Self {
        Self::with_config(corpus, SmoothingConfig::default())
    }

    /// Analyze a corpus with an explicit smoothing configuration.
    #[must_use]
    pub fn with_config(corpus: &Corpus, config: SmoothingConfig) -> Self {
        Self {
            distributions: CorpusDistributions::build(corpus),
            config,
        }
    }

    /// All labels observed in the corpus, sorted.
    #[must_use]
    pub fn labels(&self) -> Vec<String> {
        self.distributions.labels()
    }

    /// Number of spans carrying `label` (0 if never seen).
    ///
    /// Frequency tends to correlate positively with model performance,
    /// though transfer learning shrinks the data requirement.
    #[must_use]
    pub fn frequency(&self, label: &str) -> usize {
        self.distributions.span_count(label)
    }

    /// Length statistics for `label`'s spans, `None` if the label never
    /// occurred.
    ///
    /// Models with strict Markov assumptions (CRFs) degrade on long spans;
    /// LSTMs and Transformers tolerate them better.
    #[must_use]
    pub fn length(&self, label: &str) -> Option<LengthStats> {
        self.distributions
            .span_lengths(label)
            .and_then(length_stats)
    }

    /// KL divergence of `label`'s interior token distribution against the
    /// corpus background, `None` when either side has no observations.
    ///
    /// High values mean different words are used inside the spans than in
    /// the rest of the text, so models can lean on local features; low
    /// values call for sequence context.
    #[must_use]
    pub fn span_distinctiveness(&self, label: &str) -> Option<f64> {
        let interior = self.distributions.interior(label)?;
        kl_divergence(interior, self.distributions.background(), &self.config)
    }

    /// KL divergence of `label`'s boundary token distribution against the
    /// corpus background, `None` when either side has no observations.
    ///
    /// High values mean span starts and ends are easy to spot; low values
    /// indicate smooth transitions into and out of spans.
    #[must_use]
    pub fn boundary_distinctiveness(&self, label: &str) -> Option<f64> {
        let boundary = self.distributions.boundary(label)?;
        kl_divergence(boundary, self.distributions.background(), &self.config)
    }

    /// Total number of spans across all labels.
    #[must_use]
    pub fn total_spans(&self) -> usize {
        self.distributions.total_spans()
    }

    /// Assemble the full per-label report.
    #[must_use]
    pub fn report(&self) -> MetricReport {
        let mut report = MetricReport {
            total_spans: self.total_spans(),
            ..MetricReport::default()
        };
        for label in self.labels() {
            let record = LabelReport {
                frequency: self.frequency(&label),
                length: self.length(&label),
                span_distinctiveness: self.span_distinctiveness(&label),
                boundary_distinctiveness: self.boundary_distinctiveness(&label),
            };
            report.labels.insert(label, record);
        }
        report
    }
}

/// Analyze a corpus and return the assembled report.
#[must_use]
pub fn analyze(corpus: &Corpus, config: SmoothingConfig) -> MetricReport {
    SpanAnalyzer::with_config(corpus, config).report()
}
