//! Report structures: per-label metric records plus corpus aggregates.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::metrics::LengthStats;

/// All metrics computed for one label.
///
/// A `None` metric means the label lacked the data for that computation;
/// one label's gap never affects another label's results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LabelReport {
    /// Number of spans carrying this label.
    pub frequency: usize,
    /// Span length statistics.
    pub length: Option<LengthStats>,
    /// KL divergence of the label's interior tokens against the background.
    pub span_distinctiveness: Option<f64>,
    /// KL divergence of the label's boundary tokens against the background.
    pub boundary_distinctiveness: Option<f64>,
}

/// The full analysis output: one record per observed label plus the
/// corpus-level span total.
///
/// Labels are kept in a sorted map so iteration (and serialized output) is
/// deterministic across runs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricReport {
    /// Per-label metric records, sorted by label.
    pub labels: BTreeMap<String, LabelReport>,
    /// Total number of spans in the corpus (each span counted once).
    pub total_spans: usize,
}

impl MetricReport {
    /// Record for a label, if it occurred in the corpus.
    #[must_use]
    pub fn get(&self, label: &str) -> Option<&LabelReport> {
        self.labels.get(label)
    }

    /// True if no label was observed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_with_sorted_labels() {
        let mut report = MetricReport::default();
        report.labels.insert(
            "ORG".to_string(),
            LabelReport {
                frequency: 1,
                length: None,
                span_distinctiveness: None,
                boundary_distinctiveness: None,
            },
        );
        report.labels.insert(
            "LOC".to_string(),
            LabelReport {
                frequency: 2,
                length: None,
                span_distinctiveness: None,
                boundary_distinctiveness: None,
            },
        );
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.find("LOC").unwrap() < json.find("ORG").unwrap());
    }

    #[test]
    fn test_report_roundtrip() {
        let mut report = MetricReport {
            total_spans: 3,
            ..MetricReport::default()
        };
        report.labels.insert(
            "X".to_string(),
            LabelReport {
                frequency: 3,
                length: Some(crate::metrics::length_stats(&[1, 2, 3]).unwrap()),
                span_distinctiveness: Some(0.25),
                boundary_distinctiveness: None,
            },
        );
        let json = serde_json::to_string(&report).unwrap();
        let back: MetricReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back, report);
    }
}
