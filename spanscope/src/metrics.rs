//! Metric engine: pure functions over count tables and span tallies.
//!
//! Two families of metrics:
//! - **Length statistics** over the observed span widths of a label
//! - **Distributional distinctiveness**: a smoothed Kullback-Leibler
//!   divergence between a label-specific token distribution and the
//!   corpus background distribution
//!
//! The smoothing constant and logarithm base are explicit configuration
//! rather than baked-in defaults, so results can be calibrated against
//! published figures that do not document their constants.

use serde::{Deserialize, Serialize};

use crate::distribution::TokenCountTable;

/// Default additive smoothing constant.
pub const DEFAULT_EPSILON: f64 = 1e-3;

/// Logarithm base used by the divergence computation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LogBase {
    /// Natural logarithm; divergence in nats.
    #[default]
    Natural,
    /// Base-2 logarithm; divergence in bits.
    Base2,
}

impl LogBase {
    /// Logarithm of `x` in this base.
    #[must_use]
    pub fn log(self, x: f64) -> f64 {
        match self {
            LogBase::Natural => x.ln(),
            LogBase::Base2 => x.log2(),
        }
    }
}

/// Smoothing configuration for the distinctiveness metrics.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SmoothingConfig {
    /// Additive smoothing constant applied to every count before
    /// normalizing, avoiding zero probabilities and `log(0)`.
    pub epsilon: f64,
    /// Logarithm base for the divergence.
    pub log_base: LogBase,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_EPSILON,
            log_base: LogBase::Natural,
        }
    }
}

impl SmoothingConfig {
    /// Config with a custom smoothing constant and the natural log.
    #[must_use]
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self {
            epsilon,
            ..Self::default()
        }
    }
}

/// Summary statistics over the span lengths of one label.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LengthStats {
    /// Arithmetic mean length in tokens.
    pub mean: f64,
    /// Population standard deviation (0 for a single span).
    pub stddev: f64,
    /// Shortest observed span.
    pub min: usize,
    /// Longest observed span.
    pub max: usize,
    /// Geometric mean length in tokens.
    pub geometric_mean: f64,
}

/// Compute length statistics for a list of span widths.
///
/// Returns `None` for an empty list; a single length yields a standard
/// deviation of exactly 0.
#[must_use]
pub fn length_stats(lengths: &[usize]) -> Option<LengthStats> {
    if lengths.is_empty() {
        return None;
    }
    let n = lengths.len() as f64;
    let mean = lengths.iter().map(|&l| l as f64).sum::<f64>() / n;
    let variance = lengths
        .iter()
        .map(|&l| (l as f64 - mean).powi(2))
        .sum::<f64>()
        / n;
    let log_mean = lengths.iter().map(|&l| (l as f64).ln()).sum::<f64>() / n;

    Some(LengthStats {
        mean,
        stddev: variance.sqrt(),
        min: lengths.iter().copied().min()?,
        max: lengths.iter().copied().max()?,
        geometric_mean: log_mean.exp(),
    })
}

/// Smoothed Kullback-Leibler divergence `D(P || Q)` between two count
/// tables.
///
/// Both distributions are re-normalized over the union vocabulary `V` with
/// additive smoothing:
///
/// ```text
/// P(t) = (count_p(t) + eps) / (total_p + eps * |V|)
/// ```
///
/// and likewise for `Q`. The result is non-negative and approaches the
/// unsmoothed divergence as `eps` tends to 0. Returns `None` when either
/// table is empty (the divergence is undefined without observations).
#[must_use]
pub fn kl_divergence(
    p: &TokenCountTable,
    q: &TokenCountTable,
    config: &SmoothingConfig,
) -> Option<f64> {
    if p.is_empty() || q.is_empty() {
        return None;
    }

    // Union vocabulary, iterated in sorted order so repeated runs sum the
    // same floating-point terms in the same order.
    let mut vocab: Vec<&str> = p.iter().map(|(t, _)| t).collect();
    vocab.extend(q.iter().map(|(t, _)| t));
    vocab.sort_unstable();
    vocab.dedup();

    let eps = config.epsilon;
    let p_denom = p.total() as f64 + eps * vocab.len() as f64;
    let q_denom = q.total() as f64 + eps * vocab.len() as f64;

    let mut divergence = 0.0;
    for token in vocab {
        let p_t = (p.count(token) as f64 + eps) / p_denom;
        let q_t = (q.count(token) as f64 + eps) / q_denom;
        divergence += p_t * config.log_base.log(p_t / q_t);
    }
    Some(divergence)
}
