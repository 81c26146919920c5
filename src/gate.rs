//! Confidence gate over classifier score vectors.
//!
//! A high top score alone is not enough: when two classes are nearly tied
//! the classifier is hedging between visually similar waveform
//! abnormalities, and the prediction should not be trusted. The gate
//! therefore checks both an absolute threshold on the top score and a
//! margin over the runner-up.

use crate::classify::ClassScores;
use serde::{Deserialize, Serialize};

/// Gate thresholds.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GateOptions {
    /// Minimum top score.
    pub min_confidence: f32,
    /// Minimum gap between the top score and the runner-up.
    pub min_margin: f32,
}

impl Default for GateOptions {
    fn default() -> Self {
        Self {
            min_confidence: 0.6,
            min_margin: 0.15,
        }
    }
}

/// Outcome of gating one score vector.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(tag = "verdict", rename_all = "snake_case")]
pub enum GateVerdict {
    /// The top prediction clears both thresholds.
    Trusted { index: usize, confidence: f32 },
    /// Low confidence or an indecisive margin.
    Untrusted,
}

/// Applies the threshold-and-margin test to score vectors.
#[derive(Clone, Copy, Debug, Default)]
pub struct ConfidenceGate {
    options: GateOptions,
}

impl ConfidenceGate {
    pub fn new(options: GateOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &GateOptions {
        &self.options
    }

    /// Gate a score vector. Empty vectors are untrusted; a tie for the
    /// maximum yields zero margin and rejects; ambiguity is exactly what
    /// the margin exists to catch.
    pub fn gate(&self, scores: &ClassScores) -> GateVerdict {
        let Some(top) = scores.top_two() else {
            return GateVerdict::Untrusted;
        };
        let margin = top.top - top.second;
        if top.top >= self.options.min_confidence && margin >= self.options.min_margin {
            GateVerdict::Trusted {
                index: top.index,
                confidence: top.top,
            }
        } else {
            GateVerdict::Untrusted
        }
    }
}
