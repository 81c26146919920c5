//! Structured reports emitted alongside pipeline verdicts.
//!
//! Every stage records what it measured, so a rejected upload can be
//! explained (and threshold tuning evaluated) without re-running the
//! pipeline. Fields for stages that were never reached stay `None`; the
//! filter short-circuits on the first failing gate.

use serde::Serialize;

/// Which structural gate rejected the image, if any.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// Aspect ratio strictly below the landscape bound: strip-chart traces
    /// are wider than tall.
    Portrait,
    /// Edge density outside the accepted band (too sparse or too cluttered).
    EdgeDensity,
    /// Fewer near-horizontal segments than a gridded trace exhibits.
    TooFewHorizontalLines,
}

/// Per-gate record of one structural screening.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScreenReport {
    pub width: usize,
    pub height: usize,
    pub aspect_ratio: f32,
    /// Fraction of pixels the edge detector kept; `None` when the aspect
    /// gate already rejected.
    pub edge_density: Option<f32>,
    pub edge_pixels: Option<usize>,
    /// Total segments the Hough stage produced.
    pub segments_total: Option<usize>,
    pub horizontal_segments: Option<usize>,
    /// `None` means the image passed every gate.
    pub reject: Option<RejectReason>,
    pub edge_ms: f64,
    pub hough_ms: f64,
    pub total_ms: f64,
}

impl ScreenReport {
    /// Whether the image passed every structural gate.
    pub fn accepted(&self) -> bool {
        self.reject.is_none()
    }
}

/// Full record of one pipeline decision.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionReport {
    pub screen: ScreenReport,
    /// Mean intensity of the normalized classifier input. Telemetry only;
    /// never feeds back into the decision.
    pub mean_intensity: Option<f32>,
    /// Raw score vector as returned by the classifier.
    pub scores: Option<Vec<f32>>,
    pub top_confidence: Option<f32>,
    pub margin: Option<f32>,
    pub total_latency_ms: f64,
}
