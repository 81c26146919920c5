#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod classify;
pub mod diagnostics;
pub mod error;
pub mod gate;
pub mod image;
pub mod pipeline;
pub mod screen;

// “Expert” modules – still public, but considered unstable internals.
pub mod config;
pub mod edges;
pub mod segments;

// --- High-level re-exports -------------------------------------------------

// Main entry points: pipeline + decision.
pub use crate::pipeline::{Decision, DecisionDetail, Pipeline, PipelineOptions};

// Structural screen and its configuration.
pub use crate::screen::{FilterOptions, TraceFilter};

// Confidence gate over classifier scores.
pub use crate::gate::{ConfidenceGate, GateOptions, GateVerdict};

// Classifier-facing contract.
pub use crate::classify::{ClassScores, Classify, ClassifierInput, LabelTable};

// Structured reports returned alongside verdicts.
pub use crate::diagnostics::{DecisionReport, RejectReason, ScreenReport};

// The one propagated error.
pub use crate::error::ScreenError;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use ecg_screener::prelude::*;
///
/// # fn main() {
/// let filter = TraceFilter::new(FilterOptions::default());
/// let gray = vec![255u8; 300 * 100];
/// let img = ImageU8 { w: 300, h: 100, stride: 300, data: &gray };
/// println!("plausible={}", filter.is_plausible(img));
/// # }
/// ```
pub mod prelude {
    pub use crate::classify::Classify;
    pub use crate::image::{Frame, ImageU8};
    pub use crate::{Decision, FilterOptions, Pipeline, PipelineOptions, TraceFilter};
}
