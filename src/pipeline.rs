//! Decision fusion: structural screen → classifier → confidence gate.
//!
//! The [`Pipeline`] owns the immutable configuration (filter and gate
//! thresholds, classifier input size, label table) plus the classifier
//! handle, both supplied at construction. Each invocation is a pure
//! function of its inputs: no state persists across calls, no decisions
//! are cached, and a structural rejection short-circuits before the
//! classifier is ever invoked.
//!
//! Typical usage:
//! ```no_run
//! use ecg_screener::{Pipeline, PipelineOptions};
//! use ecg_screener::classify::{ClassScores, ClassifierInput};
//! # use ecg_screener::error::ClassifierError;
//!
//! # fn example() -> Result<(), ecg_screener::ScreenError> {
//! let stub = |_: &ClassifierInput| -> Result<ClassScores, ClassifierError> {
//!     Ok(ClassScores::new(vec![0.9, 0.03, 0.03, 0.04]))
//! };
//! let pipeline = Pipeline::new(PipelineOptions::default(), stub);
//! let decision = pipeline.decide_path(std::path::Path::new("upload.png"))?;
//! println!("{}", decision.summary());
//! # Ok(())
//! # }
//! ```

use crate::classify::{ClassifierInput, Classify, LabelTable};
use crate::diagnostics::DecisionReport;
use crate::error::ScreenError;
use crate::gate::{ConfidenceGate, GateOptions, GateVerdict};
use crate::image::Frame;
use crate::screen::{FilterOptions, TraceFilter};
use log::{debug, warn};
use serde::Serialize;
use std::path::Path;
use std::time::Instant;

/// Final outcome of one screening.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum Decision {
    /// The image cannot structurally be a strip-chart trace.
    StructuralReject,
    /// Plausible structure, but the classifier's prediction is not
    /// trustworthy.
    ConfidenceReject,
    /// A trusted diagnostic category.
    Classified { label: String, confidence: f32 },
}

impl Decision {
    /// The user-facing presentation strings. Mapping only, no logic.
    pub fn summary(&self) -> String {
        match self {
            Decision::StructuralReject => {
                "image is not a recognizable structural trace".to_string()
            }
            Decision::ConfidenceReject => {
                "recognizable structure but classification confidence is too low".to_string()
            }
            Decision::Classified { label, .. } => label.clone(),
        }
    }
}

/// A decision together with its per-stage diagnostics.
#[derive(Clone, Debug, Serialize)]
pub struct DecisionDetail {
    pub decision: Decision,
    pub report: DecisionReport,
}

/// Immutable pipeline configuration.
#[derive(Clone, Debug)]
pub struct PipelineOptions {
    pub filter: FilterOptions,
    pub gate: GateOptions,
    /// Classifier input edge length in pixels.
    pub input_side: u32,
    pub labels: LabelTable,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            filter: FilterOptions::default(),
            gate: GateOptions::default(),
            input_side: crate::classify::INPUT_SIDE,
            labels: LabelTable::default(),
        }
    }
}

/// The two-stage screening pipeline.
pub struct Pipeline<C> {
    filter: TraceFilter,
    gate: ConfidenceGate,
    input_side: u32,
    labels: LabelTable,
    classifier: C,
}

impl<C: Classify> Pipeline<C> {
    pub fn new(options: PipelineOptions, classifier: C) -> Self {
        Self {
            filter: TraceFilter::new(options.filter),
            gate: ConfidenceGate::new(options.gate),
            input_side: options.input_side,
            labels: options.labels,
            classifier,
        }
    }

    /// Decode and decide. An unreadable file is implausible by definition
    /// and resolves to [`Decision::StructuralReject`] rather than an error.
    pub fn decide_path(&self, path: &Path) -> Result<Decision, ScreenError> {
        match Frame::open(path) {
            Ok(frame) => self.decide(&frame),
            Err(err) => {
                warn!("unreadable upload {}: {err}", path.display());
                Ok(Decision::StructuralReject)
            }
        }
    }

    /// Decide on an already-decoded frame.
    pub fn decide(&self, frame: &Frame) -> Result<Decision, ScreenError> {
        self.decide_detailed(frame).map(|detail| detail.decision)
    }

    /// Decide and keep the full per-stage report.
    pub fn decide_detailed(&self, frame: &Frame) -> Result<DecisionDetail, ScreenError> {
        let start = Instant::now();
        let screen = self.filter.screen(frame.gray());

        let mut report = DecisionReport {
            screen,
            mean_intensity: None,
            scores: None,
            top_confidence: None,
            margin: None,
            total_latency_ms: 0.0,
        };

        if !report.screen.accepted() {
            report.total_latency_ms = start.elapsed().as_secs_f64() * 1000.0;
            return Ok(DecisionDetail {
                decision: Decision::StructuralReject,
                report,
            });
        }

        let input = ClassifierInput::prepare(frame, self.input_side);
        let mean_intensity = input.mean_intensity();
        debug!("classifier input mean intensity {mean_intensity:.4}");
        report.mean_intensity = Some(mean_intensity);

        let scores = self
            .classifier
            .classify(&input)
            .map_err(ScreenError::Classifier)?;
        if scores.len() != self.labels.len() {
            return Err(ScreenError::ScoreShape {
                scores: scores.len(),
                labels: self.labels.len(),
            });
        }

        let verdict = self.gate.gate(&scores);
        if let Some(top) = scores.top_two() {
            report.top_confidence = Some(top.top);
            report.margin = Some(top.top - top.second);
        }
        report.scores = Some(scores.as_slice().to_vec());

        let decision = match verdict {
            GateVerdict::Untrusted => Decision::ConfidenceReject,
            GateVerdict::Trusted { index, confidence } => {
                // Lengths matched above, so the index always resolves.
                let label = self
                    .labels
                    .label(index)
                    .unwrap_or_default()
                    .to_string();
                Decision::Classified { label, confidence }
            }
        };

        debug!("decision: {decision:?}");
        report.total_latency_ms = start.elapsed().as_secs_f64() * 1000.0;
        Ok(DecisionDetail { decision, report })
    }
}
