//! Error types for the screening pipeline.
//!
//! Structural implausibility and low classification confidence are normal
//! outcomes expressed through [`crate::Decision`], never errors. The variants
//! here cover the remaining cases: an upload that cannot be decoded and a
//! broken classifier collaborator.

use thiserror::Error;

/// Boxed error produced by a [`crate::Classify`] implementation.
pub type ClassifierError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Errors surfaced by the screening pipeline.
#[derive(Debug, Error)]
pub enum ScreenError {
    /// The upload could not be decoded into a raster image.
    ///
    /// `Pipeline::decide_path` resolves this locally as a structural
    /// rejection; the variant exists for callers that decode via
    /// [`crate::image::Frame::open`] and need to tell "unreadable" apart
    /// from "not trace-like".
    #[error("image load")]
    ImageLoad(#[source] image::ImageError),

    /// The external classifier failed. This is an infrastructure fault, not
    /// a property of the image, and is propagated rather than folded into a
    /// rejection.
    #[error("classifier invocation failed")]
    Classifier(#[source] ClassifierError),

    /// The classifier returned a score vector whose length does not match
    /// the configured label table.
    #[error("score vector length {scores} does not match label table length {labels}")]
    ScoreShape { scores: usize, labels: usize },
}
