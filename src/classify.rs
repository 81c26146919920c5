//! Classifier-facing contract: input preparation, score vectors, labels.
//!
//! The classifier itself is an external collaborator, a pre-trained network
//! behind the [`Classify`] trait. This module pins down what crosses the
//! boundary: a fixed-size normalized input and a per-class score vector
//! whose indices are externally defined.

pub use crate::error::ClassifierError;

use crate::image::Frame;
use image::imageops::{self, FilterType};
use serde::{Deserialize, Serialize};

/// Classifier input edge length in pixels.
pub const INPUT_SIDE: u32 = 224;

/// An external diagnostic classifier.
///
/// Implementations must be pure with respect to the pipeline: fresh scores
/// per call, no retained references to the input.
pub trait Classify {
    fn classify(&self, input: &ClassifierInput) -> Result<ClassScores, ClassifierError>;
}

impl<F> Classify for F
where
    F: Fn(&ClassifierInput) -> Result<ClassScores, ClassifierError>,
{
    fn classify(&self, input: &ClassifierInput) -> Result<ClassScores, ClassifierError> {
        self(input)
    }
}

/// Fixed-size, channel-normalized raster fed to the classifier.
///
/// `side × side`, three channels, HWC layout, samples in [0, 1].
#[derive(Clone, Debug)]
pub struct ClassifierInput {
    side: u32,
    data: Vec<f32>,
}

impl ClassifierInput {
    /// Resize a decoded frame's RGB buffer and normalize samples to [0, 1].
    pub fn prepare(frame: &Frame, side: u32) -> Self {
        let resized = imageops::resize(frame.rgb(), side, side, FilterType::Triangle);
        let data = resized.into_raw().iter().map(|&v| v as f32 / 255.0).collect();
        Self { side, data }
    }

    pub fn side(&self) -> u32 {
        self.side
    }

    /// Samples in HWC order, `side * side * 3` values.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    /// Mean over all channels; the pipeline's brightness telemetry.
    pub fn mean_intensity(&self) -> f32 {
        if self.data.is_empty() {
            return 0.0;
        }
        self.data.iter().sum::<f32>() / self.data.len() as f32
    }
}

/// Top-two extraction from a score vector.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopTwo {
    /// Index of the (first) maximum.
    pub index: usize,
    pub top: f32,
    /// Second-largest value; equals `top` when the maximum is tied, and
    /// `0.0` for a single-class vector.
    pub second: f32,
}

/// Per-class scores from one inference call, indices fixed externally.
///
/// Values are not validated to sum to 1; only the top-two ordering is used.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ClassScores(Vec<f32>);

impl ClassScores {
    pub fn new(scores: Vec<f32>) -> Self {
        Self(scores)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_slice(&self) -> &[f32] {
        &self.0
    }

    /// Largest and second-largest scores with the winner's index, or `None`
    /// for an empty vector. The first occurrence wins a tie for the index;
    /// the tied value still shows up as `second`.
    pub fn top_two(&self) -> Option<TopTwo> {
        let mut iter = self.0.iter().enumerate();
        let (mut index, &head) = iter.next()?;
        let mut top = head;
        let mut second = 0.0f32;
        for (i, &v) in iter {
            if v > top {
                second = top;
                index = i;
                top = v;
            } else if v > second {
                second = v;
            }
        }
        Some(TopTwo { index, top, second })
    }
}

/// Diagnostic category names, indexed by classifier output position.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LabelTable(Vec<String>);

impl LabelTable {
    pub fn new(labels: Vec<String>) -> Self {
        Self(labels)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn label(&self, index: usize) -> Option<&str> {
        self.0.get(index).map(String::as_str)
    }
}

impl Default for LabelTable {
    /// The externally fixed ECG category indices.
    fn default() -> Self {
        Self(
            [
                "History of MI",
                "Myocardial Infarction",
                "Abnormal heartbeat",
                "Normal heartbeat",
            ]
            .map(String::from)
            .to_vec(),
        )
    }
}
