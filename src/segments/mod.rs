//! Line-segment extraction over a binary edge map.
//!
//! A deterministic variant of the progressive probabilistic Hough transform
//! (the `HoughLinesP` family): edge pixels vote into a (ρ, θ) accumulator
//! one by one; as soon as a cell reaches the vote threshold the supporting
//! line is walked pixel-by-pixel, gap-tolerantly, and the covered run is
//! consumed. Unlike the classical formulation, seeds are taken in scan order
//! rather than at random, so repeated screenings of the same image are
//! byte-identical.
//!
//! The structural filter only needs segment endpoints; classification into
//! near-horizontal segments lives on [`Segment`] itself.

mod hough;
mod types;

pub use hough::hough_segments;
pub use types::{HoughOptions, Segment};
