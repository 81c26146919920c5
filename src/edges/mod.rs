//! Edge processing: image gradients and Canny-style edge maps.
//!
//! Building blocks for the structural plausibility filter:
//!
//! - Gradient computation (Sobel/Scharr) returning `gx`, `gy`, and magnitude.
//! - Non-maximum suppression along the gradient direction followed by
//!   double-threshold hysteresis, producing a binary [`EdgeMap`].
//!
//! Design goals
//! - Favor clarity and cache-friendly row access over micro-optimizations.
//! - Handle borders by clamping indices (replicate).
//! - Thresholds live on the conventional 8-bit gradient scale so the
//!   reference values (low = 50, high = 150) read the way they do in any
//!   Canny implementation.

pub mod canny;
pub mod grad;

pub use canny::{detect_edges, CannyOptions, EdgeMap};
pub use grad::{image_gradients, Grad, GradientKernel};
