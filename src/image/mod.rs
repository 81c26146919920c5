//! Raster buffers and decode helpers used by the screening pipeline.
//!
//! The filter works on single-channel data: [`ImageU8`] is a borrowed 8-bit
//! view with stride, [`GrayImageU8`] its owned counterpart, and [`ImageF32`]
//! the float buffer the gradient stage runs on. [`Frame`] bundles one decoded
//! upload: the grayscale buffer for the structural filter plus the RGB
//! original from which the classifier input is prepared on demand.

pub mod buffer;
pub mod io;

pub use self::buffer::{GrayImageU8, ImageF32, ImageU8};
pub use self::io::{write_json_file, Frame};
