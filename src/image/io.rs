//! Decode and serialization helpers.
//!
//! - [`Frame::open`]: read an upload from disk into grayscale + RGB buffers.
//! - [`write_json_file`]: pretty-print a serializable report to disk.

use super::{GrayImageU8, ImageU8};
use crate::error::ScreenError;
use image::{DynamicImage, RgbImage};
use serde::Serialize;
use std::fs;
use std::io;
use std::path::Path;

/// One decoded upload.
///
/// Holds the grayscale buffer the structural filter runs on and the RGB
/// original from which a classifier input is prepared only after the filter
/// accepts. Both views come from a single decode.
#[derive(Clone, Debug)]
pub struct Frame {
    gray: GrayImageU8,
    rgb: RgbImage,
}

impl Frame {
    /// Decode an image file. Decode failures surface as
    /// [`ScreenError::ImageLoad`]; the pipeline's path entry point maps them
    /// to a structural rejection per the unreadable-input rule.
    pub fn open(path: &Path) -> Result<Self, ScreenError> {
        let img = image::open(path).map_err(ScreenError::ImageLoad)?;
        Ok(Self::from_dynamic(img))
    }

    /// Build a frame from an already-decoded image.
    pub fn from_dynamic(img: DynamicImage) -> Self {
        let luma = img.to_luma8();
        let width = luma.width() as usize;
        let height = luma.height() as usize;
        let gray = GrayImageU8::new(width, height, luma.into_raw());
        let rgb = img.into_rgb8();
        Self { gray, rgb }
    }

    /// Grayscale view for the structural filter.
    pub fn gray(&self) -> ImageU8<'_> {
        self.gray.as_view()
    }

    /// RGB original for classifier input preparation.
    pub fn rgb(&self) -> &RgbImage {
        &self.rgb
    }

    pub fn width(&self) -> usize {
        self.gray.width()
    }

    pub fn height(&self) -> usize {
        self.gray.height()
    }
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> io::Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let json = serde_json::to_string_pretty(value).map_err(io::Error::other)?;
    fs::write(path, json)
}
