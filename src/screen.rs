//! Structural plausibility filter for strip-chart traces.
//!
//! A cheap, content-agnostic sanity screen that keeps garbage (portraits,
//! screenshots, unrelated photos) away from the expensive and
//! confidently-wrong-prone classifier. Gates run in order of cost and
//! discriminating power and short-circuit on the first failure:
//!
//! 1. Aspect ratio: traces are canonically wider than tall.
//! 2. Edge density: a drawn trace produces a mid-band density; too sparse
//!    means no trace, too dense means clutter or noise.
//! 3. Near-horizontal segment count: grid rulings and baselines show up as
//!    several long, nearly flat Hough segments.
//!
//! Thresholds are empirically fixed constants carried in [`FilterOptions`];
//! tuning never touches control flow.

use crate::diagnostics::{RejectReason, ScreenReport};
use crate::edges::{detect_edges, CannyOptions};
use crate::image::ImageU8;
use crate::segments::{hough_segments, HoughOptions};
use log::debug;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Thresholds for the structural gates.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterOptions {
    /// Reject images with `width / height` strictly below this.
    pub min_aspect_ratio: f32,
    /// Hysteresis pair for the edge stage.
    pub canny: CannyOptions,
    /// Accepted edge-density band, boundaries inclusive.
    pub min_edge_density: f32,
    pub max_edge_density: f32,
    /// Hough accumulator knobs. `min_line_length` inside is overridden per
    /// image by `min_line_length_frac`.
    pub hough: HoughOptions,
    /// Minimum segment length as a fraction of image width.
    pub min_line_length_frac: f32,
    /// A segment is near-horizontal when its endpoints differ vertically by
    /// less than this many pixels.
    pub horizontal_tol_px: i32,
    /// Minimum count of near-horizontal segments.
    pub min_horizontal_segments: usize,
}

impl Default for FilterOptions {
    fn default() -> Self {
        Self {
            min_aspect_ratio: 1.0,
            canny: CannyOptions::default(),
            min_edge_density: 0.01,
            max_edge_density: 0.3,
            hough: HoughOptions::default(),
            min_line_length_frac: 0.5,
            horizontal_tol_px: 5,
            min_horizontal_segments: 3,
        }
    }
}

/// The structural plausibility filter.
#[derive(Clone, Debug, Default)]
pub struct TraceFilter {
    options: FilterOptions,
}

impl TraceFilter {
    pub fn new(options: FilterOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Boolean verdict; see [`TraceFilter::screen`] for the full report.
    pub fn is_plausible(&self, gray: ImageU8<'_>) -> bool {
        self.screen(gray).accepted()
    }

    /// Run every gate, recording measurements and the first failure.
    pub fn screen(&self, gray: ImageU8<'_>) -> ScreenReport {
        let total_start = Instant::now();
        let w = gray.w;
        let h = gray.h;
        let aspect_ratio = if h > 0 { w as f32 / h as f32 } else { 0.0 };

        let mut report = ScreenReport {
            width: w,
            height: h,
            aspect_ratio,
            edge_density: None,
            edge_pixels: None,
            segments_total: None,
            horizontal_segments: None,
            reject: None,
            edge_ms: 0.0,
            hough_ms: 0.0,
            total_ms: 0.0,
        };

        if w == 0 || h == 0 || aspect_ratio < self.options.min_aspect_ratio {
            debug!("screen: aspect {aspect_ratio:.3} rejects {w}x{h}");
            report.reject = Some(RejectReason::Portrait);
            report.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
            return report;
        }

        let edge_start = Instant::now();
        let edges = detect_edges(gray, &self.options.canny);
        report.edge_ms = edge_start.elapsed().as_secs_f64() * 1000.0;

        let on = edges.on_count();
        let density = edges.density();
        report.edge_pixels = Some(on);
        report.edge_density = Some(density);
        if density < self.options.min_edge_density || density > self.options.max_edge_density {
            debug!("screen: edge density {density:.4} outside accepted band");
            report.reject = Some(RejectReason::EdgeDensity);
            report.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
            return report;
        }

        let hough_options = HoughOptions {
            min_line_length: w as f32 * self.options.min_line_length_frac,
            ..self.options.hough
        };
        let hough_start = Instant::now();
        let segments = hough_segments(&edges, &hough_options);
        report.hough_ms = hough_start.elapsed().as_secs_f64() * 1000.0;

        let horizontal = segments
            .iter()
            .filter(|s| s.is_near_horizontal(self.options.horizontal_tol_px))
            .count();
        report.segments_total = Some(segments.len());
        report.horizontal_segments = Some(horizontal);
        if horizontal < self.options.min_horizontal_segments {
            debug!(
                "screen: {horizontal} near-horizontal segments of {} total, need {}",
                segments.len(),
                self.options.min_horizontal_segments
            );
            report.reject = Some(RejectReason::TooFewHorizontalLines);
        }

        report.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        report
    }
}
