//! Canny-style edge detection: direction-aligned NMS plus hysteresis.
//!
//! For each pixel above the low threshold, the gradient magnitude is compared
//! against its two neighbors along the quantized gradient direction; only
//! local maxima survive. Survivors at or above the high threshold seed the
//! edge map; survivors between the thresholds are kept when 8-connected to a
//! seed (hysteresis).
//!
//! Border handling ignores the outermost 1-pixel frame in NMS to avoid
//! out-of-bounds checks in neighbor lookup.

use super::grad::{image_gradients, Grad, GradientKernel};
use crate::image::{ImageF32, ImageU8};
use serde::{Deserialize, Serialize};

/// Hysteresis threshold pair on the 8-bit gradient scale.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct CannyOptions {
    /// Magnitudes below this never become edges.
    pub low_threshold: f32,
    /// Magnitudes at or above this always become edges (if they survive NMS).
    pub high_threshold: f32,
    /// Derivative kernel for the gradient stage.
    pub kernel: GradientKernel,
}

impl Default for CannyOptions {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
            kernel: GradientKernel::Sobel,
        }
    }
}

/// Binary edge grid with the same dimensions as the source image.
///
/// Transient: produced and consumed within a single filter invocation.
#[derive(Clone, Debug)]
pub struct EdgeMap {
    pub w: usize,
    pub h: usize,
    data: Vec<u8>,
}

impl EdgeMap {
    pub fn new(w: usize, h: usize) -> Self {
        Self {
            w,
            h,
            data: vec![0; w * h],
        }
    }

    #[inline]
    pub fn is_on(&self, x: usize, y: usize) -> bool {
        self.data[y * self.w + x] != 0
    }

    #[inline]
    pub fn set_on(&mut self, x: usize, y: usize) {
        self.data[y * self.w + x] = 1;
    }

    #[inline]
    pub fn clear(&mut self, x: usize, y: usize) {
        self.data[y * self.w + x] = 0;
    }

    /// Number of on pixels.
    pub fn on_count(&self) -> usize {
        self.data.iter().filter(|&&v| v != 0).count()
    }

    /// Fraction of pixels flagged as edges.
    pub fn density(&self) -> f32 {
        let total = self.w * self.h;
        if total == 0 {
            return 0.0;
        }
        self.on_count() as f32 / total as f32
    }

    /// Render as an 8-bit grayscale image (edges white) for tooling output.
    pub fn to_luma8(&self) -> image::GrayImage {
        let mut out = image::GrayImage::new(self.w as u32, self.h as u32);
        for y in 0..self.h {
            for x in 0..self.w {
                if self.is_on(x, y) {
                    out.put_pixel(x as u32, y as u32, image::Luma([255]));
                }
            }
        }
        out
    }
}

const TAN_22_5_DEG: f32 = 0.41421356237;

// NMS survivor classification prior to hysteresis.
const WEAK: u8 = 1;
const STRONG: u8 = 2;

/// Detect edges on an 8-bit grayscale view.
pub fn detect_edges(gray: ImageU8<'_>, options: &CannyOptions) -> EdgeMap {
    let float = ImageF32::from_u8(gray);
    let grad = image_gradients(&float, options.kernel);
    edge_map_from_gradients(&grad, options)
}

/// NMS + hysteresis over precomputed gradients.
pub fn edge_map_from_gradients(grad: &Grad, options: &CannyOptions) -> EdgeMap {
    let w = grad.mag.w;
    let h = grad.mag.h;
    let mut map = EdgeMap::new(w, h);
    if w < 3 || h < 3 {
        return map;
    }

    let low = options.low_threshold.min(options.high_threshold);
    let high = options.high_threshold.max(options.low_threshold);

    let mut classes = vec![0u8; w * h];
    let mut strong_seeds = Vec::new();

    for y in 1..h - 1 {
        let mag_prev = grad.mag.row(y - 1);
        let mag_row = grad.mag.row(y);
        let mag_next = grad.mag.row(y + 1);
        let gx_row = grad.gx.row(y);
        let gy_row = grad.gy.row(y);

        for x in 1..w - 1 {
            let mag = mag_row[x];
            if mag < low {
                continue;
            }

            let gx = gx_row[x];
            let gy = gy_row[x];
            let abs_gx = gx.abs();
            let abs_gy = gy.abs();
            let same_sign = (gx >= 0.0 && gy >= 0.0) || (gx <= 0.0 && gy <= 0.0);

            // Pick the two comparison neighbors along the quantized
            // gradient direction (4 sectors at 0°, 45°, 90°, 135°). The
            // first neighbor is the earlier scan position; ties on plateau
            // edges break toward it.
            let (neighbor1, neighbor2) = if abs_gx >= abs_gy {
                if abs_gy <= abs_gx * TAN_22_5_DEG {
                    (mag_row[x - 1], mag_row[x + 1])
                } else if same_sign {
                    (mag_prev[x + 1], mag_next[x - 1])
                } else {
                    (mag_prev[x - 1], mag_next[x + 1])
                }
            } else if abs_gx <= abs_gy * TAN_22_5_DEG {
                (mag_prev[x], mag_next[x])
            } else if same_sign {
                (mag_prev[x + 1], mag_next[x - 1])
            } else {
                (mag_prev[x - 1], mag_next[x + 1])
            };

            if mag <= neighbor1 || mag < neighbor2 {
                continue;
            }

            let idx = y * w + x;
            if mag >= high {
                classes[idx] = STRONG;
                strong_seeds.push(idx);
            } else {
                classes[idx] = WEAK;
            }
        }
    }

    // Hysteresis: flood from strong survivors into 8-connected weak ones.
    let mut stack = strong_seeds;
    while let Some(idx) = stack.pop() {
        let x = idx % w;
        let y = idx / w;
        if map.is_on(x, y) {
            continue;
        }
        map.set_on(x, y);

        for dy in -1i64..=1 {
            for dx in -1i64..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let xn = x as i64 + dx;
                let yn = y as i64 + dy;
                if xn < 0 || yn < 0 || xn >= w as i64 || yn >= h as i64 {
                    continue;
                }
                let nidx = yn as usize * w + xn as usize;
                if classes[nidx] != 0 && !map.is_on(xn as usize, yn as usize) {
                    stack.push(nidx);
                }
            }
        }
    }

    map
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gray_view(data: &[u8], w: usize, h: usize) -> ImageU8<'_> {
        ImageU8 {
            w,
            h,
            stride: w,
            data,
        }
    }

    fn horizontal_line_image(w: usize, h: usize, line_y: usize) -> Vec<u8> {
        let mut data = vec![255u8; w * h];
        for x in 0..w {
            data[line_y * w + x] = 0;
        }
        data
    }

    #[test]
    fn dark_line_on_white_produces_edges() {
        let data = horizontal_line_image(64, 16, 8);
        let map = detect_edges(gray_view(&data, 64, 16), &CannyOptions::default());
        assert!(map.on_count() > 0, "expected edge responses around the line");
        // All edges hug the drawn line.
        for y in 0..16 {
            for x in 0..64 {
                if map.is_on(x, y) {
                    assert!(y.abs_diff(8) <= 2, "stray edge at ({x}, {y})");
                }
            }
        }
    }

    #[test]
    fn flat_image_yields_empty_map() {
        let data = vec![128u8; 32 * 32];
        let map = detect_edges(gray_view(&data, 32, 32), &CannyOptions::default());
        assert_eq!(map.on_count(), 0);
        assert_eq!(map.density(), 0.0);
    }

    #[test]
    fn weak_response_needs_a_strong_neighbor() {
        // A faint step (below high, above low) in isolation must not survive,
        // while the same contrast attached to a strong edge is kept.
        let w = 32;
        let h = 16;
        let mut faint = vec![200u8; w * h];
        for y in 0..h {
            for x in 16..w {
                faint[y * w + x] = 180; // |Sobel gx| = 4·20 = 80: weak only
            }
        }
        let map = detect_edges(gray_view(&faint, w, h), &CannyOptions::default());
        assert_eq!(map.on_count(), 0, "isolated weak edge must be suppressed");

        let mut attached = faint.clone();
        for y in 0..6 {
            for x in 16..w {
                attached[y * w + x] = 0; // strong contrast on the top rows
            }
        }
        let map = detect_edges(gray_view(&attached, w, h), &CannyOptions::default());
        let weak_kept = (8..h - 1).any(|y| map.is_on(15, y) || map.is_on(16, y));
        assert!(weak_kept, "weak run connected to a strong edge must survive");
    }

    #[test]
    fn tiny_images_produce_empty_maps() {
        let data = vec![0u8; 2 * 2];
        let map = detect_edges(gray_view(&data, 2, 2), &CannyOptions::default());
        assert_eq!(map.on_count(), 0);
    }
}
