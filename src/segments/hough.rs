//! Deterministic progressive probabilistic Hough transform.
//!
//! Each unconsumed edge pixel votes one (ρ, θ) sinusoid into the
//! accumulator. When the best cell touched by a vote reaches the threshold,
//! the corresponding line is walked from the voting pixel in both
//! directions, bridging gaps up to `max_line_gap`; the covered run is
//! removed from the point mask (and its votes retracted) so it cannot
//! support further hypotheses. Runs at least `min_line_length` long are
//! emitted as segments.

use super::types::{HoughOptions, Segment};
use crate::edges::EdgeMap;
use log::debug;

struct Accumulator {
    votes: Vec<i32>,
    numangle: usize,
    numrho: usize,
    cos_tab: Vec<f32>,
    sin_tab: Vec<f32>,
    inv_rho: f32,
}

impl Accumulator {
    fn new(w: usize, h: usize, options: &HoughOptions) -> Self {
        let theta_res = options.theta_res_deg.to_radians();
        let numangle = (std::f32::consts::PI / theta_res).round().max(1.0) as usize;
        // |ρ| = |x cosθ + y sinθ| is bounded by w + h.
        let half = (((w + h) as f32) / options.rho_res).ceil() as usize;
        let numrho = 2 * half + 1;

        let mut cos_tab = Vec::with_capacity(numangle);
        let mut sin_tab = Vec::with_capacity(numangle);
        for n in 0..numangle {
            let ang = n as f32 * theta_res;
            cos_tab.push(ang.cos());
            sin_tab.push(ang.sin());
        }

        Self {
            votes: vec![0; numangle * numrho],
            numangle,
            numrho,
            cos_tab,
            sin_tab,
            inv_rho: 1.0 / options.rho_res,
        }
    }

    #[inline]
    fn rho_index(&self, n: usize, x: f32, y: f32) -> usize {
        let rho = (x * self.cos_tab[n] + y * self.sin_tab[n]) * self.inv_rho;
        (rho.round() as i64 + (self.numrho as i64 - 1) / 2) as usize
    }

    /// Vote for every angle; returns the best (angle, votes) cell touched.
    fn cast(&mut self, x: f32, y: f32) -> (usize, i32) {
        let mut best_n = 0;
        let mut best_votes = 0;
        for n in 0..self.numangle {
            let r = self.rho_index(n, x, y);
            let cell = &mut self.votes[n * self.numrho + r];
            *cell += 1;
            if *cell > best_votes {
                best_votes = *cell;
                best_n = n;
            }
        }
        (best_n, best_votes)
    }

    fn retract(&mut self, x: f32, y: f32) {
        for n in 0..self.numangle {
            let r = self.rho_index(n, x, y);
            self.votes[n * self.numrho + r] -= 1;
        }
    }
}

/// Extract line segments from an edge map.
pub fn hough_segments(edges: &EdgeMap, options: &HoughOptions) -> Vec<Segment> {
    let w = edges.w;
    let h = edges.h;
    if w == 0 || h == 0 {
        return Vec::new();
    }

    let mut accum = Accumulator::new(w, h, options);
    let mut mask = vec![false; w * h];
    let mut voted = vec![false; w * h];
    let mut points = Vec::new();
    for y in 0..h {
        for x in 0..w {
            if edges.is_on(x, y) {
                mask[y * w + x] = true;
                points.push((x as i32, y as i32));
            }
        }
    }

    let mut segments = Vec::new();
    let threshold = options.vote_threshold as i32;
    let max_gap = options.max_line_gap.max(0.0) as i32;

    for &(x0, y0) in &points {
        let idx0 = y0 as usize * w + x0 as usize;
        // Consumed by an earlier segment walk.
        if !mask[idx0] {
            continue;
        }

        voted[idx0] = true;
        let (best_n, best_votes) = accum.cast(x0 as f32, y0 as f32);
        if best_votes < threshold {
            continue;
        }

        // Walk the winning line through (x0, y0). Direction (-sinθ, cosθ)
        // is normalized so the dominant axis steps by one pixel.
        let a = -accum.sin_tab[best_n];
        let b = accum.cos_tab[best_n];
        let (dx0, dy0) = if a.abs() > b.abs() {
            (a.signum(), b / a.abs())
        } else {
            (a / b.abs(), b.signum())
        };

        let mut line_end = [[x0, y0], [x0, y0]];
        for k in 0..2 {
            let (sx, sy) = if k == 0 { (dx0, dy0) } else { (-dx0, -dy0) };
            let mut gap = 0;
            let mut step = 1;
            loop {
                let x = (x0 as f32 + step as f32 * sx).round() as i32;
                let y = (y0 as f32 + step as f32 * sy).round() as i32;
                if x < 0 || y < 0 || x >= w as i32 || y >= h as i32 {
                    break;
                }
                if mask[y as usize * w + x as usize] {
                    gap = 0;
                    line_end[k] = [x, y];
                } else {
                    gap += 1;
                    if gap > max_gap {
                        break;
                    }
                }
                step += 1;
            }
        }

        let seg = Segment::new(line_end[0], line_end[1]);
        let good = seg.length() >= options.min_line_length;

        // Consume the walked run either way so it cannot re-trigger; votes
        // are retracted only for pixels that actually cast them.
        for k in 0..2 {
            let (sx, sy) = if k == 0 { (dx0, dy0) } else { (-dx0, -dy0) };
            let mut step = 0;
            loop {
                let x = (x0 as f32 + step as f32 * sx).round() as i32;
                let y = (y0 as f32 + step as f32 * sy).round() as i32;
                let idx = y as usize * w + x as usize;
                if mask[idx] {
                    mask[idx] = false;
                    if voted[idx] {
                        accum.retract(x as f32, y as f32);
                        voted[idx] = false;
                    }
                }
                if [x, y] == line_end[k] {
                    break;
                }
                step += 1;
            }
        }

        if good {
            segments.push(seg);
        }
    }

    debug!(
        "hough: {} edge points -> {} segments",
        points.len(),
        segments.len()
    );
    segments
}
