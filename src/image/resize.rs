// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Upscaling of small carriers before embedding.
//!
//! Tiny images have too few blocks for even a short message. Scaling the
//! shorter side up to a minimum size buys capacity at the cost of changing
//! the geometry, so the extractor must be handed the upscaled image.

use serde::{Deserialize, Serialize};

use super::{Carrier, CHANNELS};

/// Resampling filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interpolation {
    Nearest,
    #[serde(alias = "linear")]
    Bilinear,
    /// Bicubic convolution (a = -0.75) over a 4×4 neighbourhood.
    #[default]
    Cubic,
    /// Lanczos windowed sinc over an 8×8 neighbourhood.
    Lanczos,
}

/// Cubic convolution coefficient.
const CUBIC_A: f64 = -0.75;

/// Lanczos window radius.
const LANCZOS_RADIUS: usize = 4;

fn cubic_weight(t: f64) -> f64 {
    let t = t.abs();
    if t <= 1.0 {
        ((CUBIC_A + 2.0) * t - (CUBIC_A + 3.0)) * t * t + 1.0
    } else if t < 2.0 {
        ((CUBIC_A * t - 5.0 * CUBIC_A) * t + 8.0 * CUBIC_A) * t - 4.0 * CUBIC_A
    } else {
        0.0
    }
}

fn lanczos_weight(t: f64) -> f64 {
    let a = LANCZOS_RADIUS as f64;
    if t == 0.0 {
        1.0
    } else if t.abs() >= a {
        0.0
    } else {
        let pt = std::f64::consts::PI * t;
        a * pt.sin() * (pt / a).sin() / (pt * pt)
    }
}

/// Upscale so the shorter side is at least `min_size` pixels.
///
/// Both sides scale by the same factor, rounded to the nearest pixel.
/// Returns a copy unchanged when `min_size == 0`, the carrier is empty, or
/// it is already large enough.
pub fn upscale_if_small(carrier: &Carrier, min_size: usize, interp: Interpolation) -> Carrier {
    let (w, h) = (carrier.width(), carrier.height());
    let short = w.min(h);
    if min_size == 0 || short == 0 || short >= min_size {
        return carrier.clone();
    }

    let scale = min_size as f64 / short as f64;
    let dst_w = ((w as f64 * scale).round_ties_even() as usize).max(1);
    let dst_h = ((h as f64 * scale).round_ties_even() as usize).max(1);
    resize(carrier, dst_w, dst_h, interp)
}

/// Resample a carrier to `dst_w`×`dst_h`.
pub fn resize(carrier: &Carrier, dst_w: usize, dst_h: usize, interp: Interpolation) -> Carrier {
    let (src_w, src_h) = (carrier.width(), carrier.height());
    if src_w == 0 || src_h == 0 || dst_w == 0 || dst_h == 0 {
        return Carrier::from_parts(dst_w, dst_h, vec![0u8; dst_w * dst_h * CHANNELS]);
    }

    let fx = src_w as f64 / dst_w as f64;
    let fy = src_h as f64 / dst_h as f64;
    let mut out = Vec::with_capacity(dst_w * dst_h * CHANNELS);

    for dy in 0..dst_h {
        for dx in 0..dst_w {
            // Pixel-centre mapping for the smooth filters.
            let sx = (dx as f64 + 0.5) * fx - 0.5;
            let sy = (dy as f64 + 0.5) * fy - 0.5;
            let px = match interp {
                Interpolation::Nearest => {
                    let nx = ((dx as f64 * fx).floor() as usize).min(src_w - 1);
                    let ny = ((dy as f64 * fy).floor() as usize).min(src_h - 1);
                    carrier.pixel(ny, nx)
                }
                Interpolation::Bilinear => bilinear_sample(carrier, sx, sy),
                Interpolation::Cubic => kernel_sample(carrier, sx, sy, 2, cubic_weight),
                Interpolation::Lanczos => kernel_sample(carrier, sx, sy, LANCZOS_RADIUS, lanczos_weight),
            };
            out.extend_from_slice(&px);
        }
    }

    Carrier::from_parts(dst_w, dst_h, out)
}

/// Bilinear sample with edge clamping.
fn bilinear_sample(carrier: &Carrier, x: f64, y: f64) -> [u8; 3] {
    let max_x = (carrier.width() - 1) as f64;
    let max_y = (carrier.height() - 1) as f64;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor();
    let y0 = y.floor();
    let tx = x - x0;
    let ty = y - y0;
    let x1 = (x0 + 1.0).min(max_x) as usize;
    let y1 = (y0 + 1.0).min(max_y) as usize;
    let (x0, y0) = (x0 as usize, y0 as usize);

    let p00 = carrier.pixel(y0, x0);
    let p01 = carrier.pixel(y0, x1);
    let p10 = carrier.pixel(y1, x0);
    let p11 = carrier.pixel(y1, x1);

    let mut px = [0u8; 3];
    for c in 0..CHANNELS {
        let top = p00[c] as f64 * (1.0 - tx) + p01[c] as f64 * tx;
        let bottom = p10[c] as f64 * (1.0 - tx) + p11[c] as f64 * tx;
        px[c] = (top * (1.0 - ty) + bottom * ty).round().clamp(0.0, 255.0) as u8;
    }
    px
}

/// Taps along one axis: clamped source index and kernel weight.
fn axis_taps(pos: f64, len: usize, radius: usize, weight: fn(f64) -> f64) -> Vec<(usize, f64)> {
    let base = pos.floor();
    let last = len as isize - 1;
    (1 - radius as isize..=radius as isize)
        .map(|i| {
            let idx = (base as isize + i).clamp(0, last) as usize;
            (idx, weight(pos - (base + i as f64)))
        })
        .collect()
}

/// Separable convolution sample with replicated edges.
///
/// Weights are normalized so flat regions stay flat.
fn kernel_sample(carrier: &Carrier, x: f64, y: f64, radius: usize, weight: fn(f64) -> f64) -> [u8; 3] {
    let xs = axis_taps(x, carrier.width(), radius, weight);
    let ys = axis_taps(y, carrier.height(), radius, weight);
    let norm = xs.iter().map(|&(_, w)| w).sum::<f64>() * ys.iter().map(|&(_, w)| w).sum::<f64>();

    let mut acc = [0.0f64; 3];
    for &(row, wy) in &ys {
        for &(col, wx) in &xs {
            let p = carrier.pixel(row, col);
            let k = wx * wy;
            for c in 0..CHANNELS {
                acc[c] += p[c] as f64 * k;
            }
        }
    }

    let mut px = [0u8; 3];
    for c in 0..CHANNELS {
        px[c] = (acc[c] / norm).round().clamp(0.0, 255.0) as u8;
    }
    px
}
