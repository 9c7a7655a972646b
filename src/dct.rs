// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Orthonormal 8×8 DCT-II and its inverse.
//!
//! Coefficients are stored in natural row-major order: index `u * 8 + v`
//! holds vertical frequency `u` and horizontal frequency `v`. No level shift
//! is applied, so a flat block of value `p` has DC `8 * p` and zero AC.
//!
//! # Cross-platform portability
//!
//! The cosine table is assembled from the eight correctly-rounded constants
//! `cos(k * PI / 16)` by symmetry instead of calling `f64::cos`, whose result
//! is platform-libm dependent. Everything else is IEEE 754 add/mul, so the
//! transform is bit-identical on every target.

use std::sync::OnceLock;

/// Side length of a transform block.
pub const BLOCK: usize = 8;

/// `cos(k * PI / 16)` for k = 0..=8.
const COS_PI_16: [f64; 9] = [
    1.0,
    0.980_785_280_403_230_4,
    0.923_879_532_511_286_7,
    0.831_469_612_302_545_2,
    0.707_106_781_186_547_6,
    0.555_570_233_019_602_2,
    0.382_683_432_365_089_8,
    0.195_090_322_016_128_25,
    0.0,
];

/// `COSINE[u][x] = cos((2x + 1) * u * PI / 16)`.
static COSINE: OnceLock<[[f64; 8]; 8]> = OnceLock::new();

/// Normalization: C(0) = 1/sqrt(8), C(u>0) = 1/2.
const NORM: [f64; 8] = [
    std::f64::consts::FRAC_1_SQRT_2 * 0.5,
    0.5,
    0.5,
    0.5,
    0.5,
    0.5,
    0.5,
    0.5,
];

/// `cos(m * PI / 16)` for any non-negative integer `m`.
fn cos_sixteenth(m: usize) -> f64 {
    let m = m % 32;
    match m {
        0..=8 => COS_PI_16[m],
        9..=16 => -COS_PI_16[16 - m],
        17..=24 => -COS_PI_16[m - 16],
        _ => COS_PI_16[32 - m],
    }
}

fn cosine_table() -> &'static [[f64; 8]; 8] {
    COSINE.get_or_init(|| {
        let mut table = [[0.0f64; 8]; 8];
        for (u, row) in table.iter_mut().enumerate() {
            for (x, entry) in row.iter_mut().enumerate() {
                *entry = cos_sixteenth((2 * x + 1) * u);
            }
        }
        table
    })
}

/// Forward 8×8 DCT of a block of pixel values.
pub fn forward(pixels: &[f64; 64]) -> [f64; 64] {
    let cos = cosine_table();

    // Rows: horizontal frequencies.
    let mut temp = [0.0f64; 64];
    for row in 0..8 {
        for v in 0..8 {
            let mut sum = 0.0;
            for x in 0..8 {
                sum += pixels[row * 8 + x] * cos[v][x];
            }
            temp[row * 8 + v] = NORM[v] * sum;
        }
    }

    // Columns: vertical frequencies.
    let mut coeffs = [0.0f64; 64];
    for col in 0..8 {
        for u in 0..8 {
            let mut sum = 0.0;
            for y in 0..8 {
                sum += temp[y * 8 + col] * cos[u][y];
            }
            coeffs[u * 8 + col] = NORM[u] * sum;
        }
    }

    coeffs
}

/// Inverse 8×8 DCT back to pixel values.
pub fn inverse(coeffs: &[f64; 64]) -> [f64; 64] {
    let cos = cosine_table();

    // Columns first.
    let mut temp = [0.0f64; 64];
    for col in 0..8 {
        for y in 0..8 {
            let mut sum = 0.0;
            for u in 0..8 {
                sum += NORM[u] * coeffs[u * 8 + col] * cos[u][y];
            }
            temp[y * 8 + col] = sum;
        }
    }

    let mut pixels = [0.0f64; 64];
    for row in 0..8 {
        for x in 0..8 {
            let mut sum = 0.0;
            for v in 0..8 {
                sum += NORM[v] * temp[row * 8 + v] * cos[v][x];
            }
            pixels[row * 8 + x] = sum;
        }
    }

    pixels
}
