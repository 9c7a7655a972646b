// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Peak signal-to-noise ratio between two carriers.

use super::Carrier;
use crate::mark::error::{MarkError, Result};

/// PSNR reported for identical carriers, in dB.
///
/// A finite sentinel instead of infinity.
pub const PSNR_IDENTICAL: f64 = 99.0;

/// PSNR in dB over every channel byte of two equally sized carriers.
///
/// # Errors
/// [`MarkError::InputShape`] if the carriers differ in size.
pub fn psnr(a: &Carrier, b: &Carrier) -> Result<f64> {
    if a.width() != b.width() || a.height() != b.height() {
        return Err(MarkError::InputShape {
            width: b.width(),
            height: b.height(),
            channels: super::CHANNELS,
            len: b.as_bytes().len(),
        });
    }
    let n = a.as_bytes().len();
    if n == 0 {
        return Ok(PSNR_IDENTICAL);
    }

    let sse: f64 = a
        .as_bytes()
        .iter()
        .zip(b.as_bytes())
        .map(|(&x, &y)| {
            let d = x as f64 - y as f64;
            d * d
        })
        .sum();
    let mse = sse / n as f64;
    if mse == 0.0 {
        return Ok(PSNR_IDENTICAL);
    }
    Ok(20.0 * (255.0 / mse.sqrt()).log10())
}
