// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! BGR ↔ YCrCb conversion in 14-bit fixed point.
//!
//! Integer-only so that the luma plane an extractor sees is bit-identical on
//! every platform. Coefficients are the full-range BT.601 set used by the
//! common `BGR2YCrCb` conversion in image toolkits, so planes match what
//! those toolkits produce for the same pixels.

use super::{Carrier, CHANNELS};
use crate::mark::error::{MarkError, Result};

const SHIFT: u32 = 14;
const HALF: i32 = 1 << (SHIFT - 1);
const CHROMA_BIAS: i32 = 128 << SHIFT;

// Forward.
const B2Y: i32 = 1868;
const G2Y: i32 = 9617;
const R2Y: i32 = 4899;
const CR_FROM_R: i32 = 11682;
const CB_FROM_B: i32 = 9241;

// Inverse.
const CR2R: i32 = 22987;
const CR2G: i32 = -11698;
const CB2G: i32 = -5636;
const CB2B: i32 = 29049;

#[inline]
fn descale(x: i32) -> i32 {
    (x + HALF) >> SHIFT
}

#[inline]
fn saturate(x: i32) -> u8 {
    x.clamp(0, 255) as u8
}

/// Planar YCrCb image. All three planes are `width * height`, row-major.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct YCrCbPlanes {
    pub width: usize,
    pub height: usize,
    pub y: Vec<u8>,
    pub cr: Vec<u8>,
    pub cb: Vec<u8>,
}

impl YCrCbPlanes {
    /// Check that every plane holds exactly `width * height` samples.
    ///
    /// # Errors
    /// [`MarkError::InputShape`] with the length of the first bad plane.
    pub fn check_shape(&self) -> Result<()> {
        let expected = self.width.checked_mul(self.height);
        for plane in [&self.y, &self.cr, &self.cb] {
            if expected != Some(plane.len()) {
                return Err(MarkError::InputShape {
                    width: self.width,
                    height: self.height,
                    channels: 1,
                    len: plane.len(),
                });
            }
        }
        Ok(())
    }
}

/// Split a BGR carrier into Y, Cr and Cb planes.
pub fn bgr_to_ycrcb(carrier: &Carrier) -> YCrCbPlanes {
    let n = carrier.width() * carrier.height();
    let mut y = Vec::with_capacity(n);
    let mut cr = Vec::with_capacity(n);
    let mut cb = Vec::with_capacity(n);

    for px in carrier.as_bytes().chunks_exact(CHANNELS) {
        let (b, g, r) = (px[0] as i32, px[1] as i32, px[2] as i32);
        let yy = descale(b * B2Y + g * G2Y + r * R2Y);
        y.push(saturate(yy));
        cr.push(saturate(descale((r - yy) * CR_FROM_R + CHROMA_BIAS)));
        cb.push(saturate(descale((b - yy) * CB_FROM_B + CHROMA_BIAS)));
    }

    YCrCbPlanes {
        width: carrier.width(),
        height: carrier.height(),
        y,
        cr,
        cb,
    }
}

/// Merge Y, Cr and Cb planes back into a BGR carrier.
///
/// # Errors
/// [`MarkError::InputShape`] if a plane does not hold `width * height` samples.
pub fn ycrcb_to_bgr(planes: &YCrCbPlanes) -> Result<Carrier> {
    planes.check_shape()?;
    let n = planes.width * planes.height;
    let mut data = Vec::with_capacity(n * CHANNELS);

    for i in 0..n {
        let yy = planes.y[i] as i32;
        let cr = planes.cr[i] as i32 - 128;
        let cb = planes.cb[i] as i32 - 128;
        data.push(saturate(yy + descale(cb * CB2B)));
        data.push(saturate(yy + descale(cb * CB2G + cr * CR2G)));
        data.push(saturate(yy + descale(cr * CR2R)));
    }

    Ok(Carrier::from_parts(planes.width, planes.height, data))
}
