// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! In-memory carrier rasters and the pixel-domain preparation around them.
//!
//! File decoding/encoding is left to the caller: a [`Carrier`] is just an
//! interleaved H×W×3 byte buffer in BGR order, which is what common image
//! and video decoders hand out.

pub mod color;
pub mod luma;
pub mod quality;
pub mod resize;

use crate::mark::error::{MarkError, Result};

/// Number of interleaved channels in a carrier.
pub const CHANNELS: usize = 3;

/// An 8-bit H×W×3 raster in BGR channel order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Carrier {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl Carrier {
    /// Wrap a raw interleaved buffer.
    ///
    /// # Errors
    /// [`MarkError::InputShape`] if `channels != 3` or `data.len()` does not
    /// equal `width * height * channels`.
    pub fn new(width: usize, height: usize, channels: usize, data: Vec<u8>) -> Result<Self> {
        let expected = width.checked_mul(height).and_then(|p| p.checked_mul(channels));
        if channels != CHANNELS || expected != Some(data.len()) {
            return Err(MarkError::InputShape {
                width,
                height,
                channels,
                len: data.len(),
            });
        }
        Ok(Self { width, height, data })
    }

    /// Wrap a BGR buffer (3 channels).
    pub fn from_bgr(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        Self::new(width, height, CHANNELS, data)
    }

    /// Wrap an RGB buffer, swapping it into BGR order.
    pub fn from_rgb(width: usize, height: usize, data: Vec<u8>) -> Result<Self> {
        let mut carrier = Self::new(width, height, CHANNELS, data)?;
        for px in carrier.data.chunks_exact_mut(CHANNELS) {
            px.swap(0, 2);
        }
        Ok(carrier)
    }

    /// A carrier filled with one BGR colour.
    ///
    /// # Errors
    /// [`MarkError::InputShape`] if `width * height * 3` overflows `usize`.
    pub fn filled(width: usize, height: usize, bgr: [u8; 3]) -> Result<Self> {
        let len = width
            .checked_mul(height)
            .and_then(|p| p.checked_mul(CHANNELS))
            .ok_or(MarkError::InputShape {
                width,
                height,
                channels: CHANNELS,
                len: 0,
            })?;
        let data = bgr.iter().copied().cycle().take(len).collect();
        Ok(Self { width, height, data })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Interleaved BGR bytes, row-major.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Copy out the pixels in RGB order.
    pub fn to_rgb(&self) -> Vec<u8> {
        let mut out = self.data.clone();
        for px in out.chunks_exact_mut(CHANNELS) {
            px.swap(0, 2);
        }
        out
    }

    /// BGR triple at (row, col).
    ///
    /// # Panics
    /// If `row >= height` or `col >= width`.
    pub fn pixel(&self, row: usize, col: usize) -> [u8; 3] {
        let i = (row * self.width + col) * CHANNELS;
        [self.data[i], self.data[i + 1], self.data[i + 2]]
    }

    pub(crate) fn from_parts(width: usize, height: usize, data: Vec<u8>) -> Self {
        debug_assert_eq!(data.len(), width * height * CHANNELS);
        Self { width, height, data }
    }
}
