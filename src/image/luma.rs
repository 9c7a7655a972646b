// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Block-aligned luma plane.
//!
//! The Y plane is widened to f64 and padded on the bottom and right by edge
//! replication so both dimensions are multiples of 8. Blocks are enumerated
//! in row-major order over the padded plane. [`LumaPlane::to_plane`] crops
//! the padding away again.

use crate::dct::BLOCK;

/// Padded f64 luma plane with its 8×8 block grid.
#[derive(Debug, Clone)]
pub struct LumaPlane {
    pixels: Vec<f64>,
    /// Padded width (multiple of 8).
    width: usize,
    /// Padded height (multiple of 8).
    height: usize,
    orig_width: usize,
    orig_height: usize,
}

/// Round `n` up to the next multiple of the block size.
pub fn padded_len(n: usize) -> usize {
    n.div_ceil(BLOCK) * BLOCK
}

impl LumaPlane {
    /// Build a padded plane from a row-major `width * height` u8 plane.
    pub fn from_plane(y: &[u8], width: usize, height: usize) -> Self {
        debug_assert_eq!(y.len(), width * height);
        let pw = padded_len(width);
        let ph = padded_len(height);
        let mut pixels = vec![0.0f64; pw * ph];

        if width > 0 && height > 0 {
            for row in 0..ph {
                let sr = row.min(height - 1);
                for col in 0..pw {
                    let sc = col.min(width - 1);
                    pixels[row * pw + col] = y[sr * width + sc] as f64;
                }
            }
        }

        Self {
            pixels,
            width: pw,
            height: ph,
            orig_width: width,
            orig_height: height,
        }
    }

    pub fn blocks_wide(&self) -> usize {
        self.width / BLOCK
    }

    pub fn blocks_tall(&self) -> usize {
        self.height / BLOCK
    }

    /// Total number of 8×8 blocks in the padded plane.
    pub fn num_blocks(&self) -> usize {
        self.blocks_wide() * self.blocks_tall()
    }

    /// Top-left pixel (row, col) of block `index`.
    pub fn block_origin(&self, index: usize) -> (usize, usize) {
        let bw = self.blocks_wide();
        ((index / bw) * BLOCK, (index % bw) * BLOCK)
    }

    /// Copy out block `index` in row-major order.
    pub fn block(&self, index: usize) -> [f64; 64] {
        let (r0, c0) = self.block_origin(index);
        let mut out = [0.0f64; 64];
        for row in 0..BLOCK {
            let start = (r0 + row) * self.width + c0;
            out[row * BLOCK..(row + 1) * BLOCK].copy_from_slice(&self.pixels[start..start + BLOCK]);
        }
        out
    }

    /// Overwrite block `index`.
    pub fn set_block(&mut self, index: usize, block: &[f64; 64]) {
        let (r0, c0) = self.block_origin(index);
        for row in 0..BLOCK {
            let start = (r0 + row) * self.width + c0;
            self.pixels[start..start + BLOCK].copy_from_slice(&block[row * BLOCK..(row + 1) * BLOCK]);
        }
    }

    /// Crop back to the original size and quantize to u8.
    ///
    /// Values are clipped to [0, 255] and rounded to the nearest integer.
    pub fn to_plane(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.orig_width * self.orig_height);
        for row in 0..self.orig_height {
            let line = &self.pixels[row * self.width..row * self.width + self.orig_width];
            out.extend(line.iter().map(|&p| p.clamp(0.0, 255.0).round() as u8));
        }
        out
    }
}
