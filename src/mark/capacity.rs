// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Capacity arithmetic.
//!
//! Every framed bit occupies [`REPEAT`] blocks, so a carrier with `B` blocks
//! holds a text of `n` bytes iff `(16 + 8n) * REPEAT <= B`.

use crate::image::luma::padded_len;
use crate::dct::BLOCK;

use super::frame::MAX_PAYLOAD_BYTES;
use super::{HEADER_BITS, REPEAT};

/// Number of 8×8 blocks in a `width`×`height` carrier after padding.
pub fn block_count(width: usize, height: usize) -> usize {
    (padded_len(width) / BLOCK) * (padded_len(height) / BLOCK)
}

/// Write slots needed for a text of `text_len` UTF-8 bytes.
pub fn required_slots(text_len: usize) -> usize {
    (HEADER_BITS + 8 * text_len) * REPEAT
}

/// Largest text (in UTF-8 bytes) a `width`×`height` carrier can hold.
///
/// Returns `None` when not even an empty text (the 16-bit header) fits.
pub fn max_text_bytes(width: usize, height: usize) -> Option<usize> {
    let blocks = block_count(width, height);
    let header = required_slots(0);
    if blocks < header {
        return None;
    }
    Some(((blocks - header) / (8 * REPEAT)).min(MAX_PAYLOAD_BYTES))
}

/// Whether a text of `text_len` bytes fits into a `width`×`height` carrier.
pub fn fits(width: usize, height: usize, text_len: usize) -> bool {
    text_len <= MAX_PAYLOAD_BYTES && required_slots(text_len) <= block_count(width, height)
}
