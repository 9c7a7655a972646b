// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Bit framing of the watermark text.
//!
//! ```text
//! [16 bits ] UTF-8 byte length n (big-endian u16)
//! [8n bits ] UTF-8 bytes
//! ```
//!
//! Bits are emitted most-significant first, one bit per `u8` (0 or 1).
//! There is no checksum: integrity comes from majority voting and the UTF-8
//! validity check on decode.

use super::error::{MarkError, Result};
use super::HEADER_BITS;

/// Maximum payload length in bytes (u16 header).
pub const MAX_PAYLOAD_BYTES: usize = u16::MAX as usize;

/// Expand bytes into bits, MSB first.
pub fn bytes_to_bits(bytes: &[u8]) -> Vec<u8> {
    let mut bits = Vec::with_capacity(bytes.len() * 8);
    for &b in bytes {
        for shift in (0..8).rev() {
            bits.push((b >> shift) & 1);
        }
    }
    bits
}

/// Pack bits (MSB first) into bytes. Trailing bits that do not fill a byte
/// are dropped.
pub fn bits_to_bytes(bits: &[u8]) -> Vec<u8> {
    bits.chunks_exact(8)
        .map(|chunk| chunk.iter().fold(0u8, |acc, &bit| (acc << 1) | (bit & 1)))
        .collect()
}

/// Frame `text` as header + payload bits.
///
/// # Errors
/// [`MarkError::PayloadTooLarge`] if the UTF-8 encoding exceeds 65535 bytes.
pub fn encode_bits(text: &str) -> Result<Vec<u8>> {
    let data = text.as_bytes();
    let len = u16::try_from(data.len()).map_err(|_| MarkError::PayloadTooLarge { len: data.len() })?;

    let mut framed = Vec::with_capacity(2 + data.len());
    framed.extend_from_slice(&len.to_be_bytes());
    framed.extend_from_slice(data);
    Ok(bytes_to_bits(&framed))
}

/// Declared payload length from the first 16 bits, if present.
pub fn header_length(bits: &[u8]) -> Option<u16> {
    if bits.len() < HEADER_BITS {
        return None;
    }
    let hdr = bits_to_bytes(&bits[..HEADER_BITS]);
    Some(u16::from_be_bytes([hdr[0], hdr[1]]))
}

/// Recover the text from framed bits.
///
/// Returns `None` when the header is missing, the bits are shorter than the
/// declared length, or the payload is not valid UTF-8. Extra trailing bits
/// are ignored.
pub fn decode_bits(bits: &[u8]) -> Option<String> {
    let n = header_length(bits)? as usize;
    let need = HEADER_BITS + n * 8;
    if bits.len() < need {
        return None;
    }
    String::from_utf8(bits_to_bytes(&bits[HEADER_BITS..need])).ok()
}
