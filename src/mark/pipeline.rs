// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Embed / extract pipeline.
//!
//! Embedding:
//! 1. Convert the BGR carrier to YCrCb and pad the Y plane to whole blocks.
//! 2. Frame the text into header + payload bits.
//! 3. Permute the block indices with the key.
//! 4. Write bit `i` into the blocks at permuted positions
//!    `i * REPEAT .. (i + 1) * REPEAT` with QIM at the tap.
//! 5. Crop, clip and merge Y back with the untouched chroma planes.
//!
//! Extraction walks the same positions, votes each run of REPEAT decoded
//! bits, reads the 16-bit header, then the payload. It never fails: any
//! anomaly ends in [`ExtractStatus::NotFound`].

use log::debug;

use crate::image::color::{self, YCrCbPlanes};
use crate::image::luma::LumaPlane;
use crate::image::Carrier;

use super::error::{MarkError, Result};
use super::frame;
use super::permute::block_permutation;
use super::qim;
use super::vote::vote_bits;
use super::{HEADER_BITS, REPEAT};

fn check_strength(q: f64) -> Result<()> {
    if q.is_finite() && q > 0.0 {
        Ok(())
    } else {
        Err(MarkError::InvalidStrength(q))
    }
}

/// Embed `text` into a carrier.
///
/// # Arguments
/// - `carrier`: BGR cover image.
/// - `text`: UTF-8 message, at most 65535 bytes.
/// - `key`: shared secret controlling block placement.
/// - `q`: quantization step (strength). Larger is more robust and more visible.
///
/// # Errors
/// - [`MarkError::InvalidStrength`] if `q` is not finite and positive.
/// - [`MarkError::PayloadTooLarge`] if `text` exceeds 65535 bytes.
/// - [`MarkError::CarrierTooSmall`] if the carrier has no pixels.
/// - [`MarkError::Capacity`] if the framed bits times REPEAT exceed the block count.
pub fn embed(carrier: &Carrier, text: &str, key: &str, q: f64) -> Result<Carrier> {
    let mut planes = color::bgr_to_ycrcb(carrier);
    embed_planes(&mut planes, text, key, q)?;
    color::ycrcb_to_bgr(&planes)
}

/// Embed `text` into the Y plane of already-converted planes.
///
/// Cr and Cb are never touched. On error the planes are left unchanged.
///
/// # Errors
/// As [`embed`], plus [`MarkError::InputShape`] if a plane does not hold
/// `width * height` samples.
pub fn embed_planes(planes: &mut YCrCbPlanes, text: &str, key: &str, q: f64) -> Result<()> {
    planes.check_shape()?;
    check_strength(q)?;

    let mut luma = LumaPlane::from_plane(&planes.y, planes.width, planes.height);
    let bits = frame::encode_bits(text)?;

    let num_blocks = luma.num_blocks();
    if num_blocks == 0 {
        return Err(MarkError::CarrierTooSmall);
    }
    let needed = bits.len() * REPEAT;
    if needed > num_blocks {
        return Err(MarkError::Capacity { needed, available: num_blocks });
    }

    debug!(
        "embedding {} bytes into {}x{} carrier: {needed}/{num_blocks} blocks, q={q}",
        text.len(),
        planes.width,
        planes.height,
    );

    let perm = block_permutation(key, num_blocks);
    for (slots, &bit) in perm.chunks_exact(REPEAT).zip(&bits) {
        for &block_idx in slots {
            let mut block = luma.block(block_idx);
            qim::embed_block(&mut block, bit, q);
            luma.set_block(block_idx, &block);
        }
    }

    planes.y = luma.to_plane();
    Ok(())
}

/// Why an extraction found no watermark.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotFoundReason {
    /// A plane does not hold `width * height` samples.
    InputShape,
    /// The quantization step is not finite and positive.
    InvalidStrength,
    /// The carrier has no 8×8 block.
    NoBlocks,
    /// Fewer blocks than the 16 header bits need.
    HeaderTruncated,
    /// The declared length needs more blocks than the carrier has.
    PayloadTruncated,
    /// The payload bytes are not valid UTF-8.
    InvalidUtf8,
}

/// Terminal state of an extraction.
///
/// Extraction reads the header, then the payload. Running out of slots in
/// either phase, or an undecodable payload, ends in `NotFound`; only a
/// payload that decodes as UTF-8 ends in `Decoded`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractStatus {
    Decoded,
    NotFound(NotFoundReason),
}

/// Outcome of [`extract`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extraction {
    /// Recovered text; `None` when no watermark was found.
    pub text: Option<String>,
    /// Voted header bits (empty if the header could not be read).
    pub header_bits: Vec<u8>,
    /// Length parsed from the header, or -1 if the header could not be read.
    pub declared_length: i32,
    /// [`ExtractStatus::Decoded`] or why nothing was found.
    pub status: ExtractStatus,
}

impl Extraction {
    fn not_found(reason: NotFoundReason, header_bits: Vec<u8>, declared_length: i32) -> Self {
        Self {
            text: None,
            header_bits,
            declared_length,
            status: ExtractStatus::NotFound(reason),
        }
    }

    pub fn is_found(&self) -> bool {
        self.status == ExtractStatus::Decoded
    }

    /// Header bits as a `0`/`1` string, for diagnostics.
    pub fn header_bit_string(&self) -> String {
        self.header_bits.iter().map(|&b| if b == 1 { '1' } else { '0' }).collect()
    }
}

/// Sequential reader over permuted write slots.
struct SlotReader<'a> {
    luma: &'a LumaPlane,
    perm: Vec<usize>,
    cursor: usize,
    q: f64,
}

impl SlotReader<'_> {
    /// Decode and vote the next `n_bits` logical bits.
    ///
    /// Returns `None` without consuming anything if too few slots remain.
    fn read_bits(&mut self, n_bits: usize) -> Option<Vec<u8>> {
        let end = self.cursor.checked_add(n_bits.checked_mul(REPEAT)?)?;
        if end > self.perm.len() {
            return None;
        }
        let raw: Vec<u8> = self.perm[self.cursor..end]
            .iter()
            .map(|&block_idx| qim::decode_block(&self.luma.block(block_idx), self.q))
            .collect();
        self.cursor = end;
        Some(vote_bits(&raw, REPEAT))
    }
}

/// Recover a watermark from a carrier.
///
/// `q` must equal the strength used at embed time; a mismatch degrades
/// silently into garbage or not-found. Never fails.
pub fn extract(carrier: &Carrier, key: &str, q: f64) -> Extraction {
    let planes = color::bgr_to_ycrcb(carrier);
    extract_planes(&planes, key, q)
}

/// [`extract`] on already-converted planes. Only Y is read.
pub fn extract_planes(planes: &YCrCbPlanes, key: &str, q: f64) -> Extraction {
    if planes.check_shape().is_err() {
        return Extraction::not_found(NotFoundReason::InputShape, Vec::new(), -1);
    }
    if check_strength(q).is_err() {
        return Extraction::not_found(NotFoundReason::InvalidStrength, Vec::new(), -1);
    }

    let luma = LumaPlane::from_plane(&planes.y, planes.width, planes.height);
    let num_blocks = luma.num_blocks();
    if num_blocks == 0 {
        return Extraction::not_found(NotFoundReason::NoBlocks, Vec::new(), -1);
    }

    let mut reader = SlotReader {
        luma: &luma,
        perm: block_permutation(key, num_blocks),
        cursor: 0,
        q,
    };

    // Header phase.
    let Some(header_bits) = reader.read_bits(HEADER_BITS) else {
        return Extraction::not_found(NotFoundReason::HeaderTruncated, Vec::new(), -1);
    };
    let Some(declared) = frame::header_length(&header_bits) else {
        return Extraction::not_found(NotFoundReason::HeaderTruncated, header_bits, -1);
    };
    let n = declared as usize;
    debug!("header declares {n} bytes ({num_blocks} blocks available)");

    // Payload phase.
    let Some(payload_bits) = reader.read_bits(8 * n) else {
        return Extraction::not_found(NotFoundReason::PayloadTruncated, header_bits, i32::from(declared));
    };
    let mut all_bits = header_bits.clone();
    all_bits.extend_from_slice(&payload_bits);

    match frame::decode_bits(&all_bits) {
        Some(text) => Extraction {
            text: Some(text),
            header_bits,
            declared_length: i32::from(declared),
            status: ExtractStatus::Decoded,
        },
        None => Extraction::not_found(NotFoundReason::InvalidUtf8, header_bits, i32::from(declared)),
    }
}

/// Recovered text, or `None` if no watermark was found.
pub fn extract_text(carrier: &Carrier, key: &str, q: f64) -> Option<String> {
    extract(carrier, key, q).text
}
