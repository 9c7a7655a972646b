// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Keyed QIM watermark codec.
//!
//! The payload is framed as a 16-bit length plus UTF-8 bytes, each bit is
//! written into [`REPEAT`] 8×8 luma blocks chosen by a key-seeded
//! permutation, and each block carries its bit in the parity of the
//! quantized DCT coefficient at [`TAP`].
//!
//! # Protocol constants
//!
//! [`REPEAT`], [`HEADER_BITS`] and [`TAP`] are not signalled in band. An
//! extractor only decodes marks written with the same values (and the same
//! strength `q`).

pub mod capacity;
pub mod error;
pub mod frame;
pub mod permute;
mod pipeline;
pub mod qim;
pub mod vote;

pub use error::{MarkError, Result};
pub use pipeline::{
    embed, embed_planes, extract, extract_planes, extract_text, ExtractStatus, Extraction,
    NotFoundReason,
};

/// Copies written per framed bit (majority vote on extract).
pub const REPEAT: usize = 9;

/// Header width in bits: big-endian u16 payload length.
pub const HEADER_BITS: usize = 16;

/// (row, column) of the DCT coefficient carrying the bit in every block.
pub const TAP: (usize, usize) = (3, 2);

/// Natural-order index of [`TAP`] within an 8×8 coefficient block.
pub const TAP_INDEX: usize = TAP.0 * 8 + TAP.1;
