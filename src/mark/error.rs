// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Error types for watermark embedding.
//!
//! [`MarkError`] only covers embed-time misuse. Extraction never fails: every
//! anomaly there collapses into a "not found" outcome (see
//! [`ExtractStatus`](crate::mark::ExtractStatus)).

use thiserror::Error;

/// Result type alias for watermark operations.
pub type Result<T> = std::result::Result<T, MarkError>;

/// Errors that can occur while embedding a watermark.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum MarkError {
    /// The raster is not H×W×3, or a buffer or plane length does not match
    /// its shape.
    #[error("input shape mismatch: {channels} channel(s) and {len} bytes for {width}x{height}")]
    InputShape {
        width: usize,
        height: usize,
        channels: usize,
        len: usize,
    },

    /// The UTF-8 encoded text exceeds the 16-bit length header.
    #[error("watermark text too long: {len} bytes (max 65535)")]
    PayloadTooLarge { len: usize },

    /// The carrier has no 8×8 block at all.
    #[error("image too small to embed watermark")]
    CarrierTooSmall,

    /// The framed message needs more write slots than the carrier has blocks.
    #[error("message too large: need {needed} blocks, have {available}")]
    Capacity { needed: usize, available: usize },

    /// The quantization step is not a finite positive number.
    #[error("invalid strength {0}: quantization step must be finite and > 0")]
    InvalidStrength(f64),
}
