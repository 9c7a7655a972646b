// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! # qimark-core
//!
//! Pure-Rust invisible text watermarking for 8-bit images and video frames.
//!
//! A short UTF-8 message is written into the luma plane of a BGR raster:
//! each framed bit goes into nine 8×8 blocks picked by a key-seeded
//! permutation, by quantization index modulation (QIM) of one mid-frequency
//! DCT coefficient per block. Extraction repeats the placement with the same
//! key and majority-votes the copies. The mark survives lossless re-storage
//! and mild re-encoding; the key controls placement only, the payload is not
//! encrypted.
//!
//! File and container I/O are left to the caller: the crate works on
//! in-memory [`Carrier`] rasters.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use qimark_core::{embed, extract_text, Carrier};
//!
//! let cover = Carrier::from_bgr(width, height, bgr_bytes)?;
//! let marked = embed(&cover, "owner: alice", "shared-key", 8.0)?;
//! assert_eq!(extract_text(&marked, "shared-key", 8.0).as_deref(), Some("owner: alice"));
//! ```

pub mod config;
pub mod dct;
pub mod image;
pub mod mark;
pub mod video;

pub use config::{Strength, UpscaleConfig, VideoConfig};
pub use image::quality::{psnr, PSNR_IDENTICAL};
pub use image::resize::{upscale_if_small, Interpolation};
pub use image::Carrier;
pub use mark::capacity::{block_count, max_text_bytes, required_slots};
pub use mark::permute::block_permutation;
pub use mark::{embed, extract, extract_text, ExtractStatus, Extraction, MarkError, NotFoundReason};
pub use mark::{HEADER_BITS, REPEAT, TAP};
pub use video::{embed_frames, extract_frames, FrameOutcome, FrameResult, VideoEmbedding, VideoExtraction};
