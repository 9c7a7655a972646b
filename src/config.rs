// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Configuration types and defaults.
//!
//! Everything here is plain data with `serde` support so a front end can
//! load it from JSON or TOML. Missing fields fall back to the defaults.

use serde::{Deserialize, Serialize};

use crate::image::resize::{upscale_if_small, Interpolation};
use crate::image::Carrier;
use crate::mark::error::{MarkError, Result};

/// Default quantization step for still images.
pub const DEFAULT_IMAGE_STRENGTH: f64 = 8.0;

/// Default quantization step for video frames (lossy codecs need more margin).
pub const DEFAULT_VIDEO_STRENGTH: f64 = 12.0;

/// Default frame cadence: mark / sample every Nth frame.
pub const DEFAULT_FRAME_EVERY: usize = 5;

/// Default cap on frames sampled during video extraction.
pub const DEFAULT_MAX_SAMPLES: usize = 60;

/// Default minimum shorter side before embedding, in pixels.
pub const DEFAULT_MIN_SIZE: usize = 512;

/// Validated quantization step `q` (finite, > 0).
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub struct Strength(f64);

impl Strength {
    /// # Errors
    /// [`MarkError::InvalidStrength`] if `q` is not finite and positive.
    pub fn new(q: f64) -> Result<Self> {
        if q.is_finite() && q > 0.0 {
            Ok(Self(q))
        } else {
            Err(MarkError::InvalidStrength(q))
        }
    }

    pub fn get(self) -> f64 {
        self.0
    }
}

impl Default for Strength {
    fn default() -> Self {
        Self(DEFAULT_IMAGE_STRENGTH)
    }
}

impl TryFrom<f64> for Strength {
    type Error = MarkError;

    fn try_from(q: f64) -> Result<Self> {
        Self::new(q)
    }
}

impl From<Strength> for f64 {
    fn from(s: Strength) -> f64 {
        s.0
    }
}

/// Settings for per-frame video embedding and extraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoConfig {
    /// Quantization step; must match between embed and extract.
    pub strength: Strength,
    /// Mark (and sample) frames whose index is a multiple of this.
    pub every: usize,
    /// Maximum number of frames sampled on extraction.
    pub max_samples: usize,
}

impl Default for VideoConfig {
    fn default() -> Self {
        Self {
            strength: Strength(DEFAULT_VIDEO_STRENGTH),
            every: DEFAULT_FRAME_EVERY,
            max_samples: DEFAULT_MAX_SAMPLES,
        }
    }
}

/// Settings for upscaling small still images before embedding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UpscaleConfig {
    /// Minimum shorter side in pixels; 0 disables upscaling.
    pub min_size: usize,
    pub interpolation: Interpolation,
}

impl Default for UpscaleConfig {
    fn default() -> Self {
        Self {
            min_size: DEFAULT_MIN_SIZE,
            interpolation: Interpolation::Cubic,
        }
    }
}

impl UpscaleConfig {
    /// Upscale `carrier` per these settings; see [`upscale_if_small`].
    pub fn apply(&self, carrier: &Carrier) -> Carrier {
        upscale_if_small(carrier, self.min_size, self.interpolation)
    }
}
