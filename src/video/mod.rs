// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Per-frame drivers for video.
//!
//! The codec works on one raster at a time; these helpers apply it across a
//! sequence of decoded frames without knowing anything about the container.
//! Embedding marks every Nth frame. Extraction samples the same cadence and
//! votes on the decoded texts. A frame that fails is recorded as skipped and
//! never aborts the batch.

use log::{trace, warn};

use crate::config::VideoConfig;
use crate::image::Carrier;
use crate::mark::error::MarkError;
use crate::mark::vote::TextVote;
use crate::mark::{self, ExtractStatus, NotFoundReason};

/// What happened to one frame during embedding.
#[derive(Debug, Clone, PartialEq)]
pub enum FrameOutcome {
    /// The frame now carries the watermark.
    Embedded { index: usize },
    /// The frame is off-cadence and was copied through.
    PassedThrough { index: usize },
    /// Embedding failed; the original frame was copied through.
    Skipped { index: usize, reason: MarkError },
}

impl FrameOutcome {
    pub fn index(&self) -> usize {
        match self {
            Self::Embedded { index } | Self::PassedThrough { index } | Self::Skipped { index, .. } => *index,
        }
    }
}

/// Streaming embedder: feed frames in order, get marked frames back.
pub struct FrameEmbedder<'a> {
    text: &'a str,
    key: &'a str,
    config: VideoConfig,
    next_index: usize,
}

impl<'a> FrameEmbedder<'a> {
    pub fn new(text: &'a str, key: &'a str, config: VideoConfig) -> Self {
        Self { text, key, config, next_index: 0 }
    }

    fn on_cadence(&self, index: usize) -> bool {
        self.config.every > 0 && index % self.config.every == 0
    }

    /// Process the next frame.
    pub fn push(&mut self, frame: Carrier) -> (Carrier, FrameOutcome) {
        let index = self.next_index;
        self.next_index += 1;

        if !self.on_cadence(index) {
            return (frame, FrameOutcome::PassedThrough { index });
        }
        match mark::embed(&frame, self.text, self.key, self.config.strength.get()) {
            Ok(marked) => {
                trace!("frame {index}: embedded");
                (marked, FrameOutcome::Embedded { index })
            }
            Err(reason) => {
                warn!("frame {index}: skipped ({reason})");
                (frame, FrameOutcome::Skipped { index, reason })
            }
        }
    }
}

/// Marked frames plus one outcome per input frame.
#[derive(Debug, Clone)]
pub struct VideoEmbedding {
    pub frames: Vec<Carrier>,
    pub outcomes: Vec<FrameOutcome>,
}

impl VideoEmbedding {
    /// Number of frames that carry the watermark.
    pub fn embedded_count(&self) -> usize {
        self.outcomes
            .iter()
            .filter(|o| matches!(o, FrameOutcome::Embedded { .. }))
            .count()
    }
}

/// Embed `text` into every `config.every`-th frame.
pub fn embed_frames<I>(frames: I, text: &str, key: &str, config: &VideoConfig) -> VideoEmbedding
where
    I: IntoIterator<Item = Carrier>,
{
    let mut embedder = FrameEmbedder::new(text, key, *config);
    let mut out = VideoEmbedding { frames: Vec::new(), outcomes: Vec::new() };
    for frame in frames {
        let (frame, outcome) = embedder.push(frame);
        out.frames.push(frame);
        out.outcomes.push(outcome);
    }
    out
}

/// Result of extracting from one sampled frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameResult {
    Success { index: usize, text: String },
    Skipped { index: usize, reason: NotFoundReason },
}

/// Outcome of [`extract_frames`].
#[derive(Debug, Clone, Default)]
pub struct VideoExtraction {
    /// Most frequent non-empty text across sampled frames.
    pub text: Option<String>,
    /// Votes the winning text received.
    pub votes: usize,
    /// One entry per sampled frame, in frame order.
    pub results: Vec<FrameResult>,
}

fn extract_one(index: usize, frame: &Carrier, key: &str, q: f64) -> FrameResult {
    let ex = mark::extract(frame, key, q);
    match (ex.status, ex.text) {
        (ExtractStatus::Decoded, Some(text)) => FrameResult::Success { index, text },
        (ExtractStatus::NotFound(reason), _) => FrameResult::Skipped { index, reason },
        // Decoded always carries text.
        (ExtractStatus::Decoded, None) => FrameResult::Skipped { index, reason: NotFoundReason::InvalidUtf8 },
    }
}

/// Sample frames 0, every, 2·every, … (at most `max_samples`) and vote.
///
/// `every` is clamped to at least 1. Ties between equally frequent texts go
/// to the text decoded from the earliest frame.
pub fn extract_frames<I>(frames: I, key: &str, config: &VideoConfig) -> VideoExtraction
where
    I: IntoIterator<Item = Carrier>,
{
    let step = config.every.max(1);
    let q = config.strength.get();
    let sampled: Vec<(usize, Carrier)> = frames
        .into_iter()
        .enumerate()
        .step_by(step)
        .take(config.max_samples)
        .collect();

    #[cfg(feature = "parallel")]
    let results: Vec<FrameResult> = {
        use rayon::prelude::*;
        sampled
            .par_iter()
            .map(|(index, frame)| extract_one(*index, frame, key, q))
            .collect()
    };
    #[cfg(not(feature = "parallel"))]
    let results: Vec<FrameResult> = sampled
        .iter()
        .map(|(index, frame)| extract_one(*index, frame, key, q))
        .collect();

    let mut vote = TextVote::new();
    for result in &results {
        match result {
            FrameResult::Success { index, text } => {
                trace!("frame {index}: decoded {} bytes", text.len());
                vote.add(text);
            }
            FrameResult::Skipped { index, reason } => trace!("frame {index}: {reason:?}"),
        }
    }

    let (text, votes) = match vote.winner() {
        Some((t, v)) => (Some(t.to_owned()), v),
        None => (None, 0),
    };
    VideoExtraction { text, votes, results }
}
