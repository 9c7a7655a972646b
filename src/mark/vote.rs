// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Hard majority voting.
//!
//! Two levels use it: the REPEAT copies of each framed bit inside one
//! carrier, and whole decoded texts across sampled video frames.

/// 1 if strictly more than half of `copies` are 1, else 0.
pub fn majority_bit(copies: &[u8]) -> u8 {
    let ones = copies.iter().filter(|&&b| b == 1).count();
    u8::from(ones > copies.len() / 2)
}

/// Vote each consecutive run of `repeat` raw bits down to one bit.
///
/// Raw bits are laid out bit-major: copies `0..repeat` of bit 0, then of
/// bit 1, and so on. A trailing partial run is ignored.
pub fn vote_bits(raw: &[u8], repeat: usize) -> Vec<u8> {
    if repeat == 0 {
        return Vec::new();
    }
    raw.chunks_exact(repeat).map(majority_bit).collect()
}

/// Frequency count of decoded texts.
///
/// Empty texts are not counted. The winner is the most frequent text; ties
/// go to the text seen first.
#[derive(Debug, Clone, Default)]
pub struct TextVote {
    /// (text, votes) in first-seen order.
    tally: Vec<(String, usize)>,
}

impl TextVote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one decoded text. Empty strings are ignored.
    pub fn add(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.tally.iter_mut().find(|(t, _)| t == text) {
            Some((_, votes)) => *votes += 1,
            None => self.tally.push((text.to_owned(), 1)),
        }
    }

    /// Most frequent text and its vote count.
    pub fn winner(&self) -> Option<(&str, usize)> {
        let mut best: Option<(&str, usize)> = None;
        for (text, votes) in &self.tally {
            if best.map_or(true, |(_, v)| *votes > v) {
                best = Some((text.as_str(), *votes));
            }
        }
        best
    }
}

impl<'a> FromIterator<&'a str> for TextVote {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut vote = TextVote::new();
        for text in iter {
            vote.add(text);
        }
        vote
    }
}
