// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Key-derived block permutation.
//!
//! The key is hashed with SHA-256 and the first four digest bytes, read
//! big-endian, seed a 32-bit Mersenne Twister (MT19937, `init_genrand`).
//! A Fisher-Yates shuffle then permutes `0..num_blocks`: for `i` from
//! `n - 1` down to `1`, `j` is drawn uniformly from `0..=i` by masked
//! rejection sampling on `next_u32`.
//!
//! # Cross-platform portability
//!
//! Seed law, generator and draw procedure are all part of the contract
//! between embedder and extractor: any change reorders the write slots and
//! existing marks stop decoding. The draw uses `u32` arithmetic only, so the
//! result does not depend on the width of `usize`. The sequence is the same
//! one NumPy's legacy `RandomState(seed).permutation(n)` produces.

use rand_mt::Mt;
use sha2::{Digest, Sha256};

/// Derive the 32-bit permutation seed from a key.
pub fn seed_from_key(key: &str) -> u32 {
    let digest = Sha256::digest(key.as_bytes());
    u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
}

/// Uniform draw from `0..=max` by masked rejection.
fn draw_bounded(rng: &mut Mt, max: u32) -> u32 {
    if max == 0 {
        return 0;
    }
    let mut mask = max;
    mask |= mask >> 1;
    mask |= mask >> 2;
    mask |= mask >> 4;
    mask |= mask >> 8;
    mask |= mask >> 16;
    loop {
        let value = rng.next_u32() & mask;
        if value <= max {
            return value;
        }
    }
}

/// Permutation of `0..n` from an explicit seed.
pub fn permutation_from_seed(seed: u32, n: usize) -> Vec<usize> {
    debug_assert!(n <= u32::MAX as usize + 1);
    let mut rng = Mt::new(seed);
    let mut order: Vec<usize> = (0..n).collect();
    for i in (1..n).rev() {
        let j = draw_bounded(&mut rng, i as u32) as usize;
        order.swap(i, j);
    }
    order
}

/// Map from write position to block index for `key` over `num_blocks` blocks.
///
/// Bit-identical for identical `(key, num_blocks)` on every platform.
pub fn block_permutation(key: &str, num_blocks: usize) -> Vec<usize> {
    permutation_from_seed(seed_from_key(key), num_blocks)
}
