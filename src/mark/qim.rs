// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Centered quantization index modulation at the block tap.
//!
//! A bit is carried by the parity of `k = round(c / q)`, where `c` is the tap
//! coefficient of an 8×8 block. When the parity is wrong, `k` moves one bin
//! toward the sign of `c` (up for `c >= 0`), so the change is at most `q`.
//!
//! Rounding is half-to-even on both sides.

use crate::dct;

use super::TAP_INDEX;

/// Nearest quantization index of `c` for step `q`.
#[inline]
pub fn quantization_index(c: f64, q: f64) -> f64 {
    (c / q).round_ties_even()
}

#[inline]
fn parity(k: f64) -> u8 {
    // rem_euclid keeps negative indices in {0, 1}; non-finite k maps to 0.
    k.rem_euclid(2.0) as u8
}

/// Quantize `c` so that its index parity equals `bit`.
pub fn qim_embed(c: f64, bit: u8, q: f64) -> f64 {
    debug_assert!(bit <= 1);
    let mut k = quantization_index(c, q);
    if parity(k) != bit {
        k += if c >= 0.0 { 1.0 } else { -1.0 };
    }
    k * q
}

/// Bit carried by `c`: parity of its nearest quantization index.
pub fn qim_decode(c: f64, q: f64) -> u8 {
    parity(quantization_index(c, q))
}

/// Embed `bit` into the tap coefficient of a pixel block, in place.
pub fn embed_block(block: &mut [f64; 64], bit: u8, q: f64) {
    let mut coeffs = dct::forward(block);
    coeffs[TAP_INDEX] = qim_embed(coeffs[TAP_INDEX], bit, q);
    *block = dct::inverse(&coeffs);
}

/// Decode the bit carried by a pixel block.
pub fn decode_block(block: &[f64; 64], q: f64) -> u8 {
    let coeffs = dct::forward(block);
    qim_decode(coeffs[TAP_INDEX], q)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{Rng, SeedableRng};
    use rand_chacha::ChaCha20Rng;

    #[test]
    fn known_values() {
        let q = 8.0;
        // 13/8 = 1.625 -> k = 2 (even). Bit 0 keeps it, bit 1 steps up.
        assert_eq!(qim_embed(13.0, 0, q), 16.0);
        assert_eq!(qim_embed(13.0, 1, q), 24.0);
        // -13/8 -> k = -2. Bit 1 steps away from zero to -3.
        assert_eq!(qim_embed(-13.0, 0, q), -16.0);
        assert_eq!(qim_embed(-13.0, 1, q), -24.0);
        // 0 -> k = 0; bit 1 goes to +1 since c >= 0.
        assert_eq!(qim_embed(0.0, 1, q), 8.0);
        assert_eq!(qim_embed(0.0, 0, q), 0.0);
    }

    #[test]
    fn ties_round_to_even() {
        assert_eq!(quantization_index(12.0, 8.0), 2.0); // 1.5 -> 2
        assert_eq!(quantization_index(20.0, 8.0), 2.0); // 2.5 -> 2
        assert_eq!(quantization_index(-12.0, 8.0), -2.0);
    }

    #[test]
    fn negative_indices_decode_by_parity() {
        assert_eq!(qim_decode(-8.0, 8.0), 1);
        assert_eq!(qim_decode(-16.0, 8.0), 0);
        assert_eq!(qim_decode(-24.0, 8.0), 1);
    }

    #[test]
    fn parity_matches_bit_and_nudge_is_at_most_one() {
        let mut rng = ChaCha20Rng::seed_from_u64(0x51_4D);
        for _ in 0..10_000 {
            let c: f64 = rng.gen_range(-2048.0..2048.0);
            let q: f64 = rng.gen_range(0.5..40.0);
            let bit: u8 = rng.gen_range(0..=1);

            let before = quantization_index(c, q);
            let out = qim_embed(c, bit, q);
            let after = quantization_index(out, q);

            assert_eq!(qim_decode(out, q), bit, "c={c} q={q} bit={bit}");
            assert!((after - before).abs() <= 1.0, "c={c} q={q}: {before} -> {after}");
            // Only moves away from zero (or stays).
            if after != before {
                assert_eq!((after - before).signum(), if c >= 0.0 { 1.0 } else { -1.0 });
            }
        }
    }

    #[test]
    fn embedding_is_unbiased_in_sign() {
        // Over inputs symmetric around (but excluding) zero, marked
        // coefficients stay symmetric.
        let q = 8.0;
        for bit in 0..=1u8 {
            let mut sum = 0.0;
            for i in 1..=500 {
                let c = i as f64 * 0.37;
                sum += qim_embed(c, bit, q) + qim_embed(-c, bit, q);
            }
            assert!(sum.abs() < 1e-9, "bit={bit} sum={sum}");
        }
    }

    #[test]
    fn block_roundtrip() {
        let mut block = [0.0f64; 64];
        for (i, p) in block.iter_mut().enumerate() {
            *p = 90.0 + ((i * 29) % 61) as f64;
        }
        for bit in 0..=1u8 {
            let mut marked = block;
            embed_block(&mut marked, bit, 8.0);
            assert_eq!(decode_block(&marked, 8.0), bit);
        }
    }

    #[test]
    fn block_survives_integer_rounding() {
        let mut block = [0.0f64; 64];
        for (i, p) in block.iter_mut().enumerate() {
            *p = 60.0 + ((i * 17) % 97) as f64;
        }
        for bit in 0..=1u8 {
            let mut marked = block;
            embed_block(&mut marked, bit, 8.0);
            for p in marked.iter_mut() {
                *p = p.round();
            }
            assert_eq!(decode_block(&marked, 8.0), bit);
        }
    }

    #[test]
    fn only_tap_changes_in_transform_domain() {
        let mut block = [0.0f64; 64];
        for (i, p) in block.iter_mut().enumerate() {
            *p = ((i * 7) % 23) as f64 * 4.0;
        }
        let before = dct::forward(&block);
        embed_block(&mut block, 1, 10.0);
        let after = dct::forward(&block);
        for i in 0..64 {
            if i != TAP_INDEX {
                assert!((before[i] - after[i]).abs() < 1e-9, "coeff {i} moved");
            }
        }
    }
}
