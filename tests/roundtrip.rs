// Copyright (c) 2026 Christoph Gaffga
// SPDX-License-Identifier: GPL-3.0-only

//! Round-trip integration tests for still-image embed/extract.

use qimark_core::image::color::bgr_to_ycrcb;
use qimark_core::mark::{embed_planes, extract_planes};
use qimark_core::{
    block_count, embed, extract, extract_text, max_text_bytes, psnr, required_slots, Carrier,
    ExtractStatus, Interpolation, MarkError, NotFoundReason, UpscaleConfig,
};

/// Deterministic photo-like carrier: diagonal ramp plus hashed texture,
/// kept away from 0/255 so nothing clips.
fn synthetic_photo(width: usize, height: usize, seed: u64) -> Carrier {
    let mut data = Vec::with_capacity(width * height * 3);
    for row in 0..height as u64 {
        for col in 0..width as u64 {
            let x = (row * 73_856_093) ^ (col * 19_349_663) ^ (seed * 83_492_791);
            let n = (x % 41) as u8;
            let base = 60 + ((row + col) % 80) as u8;
            data.extend_from_slice(&[base + n, base + n / 2 + 10, base + 20 - n / 3]);
        }
    }
    Carrier::from_bgr(width, height, data).unwrap()
}

#[test]
fn roundtrip_basic() {
    let cover = synthetic_photo(256, 256, 1);
    let marked = embed(&cover, "HI", "secret", 8.0).unwrap();
    let ex = extract(&marked, "secret", 8.0);
    assert_eq!(ex.status, ExtractStatus::Decoded);
    assert_eq!(ex.text.as_deref(), Some("HI"));
    assert_eq!(ex.declared_length, 2);
    assert_eq!(ex.header_bit_string(), "0000000000000010");
}

#[test]
fn roundtrip_unicode() {
    let cover = synthetic_photo(384, 384, 1);
    let message = "Grüße 🔐";
    let marked = embed(&cover, message, "unicode-key", 8.0).unwrap();
    assert_eq!(extract_text(&marked, "unicode-key", 8.0).as_deref(), Some(message));
}

#[test]
fn roundtrip_unaligned_dimensions() {
    // 301x257 pads to 304x264: 38 x 33 blocks.
    let cover = synthetic_photo(301, 257, 1);
    assert_eq!(block_count(301, 257), 38 * 33);
    let marked = embed(&cover, "padded edges", "edge", 8.0).unwrap();
    assert_eq!((marked.width(), marked.height()), (301, 257));
    assert_eq!(extract_text(&marked, "edge", 8.0).as_deref(), Some("padded edges"));
}

#[test]
fn hi_capacity_example() {
    assert_eq!(required_slots(2), 288);

    let small = synthetic_photo(128, 128, 1);
    assert_eq!(
        embed(&small, "HI", "k", 8.0),
        Err(MarkError::Capacity { needed: 288, available: 256 })
    );

    let large = synthetic_photo(256, 256, 1);
    assert!(embed(&large, "HI", "k", 8.0).is_ok());
}

#[test]
fn capacity_boundary_exact_fit_succeeds() {
    // 16 x 18 blocks = 288 = required slots for "HI".
    let cover = synthetic_photo(128, 144, 1);
    assert_eq!(block_count(128, 144), 288);
    let marked = embed(&cover, "HI", "boundary", 8.0).unwrap();
    assert_eq!(extract_text(&marked, "boundary", 8.0).as_deref(), Some("HI"));
}

#[test]
fn capacity_boundary_one_short_fails() {
    // 7 x 41 blocks = 287.
    let cover = synthetic_photo(56, 328, 1);
    assert_eq!(
        embed(&cover, "HI", "boundary", 8.0),
        Err(MarkError::Capacity { needed: 288, available: 287 })
    );
}

#[test]
fn max_text_bytes_is_exact() {
    let cover = synthetic_photo(256, 256, 2);
    let max = max_text_bytes(256, 256).unwrap();
    assert_eq!(max, 12);
    let marked = embed(&cover, &"m".repeat(max), "k", 8.0).unwrap();
    assert_eq!(extract_text(&marked, "k", 8.0), Some("m".repeat(max)));
    assert!(matches!(
        embed(&cover, &"m".repeat(max + 1), "k", 8.0),
        Err(MarkError::Capacity { .. })
    ));
}

#[test]
fn wrong_key_does_not_recover_text() {
    let cover = synthetic_photo(256, 256, 1);
    let marked = embed(&cover, "HI", "secret", 8.0).unwrap();
    for key in ["Secret", "secret2", "", "other", "x"] {
        let ex = extract(&marked, key, 8.0);
        assert_ne!(ex.text.as_deref(), Some("HI"), "key {key:?} recovered the text");
    }
}

#[test]
fn wrong_strength_does_not_recover_text() {
    let cover = synthetic_photo(256, 256, 1);
    let marked = embed(&cover, "HI", "secret", 8.0).unwrap();
    assert_ne!(extract_text(&marked, "secret", 12.0).as_deref(), Some("HI"));
}

#[test]
fn unmarked_carriers_never_panic() {
    for (w, h) in [(0, 0), (1, 1), (7, 9), (64, 64), (200, 120), (256, 256)] {
        let ex = extract(&synthetic_photo(w, h, 3), "secret", 8.0);
        assert_ne!(ex.status, ExtractStatus::Decoded, "{w}x{h} decoded {:?}", ex.text);
    }
    let tiny = extract(&synthetic_photo(7, 9, 3), "secret", 8.0);
    assert_eq!(tiny.status, ExtractStatus::NotFound(NotFoundReason::HeaderTruncated));
    assert_eq!(tiny.declared_length, -1);
}

#[test]
fn embedding_is_deterministic() {
    let cover = synthetic_photo(256, 256, 4);
    let a = embed(&cover, "HI", "secret", 8.0).unwrap();
    let b = embed(&cover, "HI", "secret", 8.0).unwrap();
    assert_eq!(a, b);
}

#[test]
fn marked_image_is_imperceptible() {
    let cover = synthetic_photo(256, 256, 1);
    let marked = embed(&cover, "HI", "secret", 8.0).unwrap();
    let db = psnr(&cover, &marked).unwrap();
    assert!(db > 40.0, "PSNR too low: {db:.2} dB");
    assert!(db < 99.0);
}

#[test]
fn survives_rgb_restorage() {
    let cover = synthetic_photo(256, 256, 1);
    let marked = embed(&cover, "HI", "secret", 8.0).unwrap();
    let restored = Carrier::from_rgb(256, 256, marked.to_rgb()).unwrap();
    assert_eq!(extract_text(&restored, "secret", 8.0).as_deref(), Some("HI"));
}

#[test]
fn survives_small_pixel_noise() {
    let cover = synthetic_photo(256, 256, 1);
    let marked = embed(&cover, "HI", "secret", 8.0).unwrap();
    let noisy: Vec<u8> = marked
        .as_bytes()
        .iter()
        .enumerate()
        .map(|(i, &v)| {
            let delta = ((i as u64 * 2_654_435_761) >> 7) % 3;
            (v as i32 + delta as i32 - 1).clamp(0, 255) as u8
        })
        .collect();
    let noisy = Carrier::from_bgr(256, 256, noisy).unwrap();
    assert_eq!(extract_text(&noisy, "secret", 8.0).as_deref(), Some("HI"));
}

#[test]
fn chroma_planes_untouched() {
    let cover = synthetic_photo(301, 257, 5);
    let mut planes = bgr_to_ycrcb(&cover);
    let before = planes.clone();
    embed_planes(&mut planes, "padded edges", "edge", 8.0).unwrap();
    assert_eq!(planes.cr, before.cr);
    assert_eq!(planes.cb, before.cb);
    assert_eq!(extract_planes(&planes, "edge", 8.0).text.as_deref(), Some("padded edges"));
}

#[test]
fn shape_errors_surface_at_construction() {
    assert!(matches!(
        Carrier::new(4, 4, 4, vec![0u8; 64]),
        Err(MarkError::InputShape { channels: 4, .. })
    ));
}

#[test]
fn roundtrip_after_upscale() {
    // 100x80 is too small for "HI"; scaled to 320x256 it holds it.
    let small = synthetic_photo(100, 80, 1);
    assert!(matches!(embed(&small, "HI", "secret", 8.0), Err(MarkError::Capacity { .. })));

    for interpolation in [Interpolation::Cubic, Interpolation::Lanczos] {
        let cfg = UpscaleConfig { min_size: 256, interpolation };
        let cover = cfg.apply(&small);
        assert_eq!((cover.width(), cover.height()), (320, 256));
        let marked = embed(&cover, "HI", "secret", 8.0).unwrap();
        assert_eq!(extract_text(&marked, "secret", 8.0).as_deref(), Some("HI"), "{interpolation:?}");
    }
}
