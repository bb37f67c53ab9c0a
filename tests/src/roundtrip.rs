/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Round trip, determinism and palette order search properties

use nanorand::{Rng, WyRand};
use snx::{QuantizeMode, SnEncoder};
use snx_core::colorspace::ColorSpace;
use snx_core::options::EncoderOptions;

use crate::{decode_rgba, encode_rgba};

/// A seeded random image drawn from a fixed set of colors
fn random_image(seed: u64, width: usize, height: usize, colors: &[[u8; 4]]) -> Vec<u8> {
    let mut rng = WyRand::new_seed(seed);
    let mut rgba = Vec::with_capacity(width * height * 4);

    for _ in 0..width * height {
        let pick = rng.generate_range(0..colors.len() as u64) as usize;
        rgba.extend_from_slice(&colors[pick]);
    }
    rgba
}

const COLORS: [[u8; 4]; 5] = [
    [0, 0, 0, 255],
    [255, 255, 255, 255],
    [255, 0, 0, 255],
    [0, 128, 255, 255],
    [16, 16, 16, 128]
];

#[test]
fn images_within_palette_capacity_round_trip_exactly() {
    for (seed, (width, height)) in [(1, (31, 17)), (2, (64, 64)), (3, (1, 40)), (4, (40, 1))] {
        let pixels = random_image(seed, width, height, &COLORS);
        let sn = encode_rgba(width, height, &pixels);

        let (w, h, decoded) = decode_rgba(&sn);
        assert_eq!((w, h), (width, height), "seed {seed}");
        assert_eq!(decoded, pixels, "seed {seed}");
    }
}

#[test]
fn encoding_is_deterministic() {
    let pixels = random_image(9, 33, 21, &COLORS);

    let first = encode_rgba(33, 21, &pixels);
    let second = encode_rgba(33, 21, &pixels);
    assert_eq!(first, second);
}

#[test]
fn quantized_images_re_encode_losslessly() {
    // more distinct colors than a palette can hold, the first encode
    // quantizes, after that the image is stable under the codec
    let mut rgba = Vec::new();
    for index in 0..30 * 20 {
        let noise = (index * 7) % 300;
        rgba.extend_from_slice(&[(noise % 256) as u8, (noise / 2) as u8, 40, 255]);
    }

    let sn = encode_rgba(30, 20, &rgba);
    let (_, _, quantized) = decode_rgba(&sn);
    assert_ne!(quantized, rgba);

    let sn_again = encode_rgba(30, 20, &quantized);
    let (_, _, stable) = decode_rgba(&sn_again);
    assert_eq!(stable, quantized);
}

#[test]
fn more_default_color_trials_never_grow_the_output() {
    let pixels = random_image(17, 48, 32, &COLORS);
    let options = EncoderOptions::new(48, 32, ColorSpace::RGBA);

    let mut previous: Option<usize> = None;
    for trials in 1..=6 {
        let mut encoder = SnEncoder::new(&pixels, options);
        encoder.set_default_color_trials(trials);
        let size = encoder.encode().unwrap().len();

        if let Some(previous) = previous {
            assert!(size <= previous, "{trials} trials grew the output");
        }
        previous = Some(size);
    }
}

#[test]
fn cluster_mode_collapses_near_colors() {
    let dominant = [10, 10, 10, 255];
    // distance 3 from the dominant color
    let near = [10, 13, 10, 255];

    let mut rgba = Vec::new();
    for index in 0..8 * 8 {
        rgba.extend_from_slice(if index % 9 == 0 { &near } else { &dominant });
    }

    let options = EncoderOptions::new(8, 8, ColorSpace::RGBA);
    let mut encoder = SnEncoder::new(&rgba, options);
    encoder.set_quantize_mode(QuantizeMode::Cluster {
        threshold:  5.0,
        max_colors: 255
    });
    let sn = encoder.encode().unwrap();

    // one palette entry, every pixel snapped to the dominant color
    assert_eq!(sn[15], 1);
    let (_, _, decoded) = decode_rgba(&sn);
    for px in decoded.chunks_exact(4) {
        assert_eq!(px, dominant);
    }
}

#[test]
fn palette_overflow_is_an_error() {
    let mut rgba = Vec::new();
    for index in 0..17 * 16u32 {
        rgba.extend_from_slice(&[(index % 256) as u8, (index / 256) as u8, 0, 255]);
    }

    let options = EncoderOptions::new(17, 16, ColorSpace::RGBA);
    let mut encoder = SnEncoder::new(&rgba, options);
    encoder.set_quantize_mode(QuantizeMode::Frequency {
        max_colors: usize::MAX
    });

    assert!(encoder.encode().is_err());
}
