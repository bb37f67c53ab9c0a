/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Byte-exact checks of the SN file layout and rejection of malformed
//! files

use snx::{SnDecoder, SnErrors};
use snx_core::options::DecoderOptions;

use crate::{decode_rgba, encode_rgba};

const MAGIC: [u8; 8] = *b"SNxVH0.1";

const RED: [u8; 4] = [255, 0, 0, 255];
const BLUE: [u8; 4] = [0, 0, 255, 255];

fn rgba_buffer(pixels: &[[u8; 4]]) -> Vec<u8> {
    pixels.iter().flatten().copied().collect()
}

#[test]
fn solid_image_encodes_to_minimal_file() {
    // 2x2, all red. Every pixel after the first predicts correctly via
    // the fallback, the payload is one flushed run plus padding.
    let sn = encode_rgba(2, 2, &rgba_buffer(&[RED, RED, RED, RED]));

    let mut expected = Vec::new();
    expected.extend_from_slice(&MAGIC);
    expected.extend_from_slice(&[2, 0, 2, 0]);
    expected.extend_from_slice(&[0, 0, 0]);
    expected.push(1);
    expected.extend_from_slice(&RED);
    // run of 4, value 3 encodes as the chunk `011`, zero padded
    expected.push(0b0110_0000);

    assert_eq!(sn, expected);
}

#[test]
fn single_miss_encodes_ranked_residual() {
    // 2x2, red except the bottom right pixel. The miss ranks behind
    // the guess in the candidate list, one unary bit, and since that
    // is the last candidate slot the run counter restarts at zero.
    let sn = encode_rgba(2, 2, &rgba_buffer(&[RED, RED, RED, BLUE]));

    let mut expected = Vec::new();
    expected.extend_from_slice(&MAGIC);
    expected.extend_from_slice(&[2, 0, 2, 0]);
    expected.extend_from_slice(&[0, 0, 0]);
    expected.push(2);
    expected.extend_from_slice(&RED);
    expected.extend_from_slice(&BLUE);
    // run of 3 (`010`) then one unary bit for the miss
    expected.push(0b0101_0000);

    assert_eq!(sn, expected);
    assert_eq!(sn[15], 2);

    let (_, _, decoded) = decode_rgba(&sn);
    assert_eq!(decoded, rgba_buffer(&[RED, RED, RED, BLUE]));
}

#[test]
fn header_carries_dimensions_and_palette_length() {
    let pixels = rgba_buffer(&[RED; 15]);
    let sn = encode_rgba(5, 3, &pixels);

    assert_eq!(&sn[0..8], &MAGIC);
    assert_eq!(u16::from_le_bytes([sn[8], sn[9]]), 5);
    assert_eq!(u16::from_le_bytes([sn[10], sn[11]]), 3);
    assert_eq!(&sn[12..15], &[0, 0, 0]);
    assert_eq!(sn[15], 1);
}

#[test]
fn wrong_magic_is_rejected() {
    let mut sn = encode_rgba(2, 2, &rgba_buffer(&[RED; 4]));
    sn[0] = b'X';

    let result = SnDecoder::new(&sn).decode();
    assert!(matches!(result, Err(SnErrors::WrongMagicBytes)));
}

#[test]
fn truncated_header_is_rejected() {
    let result = SnDecoder::new(&MAGIC).decode();
    assert!(matches!(result, Err(SnErrors::MalformedHeader(_))));
}

#[test]
fn truncated_palette_is_rejected() {
    let mut sn = Vec::new();
    sn.extend_from_slice(&MAGIC);
    sn.extend_from_slice(&[1, 0, 1, 0, 0, 0, 0]);
    // claims 4 entries but carries none
    sn.push(4);

    let result = SnDecoder::new(&sn).decode();
    assert!(matches!(result, Err(SnErrors::MalformedHeader(_))));
}

#[test]
fn duplicate_palette_entries_are_rejected() {
    let mut sn = Vec::new();
    sn.extend_from_slice(&MAGIC);
    sn.extend_from_slice(&[1, 0, 1, 0, 0, 0, 0]);
    sn.push(2);
    sn.extend_from_slice(&RED);
    sn.extend_from_slice(&RED);

    let result = SnDecoder::new(&sn).decode();
    assert!(matches!(result, Err(SnErrors::MalformedHeader(_))));
}

#[test]
fn dimension_limits_are_respected() {
    let pixels = rgba_buffer(&[RED; 20 * 2]);
    let sn = encode_rgba(20, 2, &pixels);

    let options = DecoderOptions::default().set_max_width(10);
    let result = SnDecoder::new_with_options(&sn, options).decode();

    assert!(matches!(result, Err(SnErrors::LimitExceeded(..))));
}

#[test]
fn missing_payload_is_lenient_by_default_and_strict_on_request() {
    // a valid header for a 2x2 single color image with no payload at all
    let mut sn = Vec::new();
    sn.extend_from_slice(&MAGIC);
    sn.extend_from_slice(&[2, 0, 2, 0, 0, 0, 0]);
    sn.push(1);
    sn.extend_from_slice(&RED);

    // lenient decoding fills the image from the predictor
    let (_, _, pixels) = decode_rgba(&sn);
    assert_eq!(pixels, rgba_buffer(&[RED; 4]));

    let options = DecoderOptions::default().set_strict_mode(true);
    let result = SnDecoder::new_with_options(&sn, options).decode();
    assert!(matches!(result, Err(SnErrors::InsufficientBits(4))));
}

#[test]
fn nonzero_reserved_bytes_fail_strict_mode_only() {
    let mut sn = encode_rgba(2, 2, &rgba_buffer(&[RED; 4]));
    sn[13] = 7;

    assert!(SnDecoder::new(&sn).decode().is_ok());

    let options = DecoderOptions::default().set_strict_mode(true);
    let result = SnDecoder::new_with_options(&sn, options).decode();
    assert!(matches!(result, Err(SnErrors::MalformedHeader(_))));
}

#[test]
fn empty_image_round_trips() {
    let sn = encode_rgba(0, 0, &[]);

    assert_eq!(sn.len(), 16);
    assert_eq!(sn[15], 0);

    let (width, height, pixels) = decode_rgba(&sn);
    assert_eq!((width, height), (0, 0));
    assert!(pixels.is_empty());
}
