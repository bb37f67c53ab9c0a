/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Integration tests for the SN codec
//!
//! Format level assertions live in `format`, byte-exact files for tiny
//! hand-checked images plus malformed input handling. The `roundtrip`
//! module covers the lossless property over generated images together
//! with determinism and the palette order search.

#![allow(unused)]

use snx::{SnDecoder, SnEncoder};
use snx_core::colorspace::ColorSpace;
use snx_core::options::EncoderOptions;

mod format;
mod roundtrip;

/// Encode an RGBA buffer with default settings
pub fn encode_rgba(width: usize, height: usize, rgba: &[u8]) -> Vec<u8> {
    let options = EncoderOptions::new(width, height, ColorSpace::RGBA);
    SnEncoder::new(rgba, options).encode().unwrap()
}

/// Decode an SN file into `(width, height, rgba)`
pub fn decode_rgba(sn: &[u8]) -> (usize, usize, Vec<u8>) {
    let mut decoder = SnDecoder::new(sn);
    let pixels = decoder.decode().unwrap();
    let (width, height) = decoder.dimensions().unwrap();
    (width, height, pixels)
}
