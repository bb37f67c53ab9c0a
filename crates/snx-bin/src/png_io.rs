/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The PNG boundary
//!
//! PNG decoding and encoding is delegated wholesale to the `png`
//! crate, this module only widens whatever channel layout comes out of
//! it into the RGBA bytes the SN encoder expects.

use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};

use crate::errors::BinErrors;

/// Decode PNG bytes into `(width, height, rgba)` with 8-bit channels
pub fn read_png(data: &[u8]) -> Result<(usize, usize, Vec<u8>), BinErrors> {
    let mut decoder = Decoder::new(data);
    // expand palettes and low bit depths, drop 16 bit down to 8
    decoder.set_transformations(Transformations::EXPAND | Transformations::STRIP_16);

    let mut reader = decoder.read_info()?;
    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader.next_frame(&mut buf)?;
    buf.truncate(info.buffer_size());

    if info.bit_depth != BitDepth::Eight {
        return Err(BinErrors::GenericStatic("PNG sample depth was not reduced to 8 bits"));
    }

    let rgba = match info.color_type {
        ColorType::Rgba => buf,
        ColorType::Rgb => widen(&buf, 3, |px| [px[0], px[1], px[2], 255]),
        ColorType::Grayscale => widen(&buf, 1, |px| [px[0], px[0], px[0], 255]),
        ColorType::GrayscaleAlpha => widen(&buf, 2, |px| [px[0], px[0], px[0], px[1]]),
        // EXPAND already rewrote indexed images to RGB
        ColorType::Indexed => {
            return Err(BinErrors::GenericStatic("PNG palette was not expanded"))
        }
    };

    Ok((info.width as usize, info.height as usize, rgba))
}

fn widen(data: &[u8], channels: usize, expand: impl Fn(&[u8]) -> [u8; 4]) -> Vec<u8> {
    let mut rgba = Vec::with_capacity(data.len() / channels * 4);

    for px in data.chunks_exact(channels) {
        rgba.extend_from_slice(&expand(px));
    }
    rgba
}

/// Encode 8-bit RGBA pixels as PNG bytes
pub fn write_png(width: usize, height: usize, rgba: &[u8]) -> Result<Vec<u8>, BinErrors> {
    let mut out = Vec::new();

    let mut encoder = Encoder::new(&mut out, width as u32, height as u32);
    encoder.set_color(ColorType::Rgba);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder.write_header()?;
    writer.write_image_data(rgba)?;
    writer.finish()?;

    Ok(out)
}
