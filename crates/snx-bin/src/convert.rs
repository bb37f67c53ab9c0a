/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The conversion driver
//!
//! The direction is picked from the input extension, `.png` inputs are
//! encoded to SN and `.sn` inputs are decoded back to PNG. When no
//! output path is given the input path with its extension swapped is
//! used. Output is written in one piece to a path that must not exist
//! yet, a failed conversion never leaves a partial file behind.

use std::ffi::OsStr;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::ArgMatches;
use log::info;
use snx::{QuantizeMode, SnDecoder, SnEncoder};
use snx_core::colorspace::ColorSpace;
use snx_core::options::{DecoderOptions, EncoderOptions};

use crate::errors::BinErrors;
use crate::png_io;

pub fn run(options: &ArgMatches) -> Result<(), BinErrors> {
    let input = options.get_one::<String>("in").unwrap();
    let in_path = Path::new(input);

    let extension = in_path
        .extension()
        .and_then(OsStr::to_str)
        .map(str::to_ascii_lowercase);

    match extension.as_deref() {
        Some("png") => encode_file(in_path, output_path(options, in_path, "sn"), options),
        Some("sn") => decode_file(in_path, output_path(options, in_path, "png"), options),
        _ => Err(BinErrors::UnsupportedFormat(input.clone()))
    }
}

fn output_path(options: &ArgMatches, in_path: &Path, extension: &str) -> PathBuf {
    options
        .get_one::<String>("out")
        .map(PathBuf::from)
        .unwrap_or_else(|| in_path.with_extension(extension))
}

fn encode_file(input: &Path, output: PathBuf, options: &ArgMatches) -> Result<(), BinErrors> {
    let contents = std::fs::read(input)?;
    let (width, height, rgba) = png_io::read_png(&contents)?;
    info!("Read {input:?}, {width} x {height} pixels");

    let mut encoder = SnEncoder::new(&rgba, EncoderOptions::new(width, height, ColorSpace::RGBA));

    let palette_size = options.get_one::<usize>("palette-size").copied();

    if let Some(&threshold) = options.get_one::<f32>("threshold") {
        encoder.set_quantize_mode(QuantizeMode::Cluster {
            threshold,
            max_colors: palette_size.unwrap_or(255)
        });
    } else if let Some(max_colors) = palette_size {
        encoder.set_quantize_mode(QuantizeMode::Frequency { max_colors });
    }
    encoder.set_default_color_trials(*options.get_one::<usize>("trials").unwrap());

    let sn = encoder.encode()?;

    write_new_file(&output, &sn)?;
    info!("Wrote {output:?} successfully, {} bytes", sn.len());
    Ok(())
}

fn decode_file(input: &Path, output: PathBuf, options: &ArgMatches) -> Result<(), BinErrors> {
    let contents = std::fs::read(input)?;

    let decoder_options = DecoderOptions::default()
        .set_max_width(*options.get_one::<usize>("max-width").unwrap())
        .set_max_height(*options.get_one::<usize>("max-height").unwrap())
        .set_strict_mode(options.get_flag("strict"));

    let mut decoder = SnDecoder::new_with_options(&contents, decoder_options);
    let pixels = decoder.decode()?;
    // dimensions are always present after a successful decode
    let (width, height) = decoder.dimensions().unwrap();
    info!("Read {input:?}, {width} x {height} pixels");

    let png = png_io::write_png(width, height, &pixels)?;

    write_new_file(&output, &png)?;
    info!("Wrote {output:?} successfully, {} bytes", png.len());
    Ok(())
}

/// Write `contents` to a path that must not already exist
fn write_new_file(path: &Path, contents: &[u8]) -> Result<(), BinErrors> {
    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|err| {
            if err.kind() == std::io::ErrorKind::AlreadyExists {
                BinErrors::OutputExists(path.to_owned())
            } else {
                BinErrors::IoErrors(err)
            }
        })?;

    file.write_all(contents)?;
    Ok(())
}
