/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use std::fmt::{Debug, Formatter};
use std::path::PathBuf;

use snx::{SnEncodeErrors, SnErrors};

/// Errors the converter can run into
pub enum BinErrors {
    /// The input file has no extension or one we cannot convert
    UnsupportedFormat(String),
    /// The output path already exists, it is never overwritten
    OutputExists(PathBuf),
    IoErrors(std::io::Error),
    PngDecodeErrors(png::DecodingError),
    PngEncodeErrors(png::EncodingError),
    SnDecodeErrors(SnErrors),
    SnEncodeErrors(SnEncodeErrors),
    GenericStatic(&'static str)
}

impl Debug for BinErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            BinErrors::UnsupportedFormat(file) => {
                writeln!(
                    f,
                    "Cannot tell a conversion direction from {file:?}, expected a `.png` or `.sn` input"
                )
            }
            BinErrors::OutputExists(path) => {
                writeln!(
                    f,
                    "Output file {path:?} already exists, refusing to overwrite it"
                )
            }
            BinErrors::IoErrors(err) => {
                writeln!(f, "I/O error {err:?}")
            }
            BinErrors::PngDecodeErrors(err) => {
                writeln!(f, "Could not decode PNG input: {err}")
            }
            BinErrors::PngEncodeErrors(err) => {
                writeln!(f, "Could not encode PNG output: {err}")
            }
            BinErrors::SnDecodeErrors(err) => {
                writeln!(f, "Could not decode SN input: {err:?}")
            }
            BinErrors::SnEncodeErrors(err) => {
                writeln!(f, "Could not encode SN output: {err:?}")
            }
            BinErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl From<std::io::Error> for BinErrors {
    fn from(value: std::io::Error) -> Self {
        BinErrors::IoErrors(value)
    }
}

impl From<png::DecodingError> for BinErrors {
    fn from(value: png::DecodingError) -> Self {
        BinErrors::PngDecodeErrors(value)
    }
}

impl From<png::EncodingError> for BinErrors {
    fn from(value: png::EncodingError) -> Self {
        BinErrors::PngEncodeErrors(value)
    }
}

impl From<SnErrors> for BinErrors {
    fn from(value: SnErrors) -> Self {
        BinErrors::SnDecodeErrors(value)
    }
}

impl From<SnEncodeErrors> for BinErrors {
    fn from(value: SnEncodeErrors) -> Self {
        BinErrors::SnEncodeErrors(value)
    }
}
