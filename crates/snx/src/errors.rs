/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// Errors possible during decoding and encoding
use core::fmt::{Debug, Display, Formatter};

use snx_core::bytestream::SnIoError;
use snx_core::colorspace::ColorSpace;

/// Possible errors that may occur during decoding
pub enum SnErrors {
    /// The image does not start with the SN magic bytes `SNxVH0.1`
    ///
    /// Indicates the input is not an SN file
    WrongMagicBytes,
    /// The header or palette section ended early or carries
    /// inconsistent values
    MalformedHeader(&'static str),
    /// The payload ended before every pixel was reconstructed
    ///
    /// Only raised in strict mode, the lenient path fills the missing
    /// pixels from the predictor. The argument is the number of pixels
    /// that were left unresolved.
    InsufficientBits(usize),
    /// A decoded dimension is above the configured limit
    ///
    /// # Arguments
    /// - name of the dimension
    /// - value found in the header
    /// - configured limit
    LimitExceeded(&'static str, usize, usize),
    /// Too small output size
    TooSmallOutput(usize, usize),
    /// Generic message that does not need heap allocation
    GenericStatic(&'static str),
    IoErrors(SnIoError)
}

impl Debug for SnErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SnErrors::WrongMagicBytes => {
                writeln!(f, "Wrong magic bytes, expected `SNxVH0.1` as image start")
            }
            SnErrors::MalformedHeader(reason) => {
                writeln!(f, "Malformed header: {reason}")
            }
            SnErrors::InsufficientBits(missing) => {
                writeln!(
                    f,
                    "Payload ended early, {missing} pixels could not be reconstructed"
                )
            }
            SnErrors::LimitExceeded(name, found, limit) => {
                writeln!(
                    f,
                    "Image {name} {found} is greater than the configured maximum {limit}"
                )
            }
            SnErrors::TooSmallOutput(expected, found) => {
                writeln!(
                    f,
                    "Too small output size, expected {expected}, but found {found}"
                )
            }
            SnErrors::GenericStatic(val) => {
                writeln!(f, "{val}")
            }
            SnErrors::IoErrors(value) => {
                writeln!(f, "I/O error {value:?}")
            }
        }
    }
}

impl From<SnIoError> for SnErrors {
    fn from(value: SnIoError) -> Self {
        SnErrors::IoErrors(value)
    }
}

/// Errors encountered during encoding
pub enum SnEncodeErrors {
    /// Unsupported colorspace
    ///
    /// The first argument is the colorspace encountered,
    /// the second argument is the list of supported colorspaces
    UnsupportedColorspace(ColorSpace, &'static [ColorSpace]),
    /// The dimensions cannot be encoded into the two byte width and
    /// height fields
    TooLargeDimensions(usize),
    /// The image holds more distinct colors after quantization than a
    /// palette can carry
    ///
    /// The argument is the number of colors that would be needed.
    PaletteOverflow(usize),
    /// The pixel buffer length does not match the dimensions
    ///
    /// # Arguments
    /// - expected buffer length
    /// - actual buffer length
    WrongInputSize(usize, usize),
    Generic(&'static str)
}

impl Debug for SnEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            SnEncodeErrors::UnsupportedColorspace(found, supported) => {
                writeln!(f, "Cannot encode image with colorspace {found:?} into SN, supported ones are {supported:?}")
            }
            SnEncodeErrors::TooLargeDimensions(found) => {
                writeln!(
                    f,
                    "Too large image dimensions {found}, SN can only encode images less than {}",
                    u16::MAX
                )
            }
            SnEncodeErrors::PaletteOverflow(found) => {
                writeln!(
                    f,
                    "Image needs {found} palette entries but SN can only store 255"
                )
            }
            SnEncodeErrors::WrongInputSize(expected, found) => {
                writeln!(
                    f,
                    "Expected a pixel buffer of {expected} bytes but found {found}"
                )
            }
            SnEncodeErrors::Generic(val) => {
                writeln!(f, "{val}")
            }
        }
    }
}

impl Display for SnErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

impl Display for SnEncodeErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        writeln!(f, "{self:?}")
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SnErrors {}

#[cfg(feature = "std")]
impl std::error::Error for SnEncodeErrors {}
