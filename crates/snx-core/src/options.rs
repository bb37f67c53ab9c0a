/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoder and encoder options
//!
//! The same `DecoderOptions` value can be reused for every decoder in the
//! family, options a decoder does not understand are simply ignored.

use crate::colorspace::ColorSpace;

/// Decoder options
///
/// Limits protect against untrusted input, e.g. width and height
/// limits prevent out of memory attacks from tiny malicious files.
#[derive(Debug, Copy, Clone)]
pub struct DecoderOptions {
    max_width:   usize,
    max_height:  usize,
    strict_mode: bool
}

impl Default for DecoderOptions {
    fn default() -> Self {
        DecoderOptions {
            max_width:   1 << 14,
            max_height:  1 << 14,
            strict_mode: false
        }
    }
}

impl DecoderOptions {
    /// Get the maximum width configured for which the decoder
    /// should not try to decode images greater than that width
    pub const fn max_width(&self) -> usize {
        self.max_width
    }

    /// Get the maximum height configured for which the decoder should
    /// not try to decode images greater than that height
    pub const fn max_height(&self) -> usize {
        self.max_height
    }

    /// Whether the decoder should error out on recoverable
    /// irregularities instead of logging a warning
    pub const fn strict_mode(&self) -> bool {
        self.strict_mode
    }

    /// Set the maximum image width the decoder accepts
    pub const fn set_max_width(mut self, width: usize) -> Self {
        self.max_width = width;
        self
    }

    /// Set the maximum image height the decoder accepts
    pub const fn set_max_height(mut self, height: usize) -> Self {
        self.max_height = height;
        self
    }

    /// Set whether recoverable irregularities abort decoding
    pub const fn set_strict_mode(mut self, yes: bool) -> Self {
        self.strict_mode = yes;
        self
    }
}

/// Encoder options
///
/// Carries the details about the raw pixel buffer handed to an
/// encoder, namely its dimensions and colorspace.
#[derive(Debug, Copy, Clone)]
pub struct EncoderOptions {
    width:      usize,
    height:     usize,
    colorspace: ColorSpace
}

impl Default for EncoderOptions {
    fn default() -> Self {
        EncoderOptions {
            width:      0,
            height:     0,
            colorspace: ColorSpace::RGBA
        }
    }
}

impl EncoderOptions {
    /// Create new encoder options describing a pixel buffer
    pub const fn new(width: usize, height: usize, colorspace: ColorSpace) -> EncoderOptions {
        EncoderOptions {
            width,
            height,
            colorspace
        }
    }

    /// Get the width of the image to be encoded
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Get the height of the image to be encoded
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Get the colorspace of the pixel buffer to be encoded
    pub const fn colorspace(&self) -> ColorSpace {
        self.colorspace
    }

    /// Set the image width
    pub const fn set_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    /// Set the image height
    pub const fn set_height(mut self, height: usize) -> Self {
        self.height = height;
        self
    }

    /// Set the colorspace of the pixel buffer
    pub const fn set_colorspace(mut self, colorspace: ColorSpace) -> Self {
        self.colorspace = colorspace;
        self
    }
}
