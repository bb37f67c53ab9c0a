/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec;
use alloc::vec::Vec;

use snx_core::bytestream::SnReader;
use snx_core::log::{trace, warn};
use snx_core::options::DecoderOptions;

use crate::bitstream::BitReader;
use crate::color::Color;
use crate::constants::SN_MAGIC;
use crate::errors::SnErrors;
use crate::grid::PixelGrid;
use crate::predictor::{candidates, neighbors, predict};

/// An SN format decoder
///
/// The decoder is initialized by calling `new`
/// and either of [`decode_headers`] to decode headers
/// or [`decode`] to return uncompressed pixels
///
/// Additional details of the compressed image like width, height and
/// the palette are accessible after decoding headers
///
/// [`decode_headers`]:SnDecoder::decode_headers
/// [`decode`]:SnDecoder::decode
pub struct SnDecoder<'a> {
    width:           usize,
    height:          usize,
    palette:         Vec<Color>,
    decoded_headers: bool,
    stream:          SnReader<'a>,
    options:         DecoderOptions
}

impl<'a> SnDecoder<'a> {
    /// Create a new SN format decoder with the default options
    ///
    /// # Arguments
    /// - `data`: The compressed SN data
    ///
    /// # Example
    ///
    /// ```no_run
    /// let mut decoder = snx::SnDecoder::new(&[]);
    /// // additional code
    /// ```
    pub fn new(data: &'a [u8]) -> SnDecoder<'a> {
        SnDecoder::new_with_options(data, DecoderOptions::default())
    }

    /// Create a new SN format decoder that obeys specified restrictions
    ///
    /// E.g. can be used to set width and height limits to prevent OOM
    /// attacks
    ///
    /// # Arguments
    /// - `data`: The compressed SN data
    /// - `options`: Decoder options that the decoder should respect
    ///
    /// # Example
    /// ```
    /// use snx_core::options::DecoderOptions;
    /// use snx::SnDecoder;
    /// // only decode images less than 10 in both width and height
    /// let options = DecoderOptions::default().set_max_width(10).set_max_height(10);
    ///
    /// let mut decoder = SnDecoder::new_with_options(&[], options);
    /// ```
    pub fn new_with_options(data: &'a [u8], options: DecoderOptions) -> SnDecoder<'a> {
        SnDecoder {
            width: 0,
            height: 0,
            palette: Vec::new(),
            decoded_headers: false,
            stream: SnReader::new(data),
            options
        }
    }

    /// Decode an SN header storing needed information into
    /// the decoder instance
    ///
    /// # Returns
    /// - On success: Nothing
    /// - On error: The error encountered when decoding headers,
    ///     an instance of [SnErrors]
    ///
    /// [SnErrors]:crate::errors::SnErrors
    pub fn decode_headers(&mut self) -> Result<(), SnErrors> {
        if self.decoded_headers {
            return Ok(());
        }

        // match magic bytes
        let magic = self.stream.read_fixed_bytes_or_error::<8>()?;

        if magic != SN_MAGIC {
            return Err(SnErrors::WrongMagicBytes);
        }

        // width + height + reserved + palette length
        if !self.stream.has(8) {
            return Err(SnErrors::MalformedHeader("truncated header"));
        }
        let width = usize::from(self.stream.get_u16_le());
        let height = usize::from(self.stream.get_u16_le());

        let reserved = self.stream.read_fixed_bytes_or_error::<3>()?;

        if reserved != [0; 3] {
            if self.options.strict_mode() {
                return Err(SnErrors::MalformedHeader("nonzero reserved bytes"));
            }
            warn!("Reserved header bytes are not zero, ignoring them");
        }
        let palette_length = usize::from(self.stream.read_u8());

        if width > self.options.max_width() {
            return Err(SnErrors::LimitExceeded(
                "width",
                width,
                self.options.max_width()
            ));
        }
        if height > self.options.max_height() {
            return Err(SnErrors::LimitExceeded(
                "height",
                height,
                self.options.max_height()
            ));
        }

        if !self.stream.has(palette_length * 4) {
            return Err(SnErrors::MalformedHeader("truncated palette"));
        }
        let mut palette = Vec::with_capacity(palette_length);

        for _ in 0..palette_length {
            let entry = Color::from_rgba(self.stream.read_fixed_bytes_or_error::<4>()?);

            // the candidate list grammar needs exactly one slot per
            // palette color, duplicates would desynchronize it
            if palette.contains(&entry) {
                return Err(SnErrors::MalformedHeader("duplicate palette entry"));
            }
            palette.push(entry);
        }

        if palette.is_empty() && width * height > 0 {
            return Err(SnErrors::MalformedHeader(
                "empty palette for a non-empty image"
            ));
        }

        self.width = width;
        self.height = height;
        self.palette = palette;

        trace!("Image width: {:?}", self.width);
        trace!("Image height: {:?}", self.height);
        trace!("Palette entries: {:?}", self.palette.len());
        self.decoded_headers = true;

        Ok(())
    }

    /// Return the width and height of the image
    ///
    /// Or none if the headers haven't been decoded
    pub const fn dimensions(&self) -> Option<(usize, usize)> {
        if self.decoded_headers {
            return Some((self.width, self.height));
        }
        None
    }

    /// Return the image palette, slot 0 first
    ///
    /// Or none if the headers haven't been decoded
    pub fn palette(&self) -> Option<&[Color]> {
        if self.decoded_headers {
            return Some(&self.palette);
        }
        None
    }

    /// Return the number of bytes required to hold the decoded image
    ///
    /// # Returns
    /// - `Some(usize)`: Minimum size for a buffer needed to decode the image
    /// - `None`: Indicates the headers were not decoded
    ///
    /// # Panics
    /// In case `width * height * 4` overflows a usize
    pub fn output_buffer_size(&self) -> Option<usize> {
        if self.decoded_headers {
            self.width
                .checked_mul(self.height)
                .unwrap()
                .checked_mul(4)
        } else {
            None
        }
    }

    /// Decode the bytes of an SN image, returning the uncompressed
    /// RGBA pixels or the error encountered during decoding
    ///
    /// The width and height can be accessed via [`dimensions`] after
    /// this call.
    ///
    /// [`dimensions`]:Self::dimensions
    pub fn decode(&mut self) -> Result<Vec<u8>, SnErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }
        let mut output = vec![0; self.output_buffer_size().unwrap()];

        self.decode_into(&mut output)?;

        Ok(output)
    }

    /// Decode a compressed SN image and store the RGBA pixels into the
    /// output buffer
    ///
    /// Returns an error if the buffer cannot hold the contents of the
    /// image
    pub fn decode_into(&mut self, pixels: &mut [u8]) -> Result<(), SnErrors> {
        if !self.decoded_headers {
            self.decode_headers()?;
        }

        let expected = self.output_buffer_size().unwrap();

        if pixels.len() < expected {
            return Err(SnErrors::TooSmallOutput(expected, pixels.len()));
        }

        let grid = self.decode_pixels()?;
        grid.write_rgba_bytes(pixels);

        trace!("Finished decoding image");
        Ok(())
    }

    /// Replay the payload, reconstructing pixels in raster order
    fn decode_pixels(&mut self) -> Result<PixelGrid, SnErrors> {
        let mut grid = PixelGrid::new(self.width, self.height);
        let total = self.width * self.height;

        if total == 0 {
            return Ok(grid);
        }
        let fallback = self.palette[0];
        let palette_len = self.palette.len();

        let mut bits = BitReader::new(self.stream.remaining_bytes());
        let mut scratch: Vec<Color> = Vec::with_capacity(palette_len + 4);
        let mut resolved: usize = 0;
        // tracks the asymmetric run counter reset of the encoder: right
        // after a miss in the last candidate slot (and at stream start)
        // the next run flush is one pixel longer than its value, and may
        // be absent entirely
        let mut after_last_slot = true;

        while resolved < total {
            if bits.is_eof() {
                if self.options.strict_mode() {
                    return Err(SnErrors::InsufficientBits(total - resolved));
                }
                warn!(
                    "Payload ended {} pixels early, filling from the predictor",
                    total - resolved
                );
                while resolved < total {
                    let (x, y) = (resolved % self.width, resolved / self.width);
                    let guess = predict(&grid, x, y, fallback);
                    grid.set(x, y, guess);
                    resolved += 1;
                }
                break;
            }

            let mut skips = match bits.read_run() {
                Some(value) => value + usize::from(after_last_slot),
                None if after_last_slot => 0,
                None => return Err(SnErrors::GenericStatic("missing run flush in payload"))
            };

            if skips > total - resolved {
                if bits.is_eof() {
                    // the closing run flush is followed by the byte
                    // padding, whose zero bits read as further chunks.
                    // the pixel count is the real boundary there
                    skips = total - resolved;
                } else {
                    return Err(SnErrors::GenericStatic("run goes past the end of the image"));
                }
            }

            // these pixels were predicted correctly, the guess is the color
            for _ in 0..skips {
                let (x, y) = (resolved % self.width, resolved / self.width);
                let guess = predict(&grid, x, y, fallback);
                grid.set(x, y, guess);
                resolved += 1;
            }

            if resolved == total {
                break;
            }

            // a mispredicted pixel, its rank is the unary run ending at
            // the next zero bit or at the last possible slot
            let (x, y) = (resolved % self.width, resolved / self.width);
            let guess = predict(&grid, x, y, fallback);
            let n = neighbors(&grid, x, y, fallback);
            candidates(guess, n, &self.palette, &mut scratch);

            let mut badness: usize = 0;
            while badness + 1 < palette_len && bits.peek_bit() == Some(1) {
                bits.read_bit();
                badness += 1;
            }

            grid.set(x, y, scratch[badness]);
            after_last_slot = badness + 1 == palette_len;
            resolved += 1;
        }

        Ok(grid)
    }
}
