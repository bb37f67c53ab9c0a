/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

use alloc::vec::Vec;

use snx_core::bytestream::SnWriter;
use snx_core::colorspace::ColorSpace;
use snx_core::log::trace;
use snx_core::options::EncoderOptions;

use crate::bitstream::BitWriter;
use crate::color::Color;
use crate::constants::{DEFAULT_COLOR_TRIALS, SN_HEADER_SIZE, SN_MAGIC, SN_MAX_PALETTE};
use crate::errors::SnEncodeErrors;
use crate::grid::PixelGrid;
use crate::optimizer::best_palette_order;
use crate::predictor::{candidates, neighbors, predict};
use crate::quantizer::{build_palette, snap_to_palette, QuantizeMode};

const SUPPORTED_COLORSPACES: [ColorSpace; 1] = [ColorSpace::RGBA];

/// Encode the payload for `grid` against an ordered palette
///
/// Pixels are walked in raster order. A correct prediction only bumps
/// the pending run counter, a miss first flushes the pending run as a
/// run-length escape and then spends one unary bit per rank of the
/// true color in its candidate list. A miss ranked in the very last
/// slot resets the run counter to 0 instead of 1, the exhausted
/// candidate list already marks the boundary so the next run flush
/// starts one pixel later for free.
pub(crate) fn encode_payload(grid: &PixelGrid, palette: &[Color]) -> Vec<u8> {
    let mut bits = BitWriter::new();

    if palette.is_empty() {
        return bits.finish();
    }
    let fallback = palette[0];

    let mut pending: usize = 0;
    let mut scratch: Vec<Color> = Vec::with_capacity(palette.len() + 4);

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let correct = grid.pixel(x, y);
            let guess = predict(grid, x, y, fallback);

            if guess == correct {
                pending += 1;
                continue;
            }

            let n = neighbors(grid, x, y, fallback);
            candidates(guess, n, palette, &mut scratch);

            let badness = scratch
                .iter()
                .position(|color| *color == correct)
                .expect("snapped pixel color must be a palette member");

            if pending > 0 {
                bits.push_run(pending);
            }
            pending = usize::from(badness != palette.len() - 1);
            bits.push_ones(badness);
        }
    }

    if pending > 0 {
        bits.push_run(pending);
    }
    bits.finish()
}

/// An SN format encoder
///
/// Takes a buffer of raw RGBA pixels, quantizes it onto a palette of
/// at most 255 colors and compresses the result. The compression is
/// lossless with respect to the quantized image, images that already
/// fit the palette round-trip exactly.
///
/// # Example
/// Encode a 100 by 100 RGBA image
///
/// ```
/// use snx::SnEncoder;
/// use snx_core::colorspace::ColorSpace;
/// use snx_core::options::EncoderOptions;
///
/// const W: usize = 100;
/// const H: usize = 100;
///
/// let pixels = std::array::from_fn::<u8, { W * H * 4 }, _>(|i| if i % 4 == 3 { 255 } else { 0 });
/// let encoder = SnEncoder::new(&pixels, EncoderOptions::new(W, H, ColorSpace::RGBA));
/// let bytes = encoder.encode().unwrap();
/// // write bytes, or do something
/// ```
pub struct SnEncoder<'a> {
    // raw pixels, in RGBA
    pixel_data: &'a [u8],
    options:    EncoderOptions,
    quantize:   QuantizeMode,
    trials:     usize
}

impl<'a> SnEncoder<'a> {
    /// Create a new encoder which will encode the pixels
    ///
    /// # Arguments
    /// - data: Pixel data, size must be equal to `width * height * 4`
    /// - options: Describes the buffer, width, height and colorspace
    pub const fn new(data: &'a [u8], options: EncoderOptions) -> SnEncoder<'a> {
        SnEncoder {
            pixel_data: data,
            options,
            quantize: QuantizeMode::Frequency {
                max_colors: SN_MAX_PALETTE
            },
            trials: DEFAULT_COLOR_TRIALS
        }
    }

    /// Choose how the image is reduced to a palette
    ///
    /// See [`QuantizeMode`] for the available strategies.
    pub fn set_quantize_mode(&mut self, mode: QuantizeMode) {
        self.quantize = mode;
    }

    /// Set how many default color candidates the palette ordering
    /// search tries
    ///
    /// Each candidate costs one full encoding pass over the image.
    /// Values are clamped to at least 1, the default is 6.
    pub fn set_default_color_trials(&mut self, trials: usize) {
        self.trials = trials.max(1);
    }

    fn check_input(&self) -> Result<(), SnEncodeErrors> {
        let options = &self.options;

        if options.colorspace() != ColorSpace::RGBA {
            return Err(SnEncodeErrors::UnsupportedColorspace(
                options.colorspace(),
                &SUPPORTED_COLORSPACES
            ));
        }
        if options.width() > usize::from(u16::MAX) {
            return Err(SnEncodeErrors::TooLargeDimensions(options.width()));
        }
        if options.height() > usize::from(u16::MAX) {
            return Err(SnEncodeErrors::TooLargeDimensions(options.height()));
        }

        let expected = options
            .width()
            .checked_mul(options.height())
            .and_then(|pixels| pixels.checked_mul(4))
            .ok_or(SnEncodeErrors::Generic("image byte size overflows usize"))?;

        if self.pixel_data.len() != expected {
            return Err(SnEncodeErrors::WrongInputSize(
                expected,
                self.pixel_data.len()
            ));
        }
        Ok(())
    }

    /// Encode the pixels, returning the SN file bytes
    ///
    /// # Returns
    /// - `Ok(bytes)`: The full SN file, header, palette and payload
    /// - `Err`: The error encountered during encoding
    pub fn encode(&self) -> Result<Vec<u8>, SnEncodeErrors> {
        self.check_input()?;

        let options = &self.options;
        let mut grid =
            PixelGrid::from_rgba_bytes(options.width(), options.height(), self.pixel_data);

        let base = build_palette(&grid, self.quantize)?;
        snap_to_palette(&mut grid, &base);
        trace!("palette holds {} colors", base.len());

        let (palette, payload) = best_palette_order(&grid, &base, self.trials);

        let mut sn = Vec::new();
        {
            let mut stream = SnWriter::new(&mut sn);
            stream.reserve(SN_HEADER_SIZE + 4 * palette.len() + payload.len());

            stream.write_all(&SN_MAGIC);
            stream.write_u16_le(options.width() as u16);
            stream.write_u16_le(options.height() as u16);
            // reserved for future extensions
            stream.write_all(&[0, 0, 0]);
            stream.write_u8(palette.len() as u8);

            for color in &palette {
                stream.write_all(&color.rgba());
            }
            stream.write_all(&payload);
            trace!("encoded {} bytes", stream.bytes_written());
        }

        Ok(sn)
    }
}

#[cfg(test)]
mod tests {
    use snx_core::colorspace::ColorSpace;
    use snx_core::options::EncoderOptions;

    use crate::{SnDecoder, SnEncoder};

    #[test]
    fn encode_then_decode_preserves_palette_images() {
        const W: usize = 40;
        const H: usize = 25;

        // four distinct colors in a checkered layout
        let mut pixels = vec![0u8; W * H * 4];
        for (index, px) in pixels.chunks_exact_mut(4).enumerate() {
            let which = ((index % W) / 3 + (index / W) / 2) % 4;
            px.copy_from_slice(&[[10, 10, 10, 255], [200, 0, 0, 255], [0, 200, 0, 255], [0, 0, 200, 255]][which]);
        }

        let encoder = SnEncoder::new(&pixels, EncoderOptions::new(W, H, ColorSpace::RGBA));
        let sn = encoder.encode().unwrap();

        let mut decoder = SnDecoder::new(&sn);
        let decoded = decoder.decode().unwrap();

        assert_eq!(decoder.dimensions(), Some((W, H)));
        assert_eq!(&decoded[..], &pixels[..]);
    }

    #[test]
    fn wrong_buffer_size_is_rejected() {
        let pixels = [0u8; 13];
        let encoder = SnEncoder::new(&pixels, EncoderOptions::new(2, 2, ColorSpace::RGBA));

        assert!(encoder.encode().is_err());
    }

    #[test]
    fn non_rgba_input_is_rejected() {
        let pixels = [0u8; 12];
        let encoder = SnEncoder::new(&pixels, EncoderOptions::new(2, 2, ColorSpace::RGB));

        assert!(encoder.encode().is_err());
    }
}
