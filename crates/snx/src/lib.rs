/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Decoding and encoding of the SN image format
//!
//! SN is a compact palette based format for images with few distinct
//! colors. An encoder reduces the image to a palette of at most 255
//! colors, predicts each pixel from its causal neighborhood and stores
//! only the prediction misses as bit-packed residuals, so flat artwork
//! compresses to a handful of bytes.
//!
//! # Features
//! - Decoding and encoding
//! - `no_std`
//! - Fuzz tested
//!
//! ## `no_std`
//! You can use `no_std` with the alloc feature to compile for `no_std` endpoints
//!
//! # Example
//! Encode a two color image and get it back
//!
//! ```
//! use snx::{SnDecoder, SnEncoder};
//! use snx_core::colorspace::ColorSpace;
//! use snx_core::options::EncoderOptions;
//!
//! let pixels = [
//!     255, 0, 0, 255, /**/ 255, 0, 0, 255, //
//!     255, 0, 0, 255, /**/ 0, 0, 255, 255, //
//! ];
//! let options = EncoderOptions::new(2, 2, ColorSpace::RGBA);
//! let sn = SnEncoder::new(&pixels, options).encode().unwrap();
//!
//! let decoded = SnDecoder::new(&sn).decode().unwrap();
//! assert_eq!(&decoded[..], &pixels[..]);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;
extern crate core;

pub use color::Color;
pub use decoder::*;
pub use encoder::*;
pub use errors::*;
pub use grid::PixelGrid;
pub use quantizer::QuantizeMode;
pub use snx_core;

mod bitstream;
mod color;
mod constants;
mod decoder;
mod encoder;
mod errors;
mod grid;
mod optimizer;
mod predictor;
mod quantizer;
