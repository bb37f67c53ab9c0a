/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Core routines shared by the snx family of crates
//!
//! This crate provides a set of core routines shared
//! by the decoders and encoders under the `snx` umbrella
//!
//! It currently contains
//!
//! - A bytestream reader and writer with endian aware reads and writes
//! - Colorspace information shared by images
//! - Image decoder and encoder options
//!
//! This library is `#[no_std]` with the `alloc` crate needed for defining `Vec`
//! which we need for storing encoded bytes.
//!
//! # Features
//!  - `std`: Enables `std` specific conveniences, on by default in the
//!     sibling crates
//!  - `log`: Re-exports the `log` crate, when absent a no-op shim with the
//!     same macro names is provided
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod bytestream;
pub mod colorspace;
pub mod options;

#[cfg(feature = "log")]
pub use log;
#[cfg(not(feature = "log"))]
pub mod log;
