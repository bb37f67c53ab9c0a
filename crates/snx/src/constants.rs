/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

/// File magic, every SN file starts with these bytes
pub(crate) const SN_MAGIC: [u8; 8] = *b"SNxVH0.1";

/// Fixed part of the header, magic + dimensions + reserved + palette length
pub(crate) const SN_HEADER_SIZE: usize = 16;

/// Palette length is stored in one byte
pub(crate) const SN_MAX_PALETTE: usize = 255;

/// Largest square ring searched for neighbors when snapping
/// anti-aliased pixels
pub(crate) const AA_SEARCH_RADIUS: isize = 3;

/// Default number of default-color candidates the palette
/// ordering search tries
pub(crate) const DEFAULT_COLOR_TRIALS: usize = 6;
