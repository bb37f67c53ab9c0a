/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The causal pixel predictor
//!
//! Both sides of the codec run the same guess function over the same
//! already-known pixels, so the decoder reproduces every guess the
//! encoder made. Only positions strictly earlier in raster order are
//! ever inspected, lookups past the image edge resolve to the palette
//! default color.

use alloc::vec::Vec;

use crate::color::Color;
use crate::grid::PixelGrid;

/// The four causal neighbors of a pixel
#[derive(Copy, Clone)]
pub(crate) struct Neighbors {
    pub left:     Color,
    pub top:      Color,
    pub topleft:  Color,
    pub topright: Color
}

pub(crate) fn neighbors(grid: &PixelGrid, x: usize, y: usize, fallback: Color) -> Neighbors {
    let (x, y) = (x as isize, y as isize);

    Neighbors {
        left:     grid.at(x - 1, y, fallback),
        top:      grid.at(x, y - 1, fallback),
        topleft:  grid.at(x - 1, y - 1, fallback),
        topright: grid.at(x + 1, y - 1, fallback)
    }
}

/// Guess the most likely color of the pixel at `(x, y)`
///
/// A fixed cascade favoring flat regions and clean diagonal edges.
/// Runs of equal neighbors normally predict a continuation of the
/// vertical run, only when a few further pixels confirm a diagonal
/// motif does the guess follow the diagonal instead.
pub(crate) fn predict(grid: &PixelGrid, x: usize, y: usize, fallback: Color) -> Color {
    let n = neighbors(grid, x, y, fallback);
    let at = |dx: isize, dy: isize| grid.at(x as isize + dx, y as isize + dy, fallback);

    if n.left == n.top {
        if n.left != n.topleft {
            return n.top;
        }
        if n.left == n.topright {
            return n.top;
        }
        if at(2, -1) != n.topright {
            return n.top;
        }
        if at(1, -2) != n.top {
            return n.top;
        }
        if at(2, -3) != n.top {
            return n.top;
        }
        n.topright
    } else if n.left == n.topleft {
        if at(-1, -2) != n.top {
            return n.top;
        }
        if at(-2, -1) != n.left {
            return n.top;
        }
        if at(-2, -3) != n.top {
            return n.top;
        }
        n.left
    } else if n.top == n.topleft {
        if at(-2, -1) != n.left {
            return n.left;
        }
        if at(-1, -2) != n.top {
            return n.left;
        }
        if at(-3, -2) != n.left {
            return n.left;
        }
        n.top
    } else {
        n.top
    }
}

/// Build the candidate list a mispredicted color is ranked in
///
/// The guess and the four neighbors come first, then every palette
/// entry, duplicates removed keeping the first occurrence. All
/// contextual colors are palette members, so the result always holds
/// exactly `palette.len()` entries.
pub(crate) fn candidates(guess: Color, n: Neighbors, palette: &[Color], out: &mut Vec<Color>) {
    out.clear();

    for color in [guess, n.left, n.top, n.topleft, n.topright] {
        if !out.contains(&color) {
            out.push(color);
        }
    }
    for color in palette {
        if !out.contains(color) {
            out.push(*color);
        }
    }
}
