/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Palette order search
//!
//! A mispredicted color costs as many bits as its rank in the
//! per-pixel candidate list, so the non-default palette entries should
//! be ordered with the most surprising colors first. The default color
//! in slot 0 stays fixed, its effect on predictions along the image
//! border makes reordering it unprofitable to reason about, instead a
//! handful of candidates for slot 0 are simply tried and the shortest
//! encoding wins.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use snx_core::log::trace;

use crate::color::Color;
use crate::encoder::encode_payload;
use crate::grid::PixelGrid;
use crate::predictor::neighbors;

/// Count, per color, the pixels whose color differs from all four
/// causal neighbors
///
/// Such occurrences are the genuine surprises no context can predict,
/// colors producing many of them deserve the cheapest ranks.
fn surprise_counts(grid: &PixelGrid, fallback: Color) -> BTreeMap<Color, usize> {
    let mut counts = BTreeMap::new();

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = grid.pixel(x, y);
            let n = neighbors(grid, x, y, fallback);

            if color != n.left && color != n.top && color != n.topleft && color != n.topright {
                *counts.entry(color).or_insert(0) += 1;
            }
        }
    }
    counts
}

/// Order the palette for one candidate default color
///
/// The candidate takes slot 0, the rest are sorted by descending
/// surprise count. The sort is stable so ties keep their frequency
/// order and the result stays deterministic.
fn order_for_default(grid: &PixelGrid, base: &[Color], default: Color) -> Vec<Color> {
    let surprises = surprise_counts(grid, default);

    let mut palette = Vec::with_capacity(base.len());
    palette.push(default);

    let mut rest: Vec<Color> = base.iter().copied().filter(|color| *color != default).collect();
    rest.sort_by(|a, b| {
        surprises
            .get(b)
            .unwrap_or(&0)
            .cmp(surprises.get(a).unwrap_or(&0))
    });

    palette.extend(rest);
    palette
}

/// Try `trials` default color candidates and keep the palette order
/// producing the smallest payload
///
/// `base` must be ordered most frequent first, the candidates are its
/// leading colors. Returns the winning palette together with its
/// payload, ties go to the earlier candidate.
pub(crate) fn best_palette_order(
    grid: &PixelGrid, base: &[Color], trials: usize
) -> (Vec<Color>, Vec<u8>) {
    let mut best: Option<(Vec<Color>, Vec<u8>)> = None;

    for candidate in base.iter().take(trials.max(1)) {
        let palette = order_for_default(grid, base, *candidate);
        let payload = encode_payload(grid, &palette);
        trace!(
            "default color {:?} gives {} payload bytes",
            candidate,
            payload.len()
        );

        if best
            .as_ref()
            .map_or(true, |(_, smallest)| payload.len() < smallest.len())
        {
            best = Some((palette, payload));
        }
    }

    // empty palette, empty image
    best.unwrap_or_else(|| (base.to_vec(), encode_payload(grid, base)))
}
