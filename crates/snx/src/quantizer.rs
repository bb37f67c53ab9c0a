/*
 * Copyright (c) 2023.
 *
 * This software is free software; You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! Palette construction and anti-aliasing aware pixel snapping
//!
//! Quantization runs in two stages. First a palette is selected from
//! the color histogram, by plain frequency or by greedy distance
//! clustering depending on [`QuantizeMode`]. Then every off-palette
//! pixel is snapped to a palette color, where pixels sitting on a one
//! pixel wide line are treated as anti-aliasing and snap to a nearby
//! palette-valued neighbor instead of the globally nearest color.
//! Snapping a black curve against a palette that also contains gray
//! would otherwise pull the soft edge pixels to gray.

use alloc::collections::BTreeMap;
use alloc::vec::Vec;

use snx_core::log::trace;

use crate::color::Color;
use crate::constants::{AA_SEARCH_RADIUS, SN_MAX_PALETTE};
use crate::errors::SnEncodeErrors;
use crate::grid::PixelGrid;

/// How the encoder reduces an image to a palette
///
/// Both strategies order colors by how often they occur, they differ
/// in how the palette entries are chosen from that ordering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum QuantizeMode {
    /// Keep the `max_colors` most frequent colors as the palette
    ///
    /// Anything rarer is snapped to the selected entries. More than
    /// 255 requested colors is reported as a palette overflow when the
    /// image actually contains that many.
    Frequency { max_colors: usize },
    /// Greedy clustering by distance
    ///
    /// Walking colors from most to least frequent, a color within
    /// `threshold` (Euclidean over R, G, B, A) of an already selected
    /// entry merges into the nearest such entry, otherwise it starts a
    /// new entry until `max_colors` entries exist.
    Cluster { threshold: f32, max_colors: usize }
}

impl Default for QuantizeMode {
    fn default() -> Self {
        QuantizeMode::Frequency {
            max_colors: SN_MAX_PALETTE
        }
    }
}

struct ColorCount {
    count:      usize,
    first_seen: usize
}

/// Distinct colors ordered by descending count, ties keep first
/// appearance order so the result is deterministic
fn color_frequencies(grid: &PixelGrid) -> Vec<(Color, usize)> {
    let mut counts: BTreeMap<Color, ColorCount> = BTreeMap::new();

    for (position, color) in grid.pixels().iter().enumerate() {
        counts
            .entry(*color)
            .and_modify(|entry| entry.count += 1)
            .or_insert(ColorCount {
                count:      1,
                first_seen: position
            });
    }

    let mut ordered: Vec<(Color, ColorCount)> = counts.into_iter().collect();
    ordered.sort_by(|a, b| {
        b.1.count
            .cmp(&a.1.count)
            .then(a.1.first_seen.cmp(&b.1.first_seen))
    });

    ordered
        .into_iter()
        .map(|(color, entry)| (color, entry.count))
        .collect()
}

/// Select the palette for `grid`, most frequent first
///
/// The returned colors are pairwise distinct and at most 255.
pub(crate) fn build_palette(
    grid: &PixelGrid, mode: QuantizeMode
) -> Result<Vec<Color>, SnEncodeErrors> {
    let frequencies = color_frequencies(grid);
    trace!("image has {} distinct colors", frequencies.len());

    let limit = match mode {
        QuantizeMode::Frequency { max_colors } => max_colors,
        QuantizeMode::Cluster { max_colors, .. } => max_colors
    };
    if limit == 0 && !frequencies.is_empty() {
        return Err(SnEncodeErrors::Generic("a palette needs at least one entry"));
    }

    match mode {
        QuantizeMode::Frequency { max_colors } => {
            let wanted = frequencies.len().min(max_colors);

            if wanted > SN_MAX_PALETTE {
                return Err(SnEncodeErrors::PaletteOverflow(frequencies.len()));
            }
            Ok(frequencies
                .into_iter()
                .take(wanted)
                .map(|(color, _)| color)
                .collect())
        }
        QuantizeMode::Cluster {
            threshold,
            max_colors
        } => {
            let threshold_sq = f64::from(threshold) * f64::from(threshold);
            let mut entries: Vec<(Color, usize)> = Vec::new();

            for (color, count) in frequencies {
                let mut nearest: Option<(usize, u32)> = None;

                for (slot, entry) in entries.iter().enumerate() {
                    let distance = entry.0.distance_squared(color);

                    if nearest.map_or(true, |(_, best)| distance < best) {
                        nearest = Some((slot, distance));
                    }
                }

                match nearest {
                    Some((slot, distance)) if f64::from(distance) <= threshold_sq => {
                        // merged colors lend their weight to the entry
                        // that absorbed them
                        entries[slot].1 += count;
                    }
                    _ if entries.len() < max_colors => entries.push((color, count)),
                    _ => {}
                }
            }

            if entries.len() > SN_MAX_PALETTE {
                return Err(SnEncodeErrors::PaletteOverflow(entries.len()));
            }
            entries.sort_by(|a, b| b.1.cmp(&a.1));
            Ok(entries.into_iter().map(|(color, _)| color).collect())
        }
    }
}

/// Nearest palette color by squared distance, ties go to the earliest
/// slot
fn nearest_color(pool: &[Color], color: Color) -> Color {
    let mut best = pool[0];
    let mut best_distance = best.distance_squared(color);

    for &candidate in &pool[1..] {
        let distance = candidate.distance_squared(color);

        if distance < best_distance {
            best = candidate;
            best_distance = distance;
        }
    }
    best
}

/// Whether the pixel at `(x, y)` sits on a one pixel wide line
///
/// Scans along the axis the immediate next neighbor shares the color
/// with (horizontal when the right neighbor matches, vertical
/// otherwise). The pixel counts as anti-aliasing when no neighbor
/// perpendicular to the scan direction repeats the color anywhere
/// along the run.
fn is_anti_aliased(grid: &PixelGrid, x: usize, y: usize) -> bool {
    let (mut cx, mut cy) = (x as isize, y as isize);
    let color = grid.get(cx, cy);

    let (dx, dy) = if grid.get(cx + 1, cy) == color {
        (1, 0)
    } else {
        (0, 1)
    };

    loop {
        if grid.get(cx + dy, cy + dx) == color {
            return false;
        }
        if grid.get(cx - dy, cy - dx) == color {
            return false;
        }
        cx += dx;
        cy += dy;

        if grid.get(cx, cy) != color {
            return true;
        }
    }
}

/// Snap an anti-aliased pixel to the nearest palette color found among
/// its neighbors, searching square rings of growing radius
fn snap_anti_aliased(grid: &PixelGrid, palette: &[Color], x: usize, y: usize) -> Color {
    let color = grid.pixel(x, y);
    let mut pool: Vec<Color> = Vec::new();

    for radius in 1..=AA_SEARCH_RADIUS {
        for dy in -radius..=radius {
            for dx in -radius..=radius {
                if dx.abs().max(dy.abs()) != radius {
                    continue;
                }
                if let Some(candidate) = grid.get(x as isize + dx, y as isize + dy) {
                    if palette.contains(&candidate) && !pool.contains(&candidate) {
                        pool.push(candidate);
                    }
                }
            }
        }
        if !pool.is_empty() {
            break;
        }
    }

    if pool.is_empty() {
        nearest_color(palette, color)
    } else {
        nearest_color(&pool, color)
    }
}

/// Remap every pixel of `grid` onto `palette`
///
/// Two passes in raster order. The first resolves all pixels that do
/// not qualify as anti-aliasing, the second resolves the anti-aliased
/// ones, which must come last since their snapping depends on
/// neighbors already holding true palette colors.
pub(crate) fn snap_to_palette(grid: &mut PixelGrid, palette: &[Color]) {
    if palette.is_empty() {
        return;
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = grid.pixel(x, y);

            if palette.contains(&color) || is_anti_aliased(grid, x, y) {
                continue;
            }
            grid.set(x, y, nearest_color(palette, color));
        }
    }

    for y in 0..grid.height() {
        for x in 0..grid.width() {
            let color = grid.pixel(x, y);

            if palette.contains(&color) {
                continue;
            }
            let snapped = snap_anti_aliased(grid, palette, x, y);
            grid.set(x, y, snapped);
        }
    }
}
