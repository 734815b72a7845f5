// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Legend layout: one swatch + label row per slice.
//!
//! This is layout only. Renderers draw `swatch` as a filled rect and `label` as text anchored at
//! `label_pos` (start-aligned, vertically centered).

extern crate alloc;

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use focus_core::ItemId;
use kurbo::{Point, Rect};

use crate::color_ramp::Rgb8;
use crate::donut::SliceGeometry;
use crate::format::format_percent;

/// What the legend calls each item.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LegendLabel {
    /// `Item 1`, `Item 2`, ... (keeps item text out of shared exports).
    #[default]
    Rank,
    /// The item's own text, truncated to `max_label_chars`.
    Text,
}

/// One laid-out legend row.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendRow {
    /// Item the row describes.
    pub id: ItemId,
    /// Swatch square.
    pub swatch: Rect,
    /// Swatch fill.
    pub color: Rgb8,
    /// Label text, including the formatted percent.
    pub label: String,
    /// Label anchor.
    pub label_pos: Point,
}

/// Vertical swatch legend.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LegendSpec {
    /// Top-left corner.
    pub origin: Point,
    /// Swatch square size.
    pub swatch_size: f64,
    /// Vertical gap between rows.
    pub row_gap: f64,
    /// Horizontal gap between swatch and label.
    pub label_dx: f64,
    /// Label font size.
    pub font_size: f64,
    /// Naming scheme.
    pub label: LegendLabel,
    /// Longer item texts are cut and suffixed with `...`.
    pub max_label_chars: usize,
}

impl Default for LegendSpec {
    fn default() -> Self {
        Self {
            origin: Point::ZERO,
            swatch_size: 12.0,
            row_gap: 6.0,
            label_dx: 6.0,
            font_size: 12.0,
            label: LegendLabel::Rank,
            max_label_chars: 70,
        }
    }
}

impl LegendSpec {
    /// Creates a legend at `origin` with default styling.
    pub fn new(origin: Point) -> Self {
        Self {
            origin,
            ..Self::default()
        }
    }

    /// Sets the naming scheme.
    pub fn with_label(mut self, label: LegendLabel) -> Self {
        self.label = label;
        self
    }

    /// Sets the font size.
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    /// Sets the swatch size.
    pub fn with_swatch_size(mut self, swatch_size: f64) -> Self {
        self.swatch_size = swatch_size;
        self
    }

    /// Sets the vertical gap between rows.
    pub fn with_row_gap(mut self, row_gap: f64) -> Self {
        self.row_gap = row_gap;
        self
    }

    fn row_height(&self) -> f64 {
        self.swatch_size.max(self.font_size)
    }

    /// Lays out rows for `slices`, top to bottom.
    pub fn rows(&self, slices: &[SliceGeometry]) -> Vec<LegendRow> {
        let row_height = self.row_height();
        slices
            .iter()
            .enumerate()
            .map(|(i, slice)| {
                let y = self.origin.y + i as f64 * (row_height + self.row_gap);
                let swatch_y = y + (row_height - self.swatch_size) * 0.5;
                let name = match self.label {
                    LegendLabel::Rank => format!("Item {}", slice.rank + 1),
                    LegendLabel::Text => truncate(&slice.text, self.max_label_chars),
                };
                LegendRow {
                    id: slice.id.clone(),
                    swatch: Rect::new(
                        self.origin.x,
                        swatch_y,
                        self.origin.x + self.swatch_size,
                        swatch_y + self.swatch_size,
                    ),
                    color: slice.rgb,
                    label: format!("{name} - {}", format_percent(slice.percent)),
                    label_pos: Point::new(
                        self.origin.x + self.swatch_size + self.label_dx,
                        y + row_height * 0.5,
                    ),
                }
            })
            .collect()
    }

    /// Estimated bounds of `rows`, assuming an average glyph width of `glyph_em` font sizes.
    pub fn bounds(&self, rows: &[LegendRow], glyph_em: f64) -> Rect {
        let row_height = self.row_height();
        let widest = rows
            .iter()
            .map(|row| {
                let text_w = glyph_em * self.font_size * row.label.chars().count() as f64;
                row.label_pos.x - self.origin.x + text_w
            })
            .fold(0.0, f64::max);
        let height = if rows.is_empty() {
            0.0
        } else {
            rows.len() as f64 * row_height + (rows.len() - 1) as f64 * self.row_gap
        };
        Rect::new(
            self.origin.x,
            self.origin.y,
            self.origin.x + widest,
            self.origin.y + height,
        )
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return String::from(text);
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}
