// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Donut (and pie) chart composition.
//!
//! [`DonutChartSpec`] turns an allocated focus list into one [`SliceGeometry`] per item: the
//! angular extent derived from the item's percent, its rank color, and a label anchor. Slices
//! are laid out clockwise from `start_angle`, highest rank first.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use focus_core::{FocusItem, ItemId};
use kurbo::Point;
use peniko::Color;

use crate::color_ramp::{ColorRamp, Hsl, Rgb8};
use crate::format::format_percent;
use crate::geometry::{ArcMode, SectorPath, SectorShape};

/// Geometry and paint for a single slice.
#[derive(Clone, Debug, PartialEq)]
pub struct SliceGeometry {
    /// Item the slice represents.
    pub id: ItemId,
    /// Item label.
    pub text: String,
    /// Zero-based rank.
    pub rank: usize,
    /// Share in percent, full precision.
    pub percent: f64,
    /// Angular extent and radii.
    pub shape: SectorShape,
    /// Rank color.
    pub hsl: Hsl,
    /// Rank color as 8-bit RGB.
    pub rgb: Rgb8,
    /// Where the percent label goes.
    pub label_anchor: Point,
    /// Whether the slice is wide enough to carry a label.
    pub show_label: bool,
}

impl SliceGeometry {
    /// Outline in the requested arc mode.
    pub fn path(&self, mode: ArcMode) -> SectorPath {
        self.shape.path(mode)
    }

    /// Fill color.
    pub fn color(&self) -> Color {
        self.rgb.to_color()
    }

    /// Display label for the slice's share.
    pub fn percent_label(&self) -> String {
        format_percent(self.percent)
    }
}

/// A donut/pie chart description.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DonutChartSpec {
    /// Chart center.
    pub center: Point,
    /// Radius of the hole (0 for a pie).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Angle of the first slice edge, in degrees (-90 is 12 o'clock).
    pub start_angle: f64,
    /// Rank colors.
    pub ramp: ColorRamp,
    /// Radius of label anchors. `None` picks the ring midline for donuts and 65% of the radius
    /// for pies.
    pub label_radius: Option<f64>,
    /// Slices narrower than this (degrees) don't get a label.
    pub min_label_sweep: f64,
}

impl Default for DonutChartSpec {
    fn default() -> Self {
        Self::new(Point::new(200.0, 200.0), 90.0, 180.0)
    }
}

impl DonutChartSpec {
    /// Creates a donut chart spec.
    pub fn new(center: Point, inner_radius: f64, outer_radius: f64) -> Self {
        Self {
            center,
            inner_radius,
            outer_radius,
            start_angle: -90.0,
            ramp: ColorRamp::default(),
            label_radius: None,
            min_label_sweep: 15.0,
        }
    }

    /// Creates a pie chart spec (no hole).
    pub fn pie(center: Point, radius: f64) -> Self {
        Self::new(center, 0.0, radius)
    }

    /// Sets the angle of the first slice edge.
    pub fn with_start_angle(mut self, start_angle: f64) -> Self {
        self.start_angle = start_angle;
        self
    }

    /// Sets the color ramp.
    pub fn with_ramp(mut self, ramp: ColorRamp) -> Self {
        self.ramp = ramp;
        self
    }

    /// Sets an explicit label radius.
    pub fn with_label_radius(mut self, radius: f64) -> Self {
        self.label_radius = Some(radius);
        self
    }

    /// Sets the minimum sweep that gets a label.
    pub fn with_min_label_sweep(mut self, degrees: f64) -> Self {
        self.min_label_sweep = degrees;
        self
    }

    /// The resolved label radius.
    pub fn resolved_label_radius(&self) -> f64 {
        self.label_radius.unwrap_or(if self.inner_radius > 0.0 {
            (self.inner_radius + self.outer_radius) / 2.0
        } else {
            self.outer_radius * 0.65
        })
    }

    /// Lays out one slice per item, in rank order.
    ///
    /// Slice edges are derived from the running total of percents, and the last slice always
    /// ends exactly one turn after `start_angle`.
    pub fn slices(&self, items: &[FocusItem]) -> Vec<SliceGeometry> {
        let total = items.len();
        let label_radius = self.resolved_label_radius();
        let mut out = Vec::with_capacity(total);
        let mut running = 0.0;
        let mut start = self.start_angle;
        for (rank, item) in items.iter().enumerate() {
            running += item.percent();
            let end = if rank + 1 == total {
                self.start_angle + 360.0
            } else {
                self.start_angle + running / 100.0 * 360.0
            };
            let shape = SectorShape {
                center: self.center,
                inner_radius: self.inner_radius,
                outer_radius: self.outer_radius,
                start_angle: start,
                sweep_angle: end - start,
            };
            let hsl = self.ramp.color_for(rank, total);
            out.push(SliceGeometry {
                id: item.id().clone(),
                text: String::from(item.text()),
                rank,
                percent: item.percent(),
                shape,
                hsl,
                rgb: hsl.to_rgb8(),
                label_anchor: shape.point_at_mid(label_radius),
                show_label: shape.sweep_angle > self.min_label_sweep,
            });
            start = end;
        }
        out
    }
}
