// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular chart geometry for focus budgets.
//!
//! This crate sits above `focus_core` and turns an allocated focus list into drawable output:
//! - **Color ramp**: rank to HSL to RGB, green at the top through red at the bottom.
//! - **Sector geometry**: donut/pie outlines as renderer-agnostic [`SectorPath`]s with proper
//!   large-arc handling and split full circles.
//! - **Polyline approximation**: the same outlines as straight segments, for targets without
//!   arc primitives.
//! - **Composition**: [`DonutChartSpec`] lays out slices and labels; [`LegendSpec`] lays out
//!   swatch rows.
//!
//! Text shaping and actual rendering are out of scope; outputs are geometry, colors, and
//! unshaped strings.

#![no_std]

extern crate alloc;

mod color_ramp;
mod donut;
#[cfg(not(feature = "std"))]
mod float;
mod format;
mod geometry;
mod legend;
mod polyline;

pub use color_ramp::{ColorRamp, Hsl, Rgb8, hsl_to_rgb};
pub use donut::{DonutChartSpec, SliceGeometry};
pub use format::format_percent;
pub use geometry::{
    ArcMode, PathCommand, SectorPath, SectorShape, donut_path, normalize_degrees, pie_slice_path,
    polar_to_cartesian,
};
pub use legend::{LegendLabel, LegendRow, LegendSpec};
pub use polyline::{MAX_SEGMENTS, PolylineApproximator};
