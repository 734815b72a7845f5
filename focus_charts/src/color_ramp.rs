// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Rank-to-color mapping.
//!
//! Ranks are mapped onto a straight line in hue/lightness space: rank 0 gets the top hue
//! (green by default) and the last rank gets the bottom hue (red), with saturation held
//! constant. Conversion to RGB uses the usual six-sector HSL formula.

extern crate alloc;

use alloc::format;
use alloc::string::String;
use core::fmt;

use peniko::Color;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::geometry::normalize_degrees;

/// An HSL color. Hue is in degrees; saturation and lightness are percentages in `[0, 100]`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Hsl {
    /// Hue in degrees.
    pub h: f64,
    /// Saturation in percent.
    pub s: f64,
    /// Lightness in percent.
    pub l: f64,
}

impl Hsl {
    /// Creates an HSL color.
    pub const fn new(h: f64, s: f64, l: f64) -> Self {
        Self { h, s, l }
    }

    /// Converts to 8-bit RGB. See [`hsl_to_rgb`].
    pub fn to_rgb8(self) -> Rgb8 {
        hsl_to_rgb(self)
    }
}

impl fmt::Display for Hsl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "hsl({}, {}%, {}%)", self.h, self.s, self.l)
    }
}

/// An opaque 8-bit RGB color.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Rgb8 {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Rgb8 {
    /// Creates an RGB color.
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Converts to a `peniko` color for brush-based renderers.
    pub fn to_color(self) -> Color {
        Color::from_rgb8(self.r, self.g, self.b)
    }

    /// Formats as `#rrggbb`.
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}

impl fmt::Display for Rgb8 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

impl From<Rgb8> for Color {
    fn from(value: Rgb8) -> Self {
        value.to_color()
    }
}

/// Linear hue/lightness ramp over ranks.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ColorRamp {
    /// Hue of rank 0, in degrees.
    pub top_hue: f64,
    /// Hue of the last rank, in degrees.
    pub bottom_hue: f64,
    /// Saturation for every rank, in percent.
    pub saturation: f64,
    /// Lightness of rank 0, in percent.
    pub top_lightness: f64,
    /// Lightness of the last rank, in percent.
    pub bottom_lightness: f64,
}

impl Default for ColorRamp {
    /// Green (120°) at the top through yellow to red (0°) at the bottom.
    fn default() -> Self {
        Self {
            top_hue: 120.0,
            bottom_hue: 0.0,
            saturation: 75.0,
            top_lightness: 55.0,
            bottom_lightness: 60.0,
        }
    }
}

impl ColorRamp {
    /// Sets the top and bottom hues.
    pub fn with_hues(mut self, top: f64, bottom: f64) -> Self {
        self.top_hue = top;
        self.bottom_hue = bottom;
        self
    }

    /// Sets the constant saturation.
    pub fn with_saturation(mut self, saturation: f64) -> Self {
        self.saturation = saturation;
        self
    }

    /// Sets the top and bottom lightness.
    pub fn with_lightness(mut self, top: f64, bottom: f64) -> Self {
        self.top_lightness = top;
        self.bottom_lightness = bottom;
        self
    }

    /// Returns the color for `rank` in a list of `total` items.
    ///
    /// A single-item (or empty) list gets the top color. Ranks past the end clamp to the bottom
    /// color.
    pub fn color_for(&self, rank: usize, total: usize) -> Hsl {
        if total <= 1 {
            return Hsl::new(self.top_hue, self.saturation, self.top_lightness);
        }
        let t = (rank as f64 / (total - 1) as f64).min(1.0);
        Hsl::new(
            lerp(self.top_hue, self.bottom_hue, t),
            self.saturation,
            lerp(self.top_lightness, self.bottom_lightness, t),
        )
    }

    /// Shorthand for `color_for(rank, total).to_rgb8()`.
    pub fn rgb_for(&self, rank: usize, total: usize) -> Rgb8 {
        self.color_for(rank, total).to_rgb8()
    }
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a * (1.0 - t) + b * t
}

/// Converts HSL to 8-bit RGB.
///
/// Hue is wrapped into `[0, 360)`; saturation and lightness are clamped to `[0, 100]`.
pub fn hsl_to_rgb(hsl: Hsl) -> Rgb8 {
    let h = normalize_degrees(if hsl.h.is_finite() { hsl.h } else { 0.0 });
    let s = hsl.s.clamp(0.0, 100.0) / 100.0;
    let l = hsl.l.clamp(0.0, 100.0) / 100.0;

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - ((h / 60.0) % 2.0 - 1.0).abs());
    let m = l - c / 2.0;

    let (r, g, b) = if h < 60.0 {
        (c, x, 0.0)
    } else if h < 120.0 {
        (x, c, 0.0)
    } else if h < 180.0 {
        (0.0, c, x)
    } else if h < 240.0 {
        (0.0, x, c)
    } else if h < 300.0 {
        (x, 0.0, c)
    } else {
        (c, 0.0, x)
    };

    Rgb8::new(channel(r + m), channel(g + m), channel(b + m))
}

#[allow(clippy::cast_possible_truncation, reason = "clamped to the u8 range")]
fn channel(v: f64) -> u8 {
    (v * 255.0).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    #[test]
    fn primaries() {
        assert_eq!(hsl_to_rgb(Hsl::new(0.0, 100.0, 50.0)), Rgb8::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(60.0, 100.0, 50.0)), Rgb8::new(255, 255, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(120.0, 100.0, 50.0)), Rgb8::new(0, 255, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(240.0, 100.0, 50.0)), Rgb8::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(300.0, 100.0, 50.0)), Rgb8::new(255, 0, 255));
    }

    #[test]
    fn grays_and_extremes() {
        assert_eq!(hsl_to_rgb(Hsl::new(200.0, 0.0, 50.0)), Rgb8::new(128, 128, 128));
        assert_eq!(hsl_to_rgb(Hsl::new(10.0, 80.0, 100.0)), Rgb8::new(255, 255, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(10.0, 80.0, 0.0)), Rgb8::new(0, 0, 0));
    }

    #[test]
    fn hue_is_wrapped() {
        assert_eq!(hsl_to_rgb(Hsl::new(360.0, 100.0, 50.0)), Rgb8::new(255, 0, 0));
        assert_eq!(hsl_to_rgb(Hsl::new(-120.0, 100.0, 50.0)), Rgb8::new(0, 0, 255));
        assert_eq!(hsl_to_rgb(Hsl::new(480.0, 100.0, 50.0)), Rgb8::new(0, 255, 0));
    }

    #[test]
    fn default_top_color() {
        let ramp = ColorRamp::default();
        let top = ramp.color_for(0, 1);
        assert_eq!(top, Hsl::new(120.0, 75.0, 55.0));
        assert_eq!(top.to_rgb8(), Rgb8::new(54, 226, 54));
        assert_eq!(top.to_rgb8().to_hex(), "#36e236");
    }

    #[test]
    fn ends_of_the_ramp_hit_configured_hues() {
        let ramp = ColorRamp::default().with_hues(200.0, 20.0);
        for n in 2..12 {
            assert_eq!(ramp.color_for(0, n).h, 200.0);
            assert_eq!(ramp.color_for(n - 1, n).h, 20.0);
            assert_eq!(ramp.color_for(n - 1, n).l, 60.0);
        }
    }

    #[test]
    fn hue_decreases_monotonically() {
        let ramp = ColorRamp::default();
        let hues: std::vec::Vec<f64> = (0..6).map(|r| ramp.color_for(r, 6).h).collect();
        assert!(hues.windows(2).all(|w| w[0] > w[1]), "{hues:?}");
        assert_eq!(ramp.color_for(2, 5).h, 60.0);
    }

    #[test]
    fn empty_and_out_of_range_ranks_do_not_panic() {
        let ramp = ColorRamp::default();
        assert_eq!(ramp.color_for(0, 0).h, 120.0);
        assert_eq!(ramp.color_for(9, 3).h, 0.0);
    }
}
