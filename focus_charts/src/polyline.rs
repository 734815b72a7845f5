// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Straight-segment approximation of circular arcs.
//!
//! Some targets (flat vector drawing in generated documents, for instance) have no arc
//! primitive. For those we step along the arc and emit points to be joined with lines.

extern crate alloc;

use alloc::vec::Vec;

use kurbo::Point;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::geometry::{SectorPath, SectorShape, polar_to_cartesian};

/// Upper bound on segments per arc: one segment per thousandth of a degree over a full turn.
pub const MAX_SEGMENTS: usize = 360_000;

/// Arc-to-polyline settings.
///
/// The segment count for a sweep is `max(min_segments, ceil(|sweep| / degrees_per_segment))`,
/// capped at [`MAX_SEGMENTS`]: small slices still get a smooth edge, and large ones stay bounded
/// in point count.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PolylineApproximator {
    /// Lower bound on segments per arc.
    pub min_segments: usize,
    /// Angular step in degrees.
    pub degrees_per_segment: f64,
}

impl Default for PolylineApproximator {
    fn default() -> Self {
        Self {
            min_segments: 20,
            degrees_per_segment: 5.0,
        }
    }
}

impl PolylineApproximator {
    /// Creates an approximator.
    pub fn new(min_segments: usize, degrees_per_segment: f64) -> Self {
        Self {
            min_segments,
            degrees_per_segment,
        }
    }

    /// Sets the minimum segment count.
    pub fn with_min_segments(mut self, min_segments: usize) -> Self {
        self.min_segments = min_segments;
        self
    }

    /// Sets the angular step.
    pub fn with_degrees_per_segment(mut self, degrees_per_segment: f64) -> Self {
        self.degrees_per_segment = degrees_per_segment;
        self
    }

    /// Number of straight segments used for `sweep_angle`, in `1..=MAX_SEGMENTS`.
    pub fn segment_count(&self, sweep_angle: f64) -> usize {
        let floor = self.min_segments.clamp(1, MAX_SEGMENTS);
        let step = self.degrees_per_segment;
        if step.is_nan() || step <= 0.0 || !sweep_angle.is_finite() {
            return floor;
        }
        let sweep = sweep_angle.abs().min(360.0);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "finite, non-negative, and capped at MAX_SEGMENTS"
        )]
        let steps = (sweep / step).ceil().min(MAX_SEGMENTS as f64) as usize;
        steps.max(floor)
    }

    /// Points along the arc, from `start_angle` to `start_angle + sweep_angle` inclusive.
    ///
    /// Returns `segment_count + 1` points, or none for non-finite input.
    pub fn approximate_arc(
        &self,
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Vec<Point> {
        let mut out = Vec::new();
        self.extend_arc(&mut out, center, radius, start_angle, sweep_angle);
        out
    }

    /// Closed pie outline: center, then the arc. The consumer closes back to the center.
    pub fn pie_polygon(
        &self,
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Vec<Point> {
        let mut out = Vec::new();
        out.push(center);
        self.extend_arc(&mut out, center, radius, start_angle, sweep_angle);
        out
    }

    /// Closed donut outline: the outer arc forward, then the inner arc backward.
    pub fn donut_polygon(
        &self,
        center: Point,
        inner_radius: f64,
        outer_radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) -> Vec<Point> {
        let mut out = Vec::new();
        self.extend_arc(&mut out, center, outer_radius, start_angle, sweep_angle);
        let outer_len = out.len();
        self.extend_arc(&mut out, center, inner_radius, start_angle, sweep_angle);
        out[outer_len..].reverse();
        out
    }

    /// Polygonal outline of `shape` as move/line/close commands only.
    pub fn sector_path(&self, shape: &SectorShape) -> SectorPath {
        let points = if shape.inner_radius > 0.0 {
            self.donut_polygon(
                shape.center,
                shape.inner_radius,
                shape.outer_radius,
                shape.start_angle,
                shape.sweep_angle,
            )
        } else {
            self.pie_polygon(
                shape.center,
                shape.outer_radius,
                shape.start_angle,
                shape.sweep_angle,
            )
        };
        SectorPath::from_polygon(&points)
    }

    fn extend_arc(
        &self,
        out: &mut Vec<Point>,
        center: Point,
        radius: f64,
        start_angle: f64,
        sweep_angle: f64,
    ) {
        if !(start_angle.is_finite() && sweep_angle.is_finite() && radius.is_finite()) {
            return;
        }
        let sweep = sweep_angle.clamp(-360.0, 360.0);
        let segments = self.segment_count(sweep);
        let step = sweep / segments as f64;
        out.reserve(segments + 1);
        out.extend(
            (0..=segments)
                .map(|i| polar_to_cartesian(center, radius, start_angle + step * i as f64)),
        );
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn segment_count_has_a_floor_and_a_step() {
        let approx = PolylineApproximator::default();
        assert_eq!(approx.segment_count(0.0), 20);
        assert_eq!(approx.segment_count(36.0), 20);
        assert_eq!(approx.segment_count(100.0), 20);
        assert_eq!(approx.segment_count(101.0), 21);
        assert_eq!(approx.segment_count(180.0), 36);
        assert_eq!(approx.segment_count(-180.0), 36);
        assert_eq!(approx.segment_count(360.0), 72);
        assert_eq!(approx.segment_count(5000.0), 72);
    }

    #[test]
    fn degenerate_settings_still_produce_a_segment() {
        let approx = PolylineApproximator::new(0, 0.0);
        assert_eq!(approx.segment_count(90.0), 1);
        assert_eq!(approx.segment_count(f64::NAN), 1);
    }

    #[test]
    fn segment_count_is_capped() {
        assert_eq!(
            PolylineApproximator::new(usize::MAX, 5.0).segment_count(90.0),
            MAX_SEGMENTS
        );
        assert_eq!(
            PolylineApproximator::new(20, 1e-300).segment_count(90.0),
            MAX_SEGMENTS
        );
        let pts = PolylineApproximator::new(usize::MAX, 5.0).approximate_arc(
            Point::ZERO,
            1.0,
            0.0,
            90.0,
        );
        assert_eq!(pts.len(), MAX_SEGMENTS + 1);
    }

    #[test]
    fn builders_override_defaults() {
        let approx = PolylineApproximator::default()
            .with_min_segments(4)
            .with_degrees_per_segment(30.0);
        assert_eq!(approx, PolylineApproximator::new(4, 30.0));
        assert_eq!(approx.segment_count(90.0), 4);
        assert_eq!(approx.segment_count(180.0), 6);
    }

    #[test]
    fn arc_points_span_the_sweep() {
        let approx = PolylineApproximator::default();
        let c = Point::new(100.0, 100.0);
        let pts = approx.approximate_arc(c, 50.0, -90.0, 180.0);
        assert_eq!(pts.len(), 37);
        assert!(close(pts[0], Point::new(100.0, 50.0)));
        assert!(close(pts[36], Point::new(100.0, 150.0)));
        assert!(close(pts[18], Point::new(150.0, 100.0)));
        assert!(pts.iter().all(|p| ((*p - c).hypot() - 50.0).abs() < 1e-9));
    }

    #[test]
    fn pie_polygon_starts_at_center() {
        let approx = PolylineApproximator::new(8, 15.0);
        let c = Point::new(0.0, 0.0);
        let pts = approx.pie_polygon(c, 10.0, 0.0, 90.0);
        assert_eq!(pts.len(), 10);
        assert_eq!(pts[0], c);
    }

    #[test]
    fn donut_polygon_walks_back_along_inner_edge() {
        let approx = PolylineApproximator::new(4, 90.0);
        let c = Point::new(0.0, 0.0);
        let pts = approx.donut_polygon(c, 5.0, 10.0, 0.0, 90.0);
        assert_eq!(pts.len(), 10);
        assert!(close(pts[0], Point::new(10.0, 0.0)));
        assert!(close(pts[4], Point::new(0.0, 10.0)));
        assert!(close(pts[5], Point::new(0.0, 5.0)));
        assert!(close(pts[9], Point::new(5.0, 0.0)));
    }

    #[test]
    fn sector_path_is_arc_free() {
        let approx = PolylineApproximator::default();
        let shape = SectorShape {
            center: Point::new(0.0, 0.0),
            inner_radius: 5.0,
            outer_radius: 10.0,
            start_angle: -90.0,
            sweep_angle: 360.0,
        };
        let path = approx.sector_path(&shape);
        assert_eq!(path.arc_count(), 0);
        // 73 outer and 73 inner points, then the closing command.
        assert_eq!(path.commands().len(), 2 * 73 + 1);
    }

    #[test]
    fn non_finite_input_yields_no_points() {
        let approx = PolylineApproximator::default();
        assert!(
            approx
                .approximate_arc(Point::ZERO, 1.0, f64::NAN, 10.0)
                .is_empty()
        );
    }
}
