// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Circular sector geometry.
//!
//! Angles are in degrees, with 0° pointing along +x and angles increasing clockwise in a y-down
//! coordinate system (SVG/canvas convention). Charts typically start at -90° (12 o'clock).
//!
//! A [`SectorPath`] is a renderer-agnostic list of draw commands. It can be serialized as SVG
//! path data (via `Display`) or flattened into a `kurbo::BezPath` for brush-based renderers.
//! Targets without a native arc primitive should use [`ArcMode::Polyline`], which emits only
//! straight segments.

extern crate alloc;

use core::fmt;

use kurbo::{Arc, BezPath, Point, SvgArc, Vec2};
use smallvec::SmallVec;

#[cfg(not(feature = "std"))]
use crate::float::FloatExt;
use crate::polyline::PolylineApproximator;

/// Largest sweep a single sector can represent.
const FULL_TURN: f64 = 360.0;

/// Wraps an angle in degrees into `[0, 360)`.
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = deg % FULL_TURN;
    if wrapped < 0.0 { wrapped + FULL_TURN } else { wrapped }
}

/// Converts polar coordinates (angle in degrees) to a cartesian point.
pub fn polar_to_cartesian(center: Point, radius: f64, angle_deg: f64) -> Point {
    let rad = angle_deg.to_radians();
    Point::new(center.x + radius * rad.cos(), center.y + radius * rad.sin())
}

/// One drawing command in a [`SectorPath`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    /// Start a new subpath.
    MoveTo(Point),
    /// Straight line from the current point.
    LineTo(Point),
    /// Elliptical arc from the current point, with SVG semantics.
    ArcTo {
        /// Ellipse radii (equal for circular arcs).
        radii: Vec2,
        /// Ellipse rotation in degrees.
        x_rotation: f64,
        /// Take the longer of the two candidate arcs.
        large_arc: bool,
        /// Draw in the positive-angle (clockwise on screen) direction.
        sweep: bool,
        /// Arc end point.
        to: Point,
    },
    /// Close the current subpath.
    Close,
}

/// Ordered draw commands describing a sector outline.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SectorPath {
    commands: SmallVec<[PathCommand; 8]>,
}

impl SectorPath {
    /// Creates an empty path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a closed polygon from `points` (move to the first, line to the rest, close).
    pub fn from_polygon(points: &[Point]) -> Self {
        let mut path = Self::new();
        let mut iter = points.iter().copied();
        if let Some(first) = iter.next() {
            path.push(PathCommand::MoveTo(first));
            path.commands.extend(iter.map(PathCommand::LineTo));
            path.push(PathCommand::Close);
        }
        path
    }

    /// Appends a command.
    pub fn push(&mut self, command: PathCommand) {
        self.commands.push(command);
    }

    /// The commands, in drawing order.
    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    /// Returns `true` if the path has no commands.
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Number of arc commands.
    pub fn arc_count(&self) -> usize {
        self.commands
            .iter()
            .filter(|c| matches!(c, PathCommand::ArcTo { .. }))
            .count()
    }

    /// Returns `true` if any arc command has the large-arc flag set.
    pub fn has_large_arc(&self) -> bool {
        self.commands
            .iter()
            .any(|c| matches!(c, PathCommand::ArcTo { large_arc: true, .. }))
    }

    /// Converts to a `BezPath`, approximating arcs with cubic curves within `tolerance`.
    pub fn to_bez_path(&self, tolerance: f64) -> BezPath {
        let mut path = BezPath::new();
        let mut current = Point::ZERO;
        let mut start = Point::ZERO;
        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(p) => {
                    path.move_to(p);
                    current = p;
                    start = p;
                }
                PathCommand::LineTo(p) => {
                    path.line_to(p);
                    current = p;
                }
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => {
                    let arc = SvgArc {
                        from: current,
                        to,
                        radii,
                        x_rotation: x_rotation.to_radians(),
                        large_arc,
                        sweep,
                    };
                    match Arc::from_svg_arc(&arc) {
                        Some(arc) => {
                            for el in arc.append_iter(tolerance) {
                                path.push(el);
                            }
                        }
                        // Degenerate (zero radius or coincident endpoints).
                        None => path.line_to(to),
                    }
                    current = to;
                }
                PathCommand::Close => {
                    path.close_path();
                    current = start;
                }
            }
        }
        path
    }
}

impl fmt::Display for SectorPath {
    /// Writes SVG path data.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match command {
                PathCommand::MoveTo(p) => write!(f, "M {} {}", p.x, p.y)?,
                PathCommand::LineTo(p) => write!(f, "L {} {}", p.x, p.y)?,
                PathCommand::ArcTo {
                    radii,
                    x_rotation,
                    large_arc,
                    sweep,
                    to,
                } => write!(
                    f,
                    "A {} {} {} {} {} {} {}",
                    radii.x,
                    radii.y,
                    x_rotation,
                    u8::from(*large_arc),
                    u8::from(*sweep),
                    to.x,
                    to.y
                )?,
                PathCommand::Close => f.write_str("Z")?,
            }
        }
        Ok(())
    }
}

/// Appends a circular arc starting at the current point (which must be on the circle at
/// `start`).
///
/// Full turns are split into two half arcs; many arc renderers draw nothing when start and end
/// coincide.
fn push_arc(path: &mut SectorPath, center: Point, radius: f64, start: f64, sweep: f64) {
    let radii = Vec2::new(radius, radius);
    let clockwise = sweep >= 0.0;
    if sweep.abs() >= FULL_TURN {
        let half = sweep / 2.0;
        for end in [start + half, start + sweep] {
            path.push(PathCommand::ArcTo {
                radii,
                x_rotation: 0.0,
                large_arc: false,
                sweep: clockwise,
                to: polar_to_cartesian(center, radius, end),
            });
        }
    } else {
        path.push(PathCommand::ArcTo {
            radii,
            x_rotation: 0.0,
            large_arc: sweep.abs() > 180.0,
            sweep: clockwise,
            to: polar_to_cartesian(center, radius, start + sweep),
        });
    }
}

fn clamp_sweep(sweep: f64) -> f64 {
    sweep.clamp(-FULL_TURN, FULL_TURN)
}

fn finite(values: &[f64]) -> bool {
    values.iter().all(|v| v.is_finite())
}

/// Builds an annulus (donut) sector between `start_angle` and `end_angle`.
///
/// The outline runs along the outer arc, across to the inner radius, back along the inner arc
/// in reverse, and closes. An `inner_radius` of zero or less degrades to [`pie_slice_path`].
/// Non-finite inputs produce an empty path.
pub fn donut_path(
    center: Point,
    inner_radius: f64,
    outer_radius: f64,
    start_angle: f64,
    end_angle: f64,
) -> SectorPath {
    if !finite(&[
        center.x,
        center.y,
        inner_radius,
        outer_radius,
        start_angle,
        end_angle,
    ]) {
        return SectorPath::new();
    }
    let start = normalize_degrees(start_angle);
    let sweep = clamp_sweep(end_angle - start_angle);
    if inner_radius <= 0.0 {
        return pie_slice_path(center, outer_radius, start, sweep);
    }
    let end = start + sweep;

    let mut path = SectorPath::new();
    path.push(PathCommand::MoveTo(polar_to_cartesian(
        center,
        outer_radius,
        start,
    )));
    push_arc(&mut path, center, outer_radius, start, sweep);
    path.push(PathCommand::LineTo(polar_to_cartesian(
        center,
        inner_radius,
        end,
    )));
    push_arc(&mut path, center, inner_radius, end, -sweep);
    path.push(PathCommand::Close);
    path
}

/// Builds a pie slice: center, out to the start point, arc to the end point, back to center.
pub fn pie_slice_path(
    center: Point,
    radius: f64,
    start_angle: f64,
    sweep_angle: f64,
) -> SectorPath {
    if !finite(&[center.x, center.y, radius, start_angle, sweep_angle]) {
        return SectorPath::new();
    }
    let start = normalize_degrees(start_angle);
    let sweep = clamp_sweep(sweep_angle);

    let mut path = SectorPath::new();
    path.push(PathCommand::MoveTo(center));
    path.push(PathCommand::LineTo(polar_to_cartesian(center, radius, start)));
    push_arc(&mut path, center, radius, start, sweep);
    path.push(PathCommand::Close);
    path
}

/// How arcs are emitted, chosen by what the rendering target supports.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum ArcMode {
    /// Native arc commands (SVG, canvas).
    #[default]
    Native,
    /// Straight-segment approximation for targets without arcs (paginated export).
    Polyline(PolylineApproximator),
}

/// A sector described by its center, radii and angular extent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SectorShape {
    /// Center point.
    pub center: Point,
    /// Inner radius (0 for a pie slice).
    pub inner_radius: f64,
    /// Outer radius.
    pub outer_radius: f64,
    /// Start angle in degrees.
    pub start_angle: f64,
    /// Sweep in degrees (positive is clockwise).
    pub sweep_angle: f64,
}

impl SectorShape {
    /// End angle in degrees.
    pub fn end_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle
    }

    /// Angle halfway through the sweep.
    pub fn mid_angle(&self) -> f64 {
        self.start_angle + self.sweep_angle / 2.0
    }

    /// Point at `radius` along the mid angle (label anchor).
    pub fn point_at_mid(&self, radius: f64) -> Point {
        polar_to_cartesian(self.center, radius, self.mid_angle())
    }

    /// Outline in the requested arc mode.
    pub fn path(&self, mode: ArcMode) -> SectorPath {
        match mode {
            ArcMode::Native => donut_path(
                self.center,
                self.inner_radius,
                self.outer_radius,
                self.start_angle,
                self.end_angle(),
            ),
            ArcMode::Polyline(approx) => approx.sector_path(self),
        }
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use alloc::string::ToString;

    use kurbo::Shape;

    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a - b).hypot() < 1e-9
    }

    #[test]
    fn polar_conversion_starts_at_twelve_oclock() {
        let c = Point::new(200.0, 200.0);
        assert!(close(polar_to_cartesian(c, 180.0, -90.0), Point::new(200.0, 20.0)));
        assert!(close(polar_to_cartesian(c, 180.0, 0.0), Point::new(380.0, 200.0)));
        assert!(close(polar_to_cartesian(c, 180.0, 90.0), Point::new(200.0, 380.0)));
    }

    #[test]
    fn large_arc_only_past_half_turn() {
        let c = Point::new(0.0, 0.0);
        assert!(donut_path(c, 5.0, 10.0, -90.0, 110.1).has_large_arc());
        assert!(!donut_path(c, 5.0, 10.0, -90.0, 90.0).has_large_arc());
        assert!(!donut_path(c, 5.0, 10.0, 0.0, 45.0).has_large_arc());
        assert!(pie_slice_path(c, 10.0, -90.0, 250.0).has_large_arc());
        assert!(!pie_slice_path(c, 10.0, -90.0, 180.0).has_large_arc());
    }

    #[test]
    fn donut_outline_order() {
        let c = Point::new(0.0, 0.0);
        let path = donut_path(c, 5.0, 10.0, 0.0, 90.0);
        let cmds = path.commands();
        assert_eq!(cmds.len(), 5);
        let PathCommand::MoveTo(p0) = cmds[0] else {
            panic!("expected move");
        };
        assert!(close(p0, Point::new(10.0, 0.0)));
        let PathCommand::ArcTo { to, sweep, .. } = cmds[1] else {
            panic!("expected outer arc");
        };
        assert!(sweep);
        assert!(close(to, Point::new(0.0, 10.0)));
        let PathCommand::LineTo(p2) = cmds[2] else {
            panic!("expected line to inner end");
        };
        assert!(close(p2, Point::new(0.0, 5.0)));
        let PathCommand::ArcTo { to, sweep, radii, .. } = cmds[3] else {
            panic!("expected inner arc");
        };
        assert!(!sweep);
        assert_eq!(radii, Vec2::new(5.0, 5.0));
        assert!(close(to, Point::new(5.0, 0.0)));
        assert_eq!(cmds[4], PathCommand::Close);
    }

    #[test]
    fn pie_slice_starts_and_ends_at_center() {
        let c = Point::new(3.0, 4.0);
        let path = pie_slice_path(c, 10.0, -90.0, 45.0);
        assert_eq!(path.commands()[0], PathCommand::MoveTo(c));
        assert_eq!(path.commands().last(), Some(&PathCommand::Close));
        assert_eq!(path.arc_count(), 1);
        assert!(path.to_string().starts_with("M 3 4 L "));
    }

    #[test]
    fn full_circle_is_split() {
        let c = Point::new(0.0, 0.0);
        assert_eq!(pie_slice_path(c, 10.0, -90.0, 360.0).arc_count(), 2);
        assert_eq!(donut_path(c, 5.0, 10.0, -90.0, 270.0).arc_count(), 4);

        let area = donut_path(c, 5.0, 10.0, -90.0, 270.0).to_bez_path(1e-3).area().abs();
        let expected = core::f64::consts::PI * (100.0 - 25.0);
        assert!((area - expected).abs() / expected < 1e-3, "area={area}");
    }

    #[test]
    fn oversized_sweep_is_clamped_to_one_turn() {
        let c = Point::new(0.0, 0.0);
        assert_eq!(
            pie_slice_path(c, 10.0, 0.0, 720.0),
            pie_slice_path(c, 10.0, 0.0, 360.0)
        );
    }

    #[test]
    fn zero_sweep_has_zero_area() {
        let c = Point::new(0.0, 0.0);
        let path = donut_path(c, 5.0, 10.0, 30.0, 30.0);
        assert!(!path.is_empty());
        assert!(path.to_bez_path(0.1).area().abs() < 1e-9);
    }

    #[test]
    fn zero_inner_radius_degrades_to_pie() {
        let c = Point::new(0.0, 0.0);
        assert_eq!(
            donut_path(c, 0.0, 10.0, 10.0, 100.0),
            pie_slice_path(c, 10.0, 10.0, 90.0)
        );
    }

    #[test]
    fn angles_outside_one_turn_are_normalized() {
        let c = Point::new(0.0, 0.0);
        let a = donut_path(c, 5.0, 10.0, -90.0, 0.0);
        let b = donut_path(c, 5.0, 10.0, 270.0, 360.0);
        assert_eq!(a.commands().len(), b.commands().len());
        for (x, y) in a.commands().iter().zip(b.commands()) {
            match (x, y) {
                (PathCommand::MoveTo(p), PathCommand::MoveTo(q))
                | (PathCommand::LineTo(p), PathCommand::LineTo(q))
                | (PathCommand::ArcTo { to: p, .. }, PathCommand::ArcTo { to: q, .. }) => {
                    assert!(close(*p, *q));
                }
                (PathCommand::Close, PathCommand::Close) => {}
                _ => panic!("command mismatch: {x:?} vs {y:?}"),
            }
        }
    }

    #[test]
    fn non_finite_input_yields_empty_path() {
        let c = Point::new(0.0, 0.0);
        assert!(donut_path(c, 5.0, 10.0, f64::NAN, 10.0).is_empty());
        assert!(pie_slice_path(c, f64::INFINITY, 0.0, 10.0).is_empty());
    }

    #[test]
    fn quarter_donut_area() {
        let c = Point::new(50.0, 50.0);
        let bez = donut_path(c, 10.0, 20.0, 0.0, 90.0).to_bez_path(1e-4);
        let expected = core::f64::consts::PI * (400.0 - 100.0) / 4.0;
        assert!((bez.area().abs() - expected).abs() / expected < 1e-3);
        let bbox = bez.bounding_box();
        assert!((bbox.x1 - 70.0).abs() < 1e-3);
        assert!((bbox.y1 - 70.0).abs() < 1e-3);
    }

    #[test]
    fn polygon_path_has_no_arcs() {
        let pts = [
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(0.0, 1.0),
        ];
        let path = SectorPath::from_polygon(&pts);
        assert_eq!(path.arc_count(), 0);
        assert_eq!(path.commands().len(), 4);
        assert_eq!(path.to_string(), "M 0 0 L 1 0 L 0 1 Z");
        assert!(SectorPath::from_polygon(&[]).is_empty());
    }
}
