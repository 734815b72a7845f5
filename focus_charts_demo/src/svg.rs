// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Minimal SVG writer for `focus_charts_demo`.

use std::fmt::Write as _;

use focus_charts::SectorPath;
use kurbo::{Point, Rect, Shape};
use peniko::Color;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextAnchor {
    Start,
    Middle,
}

/// Accumulates SVG elements and their rough bounds.
#[derive(Debug, Default)]
pub(crate) struct SvgDocument {
    body: String,
    bounds: Option<Rect>,
    view_box: Option<Rect>,
}

impl SvgDocument {
    /// Uses a fixed view box instead of one derived from the content (paginated output).
    pub(crate) fn with_view_box(view_box: Rect) -> Self {
        Self {
            view_box: Some(view_box),
            ..Self::default()
        }
    }

    pub(crate) fn path(&mut self, path: &SectorPath, fill: Color, stroke: Option<(Color, f64)>) {
        if path.is_empty() {
            return;
        }
        let _ = write!(self.body, r#"<path d="{path}""#);
        write_paint_attr(&mut self.body, "fill", fill);
        if let Some((color, width)) = stroke {
            write_paint_attr(&mut self.body, "stroke", color);
            let _ = write!(
                self.body,
                r#" stroke-width="{width}" stroke-linejoin="round""#
            );
        }
        self.body.push_str("/>\n");
        self.include(path.to_bez_path(0.1).bounding_box());
    }

    pub(crate) fn rect(&mut self, rect: Rect, fill: Color) {
        let _ = write!(
            self.body,
            r#"<rect x="{}" y="{}" width="{}" height="{}""#,
            rect.x0,
            rect.y0,
            rect.width(),
            rect.height()
        );
        write_paint_attr(&mut self.body, "fill", fill);
        self.body.push_str("/>\n");
        self.include(rect);
    }

    pub(crate) fn text(
        &mut self,
        pos: Point,
        font_size: f64,
        anchor: TextAnchor,
        fill: Color,
        bold: bool,
        text: &str,
    ) {
        let anchor_attr = match anchor {
            TextAnchor::Start => "start",
            TextAnchor::Middle => "middle",
        };
        let _ = write!(
            self.body,
            r#"<text x="{}" y="{}" font-size="{font_size}" font-family="Helvetica, Arial, sans-serif" text-anchor="{anchor_attr}" dominant-baseline="middle""#,
            pos.x,
            pos.y,
        );
        write_paint_attr(&mut self.body, "fill", fill);
        if bold {
            self.body.push_str(r#" font-weight="bold""#);
        }
        self.body.push('>');
        self.body.push_str(&escape_xml(text));
        self.body.push_str("</text>\n");
        self.include(estimate_text_bounds(pos, font_size, anchor, text));
    }

    pub(crate) fn to_svg_string(&self) -> String {
        let view_box = self
            .view_box
            .or_else(|| {
                // Add a small padding margin.
                let pad = 10.0;
                self.bounds
                    .map(|r| Rect::new(r.x0 - pad, r.y0 - pad, r.x1 + pad, r.y1 + pad))
            })
            .unwrap_or_else(|| Rect::new(0.0, 0.0, 100.0, 100.0));

        let mut out = String::new();
        out.push_str(r#"<svg xmlns="http://www.w3.org/2000/svg" "#);
        let _ = writeln!(
            out,
            r#"viewBox="{} {} {} {}" width="{}" height="{}" preserveAspectRatio="xMinYMin meet">"#,
            view_box.x0,
            view_box.y0,
            view_box.width(),
            view_box.height(),
            view_box.width(),
            view_box.height()
        );
        out.push_str(&self.body);
        out.push_str("</svg>\n");
        out
    }

    fn include(&mut self, rect: Rect) {
        self.bounds = Some(match self.bounds {
            None => rect,
            Some(r) => r.union(rect),
        });
    }
}

fn estimate_text_bounds(pos: Point, font_size: f64, anchor: TextAnchor, text: &str) -> Rect {
    // Very rough heuristic: assume ~0.6em average glyph width.
    let width = 0.6 * font_size * text.chars().count() as f64;
    let half_height = 0.5 * font_size;
    let (x0, x1) = match anchor {
        TextAnchor::Start => (pos.x, pos.x + width),
        TextAnchor::Middle => (pos.x - width / 2.0, pos.x + width / 2.0),
    };
    Rect::new(x0, pos.y - half_height, x1, pos.y + half_height)
}

/// Hex color plus a separate opacity when the color isn't opaque.
fn svg_paint(color: Color) -> (String, Option<f64>) {
    let rgba = color.to_rgba8();
    let value = format!("#{:02x}{:02x}{:02x}", rgba.r, rgba.g, rgba.b);
    let opacity = if rgba.a == 255 {
        None
    } else {
        Some(f64::from(rgba.a) / 255.0)
    };
    (value, opacity)
}

fn write_paint_attr(out: &mut String, name: &str, color: Color) {
    let (value, opacity) = svg_paint(color);
    let _ = write!(out, r#" {name}="{value}""#);
    if let Some(o) = opacity {
        let _ = write!(out, r#" {name}-opacity="{o}""#);
    }
}

fn escape_xml(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
