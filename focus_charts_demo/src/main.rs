// Copyright 2025 the VizIR Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus budget demo.
//!
//! Keeps a ranked list in a JSON store, applies reorder commands from the command line, and
//! renders the allocation as a donut chart SVG plus an optional printable export page that uses
//! only polyline geometry.

mod ids;
mod storage;
mod svg;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use focus_charts::{
    ArcMode, ColorRamp, DonutChartSpec, LegendLabel, LegendSpec, PolylineApproximator, SectorPath,
    SliceGeometry, format_percent,
};
use focus_core::{Change, Command, FocusItem, ItemId, ReorderEngine};
use kurbo::{Point, Rect};
use peniko::Color;
use tracing_subscriber::EnvFilter;

use crate::ids::UuidIds;
use crate::svg::{SvgDocument, TextAnchor};

const WHITE: Color = Color::from_rgb8(255, 255, 255);
const INK: Color = Color::from_rgb8(17, 24, 39);
const HIGHLIGHT: Color = Color::from_rgb8(11, 13, 18);

/// Left margin of the export page, in millimetres.
const PAGE_MARGIN: f64 = 20.0;

/// Guidance printed under the export legend. Each group is one bullet; later lines wrap.
const APPLY_GUIDANCE: [&[&str]; 6] = [
    &["Begin work with the largest green slices. These are our highest priorities."],
    &["Time, energy, and decision-making should be spent in proportion to slice size."],
    &[
        "Smaller slices are intentionally smaller. They are not ignored, but they do not",
        "receive focus until higher-priority areas are covered.",
    ],
    &["Requests, new work, or scope changes should be evaluated against this budget."],
    &["Increasing focus in one area requires reducing it elsewhere."],
    &[
        "This focus budget is a snapshot in time. It can be revisited and adjusted, but until it is,",
        "it represents the agreed-upon order of operations.",
    ],
];

#[derive(Debug, Parser)]
#[command(name = "focus_charts_demo", version, about = "Rank your priorities and chart the split")]
struct Cli {
    /// JSON file holding the ranked list.
    #[arg(long, global = true, default_value = "focus_budget.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Cmd,
}

/// Items are addressed by id or by 1-based rank.
#[derive(Debug, Subcommand)]
enum Cmd {
    /// Append items at the lowest rank.
    Add {
        #[arg(required = true)]
        texts: Vec<String>,
    },
    /// Remove an item.
    Remove { item: String },
    /// Move an item to rank 1.
    Top { item: String },
    /// Move an item up one rank.
    Up { item: String },
    /// Move an item down one rank.
    Down { item: String },
    /// Move an item to the last rank.
    Bottom { item: String },
    /// Drop `from` onto the rank `to` currently holds.
    Move { from: String, to: String },
    /// Replace an item's label.
    Rename { item: String, text: String },
    /// Remove every item.
    Clear,
    /// Print the ranked list.
    List,
    /// Write the donut chart (and optionally the export page) as SVG.
    Render(RenderArgs),
}

#[derive(Debug, Args)]
struct RenderArgs {
    /// Output path for the chart.
    #[arg(long, default_value = "focus_budget.svg")]
    out: PathBuf,
    /// Also write the printable export page here.
    #[arg(long)]
    export: Option<PathBuf>,
    #[arg(long, default_value_t = 180.0)]
    outer_radius: f64,
    /// Inner radius; 0 draws a pie.
    #[arg(long, default_value_t = 90.0)]
    inner_radius: f64,
    /// Angle of the first slice edge in degrees (-90 is 12 o'clock).
    #[arg(long, default_value_t = -90.0, allow_negative_numbers = true)]
    start_angle: f64,
    /// Label radius; defaults to the ring midline.
    #[arg(long)]
    label_radius: Option<f64>,
    /// Slices narrower than this many degrees get no percent label.
    #[arg(long, default_value_t = 15.0)]
    min_label_sweep: f64,
    #[command(flatten)]
    ramp: RampArgs,
    /// Minimum segments per polyline arc on the export page.
    #[arg(long, default_value_t = 8)]
    min_segments: usize,
    /// Maximum degrees per polyline segment on the export page.
    #[arg(long, default_value_t = 15.0)]
    degrees_per_segment: f64,
    /// Label legend rows with item text instead of "Item N".
    #[arg(long)]
    item_text: bool,
    /// Outline this item's slice.
    #[arg(long)]
    select: Option<String>,
}

/// Rank color ramp, top rank to bottom rank.
#[derive(Clone, Copy, Debug, Args)]
struct RampArgs {
    #[arg(long, default_value_t = 120.0, allow_negative_numbers = true)]
    top_hue: f64,
    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    bottom_hue: f64,
    /// Saturation in percent.
    #[arg(long, default_value_t = 75.0)]
    saturation: f64,
    /// Lightness of the top rank in percent.
    #[arg(long, default_value_t = 55.0)]
    top_lightness: f64,
    /// Lightness of the bottom rank in percent.
    #[arg(long, default_value_t = 60.0)]
    bottom_lightness: f64,
}

impl RampArgs {
    fn ramp(self) -> ColorRamp {
        ColorRamp::default()
            .with_hues(self.top_hue, self.bottom_hue)
            .with_saturation(self.saturation)
            .with_lightness(self.top_lightness, self.bottom_lightness)
    }
}

impl RenderArgs {
    fn chart_spec(&self, center: Point, inner_radius: f64, outer_radius: f64) -> DonutChartSpec {
        let spec = DonutChartSpec::new(center, inner_radius, outer_radius)
            .with_start_angle(self.start_angle)
            .with_ramp(self.ramp.ramp())
            .with_min_label_sweep(self.min_label_sweep);
        match self.label_radius {
            Some(radius) => spec.with_label_radius(radius),
            None => spec,
        }
    }

    fn approximator(&self) -> PolylineApproximator {
        PolylineApproximator::default()
            .with_min_segments(self.min_segments)
            .with_degrees_per_segment(self.degrees_per_segment)
    }
}

fn main() -> Result<()> {
    init_tracing();
    run(Cli::parse())
}

fn run(cli: Cli) -> Result<()> {
    // Clearing never needs the old contents, so an unreadable or oversized store can still be reset.
    if matches!(cli.command, Cmd::Clear) {
        storage::save(&cli.store, &[])?;
        tracing::debug!(store = %cli.store.display(), "cleared focus store");
        print_list(&[]);
        return Ok(());
    }

    let mut engine = ReorderEngine::restore(UuidIds, storage::load(&cli.store))
        .context("stored focus list is too long; run `clear` to reset it")?;
    tracing::debug!(items = engine.len(), store = %cli.store.display(), "loaded focus list");

    let commands = match cli.command {
        Cmd::List | Cmd::Clear => Vec::new(),
        Cmd::Render(args) => return render(&mut engine, &args),
        Cmd::Add { texts } => texts.into_iter().map(|text| Command::Add { text }).collect(),
        Cmd::Remove { item } => vec![Command::Remove(resolve(&engine, &item))],
        Cmd::Top { item } => vec![Command::MoveToTop(resolve(&engine, &item))],
        Cmd::Up { item } => vec![Command::MoveUp(resolve(&engine, &item))],
        Cmd::Down { item } => vec![Command::MoveDown(resolve(&engine, &item))],
        Cmd::Bottom { item } => vec![Command::MoveToBottom(resolve(&engine, &item))],
        Cmd::Move { from, to } => vec![Command::Reposition {
            from: resolve(&engine, &from),
            to: resolve(&engine, &to),
        }],
        Cmd::Rename { item, text } => vec![Command::Rename {
            id: resolve(&engine, &item),
            text,
        }],
    };

    let mut dirty = false;
    for command in commands {
        match engine.apply(command)? {
            Change::InvalidReference(id) => bail!("no item with id or rank `{id}`"),
            change => dirty |= change.is_change(),
        }
    }
    if dirty {
        storage::save(&cli.store, engine.items())?;
    }
    print_list(engine.items());
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,focus_charts_demo=debug"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .try_init();
}

/// Maps a CLI reference to an id: a 1-based rank if it parses as one, otherwise a raw id.
fn resolve<G>(engine: &ReorderEngine<G>, key: &str) -> ItemId
where
    G: focus_core::IdGenerator,
{
    key.parse::<usize>()
        .ok()
        .and_then(|rank| rank.checked_sub(1))
        .and_then(|rank| engine.items().get(rank))
        .map_or_else(|| ItemId::from(key), |item| item.id().clone())
}

fn print_list(items: &[FocusItem]) {
    if items.is_empty() {
        println!("(no items)");
        return;
    }
    for (rank, item) in items.iter().enumerate() {
        println!(
            "{:>3}. {:>6}  {}  [{}]",
            rank + 1,
            format_percent(item.percent()),
            item.text(),
            item.id()
        );
    }
}

fn render(engine: &mut ReorderEngine<UuidIds>, args: &RenderArgs) -> Result<()> {
    if let Some(key) = &args.select {
        let id = resolve(engine, key);
        if let Change::InvalidReference(id) = engine.select(&id) {
            bail!("no item with id or rank `{id}`");
        }
    }

    let chart = chart_svg(engine, args);
    write_svg(&args.out, &chart)?;

    if let Some(path) = &args.export {
        write_svg(path, &export_svg(engine.items(), args))?;
    }
    Ok(())
}

fn write_svg(path: &Path, svg: &str) -> Result<()> {
    std::fs::write(path, svg).with_context(|| format!("failed to write {}", path.display()))?;
    tracing::info!(path = %path.display(), "wrote svg");
    Ok(())
}

fn slice_labels(doc: &mut SvgDocument, slices: &[SliceGeometry], font_size: f64) {
    for slice in slices.iter().filter(|s| s.show_label) {
        doc.text(
            slice.label_anchor,
            font_size,
            TextAnchor::Middle,
            WHITE,
            true,
            &slice.percent_label(),
        );
    }
}

fn legend(doc: &mut SvgDocument, spec: &LegendSpec, slices: &[SliceGeometry]) {
    for row in spec.rows(slices) {
        doc.rect(row.swatch, row.color.to_color());
        doc.text(
            row.label_pos,
            spec.font_size,
            TextAnchor::Start,
            INK,
            false,
            &row.label,
        );
    }
}

fn legend_label(item_text: bool) -> LegendLabel {
    if item_text {
        LegendLabel::Text
    } else {
        LegendLabel::Rank
    }
}

/// The interactive-style chart: native arcs, an outlined selection, legend to the right.
fn chart_svg<G: focus_core::IdGenerator>(engine: &ReorderEngine<G>, args: &RenderArgs) -> String {
    let outer = args.outer_radius;
    let center = Point::new(outer + 20.0, outer + 20.0);
    let spec = args.chart_spec(center, args.inner_radius, outer);
    let slices = spec.slices(engine.items());

    let mut doc = SvgDocument::default();
    for slice in &slices {
        let stroke = (engine.selected() == Some(&slice.id)).then_some((HIGHLIGHT, 3.0));
        doc.path(&slice.path(ArcMode::Native), slice.color(), stroke);
    }
    slice_labels(&mut doc, &slices, 14.0);

    let legend_spec = LegendSpec::new(Point::new(center.x + outer + 40.0, center.y - outer))
        .with_label(legend_label(args.item_text));
    legend(&mut doc, &legend_spec, &slices);
    doc.to_svg_string()
}

/// A portrait A4 page in millimetres, drawn without arc commands so any consumer can rasterize
/// it: the ring, a compact legend, then the guidance text.
fn export_svg(items: &[FocusItem], args: &RenderArgs) -> String {
    let page = Rect::new(0.0, 0.0, 210.0, 297.0);
    let center = Point::new(105.0, 60.0);
    let (outer, inner) = (35.0, 18.0);
    let approx = args.approximator();
    let mode = ArcMode::Polyline(approx);

    let mut doc = SvgDocument::with_view_box(page);
    doc.rect(page, WHITE);

    let slices = args.chart_spec(center, 0.0, outer).slices(items);
    for slice in &slices {
        doc.path(&slice.path(mode), slice.color(), Some((HIGHLIGHT, 0.3)));
    }
    // Center disk turns the pie into a ring.
    if !slices.is_empty() {
        disk(&mut doc, approx, center, inner, WHITE);
    }
    // Labels sit on the ring midline rather than the pie's.
    let labelled = args.chart_spec(center, inner, outer).slices(items);
    slice_labels(&mut doc, &labelled, 3.5);

    let legend_spec = LegendSpec::new(Point::new(PAGE_MARGIN, center.y + outer + 10.0))
        .with_label(legend_label(args.item_text))
        .with_font_size(3.2)
        .with_swatch_size(4.0)
        .with_row_gap(2.0);
    let rows = legend_spec.rows(&slices);
    let bounds = legend_spec.bounds(&rows, 0.55);
    if bounds.width() > page.width() - 2.0 * PAGE_MARGIN {
        tracing::warn!(width = bounds.width(), "export legend is wider than the page");
    }
    legend(&mut doc, &legend_spec, &slices);

    let end = guidance(&mut doc, approx, bounds.y1 + 15.0);
    if end > page.y1 {
        tracing::warn!(end, "export page content runs past the bottom edge");
    }
    doc.to_svg_string()
}

fn disk(doc: &mut SvgDocument, approx: PolylineApproximator, center: Point, r: f64, fill: Color) {
    let outline = approx.approximate_arc(center, r, -90.0, 360.0);
    doc.path(&SectorPath::from_polygon(&outline), fill, None);
}

/// Writes the interpretation notes starting at `y` and returns the y after the last line.
fn guidance(doc: &mut SvgDocument, approx: PolylineApproximator, mut y: f64) -> f64 {
    let x = PAGE_MARGIN;
    let body = 3.5;
    let heading = 3.9;
    let line = |doc: &mut SvgDocument, y: f64, size: f64, bold: bool, text: &str| {
        doc.text(Point::new(x, y), size, TextAnchor::Start, INK, bold, text);
    };

    line(doc, y, 5.6, true, "Focus Budget Interpretation & Use");
    y += 10.0;
    for text in [
        "This chart represents our current allocation of attention, not a wishlist.",
        "Each slice reflects the relative amount of focus a workstream, initiative, or obligation",
        "is expected to receive during this period.",
    ] {
        line(doc, y, body, false, text);
        y += 5.0;
    }

    y += 7.0;
    line(doc, y, heading, true, "How to apply this:");
    y += 8.0;
    for group in APPLY_GUIDANCE {
        disk(doc, approx, Point::new(x + 1.5, y), 0.8, INK);
        for (i, text) in group.iter().enumerate() {
            line(doc, y + 5.0 * i as f64, body, false, *text);
        }
        y += 5.0 * group.len() as f64 + 3.0;
    }

    y += 5.0;
    line(doc, y, heading, true, "Support & best practices (optional)");
    y += 8.0;
    for text in [
        "Teams that want guidance on creating, revisiting, and maintaining effective focus",
        "budgets can explore Sheety memberships for best-practice use.",
    ] {
        line(doc, y, body, false, text);
        y += 5.0;
    }
    y
}
