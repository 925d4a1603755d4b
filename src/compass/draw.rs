//! Figure rendering.
//!
//! Paints compass panels with plotters into a single PNG: a grid of
//! rows (one per community) by columns (one per metric), with a figure
//! title, per-panel footnotes, and optional directional callouts.

use crate::compass::layout::{Callout, HAlign, Layout, Magnitudes, VAlign};
use crate::quadrant::Quadrant;
use anyhow::Result;
use plotters::chart::ChartContext;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::coord::Shift;
use plotters::drawing::DrawingAreaErrorKind;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use plotters::style::FontTransform;
use std::path::Path;

const PANEL_WIDTH: u32 = 510;
const PANEL_HEIGHT: u32 = 420;
const HEADER_HEIGHT: u32 = 56;
const FOOTER_HEIGHT: u32 = 44;

/// Extra data-space margin so callout annotations stay inside the panel.
const CALLOUT_PAD_X: f64 = 0.8;
const CALLOUT_PAD_Y: f64 = 0.6;

/// The compass drawn inside one panel.
#[derive(Debug, Clone)]
pub struct CompassData {
    pub magnitudes: Magnitudes,
    /// Patch label per quadrant, in index order; empty strings are skipped.
    pub labels: [String; Quadrant::COUNT],
    /// Draw directional callouts around the shape cluster.
    pub callouts: bool,
}

/// One grid cell: a column title, a footnote, and (unless the sample was
/// empty) a compass.
#[derive(Debug, Clone)]
pub struct Panel {
    /// Column title; drawn on the first row only.
    pub title: String,
    /// Sample-size note under the panel.
    pub footnote: String,
    /// `None` renders an empty cell (zero-sum tallies draw no compass).
    pub compass: Option<CompassData>,
}

/// One figure row: a community heading plus its metric panels.
#[derive(Debug, Clone)]
pub struct FigureRow {
    pub heading: String,
    pub panels: Vec<Panel>,
}

/// The complete figure.
#[derive(Debug, Clone)]
pub struct Figure {
    pub title: String,
    pub footer: String,
    pub rows: Vec<FigureRow>,
}

/// Render the figure to a PNG file.
pub fn render_figure(path: &Path, figure: &Figure) -> Result<()> {
    let rows = figure.rows.len();
    let cols = figure
        .rows
        .iter()
        .map(|row| row.panels.len())
        .max()
        .unwrap_or(0);
    anyhow::ensure!(rows > 0 && cols > 0, "Nothing to render");

    let size = (
        cols as u32 * PANEL_WIDTH,
        rows as u32 * PANEL_HEIGHT + HEADER_HEIGHT + FOOTER_HEIGHT,
    );

    let root = BitMapBackend::new(path, size).into_drawing_area();
    draw_figure(&root, figure, rows, cols)
        .map_err(|e| anyhow::anyhow!("Failed to draw figure: {}", e))?;
    root.present()
        .map_err(|e| anyhow::anyhow!("Failed to write {}: {}", path.display(), e))?;

    Ok(())
}

fn draw_figure<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    figure: &Figure,
    rows: usize,
    cols: usize,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    root.fill(&WHITE)?;
    let (width, height) = root.dim_in_pixel();

    let title_style = ("sans-serif", 28)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Top));
    root.draw(&Text::new(
        figure.title.as_str(),
        ((width / 2) as i32, 12),
        title_style,
    ))?;

    let footer_style = ("sans-serif", 14)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    root.draw(&Text::new(
        figure.footer.as_str(),
        ((width / 2) as i32, height as i32 - 10),
        footer_style,
    ))?;

    let grid = root.margin(HEADER_HEIGHT, FOOTER_HEIGHT, 0, 0);
    let cells = grid.split_evenly((rows, cols));

    for (row_index, row) in figure.rows.iter().enumerate() {
        for (col_index, panel) in row.panels.iter().enumerate() {
            let cell = &cells[row_index * cols + col_index];
            let heading = (col_index == 0).then_some(row.heading.as_str());
            draw_panel(cell, panel, row_index == 0, heading)?;
        }
    }

    Ok(())
}

fn draw_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    panel: &Panel,
    show_title: bool,
    heading: Option<&str>,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (width, height) = area.dim_in_pixel();

    if show_title {
        let style = ("sans-serif", 22)
            .into_font()
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Top));
        area.draw(&Text::new(panel.title.as_str(), ((width / 2) as i32, 2), style))?;
    }

    if let Some(heading) = heading {
        let style = ("sans-serif", 22)
            .into_font()
            .transform(FontTransform::Rotate270)
            .color(&BLACK)
            .pos(Pos::new(HPos::Center, VPos::Center));
        area.draw(&Text::new(heading, (16, (height / 2) as i32), style))?;
    }

    let footnote_style = ("sans-serif", 13)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(HPos::Center, VPos::Bottom));
    area.draw(&Text::new(
        panel.footnote.as_str(),
        ((width / 2) as i32, height as i32 - 4),
        footnote_style,
    ))?;

    let Some(ref compass) = panel.compass else {
        return Ok(());
    };

    let layout = Layout::compute(&compass.magnitudes);
    let (mut x_range, mut y_range) = (layout.x_range, layout.y_range);
    if compass.callouts {
        x_range.0 -= CALLOUT_PAD_X;
        x_range.1 += CALLOUT_PAD_X;
        y_range.0 -= CALLOUT_PAD_Y;
        y_range.1 += CALLOUT_PAD_Y;
    }

    let plot = area.margin(28, 22, 34, 8);
    let mut chart =
        ChartBuilder::on(&plot).build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    for quadrant in Quadrant::ALL {
        let ((x0, y0), (x1, y1)) = layout.patches[quadrant.index()].corners();
        let (r, g, b) = quadrant.color();
        chart.draw_series(std::iter::once(Rectangle::new(
            [(x0, y0), (x1, y1)],
            RGBColor(r, g, b).filled(),
        )))?;
    }

    for quadrant in Quadrant::ALL {
        let label = &compass.labels[quadrant.index()];
        if label.is_empty() {
            continue;
        }
        // The unflaired patch is near-black; its label is drawn in white.
        let color = if quadrant == Quadrant::Unflaired {
            &WHITE
        } else {
            &BLACK
        };
        let style = ("sans-serif", 12)
            .into_font()
            .color(color)
            .pos(Pos::new(HPos::Center, VPos::Center));
        chart.draw_series(std::iter::once(Text::new(
            label.clone(),
            layout.labels[quadrant.index()],
            style,
        )))?;
    }

    if compass.callouts {
        for callout in layout.callouts() {
            draw_callout(&mut chart, &callout)?;
        }
    }

    Ok(())
}

fn draw_callout<DB: DrawingBackend>(
    chart: &mut ChartContext<'_, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>,
    callout: &Callout,
) -> Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let (tail, tip) = (callout.anchor, callout.tip);

    chart.draw_series(std::iter::once(PathElement::new(
        vec![tail, tip],
        BLACK.stroke_width(2),
    )))?;

    // Arrow head: a small triangle at the tip.
    let (dx, dy) = (tip.0 - tail.0, tip.1 - tail.1);
    let length = (dx * dx + dy * dy).sqrt();
    if length > f64::EPSILON {
        let (ux, uy) = (dx / length, dy / length);
        let (px, py) = (-uy, ux);
        let base = (tip.0 - 0.12 * ux, tip.1 - 0.12 * uy);
        chart.draw_series(std::iter::once(Polygon::new(
            vec![
                tip,
                (base.0 + 0.05 * px, base.1 + 0.05 * py),
                (base.0 - 0.05 * px, base.1 - 0.05 * py),
            ],
            BLACK.filled(),
        )))?;
    }

    let style = ("sans-serif", 15)
        .into_font()
        .color(&BLACK)
        .pos(Pos::new(hpos(callout.h_align), vpos(callout.v_align)));
    chart.draw_series(std::iter::once(Text::new(callout.name, tail, style)))?;

    Ok(())
}

fn hpos(align: HAlign) -> HPos {
    match align {
        HAlign::Left => HPos::Left,
        HAlign::Center => HPos::Center,
        HAlign::Right => HPos::Right,
    }
}

fn vpos(align: VAlign) -> VPos {
    match align {
        VAlign::Top => VPos::Top,
        VAlign::Center => VPos::Center,
        VAlign::Bottom => VPos::Bottom,
    }
}
