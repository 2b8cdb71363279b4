//! PNG rendering of insight charts.
//!
//! Charts are drawn with the [`plotters`] bitmap backend. Titles and axis
//! labels use the system "sans-serif" font; when no such font can be loaded
//! the charts are still written, without text.

use crate::config::AnalysisConfig;
use crate::error::{EdaError, Result};
use crate::insights::{ChartKind, ChartSpec};
use plotters::prelude::*;
use plotters::style::{FontDesc, FontFamily, FontStyle};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CAPTION_FONT: (&str, u32) = ("sans-serif", 28);
const LABEL_FONT: (&str, u32) = ("sans-serif", 18);

/// Size and text settings shared by every chart of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartOptions {
    pub width: u32,
    pub height: u32,
    /// Draw the title, axis descriptions and tick labels.
    pub text: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self::from_config(&AnalysisConfig::default())
    }
}

impl ChartOptions {
    pub fn from_config(config: &AnalysisConfig) -> Self {
        Self {
            width: config.chart_width,
            height: config.chart_height,
            text: config.chart_text,
        }
    }

    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Turn text off when no font is available to draw it.
    fn resolve_text(self) -> Self {
        if self.text && !text_font_available() {
            warn!("No sans-serif font found; charts are drawn without text");
            return Self { text: false, ..self };
        }
        self
    }
}

/// Whether the chart font can be loaded on this system.
pub fn text_font_available() -> bool {
    FontDesc::new(FontFamily::SansSerif, LABEL_FONT.1 as f64, FontStyle::Normal)
        .box_size("CGPA")
        .is_ok()
}

fn chart_error(spec: &ChartSpec, err: impl Display) -> EdaError {
    EdaError::ChartFailed {
        chart: spec.file_name.to_string(),
        reason: err.to_string(),
    }
}

/// Render every chart into `output_dir`, returning the written paths.
pub fn render_charts(specs: &[ChartSpec], output_dir: &Path, options: ChartOptions) -> Result<Vec<PathBuf>> {
    let options = options.resolve_text();
    specs
        .iter()
        .map(|spec| draw_chart(spec, output_dir, options))
        .collect()
}

/// Render one chart to `output_dir/<spec.file_name>`.
pub fn render_chart(spec: &ChartSpec, output_dir: &Path, options: ChartOptions) -> Result<PathBuf> {
    draw_chart(spec, output_dir, options.resolve_text())
}

fn draw_chart(spec: &ChartSpec, output_dir: &Path, options: ChartOptions) -> Result<PathBuf> {
    let path = output_dir.join(spec.file_name);
    match &spec.kind {
        ChartKind::Scatter { points } => draw_scatter(spec, points, &path, options)?,
        ChartKind::Bar { bars } => draw_bars(spec, bars, &path, options)?,
    }
    debug!("Saved chart {}", path.display());
    Ok(path)
}

/// Padded axis range over finite values; `(0, 1)` when there are none.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if min > max {
        return (0.0, 1.0);
    }
    let pad = if max > min { (max - min) * 0.05 } else { 1.0 };
    (min - pad, max + pad)
}

fn draw_scatter(spec: &ChartSpec, points: &[(f64, f64)], path: &Path, options: ChartOptions) -> Result<()> {
    let root = BitMapBackend::new(path, options.size()).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(spec, e))?;

    let (x_min, x_max) = padded_range(points.iter().map(|p| p.0));
    let (y_min, y_max) = padded_range(points.iter().map(|p| p.1));

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if options.text {
        builder
            .caption(&spec.title, CAPTION_FONT)
            .x_label_area_size(45)
            .y_label_area_size(55);
    }
    let mut chart = builder
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(|e| chart_error(spec, e))?;

    {
        let mut mesh = chart.configure_mesh();
        if options.text {
            mesh.x_desc(spec.x_label.as_deref().unwrap_or(""))
                .y_desc(spec.y_label.as_str())
                .label_style(LABEL_FONT);
        }
        mesh.draw().map_err(|e| chart_error(spec, e))?;
    }

    chart
        .draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 4, BLUE.mix(0.5).filled())),
        )
        .map_err(|e| chart_error(spec, e))?;

    root.present().map_err(|e| chart_error(spec, e))?;
    Ok(())
}

/// Label of the bar centred on `x`, empty between bars.
fn bar_label(bars: &[(String, f64)], x: f64) -> String {
    let index = x.round();
    if index >= 0.0 && (index as usize) < bars.len() && (x - index).abs() < 1e-6 {
        bars[index as usize].0.clone()
    } else {
        String::new()
    }
}

fn draw_bars(spec: &ChartSpec, bars: &[(String, f64)], path: &Path, options: ChartOptions) -> Result<()> {
    if bars.is_empty() {
        return Err(chart_error(spec, "no bars to draw"));
    }

    let root = BitMapBackend::new(path, options.size()).into_drawing_area();
    root.fill(&WHITE).map_err(|e| chart_error(spec, e))?;

    // Bar i is centred on x = i.
    let n = bars.len() as f64;
    let (_, y_top) = padded_range(bars.iter().map(|b| b.1));
    let y_top = y_top.max(1.0);

    let mut builder = ChartBuilder::on(&root);
    builder.margin(15);
    if options.text {
        builder
            .caption(&spec.title, CAPTION_FONT)
            .x_label_area_size(45)
            .y_label_area_size(55);
    }
    let mut chart = builder
        .build_cartesian_2d(-0.5..n - 0.5, 0.0..y_top)
        .map_err(|e| chart_error(spec, e))?;

    let label_for = |x: &f64| bar_label(bars, *x);
    {
        let mut mesh = chart.configure_mesh();
        mesh.disable_x_mesh()
            .x_labels(bars.len())
            .x_label_formatter(&label_for);
        if options.text {
            mesh.x_desc(spec.x_label.as_deref().unwrap_or(""))
                .y_desc(spec.y_label.as_str())
                .label_style(LABEL_FONT);
        }
        mesh.draw().map_err(|e| chart_error(spec, e))?;
    }

    chart
        .draw_series(
            bars.iter()
                .enumerate()
                .filter(|(_, (_, height))| height.is_finite())
                .map(|(i, (_, height))| {
                    let center = i as f64;
                    Rectangle::new([(center - 0.35, 0.0), (center + 0.35, *height)], BLUE.filled())
                }),
        )
        .map_err(|e| chart_error(spec, e))?;

    root.present().map_err(|e| chart_error(spec, e))?;
    Ok(())
}
