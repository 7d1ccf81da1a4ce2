//! Static Chart Renderer
//! Draws one marker-decorated line per image onto a PNG with plotters.
//!
//! Layout:
//! 1. Title centered above the plot
//! 2. Threshold on the x-axis, the chosen metric on the y-axis, background grid
//! 3. Legend keyed by image name in the upper right corner

use super::plotter::{series_color, ChartData, ChartSpec};
use crate::data::{DataProcessor, ImageSeries, ProcessorError};
use log::debug;
use plotters::element::IntoDynElement;
use plotters::prelude::*;
use plotters::style::{register_font, FontStyle};
use polars::prelude::DataFrame;
use std::ops::Range;
use std::path::Path;
use thiserror::Error;

const FONT_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const FONT_FAMILY: &str = "sans-serif";

const MARGIN_FRACTION: f64 = 0.05;
const MARKER_SIZE: u32 = 4;
const LEGEND_LINE: i32 = 20;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error(transparent)]
    Data(#[from] ProcessorError),
    #[error("Nothing to plot")]
    NoSeries,
    #[error("Failed to load chart font")]
    Font,
    #[error("Drawing failed: {0}")]
    Drawing(String),
}

/// Points plotters can place; `inf` and `NaN` are skipped.
fn finite_points(points: &[(f64, f64)]) -> impl Iterator<Item = (f64, f64)> + '_ {
    points
        .iter()
        .copied()
        .filter(|(x, y)| x.is_finite() && y.is_finite())
}

/// Line sample with the series marker centred on it.
fn legend_entry<'a, DB: DrawingBackend + 'a>(
    (x, y): (i32, i32),
    color: RGBColor,
) -> impl IntoDynElement<'a, DB, (i32, i32)> {
    EmptyElement::at((x, y))
        + PathElement::new(vec![(0, 0), (LEGEND_LINE, 0)], color.stroke_width(2))
        + Circle::new((LEGEND_LINE / 2, 0), MARKER_SIZE, color.filled())
}

fn drawing_error<E: std::fmt::Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

/// Renders threshold charts to PNG files.
pub struct ChartRenderer {
    width: u32,
    height: u32,
    grid: bool,
}

impl Default for ChartRenderer {
    fn default() -> Self {
        Self::new(1000, 500)
    }
}

impl ChartRenderer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            grid: true,
        }
    }

    pub fn with_grid(mut self, grid: bool) -> Self {
        self.grid = grid;
        self
    }

    /// Plot `spec.y_column` against `spec.x_column` for every image and save to `output`.
    pub fn render_series(
        &self,
        df: &DataFrame,
        spec: &ChartSpec,
        output: &Path,
    ) -> Result<ChartData, RenderError> {
        let series = DataProcessor::extract_series(df, spec.x_column, spec.y_column)?;
        self.draw(&series, spec, output)?;
        debug!("Wrote {} ({} series)", output.display(), series.len());

        Ok(ChartData {
            title: spec.title.to_string(),
            path: output.to_path_buf(),
            width: self.width,
            height: self.height,
            series,
        })
    }

    fn draw(&self, series: &[ImageSeries], spec: &ChartSpec, output: &Path) -> Result<(), RenderError> {
        let (x_range, y_range) = Self::axis_ranges(series).ok_or(RenderError::NoSeries)?;
        Self::register_fonts()?;

        let root = BitMapBackend::new(output, (self.width, self.height)).into_drawing_area();
        root.fill(&WHITE).map_err(drawing_error)?;

        let mut chart = ChartBuilder::on(&root)
            .margin(20)
            .caption(spec.title, (FONT_FAMILY, 22))
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range, y_range)
            .map_err(drawing_error)?;

        let mut mesh = chart.configure_mesh();
        mesh.x_desc(spec.x_label).y_desc(spec.y_label);
        if !self.grid {
            mesh.disable_mesh();
        }
        mesh.draw().map_err(drawing_error)?;

        for (idx, s) in series.iter().enumerate() {
            let color = series_color(idx);
            debug!("{}: {} -> {:?}", spec.file_name, s.label, s.points);
            chart
                .draw_series(
                    LineSeries::new(finite_points(&s.points), color.stroke_width(2))
                        .point_size(MARKER_SIZE),
                )
                .map_err(drawing_error)?
                .label(s.label.as_str())
                .legend(move |pos| legend_entry(pos, color));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.8))
            .border_style(&BLACK)
            .draw()
            .map_err(drawing_error)?;

        root.present().map_err(drawing_error)?;
        Ok(())
    }

    /// Extent of the finite points padded by 5%, or `None` when there are none.
    fn axis_ranges(series: &[ImageSeries]) -> Option<(Range<f64>, Range<f64>)> {
        let points = series.iter().flat_map(|s| finite_points(&s.points));
        let (mut x_min, mut x_max) = (f64::INFINITY, f64::NEG_INFINITY);
        let (mut y_min, mut y_max) = (f64::INFINITY, f64::NEG_INFINITY);
        for (x, y) in points {
            x_min = x_min.min(x);
            x_max = x_max.max(x);
            y_min = y_min.min(y);
            y_max = y_max.max(y);
        }
        if ![x_min, x_max, y_min, y_max].iter().all(|v| v.is_finite()) {
            return None;
        }
        Some((Self::pad(x_min, x_max), Self::pad(y_min, y_max)))
    }

    fn pad(min: f64, max: f64) -> Range<f64> {
        if max - min <= f64::EPSILON {
            return (min - 1.0)..(max + 1.0);
        }
        let margin = (max - min) * MARGIN_FRACTION;
        (min - margin)..(max + margin)
    }

    fn register_fonts() -> Result<(), RenderError> {
        register_font(FONT_FAMILY, FontStyle::Normal, FONT_DATA).map_err(|_| RenderError::Font)
    }
}
