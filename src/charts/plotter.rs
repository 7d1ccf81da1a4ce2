//! Chart definitions
//! The two fixed threshold charts, their palette, and the summary of a rendered chart.

use crate::data::record::{RATIO_COLUMN, RUNTIME_COLUMN, THRESHOLD_COLUMN};
use crate::data::ImageSeries;
use plotters::style::RGBColor;
use std::path::PathBuf;

/// Color palette for image series
pub const PALETTE: [RGBColor; 10] = [
    RGBColor(52, 152, 219),  // Blue
    RGBColor(231, 76, 60),   // Red
    RGBColor(46, 204, 113),  // Green
    RGBColor(155, 89, 182),  // Purple
    RGBColor(243, 156, 18),  // Orange
    RGBColor(26, 188, 156),  // Teal
    RGBColor(233, 30, 99),   // Pink
    RGBColor(0, 188, 212),   // Cyan
    RGBColor(121, 85, 72),   // Brown
    RGBColor(96, 125, 139),  // Blue Grey
];

/// Get color for the `index`-th series.
pub fn series_color(index: usize) -> RGBColor {
    PALETTE[index % PALETTE.len()]
}

/// What to plot and where to save it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartSpec {
    pub x_column: &'static str,
    pub y_column: &'static str,
    pub x_label: &'static str,
    pub y_label: &'static str,
    pub title: &'static str,
    pub file_name: &'static str,
}

pub const COMPRESSION_CHART: ChartSpec = ChartSpec {
    x_column: THRESHOLD_COLUMN,
    y_column: RATIO_COLUMN,
    x_label: "Threshold",
    y_label: "Compression Ratio",
    title: "QuadTree Compression Ratio vs Threshold",
    file_name: "compression_ratio_vs_threshold.png",
};

pub const RUNTIME_CHART: ChartSpec = ChartSpec {
    x_column: THRESHOLD_COLUMN,
    y_column: RUNTIME_COLUMN,
    x_label: "Threshold",
    y_label: "Runtime (ms)",
    title: "QuadTree Runtime vs Threshold",
    file_name: "runtime_vs_threshold.png",
};

/// Charts produced by the `plot` command, in order.
pub const THRESHOLD_CHARTS: [ChartSpec; 2] = [COMPRESSION_CHART, RUNTIME_CHART];

/// Summary of a chart written to disk.
#[derive(Debug, Clone)]
pub struct ChartData {
    pub title: String,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub series: Vec<ImageSeries>,
}

impl ChartData {
    /// Legend labels in draw order.
    pub fn labels(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.label.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_cycles() {
        assert_eq!(series_color(0), series_color(PALETTE.len()));
        assert_ne!(series_color(0), series_color(1));
    }

    #[test]
    fn charts_share_the_threshold_axis() {
        for spec in THRESHOLD_CHARTS {
            assert_eq!(spec.x_column, THRESHOLD_COLUMN);
            assert!(spec.file_name.ends_with(".png"));
        }
        assert_ne!(COMPRESSION_CHART.file_name, RUNTIME_CHART.file_name);
    }
}
