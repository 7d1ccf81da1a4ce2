//! Performance record schema shared by the loader, the charts and the benchmark.

use polars::prelude::*;

pub const IMAGE_COLUMN: &str = "Image";
pub const THRESHOLD_COLUMN: &str = "Threshold";
pub const RUNTIME_COLUMN: &str = "Runtime(ms)";
pub const RATIO_COLUMN: &str = "Compression Ratio";

pub const REQUIRED_COLUMNS: [&str; 4] =
    [IMAGE_COLUMN, THRESHOLD_COLUMN, RUNTIME_COLUMN, RATIO_COLUMN];
pub const NUMERIC_COLUMNS: [&str; 3] = [THRESHOLD_COLUMN, RUNTIME_COLUMN, RATIO_COLUMN];

/// One benchmark measurement: an image compressed at one threshold.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceRecord {
    pub image: String,
    pub threshold: u32,
    pub runtime_ms: f64,
    pub compression_ratio: f64,
}

impl PerformanceRecord {
    /// Build the table written to `performance.csv`.
    ///
    /// Runtime is rounded to 2 decimals and the ratio to 3.
    pub fn to_dataframe(records: &[PerformanceRecord]) -> PolarsResult<DataFrame> {
        let images: Vec<&str> = records.iter().map(|r| r.image.as_str()).collect();
        let thresholds: Vec<u32> = records.iter().map(|r| r.threshold).collect();
        let runtimes: Vec<f64> = records.iter().map(|r| round_to(r.runtime_ms, 2)).collect();
        let ratios: Vec<f64> = records
            .iter()
            .map(|r| round_to(r.compression_ratio, 3))
            .collect();

        DataFrame::new(vec![
            Column::new(IMAGE_COLUMN.into(), images),
            Column::new(THRESHOLD_COLUMN.into(), thresholds),
            Column::new(RUNTIME_COLUMN.into(), runtimes),
            Column::new(RATIO_COLUMN.into(), ratios),
        ])
    }
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dataframe_rounds_metrics() {
        let records = vec![PerformanceRecord {
            image: "lena".to_string(),
            threshold: 10,
            runtime_ms: 1.23456,
            compression_ratio: 0.123456,
        }];
        let df = PerformanceRecord::to_dataframe(&records).unwrap();

        assert_eq!(df.get_column_names().len(), 4);
        let runtime = df.column(RUNTIME_COLUMN).unwrap().f64().unwrap().get(0);
        let ratio = df.column(RATIO_COLUMN).unwrap().f64().unwrap().get(0);
        assert_eq!(runtime, Some(1.23));
        assert_eq!(ratio, Some(0.123));
    }

    #[test]
    fn empty_record_set_keeps_schema() {
        let df = PerformanceRecord::to_dataframe(&[]).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 4);
    }
}
