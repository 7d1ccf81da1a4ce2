//! Statistics Calculator Module
//! Per-image summary of a performance table.

use crate::data::record::{RATIO_COLUMN, RUNTIME_COLUMN, THRESHOLD_COLUMN};
use crate::data::{DataProcessor, ProcessorError};
use polars::prelude::*;
use rayon::prelude::*;
use statrs::statistics::Statistics;
use std::fmt;

/// Summary for a single image.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSummary {
    pub image: String,
    pub count: usize,
    pub min_threshold: f64,
    pub max_threshold: f64,
    pub mean_runtime_ms: f64,
    pub min_ratio: f64,
    pub max_ratio: f64,
}

impl fmt::Display for ImageSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} runs, threshold {}..{}, mean runtime {:.2} ms, ratio {:.3}..{:.3}",
            self.image,
            self.count,
            self.min_threshold,
            self.max_threshold,
            self.mean_runtime_ms,
            self.min_ratio,
            self.max_ratio
        )
    }
}

/// Handles summary calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Summaries for every image, in first-occurrence order.
    pub fn summarize(df: &DataFrame) -> Result<Vec<ImageSummary>, ProcessorError> {
        let images = DataProcessor::get_images(df)?;

        // Use rayon for parallel computation
        images
            .par_iter()
            .map(|image| {
                let subset = DataProcessor::filter_by_image(df, image)?;
                Self::summarize_image(&subset, image)
            })
            .collect()
    }

    fn summarize_image(subset: &DataFrame, image: &str) -> Result<ImageSummary, ProcessorError> {
        let thresholds = Self::values(subset, THRESHOLD_COLUMN)?;
        let runtimes = Self::values(subset, RUNTIME_COLUMN)?;
        let ratios = Self::values(subset, RATIO_COLUMN)?;

        Ok(ImageSummary {
            image: image.to_string(),
            count: subset.height(),
            min_threshold: Statistics::min(thresholds.iter()),
            max_threshold: Statistics::max(thresholds.iter()),
            mean_runtime_ms: Statistics::mean(runtimes.iter()),
            min_ratio: Statistics::min(ratios.iter()),
            max_ratio: Statistics::max(ratios.iter()),
        })
    }

    fn values(df: &DataFrame, column: &str) -> Result<Vec<f64>, ProcessorError> {
        let values = df.column(column)?.cast(&DataType::Float64)?;
        Ok(values.f64()?.into_iter().flatten().collect())
    }
}
