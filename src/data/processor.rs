//! Data Processor Module
//! Splits the performance table into one `(x, y)` series per image.

use super::record::IMAGE_COLUMN;
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Null value in column '{column}' for image '{image}'")]
    NullValue { column: String, image: String },
}

/// Points of one image, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageSeries {
    pub label: String,
    pub points: Vec<(f64, f64)>,
}

/// Grouping and extraction over a loaded performance table.
pub struct DataProcessor;

impl DataProcessor {
    /// Distinct image labels in first-occurrence order.
    pub fn get_images(df: &DataFrame) -> Result<Vec<String>, ProcessorError> {
        let unique = df
            .column(IMAGE_COLUMN)?
            .as_materialized_series()
            .unique_stable()?;
        Ok(unique
            .str()?
            .into_iter()
            .flatten()
            .map(str::to_string)
            .collect())
    }

    /// Rows belonging to one image, original order preserved.
    pub fn filter_by_image(df: &DataFrame, image: &str) -> Result<DataFrame, ProcessorError> {
        let filtered = df
            .clone()
            .lazy()
            .filter(col(IMAGE_COLUMN).eq(lit(image)))
            .collect()?;
        Ok(filtered)
    }

    /// One series per image plotting `x_col` against `y_col`.
    ///
    /// Points are not re-sorted; the file is expected to list thresholds in order.
    pub fn extract_series(
        df: &DataFrame,
        x_col: &str,
        y_col: &str,
    ) -> Result<Vec<ImageSeries>, ProcessorError> {
        Self::get_images(df)?
            .into_iter()
            .map(|image| {
                let subset = Self::filter_by_image(df, &image)?;
                let points = Self::points(&subset, x_col, y_col, &image)?;
                Ok(ImageSeries {
                    label: image,
                    points,
                })
            })
            .collect()
    }

    fn points(
        subset: &DataFrame,
        x_col: &str,
        y_col: &str,
        image: &str,
    ) -> Result<Vec<(f64, f64)>, ProcessorError> {
        let xs = subset.column(x_col)?.cast(&DataType::Float64)?;
        let ys = subset.column(y_col)?.cast(&DataType::Float64)?;
        let null = |column: &str| ProcessorError::NullValue {
            column: column.to_string(),
            image: image.to_string(),
        };

        xs.f64()?
            .into_iter()
            .zip(ys.f64()?.into_iter())
            .map(|pair| match pair {
                (Some(x), Some(y)) => Ok((x, y)),
                (None, _) => Err(null(x_col)),
                (_, None) => Err(null(y_col)),
            })
            .collect()
    }
}
