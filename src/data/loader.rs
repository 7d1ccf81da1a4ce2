//! Performance CSV Loader Module
//! Loads the benchmark table with Polars and normalises the column types.

use super::record::{IMAGE_COLUMN, NUMERIC_COLUMNS, REQUIRED_COLUMNS};
use log::{debug, info};
use polars::prelude::*;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    Csv(#[from] PolarsError),
    #[error("No data loaded")]
    NoData,
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("Column '{0}' contains values that are not numbers")]
    InvalidNumber(String),
    #[error("Column '{column}' has {count} empty cell(s)")]
    MissingValues { column: String, count: usize },
}

/// Loads performance CSV files into a typed `DataFrame`.
///
/// After a successful load `Image` is a string column and every metric
/// column is `Float64` without nulls.
pub struct DataLoader {
    df: Option<DataFrame>,
    file_path: Option<PathBuf>,
    separator: Option<u8>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl DataLoader {
    pub fn new() -> Self {
        Self {
            df: None,
            file_path: None,
            separator: None,
        }
    }

    /// Use a fixed delimiter instead of detecting it from the header.
    pub fn with_separator(mut self, separator: Option<u8>) -> Self {
        self.separator = separator;
        self
    }

    /// Load a CSV file using Polars.
    pub fn load_csv(&mut self, file_path: &Path) -> Result<&DataFrame, LoaderError> {
        self.file_path = Some(file_path.to_path_buf());

        let separator = match self.separator {
            Some(sep) => {
                Self::open(file_path)?;
                sep
            }
            None => Self::detect_separator(file_path)?,
        };
        info!(
            "Reading {} ({} delimited)",
            file_path.display(),
            if separator == b'\t' { "tab" } else { "comma" }
        );

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_separator(separator)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        let df = Self::normalize(df)?;
        info!("Loaded {} rows", df.height());

        self.df = Some(df);
        self.df.as_ref().ok_or(LoaderError::NoData)
    }

    /// Tab when the header line has tabs and no commas, comma otherwise.
    pub fn detect_separator(file_path: &Path) -> Result<u8, LoaderError> {
        let file = Self::open(file_path)?;

        let mut header = String::new();
        BufReader::new(file)
            .read_line(&mut header)
            .map_err(|source| LoaderError::Io {
                path: file_path.to_path_buf(),
                source,
            })?;

        if header.trim().is_empty() {
            return Err(LoaderError::NoData);
        }

        let sep = if header.contains('\t') && !header.contains(',') {
            b'\t'
        } else {
            b','
        };
        debug!("Header {:?} -> separator {:?}", header.trim_end(), sep as char);
        Ok(sep)
    }

    fn open(file_path: &Path) -> Result<File, LoaderError> {
        File::open(file_path).map_err(|source| LoaderError::Io {
            path: file_path.to_path_buf(),
            source,
        })
    }

    /// Check the required columns and coerce them to their record types.
    fn normalize(mut df: DataFrame) -> Result<DataFrame, LoaderError> {
        let names: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();
        for required in REQUIRED_COLUMNS {
            if !names.iter().any(|n| n == required) {
                return Err(LoaderError::MissingColumn(required.to_string()));
            }
        }

        if df.height() == 0 {
            return Err(LoaderError::NoData);
        }

        // Labels such as "1" or "2" are inferred as integers
        let images = df.column(IMAGE_COLUMN)?.cast(&DataType::String)?;
        Self::check_nulls(IMAGE_COLUMN, images.null_count())?;
        df.with_column(images)?;

        for name in NUMERIC_COLUMNS {
            let values = df
                .column(name)?
                .as_materialized_series()
                .strict_cast(&DataType::Float64)
                .map_err(|_| LoaderError::InvalidNumber(name.to_string()))?;
            Self::check_nulls(name, values.null_count())?;
            df.with_column(values)?;
        }

        Ok(df)
    }

    fn check_nulls(column: &str, count: usize) -> Result<(), LoaderError> {
        if count > 0 {
            return Err(LoaderError::MissingValues {
                column: column.to_string(),
                count,
            });
        }
        Ok(())
    }

    /// Get the number of rows in the DataFrame.
    pub fn get_row_count(&self) -> usize {
        self.df.as_ref().map(|df| df.height()).unwrap_or(0)
    }

    /// Get file path.
    pub fn get_file_path(&self) -> Option<&PathBuf> {
        self.file_path.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::record::{RATIO_COLUMN, RUNTIME_COLUMN, THRESHOLD_COLUMN};
    use crate::test_support::{write_csv, SAMPLE};

    #[test]
    fn loads_comma_delimited_file() {
        let file = write_csv(SAMPLE);
        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();

        assert_eq!(df.height(), 3);
        assert_eq!(df.column(IMAGE_COLUMN).unwrap().dtype(), &DataType::String);
        for name in [THRESHOLD_COLUMN, RUNTIME_COLUMN, RATIO_COLUMN] {
            assert_eq!(df.column(name).unwrap().dtype(), &DataType::Float64);
        }
        assert_eq!(loader.get_row_count(), 3);
        assert_eq!(loader.get_file_path().unwrap(), &file.path().to_path_buf());
    }

    #[test]
    fn tab_delimited_matches_comma_delimited() {
        let comma = write_csv(SAMPLE);
        let tab = write_csv(&SAMPLE.replace(',', "\t"));

        assert_eq!(DataLoader::detect_separator(tab.path()).unwrap(), b'\t');
        assert_eq!(DataLoader::detect_separator(comma.path()).unwrap(), b',');

        let mut a = DataLoader::new();
        let mut b = DataLoader::new();
        let df_a = a.load_csv(comma.path()).unwrap().clone();
        let df_b = b.load_csv(tab.path()).unwrap().clone();
        assert!(df_a.equals(&df_b));
    }

    #[test]
    fn forced_separator_skips_detection() {
        let file = write_csv(&SAMPLE.replace(',', "\t"));
        let mut loader = DataLoader::new().with_separator(Some(b'\t'));
        assert_eq!(loader.load_csv(file.path()).unwrap().height(), 3);
    }

    #[test]
    fn numeric_labels_stay_strings() {
        let file = write_csv("Image,Threshold,Runtime(ms),Compression Ratio\n1,5,1.5,0.2\n2,5,1.7,0.3\n");
        let mut loader = DataLoader::new();
        let df = loader.load_csv(file.path()).unwrap();
        let labels: Vec<Option<&str>> = df.column(IMAGE_COLUMN).unwrap().str().unwrap().into_iter().collect();
        assert_eq!(labels, vec![Some("1"), Some("2")]);
    }

    #[test]
    fn missing_image_column_is_fatal() {
        let file = write_csv("Threshold,Runtime(ms),Compression Ratio\n1,10,0.5\n");
        let err = DataLoader::new().load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::MissingColumn(ref c) if c == "Image"));
    }

    #[test]
    fn missing_file_is_fatal() {
        let err = DataLoader::new()
            .load_csv(Path::new("/nonexistent/performance.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
    }

    #[test]
    fn missing_file_with_forced_separator_is_io() {
        let err = DataLoader::new()
            .with_separator(Some(b','))
            .load_csv(Path::new("/nonexistent/performance.csv"))
            .unwrap_err();
        assert!(matches!(err, LoaderError::Io { ref path, .. } if path.ends_with("performance.csv")));
    }

    #[test]
    fn empty_and_header_only_files_have_no_data() {
        let empty = write_csv("");
        assert!(matches!(
            DataLoader::new().load_csv(empty.path()),
            Err(LoaderError::NoData)
        ));

        let header_only = write_csv("Image,Threshold,Runtime(ms),Compression Ratio\n");
        assert!(matches!(
            DataLoader::new().load_csv(header_only.path()),
            Err(LoaderError::NoData)
        ));
    }

    #[test]
    fn non_numeric_metric_is_fatal() {
        let file = write_csv("Image,Threshold,Runtime(ms),Compression Ratio\nA,1,fast,0.5\n");
        let err = DataLoader::new().load_csv(file.path()).unwrap_err();
        assert!(matches!(err, LoaderError::InvalidNumber(ref c) if c == RUNTIME_COLUMN));
    }

    #[test]
    fn empty_cell_is_fatal() {
        let file = write_csv("Image,Threshold,Runtime(ms),Compression Ratio\nA,1,10,\nB,1,8,0.6\n");
        let err = DataLoader::new().load_csv(file.path()).unwrap_err();
        assert!(matches!(
            err,
            LoaderError::MissingValues { ref column, count: 1 } if column == RATIO_COLUMN
        ));
    }
}
