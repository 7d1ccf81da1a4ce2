//! Run configuration
//! Defaults reproduce the original fixed constants; a JSON file and CLI flags
//! can override any of them.

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid config file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Field delimiter of the performance CSV.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Separator {
    Comma,
    Tab,
}

impl Separator {
    pub fn as_byte(self) -> u8 {
        match self {
            Separator::Comma => b',',
            Separator::Tab => b'\t',
        }
    }
}

/// Settings shared by the `plot` and `bench` commands.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Performance CSV read by `plot` and written by `bench`.
    pub csv_path: PathBuf,
    /// Directory the two chart images are written to.
    pub output_dir: PathBuf,
    /// Forces a delimiter instead of sniffing the header line.
    pub separator: Option<Separator>,
    pub chart_width: u32,
    pub chart_height: u32,
    pub grid: bool,
    /// Open each chart in the system viewer after saving it.
    pub show: bool,

    pub dataset_dir: PathBuf,
    pub compressed_dir: PathBuf,
    pub target_size: u32,
    pub thresholds: Vec<u32>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            csv_path: PathBuf::from("performance.csv"),
            output_dir: PathBuf::from("."),
            separator: None,
            chart_width: 1000,
            chart_height: 500,
            grid: true,
            show: true,
            dataset_dir: PathBuf::from("dataset_images"),
            compressed_dir: PathBuf::from("compressed_images"),
            target_size: 256,
            thresholds: vec![5, 10, 20, 50],
        }
    }
}

impl AppConfig {
    /// Load a config file, falling back to defaults for absent keys.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&text)?)
    }

    /// Defaults, or the given file when present.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(p) => Self::from_file(p),
            None => Ok(Self::default()),
        }
    }
}
