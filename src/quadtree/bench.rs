//! QuadTree compression benchmark.
//! Produces the `performance.csv` consumed by the `plot` command.

use super::image_io::{image_label, list_images, load_grayscale, save_grayscale};
use super::tree::QuadTree;
use crate::data::PerformanceRecord;
use image::GrayImage;
use log::{debug, info, warn};
use polars::prelude::*;
use rayon::prelude::*;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::time::Instant;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Dataset directory {path} is not readable: {source}")]
    Dataset {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Target size {0} is not a power of two")]
    InvalidSize(u32),
    #[error("No thresholds given")]
    NoThresholds,
    #[error("Image {path}: {source}")]
    Image {
        path: PathBuf,
        source: image::ImageError,
    },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] PolarsError),
}

/// Inputs of one benchmark run.
#[derive(Debug, Clone)]
pub struct BenchSettings {
    pub dataset_dir: PathBuf,
    pub compressed_dir: PathBuf,
    pub target_size: u32,
    pub thresholds: Vec<u32>,
}

/// A prepared image waiting to be benchmarked.
struct Sample {
    label: String,
    pixels: GrayImage,
}

/// Compress every dataset image at every threshold.
///
/// Decoding and saving run on the rayon pool; the timed builds run one at a
/// time so measurements do not compete for cores.
pub fn run(settings: &BenchSettings) -> Result<Vec<PerformanceRecord>, BenchError> {
    if !settings.target_size.is_power_of_two() {
        return Err(BenchError::InvalidSize(settings.target_size));
    }
    if settings.thresholds.is_empty() {
        return Err(BenchError::NoThresholds);
    }

    let files = list_images(&settings.dataset_dir).map_err(|source| BenchError::Dataset {
        path: settings.dataset_dir.clone(),
        source,
    })?;
    if files.is_empty() {
        warn!("No images found in {}", settings.dataset_dir.display());
        return Ok(Vec::new());
    }
    fs::create_dir_all(&settings.compressed_dir)?;

    let samples = files
        .par_iter()
        .map(|path| {
            load_grayscale(path, settings.target_size)
                .map(|pixels| Sample {
                    label: image_label(path),
                    pixels,
                })
                .map_err(|source| BenchError::Image {
                    path: path.clone(),
                    source,
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut records = Vec::with_capacity(samples.len() * settings.thresholds.len());
    let mut outputs = Vec::with_capacity(records.capacity());
    for sample in &samples {
        info!("Compressing {}", sample.label);
        for &threshold in &settings.thresholds {
            let start = Instant::now();
            let tree = QuadTree::build(&sample.pixels, threshold as f64);
            let runtime_ms = start.elapsed().as_secs_f64() * 1e3;
            debug!(
                "{} t{}: {} nodes in {:.2} ms{}",
                sample.label,
                tree.threshold(),
                tree.node_count(),
                runtime_ms,
                if tree.root().is_leaf() { " (single leaf)" } else { "" }
            );

            records.push(PerformanceRecord {
                image: sample.label.clone(),
                threshold,
                runtime_ms,
                compression_ratio: tree.compression_ratio(),
            });
            let path = settings
                .compressed_dir
                .join(format!("{}_t{}.png", sample.label, threshold));
            outputs.push((tree, path));
        }
    }

    outputs.par_iter().try_for_each(|(tree, path)| {
        save_grayscale(&tree.reconstruct(), path).map_err(|source| BenchError::Image {
            path: path.clone(),
            source,
        })
    })?;
    info!(
        "All images compressed and saved to {}",
        settings.compressed_dir.display()
    );

    Ok(records)
}

/// Write records with the `Image,Threshold,Runtime(ms),Compression Ratio` header.
pub fn write_csv(records: &[PerformanceRecord], path: &Path) -> Result<(), BenchError> {
    let mut df = PerformanceRecord::to_dataframe(records)?;
    let mut file = File::create(path)?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .finish(&mut df)?;
    info!("Performance CSV saved to {}", path.display());
    Ok(())
}
