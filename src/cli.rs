//! Command line interface.
//! Every flag is optional; without a subcommand the charts are plotted.

use crate::config::{AppConfig, Separator};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "quadtree_perf",
    version,
    about = "QuadTree compression benchmark and threshold charts"
)]
pub struct Cli {
    /// JSON file overriding the default settings
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Render compression ratio and runtime charts from the performance CSV
    Plot(PlotArgs),
    /// Compress the dataset images and write the performance CSV
    Bench(BenchArgs),
}

#[derive(Debug, Default, Args)]
pub struct PlotArgs {
    /// Performance CSV to read
    #[arg(short = 'f', long = "csvfile")]
    pub csv_path: Option<PathBuf>,
    /// Directory for the chart images
    #[arg(short = 'o', long = "outdir")]
    pub output_dir: Option<PathBuf>,
    /// Field delimiter, detected from the header when omitted
    #[arg(long, value_enum)]
    pub separator: Option<Separator>,
    /// Save the charts without opening them
    #[arg(long)]
    pub no_show: bool,
}

#[derive(Debug, Default, Args)]
pub struct BenchArgs {
    /// Folder with the .png/.jpg images to compress
    #[arg(long = "dataset")]
    pub dataset_dir: Option<PathBuf>,
    /// Folder for the reconstructed images
    #[arg(short = 'o', long = "outdir")]
    pub compressed_dir: Option<PathBuf>,
    /// Performance CSV to write
    #[arg(short = 'f', long = "csvfile")]
    pub csv_path: Option<PathBuf>,
    /// Side of the square the images are resized to (power of two)
    #[arg(long = "size")]
    pub target_size: Option<u32>,
    /// Variance thresholds, comma separated
    #[arg(long, value_delimiter = ',')]
    pub thresholds: Option<Vec<u32>>,
}

impl PlotArgs {
    /// Flags win over the config file.
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(p) = &self.csv_path {
            cfg.csv_path = p.clone();
        }
        if let Some(p) = &self.output_dir {
            cfg.output_dir = p.clone();
        }
        if self.separator.is_some() {
            cfg.separator = self.separator;
        }
        if self.no_show {
            cfg.show = false;
        }
    }
}

impl BenchArgs {
    pub fn apply(&self, cfg: &mut AppConfig) {
        if let Some(p) = &self.dataset_dir {
            cfg.dataset_dir = p.clone();
        }
        if let Some(p) = &self.compressed_dir {
            cfg.compressed_dir = p.clone();
        }
        if let Some(p) = &self.csv_path {
            cfg.csv_path = p.clone();
        }
        if let Some(size) = self.target_size {
            cfg.target_size = size;
        }
        if let Some(t) = &self.thresholds {
            cfg.thresholds = t.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_arguments_means_default_plot() {
        let cli = Cli::try_parse_from(["quadtree_perf"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.config.is_none());
    }

    #[test]
    fn plot_flags_override_config() {
        let cli = Cli::try_parse_from([
            "quadtree_perf",
            "plot",
            "-f",
            "runs.tsv",
            "--separator",
            "tab",
            "--no-show",
        ])
        .unwrap();
        let Some(Command::Plot(args)) = cli.command else {
            panic!("expected plot");
        };

        let mut cfg = AppConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.csv_path, PathBuf::from("runs.tsv"));
        assert_eq!(cfg.separator, Some(Separator::Tab));
        assert!(!cfg.show);
        assert_eq!(cfg.output_dir, PathBuf::from("."));
    }

    #[test]
    fn bench_thresholds_are_comma_separated() {
        let cli = Cli::try_parse_from([
            "quadtree_perf",
            "bench",
            "--thresholds",
            "1,2,3",
            "--size",
            "64",
            "--config",
            "bench.json",
        ])
        .unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("bench.json")));
        let Some(Command::Bench(args)) = cli.command else {
            panic!("expected bench");
        };

        let mut cfg = AppConfig::default();
        args.apply(&mut cfg);
        assert_eq!(cfg.thresholds, vec![1, 2, 3]);
        assert_eq!(cfg.target_size, 64);
        assert_eq!(cfg.dataset_dir, PathBuf::from("dataset_images"));
    }
}
