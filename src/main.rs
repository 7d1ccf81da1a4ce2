//! QuadTree Perf - compression benchmark & threshold charts
//!
//! `plot` turns `performance.csv` into two line charts (compression ratio and
//! runtime against threshold, one line per image); `bench` produces that CSV.

mod charts;
mod cli;
mod config;
mod data;
mod quadtree;
mod stats;
#[cfg(test)]
mod test_support;

use anyhow::{Context, Result};
use charts::{ChartRenderer, THRESHOLD_CHARTS};
use clap::Parser;
use cli::{Cli, Command, PlotArgs};
use config::AppConfig;
use data::DataLoader;
use log::info;
use quadtree::BenchSettings;
use stats::StatsCalculator;

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut cfg = AppConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or_else(|| Command::Plot(PlotArgs::default())) {
        Command::Plot(args) => {
            args.apply(&mut cfg);
            plot(&cfg)
        }
        Command::Bench(args) => {
            args.apply(&mut cfg);
            bench(&cfg)
        }
    }
}

fn plot(cfg: &AppConfig) -> Result<()> {
    let mut loader = DataLoader::new().with_separator(cfg.separator.map(|s| s.as_byte()));
    let df = loader
        .load_csv(&cfg.csv_path)
        .with_context(|| format!("loading {}", cfg.csv_path.display()))?;

    for summary in StatsCalculator::summarize(df)? {
        info!("{}", summary);
    }

    std::fs::create_dir_all(&cfg.output_dir)
        .with_context(|| format!("creating {}", cfg.output_dir.display()))?;
    let renderer = ChartRenderer::new(cfg.chart_width, cfg.chart_height).with_grid(cfg.grid);
    for spec in THRESHOLD_CHARTS {
        let path = cfg.output_dir.join(spec.file_name);
        let chart = renderer
            .render_series(df, &spec, &path)
            .with_context(|| format!("rendering {}", spec.file_name))?;
        info!(
            "Saved '{}' to {} ({}x{}, series: {})",
            chart.title,
            chart.path.display(),
            chart.width,
            chart.height,
            chart.labels().join(", ")
        );
        if cfg.show {
            charts::show(&chart.path);
        }
    }

    if let Some(source) = loader.get_file_path() {
        info!(
            "Plotted {} rows from {}",
            loader.get_row_count(),
            source.display()
        );
    }
    Ok(())
}

fn bench(cfg: &AppConfig) -> Result<()> {
    let settings = BenchSettings {
        dataset_dir: cfg.dataset_dir.clone(),
        compressed_dir: cfg.compressed_dir.clone(),
        target_size: cfg.target_size,
        thresholds: cfg.thresholds.clone(),
    };
    let records = quadtree::bench::run(&settings)?;
    quadtree::bench::write_csv(&records, &cfg.csv_path)
        .with_context(|| format!("writing {}", cfg.csv_path.display()))?;
    Ok(())
}
