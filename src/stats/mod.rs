//! Stats module - per-image summaries

mod calculator;

pub use calculator::StatsCalculator;
