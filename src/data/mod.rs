//! Data module - CSV loading and processing

mod loader;
mod processor;
pub mod record;

pub use loader::DataLoader;
pub use processor::{DataProcessor, ImageSeries, ProcessorError};
pub use record::PerformanceRecord;
