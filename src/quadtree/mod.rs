//! QuadTree module - image compression benchmark

pub mod bench;
mod image_io;
mod tree;

pub use bench::BenchSettings;
