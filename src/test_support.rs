//! Fixtures shared by the unit tests.

use std::io::Write;

/// Three rows, two images: `A` has two thresholds, `B` has one.
pub const SAMPLE: &str = "Image,Threshold,Runtime(ms),Compression Ratio\n\
                          A,1,10,0.5\n\
                          A,2,12,0.4\n\
                          B,1,8,0.6\n";

pub fn write_csv(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn load(contents: &str) -> polars::prelude::DataFrame {
    let file = write_csv(contents);
    let mut loader = crate::data::DataLoader::new();
    loader.load_csv(file.path()).unwrap().clone()
}
