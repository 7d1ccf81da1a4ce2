//! Hands a saved chart to the desktop's default image viewer.

use log::{info, warn};
use std::path::Path;

/// Open `path` with the system viewer.
///
/// A failure is only logged; the chart is already on disk.
pub fn show(path: &Path) {
    match open::that(path) {
        Ok(()) => info!("Opened {}", path.display()),
        Err(e) => warn!("Could not open {}: {}", path.display(), e),
    }
}
