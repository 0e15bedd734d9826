//! Chart Viewer
//! Hands rendered chart images to the platform's default image viewer.

use crate::charts::ChartError;
use std::path::Path;
use tracing::debug;

pub struct ChartViewer;

impl ChartViewer {
    /// Open one chart image with the system default app.
    pub fn show(path: &Path) -> Result<(), ChartError> {
        debug!(path = %path.display(), "opening chart");
        open::that(path).map_err(|source| ChartError::Viewer {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Open each chart in order, stopping at the first failure.
    pub fn show_all<P: AsRef<Path>>(paths: &[P]) -> Result<(), ChartError> {
        paths.iter().try_for_each(|path| Self::show(path.as_ref()))
    }
}
