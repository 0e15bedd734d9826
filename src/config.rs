//! Report Configuration
//! Fixed settings for a report run. The defaults are the program's behavior;
//! nothing is read from flags or the environment.

use std::path::PathBuf;
use tracing::Level;

/// Input file expected in the working directory.
pub const DEFAULT_INPUT: &str = "banknote_data.csv";

/// Directory name used under the system temp dir when no output dir is set.
const CHART_DIR_NAME: &str = "banknote_report";

/// Settings for a single report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    pub input_path: PathBuf,
    /// Where chart images go; `None` means a scratch dir under the system temp dir.
    pub output_dir: Option<PathBuf>,
    /// Feature indices plotted on the scatter x and y axes.
    pub scatter_features: (usize, usize),
    /// Chart image size in pixels (10x6 inches at 100 dpi).
    pub chart_size: (u32, u32),
    /// Open rendered charts in the default image viewer.
    pub show_charts: bool,
    pub log_level: Level,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            input_path: PathBuf::from(DEFAULT_INPUT),
            output_dir: None,
            scatter_features: (0, 3),
            chart_size: (1000, 600),
            show_charts: true,
            log_level: Level::WARN,
        }
    }
}

impl ReportConfig {
    /// Directory chart images are written to.
    pub fn chart_dir(&self) -> PathBuf {
        self.output_dir
            .clone()
            .unwrap_or_else(|| std::env::temp_dir().join(CHART_DIR_NAME))
    }
}
