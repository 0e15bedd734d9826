//! Banknote Report Application
//! Runs the pipeline: load, split, aggregate, print, plot.

use crate::charts::{ChartError, ChartPlotter, ChartViewer, BAR_CHART_FILE, SCATTER_FILE};
use crate::config::ReportConfig;
use crate::data::{DataLoader, DataProcessor, FeatureMatrix, LabelVector};
use crate::report::ReportFormatter;
use crate::stats::{StatsCalculator, StatsTable};
use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;
use tracing::info;

/// Everything derived from the input file, held immutably for the rest of the run.
#[derive(Debug, Clone)]
pub struct Analysis {
    pub header: Vec<String>,
    pub features: FeatureMatrix,
    pub labels: LabelVector,
    pub stats: StatsTable,
}

pub struct BanknoteApp {
    config: ReportConfig,
}

impl BanknoteApp {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// Full run: analysis, printed report, then charts.
    pub fn run(&self) -> Result<()> {
        let analysis = self.analyze()?;
        ReportFormatter::print(&analysis.stats);

        let charts = self.render_charts(&analysis)?;
        if self.config.show_charts {
            ChartViewer::show_all(charts.as_slice()).context("Failed to display charts")?;
        }
        Ok(())
    }

    /// Load the input file, split it and compute per-feature statistics.
    pub fn analyze(&self) -> Result<Analysis> {
        let loader = DataLoader::new(&self.config.input_path);
        let dataset = loader.load()?;

        let (features, labels) = DataProcessor::split(&dataset)
            .with_context(|| format!("Invalid data in '{}'", loader.file_path().display()))?;
        let stats = StatsCalculator::compute_feature_stats(&features);
        info!(
            records = labels.len(),
            features = features.feature_count(),
            "analysis complete"
        );

        Ok(Analysis {
            header: dataset.header().to_vec(),
            features,
            labels,
            stats,
        })
    }

    /// Render the scatter plot and the bar chart, returning the image paths.
    pub fn render_charts(&self, analysis: &Analysis) -> Result<Vec<PathBuf>> {
        let (x_feature, y_feature) = self.config.scatter_features;
        // Fail on bad axes before touching the filesystem
        ChartPlotter::class_series(&analysis.features, &analysis.labels, x_feature, y_feature)?;

        let dir = self.config.chart_dir();
        fs::create_dir_all(&dir).map_err(|source| ChartError::OutputDir {
            path: dir.clone(),
            source,
        })?;

        let scatter_path = dir.join(SCATTER_FILE);
        ChartPlotter::render_scatter(
            &analysis.features,
            &analysis.labels,
            self.config.scatter_features,
            &scatter_path,
            self.config.chart_size,
        )?;

        let bar_path = dir.join(BAR_CHART_FILE);
        ChartPlotter::render_bar_chart(&analysis.stats, &bar_path, self.config.chart_size)?;

        info!(dir = %dir.display(), "charts written");
        Ok(vec![scatter_path, bar_path])
    }
}
