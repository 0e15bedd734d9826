//! Statistics Calculator Module
//! Column-wise descriptive statistics over the feature matrix.

use crate::data::FeatureMatrix;
use tracing::debug;

/// Statistics for a single feature column.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureStats {
    pub name: String,
    pub count: usize,
    pub min: f64,
    pub max: f64,
    pub mean: f64,
    pub median: f64,
}

impl Default for FeatureStats {
    fn default() -> Self {
        Self {
            name: String::new(),
            count: 0,
            min: f64::NAN,
            max: f64::NAN,
            mean: f64::NAN,
            median: f64::NAN,
        }
    }
}

/// Per-feature statistics, indexed by feature position.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StatsTable {
    features: Vec<FeatureStats>,
}

impl StatsTable {
    pub fn iter(&self) -> impl Iterator<Item = &FeatureStats> {
        self.features.iter()
    }

    pub fn len(&self) -> usize {
        self.features.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    pub fn minimums(&self) -> Vec<f64> {
        self.features.iter().map(|s| s.min).collect()
    }

    pub fn maximums(&self) -> Vec<f64> {
        self.features.iter().map(|s| s.max).collect()
    }

    pub fn averages(&self) -> Vec<f64> {
        self.features.iter().map(|s| s.mean).collect()
    }

    pub fn medians(&self) -> Vec<f64> {
        self.features.iter().map(|s| s.median).collect()
    }
}

/// Handles statistical calculations.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    ///
    /// Values are expected to be finite; the loader rejects NaN and infinite cells.
    pub fn compute_descriptive_stats(values: &[f64]) -> FeatureStats {
        let n = values.len();
        if n == 0 {
            return FeatureStats::default();
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(f64::total_cmp);

        let mean = values.iter().sum::<f64>() / n as f64;
        let median = if n % 2 == 0 {
            (sorted[n / 2 - 1] + sorted[n / 2]) / 2.0
        } else {
            sorted[n / 2]
        };

        FeatureStats {
            name: String::new(),
            count: n,
            min: sorted[0],
            max: sorted[n - 1],
            mean,
            median,
        }
    }

    /// Compute statistics for every feature column, labels ignored.
    pub fn compute_feature_stats(features: &FeatureMatrix) -> StatsTable {
        let features = features
            .columns()
            .iter()
            .zip(features.names())
            .map(|(column, name)| {
                let mut stats = Self::compute_descriptive_stats(column);
                stats.name = name.clone();
                debug!(
                    feature = %stats.name,
                    min = stats.min,
                    max = stats.max,
                    mean = stats.mean,
                    median = stats.median,
                    "computed feature stats"
                );
                stats
            })
            .collect();

        StatsTable { features }
    }
}
