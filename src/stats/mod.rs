//! Statistics module - Per-feature descriptive statistics

mod calculator;

pub use calculator::{FeatureStats, StatsCalculator, StatsTable};
