//! Banknote Report - Feature statistics & charts for banknote measurements
//!
//! Loads `banknote_data.csv`, prints per-feature minimum/maximum/average/median,
//! and renders a class scatter plot plus a bar chart of feature averages.

pub mod app;
pub mod charts;
pub mod config;
pub mod data;
pub mod report;
pub mod stats;

pub use app::{Analysis, BanknoteApp};
pub use config::ReportConfig;
