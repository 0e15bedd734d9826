//! Data module - CSV loading and feature/label split

mod loader;
mod processor;

pub use loader::{DataLoader, Dataset, LoaderError};
pub use processor::{DataProcessor, FeatureMatrix, LabelVector, SplitError};
