//! Data Processor Module
//! Splits a loaded dataset into the feature matrix and the class labels.

use crate::data::Dataset;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug)]
pub enum SplitError {
    #[error("Dataset needs at least one feature column before the label column")]
    NoFeatures,
    #[error("Label {value} on data row {row} is not 0 or 1")]
    InvalidLabel { row: usize, value: f64 },
}

/// Feature columns (every column but the last), column-major.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureMatrix {
    names: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl FeatureMatrix {
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn name(&self, index: usize) -> Option<&str> {
        self.names.get(index).map(String::as_str)
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn column(&self, index: usize) -> Option<&[f64]> {
        self.columns.get(index).map(Vec::as_slice)
    }

    pub fn feature_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }
}

/// Class label per record: 0 = genuine, 1 = forged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelVector(Vec<i64>);

impl LabelVector {
    pub fn as_slice(&self) -> &[i64] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn count_of(&self, label: i64) -> usize {
        self.0.iter().filter(|&&l| l == label).count()
    }
}

/// Handles the feature/label split.
pub struct DataProcessor;

impl DataProcessor {
    /// Split the dataset: all columns but the last are features, the last is the label.
    pub fn split(dataset: &Dataset) -> Result<(FeatureMatrix, LabelVector), SplitError> {
        let (label_column, feature_columns) = dataset
            .columns()
            .split_last()
            .filter(|(_, features)| !features.is_empty())
            .ok_or(SplitError::NoFeatures)?;

        let labels = label_column
            .iter()
            .enumerate()
            .map(|(row, &value)| Self::to_label(row, value))
            .collect::<Result<Vec<_>, _>>()?;

        let names = dataset.header()[..feature_columns.len()].to_vec();
        let features = FeatureMatrix {
            names,
            columns: feature_columns.to_vec(),
        };
        let labels = LabelVector(labels);

        debug!(
            features = features.feature_count(),
            genuine = labels.count_of(0),
            forged = labels.count_of(1),
            "split dataset"
        );
        Ok((features, labels))
    }

    fn to_label(row: usize, value: f64) -> Result<i64, SplitError> {
        match value {
            v if v == 0.0 => Ok(0),
            v if v == 1.0 => Ok(1),
            _ => Err(SplitError::InvalidLabel {
                row: row + 1,
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset(label: [f64; 3]) -> Dataset {
        let df = polars::df!(
            "variance" => [1.0, 5.0, 9.0],
            "skewness" => [2.0, 6.0, 10.0],
            "curtosis" => [3.0, 7.0, 11.0],
            "entropy" => [4.0, 8.0, 12.0],
            "class" => label
        )
        .unwrap();
        Dataset::from_dataframe(&df).unwrap()
    }

    #[test]
    fn test_split_features_and_labels() {
        let data = dataset([0.0, 1.0, 0.0]);
        let (features, labels) = DataProcessor::split(&data).unwrap();

        assert_eq!(features.feature_count(), 4);
        assert_eq!(features.row_count(), 3);
        assert_eq!(features.names(), ["variance", "skewness", "curtosis", "entropy"]);
        assert_eq!(features.column(0), Some(&[1.0, 5.0, 9.0][..]));
        assert_eq!(features.column(3), Some(&[4.0, 8.0, 12.0][..]));
        assert_eq!(labels.as_slice(), &[0, 1, 0]);
        assert_eq!(labels.count_of(0), 2);
    }

    #[test]
    fn test_header_is_one_longer_than_features() {
        let data = dataset([0.0, 0.0, 1.0]);
        let (features, _) = DataProcessor::split(&data).unwrap();
        assert_eq!(data.header().len(), features.feature_count() + 1);
    }

    #[test]
    fn test_column_out_of_range() {
        let (features, _) = DataProcessor::split(&dataset([0.0, 1.0, 1.0])).unwrap();
        assert_eq!(features.column(4), None);
        assert_eq!(features.name(4), None);
    }

    #[test]
    fn test_invalid_label_rejected() {
        let err = DataProcessor::split(&dataset([0.0, 2.0, 1.0])).unwrap_err();
        assert!(matches!(err, SplitError::InvalidLabel { row: 2, value } if value == 2.0));

        let err = DataProcessor::split(&dataset([0.5, 1.0, 1.0])).unwrap_err();
        assert!(matches!(err, SplitError::InvalidLabel { row: 1, .. }));
    }
}
