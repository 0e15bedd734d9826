//! CSV Data Loader Module
//! Reads the measurement file into a numeric, column-major dataset using Polars.

use polars::prelude::*;
use std::fs::File;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Required file '{}' not found.", .path.display())]
    NotFound { path: PathBuf },
    #[error("Failed to open '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Expected at least one feature column and a label column, found {0} column(s)")]
    TooFewColumns(usize),
    #[error("No data rows after the header")]
    NoData,
    #[error("Missing value in column '{column}' on line {line}")]
    MissingValue { column: String, line: usize },
    #[error("Value '{value}' in column '{column}' on line {line} is not a number")]
    NotNumeric {
        column: String,
        line: usize,
        value: String,
    },
}

/// Header names plus every column converted to `f64`.
///
/// All columns have the same length, one entry per data row.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    header: Vec<String>,
    columns: Vec<Vec<f64>>,
}

impl Dataset {
    /// Build a dataset from an already parsed DataFrame.
    pub fn from_dataframe(df: &DataFrame) -> Result<Self, LoaderError> {
        let header: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|name| name.trim().to_string())
            .collect();

        if header.len() < 2 {
            return Err(LoaderError::TooFewColumns(header.len()));
        }

        let blank = blank_rows(df)?;
        if blank.iter().all(|&b| b) {
            return Err(LoaderError::NoData);
        }
        let skipped = blank.iter().filter(|&&b| b).count();
        if skipped > 0 {
            debug!(skipped, "skipping blank lines");
        }

        let columns = df
            .get_columns()
            .iter()
            .zip(&header)
            .map(|(column, name)| column_values(column, name, &blank))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { header, columns })
    }

    pub fn header(&self) -> &[String] {
        &self.header
    }

    pub fn columns(&self) -> &[Vec<f64>] {
        &self.columns
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map(Vec::len).unwrap_or(0)
    }

    pub fn column_count(&self) -> usize {
        self.header.len()
    }
}

/// Line number in the file for a data row (the header is line 1).
fn line_of(row: usize) -> usize {
    row + 2
}

/// Empty-or-null flag for every cell of a column.
fn empty_cells(column: &Column) -> Result<Vec<bool>, LoaderError> {
    if matches!(column.dtype(), DataType::String) {
        return Ok(column
            .str()?
            .into_iter()
            .map(|cell| cell.map_or(true, |c| c.trim().is_empty()))
            .collect());
    }
    Ok(column.is_null().into_iter().map(|n| n != Some(false)).collect())
}

/// Rows where every cell is empty, i.e. blank lines in the file.
fn blank_rows(df: &DataFrame) -> Result<Vec<bool>, LoaderError> {
    let mut blank = vec![true; df.height()];
    for column in df.get_columns() {
        for (row, empty) in empty_cells(column)?.into_iter().enumerate() {
            blank[row] &= empty;
        }
    }
    Ok(blank)
}

fn finite(value: f64, name: &str, row: usize) -> Result<f64, LoaderError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(LoaderError::NotNumeric {
            column: name.to_string(),
            line: line_of(row),
            value: value.to_string(),
        })
    }
}

/// Convert one Polars column to `f64` values, rejecting empty, non-numeric or
/// non-finite cells. Rows flagged in `blank` are dropped.
fn column_values(column: &Column, name: &str, blank: &[bool]) -> Result<Vec<f64>, LoaderError> {
    if matches!(column.dtype(), DataType::String) {
        // Text columns show up when cells carry padding or garbage
        return column
            .str()?
            .into_iter()
            .enumerate()
            .filter(|(row, _)| !blank[*row])
            .map(|(row, cell)| {
                let cell = cell
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .ok_or_else(|| LoaderError::MissingValue {
                        column: name.to_string(),
                        line: line_of(row),
                    })?;
                let value = cell.parse::<f64>().map_err(|_| LoaderError::NotNumeric {
                    column: name.to_string(),
                    line: line_of(row),
                    value: cell.to_string(),
                })?;
                finite(value, name, row)
            })
            .collect();
    }

    let as_f64 = column.cast(&DataType::Float64)?;
    as_f64
        .f64()?
        .into_iter()
        .enumerate()
        .filter(|(row, _)| !blank[*row])
        .map(|(row, value)| {
            let value = value.ok_or_else(|| LoaderError::MissingValue {
                column: name.to_string(),
                line: line_of(row),
            })?;
            finite(value, name, row)
        })
        .collect()
}

/// Loads the measurement CSV from a fixed path.
pub struct DataLoader {
    file_path: PathBuf,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Read the header line and numeric rows.
    ///
    /// Column types are inferred from the whole file. Blank lines are skipped.
    /// The file handle is handed to the CSV reader and dropped before returning.
    pub fn load(&self) -> Result<Dataset, LoaderError> {
        let file = File::open(&self.file_path).map_err(|source| match source.kind() {
            io::ErrorKind::NotFound => LoaderError::NotFound {
                path: self.file_path.clone(),
            },
            _ => LoaderError::Io {
                path: self.file_path.clone(),
                source,
            },
        })?;
        debug!(path = %self.file_path.display(), "opened input file");

        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(None)
            .into_reader_with_file_handle(file)
            .finish()?;

        let dataset = Dataset::from_dataframe(&df)?;
        info!(
            rows = dataset.row_count(),
            columns = dataset.column_count(),
            "loaded dataset"
        );
        Ok(dataset)
    }

    /// Get file path.
    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_header_and_rows() {
        let file = write_csv(
            "variance,skewness,curtosis,entropy,class\n\
             3.6216,8.6661,-2.8073,-0.44699,0\n\
             -1.3971,3.3191,-1.3927,-1.9948,1\n",
        );
        let dataset = DataLoader::new(file.path()).load().unwrap();

        assert_eq!(
            dataset.header(),
            ["variance", "skewness", "curtosis", "entropy", "class"]
        );
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.column_count(), 5);
        assert_eq!(dataset.columns()[0], vec![3.6216, -1.3971]);
        assert_eq!(dataset.columns()[4], vec![0.0, 1.0]);
    }

    #[test]
    fn test_header_names_are_trimmed() {
        let file = write_csv("a , b,label\n1,2,0\n");
        let dataset = DataLoader::new(file.path()).load().unwrap();
        assert_eq!(dataset.header(), ["a", "b", "label"]);
    }

    #[test]
    fn test_integer_cells_become_floats() {
        let file = write_csv("a,b,label\n1,2,0\n5,6,1\n");
        let dataset = DataLoader::new(file.path()).load().unwrap();
        assert_eq!(dataset.columns()[1], vec![2.0, 6.0]);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("banknote_data.csv");
        let err = DataLoader::new(&path).load().unwrap_err();
        assert!(matches!(err, LoaderError::NotFound { .. }));
        assert_eq!(
            err.to_string(),
            format!("Required file '{}' not found.", path.display())
        );
    }

    #[test]
    fn test_non_numeric_cell_aborts() {
        let file = write_csv("a,b,label\n1,2,0\n3,oops,1\n");
        let err = DataLoader::new(file.path()).load().unwrap_err();
        match err {
            LoaderError::NotNumeric {
                column,
                line,
                value,
            } => {
                assert_eq!(column, "b");
                assert_eq!(line, 3);
                assert_eq!(value, "oops");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_cell_aborts() {
        let file = write_csv("a,b,label\n1,,0\n3,4,1\n");
        let err = DataLoader::new(file.path()).load().unwrap_err();
        assert!(matches!(err, LoaderError::MissingValue { line: 2, .. }));
    }

    #[test]
    fn test_trailing_blank_lines_are_skipped() {
        let file = write_csv("a,b,label\n1,2,0\n3,4,1\n\n\n");
        let dataset = DataLoader::new(file.path()).load().unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.columns()[0], vec![1.0, 3.0]);
        assert_eq!(dataset.columns()[2], vec![0.0, 1.0]);
    }

    #[test]
    fn test_blank_line_mid_file_is_skipped() {
        let file = write_csv("a,b,label\n1,2,0\n\n3,4,1\n");
        let dataset = DataLoader::new(file.path()).load().unwrap();
        assert_eq!(dataset.row_count(), 2);
        assert_eq!(dataset.columns()[1], vec![2.0, 4.0]);
    }

    #[test]
    fn test_late_decimal_after_many_integers() {
        let mut contents = String::from("a,b,label\n");
        for i in 0..10_001 {
            contents.push_str(&format!("{i},2,{}\n", i % 2));
        }
        contents.push_str("1.5,2,1\n");
        let file = write_csv(&contents);

        let dataset = DataLoader::new(file.path()).load().unwrap();
        assert_eq!(dataset.row_count(), 10_002);
        assert_eq!(dataset.columns()[0].last(), Some(&1.5));
    }

    #[test]
    fn test_nan_cell_aborts() {
        let file = write_csv("a,b,label\n1,nan,0\n3,4,1\n");
        let err = DataLoader::new(file.path()).load().unwrap_err();
        match err {
            LoaderError::NotNumeric { column, line, .. } => {
                assert_eq!(column, "b");
                assert_eq!(line, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_header_only_has_no_data() {
        let file = write_csv("a,b,label\n");
        assert!(DataLoader::new(file.path()).load().is_err());
    }

    #[test]
    fn test_single_column_rejected() {
        let file = write_csv("label\n0\n1\n");
        let err = DataLoader::new(file.path()).load().unwrap_err();
        assert!(matches!(err, LoaderError::TooFewColumns(1)));
    }

    #[test]
    fn test_from_dataframe() {
        let df = polars::df!(
            "x" => [1.0, 2.0, 3.0],
            "label" => [0i64, 1, 0]
        )
        .unwrap();
        let dataset = Dataset::from_dataframe(&df).unwrap();
        assert_eq!(dataset.row_count(), 3);
        assert_eq!(dataset.columns()[1], vec![0.0, 1.0, 0.0]);
    }
}
