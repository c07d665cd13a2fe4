//! CSV Data Loader Module
//! Handles metadata CSV loading and the basic exploration view using Polars.

use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Rows shown in the exploration preview.
pub const PREVIEW_ROWS: usize = 5;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Invalid CSV {path}: {reason}")]
    Format { path: PathBuf, reason: String },
}

impl LoaderError {
    fn format(path: &Path, reason: impl ToString) -> Self {
        LoaderError::Format {
            path: path.to_path_buf(),
            reason: reason.to_string(),
        }
    }
}

/// Handles CSV file loading with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a metadata CSV file.
    ///
    /// Column types are inferred over the whole file so that a column mixing
    /// `2020` and `2020-03-01` is read as text instead of losing values.
    pub fn load_csv(path: &Path) -> Result<DataFrame, LoaderError> {
        let metadata = std::fs::metadata(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.is_dir() {
            return Err(LoaderError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(std::io::ErrorKind::InvalidInput, "is a directory"),
            });
        }
        // Opening up front separates permission problems from parse problems
        std::fs::File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.len() == 0 {
            return Err(LoaderError::format(path, "file is empty"));
        }

        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(None)
            .finish()
            .and_then(|lazy| lazy.collect())
            .map_err(|e| LoaderError::format(path, e))?;

        if df.width() == 0 {
            return Err(LoaderError::format(path, "no header row"));
        }

        log::info!(
            "Loaded {} rows, {} columns from {}",
            df.height(),
            df.width(),
            path.display()
        );
        Ok(df)
    }

    /// Get list of column names from a DataFrame.
    pub fn get_columns(df: &DataFrame) -> Vec<String> {
        df.get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect()
    }
}

/// Per-column summary used by the exploration step.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnOverview {
    pub name: String,
    pub dtype: String,
    pub null_count: usize,
}

/// Shape, column types and missing values of a freshly loaded table.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetOverview {
    pub rows: usize,
    pub columns: Vec<ColumnOverview>,
    /// First rows, formatted as polars prints a frame.
    pub preview: String,
}

impl DatasetOverview {
    pub fn from_frame(df: &DataFrame) -> Self {
        let columns = df
            .get_columns()
            .iter()
            .map(|col| ColumnOverview {
                name: col.name().to_string(),
                dtype: col.dtype().to_string(),
                null_count: col.null_count(),
            })
            .collect();

        Self {
            rows: df.height(),
            columns,
            preview: df.head(Some(PREVIEW_ROWS)).to_string(),
        }
    }
}

impl fmt::Display for DatasetOverview {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== BASIC DATA EXPLORATION ===")?;
        writeln!(f, "Dataset dimensions: ({}, {})", self.rows, self.columns.len())?;
        writeln!(f)?;
        writeln!(f, "First {} rows:", PREVIEW_ROWS)?;
        writeln!(f, "{}", self.preview)?;
        writeln!(f)?;
        writeln!(f, "{:<32} {:<12} {:>10}", "Column", "Type", "Missing")?;
        for col in &self.columns {
            writeln!(f, "{:<32} {:<12} {:>10}", col.name, col.dtype, col.null_count)?;
        }
        Ok(())
    }
}
