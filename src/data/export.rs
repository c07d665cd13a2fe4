//! CSV Export Module
//! Writes a (filtered) cleaned table back out with the input's column layout.

use super::cleaner::CleanedTable;
use polars::prelude::*;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to create {path}: {source}")]
    Io {
        path: String,
        source: std::io::Error,
    },
}

/// Write `table` as CSV with a header row.
///
/// Only the columns of the input file are written, in file order; the
/// derived `year` and `abstract_word_count` columns stay behind.
pub fn write_csv<W: Write>(table: &CleanedTable, writer: W) -> Result<(), ExportError> {
    let mut subset = table.frame().select(table.source_columns().iter().cloned())?;
    CsvWriter::new(writer)
        .include_header(true)
        .finish(&mut subset)?;
    Ok(())
}

/// Write `table` to a file at `path`.
pub fn export_csv(table: &CleanedTable, path: &Path) -> Result<(), ExportError> {
    let file = std::fs::File::create(path).map_err(|source| ExportError::Io {
        path: path.display().to_string(),
        source,
    })?;
    write_csv(table, std::io::BufWriter::new(file))?;
    log::info!("Exported {} rows to {}", table.height(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{filter_by_year, DataCleaner, DataLoader, YearRange};
    use crate::test_support::SAMPLE_CSV;
    use tempfile::tempdir;

    #[test]
    fn test_write_csv_keeps_input_columns() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("metadata.csv");
        std::fs::write(&path, SAMPLE_CSV).unwrap();
        let table = DataCleaner::clean(&DataLoader::load_csv(&path).unwrap()).unwrap();

        let mut out = Vec::new();
        write_csv(&table, &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("cord_uid,title,abstract,publish_time,journal,source_x")
        );
        assert!(lines.next().unwrap().starts_with("a1,Covid spread patterns,"));
        assert!(text.contains("2020-03-01"));
        assert_eq!(text.lines().count(), 3);
    }

    #[test]
    fn test_export_filtered_subset_round_trips() {
        let tmp = tempdir().unwrap();
        let source = tmp.path().join("metadata.csv");
        std::fs::write(&source, SAMPLE_CSV).unwrap();
        let table = DataCleaner::clean(&DataLoader::load_csv(&source).unwrap()).unwrap();
        let filtered = filter_by_year(&table, YearRange::new(2020, 2020)).unwrap();

        let target = tmp.path().join("filtered.csv");
        export_csv(&filtered, &target).unwrap();

        let reread = DataLoader::load_csv(&target).unwrap();
        assert_eq!(reread.height(), 1);
        assert_eq!(DataLoader::get_columns(&reread), table.source_columns());
    }
}
