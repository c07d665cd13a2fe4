//! Data Cleaner Module
//! Derives the `year` and `abstract_word_count` columns and drops untitled papers.

use super::loader::DataLoader;
use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;
use thiserror::Error;

pub const TITLE: &str = "title";
pub const ABSTRACT: &str = "abstract";
pub const PUBLISH_TIME: &str = "publish_time";
pub const JOURNAL: &str = "journal";
pub const SOURCE: &str = "source_x";
pub const YEAR: &str = "year";
pub const ABSTRACT_WORD_COUNT: &str = "abstract_word_count";

/// Days from 0001-01-01 to 1970-01-01, the epoch of Polars `Date`.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

// `%B` also accepts the three-letter month abbreviation when parsing
const DATE_FORMATS: [&str; 5] = ["%Y-%m-%d", "%Y/%m/%d", "%Y %B %d", "%m/%d/%Y", "%d %B %Y"];
// `%.f` also matches when there is no fractional part
const DATETIME_FORMATS: [&str; 3] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

#[derive(Error, Debug)]
pub enum CleanError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// Metadata table after cleaning.
///
/// Every row has a title. Remembers the input's column order so a filtered
/// subset can be written back out with the same layout.
#[derive(Debug, Clone)]
pub struct CleanedTable {
    df: DataFrame,
    source_columns: Vec<String>,
}

impl CleanedTable {
    pub fn frame(&self) -> &DataFrame {
        &self.df
    }

    pub fn height(&self) -> usize {
        self.df.height()
    }

    pub fn is_empty(&self) -> bool {
        self.df.height() == 0
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.df.get_column_index(name).is_some()
    }

    /// Columns of the table this one was cleaned from, in file order.
    pub fn source_columns(&self) -> &[String] {
        &self.source_columns
    }

    /// Same layout, different rows.
    pub(crate) fn with_frame(&self, df: DataFrame) -> Self {
        Self {
            df,
            source_columns: self.source_columns.clone(),
        }
    }
}

/// Handles data cleaning operations.
pub struct DataCleaner;

impl DataCleaner {
    /// Clean a loaded metadata table.
    ///
    /// Each step only runs when its source column exists. Cleaning an already
    /// cleaned frame returns an equal frame.
    pub fn clean(df: &DataFrame) -> Result<CleanedTable, CleanError> {
        let source_columns = DataLoader::get_columns(df);
        let mut out = df.clone();

        if out.get_column_index(PUBLISH_TIME).is_some() {
            let text = out.column(PUBLISH_TIME)?.cast(&DataType::String)?;
            let dates: Vec<Option<NaiveDate>> = text
                .str()?
                .into_iter()
                .map(|raw| raw.and_then(parse_publish_time))
                .collect();

            let days: Vec<Option<i32>> = dates
                .iter()
                .map(|d| d.map(|d| d.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE))
                .collect();
            let years: Vec<Option<i32>> = dates.iter().map(|d| d.map(|d| d.year())).collect();

            let unparsed = dates.iter().filter(|d| d.is_none()).count();
            log::debug!("{} publish_time values could not be parsed", unparsed);

            let date_col = Column::new(PUBLISH_TIME.into(), days).cast(&DataType::Date)?;
            out.with_column(date_col)?;
            out.with_column(Column::new(YEAR.into(), years))?;
        }

        if out.get_column_index(ABSTRACT).is_some() {
            let text = out.column(ABSTRACT)?.cast(&DataType::String)?;
            let counts: Vec<u32> = text
                .str()?
                .into_iter()
                .map(|abs| abs.map_or(0, word_count))
                .collect();
            out.with_column(Column::new(ABSTRACT_WORD_COUNT.into(), counts))?;
        }

        if out.get_column_index(TITLE).is_some() {
            let before = out.height();
            let title = col(TITLE).cast(DataType::String);
            out = out
                .lazy()
                .filter(
                    title
                        .clone()
                        .is_not_null()
                        .and(title.str().strip_chars(lit(NULL)).neq(lit(""))),
                )
                .collect()?;
            log::info!("Dropped {} rows without a title", before - out.height());
        }

        Ok(CleanedTable {
            df: out,
            source_columns,
        })
    }
}

/// Number of whitespace-separated tokens.
pub fn word_count(text: &str) -> u32 {
    text.split_whitespace().count() as u32
}

/// Parse a `publish_time` value, returning `None` for anything unrecognised.
///
/// A bare year maps to January 1 and a year-month to the first of the month.
pub fn parse_publish_time(raw: &str) -> Option<NaiveDate> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    for fmt in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }
    for fmt in DATETIME_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(dt.date());
        }
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.date_naive());
    }

    // Year-month forms
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{s}-01"), "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(date) = NaiveDate::parse_from_str(&format!("{s} 01"), "%Y %B %d") {
        return Some(date);
    }

    if s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit()) {
        return s.parse().ok().and_then(|y| NaiveDate::from_ymd_opt(y, 1, 1));
    }

    None
}
