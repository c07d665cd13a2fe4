use polars::prelude::*;

use super::cleaner::{CleanError, CleanedTable, YEAR};

/// Inclusive year window selected in the dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub start: i32,
    pub end: i32,
}

impl YearRange {
    /// Build a range, swapping the bounds if they arrive reversed.
    pub fn new(start: i32, end: i32) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    pub fn contains(&self, year: i32) -> bool {
        (self.start..=self.end).contains(&year)
    }
}

/// Smallest and largest year present, if any row has one.
pub fn year_bounds(table: &CleanedTable) -> Option<YearRange> {
    let years = table.frame().column(YEAR).ok()?.cast(&DataType::Int32).ok()?;
    let ca = years.i32().ok()?;
    Some(YearRange::new(ca.min()?, ca.max()?))
}

/// Rows whose year falls inside `range`, as a new table.
///
/// Rows without a year never match. A table without a `year` column is
/// returned unchanged, since there is nothing to filter on.
pub fn filter_by_year(table: &CleanedTable, range: YearRange) -> Result<CleanedTable, CleanError> {
    if !table.has_column(YEAR) {
        return Ok(table.clone());
    }

    // Null years compare to null and are dropped by the filter
    let year = col(YEAR).cast(DataType::Int32);
    let filtered = table
        .frame()
        .clone()
        .lazy()
        .filter(year.clone().gt_eq(lit(range.start)).and(year.lt_eq(lit(range.end))))
        .collect()?;
    log::debug!(
        "Year filter {}-{} kept {} of {} rows",
        range.start,
        range.end,
        filtered.height(),
        table.height()
    );
    Ok(table.with_frame(filtered))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataCleaner;
    use crate::test_support::{papers, text_column};

    fn table() -> CleanedTable {
        let df = papers(
            &[Some("a"), Some("b"), Some("c"), Some("d")],
            &[None; 4],
            &[Some("2019-12-31"), Some("2020-06-01"), None, Some("2022-01-01")],
            &[None; 4],
            &[None; 4],
        );
        DataCleaner::clean(&df).unwrap()
    }

    #[test]
    fn test_year_range_orders_bounds() {
        assert_eq!(YearRange::new(2021, 2019), YearRange::new(2019, 2021));
        assert!(YearRange::new(2019, 2021).contains(2021));
        assert!(!YearRange::new(2019, 2021).contains(2022));
    }

    #[test]
    fn test_year_bounds() {
        assert_eq!(year_bounds(&table()), Some(YearRange::new(2019, 2022)));
    }

    #[test]
    fn test_year_bounds_without_years() {
        let df = DataFrame::new(vec![text_column("title", &[Some("a")])]).unwrap();
        let table = DataCleaner::clean(&df).unwrap();
        assert_eq!(year_bounds(&table), None);
    }

    #[test]
    fn test_filter_is_inclusive_and_drops_missing_years() {
        let source = table();
        let filtered = filter_by_year(&source, YearRange::new(2020, 2022)).unwrap();
        assert_eq!(filtered.height(), 2);
        // The cached table is left alone
        assert_eq!(source.height(), 4);
        assert_eq!(filtered.source_columns(), source.source_columns());
    }

    #[test]
    fn test_filter_without_year_column_is_identity() {
        let df = DataFrame::new(vec![text_column("title", &[Some("a"), Some("b")])]).unwrap();
        let table = DataCleaner::clean(&df).unwrap();
        let filtered = filter_by_year(&table, YearRange::new(2000, 2001)).unwrap();
        assert_eq!(filtered.height(), 2);
    }
}
