//! Data module - metadata loading, cleaning, filtering and export

mod cache;
mod cleaner;
mod export;
mod filter;
mod loader;

pub use cache::{CacheError, TableCache};
pub use cleaner::{
    parse_publish_time, word_count, CleanError, CleanedTable, DataCleaner, ABSTRACT,
    ABSTRACT_WORD_COUNT, JOURNAL, PUBLISH_TIME, SOURCE, TITLE, YEAR,
};
pub use export::{export_csv, write_csv, ExportError};
pub use filter::{filter_by_year, year_bounds, YearRange};
pub use loader::{ColumnOverview, DataLoader, DatasetOverview, LoaderError, PREVIEW_ROWS};
