//! Stats module - aggregations and summary statistics

mod calculator;
mod text;

pub use calculator::{AbstractLengthStats, FrequencyTable, StatsCalculator, SummaryReport};
pub use text::TitleTokenizer;
