//! Shared fixtures for unit tests.

use polars::prelude::*;

pub const SAMPLE_CSV: &str = "\
cord_uid,title,abstract,publish_time,journal,source_x
a1,Covid spread patterns,one two three four five six seven eight nine ten,2020-03-01,Nature,PMC
a2,Spread of the virus,,not-a-date,Nature,Medline
a3,,n/a,2021-07-15,Lancet,PMC
";

/// Build a string column where `None` is a missing value.
pub fn text_column(name: &str, values: &[Option<&str>]) -> Column {
    Column::new(name.into(), values.to_vec())
}

/// A metadata-shaped frame with every core column present.
pub fn papers(
    titles: &[Option<&str>],
    abstracts: &[Option<&str>],
    publish_times: &[Option<&str>],
    journals: &[Option<&str>],
    sources: &[Option<&str>],
) -> DataFrame {
    DataFrame::new(vec![
        text_column("title", titles),
        text_column("abstract", abstracts),
        text_column("publish_time", publish_times),
        text_column("journal", journals),
        text_column("source_x", sources),
    ])
    .unwrap()
}
