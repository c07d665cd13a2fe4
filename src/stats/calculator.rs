//! Statistics Calculator Module
//! Grouped counts, title word frequencies and summary statistics over the
//! cleaned metadata.

use super::text::TitleTokenizer;
use crate::data::{CleanedTable, ABSTRACT_WORD_COUNT, JOURNAL, SOURCE, TITLE, YEAR};
use polars::prelude::*;
use statrs::statistics::{self, Data, Median};
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::num::NonZeroUsize;

/// Counts per key, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyTable<K> {
    entries: Vec<(K, usize)>,
}

impl<K> Default for FrequencyTable<K> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<K: PartialEq> FrequencyTable<K> {
    pub fn new(entries: Vec<(K, usize)>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[(K, usize)] {
        &self.entries
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (K, usize)> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Sum of all counts.
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c).sum()
    }

    pub fn get(&self, key: &K) -> Option<usize> {
        self.entries.iter().find(|(k, _)| k == key).map(|(_, c)| *c)
    }

    /// Entry with the largest count, the earliest one on ties.
    pub fn peak(&self) -> Option<&(K, usize)> {
        self.entries
            .iter()
            .fold(None, |best: Option<&(K, usize)>, entry| match best {
                Some(b) if b.1 >= entry.1 => Some(b),
                _ => Some(entry),
            })
    }

    pub fn into_entries(self) -> Vec<(K, usize)> {
        self.entries
    }
}

/// Headline numbers for the one-shot report and the dashboard metrics.
///
/// Each optional field is `None` when its source column is absent.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryReport {
    pub total_papers: usize,
    pub year_range: Option<(i32, i32)>,
    pub unique_journals: Option<usize>,
    pub mean_abstract_words: Option<f64>,
}

impl fmt::Display for SummaryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== ANALYSIS REPORT ===")?;
        writeln!(f, "Total papers analyzed: {}", self.total_papers)?;
        if let Some((min, max)) = self.year_range {
            writeln!(f, "Publication years: {} - {}", min, max)?;
        }
        if let Some(journals) = self.unique_journals {
            writeln!(f, "Unique journals: {}", journals)?;
        }
        if let Some(mean) = self.mean_abstract_words {
            writeln!(f, "Average abstract length: {:.1} words", mean)?;
        }
        Ok(())
    }
}

/// Distribution of `abstract_word_count`.
#[derive(Debug, Clone, PartialEq)]
pub struct AbstractLengthStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    /// Sample standard deviation, `None` below two rows.
    pub std: Option<f64>,
    pub min: f64,
    pub max: f64,
}

/// Read-only aggregations over a cleaned table.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Papers per year, ascending. Rows without a year are not counted.
    pub fn publications_by_year(table: &CleanedTable) -> FrequencyTable<i32> {
        let mut counts: BTreeMap<i32, usize> = BTreeMap::new();
        for year in Self::int_values(table, YEAR).into_iter().flatten() {
            *counts.entry(year).or_default() += 1;
        }
        FrequencyTable::new(counts.into_iter().collect())
    }

    /// The `n` journals with the most papers.
    pub fn top_journals(table: &CleanedTable, n: NonZeroUsize) -> FrequencyTable<String> {
        let journals = Self::text_values(table, JOURNAL).into_iter().flatten();
        Self::top_n(Self::count_first_seen(journals), n)
    }

    /// The `n` largest sources.
    pub fn source_distribution(table: &CleanedTable, n: NonZeroUsize) -> FrequencyTable<String> {
        let sources = Self::text_values(table, SOURCE).into_iter().flatten();
        Self::top_n(Self::count_first_seen(sources), n)
    }

    /// The `n` most frequent title words after stop-word removal.
    pub fn title_word_frequency(
        table: &CleanedTable,
        tokenizer: &TitleTokenizer,
        n: NonZeroUsize,
    ) -> FrequencyTable<String> {
        let words = Self::text_values(table, TITLE)
            .into_iter()
            .flatten()
            .flat_map(|title| tokenizer.tokens(&title));
        Self::top_n(Self::count_first_seen(words), n)
    }

    pub fn summary_report(table: &CleanedTable) -> SummaryReport {
        let year_range = if table.has_column(YEAR) {
            let years: Vec<i32> = Self::int_values(table, YEAR).into_iter().flatten().collect();
            years.iter().min().zip(years.iter().max()).map(|(a, b)| (*a, *b))
        } else {
            None
        };

        let unique_journals = table.has_column(JOURNAL).then(|| {
            table
                .frame()
                .column(JOURNAL)
                .and_then(|journals| journals.drop_nulls().n_unique())
                .unwrap_or(0)
        });

        let mean_abstract_words = if table.has_column(ABSTRACT_WORD_COUNT) {
            let words = Self::float_values(table, ABSTRACT_WORD_COUNT);
            (!words.is_empty()).then(|| statistics::Statistics::mean(words.iter()))
        } else {
            None
        };

        SummaryReport {
            total_papers: table.height(),
            year_range,
            unique_journals,
            mean_abstract_words,
        }
    }

    /// Descriptive statistics of abstract lengths, if the column has values.
    pub fn abstract_length_stats(table: &CleanedTable) -> Option<AbstractLengthStats> {
        let values = Self::float_values(table, ABSTRACT_WORD_COUNT);
        if values.is_empty() {
            return None;
        }

        let count = values.len();
        let std = (count > 1).then(|| statistics::Statistics::std_dev(values.iter()));
        Some(AbstractLengthStats {
            count,
            mean: statistics::Statistics::mean(values.iter()),
            median: Data::new(values.clone()).median(),
            std,
            min: statistics::Statistics::min(values.iter()),
            max: statistics::Statistics::max(values.iter()),
        })
    }

    /// Count occurrences, keeping keys in the order they were first seen.
    pub fn count_first_seen<I>(values: I) -> Vec<(String, usize)>
    where
        I: IntoIterator<Item = String>,
    {
        let mut index: HashMap<String, usize> = HashMap::new();
        let mut counts: Vec<(String, usize)> = Vec::new();

        for value in values {
            match index.get(&value) {
                Some(&i) => counts[i].1 += 1,
                None => {
                    index.insert(value.clone(), counts.len());
                    counts.push((value, 1));
                }
            }
        }

        counts
    }

    /// Highest counts first; the stable sort keeps first-seen order on ties.
    fn top_n(mut counts: Vec<(String, usize)>, n: NonZeroUsize) -> FrequencyTable<String> {
        counts.sort_by(|a, b| b.1.cmp(&a.1));
        counts.truncate(n.get());
        FrequencyTable::new(counts)
    }

    /// Values of a column as text, empty when the column is absent.
    fn text_values(table: &CleanedTable, name: &str) -> Vec<Option<String>> {
        table
            .frame()
            .column(name)
            .ok()
            .and_then(|col| col.cast(&DataType::String).ok())
            .map(|col| {
                col.str()
                    .map(|ca| ca.into_iter().map(|v| v.map(str::to_string)).collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    fn int_values(table: &CleanedTable, name: &str) -> Vec<Option<i32>> {
        table
            .frame()
            .column(name)
            .ok()
            .and_then(|col| col.cast(&DataType::Int32).ok())
            .map(|col| {
                col.i32()
                    .map(|ca| ca.into_iter().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }

    /// Non-missing values of a numeric column.
    fn float_values(table: &CleanedTable, name: &str) -> Vec<f64> {
        table
            .frame()
            .column(name)
            .ok()
            .and_then(|col| col.cast(&DataType::Float64).ok())
            .map(|col| {
                col.f64()
                    .map(|ca| ca.into_iter().flatten().collect())
                    .unwrap_or_default()
            })
            .unwrap_or_default()
    }
}
