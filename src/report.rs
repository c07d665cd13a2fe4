//! One-shot Report
//! Loads the metadata once, prints the exploration and summary text and
//! writes one PNG per aggregation.

use crate::charts::StaticChartRenderer;
use crate::config::AppConfig;
use crate::data::{DatasetOverview, TableCache};
use crate::stats::{AbstractLengthStats, StatsCalculator, SummaryReport, TitleTokenizer};
use anyhow::{Context, Result};
use std::fmt;
use std::path::{Path, PathBuf};

const CHART_SIZE: (u32, u32) = (1200, 800);

/// Everything the report prints, plus the chart files it wrote.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub overview: DatasetOverview,
    pub cleaned_rows: usize,
    pub summary: SummaryReport,
    pub abstract_lengths: Option<AbstractLengthStats>,
    pub charts: Vec<PathBuf>,
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.overview)?;
        writeln!(f)?;
        writeln!(f, "=== DATA CLEANING ===")?;
        writeln!(
            f,
            "Cleaned data shape: {} rows ({} dropped)",
            self.cleaned_rows,
            self.overview.rows.saturating_sub(self.cleaned_rows)
        )?;
        if let Some(stats) = &self.abstract_lengths {
            writeln!(f)?;
            writeln!(f, "Abstract word count: count {}", stats.count)?;
            writeln!(f, "  mean   {:>10.1}", stats.mean)?;
            writeln!(f, "  median {:>10.1}", stats.median)?;
            match stats.std {
                Some(std) => writeln!(f, "  std    {:>10.1}", std)?,
                None => writeln!(f, "  std    {:>10}", "-")?,
            }
            writeln!(f, "  min    {:>10.0}", stats.min)?;
            writeln!(f, "  max    {:>10.0}", stats.max)?;
        }
        writeln!(f)?;
        write!(f, "{}", self.summary)?;
        if !self.charts.is_empty() {
            writeln!(f)?;
            writeln!(f, "Charts written:")?;
            for chart in &self.charts {
                writeln!(f, "  {}", chart.display())?;
            }
        }
        Ok(())
    }
}

/// Run the full load → clean → aggregate → render pipeline once.
pub fn generate_report(
    cache: &mut TableCache,
    data_path: &Path,
    config: &AppConfig,
) -> Result<AnalysisReport> {
    let raw = cache
        .load(data_path)
        .with_context(|| format!("Error loading data from {}", data_path.display()))?;
    let table = cache
        .cleaned(data_path)
        .with_context(|| format!("Error cleaning data from {}", data_path.display()))?;
    let tokenizer = TitleTokenizer::new(&config.text).context("Invalid token pattern")?;

    std::fs::create_dir_all(&config.output_dir).with_context(|| {
        format!("Cannot create output dir {}", config.output_dir.display())
    })?;
    let out = |name: &str| config.output_dir.join(name);

    let mut charts = Vec::new();

    let by_year = StatsCalculator::publications_by_year(&table);
    let path = out("publications_by_year.png");
    if StaticChartRenderer::render_year_chart(
        &by_year,
        "COVID-19 Research Publications by Year",
        &path,
        CHART_SIZE,
    )? {
        charts.push(path);
    }

    let journals = StatsCalculator::top_journals(&table, config.top_journals);
    let path = out("top_journals.png");
    if StaticChartRenderer::render_ranked_chart(
        &journals,
        &format!("Top {} Journals Publishing COVID-19 Research", config.top_journals),
        "Number of Publications",
        &path,
        CHART_SIZE,
    )? {
        charts.push(path);
    }

    let words = StatsCalculator::title_word_frequency(&table, &tokenizer, config.top_words);
    let path = out("title_words.png");
    if StaticChartRenderer::render_ranked_chart(
        &words,
        &format!("Top {} Most Frequent Words in Titles", config.top_words),
        "Frequency",
        &path,
        CHART_SIZE,
    )? {
        charts.push(path);
    }

    let sources = StatsCalculator::source_distribution(&table, config.top_sources);
    let path = out("sources_distribution.png");
    if StaticChartRenderer::render_ranked_chart(
        &sources,
        &format!("Distribution of Papers by Source (Top {})", config.top_sources),
        "Number of Papers",
        &path,
        CHART_SIZE,
    )? {
        charts.push(path);
    }

    Ok(AnalysisReport {
        overview: DatasetOverview::from_frame(&raw),
        cleaned_rows: table.height(),
        summary: StatsCalculator::summary_report(&table),
        abstract_lengths: StatsCalculator::abstract_length_stats(&table),
        charts,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_missing_data_file_halts_with_message() {
        let tmp = tempdir().unwrap();
        let config = AppConfig {
            output_dir: tmp.path().join("out"),
            ..AppConfig::default()
        };
        let mut cache = TableCache::new();

        let err = generate_report(&mut cache, &tmp.path().join("missing.csv"), &config)
            .unwrap_err();
        assert!(err.to_string().starts_with("Error loading data"));
        // Nothing is rendered after a failed load
        assert!(!config.output_dir.exists());
    }

    #[test]
    fn test_report_without_chartable_columns() {
        let tmp = tempdir().unwrap();
        let data = tmp.path().join("metadata.csv");
        std::fs::write(&data, "cord_uid,title\nu1,On AI\nu2,\n").unwrap();
        let config = AppConfig {
            output_dir: tmp.path().join("out"),
            ..AppConfig::default()
        };
        let mut cache = TableCache::new();

        let report = generate_report(&mut cache, &data, &config).unwrap();
        assert_eq!(report.overview.rows, 2);
        assert_eq!(report.cleaned_rows, 1);
        assert_eq!(report.summary.total_papers, 1);
        assert!(report.abstract_lengths.is_none());
        assert!(report.charts.is_empty());
        let text = report.to_string();
        assert!(text.contains("Cleaned data shape: 1 rows (1 dropped)"));
        assert!(text.contains("Total papers analyzed: 1"));
    }
}
