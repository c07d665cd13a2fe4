//! Chart Viewer Widget
//! Central panel: metrics row on top, one tab per aggregation and a data sample.

use crate::charts::ChartPlotter;
use crate::data::CleanedTable;
use crate::stats::{FrequencyTable, SummaryReport};
use egui::{Color32, RichText, ScrollArea};
use polars::prelude::*;

const CARD_WIDTH: f32 = 220.0;
pub const SAMPLE_LIMIT: usize = 50;
/// Columns ticked in the sample grid until the user changes them.
const DEFAULT_VISIBLE_COLUMNS: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartTab {
    Years,
    Journals,
    Words,
    Sources,
    Sample,
}

/// First rows of the filtered table, already rendered to text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataSample {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl DataSample {
    pub fn from_table(table: &CleanedTable, limit: usize) -> PolarsResult<Self> {
        let head = table.frame().head(Some(limit));
        let columns: Vec<String> = head
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let mut rows = Vec::with_capacity(head.height());
        for i in 0..head.height() {
            let mut row = Vec::with_capacity(columns.len());
            for column in head.get_columns() {
                row.push(match column.get(i)? {
                    AnyValue::Null => String::new(),
                    AnyValue::String(s) => s.to_string(),
                    AnyValue::StringOwned(s) => s.to_string(),
                    other => other.to_string(),
                });
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }
}

/// Everything the central panel draws for one filter setting.
#[derive(Debug, Clone)]
pub struct DashboardView {
    pub summary: SummaryReport,
    pub by_year: FrequencyTable<i32>,
    pub journals: FrequencyTable<String>,
    pub words: FrequencyTable<String>,
    pub sources: FrequencyTable<String>,
    pub sample: DataSample,
}

pub struct ChartViewer {
    pub view: Option<DashboardView>,
    pub tab: ChartTab,
    /// (column, shown) pairs for the sample grid.
    visible_columns: Vec<(String, bool)>,
    sample_rows: usize,
}

impl Default for ChartViewer {
    fn default() -> Self {
        Self {
            view: None,
            tab: ChartTab::Years,
            visible_columns: Vec::new(),
            sample_rows: 10,
        }
    }
}

impl ChartViewer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.view = None;
    }

    /// Replace the displayed results, keeping column choices that still apply.
    pub fn set_view(&mut self, view: DashboardView) {
        let previous = std::mem::take(&mut self.visible_columns);
        self.visible_columns = view
            .sample
            .columns
            .iter()
            .enumerate()
            .map(|(i, name)| {
                let shown = previous
                    .iter()
                    .find(|(n, _)| n == name)
                    .map(|(_, shown)| *shown)
                    .unwrap_or(previous.is_empty() && i < DEFAULT_VISIBLE_COLUMNS);
                (name.clone(), shown)
            })
            .collect();
        self.view = Some(view);
    }

    pub fn show(&mut self, ui: &mut egui::Ui) {
        let Some(view) = &self.view else {
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new("No Data").size(20.0));
            });
            return;
        };

        Self::draw_metrics(ui, &view.summary);
        ui.add_space(10.0);

        ui.horizontal(|ui| {
            ui.selectable_value(&mut self.tab, ChartTab::Years, "📊 Publications by Year");
            ui.selectable_value(&mut self.tab, ChartTab::Journals, "📰 Top Journals");
            ui.selectable_value(&mut self.tab, ChartTab::Words, "🔤 Title Words");
            ui.selectable_value(&mut self.tab, ChartTab::Sources, "🗂 Sources");
            ui.selectable_value(&mut self.tab, ChartTab::Sample, "📋 Data Sample");
        });
        ui.separator();

        ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| match self.tab {
                ChartTab::Years => Self::draw_years(ui, &view.by_year),
                ChartTab::Journals => Self::draw_ranked(
                    ui,
                    "top_journals",
                    &format!("Top {} Journals", view.journals.len()),
                    &view.journals,
                    "Number of Publications",
                    "Journal",
                ),
                ChartTab::Words => Self::draw_ranked(
                    ui,
                    "title_words",
                    &format!("Top {} Words in Titles", view.words.len()),
                    &view.words,
                    "Frequency",
                    "Word",
                ),
                ChartTab::Sources => Self::draw_ranked(
                    ui,
                    "sources",
                    "Papers by Source",
                    &view.sources,
                    "Number of Papers",
                    "Source",
                ),
                ChartTab::Sample => Self::draw_sample(
                    ui,
                    &view.sample,
                    &mut self.visible_columns,
                    &mut self.sample_rows,
                ),
            });
    }

    fn draw_metrics(ui: &mut egui::Ui, summary: &SummaryReport) {
        let journals = summary
            .unique_journals
            .map(|n| n.to_string())
            .unwrap_or_else(|| "-".to_string());
        let mean = summary
            .mean_abstract_words
            .map(|m| format!("{:.0} words", m))
            .unwrap_or_else(|| "-".to_string());

        ui.horizontal(|ui| {
            Self::metric_card(ui, "Total Papers", &summary.total_papers.to_string());
            Self::metric_card(ui, "Unique Journals", &journals);
            Self::metric_card(ui, "Avg Abstract Length", &mean);
        });
    }

    fn metric_card(ui: &mut egui::Ui, label: &str, value: &str) {
        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, Color32::from_rgb(100, 149, 237)))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(10.0)
            .show(ui, |ui| {
                ui.set_width(CARD_WIDTH);
                ui.vertical(|ui| {
                    ui.label(RichText::new(label).size(12.0).color(Color32::GRAY));
                    ui.label(RichText::new(value).size(22.0).strong());
                });
            });
    }

    fn draw_years(ui: &mut egui::Ui, by_year: &FrequencyTable<i32>) {
        ui.label(RichText::new("Publications by Year").size(16.0).strong());
        if by_year.is_empty() {
            ui.label("No publication dates in the selected range");
            return;
        }
        ChartPlotter::draw_year_chart(ui, by_year);
        ui.add_space(8.0);
        ui.horizontal(|ui| {
            if let Some((year, count)) = by_year.peak() {
                ui.label(format!("Peak year: {} ({} papers)", year, count));
                ui.add_space(20.0);
            }
            ui.label(format!("Total in range: {}", by_year.total()));
        });
    }

    fn draw_ranked(
        ui: &mut egui::Ui,
        id: &str,
        title: &str,
        table: &FrequencyTable<String>,
        value_label: &str,
        category_label: &str,
    ) {
        ui.label(RichText::new(title).size(16.0).strong());
        if table.is_empty() {
            ui.label(format!("No {} values in the selected range", category_label.to_lowercase()));
            return;
        }
        ChartPlotter::draw_ranked_chart(ui, id, table, value_label, category_label);
    }

    fn draw_sample(
        ui: &mut egui::Ui,
        sample: &DataSample,
        visible_columns: &mut [(String, bool)],
        sample_rows: &mut usize,
    ) {
        ui.label(RichText::new("Data Sample").size(16.0).strong());

        ui.horizontal_wrapped(|ui| {
            for (name, shown) in visible_columns.iter_mut() {
                ui.checkbox(shown, name.as_str());
            }
        });
        ui.add(egui::Slider::new(sample_rows, 1..=SAMPLE_LIMIT).text("Rows"));
        ui.add_space(8.0);

        let shown: Vec<usize> = visible_columns
            .iter()
            .enumerate()
            .filter(|(_, (_, shown))| *shown)
            .map(|(i, _)| i)
            .collect();
        if shown.is_empty() {
            ui.label("Select at least one column");
            return;
        }

        ScrollArea::horizontal().show(ui, |ui| {
            egui::Grid::new("data_sample")
                .striped(true)
                .min_col_width(60.0)
                .show(ui, |ui| {
                    for &i in &shown {
                        ui.label(RichText::new(&sample.columns[i]).strong());
                    }
                    ui.end_row();

                    for row in sample.rows.iter().take(*sample_rows) {
                        for &i in &shown {
                            let cell = row.get(i).map(String::as_str).unwrap_or("");
                            ui.label(truncate_cell(cell, 60));
                        }
                        ui.end_row();
                    }
                });
        });

        ui.label(
            RichText::new(format!(
                "Showing {} of {} sampled rows",
                sample.rows.len().min(*sample_rows),
                sample.rows.len()
            ))
            .size(11.0)
            .color(Color32::GRAY),
        );
    }
}

fn truncate_cell(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let head: String = text.chars().take(max_chars).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataCleaner;
    use crate::test_support::papers;

    fn cleaned() -> CleanedTable {
        let df = papers(
            &[Some("Covid spread"), Some("Virus origins"), Some("Masks")],
            &[Some("a b c"), None, Some("d")],
            &[Some("2020-03-01"), Some("not-a-date"), Some("2021-07-15")],
            &[Some("Nature"), None, Some("Lancet")],
            &[Some("PMC"), Some("Medline"), Some("PMC")],
        );
        DataCleaner::clean(&df).unwrap()
    }

    fn view(sample: DataSample) -> DashboardView {
        DashboardView {
            summary: SummaryReport {
                total_papers: sample.rows.len(),
                year_range: None,
                unique_journals: None,
                mean_abstract_words: None,
            },
            by_year: FrequencyTable::default(),
            journals: FrequencyTable::default(),
            words: FrequencyTable::default(),
            sources: FrequencyTable::default(),
            sample,
        }
    }

    #[test]
    fn test_sample_renders_nulls_as_empty() {
        let sample = DataSample::from_table(&cleaned(), 2).unwrap();
        assert_eq!(sample.rows.len(), 2);
        assert_eq!(sample.columns[0], "title");

        let journal = sample.columns.iter().position(|c| c == "journal").unwrap();
        assert_eq!(sample.rows[0][journal], "Nature");
        assert_eq!(sample.rows[1][journal], "");

        let date = sample.columns.iter().position(|c| c == "publish_time").unwrap();
        assert_eq!(sample.rows[0][date], "2020-03-01");
    }

    #[test]
    fn test_set_view_keeps_column_choices() {
        let sample = DataSample::from_table(&cleaned(), SAMPLE_LIMIT).unwrap();
        let mut viewer = ChartViewer::new();
        viewer.set_view(view(sample.clone()));

        let shown = viewer.visible_columns.iter().filter(|(_, s)| *s).count();
        assert_eq!(shown, DEFAULT_VISIBLE_COLUMNS);

        viewer.visible_columns[0].1 = false;
        viewer.set_view(view(sample));
        assert!(!viewer.visible_columns[0].1);
        assert!(viewer.visible_columns[1].1);
    }

    #[test]
    fn test_truncate_cell() {
        assert_eq!(truncate_cell("short", 10), "short");
        assert_eq!(truncate_cell("abcdef", 3), "abc…");
    }
}
