//! CORD-19 Explorer Main Application
//! Main window with control panel and chart viewer.

use crate::config::AppConfig;
use crate::data::{export_csv, filter_by_year, year_bounds, CleanedTable, TableCache, YearRange};
use crate::gui::chart_viewer::SAMPLE_LIMIT;
use crate::gui::{
    ChartViewer, ControlPanel, ControlPanelAction, DashboardView, DataSample, UserSettings,
};
use crate::stats::{StatsCalculator, TitleTokenizer};
use egui::{Color32, RichText, SidePanel};
use polars::prelude::PolarsError;
use std::path::PathBuf;
use std::sync::Arc;

/// Aggregate one filtered table for the central panel.
pub fn build_view(
    table: &CleanedTable,
    tokenizer: &TitleTokenizer,
    settings: &UserSettings,
) -> Result<DashboardView, PolarsError> {
    Ok(DashboardView {
        summary: StatsCalculator::summary_report(table),
        by_year: StatsCalculator::publications_by_year(table),
        journals: StatsCalculator::top_journals(table, settings.top_journals_n()),
        words: StatsCalculator::title_word_frequency(table, tokenizer, settings.top_words_n()),
        sources: StatsCalculator::source_distribution(table, settings.top_sources_n()),
        sample: DataSample::from_table(table, SAMPLE_LIMIT)?,
    })
}

/// Suggested name for the downloaded subset.
pub fn export_file_name(range: Option<YearRange>) -> String {
    match range {
        Some(r) => format!("cord19_filtered_{}_{}.csv", r.start, r.end),
        None => "cord19_filtered.csv".to_string(),
    }
}

/// Main application window.
pub struct ExplorerApp {
    data_path: PathBuf,
    cache: TableCache,
    tokenizer: Option<TitleTokenizer>,
    /// Cleaned table as cached; never mutated by filtering.
    table: Option<Arc<CleanedTable>>,
    /// Current year-filtered subset, the one the download writes.
    filtered: Option<CleanedTable>,
    /// Fatal load or setup error; when set nothing else is drawn.
    load_error: Option<String>,
    control_panel: ControlPanel,
    chart_viewer: ChartViewer,
}

impl ExplorerApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, config: AppConfig, data_path: PathBuf) -> Self {
        Self::with_config(config, data_path)
    }

    pub fn with_config(config: AppConfig, data_path: PathBuf) -> Self {
        let mut app = Self {
            data_path,
            cache: TableCache::new(),
            tokenizer: None,
            table: None,
            filtered: None,
            load_error: None,
            control_panel: ControlPanel::new(UserSettings::from(&config)),
            chart_viewer: ChartViewer::new(),
        };

        match TitleTokenizer::new(&config.text) {
            Ok(tokenizer) => {
                app.tokenizer = Some(tokenizer);
                app.load_data();
            }
            Err(e) => app.load_error = Some(format!("Invalid token pattern: {}", e)),
        }
        app
    }

    /// Load (or re-use from the cache) the cleaned table and reset the filter.
    fn load_data(&mut self) {
        match self.cache.cleaned(&self.data_path) {
            Ok(table) => {
                log::info!("Dashboard showing {} papers", table.height());
                self.load_error = None;
                self.control_panel.set_year_bounds(year_bounds(&table));
                self.control_panel.set_status(&format!(
                    "Loaded {} papers from {}",
                    table.height(),
                    self.data_path.display()
                ));
                self.table = Some(table);
                self.recompute();
            }
            Err(e) => {
                log::error!("Error loading data: {}", e);
                self.load_error = Some(format!("Error loading data: {}", e));
                self.table = None;
                self.filtered = None;
                self.chart_viewer.clear();
            }
        }
    }

    /// Re-filter the cached table and rebuild every aggregation.
    fn recompute(&mut self) {
        let (Some(table), Some(tokenizer)) = (&self.table, &self.tokenizer) else {
            return;
        };
        let settings = &self.control_panel.settings;

        let filtered = match settings.year_range {
            Some(range) => filter_by_year(table, range).map_err(|e| e.to_string()),
            None => Ok(CleanedTable::clone(table)),
        };
        let result = filtered.and_then(|filtered| {
            build_view(&filtered, tokenizer, settings)
                .map(|view| (filtered, view))
                .map_err(|e| e.to_string())
        });

        match result {
            Ok((filtered, view)) => {
                self.control_panel.export_enabled = !filtered.is_empty();
                self.filtered = Some(filtered);
                self.chart_viewer.set_view(view);
            }
            Err(e) => {
                self.control_panel.set_status(&format!("Error: {}", e));
                self.control_panel.export_enabled = false;
                self.filtered = None;
                self.chart_viewer.clear();
            }
        }
    }

    /// The cache re-reads the file only if its modification time changed.
    fn handle_reload(&mut self) {
        self.load_data();
    }

    fn handle_export_csv(&mut self) {
        let Some(filtered) = &self.filtered else {
            self.control_panel.set_status("No data to export");
            return;
        };

        let Some(path) = rfd::FileDialog::new()
            .add_filter("CSV Files", &["csv"])
            .set_file_name(export_file_name(self.control_panel.settings.year_range))
            .save_file()
        else {
            return; // User cancelled
        };

        let status = match export_csv(filtered, &path) {
            Ok(()) => format!("Exported {} rows to {}", filtered.height(), path.display()),
            Err(e) => format!("Error: {}", e),
        };
        self.control_panel.set_status(&status);
    }
}

impl eframe::App for ExplorerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(error) = &self.load_error {
            let mut retry = false;
            egui::CentralPanel::default().show(ctx, |ui| {
                ui.vertical_centered(|ui| {
                    ui.add_space(ui.available_height() / 3.0);
                    ui.label(
                        RichText::new(error)
                            .size(16.0)
                            .color(Color32::from_rgb(220, 53, 69)),
                    );
                    ui.add_space(12.0);
                    // Tokenizer errors come from the config, so retrying cannot help
                    if self.tokenizer.is_some() {
                        retry = ui.button(RichText::new("🔄 Retry").size(14.0)).clicked();
                    }
                });
            });
            if retry {
                self.handle_reload();
            }
            return;
        }

        // Left panel - Control Panel
        SidePanel::left("control_panel")
            .min_width(280.0)
            .max_width(340.0)
            .show(ctx, |ui| {
                egui::ScrollArea::vertical().show(ui, |ui| {
                    match self.control_panel.show(ui) {
                        ControlPanelAction::FiltersChanged => self.recompute(),
                        ControlPanelAction::Reload => self.handle_reload(),
                        ControlPanelAction::ExportCsv => self.handle_export_csv(),
                        ControlPanelAction::None => {}
                    }
                });
            });

        // Central panel - Chart Viewer
        egui::CentralPanel::default().show(ctx, |ui| {
            self.chart_viewer.show(ui);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SAMPLE_CSV;
    use tempfile::tempdir;

    fn app_for(csv: &str) -> (tempfile::TempDir, ExplorerApp) {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("metadata.csv");
        std::fs::write(&path, csv).unwrap();
        let app = ExplorerApp::with_config(AppConfig::default(), path);
        (tmp, app)
    }

    #[test]
    fn test_startup_loads_and_aggregates() {
        let (_tmp, app) = app_for(SAMPLE_CSV);
        assert!(app.load_error.is_none());
        assert_eq!(
            app.control_panel.year_bounds,
            Some(YearRange::new(2020, 2020))
        );

        let view = app.chart_viewer.view.as_ref().unwrap();
        // The untitled a3 row is gone and a2 has no year
        assert_eq!(view.summary.total_papers, 1);
        assert_eq!(view.by_year.get(&2020), Some(1));
        assert!(app.control_panel.export_enabled);
    }

    #[test]
    fn test_filter_change_uses_fresh_subset() {
        let (_tmp, mut app) = app_for(SAMPLE_CSV);
        let cached = app.table.as_ref().unwrap().height();

        app.control_panel.settings.year_range = Some(YearRange::new(2021, 2021));
        app.recompute();

        let view = app.chart_viewer.view.as_ref().unwrap();
        assert_eq!(view.summary.total_papers, 0);
        assert!(view.by_year.is_empty());
        assert!(!app.control_panel.export_enabled);
        assert_eq!(app.table.as_ref().unwrap().height(), cached);
    }

    #[test]
    fn test_missing_file_shows_only_error() {
        let tmp = tempdir().unwrap();
        let app = ExplorerApp::with_config(AppConfig::default(), tmp.path().join("missing.csv"));
        assert!(app
            .load_error
            .as_deref()
            .unwrap()
            .starts_with("Error loading data"));
        assert!(app.chart_viewer.view.is_none());
        assert!(app.filtered.is_none());
    }

    #[test]
    fn test_reload_recovers_after_load_error() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("metadata.csv");
        let mut app = ExplorerApp::with_config(AppConfig::default(), path.clone());
        assert!(app.load_error.is_some());

        std::fs::write(&path, SAMPLE_CSV).unwrap();
        app.handle_reload();

        assert!(app.load_error.is_none());
        assert_eq!(app.chart_viewer.view.as_ref().unwrap().summary.total_papers, 1);
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(
            export_file_name(Some(YearRange::new(2019, 2021))),
            "cord19_filtered_2019_2021.csv"
        );
        assert_eq!(export_file_name(None), "cord19_filtered.csv");
    }
}
