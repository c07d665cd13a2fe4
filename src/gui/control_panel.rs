//! Control Panel Widget
//! Left side panel with the year filter, top-n selectors and actions.

use crate::config::AppConfig;
use crate::data::YearRange;
use egui::{Color32, ComboBox, RichText};
use std::num::NonZeroUsize;

pub const JOURNAL_CHOICES: [usize; 4] = [5, 10, 15, 20];
pub const WORD_CHOICES: [usize; 4] = [10, 15, 20, 25];

/// User settings driving the aggregations.
#[derive(Clone, Debug, PartialEq)]
pub struct UserSettings {
    pub year_range: Option<YearRange>,
    pub top_journals: usize,
    pub top_words: usize,
    pub top_sources: usize,
}

impl Default for UserSettings {
    fn default() -> Self {
        Self {
            year_range: None,
            top_journals: 10,
            top_words: 20,
            top_sources: 10,
        }
    }
}

impl From<&AppConfig> for UserSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            year_range: None,
            top_journals: config.top_journals.get(),
            top_words: config.top_words.get(),
            top_sources: config.top_sources.get(),
        }
    }
}

impl UserSettings {
    pub fn top_journals_n(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.top_journals).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn top_words_n(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.top_words).unwrap_or(NonZeroUsize::MIN)
    }

    pub fn top_sources_n(&self) -> NonZeroUsize {
        NonZeroUsize::new(self.top_sources).unwrap_or(NonZeroUsize::MIN)
    }
}

/// Left side control panel with filters and actions.
pub struct ControlPanel {
    pub settings: UserSettings,
    /// Year slider limits, `None` when the data has no years.
    pub year_bounds: Option<YearRange>,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            settings: UserSettings::default(),
            year_bounds: None,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new(settings: UserSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    /// Reset the year filter to the full range of a newly loaded table.
    pub fn set_year_bounds(&mut self, bounds: Option<YearRange>) {
        self.year_bounds = bounds;
        self.settings.year_range = bounds;
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;
        let before = self.settings.clone();

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("🦠 CORD-19 Data Explorer")
                    .size(20.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );
            ui.label(
                RichText::new("Interactive exploration of COVID-19 research papers")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== Year Filter Section =====
        ui.label(RichText::new("📅 Filters").size(14.0).strong());
        ui.add_space(5.0);

        match (self.year_bounds, self.settings.year_range.as_mut()) {
            (Some(bounds), Some(range)) => {
                ui.add(
                    egui::Slider::new(&mut range.start, bounds.start..=bounds.end).text("From"),
                );
                ui.add(egui::Slider::new(&mut range.end, bounds.start..=bounds.end).text("To"));
                // Keep start <= end whichever slider moved
                if range.start > range.end {
                    if before.year_range.map(|r| r.start) != Some(range.start) {
                        range.end = range.start;
                    } else {
                        range.start = range.end;
                    }
                }
            }
            _ => {
                ui.label(RichText::new("No year information").color(Color32::GRAY));
            }
        }

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Display Section =====
        ui.label(RichText::new("🔧 Display").size(14.0).strong());
        ui.add_space(8.0);

        let label_width = 110.0;
        let combo_width = 80.0;

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Top journals:"));
            ComboBox::from_id_salt("top_journals")
                .width(combo_width)
                .selected_text(self.settings.top_journals.to_string())
                .show_ui(ui, |ui| {
                    for n in JOURNAL_CHOICES {
                        ui.selectable_value(&mut self.settings.top_journals, n, n.to_string());
                    }
                });
        });

        ui.add_space(5.0);

        ui.horizontal(|ui| {
            ui.add_sized([label_width, 20.0], egui::Label::new("Top words:"));
            ComboBox::from_id_salt("top_words")
                .width(combo_width)
                .selected_text(self.settings.top_words.to_string())
                .show_ui(ui, |ui| {
                    for n in WORD_CHOICES {
                        ui.selectable_value(&mut self.settings.top_words, n, n.to_string());
                    }
                });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            let reload = egui::Button::new(RichText::new("🔄 Reload Data").size(14.0))
                .min_size(egui::vec2(180.0, 30.0));
            if ui.add(reload).clicked() {
                action = ControlPanelAction::Reload;
            }

            ui.add_space(8.0);

            ui.add_enabled_ui(self.export_enabled, |ui| {
                let export = egui::Button::new(RichText::new("💾 Download CSV").size(14.0))
                    .min_size(egui::vec2(180.0, 30.0));
                if ui.add(export).clicked() {
                    action = ControlPanelAction::ExportCsv;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.contains("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.contains("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        if action == ControlPanelAction::None && self.settings != before {
            action = ControlPanelAction::FiltersChanged;
        }
        action
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    FiltersChanged,
    Reload,
    ExportCsv,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_year_bounds_resets_filter() {
        let mut panel = ControlPanel::default();
        panel.settings.year_range = Some(YearRange::new(2020, 2020));
        panel.set_year_bounds(Some(YearRange::new(2015, 2022)));
        assert_eq!(panel.settings.year_range, Some(YearRange::new(2015, 2022)));

        panel.set_year_bounds(None);
        assert_eq!(panel.settings.year_range, None);
    }

    #[test]
    fn test_default_choices_are_offered() {
        let settings = UserSettings::default();
        assert!(JOURNAL_CHOICES.contains(&settings.top_journals));
        assert!(WORD_CHOICES.contains(&settings.top_words));
        assert_eq!(settings.top_journals_n().get(), 10);
    }

    #[test]
    fn test_settings_follow_config() {
        let config = AppConfig {
            top_words: NonZeroUsize::new(25).unwrap(),
            ..AppConfig::default()
        };
        let panel = ControlPanel::new(UserSettings::from(&config));
        assert_eq!(panel.settings.top_words, 25);
        assert_eq!(panel.settings.top_sources_n(), config.top_sources);
        assert_eq!(panel.status, "Ready");
    }
}
