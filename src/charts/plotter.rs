//! Chart Plotter Module
//! Creates interactive bar charts using egui_plot.

use crate::stats::FrequencyTable;
use egui::Color32;
use egui_plot::{Bar, BarChart, GridMark, Plot};

pub const BAR_COLOR: Color32 = Color32::from_rgb(52, 152, 219); // Blue

pub const PALETTE: [Color32; 10] = [
    Color32::from_rgb(231, 76, 60),  // Red
    Color32::from_rgb(46, 204, 113), // Green
    Color32::from_rgb(155, 89, 182), // Purple
    Color32::from_rgb(243, 156, 18), // Orange
    Color32::from_rgb(26, 188, 156), // Teal
    Color32::from_rgb(233, 30, 99),  // Pink
    Color32::from_rgb(0, 188, 212),  // Cyan
    Color32::from_rgb(255, 87, 34),  // Deep Orange
    Color32::from_rgb(121, 85, 72),  // Brown
    Color32::from_rgb(96, 125, 139), // Blue Grey
];

const CHART_HEIGHT: f32 = 420.0;

/// Bar chart rendering for the dashboard tabs.
pub struct ChartPlotter;

impl ChartPlotter {
    /// Vertical bars, one per year.
    pub fn draw_year_chart(ui: &mut egui::Ui, by_year: &FrequencyTable<i32>) {
        let bars: Vec<Bar> = by_year
            .iter()
            .map(|(year, count)| {
                Bar::new(*year as f64, *count as f64)
                    .width(0.7)
                    .name(year.to_string())
            })
            .collect();

        Plot::new("publications_by_year")
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label("Year")
            .y_axis_label("Number of Publications")
            .x_axis_formatter(|mark, _range| {
                if mark.value.fract() == 0.0 {
                    format!("{:.0}", mark.value)
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).color(BAR_COLOR).name("Publications"));
            });
    }

    /// Horizontal bars for a ranked table, largest at the top.
    pub fn draw_ranked_chart(
        ui: &mut egui::Ui,
        id: &str,
        table: &FrequencyTable<String>,
        value_label: &str,
        category_label: &str,
    ) {
        let n = table.len();
        // Row i sits at y = n - 1 - i so the first entry is drawn on top
        let labels: Vec<String> = table.iter().rev().map(|(k, _)| k.clone()).collect();

        let bars: Vec<Bar> = table
            .iter()
            .enumerate()
            .map(|(i, (key, count))| {
                Bar::new((n - 1 - i) as f64, *count as f64)
                    .width(0.7)
                    .name(key)
                    .fill(PALETTE[i % PALETTE.len()])
            })
            .collect();

        Plot::new(id)
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(value_label.to_string())
            .y_axis_label(category_label.to_string())
            .y_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .y_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if idx >= 0.0 && (idx as usize) < labels.len() && mark.value.fract() == 0.0 {
                    labels[idx as usize].clone()
                } else {
                    String::new()
                }
            })
            .show(ui, |plot_ui| {
                plot_ui.bar_chart(BarChart::new(bars).horizontal().name(category_label));
            });
    }
}
