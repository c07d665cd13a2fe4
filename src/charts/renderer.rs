//! Static Chart Renderer
//! Writes the report's bar charts as PNG files with plotters.
//!
//! Layout per image:
//! 1. Title centered at the top
//! 2. Bar chart: vertical bars for years, horizontal bars for ranked tables
//!    (largest entry on top)

use crate::stats::FrequencyTable;
use plotters::prelude::*;
use std::path::Path;
use thiserror::Error;

const BAR: RGBColor = RGBColor(91, 155, 213);
const RANKED_BAR: RGBColor = RGBColor(237, 125, 49);

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Failed to draw chart: {0}")]
    Drawing(String),
}

fn draw_err<E: std::fmt::Display>(e: E) -> RenderError {
    RenderError::Drawing(e.to_string())
}

/// Label of the bar at a segment center.
fn segment_label(labels: &[String], value: &SegmentValue<i32>) -> String {
    match value {
        SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => usize::try_from(*i)
            .ok()
            .and_then(|i| labels.get(i))
            .cloned()
            .unwrap_or_default(),
        SegmentValue::Last => String::new(),
    }
}

/// Shorten long category names so they fit in the label area.
fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() <= max_chars {
        label.to_string()
    } else {
        let head: String = label.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Publications per year as vertical bars.
    ///
    /// Returns `Ok(false)` without touching `path` when there is nothing to draw.
    pub fn render_year_chart(
        by_year: &FrequencyTable<i32>,
        title: &str,
        path: &Path,
        size: (u32, u32),
    ) -> Result<bool, RenderError> {
        if by_year.is_empty() {
            return Ok(false);
        }

        let labels: Vec<String> = by_year.iter().map(|(y, _)| y.to_string()).collect();
        // Discrete ranges are inclusive; keep at least two slots
        let last = (by_year.len() as i32 - 1).max(1);
        let max = by_year.iter().map(|(_, c)| *c as u32).max().unwrap_or(0);

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d((0..last).into_segmented(), 0u32..(max + max / 10 + 1))
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_desc("Year")
            .y_desc("Number of Publications")
            .x_label_formatter(&|v| segment_label(&labels, v))
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::vertical(&chart)
                    .style(BAR.filled())
                    .margin(8)
                    .data(
                        by_year
                            .iter()
                            .enumerate()
                            .map(|(i, (_, c))| (i as i32, *c as u32)),
                    ),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        log::info!("Wrote {}", path.display());
        Ok(true)
    }

    /// A ranked table (journals, words, sources) as horizontal bars.
    ///
    /// Returns `Ok(false)` without touching `path` when there is nothing to draw.
    pub fn render_ranked_chart(
        table: &FrequencyTable<String>,
        title: &str,
        value_desc: &str,
        path: &Path,
        size: (u32, u32),
    ) -> Result<bool, RenderError> {
        if table.is_empty() {
            return Ok(false);
        }

        let n = table.len() as i32;
        // Segment i holds entry n - 1 - i so the largest bar is drawn on top
        let labels: Vec<String> = table
            .iter()
            .rev()
            .map(|(k, _)| truncate_label(k, 40))
            .collect();
        let max = table.iter().map(|(_, c)| *c as u32).max().unwrap_or(0);

        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&WHITE).map_err(draw_err)?;

        let mut chart = ChartBuilder::on(&root)
            .caption(title, ("sans-serif", 28))
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(260)
            .build_cartesian_2d(0u32..(max + max / 10 + 1), (0..(n - 1).max(1)).into_segmented())
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .disable_y_mesh()
            .x_desc(value_desc)
            .y_labels(table.len())
            .y_label_formatter(&|v| segment_label(&labels, v))
            .axis_desc_style(("sans-serif", 16))
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(
                Histogram::horizontal(&chart)
                    .style(RANKED_BAR.filled())
                    .margin(6)
                    .data(
                        table
                            .iter()
                            .enumerate()
                            .map(|(i, (_, c))| (n - 1 - i as i32, *c as u32)),
                    ),
            )
            .map_err(draw_err)?;

        root.present().map_err(draw_err)?;
        log::info!("Wrote {}", path.display());
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_empty_tables_write_nothing() {
        let tmp = tempdir().unwrap();
        let year_path = tmp.path().join("years.png");
        let ranked_path = tmp.path().join("ranked.png");

        let drawn = StaticChartRenderer::render_year_chart(
            &FrequencyTable::default(),
            "Years",
            &year_path,
            (800, 600),
        )
        .unwrap();
        assert!(!drawn);
        assert!(!year_path.exists());

        let drawn = StaticChartRenderer::render_ranked_chart(
            &FrequencyTable::default(),
            "Journals",
            "Count",
            &ranked_path,
            (800, 600),
        )
        .unwrap();
        assert!(!drawn);
        assert!(!ranked_path.exists());
    }

    #[test]
    fn test_segment_label() {
        let labels = vec!["2019".to_string(), "2020".to_string()];
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(1)), "2020");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(5)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::CenterOf(-1)), "");
        assert_eq!(segment_label(&labels, &SegmentValue::Last), "");
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("Lancet", 10), "Lancet");
        assert_eq!(truncate_label("Journal of Virology", 8), "Journal…");
    }
}
