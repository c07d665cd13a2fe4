//! CORD-19 Explorer - interactive dashboard over the CORD-19 metadata
//!
//! Reads `asset/metadata.csv` and shows year-filtered charts of the papers.

use cord19_explorer::config::{AppConfig, CONFIG_FILE, DATA_PATH};
use cord19_explorer::gui::ExplorerApp;
use eframe::egui;
use std::path::{Path, PathBuf};

fn main() -> eframe::Result<()> {
    env_logger::init();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
        log::warn!("{}; using default settings", e);
        AppConfig::default()
    });

    // Configure native options
    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1400.0, 850.0])
            .with_min_inner_size([1000.0, 650.0])
            .with_title("CORD-19 Data Explorer"),
        ..Default::default()
    };

    eframe::run_native(
        "CORD-19 Data Explorer",
        options,
        Box::new(move |cc| Ok(Box::new(ExplorerApp::new(cc, config, PathBuf::from(DATA_PATH))))),
    )
}
