//! One-shot CORD-19 analysis: prints the exploration and summary report and
//! writes PNG charts into the configured output directory.

use anyhow::Result;
use cord19_explorer::config::{AppConfig, CONFIG_FILE, DATA_PATH};
use cord19_explorer::data::TableCache;
use cord19_explorer::report::generate_report;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let config = AppConfig::load_or_default(Path::new(CONFIG_FILE)).unwrap_or_else(|e| {
        log::warn!("{}; using default settings", e);
        AppConfig::default()
    });

    let mut cache = TableCache::new();
    let report = generate_report(&mut cache, Path::new(DATA_PATH), &config)?;
    print!("{}", report);
    println!();
    println!("Analysis complete!");
    Ok(())
}
