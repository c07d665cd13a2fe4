//! CORD-19 Explorer
//!
//! Loads the CORD-19 metadata table, cleans it and aggregates it into
//! frequency tables for a one-shot report and an interactive dashboard.

pub mod charts;
pub mod config;
pub mod data;
pub mod gui;
pub mod report;
pub mod stats;

#[cfg(test)]
pub(crate) mod test_support;
