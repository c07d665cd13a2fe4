//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;

pub use app::{build_view, export_file_name, ExplorerApp};
pub use chart_viewer::{ChartTab, ChartViewer, DashboardView, DataSample};
pub use control_panel::{ControlPanel, ControlPanelAction, UserSettings};
