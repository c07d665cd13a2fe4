//! Charts module - Chart rendering

mod plotter;
mod renderer;

pub use plotter::{ChartPlotter, BAR_COLOR, PALETTE};
pub use renderer::{RenderError, StaticChartRenderer};
