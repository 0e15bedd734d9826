//! Charts module - Chart rendering and display

mod plotter;
mod viewer;

pub use plotter::{ChartError, ChartPlotter, ClassSeries, BAR_CHART_FILE, SCATTER_FILE};
pub use viewer::ChartViewer;
