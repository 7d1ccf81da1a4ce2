//! Charts module - Chart rendering

mod plotter;
mod renderer;
mod viewer;

pub use plotter::THRESHOLD_CHARTS;
pub use renderer::ChartRenderer;
pub use viewer::show;
