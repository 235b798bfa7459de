//! Charts module - Chart data and rendering

mod chart_data;
pub mod geometry;
mod palette;
mod plotter;
mod renderer;

pub use chart_data::{BarData, ChartData, LineData, PieData, ScatterData, ScatterPoint};
pub use palette::{Palette, Rgb};
pub use plotter::ChartPlotter;
pub use renderer::{RenderError, StaticChartRenderer, EXPORT_HEIGHT, EXPORT_WIDTH};
