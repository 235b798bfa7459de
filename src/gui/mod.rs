//! GUI module - User interface components

mod app;
mod chart_viewer;
mod data_preview;
mod toolbar;

pub use app::DashboardApp;
pub use chart_viewer::ChartViewer;
pub use data_preview::DataPreview;
pub use toolbar::{StatusKind, Toolbar, ToolbarAction};
