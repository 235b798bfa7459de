//! Chart Data Module
//! Library-independent description of each report chart, shared by the
//! interactive viewer and the static PNG renderer.

use crate::charts::palette::Palette;
use crate::data::{MonthlyTotal, Share};

/// Pie chart of group shares.
#[derive(Debug, Clone, PartialEq)]
pub struct PieData {
    pub title: String,
    pub slices: Vec<Share>,
    /// Angle of the first wedge's leading edge, degrees counterclockwise from +x.
    pub start_angle: f64,
    pub palette: Palette,
}

/// Vertical bar chart, one bar per category.
#[derive(Debug, Clone, PartialEq)]
pub struct BarData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub bars: Vec<(String, f64)>,
    pub palette: Palette,
    pub rotate_labels: bool,
}

/// Line chart over calendar months.
#[derive(Debug, Clone, PartialEq)]
pub struct LineData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<MonthlyTotal>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScatterPoint {
    pub label: String,
    pub x: f64,
    pub y: f64,
}

/// Scatter plot, one labelled point per group.
#[derive(Debug, Clone, PartialEq)]
pub struct ScatterData {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ScatterPoint>,
    pub palette: Palette,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ChartData {
    Pie(PieData),
    Bar(BarData),
    Line(LineData),
    Scatter(ScatterData),
}

impl ChartData {
    pub fn title(&self) -> &str {
        match self {
            ChartData::Pie(d) => &d.title,
            ChartData::Bar(d) => &d.title,
            ChartData::Line(d) => &d.title,
            ChartData::Scatter(d) => &d.title,
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            ChartData::Pie(_) => "pie",
            ChartData::Bar(_) => "bar",
            ChartData::Line(_) => "line",
            ChartData::Scatter(_) => "scatter",
        }
    }
}
