//! Chart Plotter Module
//! Draws report charts interactively using egui_plot.

use crate::charts::geometry::{self, PIE_LABEL_DISTANCE, PIE_PCT_DISTANCE};
use crate::charts::{BarData, ChartData, LineData, PieData, Rgb, ScatterData};
use egui::{Align2, Color32, RichText};
use egui_plot::{
    Bar, BarChart, GridMark, Legend, Line, Plot, PlotPoint, PlotPoints, Points, Polygon, Text,
};

/// Height of every interactive chart.
pub const CHART_HEIGHT: f32 = 380.0;

/// Widest pie piece drawn as a single polygon; egui fills convex shapes only.
const MAX_WEDGE_SWEEP: f64 = 90.0;

/// Line color for the monthly trend.
const LINE_COLOR: Color32 = Color32::from_rgb(31, 119, 180);

/// Creates interactive report charts using egui_plot.
pub struct ChartPlotter;

impl ChartPlotter {
    pub fn color(rgb: Rgb) -> Color32 {
        Color32::from_rgb(rgb[0], rgb[1], rgb[2])
    }

    /// Draw any report chart. `id` must be unique within the page.
    pub fn draw(ui: &mut egui::Ui, id: &str, chart: &ChartData) {
        ui.label(RichText::new(chart.title()).size(15.0).strong());
        match chart {
            ChartData::Pie(data) => Self::draw_pie_chart(ui, id, data),
            ChartData::Bar(data) => Self::draw_bar_chart(ui, id, data),
            ChartData::Line(data) => Self::draw_line_chart(ui, id, data),
            ChartData::Scatter(data) => Self::draw_scatter_chart(ui, id, data),
        }
    }

    /// Pie as filled wedge polygons on an equal-aspect plot.
    pub fn draw_pie_chart(ui: &mut egui::Ui, id: &str, data: &PieData) {
        let fractions: Vec<f64> = data.slices.iter().map(|s| s.fraction).collect();
        let wedges = geometry::pie_wedges(&fractions, data.start_angle);
        let colors = data.palette.colors(data.slices.len());

        Plot::new(format!("pie_{}", id))
            .height(CHART_HEIGHT)
            .data_aspect(1.0)
            .show_axes(false)
            .show_grid(false)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .show_x(false)
            .show_y(false)
            .include_x(-1.4)
            .include_x(1.4)
            .include_y(-1.3)
            .include_y(1.3)
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for ((slice, wedge), rgb) in data.slices.iter().zip(&wedges).zip(colors) {
                    let color = Self::color(rgb);
                    for piece in wedge.split(MAX_WEDGE_SWEEP) {
                        plot_ui.polygon(
                            Polygon::new(PlotPoints::from(piece.polygon(1.0)))
                                .fill_color(color)
                                .stroke(egui::Stroke::new(0.5, color))
                                .name(&slice.key),
                        );
                    }

                    let [lx, ly] = wedge.anchor(PIE_LABEL_DISTANCE);
                    let align = if lx >= 0.0 {
                        Align2::LEFT_CENTER
                    } else {
                        Align2::RIGHT_CENTER
                    };
                    plot_ui.text(Text::new(PlotPoint::new(lx, ly), slice.key.as_str()).anchor(align));

                    let [px, py] = wedge.anchor(PIE_PCT_DISTANCE);
                    plot_ui.text(
                        Text::new(
                            PlotPoint::new(px, py),
                            RichText::new(geometry::format_percent(slice.fraction)).strong(),
                        )
                        .color(Color32::WHITE),
                    );
                }
            });
    }

    /// One bar per category with category names on the x axis.
    pub fn draw_bar_chart(ui: &mut egui::Ui, id: &str, data: &BarData) {
        let colors = data.palette.colors(data.bars.len());
        let labels: Vec<String> = data.bars.iter().map(|(label, _)| label.clone()).collect();
        let n = labels.len();

        Plot::new(format!("bar_{}", id))
            .height(CHART_HEIGHT)
            .allow_zoom(false)
            .allow_drag(false)
            .allow_scroll(false)
            .x_axis_label(data.x_label.as_str())
            .y_axis_label(data.y_label.as_str())
            .include_y(0.0)
            .x_grid_spacer(move |_input| {
                (0..n)
                    .map(|i| GridMark {
                        value: i as f64,
                        step_size: 1.0,
                    })
                    .collect()
            })
            .x_axis_formatter(move |mark, _range| {
                let idx = mark.value.round();
                if (mark.value - idx).abs() < 1e-6 && idx >= 0.0 {
                    labels.get(idx as usize).cloned().unwrap_or_default()
                } else {
                    String::new()
                }
            })
            .y_axis_formatter(|mark, _range| geometry::format_compact(mark.value))
            .show(ui, |plot_ui| {
                let bars: Vec<Bar> = data
                    .bars
                    .iter()
                    .zip(colors)
                    .enumerate()
                    .map(|(i, ((label, value), rgb))| {
                        Bar::new(i as f64, *value)
                            .name(label)
                            .fill(Self::color(rgb))
                            .width(0.7)
                    })
                    .collect();

                plot_ui.bar_chart(BarChart::new(bars).name(&data.y_label));
            });
    }

    /// Monthly totals on a continuous year axis.
    pub fn draw_line_chart(ui: &mut egui::Ui, id: &str, data: &LineData) {
        let points: Vec<[f64; 2]> = data
            .points
            .iter()
            .map(|p| [geometry::decimal_year(p.month_end), p.total])
            .collect();

        Plot::new(format!("line_{}", id))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(data.x_label.as_str())
            .y_axis_label(data.y_label.as_str())
            .include_y(0.0)
            .x_axis_formatter(|mark, _range| geometry::year_label(mark.value))
            .y_axis_formatter(|mark, _range| geometry::format_compact(mark.value))
            .label_formatter(|_name, value| {
                format!(
                    "{}\n{}",
                    geometry::month_label(value.x),
                    geometry::format_compact(value.y)
                )
            })
            .show(ui, |plot_ui| {
                plot_ui.line(
                    Line::new(PlotPoints::from(points.clone()))
                        .color(LINE_COLOR)
                        .width(2.0)
                        .name(&data.y_label),
                );
                plot_ui.points(
                    Points::new(PlotPoints::from(points))
                        .radius(2.5)
                        .color(LINE_COLOR),
                );
            });
    }

    /// One colored, legend-labelled point per group.
    pub fn draw_scatter_chart(ui: &mut egui::Ui, id: &str, data: &ScatterData) {
        let colors = data.palette.colors(data.points.len());

        Plot::new(format!("scatter_{}", id))
            .height(CHART_HEIGHT)
            .allow_scroll(false)
            .x_axis_label(data.x_label.as_str())
            .y_axis_label(data.y_label.as_str())
            .y_axis_formatter(|mark, _range| geometry::format_compact(mark.value))
            .legend(Legend::default())
            .show(ui, |plot_ui| {
                for (point, rgb) in data.points.iter().zip(colors) {
                    plot_ui.points(
                        Points::new(vec![[point.x, point.y]])
                            .radius(7.0)
                            .filled(true)
                            .color(Self::color(rgb))
                            .name(&point.label),
                    );
                }
            });
    }
}
