//! Static Chart Renderer
//! Draws report charts into PNG images with plotters, for the exported page.
//!
//! Each chart is drawn onto an in-memory RGB buffer, then encoded with the
//! `image` crate so nothing touches the filesystem here.

use crate::charts::geometry::{self, PIE_LABEL_DISTANCE, PIE_PCT_DISTANCE};
use crate::charts::{BarData, ChartData, LineData, PieData, Rgb, ScatterData};
use image::{ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};
use std::io::Cursor;
use thiserror::Error;

const FONT: &str = "sans-serif";
const LINE_COLOR: RGBColor = RGBColor(31, 119, 180);

/// Default export size in pixels.
pub const EXPORT_WIDTH: u32 = 1000;
pub const EXPORT_HEIGHT: u32 = 600;

#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Drawing failed: {0}")]
    Draw(String),

    #[error("Chart buffer does not match a {0}x{1} image")]
    Buffer(u32, u32),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),
}

type Area<'a> = DrawingArea<BitMapBackend<'a>, Shift>;

fn draw_err(e: impl std::fmt::Display) -> RenderError {
    RenderError::Draw(e.to_string())
}

fn rgb(color: Rgb) -> RGBColor {
    RGBColor(color[0], color[1], color[2])
}

pub struct StaticChartRenderer;

impl StaticChartRenderer {
    /// Render one chart to PNG bytes.
    pub fn render_png(chart: &ChartData, width: u32, height: u32) -> Result<Vec<u8>, RenderError> {
        let mut buffer = vec![0u8; width as usize * height as usize * 3];
        {
            let root = BitMapBackend::with_buffer(&mut buffer, (width, height)).into_drawing_area();
            root.fill(&WHITE).map_err(draw_err)?;

            match chart {
                ChartData::Pie(data) => Self::draw_pie(&root, data)?,
                ChartData::Bar(data) => Self::draw_bar(&root, data)?,
                ChartData::Line(data) => Self::draw_line(&root, data)?,
                ChartData::Scatter(data) => Self::draw_scatter(&root, data)?,
            }
            root.present().map_err(draw_err)?;
        }

        let image =
            RgbImage::from_raw(width, height, buffer).ok_or(RenderError::Buffer(width, height))?;
        let mut png = Cursor::new(Vec::new());
        image.write_to(&mut png, ImageFormat::Png)?;
        Ok(png.into_inner())
    }

    fn draw_pie(root: &Area, data: &PieData) -> Result<(), RenderError> {
        let area = root.titled(&data.title, (FONT, 24)).map_err(draw_err)?;
        let (w, h) = area.dim_in_pixel();
        let center = (w as i32 / 2, h as i32 / 2);
        let radius = (w.min(h) as f64 * 0.38).max(1.0);

        let fractions: Vec<f64> = data.slices.iter().map(|s| s.fraction).collect();
        let wedges = geometry::pie_wedges(&fractions, data.start_angle);
        let colors = data.palette.colors(data.slices.len());

        for (wedge, color) in wedges.iter().zip(&colors) {
            let outline: Vec<(i32, i32)> = wedge
                .polygon(radius)
                .into_iter()
                .map(|p| to_pixel(center, p))
                .collect();
            area.draw(&Polygon::new(outline, rgb(*color).filled()))
                .map_err(draw_err)?;
        }

        for (slice, wedge) in data.slices.iter().zip(&wedges) {
            let [lx, ly] = wedge.anchor(PIE_LABEL_DISTANCE * radius);
            let h_pos = if lx >= 0.0 { HPos::Left } else { HPos::Right };
            let label_style = (FONT, 16)
                .into_font()
                .color(&BLACK)
                .pos(Pos::new(h_pos, VPos::Center));
            area.draw(&Text::new(
                slice.key.clone(),
                to_pixel(center, [lx, ly]),
                label_style,
            ))
            .map_err(draw_err)?;

            let pct_style = (FONT, 14)
                .into_font()
                .style(FontStyle::Bold)
                .color(&WHITE)
                .pos(Pos::new(HPos::Center, VPos::Center));
            area.draw(&Text::new(
                geometry::format_percent(slice.fraction),
                to_pixel(center, wedge.anchor(PIE_PCT_DISTANCE * radius)),
                pct_style,
            ))
            .map_err(draw_err)?;
        }
        Ok(())
    }

    fn draw_bar(root: &Area, data: &BarData) -> Result<(), RenderError> {
        let n = data.bars.len().max(1) as i32;
        let max = data.bars.iter().map(|(_, v)| *v).fold(0.0, f64::max);
        let labels: Vec<&str> = data.bars.iter().map(|(label, _)| label.as_str()).collect();

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(if data.rotate_labels { 120 } else { 40 })
            .y_label_area_size(70)
            .build_cartesian_2d((0..n).into_segmented(), 0.0..geometry::axis_upper(max))
            .map_err(draw_err)?;

        let x_style = if data.rotate_labels {
            (FONT, 13).into_font().transform(FontTransform::Rotate90)
        } else {
            (FONT, 13).into_font()
        };
        chart
            .configure_mesh()
            .disable_x_mesh()
            .x_labels(n as usize)
            .x_label_style(x_style)
            .x_label_formatter(&|v: &SegmentValue<i32>| match v {
                SegmentValue::CenterOf(i) | SegmentValue::Exact(i) => labels
                    .get(*i as usize)
                    .map(|l| l.to_string())
                    .unwrap_or_default(),
                SegmentValue::Last => String::new(),
            })
            .y_label_formatter(&|v: &f64| geometry::format_compact(*v))
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        let colors = data.palette.colors(data.bars.len());
        chart
            .draw_series(data.bars.iter().zip(colors).enumerate().map(
                |(i, ((_, value), color))| {
                    let i = i as i32;
                    let mut bar = Rectangle::new(
                        [(SegmentValue::Exact(i), 0.0), (SegmentValue::Exact(i + 1), *value)],
                        rgb(color).filled(),
                    );
                    bar.set_margin(0, 0, 8, 8);
                    bar
                },
            ))
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_line(root: &Area, data: &LineData) -> Result<(), RenderError> {
        let points: Vec<(f64, f64)> = data
            .points
            .iter()
            .map(|p| (geometry::decimal_year(p.month_end), p.total))
            .collect();
        let (x_min, x_max) = geometry::axis_range(points.iter().map(|p| p.0));
        let y_max = points.iter().map(|p| p.1).fold(0.0, f64::max);

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, 0.0..geometry::axis_upper(y_max))
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|v: &f64| geometry::year_label(*v))
            .y_label_formatter(&|v: &f64| geometry::format_compact(*v))
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        chart
            .draw_series(LineSeries::new(
                points.iter().copied(),
                LINE_COLOR.stroke_width(2),
            ))
            .map_err(draw_err)?;
        chart
            .draw_series(
                points
                    .iter()
                    .map(|&p| Circle::new(p, 3, LINE_COLOR.filled())),
            )
            .map_err(draw_err)?;
        Ok(())
    }

    fn draw_scatter(root: &Area, data: &ScatterData) -> Result<(), RenderError> {
        let (x_min, x_max) = geometry::axis_range(data.points.iter().map(|p| p.x));
        let (y_min, y_max) = geometry::axis_range(data.points.iter().map(|p| p.y));

        let mut chart = ChartBuilder::on(root)
            .caption(&data.title, (FONT, 24))
            .margin(15)
            .x_label_area_size(40)
            .y_label_area_size(70)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)
            .map_err(draw_err)?;

        chart
            .configure_mesh()
            .x_label_formatter(&|v: &f64| geometry::format_compact(*v))
            .y_label_formatter(&|v: &f64| geometry::format_compact(*v))
            .x_desc(data.x_label.as_str())
            .y_desc(data.y_label.as_str())
            .draw()
            .map_err(draw_err)?;

        let colors = data.palette.colors(data.points.len());
        for (point, color) in data.points.iter().zip(colors) {
            let color = rgb(color);
            chart
                .draw_series(std::iter::once(Circle::new(
                    (point.x, point.y),
                    8,
                    color.filled(),
                )))
                .map_err(draw_err)?
                .label(point.label.as_str())
                .legend(move |(x, y)| Circle::new((x, y), 5, color.filled()));
        }

        chart
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .background_style(WHITE.mix(0.85))
            .border_style(BLACK)
            .label_font((FONT, 14))
            .draw()
            .map_err(draw_err)?;
        Ok(())
    }
}

/// Map a point in chart units (y up) to pixels around `center` (y down).
fn to_pixel(center: (i32, i32), point: [f64; 2]) -> (i32, i32) {
    (
        center.0 + point[0].round() as i32,
        center.1 - point[1].round() as i32,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_mapping_flips_y() {
        assert_eq!(to_pixel((100, 50), [0.0, 0.0]), (100, 50));
        assert_eq!(to_pixel((100, 50), [10.0, 20.0]), (110, 30));
        assert_eq!(to_pixel((100, 50), [-10.4, -5.6]), (90, 56));
    }

    #[test]
    fn palette_colors_convert() {
        assert_eq!(rgb([1, 2, 3]), RGBColor(1, 2, 3));
    }
}
