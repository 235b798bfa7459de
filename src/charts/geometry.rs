//! Chart geometry and label formatting shared by both renderers.

use chrono::{Datelike, NaiveDate};

/// Polygon resolution for pie wedges.
const DEGREES_PER_SEGMENT: f64 = 2.0;

/// Distance of category labels from the pie center, relative to the radius.
pub const PIE_LABEL_DISTANCE: f64 = 1.1;
/// Distance of percentage labels from the pie center, relative to the radius.
pub const PIE_PCT_DISTANCE: f64 = 0.6;

/// One pie wedge, angles in degrees counterclockwise from +x.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Wedge {
    pub start: f64,
    pub end: f64,
}

impl Wedge {
    pub fn mid(&self) -> f64 {
        (self.start + self.end) / 2.0
    }

    /// Point at `distance` from the origin along the wedge's bisector.
    pub fn anchor(&self, distance: f64) -> [f64; 2] {
        let theta = self.mid().to_radians();
        [distance * theta.cos(), distance * theta.sin()]
    }

    /// Closed outline around the origin: center, arc, back to center.
    pub fn polygon(&self, radius: f64) -> Vec<[f64; 2]> {
        let sweep = self.end - self.start;
        let steps = ((sweep / DEGREES_PER_SEGMENT).ceil() as usize).max(1);

        let mut points = Vec::with_capacity(steps + 2);
        points.push([0.0, 0.0]);
        for i in 0..=steps {
            let theta = (self.start + sweep * i as f64 / steps as f64).to_radians();
            points.push([radius * theta.cos(), radius * theta.sin()]);
        }
        points
    }

    /// Split into consecutive pieces no wider than `max_sweep` degrees, so
    /// each piece is convex.
    pub fn split(&self, max_sweep: f64) -> Vec<Wedge> {
        let sweep = self.end - self.start;
        let pieces = ((sweep / max_sweep).ceil() as usize).max(1);
        let step = sweep / pieces as f64;

        (0..pieces)
            .map(|i| Wedge {
                start: self.start + step * i as f64,
                end: if i + 1 == pieces {
                    self.end
                } else {
                    self.start + step * (i + 1) as f64
                },
            })
            .collect()
    }
}

/// Lay out wedges counterclockwise from `start_angle`, one per fraction.
pub fn pie_wedges(fractions: &[f64], start_angle: f64) -> Vec<Wedge> {
    let mut angle = start_angle;
    fractions
        .iter()
        .map(|f| {
            let wedge = Wedge {
                start: angle,
                end: angle + 360.0 * f,
            };
            angle = wedge.end;
            wedge
        })
        .collect()
}

/// Upper bound for a value axis starting at zero, with headroom.
pub fn axis_upper(max: f64) -> f64 {
    if max.is_finite() && max > 0.0 {
        max * 1.1
    } else {
        1.0
    }
}

/// Padded `(min, max)` covering all values, never zero-width.
pub fn axis_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (lo, hi) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });

    if lo > hi {
        return (0.0, 1.0);
    }
    let pad = if hi > lo { (hi - lo) * 0.1 } else { lo.abs().max(1.0) * 0.1 };
    (lo - pad, hi + pad)
}

/// Short human-readable number: `1.2B`, `35.4M`, `8.1K`, `0.0213`.
pub fn format_compact(value: f64) -> String {
    let abs = value.abs();
    if abs >= 1e9 {
        format!("{:.1}B", value / 1e9)
    } else if abs >= 1e6 {
        format!("{:.1}M", value / 1e6)
    } else if abs >= 1e4 {
        format!("{:.1}K", value / 1e3)
    } else if abs >= 100.0 || value == 0.0 {
        format!("{:.0}", value)
    } else if abs >= 1.0 {
        format!("{:.2}", value)
    } else {
        format!("{:.4}", value)
    }
}

/// Pie percentage label, e.g. `35.0%`.
pub fn format_percent(fraction: f64) -> String {
    format!("{:.1}%", fraction * 100.0)
}

/// Month name for a point on a year axis, e.g. 2021.1667 reads `Mar 2021`.
pub fn month_label(value: f64) -> String {
    let year = value.floor();
    let month0 = (((value - year) * 12.0).round() as u32).min(11);
    NaiveDate::from_ymd_opt(year as i32, month0 + 1, 1)
        .map(|d| d.format("%b %Y").to_string())
        .unwrap_or_default()
}

/// Position of a month on a continuous year axis, e.g. March 2021 is 2021.1667.
pub fn decimal_year(date: NaiveDate) -> f64 {
    date.year() as f64 + date.month0() as f64 / 12.0
}

/// Tick label for a year axis: whole years only.
pub fn year_label(value: f64) -> String {
    if (value - value.round()).abs() < 1e-6 {
        format!("{:.0}", value)
    } else {
        String::new()
    }
}
