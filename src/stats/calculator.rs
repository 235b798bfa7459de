//! Statistics Calculator Module
//! Descriptive statistics for the numeric columns of a loaded table.

use polars::prelude::*;
use rayon::prelude::*;
use statrs::statistics::Statistics;

/// Descriptive statistics for one numeric column.
#[derive(Debug, Clone)]
pub struct ColumnSummary {
    pub column: String,
    pub count: usize,
    pub mean: f64,
    pub std: f64,
    pub min: f64,
    pub p25: f64,
    pub median: f64,
    pub p75: f64,
    pub max: f64,
}

impl ColumnSummary {
    /// Header row matching [`ColumnSummary::cells`].
    pub const HEADERS: [&'static str; 9] =
        ["column", "count", "mean", "std", "min", "25%", "50%", "75%", "max"];

    /// Display row; undefined statistics show as `NaN` like a pandas describe table.
    pub fn cells(&self) -> Vec<String> {
        let fmt = |v: f64| {
            if v.is_nan() {
                "NaN".to_string()
            } else {
                format!("{:.4}", v)
            }
        };
        let mut row = vec![self.column.clone(), self.count.to_string()];
        row.extend(
            [
                self.mean, self.std, self.min, self.p25, self.median, self.p75, self.max,
            ]
            .into_iter()
            .map(fmt),
        );
        row
    }

    fn empty(column: &str) -> Self {
        Self {
            column: column.to_string(),
            count: 0,
            mean: f64::NAN,
            std: f64::NAN,
            min: f64::NAN,
            p25: f64::NAN,
            median: f64::NAN,
            p75: f64::NAN,
            max: f64::NAN,
        }
    }
}

/// Handles statistical calculations with multi-threading support.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute descriptive statistics for an array of values.
    pub fn compute_descriptive_stats(column: &str, values: &[f64]) -> ColumnSummary {
        let n = values.len();
        if n == 0 {
            return ColumnSummary::empty(column);
        }

        let mut sorted = values.to_vec();
        sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

        let std = if n > 1 { values.iter().std_dev() } else { f64::NAN };

        ColumnSummary {
            column: column.to_string(),
            count: n,
            mean: values.iter().mean(),
            std,
            min: sorted[0],
            p25: Self::percentile(&sorted, 25.0),
            median: Self::percentile(&sorted, 50.0),
            p75: Self::percentile(&sorted, 75.0),
            max: sorted[n - 1],
        }
    }

    /// Calculate percentile using linear interpolation (NumPy compatible).
    fn percentile(sorted_values: &[f64], p: f64) -> f64 {
        let n = sorted_values.len();
        if n == 0 {
            return f64::NAN;
        }
        if n == 1 {
            return sorted_values[0];
        }

        let rank = (p / 100.0) * (n - 1) as f64;
        let lower = rank.floor() as usize;
        let upper = (rank.ceil() as usize).min(n - 1);
        let frac = rank - lower as f64;

        if lower == upper {
            sorted_values[lower]
        } else {
            sorted_values[lower] * (1.0 - frac) + sorted_values[upper] * frac
        }
    }

    fn is_numeric(dtype: &DataType) -> bool {
        matches!(
            dtype,
            DataType::Float32
                | DataType::Float64
                | DataType::Int8
                | DataType::Int16
                | DataType::Int32
                | DataType::Int64
                | DataType::UInt8
                | DataType::UInt16
                | DataType::UInt32
                | DataType::UInt64
        )
    }

    /// Non-missing, non-NaN values of a column as `f64`.
    fn column_values(column: &Column) -> Vec<f64> {
        column
            .cast(&DataType::Float64)
            .ok()
            .and_then(|col| {
                col.f64()
                    .ok()
                    .map(|ca| ca.into_iter().flatten().filter(|v| !v.is_nan()).collect())
            })
            .unwrap_or_default()
    }

    /// Summarise every numeric column of `df` in parallel, keeping column order.
    pub fn describe(df: &DataFrame) -> Vec<ColumnSummary> {
        let numeric: Vec<&Column> = df
            .get_columns()
            .iter()
            .filter(|col| Self::is_numeric(col.dtype()))
            .collect();

        // Use rayon for parallel computation
        numeric
            .par_iter()
            .map(|col| {
                Self::compute_descriptive_stats(col.name().as_str(), &Self::column_values(col))
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cells_line_up_with_headers() {
        let summary = StatsCalculator::compute_descriptive_stats("x", &[2.5]);
        let cells = summary.cells();

        assert_eq!(cells.len(), ColumnSummary::HEADERS.len());
        assert_eq!(cells[0], "x");
        assert_eq!(cells[1], "1");
        assert_eq!(cells[2], "2.5000");
        assert_eq!(cells[3], "NaN");
    }

    #[test]
    fn descriptive_stats_match_pandas_describe() {
        let s = StatsCalculator::compute_descriptive_stats("v", &[4.0, 1.0, 3.0, 2.0]);

        assert_eq!(s.count, 4);
        assert_eq!(s.mean, 2.5);
        assert!((s.std - 1.290_994_448_735_805_6).abs() < 1e-12);
        assert_eq!(s.min, 1.0);
        assert_eq!(s.p25, 1.75);
        assert_eq!(s.median, 2.5);
        assert_eq!(s.p75, 3.25);
        assert_eq!(s.max, 4.0);
    }

    #[test]
    fn single_value_has_no_spread() {
        let s = StatsCalculator::compute_descriptive_stats("v", &[7.0]);
        assert_eq!(s.count, 1);
        assert_eq!(s.median, 7.0);
        assert!(s.std.is_nan());
    }

    #[test]
    fn empty_column_is_all_nan() {
        let s = StatsCalculator::compute_descriptive_stats("v", &[]);
        assert_eq!(s.count, 0);
        assert!(s.mean.is_nan());
    }

    #[test]
    fn describe_skips_text_and_missing_cells() {
        let df = df!(
            "location" => &["a", "b", "c"],
            "total_cases" => &[Some(10i64), None, Some(30)],
            "positive_rate" => &[0.5, 0.25, f64::NAN]
        )
        .unwrap();

        let summaries = StatsCalculator::describe(&df);
        let names: Vec<&str> = summaries.iter().map(|s| s.column.as_str()).collect();
        assert_eq!(names, vec!["total_cases", "positive_rate"]);
        assert_eq!(summaries[0].count, 2);
        assert_eq!(summaries[0].mean, 20.0);
        assert_eq!(summaries[1].count, 2);
        assert_eq!(summaries[1].max, 0.5);
    }
}
