//! Data Processor Module
//! Grouping and reduction primitives behind every report analysis:
//! per-key max/sum, top-N selection, monthly resampling, ratios and shares.

use crate::data::dates;
use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Column '{0}' not found")]
    MissingColumn(String),
    #[error("No usable values in '{0}'")]
    Empty(String),
}

/// One reduced value per group key.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupValue {
    pub key: String,
    /// `None` when every row of the group was missing.
    pub value: Option<f64>,
}

/// Per-key sums of several columns, in the order the columns were requested.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupSums {
    pub key: String,
    pub sums: Vec<f64>,
}

/// Total of a column over one calendar month.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthlyTotal {
    pub month_end: NaiveDate,
    pub total: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeathRate {
    pub key: String,
    pub max_deaths: f64,
    pub max_cases: f64,
    pub rate: f64,
}

/// A group's fraction of the total across all groups.
#[derive(Debug, Clone, PartialEq)]
pub struct Share {
    pub key: String,
    pub value: f64,
    pub fraction: f64,
}

/// Rows assigned to groups, groups sorted by key.
struct Grouping {
    keys: Vec<String>,
    row_group: Vec<Option<usize>>,
}

impl Grouping {
    fn new(keys: Vec<Option<String>>) -> Self {
        let mut index: BTreeMap<String, usize> =
            keys.iter().flatten().map(|key| (key.clone(), 0)).collect();
        for (group, slot) in index.values_mut().enumerate() {
            *slot = group;
        }

        let row_group = keys
            .iter()
            .map(|key| key.as_ref().and_then(|key| index.get(key).copied()))
            .collect();

        Self {
            keys: index.into_keys().collect(),
            row_group,
        }
    }

    fn len(&self) -> usize {
        self.keys.len()
    }
}

/// Handles grouping and reduction over loaded tables.
pub struct DataProcessor;

impl DataProcessor {
    fn column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, ProcessorError> {
        df.column(name)
            .map_err(|_| ProcessorError::MissingColumn(name.to_string()))
    }

    /// Read a categorical column as optional strings.
    pub fn key_values(df: &DataFrame, column: &str) -> Result<Vec<Option<String>>, ProcessorError> {
        let series = Self::column(df, column)?
            .as_materialized_series()
            .cast(&DataType::String)?;

        Ok(series
            .str()?
            .into_iter()
            .map(|v| v.map(|s| s.to_string()))
            .collect())
    }

    /// Read a numeric column as `f64`, with NaN folded into missing.
    pub fn numeric_values(df: &DataFrame, column: &str) -> Result<Vec<Option<f64>>, ProcessorError> {
        let series = Self::column(df, column)?
            .as_materialized_series()
            .cast(&DataType::Float64)?;

        Ok(series
            .f64()?
            .into_iter()
            .map(|v| v.filter(|x| !x.is_nan()))
            .collect())
    }

    /// Maximum of `value` per distinct `key`, sorted by key.
    ///
    /// Fails when no group has a single non-missing value.
    pub fn group_max(
        df: &DataFrame,
        key: &str,
        value: &str,
    ) -> Result<Vec<GroupValue>, ProcessorError> {
        let grouping = Grouping::new(Self::key_values(df, key)?);
        let values = Self::numeric_values(df, value)?;

        let mut maxima: Vec<Option<f64>> = vec![None; grouping.len()];
        for (group, v) in grouping.row_group.iter().zip(values) {
            if let (Some(g), Some(v)) = (group, v) {
                maxima[*g] = Some(maxima[*g].map_or(v, |m: f64| m.max(v)));
            }
        }

        if maxima.iter().all(Option::is_none) {
            return Err(ProcessorError::Empty(value.to_string()));
        }

        Ok(grouping
            .keys
            .into_iter()
            .zip(maxima)
            .map(|(key, value)| GroupValue { key, value })
            .collect())
    }

    /// Sum of each of `values` per distinct `key`, sorted by key.
    ///
    /// Missing cells contribute nothing. Fails when every requested column is
    /// entirely missing.
    pub fn group_sums(
        df: &DataFrame,
        key: &str,
        values: &[&str],
    ) -> Result<Vec<GroupSums>, ProcessorError> {
        let grouping = Grouping::new(Self::key_values(df, key)?);
        let mut sums = vec![vec![0.0; values.len()]; grouping.len()];
        let mut seen = false;

        for (col_idx, name) in values.iter().enumerate() {
            let column = Self::numeric_values(df, name)?;
            for (group, v) in grouping.row_group.iter().zip(column) {
                if let (Some(g), Some(v)) = (group, v) {
                    sums[*g][col_idx] += v;
                    seen = true;
                }
            }
        }

        if !seen {
            return Err(ProcessorError::Empty(values.join(", ")));
        }

        Ok(grouping
            .keys
            .into_iter()
            .zip(sums)
            .map(|(key, sums)| GroupSums { key, sums })
            .collect())
    }

    /// The `n` largest rows, descending. Missing values sort last and ties
    /// keep their original order.
    pub fn top_n(mut rows: Vec<GroupValue>, n: usize) -> Vec<GroupValue> {
        rows.sort_by(|a, b| match (a.value, b.value) {
            (Some(x), Some(y)) => y.partial_cmp(&x).unwrap_or(Ordering::Equal),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        });
        rows.truncate(n);
        rows
    }

    /// Sum `value` per calendar month, covering every month from the first to
    /// the last dated row. Months without rows total zero.
    pub fn monthly_sum(
        df: &DataFrame,
        date: &str,
        value: &str,
    ) -> Result<Vec<MonthlyTotal>, ProcessorError> {
        let dates = dates::date_values(df, date).map_err(|e| match e {
            PolarsError::ColumnNotFound(_) => ProcessorError::MissingColumn(date.to_string()),
            other => ProcessorError::PolarsError(other),
        })?;
        let values = Self::numeric_values(df, value)?;

        let dated: Vec<(i32, Option<f64>)> = dates
            .into_iter()
            .zip(values)
            .filter_map(|(d, v)| d.map(|d| (Self::month_index(d), v)))
            .collect();

        if dated.iter().all(|(_, v)| v.is_none()) {
            return Err(ProcessorError::Empty(value.to_string()));
        }

        let first = dated.iter().map(|(m, _)| *m).min().unwrap_or_default();
        let last = dated.iter().map(|(m, _)| *m).max().unwrap_or_default();

        let mut totals = vec![0.0; (last - first + 1) as usize];
        for (month, v) in dated {
            totals[(month - first) as usize] += v.unwrap_or(0.0);
        }

        (first..=last)
            .zip(totals)
            .map(|(month, total)| {
                Self::month_end(month)
                    .map(|month_end| MonthlyTotal { month_end, total })
                    .ok_or_else(|| ProcessorError::Empty(date.to_string()))
            })
            .collect()
    }

    fn month_index(date: NaiveDate) -> i32 {
        date.year() * 12 + date.month0() as i32
    }

    /// Last day of the month with the given index.
    fn month_end(index: i32) -> Option<NaiveDate> {
        let next = index + 1;
        NaiveDate::from_ymd_opt(next.div_euclid(12), next.rem_euclid(12) as u32 + 1, 1)?
            .pred_opt()
    }

    /// `max(deaths) / max(cases)` per key. Keys whose maximum case count is
    /// zero or missing, or whose deaths are missing, are left out.
    pub fn death_rates(
        df: &DataFrame,
        key: &str,
        deaths: &str,
        cases: &str,
    ) -> Result<Vec<DeathRate>, ProcessorError> {
        let max_deaths = Self::group_max(df, key, deaths)?;
        let max_cases = Self::group_max(df, key, cases)?;

        let rates: Vec<DeathRate> = max_deaths
            .into_iter()
            .zip(max_cases)
            .filter_map(|(d, c)| match (d.value, c.value) {
                (Some(max_deaths), Some(max_cases)) if max_cases > 0.0 => Some(DeathRate {
                    key: d.key,
                    max_deaths,
                    max_cases,
                    rate: max_deaths / max_cases,
                }),
                _ => None,
            })
            .collect();

        if rates.is_empty() {
            return Err(ProcessorError::Empty(format!("{deaths} / {cases}")));
        }
        Ok(rates)
    }

    /// Each present value's fraction of the total. Missing values are dropped.
    pub fn pie_shares(rows: &[GroupValue]) -> Result<Vec<Share>, ProcessorError> {
        let present: Vec<(&str, f64)> = rows
            .iter()
            .filter_map(|r| r.value.map(|v| (r.key.as_str(), v)))
            .collect();
        let total: f64 = present.iter().map(|(_, v)| v).sum();

        if present.is_empty() || total <= 0.0 {
            return Err(ProcessorError::Empty("shares".to_string()));
        }

        Ok(present
            .into_iter()
            .map(|(key, value)| Share {
                key: key.to_string(),
                value,
                fraction: value / total,
            })
            .collect())
    }
}
