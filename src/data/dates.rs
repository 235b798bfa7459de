//! Date Parsing Module
//! Reparses text `date` columns into polars `Date` values, accepting mixed
//! formats with day-first disambiguation.

use chrono::{Datelike, NaiveDate, NaiveDateTime};
use polars::prelude::*;

/// Days between 0001-01-01 (CE day 1) and 1970-01-01.
const UNIX_EPOCH_DAYS_FROM_CE: i32 = 719_163;

/// Formats for cells that start with a four-digit year.
const YEAR_FIRST_FORMATS: [&str; 5] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Everything else, tried in order. Day-first readings come before the
/// month-first fallback; two-digit years before four-digit ones.
const DAY_FIRST_FORMATS: [&str; 16] = [
    "%d/%m/%y",
    "%d-%m-%y",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%m/%d/%Y",
    "%m-%d-%Y",
    "%d %b %Y",
    "%d %B %Y",
    "%b %d, %Y",
    "%B %d, %Y",
    "%b %d %Y",
    "%d/%m/%Y %H:%M:%S",
    "%d/%m/%Y %H:%M",
    "%m/%d/%Y %H:%M:%S",
    "%m/%d/%Y %H:%M",
];

/// Parse a single date cell. Returns `None` when no known format matches.
pub fn parse_mixed_dayfirst(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    let year_first = text.len() >= 4 && text.as_bytes()[..4].iter().all(u8::is_ascii_digit);
    let formats: &[&str] = if year_first {
        &YEAR_FIRST_FORMATS
    } else {
        &DAY_FIRST_FORMATS
    };

    formats.iter().find_map(|fmt| {
        NaiveDate::parse_from_str(text, fmt)
            .ok()
            .or_else(|| NaiveDateTime::parse_from_str(text, fmt).ok().map(|dt| dt.date()))
    })
}

/// Days since the Unix epoch, the physical representation of polars `Date`.
pub fn to_epoch_days(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - UNIX_EPOCH_DAYS_FROM_CE
}

pub fn from_epoch_days(days: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(days + UNIX_EPOCH_DAYS_FROM_CE)
}

/// A cell that could not be read as a date.
#[derive(Debug, Clone, PartialEq)]
pub struct UnparsedDate {
    pub row: usize,
    pub text: String,
}

/// Replace `column` with a `Date` column.
///
/// String cells are parsed with [`parse_mixed_dayfirst`]; empty cells become
/// null. Columns already typed as `Date` or `Datetime` are converted in place.
/// The first unparseable cell is reported back to the caller.
pub fn reparse_date_column(
    df: &mut DataFrame,
    column: &str,
) -> PolarsResult<Result<(), UnparsedDate>> {
    let source = df.column(column)?.as_materialized_series().clone();

    let parsed = match source.dtype() {
        DataType::Date => return Ok(Ok(())),
        DataType::Datetime(_, _) => source.cast(&DataType::Date)?,
        _ => {
            let text = source.cast(&DataType::String)?;
            let mut days: Vec<Option<i32>> = Vec::with_capacity(text.len());

            for (row, cell) in text.str()?.into_iter().enumerate() {
                match cell.map(str::trim) {
                    None | Some("") => days.push(None),
                    Some(value) => match parse_mixed_dayfirst(value) {
                        Some(date) => days.push(Some(to_epoch_days(date))),
                        None => {
                            return Ok(Err(UnparsedDate {
                                row,
                                text: value.to_string(),
                            }))
                        }
                    },
                }
            }

            Series::new(column.into(), days).cast(&DataType::Date)?
        }
    };

    df.with_column(parsed)?;
    Ok(Ok(()))
}

/// Read a `Date` column back as calendar dates.
pub fn date_values(df: &DataFrame, column: &str) -> PolarsResult<Vec<Option<NaiveDate>>> {
    let days = df
        .column(column)?
        .as_materialized_series()
        .cast(&DataType::Date)?
        .cast(&DataType::Int32)?;

    Ok(days
        .i32()?
        .into_iter()
        .map(|d| d.and_then(from_epoch_days))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn iso_dates_are_year_first() {
        assert_eq!(parse_mixed_dayfirst("2020-01-05"), Some(ymd(2020, 1, 5)));
        assert_eq!(parse_mixed_dayfirst("2020/01/05"), Some(ymd(2020, 1, 5)));
    }

    #[test]
    fn ambiguous_numeric_dates_are_day_first() {
        assert_eq!(parse_mixed_dayfirst("05/01/2020"), Some(ymd(2020, 1, 5)));
        assert_eq!(parse_mixed_dayfirst("05-01-2020"), Some(ymd(2020, 1, 5)));
        assert_eq!(parse_mixed_dayfirst("05.01.2020"), Some(ymd(2020, 1, 5)));
        assert_eq!(parse_mixed_dayfirst("05/01/20"), Some(ymd(2020, 1, 5)));
    }

    #[test]
    fn impossible_day_first_falls_back_to_month_first() {
        assert_eq!(parse_mixed_dayfirst("01/13/2020"), Some(ymd(2020, 1, 13)));
    }

    #[test]
    fn textual_and_timestamped_dates() {
        assert_eq!(parse_mixed_dayfirst("5 Jan 2020"), Some(ymd(2020, 1, 5)));
        assert_eq!(parse_mixed_dayfirst("Jan 5, 2020"), Some(ymd(2020, 1, 5)));
        assert_eq!(
            parse_mixed_dayfirst("2020-01-05 13:45:00"),
            Some(ymd(2020, 1, 5))
        );
        assert_eq!(parse_mixed_dayfirst(" 2021-03-31 "), Some(ymd(2021, 3, 31)));
    }

    #[test]
    fn garbage_is_rejected() {
        assert_eq!(parse_mixed_dayfirst(""), None);
        assert_eq!(parse_mixed_dayfirst("yesterday"), None);
        assert_eq!(parse_mixed_dayfirst("32/01/2020"), None);
    }

    #[test]
    fn epoch_day_conversion() {
        assert_eq!(to_epoch_days(ymd(1970, 1, 1)), 0);
        assert_eq!(to_epoch_days(ymd(1970, 1, 2)), 1);
        assert_eq!(from_epoch_days(18_262), Some(ymd(2020, 1, 1)));
    }

    #[test]
    fn reparse_mixed_column() {
        let mut df = df!(
            "date" => &[Some("2020-01-05"), Some("06/01/2020"), None, Some("")],
            "value" => &[1i32, 2, 3, 4]
        )
        .unwrap();

        reparse_date_column(&mut df, "date").unwrap().unwrap();

        assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);
        assert_eq!(
            date_values(&df, "date").unwrap(),
            vec![Some(ymd(2020, 1, 5)), Some(ymd(2020, 1, 6)), None, None]
        );
    }

    #[test]
    fn reparse_reports_first_bad_cell() {
        let mut df = df!("date" => &["2020-01-05", "not a date", "also bad"]).unwrap();

        let bad = reparse_date_column(&mut df, "date").unwrap().unwrap_err();
        assert_eq!(
            bad,
            UnparsedDate {
                row: 1,
                text: "not a date".to_string()
            }
        );
    }

    #[test]
    fn missing_column_is_a_polars_error() {
        let mut df = df!("value" => &[1i32]).unwrap();
        assert!(reparse_date_column(&mut df, "date").is_err());
    }
}
