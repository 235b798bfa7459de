//! CSV Data Loader Module
//! Loads the four COVID-19 tables with Polars and normalises their `date` columns.

use crate::config::ReportConfig;
use crate::data::dates;
use polars::prelude::*;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Name of the date column every table must carry.
pub const DATE_COLUMN: &str = "date";

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Data file not found: {0}")]
    MissingFile(PathBuf),
    #[error("Failed to load CSV {path}: {source}")]
    CsvError { path: PathBuf, source: PolarsError },
    #[error("Table '{0}' has no 'date' column")]
    MissingDateColumn(TableKind),
    #[error("Table '{table}' row {row}: cannot parse date '{text}'")]
    InvalidDate {
        table: TableKind,
        row: usize,
        text: String,
    },
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
}

/// The four input datasets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableKind {
    Full,
    Icu,
    Testing,
    Vaccination,
}

impl TableKind {
    pub const ALL: [TableKind; 4] = [
        TableKind::Full,
        TableKind::Icu,
        TableKind::Testing,
        TableKind::Vaccination,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TableKind::Full => "Daily cases & deaths",
            TableKind::Icu => "Hospital & ICU",
            TableKind::Testing => "Testing",
            TableKind::Vaccination => "Vaccinations",
        }
    }

    fn path(self, config: &ReportConfig) -> PathBuf {
        match self {
            TableKind::Full => config.full_path(),
            TableKind::Icu => config.icu_path(),
            TableKind::Testing => config.testing_path(),
            TableKind::Vaccination => config.vaccination_path(),
        }
    }
}

impl fmt::Display for TableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TableKind::Full => "full",
            TableKind::Icu => "icu",
            TableKind::Testing => "testing",
            TableKind::Vaccination => "vaccination",
        };
        f.write_str(name)
    }
}

/// Immutable snapshot of all input tables, held for the whole session.
#[derive(Debug, Clone)]
pub struct CovidTables {
    pub full: DataFrame,
    pub icu: DataFrame,
    pub testing: DataFrame,
    pub vaccination: DataFrame,
    /// Head rows as read from each file, in `TableKind::ALL` order.
    pub previews: [TablePreview; 4],
}

impl CovidTables {
    pub fn get(&self, kind: TableKind) -> &DataFrame {
        match kind {
            TableKind::Full => &self.full,
            TableKind::Icu => &self.icu,
            TableKind::Testing => &self.testing,
            TableKind::Vaccination => &self.vaccination,
        }
    }

    pub fn preview(&self, kind: TableKind) -> &TablePreview {
        let idx = match kind {
            TableKind::Full => 0,
            TableKind::Icu => 1,
            TableKind::Testing => 2,
            TableKind::Vaccination => 3,
        };
        &self.previews[idx]
    }
}

/// First rows of a table rendered as text.
#[derive(Debug, Clone, PartialEq)]
pub struct TablePreview {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
    pub total_rows: usize,
}

/// Handles CSV file loading with Polars.
pub struct DataLoader {
    infer_schema_rows: Option<usize>,
}

impl Default for DataLoader {
    fn default() -> Self {
        Self::new(ReportConfig::default().infer_schema_rows)
    }
}

impl DataLoader {
    pub fn new(infer_schema_rows: Option<usize>) -> Self {
        Self { infer_schema_rows }
    }

    /// Load a CSV file using Polars.
    ///
    /// Cells that do not fit the inferred column type are an error, never
    /// silently nulled.
    pub fn load_csv(&self, file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.is_file() {
            return Err(LoaderError::MissingFile(file_path.to_path_buf()));
        }

        let csv_error = |source: PolarsError| LoaderError::CsvError {
            path: file_path.to_path_buf(),
            source,
        };

        LazyCsvReader::new(file_path)
            .with_infer_schema_length(self.infer_schema_rows)
            .finish()
            .map_err(csv_error)?
            .collect()
            .map_err(csv_error)
    }

    /// Load one table and convert its `date` column to calendar dates.
    ///
    /// The preview is taken first, so it shows dates as written in the file.
    pub fn load_table(
        &self,
        kind: TableKind,
        file_path: &Path,
        preview_rows: usize,
    ) -> Result<(DataFrame, TablePreview), LoaderError> {
        let mut df = self.load_csv(file_path)?;
        let preview = Self::preview(&df, preview_rows);
        Self::parse_dates(kind, &mut df)?;

        tracing::info!(
            table = %kind,
            path = %file_path.display(),
            rows = df.height(),
            columns = df.width(),
            "loaded table"
        );
        Ok((df, preview))
    }

    /// Load all four tables. Any failure aborts the whole load.
    pub fn load_all(config: &ReportConfig) -> Result<CovidTables, LoaderError> {
        let loader = Self::new(config.infer_schema_rows);
        let load =
            |kind: TableKind| loader.load_table(kind, &kind.path(config), config.preview_rows);

        let (full, full_preview) = load(TableKind::Full)?;
        let (icu, icu_preview) = load(TableKind::Icu)?;
        let (testing, testing_preview) = load(TableKind::Testing)?;
        let (vaccination, vaccination_preview) = load(TableKind::Vaccination)?;

        Ok(CovidTables {
            full,
            icu,
            testing,
            vaccination,
            previews: [full_preview, icu_preview, testing_preview, vaccination_preview],
        })
    }

    /// Reparse the table's `date` column in place.
    pub fn parse_dates(kind: TableKind, df: &mut DataFrame) -> Result<(), LoaderError> {
        if !Self::has_column(df, DATE_COLUMN) {
            return Err(LoaderError::MissingDateColumn(kind));
        }

        dates::reparse_date_column(df, DATE_COLUMN)?.map_err(|bad| LoaderError::InvalidDate {
            table: kind,
            row: bad.row,
            text: bad.text,
        })
    }

    pub fn has_column(df: &DataFrame, column: &str) -> bool {
        df.get_column_names().iter().any(|name| name.as_str() == column)
    }

    /// Render the first `rows` rows of a table as strings.
    pub fn preview(df: &DataFrame, rows: usize) -> TablePreview {
        let head = df.head(Some(rows));
        let columns: Vec<String> = head
            .get_column_names()
            .iter()
            .map(|s| s.to_string())
            .collect();

        let rows = (0..head.height())
            .map(|i| {
                head.get_columns()
                    .iter()
                    .map(|col| match col.get(i) {
                        Ok(AnyValue::Null) | Err(_) => String::new(),
                        Ok(val) => val.to_string().trim_matches('"').to_string(),
                    })
                    .collect()
            })
            .collect();

        TablePreview {
            columns,
            rows,
            total_rows: df.height(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::DataProcessor;
    use std::fs;
    use tempfile::tempdir;

    const FULL_CSV: &str = "\
continent,location,date,total_cases,total_deaths
Asia,India,05/01/2021,100,1
Asia,India,2021-01-06,150,2
Europe,France,07/01/2021,,3
";

    fn write_tables(dir: &Path) {
        fs::write(dir.join("covid_daily_full.csv"), FULL_CSV).unwrap();
        fs::write(
            dir.join("covid_daily_hospital_icu.csv"),
            "continent,location,date,icu_patients_per_million\nEurope,France,2021-01-05,12.5\n",
        )
        .unwrap();
        fs::write(
            dir.join("covid_daily_testing.csv"),
            "location,date,new_tests\nFrance,2021-01-05,1000\n",
        )
        .unwrap();
        fs::write(
            dir.join("covid_daily_vaccinations.csv"),
            "location,date,people_vaccinated\nFrance,2021-01-05,42\n",
        )
        .unwrap();
    }

    fn config_for(dir: &Path) -> ReportConfig {
        ReportConfig {
            data_dir: dir.to_path_buf(),
            ..ReportConfig::default()
        }
    }

    #[test]
    fn load_all_reads_every_table_and_parses_dates() {
        let dir = tempdir().unwrap();
        write_tables(dir.path());

        let tables = DataLoader::load_all(&config_for(dir.path())).unwrap();

        assert_eq!(tables.full.height(), 3);
        assert_eq!(tables.icu.height(), 1);
        for kind in TableKind::ALL {
            assert_eq!(
                tables.get(kind).column(DATE_COLUMN).unwrap().dtype(),
                &DataType::Date
            );
        }

        let parsed = dates::date_values(&tables.full, DATE_COLUMN).unwrap();
        let days: Vec<u32> = parsed
            .iter()
            .map(|d| chrono::Datelike::day(&d.unwrap()))
            .collect();
        assert_eq!(days, vec![5, 6, 7]);

        let preview = tables.preview(TableKind::Full);
        assert_eq!(preview.columns[2], "date");
        assert_eq!(preview.rows[0][2], "05/01/2021");
        assert_eq!(preview.rows[1][2], "2021-01-06");
        assert_eq!(preview.total_rows, 3);
    }

    fn late_decimal_csv(dir: &Path) -> std::path::PathBuf {
        let mut text = String::from("continent,date,total_cases\n");
        for _ in 0..10_000 {
            text.push_str("Asia,2021-01-05,100\n");
        }
        text.push_str("Asia,2021-01-06,250.5\n");

        let path = dir.join("late_decimal.csv");
        fs::write(&path, text).unwrap();
        path
    }

    #[test]
    fn late_decimal_cell_is_kept() {
        let dir = tempdir().unwrap();
        let path = late_decimal_csv(dir.path());

        let df = DataLoader::default().load_csv(&path).unwrap();

        assert_eq!(df.height(), 10_001);
        assert_eq!(df.column("total_cases").unwrap().dtype(), &DataType::Float64);
        let maxima = DataProcessor::group_max(&df, "continent", "total_cases").unwrap();
        assert_eq!(maxima[0].value, Some(250.5));
    }

    #[test]
    fn cell_outside_inferred_type_fails_load() {
        let dir = tempdir().unwrap();
        let path = late_decimal_csv(dir.path());

        let err = DataLoader::new(Some(100)).load_csv(&path).unwrap_err();
        assert!(matches!(err, LoaderError::CsvError { .. }));
    }

    #[test]
    fn missing_file_aborts_load() {
        let dir = tempdir().unwrap();
        write_tables(dir.path());
        fs::remove_file(dir.path().join("covid_daily_testing.csv")).unwrap();

        let err = DataLoader::load_all(&config_for(dir.path())).unwrap_err();
        assert!(matches!(err, LoaderError::MissingFile(p) if p.ends_with("covid_daily_testing.csv")));
    }

    #[test]
    fn table_without_date_column_is_rejected() {
        let mut df = df!("location" => &["France"]).unwrap();
        let err = DataLoader::parse_dates(TableKind::Testing, &mut df).unwrap_err();
        assert!(matches!(err, LoaderError::MissingDateColumn(TableKind::Testing)));
    }

    #[test]
    fn unparseable_date_names_table_and_row() {
        let mut df = df!("date" => &["2021-01-05", "soon"]).unwrap();
        let err = DataLoader::parse_dates(TableKind::Icu, &mut df).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Table 'icu' row 1: cannot parse date 'soon'"
        );
    }

    #[test]
    fn preview_renders_head_rows_with_blank_nulls() {
        let df = df!(
            "location" => &["India", "India", "France"],
            "total_cases" => &[Some(100i64), None, Some(7)]
        )
        .unwrap();

        let preview = DataLoader::preview(&df, 2);
        assert_eq!(preview.columns, vec!["location", "total_cases"]);
        assert_eq!(
            preview.rows,
            vec![
                vec!["India".to_string(), "100".to_string()],
                vec!["India".to_string(), String::new()],
            ]
        );
        assert_eq!(preview.total_rows, 3);
    }
}
