//! Report module - Builds the single-page report from the loaded tables

mod analysis;
pub mod insights;

pub use analysis::Analysis;

use crate::charts::ChartData;
use crate::config::ReportConfig;
use crate::data::{CovidTables, TableKind, TablePreview};
use crate::stats::{ColumnSummary, StatsCalculator};

pub const REPORT_TITLE: &str = "🦠 COVID-19 Analysis Dashboard";

/// Preview and summary statistics for one input table.
#[derive(Debug, Clone)]
pub struct DatasetSection {
    pub table: TableKind,
    pub preview: TablePreview,
    pub summary: Vec<ColumnSummary>,
}

/// One chart block. A failed analysis keeps its error so the rest of the
/// report can still be shown.
#[derive(Debug, Clone)]
pub struct ReportSection {
    pub analysis: Analysis,
    pub chart: Result<ChartData, String>,
}

impl ReportSection {
    pub fn heading(&self) -> &'static str {
        self.analysis.heading()
    }

    pub fn insight(&self) -> &'static str {
        self.analysis.insight()
    }
}

#[derive(Debug, Clone)]
pub struct Report {
    pub datasets: Vec<DatasetSection>,
    pub sections: Vec<ReportSection>,
    pub conclusion: &'static str,
}

impl Report {
    /// Run every analysis in display order over the loaded tables.
    pub fn build(tables: &CovidTables, config: &ReportConfig) -> Self {
        let datasets = TableKind::ALL
            .iter()
            .map(|&table| {
                let df = tables.get(table);
                DatasetSection {
                    table,
                    preview: tables.preview(table).clone(),
                    summary: StatsCalculator::describe(df),
                }
            })
            .collect();

        let sections = Analysis::ALL
            .iter()
            .map(|&analysis| {
                let chart = analysis.run(tables, config.top_n).map_err(|e| {
                    tracing::error!(?analysis, error = %e, "analysis failed");
                    e.to_string()
                });
                if let Ok(chart) = &chart {
                    tracing::debug!(?analysis, kind = chart.kind(), "analysis ready");
                }
                ReportSection { analysis, chart }
            })
            .collect();

        Self {
            datasets,
            sections,
            conclusion: insights::CONCLUSION,
        }
    }

    pub fn failed_sections(&self) -> usize {
        self.sections.iter().filter(|s| s.chart.is_err()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::charts::ChartData;
    use crate::data::DataLoader;
    use polars::prelude::*;

    fn full_table() -> DataFrame {
        let mut df = df!(
            "continent" => &[Some("Asia"), Some("Asia"), Some("Europe"), Some("Europe"), None],
            "location" => &["India", "India", "France", "San Marino", "World"],
            "date" => &["2021-01-05", "2021-02-05", "05/01/2021", "10/03/2021", "2021-01-05"],
            "total_cases" => &[100.0, 150.0, 40.0, 50.0, 10_000.0],
            "total_cases_per_million" => &[70.0, 105.0, 600.0, 1500.0, 1200.0],
            "total_deaths_per_million" => &[1.0, 2.0, 30.0, 10.0, 20.0],
            "new_cases_smoothed" => &[Some(10.0), Some(20.0), Some(5.0), None, Some(100.0)],
            "total_deaths" => &[2.0, 3.0, 1.0, 2.0, 99.0],
            "positive_rate" => &[Some(0.1), Some(0.2), Some(0.05), None, None],
            "new_deaths_smoothed" => &[1.0, 2.0, 0.5, 0.5, 50.0]
        )
        .unwrap();
        DataLoader::parse_dates(TableKind::Full, &mut df).unwrap();
        df
    }

    fn tables(full: DataFrame) -> CovidTables {
        let mut icu = df!(
            "continent" => &["Europe", "Asia", "Europe"],
            "location" => &["France", "India", "Italy"],
            "date" => &["2021-01-05", "2021-01-05", "2021-01-06"],
            "icu_patients_per_million" => &[12.0, 3.0, 40.0]
        )
        .unwrap();
        DataLoader::parse_dates(TableKind::Icu, &mut icu).unwrap();

        let mut testing = df!("location" => &["France"], "date" => &["2021-01-05"]).unwrap();
        DataLoader::parse_dates(TableKind::Testing, &mut testing).unwrap();
        let vaccination = testing.clone();

        let previews = [&full, &icu, &testing, &vaccination]
            .map(|df| DataLoader::preview(df, ReportConfig::default().preview_rows));
        CovidTables {
            full,
            icu,
            testing,
            vaccination,
            previews,
        }
    }

    #[test]
    fn builds_every_section_in_order() {
        let report = Report::build(&tables(full_table()), &ReportConfig::default());

        assert_eq!(report.datasets.len(), 4);
        assert_eq!(report.datasets[0].preview.rows.len(), 5);
        assert_eq!(report.sections.len(), 7);
        assert_eq!(report.failed_sections(), 0);
        let order: Vec<Analysis> = report.sections.iter().map(|s| s.analysis).collect();
        assert_eq!(order, Analysis::ALL.to_vec());
        assert_eq!(report.conclusion, insights::CONCLUSION);
    }

    #[test]
    fn pie_uses_continent_maxima() {
        let report = Report::build(&tables(full_table()), &ReportConfig::default());

        let Ok(ChartData::Pie(pie)) = &report.sections[0].chart else {
            panic!("expected pie chart");
        };
        let keys: Vec<&str> = pie.slices.iter().map(|s| s.key.as_str()).collect();
        assert_eq!(keys, vec!["Asia", "Europe"]);
        assert!((pie.slices[0].fraction - 0.75).abs() < 1e-12);
        assert_eq!(pie.start_angle, 140.0);
    }

    #[test]
    fn top_locations_respect_configured_n() {
        let config = ReportConfig {
            top_n: 2,
            ..ReportConfig::default()
        };
        let report = Report::build(&tables(full_table()), &config);

        let Ok(ChartData::Bar(bar)) = &report.sections[1].chart else {
            panic!("expected bar chart");
        };
        assert_eq!(bar.title, "Top 2 Countries by Total Cases per Million");
        assert_eq!(
            bar.bars,
            vec![
                ("San Marino".to_string(), 1500.0),
                ("World".to_string(), 1200.0)
            ]
        );
    }

    #[test]
    fn monthly_trend_and_icu_sections() {
        let report = Report::build(&tables(full_table()), &ReportConfig::default());

        let Ok(ChartData::Line(line)) = &report.sections[3].chart else {
            panic!("expected line chart");
        };
        let totals: Vec<f64> = line.points.iter().map(|p| p.total).collect();
        assert_eq!(totals, vec![115.0, 20.0, 0.0]);

        let Ok(ChartData::Bar(icu)) = &report.sections[6].chart else {
            panic!("expected bar chart");
        };
        assert_eq!(
            icu.bars,
            vec![("Europe".to_string(), 40.0), ("Asia".to_string(), 3.0)]
        );
    }

    #[test]
    fn scatter_sums_per_continent() {
        let report = Report::build(&tables(full_table()), &ReportConfig::default());

        let Ok(ChartData::Scatter(scatter)) = &report.sections[5].chart else {
            panic!("expected scatter chart");
        };
        assert_eq!(scatter.points.len(), 2);
        assert_eq!(scatter.points[1].label, "Europe");
        assert_eq!(scatter.points[1].x, 0.05);
        assert_eq!(scatter.points[1].y, 1.0);
    }

    #[test]
    fn broken_analysis_does_not_block_others() {
        let full = full_table().drop("positive_rate").unwrap();
        let report = Report::build(&tables(full), &ReportConfig::default());

        assert_eq!(report.failed_sections(), 1);
        let failed = &report.sections[5];
        assert_eq!(failed.analysis, Analysis::PositivityVsDeaths);
        assert_eq!(
            failed.chart.as_ref().unwrap_err(),
            "Column 'positive_rate' not found"
        );
        assert!(report.sections[6].chart.is_ok());
    }
}
