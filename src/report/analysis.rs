//! The fixed sequence of chart analyses.

use crate::charts::{BarData, ChartData, LineData, Palette, PieData, ScatterData, ScatterPoint};
use crate::data::{CovidTables, DataProcessor, GroupValue, ProcessorError, DATE_COLUMN};
use crate::report::insights;

const CONTINENT: &str = "continent";
const LOCATION: &str = "location";

/// Angle of the first wedge, degrees counterclockwise from +x.
const PIE_START_ANGLE: f64 = 140.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    CasesByContinent,
    CasesPerMillion,
    DeathsPerMillion,
    MonthlyTrend,
    DeathRate,
    PositivityVsDeaths,
    IcuByContinent,
}

impl Analysis {
    /// Display order, top to bottom.
    pub const ALL: [Analysis; 7] = [
        Analysis::CasesByContinent,
        Analysis::CasesPerMillion,
        Analysis::DeathsPerMillion,
        Analysis::MonthlyTrend,
        Analysis::DeathRate,
        Analysis::PositivityVsDeaths,
        Analysis::IcuByContinent,
    ];

    pub fn heading(self) -> &'static str {
        match self {
            Analysis::CasesByContinent => "🌍 Total COVID-19 Cases by Continent",
            Analysis::CasesPerMillion => "📊 Top 10 Countries by Total Cases",
            Analysis::DeathsPerMillion => "📊 Top 10 Countries by Total Deaths",
            Analysis::MonthlyTrend => "📈 Monthly Trend",
            Analysis::DeathRate => "🩺 How Deadly Was COVID-19 Across Continents",
            Analysis::PositivityVsDeaths => "🔬 Positive Rate VS Death Rate",
            Analysis::IcuByContinent => "🚑 ICU Patients Across Continents",
        }
    }

    pub fn insight(self) -> &'static str {
        match self {
            Analysis::CasesByContinent => insights::CASES_BY_CONTINENT,
            Analysis::CasesPerMillion => insights::CASES_PER_MILLION,
            Analysis::DeathsPerMillion => insights::DEATHS_PER_MILLION,
            Analysis::MonthlyTrend => insights::MONTHLY_TREND,
            Analysis::DeathRate => insights::DEATH_RATE,
            Analysis::PositivityVsDeaths => insights::POSITIVITY_VS_DEATHS,
            Analysis::IcuByContinent => insights::ICU_BY_CONTINENT,
        }
    }

    /// Aggregate the loaded tables into this analysis's chart.
    pub fn run(self, tables: &CovidTables, top_n: usize) -> Result<ChartData, ProcessorError> {
        match self {
            Analysis::CasesByContinent => cases_by_continent(tables),
            Analysis::CasesPerMillion => top_locations(
                tables,
                top_n,
                "total_cases_per_million",
                "Total Cases per Million",
                Palette::Viridis,
            ),
            Analysis::DeathsPerMillion => top_locations(
                tables,
                top_n,
                "total_deaths_per_million",
                "Total Deaths per Million",
                Palette::Magma,
            ),
            Analysis::MonthlyTrend => monthly_trend(tables),
            Analysis::DeathRate => death_rate(tables),
            Analysis::PositivityVsDeaths => positivity_vs_deaths(tables),
            Analysis::IcuByContinent => icu_by_continent(tables, top_n),
        }
    }
}

fn present_bars(rows: Vec<GroupValue>) -> Vec<(String, f64)> {
    rows.into_iter()
        .filter_map(|r| r.value.map(|v| (r.key, v)))
        .collect()
}

fn cases_by_continent(tables: &CovidTables) -> Result<ChartData, ProcessorError> {
    let maxima = DataProcessor::group_max(&tables.full, CONTINENT, "total_cases")?;
    let slices = DataProcessor::pie_shares(&maxima)?;

    Ok(ChartData::Pie(PieData {
        title: "Total COVID-19 Cases by Continent".to_string(),
        slices,
        start_angle: PIE_START_ANGLE,
        palette: Palette::Tab10,
    }))
}

fn top_locations(
    tables: &CovidTables,
    top_n: usize,
    metric: &str,
    y_label: &str,
    palette: Palette,
) -> Result<ChartData, ProcessorError> {
    let maxima = DataProcessor::group_max(&tables.full, LOCATION, metric)?;
    let bars = present_bars(DataProcessor::top_n(maxima, top_n));

    Ok(ChartData::Bar(BarData {
        title: format!("Top {top_n} Countries by {y_label}"),
        x_label: "Country".to_string(),
        y_label: y_label.to_string(),
        bars,
        palette,
        rotate_labels: true,
    }))
}

fn monthly_trend(tables: &CovidTables) -> Result<ChartData, ProcessorError> {
    let points = DataProcessor::monthly_sum(&tables.full, DATE_COLUMN, "new_cases_smoothed")?;

    Ok(ChartData::Line(LineData {
        title: "Monthly COVID-19 Cases Trend".to_string(),
        x_label: "Year".to_string(),
        y_label: "New Cases".to_string(),
        points,
    }))
}

fn death_rate(tables: &CovidTables) -> Result<ChartData, ProcessorError> {
    let rates =
        DataProcessor::death_rates(&tables.full, CONTINENT, "total_deaths", "total_cases")?;

    Ok(ChartData::Bar(BarData {
        title: "Total Cases VS Deaths".to_string(),
        x_label: "Continent".to_string(),
        y_label: "Death Rate".to_string(),
        bars: rates.into_iter().map(|r| (r.key, r.rate)).collect(),
        palette: Palette::Mako,
        rotate_labels: false,
    }))
}

fn positivity_vs_deaths(tables: &CovidTables) -> Result<ChartData, ProcessorError> {
    let sums = DataProcessor::group_sums(
        &tables.full,
        CONTINENT,
        &["positive_rate", "new_deaths_smoothed"],
    )?;

    Ok(ChartData::Scatter(ScatterData {
        title: "Relation between COVID Positive rate and Total Deaths".to_string(),
        x_label: "Average Test Positivity Rate".to_string(),
        y_label: "Total COVID-19 Deaths".to_string(),
        points: sums
            .into_iter()
            .map(|row| ScatterPoint {
                label: row.key,
                x: row.sums[0],
                y: row.sums[1],
            })
            .collect(),
        palette: Palette::Tab10,
    }))
}

fn icu_by_continent(tables: &CovidTables, top_n: usize) -> Result<ChartData, ProcessorError> {
    let maxima = DataProcessor::group_max(&tables.icu, CONTINENT, "icu_patients_per_million")?;
    let bars = present_bars(DataProcessor::top_n(maxima, top_n));

    Ok(ChartData::Bar(BarData {
        title: "ICU Patients Across Continents".to_string(),
        x_label: "Continent".to_string(),
        y_label: "ICU Patients per Million".to_string(),
        bars,
        palette: Palette::Cividis,
        rotate_labels: true,
    }))
}
