//! COVID-19 Analysis Dashboard
//!
//! Loads the four pandemic CSV tables, runs a fixed set of analyses and shows
//! them as one scrolling report with interactive charts.

mod charts;
mod config;
mod data;
mod export;
mod gui;
mod report;
mod stats;

use anyhow::{Context, Result};
use config::{ReportConfig, CONFIG_FILE};
use data::DataLoader;
use eframe::egui;
use gui::DashboardApp;
use report::{Report, REPORT_TITLE};
use std::path::Path;
use tracing::{error, info, warn};
use tracing_subscriber::{fmt, EnvFilter};

fn main() -> Result<()> {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt::Subscriber::builder().with_env_filter(env).init();
    info!("startup");

    let report = build_report().inspect_err(|e| error!("{:#}", e))?;
    if report.failed_sections() > 0 {
        warn!(
            failed = report.failed_sections(),
            "some analyses failed; showing the rest"
        );
    }

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 900.0])
            .with_min_inner_size([900.0, 600.0])
            .with_title(REPORT_TITLE),
        ..Default::default()
    };

    eframe::run_native(
        "covid_dashboard",
        options,
        Box::new(|cc| Ok(Box::new(DashboardApp::new(cc, report)))),
    )
    .map_err(|e| anyhow::anyhow!("window error: {}", e))
}

/// Load configuration and all tables, then run every analysis.
fn build_report() -> Result<Report> {
    let config = ReportConfig::load(Path::new(CONFIG_FILE))
        .with_context(|| format!("load configuration from {}", CONFIG_FILE))?;
    info!(data_dir = %config.data_dir.display(), "configuration loaded");

    let tables = DataLoader::load_all(&config).context("load input tables")?;
    let report = Report::build(&tables, &config);
    info!(
        sections = report.sections.len(),
        failed = report.failed_sections(),
        "report built"
    );
    Ok(report)
}
