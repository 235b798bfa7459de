//! Dashboard Main Application
//! Single scrolling page: dataset previews, chart sections and conclusion.

use crate::export;
use crate::gui::{ChartViewer, DataPreview, StatusKind, Toolbar, ToolbarAction};
use crate::report::Report;
use anyhow::Context;
use egui::{RichText, ScrollArea, TopBottomPanel};
use std::path::{Path, PathBuf};

/// Main application window.
pub struct DashboardApp {
    report: Report,
    toolbar: Toolbar,
}

impl DashboardApp {
    pub fn new(_cc: &eframe::CreationContext<'_>, report: Report) -> Self {
        let mut toolbar = Toolbar::new();
        let failed = report.failed_sections();
        if failed > 0 {
            toolbar.set_status(
                StatusKind::Error,
                format!("{} of {} analyses failed", failed, report.sections.len()),
            );
        }

        Self { report, toolbar }
    }

    /// Ask for a folder, export into it and open the page.
    fn handle_export(&mut self) {
        let Some(dir) = rfd::FileDialog::new()
            .set_title("Export report to folder")
            .pick_folder()
        else {
            return;
        };

        match self.export_to(&dir) {
            Ok(page) => {
                self.toolbar
                    .set_status(StatusKind::Success, format!("Exported to {}", page.display()));
            }
            Err(e) => {
                tracing::error!(error = %format!("{:#}", e), "export failed");
                self.toolbar
                    .set_status(StatusKind::Error, format!("Export error: {:#}", e));
            }
        }
    }

    fn export_to(&self, dir: &Path) -> anyhow::Result<PathBuf> {
        let page = export::export_report(&self.report, dir)
            .with_context(|| format!("export report to {}", dir.display()))?;
        open::that(&page).with_context(|| format!("open {}", page.display()))?;
        Ok(page)
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("toolbar").show(ctx, |ui| {
            if self.toolbar.show(ui) == ToolbarAction::Export {
                self.handle_export();
            }
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ScrollArea::vertical()
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    ui.label(RichText::new("📁 Dataset Preview").size(20.0).strong());
                    ui.add_space(8.0);
                    for dataset in &self.report.datasets {
                        DataPreview::show(ui, dataset);
                    }
                    ui.separator();
                    ui.add_space(10.0);

                    for (index, section) in self.report.sections.iter().enumerate() {
                        ChartViewer::show_section(ui, index, section);
                    }

                    ui.separator();
                    ui.label(RichText::new("✅ Conclusion").size(20.0).strong());
                    ui.add_space(6.0);
                    ChartViewer::paragraphs(ui, self.report.conclusion);
                });
        });
    }
}
