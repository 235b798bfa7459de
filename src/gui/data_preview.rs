//! Dataset preview: first rows of each table and its summary statistics.

use crate::data::TablePreview;
use crate::report::DatasetSection;
use crate::stats::ColumnSummary;
use egui::{Color32, RichText, ScrollArea};

pub struct DataPreview;

impl DataPreview {
    pub fn show(ui: &mut egui::Ui, dataset: &DatasetSection) {
        let id = dataset.table.to_string();

        ui.horizontal(|ui| {
            ui.label(RichText::new(dataset.table.label()).size(15.0).strong());
            ui.label(
                RichText::new(format!(
                    "{} rows, {} columns",
                    dataset.preview.total_rows,
                    dataset.preview.columns.len()
                ))
                .size(11.0)
                .color(Color32::GRAY),
            );
        });

        Self::preview_grid(ui, &id, &dataset.preview);

        egui::CollapsingHeader::new("Summary statistics")
            .id_salt(format!("summary_{}", id))
            .show(ui, |ui| {
                let rows: Vec<Vec<String>> =
                    dataset.summary.iter().map(ColumnSummary::cells).collect();
                Self::grid(ui, &format!("summary_grid_{}", id), &ColumnSummary::HEADERS[..], &rows);
            });
        ui.add_space(10.0);
    }

    fn preview_grid(ui: &mut egui::Ui, id: &str, preview: &TablePreview) {
        Self::grid(ui, &format!("preview_grid_{}", id), preview.columns.as_slice(), &preview.rows);
    }

    fn grid<S: AsRef<str>>(ui: &mut egui::Ui, id: &str, headers: &[S], rows: &[Vec<String>]) {
        ScrollArea::horizontal().id_salt(format!("{}_scroll", id)).show(ui, |ui| {
            egui::Grid::new(id).striped(true).show(ui, |ui| {
                for header in headers {
                    ui.label(RichText::new(header.as_ref()).strong());
                }
                ui.end_row();

                for row in rows {
                    for cell in row {
                        ui.label(cell.as_str());
                    }
                    ui.end_row();
                }
            });
        });
    }
}
