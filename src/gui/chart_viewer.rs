//! Chart Viewer Widget
//! One card per report section: heading, interactive chart and insight text.

use crate::charts::ChartPlotter;
use crate::report::{insights, ReportSection};
use egui::{Color32, RichText};

const CARD_SPACING: f32 = 15.0;
const ERROR_COLOR: Color32 = Color32::from_rgb(220, 53, 69);

pub struct ChartViewer;

impl ChartViewer {
    /// Draw one section card. `index` keeps plot ids unique.
    pub fn show_section(ui: &mut egui::Ui, index: usize, section: &ReportSection) {
        ui.label(RichText::new(section.heading()).size(20.0).strong());
        ui.add_space(6.0);

        egui::Frame::none()
            .rounding(8.0)
            .stroke(egui::Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color))
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .inner_margin(12.0)
            .show(ui, |ui| {
                match &section.chart {
                    Ok(chart) => ChartPlotter::draw(ui, &format!("section_{}", index), chart),
                    Err(e) => {
                        ui.label(
                            RichText::new(format!("⚠ Analysis failed: {}", e))
                                .size(14.0)
                                .color(ERROR_COLOR),
                        );
                    }
                }

                ui.add_space(8.0);
                ui.label(RichText::new("Insight").size(15.0).strong());
                Self::paragraphs(ui, section.insight());
            });

        ui.add_space(CARD_SPACING);
    }

    /// Narrative text, one label per paragraph.
    pub fn paragraphs(ui: &mut egui::Ui, text: &str) {
        for paragraph in insights::paragraphs(text) {
            ui.label(paragraph);
            ui.add_space(4.0);
        }
    }
}
