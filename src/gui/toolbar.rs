//! Toolbar Widget
//! Top bar with the report title, the export button and a status line.

use crate::report::REPORT_TITLE;
use egui::{Color32, RichText};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusKind {
    Info,
    Success,
    Error,
}

/// Top bar state: last status message shown next to the export button.
pub struct Toolbar {
    pub status: String,
    pub status_kind: StatusKind,
}

impl Default for Toolbar {
    fn default() -> Self {
        Self {
            status: "Ready".to_string(),
            status_kind: StatusKind::Info,
        }
    }
}

impl Toolbar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the toolbar
    pub fn show(&mut self, ui: &mut egui::Ui) -> ToolbarAction {
        let mut action = ToolbarAction::None;

        ui.add_space(5.0);
        ui.horizontal(|ui| {
            ui.label(
                RichText::new(REPORT_TITLE)
                    .size(22.0)
                    .color(Color32::from_rgb(100, 149, 237)),
            );

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let button = egui::Button::new(RichText::new("📄 Export HTML").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ToolbarAction::Export;
                }

                ui.add_space(8.0);
                let color = match self.status_kind {
                    StatusKind::Info => Color32::GRAY,
                    StatusKind::Success => Color32::from_rgb(40, 167, 69),
                    StatusKind::Error => Color32::from_rgb(220, 53, 69),
                };
                ui.label(RichText::new(&self.status).size(11.0).color(color));
            });
        });
        ui.add_space(5.0);

        action
    }

    pub fn set_status(&mut self, kind: StatusKind, status: impl Into<String>) {
        self.status_kind = kind;
        self.status = status.into();
    }
}

/// Actions triggered by the toolbar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolbarAction {
    None,
    Export,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_ready_and_tracks_status() {
        let mut toolbar = Toolbar::new();
        assert_eq!(toolbar.status, "Ready");
        assert_eq!(toolbar.status_kind, StatusKind::Info);

        toolbar.set_status(StatusKind::Error, "Export failed");
        assert_eq!(toolbar.status, "Export failed");
        assert_eq!(toolbar.status_kind, StatusKind::Error);
    }
}
