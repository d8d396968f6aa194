//! Control Panel Widget
//! Left side panel with the data source, axis pickers, export and status.

use crate::data::{Axis, AxisSelection, Metric};
use egui::{Color32, RichText};
use std::path::PathBuf;

/// Left side control panel with file selection and chart controls.
pub struct ControlPanel {
    pub csv_path: Option<PathBuf>,
    pub row_count: usize,
    pub status: String,
    pub export_enabled: bool,
}

impl Default for ControlPanel {
    fn default() -> Self {
        Self {
            csv_path: None,
            row_count: 0,
            status: "Ready".to_string(),
            export_enabled: false,
        }
    }
}

impl ControlPanel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, selection: Option<AxisSelection>) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        // Title
        ui.vertical_centered(|ui| {
            ui.add_space(5.0);
            ui.label(
                RichText::new("Health Scatter")
                    .size(22.0)
                    .color(Color32::from_rgb(70, 130, 180)),
            );
            ui.label(
                RichText::new("Demographics vs. Health Risks")
                    .size(11.0)
                    .color(Color32::GRAY),
            );
        });
        ui.add_space(10.0);
        ui.separator();
        ui.add_space(5.0);

        // ===== CSV File Section =====
        ui.label(RichText::new("📁 Data Source").size(14.0).strong());
        ui.add_space(5.0);

        egui::Frame::none()
            .fill(ui.visuals().widgets.noninteractive.bg_fill)
            .rounding(5.0)
            .inner_margin(8.0)
            .show(ui, |ui| {
                ui.horizontal(|ui| {
                    let path_text = self
                        .csv_path
                        .as_ref()
                        .and_then(|p| p.file_name())
                        .map(|n| n.to_string_lossy().to_string())
                        .unwrap_or_else(|| "No file selected".to_string());

                    ui.label(RichText::new(&path_text).size(12.0).color(
                        if self.csv_path.is_some() {
                            ui.visuals().strong_text_color()
                        } else {
                            Color32::GRAY
                        },
                    ));

                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("📂 Browse").clicked() {
                            action = ControlPanelAction::BrowseCsv;
                        }
                        if self.csv_path.is_some() && ui.button("⟳").on_hover_text("Reload").clicked() {
                            action = ControlPanelAction::ReloadCsv;
                        }
                    });
                });
                if self.row_count > 0 {
                    ui.label(RichText::new(format!("{} regions", self.row_count)).size(11.0));
                }
            });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Axis Section =====
        ui.label(RichText::new("⚙️ Axes").size(14.0).strong());
        ui.add_space(5.0);

        match selection {
            Some(selection) => {
                for (axis, title) in [(Axis::X, "X axis"), (Axis::Y, "Y axis")] {
                    ui.label(RichText::new(title).size(12.0));
                    for metric in Metric::for_axis(axis) {
                        if ui
                            .radio(selection.is_active(metric), metric.axis_label())
                            .clicked()
                        {
                            action = ControlPanelAction::SelectMetric(metric);
                        }
                    }
                    ui.add_space(5.0);
                }
            }
            None => {
                ui.label(RichText::new("Load a CSV to choose axes").color(Color32::GRAY));
            }
        }

        ui.add_space(10.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Action Buttons =====
        ui.vertical_centered(|ui| {
            ui.add_enabled_ui(self.export_enabled, |ui| {
                let button = egui::Button::new(RichText::new("📄 Export SVG").size(14.0))
                    .min_size(egui::vec2(150.0, 30.0));
                if ui.add(button).clicked() {
                    action = ControlPanelAction::ExportSvg;
                }
            });
        });

        ui.add_space(15.0);
        ui.separator();
        ui.add_space(10.0);

        // ===== Status Section =====
        let status_color = if self.status.starts_with("Error") {
            Color32::from_rgb(220, 53, 69)
        } else if self.status.starts_with("Loaded") || self.status.starts_with("Exported") {
            Color32::from_rgb(40, 167, 69)
        } else {
            Color32::GRAY
        };
        ui.label(RichText::new(&self.status).size(11.0).color(status_color));

        action
    }

    /// Set status line
    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }
}

/// Actions triggered by control panel
#[derive(Debug, Clone, PartialEq)]
pub enum ControlPanelAction {
    None,
    BrowseCsv,
    ReloadCsv,
    SelectMetric(Metric),
    ExportSvg,
}
