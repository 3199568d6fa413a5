//! Control Panel Widget
//! Left sidebar with choice widgets and action buttons.

use crate::selection::Choice;
use egui::{Color32, ComboBox, RichText};

/// Actions triggered by control panel
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlPanelAction {
    None,
    SelectionChanged,
    OpenInBrowser,
    ExportCharts,
}

/// Sidebar with a header, one combo box per choice and optional buttons.
pub struct ControlPanel {
    header: String,
    buttons: Vec<(String, ControlPanelAction)>,
    pub status: String,
}

impl ControlPanel {
    pub fn new(header: &str) -> Self {
        Self {
            header: header.to_string(),
            buttons: Vec::new(),
            status: String::new(),
        }
    }

    pub fn with_button(mut self, label: &str, action: ControlPanelAction) -> Self {
        self.buttons.push((label.to_string(), action));
        self
    }

    pub fn set_status(&mut self, status: &str) {
        self.status = status.to_string();
    }

    /// Draw the control panel
    pub fn show(&mut self, ui: &mut egui::Ui, choices: &mut [&mut Choice]) -> ControlPanelAction {
        let mut action = ControlPanelAction::None;

        ui.add_space(5.0);
        ui.label(RichText::new(&self.header).size(16.0).strong());
        ui.add_space(8.0);
        ui.separator();
        ui.add_space(5.0);

        for choice in choices.iter_mut() {
            if Self::choice_combo(ui, choice) {
                action = ControlPanelAction::SelectionChanged;
            }
            ui.add_space(8.0);
        }

        if !self.buttons.is_empty() {
            ui.separator();
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                for (label, button_action) in &self.buttons {
                    let button = egui::Button::new(RichText::new(label).size(14.0))
                        .min_size(egui::vec2(180.0, 30.0));
                    if ui.add(button).clicked() {
                        action = *button_action;
                    }
                    ui.add_space(6.0);
                }
            });
        }

        if !self.status.is_empty() {
            ui.add_space(10.0);
            let color = if self.status.starts_with("Error") {
                Color32::from_rgb(220, 53, 69)
            } else {
                Color32::GRAY
            };
            ui.label(RichText::new(&self.status).size(11.0).color(color));
        }

        action
    }

    /// Combo box over a choice's domain. Returns true when the pick changed.
    fn choice_combo(ui: &mut egui::Ui, choice: &mut Choice) -> bool {
        let mut picked = None;
        ui.label(choice.name());
        ComboBox::from_id_salt(choice.name().to_string())
            .width(ui.available_width())
            .selected_text(choice.current().to_string())
            .show_ui(ui, |ui| {
                for (i, value) in choice.domain().iter().enumerate() {
                    let selected = i == choice.selected_index();
                    if ui.selectable_label(selected, value.to_string()).clicked() && !selected {
                        picked = Some(i);
                    }
                }
            });

        match picked {
            Some(index) => choice.select_index(index),
            None => false,
        }
    }
}
