use eframe::egui;

use crate::gui::constants::ITEM_SPACING;

/// What the user asked for in the actions section
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    None,
    ToggleFullscreen,
    ToggleDarkMode,
    RefreshContent,
    ResetSettings,
}

/// State for the actions section
#[derive(Default)]
pub struct ActionButtons {
    show_reset_confirm: bool,
}

impl ActionButtons {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ui(&mut self, ui: &mut egui::Ui, is_fullscreen: bool, is_dark_mode: bool) -> Action {
        let mut action = Action::None;

        ui.group(|ui| {
            super::heading(ui, "Actions");

            let fullscreen_label = if is_fullscreen { "⛶ Exit Fullscreen" } else { "⛶ Enter Fullscreen" };
            if ui.add_sized([ui.available_width(), 0.0], egui::Button::new(fullscreen_label)).clicked() {
                action = Action::ToggleFullscreen;
            }

            let theme_label = if is_dark_mode { "☀ Light Mode" } else { "🌙 Dark Mode" };
            if ui.add_sized([ui.available_width(), 0.0], egui::Button::new(theme_label)).clicked() {
                action = Action::ToggleDarkMode;
            }

            if ui.add_sized([ui.available_width(), 0.0], egui::Button::new("🔄 Refresh Content")).clicked() {
                action = Action::RefreshContent;
            }

            ui.add_space(ITEM_SPACING);
            let reset = egui::Button::new(egui::RichText::new("Reset All Settings").color(egui::Color32::WHITE))
                .fill(egui::Color32::from_rgb(180, 40, 40));
            if ui.add_sized([ui.available_width(), 0.0], reset).clicked() {
                self.show_reset_confirm = true;
            }
        });

        if self.show_reset_confirm {
            action = self.reset_confirm_dialog(ui.ctx()).unwrap_or(action);
        }

        action
    }

    fn reset_confirm_dialog(&mut self, ctx: &egui::Context) -> Option<Action> {
        let mut action = None;

        egui::Window::new("Reset All Settings")
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label("Restore every setting to its default value?");
                ui.add_space(ITEM_SPACING);
                ui.label(
                    egui::RichText::new("The saved settings file is removed as well.")
                        .small()
                        .weak(),
                );
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("Yes, Reset").clicked() {
                        action = Some(Action::ResetSettings);
                        self.show_reset_confirm = false;
                    }
                    if ui.button("Cancel").clicked() {
                        self.show_reset_confirm = false;
                    }
                });
            });

        action
    }
}
