use eframe::egui;

use crate::config::settings::Gradient;
use crate::config::ConfigPatch;
use crate::gui::constants::{PRESET_COLUMNS, PRESET_TILE_HEIGHT};
use crate::gui::paint;
use crate::render::LinearGradient;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GradientPreset {
    pub name: &'static str,
    pub start: &'static str,
    pub end: &'static str,
}

pub const PRESETS: [GradientPreset; 6] = [
    GradientPreset { name: "Ocean", start: "#667eea", end: "#764ba2" },
    GradientPreset { name: "Sunset", start: "#ff9a9e", end: "#fecfef" },
    GradientPreset { name: "Forest", start: "#56ab2f", end: "#a8e6cf" },
    GradientPreset { name: "Fire", start: "#ff512f", end: "#f09819" },
    GradientPreset { name: "Purple", start: "#667eea", end: "#764ba2" },
    GradientPreset { name: "Pink", start: "#ffecd2", end: "#fcb69f" },
];

impl GradientPreset {
    /// Replace both colors, keeping the current direction
    pub fn patch(&self) -> ConfigPatch {
        ConfigPatch::gradient_colors(self.start, self.end)
    }
}

/// Renders the preset tiles, each painted with its own gradient
pub fn ui(ui: &mut egui::Ui, gradient: &Gradient) -> ConfigPatch {
    let mut patch = ConfigPatch::default();

    ui.group(|ui| {
        super::heading(ui, "Quick Presets");

        egui::Grid::new("gradient_presets")
            .num_columns(PRESET_COLUMNS)
            .spacing([6.0, 6.0])
            .show(ui, |ui| {
                let tile_width = (ui.available_width() / PRESET_COLUMNS as f32 - 6.0).max(40.0);
                for (i, preset) in PRESETS.iter().enumerate() {
                    let (rect, response) =
                        ui.allocate_exact_size(egui::vec2(tile_width, PRESET_TILE_HEIGHT), egui::Sense::click());
                    let tile = LinearGradient {
                        angle_degrees: gradient.direction.degrees(),
                        start_color: preset.start.to_string(),
                        end_color: preset.end.to_string(),
                    };
                    paint::paint_gradient(ui.painter(), rect, &tile);

                    let active = gradient.start_color.eq_ignore_ascii_case(preset.start)
                        && gradient.end_color.eq_ignore_ascii_case(preset.end);
                    if active || response.hovered() {
                        ui.painter().rect_stroke(
                            rect,
                            egui::CornerRadius::same(4),
                            egui::Stroke::new(2.0, egui::Color32::WHITE),
                            egui::StrokeKind::Inside,
                        );
                    }
                    ui.painter().text(
                        rect.center(),
                        egui::Align2::CENTER_CENTER,
                        preset.name,
                        egui::FontId::proportional(13.0),
                        egui::Color32::WHITE,
                    );

                    if response.clicked() {
                        patch = preset.patch();
                    }
                    if (i + 1) % PRESET_COLUMNS == 0 {
                        ui.end_row();
                    }
                }
            });
    });

    patch
}
