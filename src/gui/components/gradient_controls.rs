//! Gradient colors and direction

use eframe::egui;

use crate::color::HexColor;
use crate::config::settings::Gradient;
use crate::config::{ConfigPatch, GradientDirection, GradientPatch};
use crate::gui::constants::{ITEM_SPACING, SWATCH_HEIGHT};
use crate::gui::paint;
use crate::render::LinearGradient;

/// Arrow pointing where the gradient ends, CSS angle convention
pub fn direction_arrow(direction: GradientDirection) -> &'static str {
    match direction {
        GradientDirection::Deg0 => "↑",
        GradientDirection::Deg45 => "↗",
        GradientDirection::Deg90 => "→",
        GradientDirection::Deg135 => "↘",
        GradientDirection::Deg180 => "↓",
        GradientDirection::Deg270 => "←",
    }
}

pub fn direction_label(direction: GradientDirection) -> String {
    let kind = match direction {
        GradientDirection::Deg0 | GradientDirection::Deg180 => "Vertical",
        GradientDirection::Deg90 | GradientDirection::Deg270 => "Horizontal",
        GradientDirection::Deg45 | GradientDirection::Deg135 => "Diagonal",
    };
    format!("{kind} {} ({}°)", direction_arrow(direction), direction.degrees())
}

/// Renders color pickers, direction choice and a preview swatch
pub fn ui(ui: &mut egui::Ui, gradient: &Gradient) -> ConfigPatch {
    let mut colors = GradientPatch::default();
    let mut direction_change = None;

    ui.group(|ui| {
        super::heading(ui, "Gradient Background");

        colors.start_color = color_row(ui, "Start Color:", &gradient.start_color);
        colors.end_color = color_row(ui, "End Color:", &gradient.end_color);

        ui.add_space(ITEM_SPACING);
        ui.horizontal(|ui| {
            ui.label("Direction:");
            let mut selected = gradient.direction;
            egui::ComboBox::from_id_salt("gradient_direction")
                .selected_text(direction_label(selected))
                .show_ui(ui, |ui| {
                    for direction in GradientDirection::ALL {
                        ui.selectable_value(&mut selected, direction, direction_label(direction));
                    }
                });
            if selected != gradient.direction {
                direction_change = Some(selected);
            }
        });

        ui.horizontal(|ui| {
            ui.label("Quick Direction:");
            for direction in GradientDirection::ALL {
                let button = egui::Button::new(direction_arrow(direction)).selected(direction == gradient.direction);
                if ui.add(button).on_hover_text(direction_label(direction)).clicked() && direction != gradient.direction {
                    direction_change = Some(direction);
                }
            }
        });

        ui.add_space(ITEM_SPACING);
        let (rect, _) = ui.allocate_exact_size(egui::vec2(ui.available_width(), SWATCH_HEIGHT), egui::Sense::hover());
        paint::paint_gradient(ui.painter(), rect, &LinearGradient::from_settings(gradient));
    });

    gradient_patch(colors, direction_change)
}

/// Color edits and a direction change folded into one patch
fn gradient_patch(colors: GradientPatch, direction: Option<GradientDirection>) -> ConfigPatch {
    let patch = if colors == GradientPatch::default() {
        ConfigPatch::default()
    } else {
        ConfigPatch::gradient(colors)
    };
    match direction {
        Some(direction) => patch.merge(ConfigPatch::gradient_direction(direction)),
        None => patch,
    }
}

/// Hex text field plus picker; returns the new color text when edited
fn color_row(ui: &mut egui::Ui, label: &str, current: &str) -> Option<String> {
    let mut result = None;

    ui.horizontal(|ui| {
        ui.label(label);

        let mut text = current.to_string();
        let edit = egui::TextEdit::singleline(&mut text).desired_width(90.0);
        if ui.add(edit).changed() {
            result = Some(text);
        }

        // Picker only when the text parses; invalid text keeps painting the default
        if let Some(color) = HexColor::parse(current) {
            let mut rgba = egui::Color32::from_rgb(color.r, color.g, color.b);
            if ui.color_edit_button_srgba(&mut rgba).changed() {
                result = Some(HexColor::new(rgba.r(), rgba.g(), rgba.b()).to_hex_string());
            }
        } else {
            ui.colored_label(crate::gui::constants::STATUS_ERROR, "⚠")
                .on_hover_text("Not a hex color");
        }
    });

    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arrows_follow_css_angles() {
        assert_eq!(direction_arrow(GradientDirection::Deg0), "↑");
        assert_eq!(direction_arrow(GradientDirection::Deg90), "→");
        assert_eq!(direction_arrow(GradientDirection::Deg180), "↓");
        assert_eq!(direction_arrow(GradientDirection::Deg270), "←");
    }

    #[test]
    fn test_color_and_direction_edits_combine() {
        let colors = GradientPatch { start_color: Some("#000000".to_string()), ..GradientPatch::default() };
        let patch = gradient_patch(colors, Some(GradientDirection::Deg90));
        let next = crate::config::Configuration::default().with_patch(&patch);
        assert_eq!(next.gradient.start_color, "#000000");
        assert_eq!(next.gradient.end_color, "#a8e6cf");
        assert_eq!(next.gradient.direction, GradientDirection::Deg90);

        assert!(gradient_patch(GradientPatch::default(), None).is_empty());
    }

    #[test]
    fn test_direction_label() {
        assert_eq!(direction_label(GradientDirection::Deg135), "Diagonal ↘ (135°)");
        assert_eq!(direction_label(GradientDirection::Deg270), "Horizontal ← (270°)");
    }
}
