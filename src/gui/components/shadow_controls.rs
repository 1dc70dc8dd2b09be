use eframe::egui;

use crate::config::settings::ShadowSettings;
use crate::config::{ConfigPatch, ShadowPatch};
use crate::constants::limits;
use crate::gui::constants::steps;

/// Renders the shadow toggle, plus its sliders while enabled
pub fn ui(ui: &mut egui::Ui, shadow: &ShadowSettings) -> ConfigPatch {
    let mut patch = ShadowPatch::default();

    ui.group(|ui| {
        super::heading(ui, "Shadow Effects");

        let mut enabled = shadow.enabled;
        if ui.checkbox(&mut enabled, "Enable Shadow").changed() {
            patch.enabled = Some(enabled);
        }

        if shadow.enabled {
            ui.indent("shadow_settings", |ui| {
                patch = ShadowPatch { enabled: patch.enabled, ..sliders(ui, shadow) };
            });
        }

        ui.label(
            egui::RichText::new("Add realistic shadows to enhance the mockup")
                .small()
                .weak(),
        );
    });

    if patch == ShadowPatch::default() {
        ConfigPatch::default()
    } else {
        ConfigPatch::shadow(patch)
    }
}

/// Blur, spread and opacity sliders
pub fn sliders(ui: &mut egui::Ui, shadow: &ShadowSettings) -> ShadowPatch {
    let blur_px = super::slider_i32(
        ui,
        "Blur:",
        shadow.blur_px,
        limits::SHADOW_BLUR_PX,
        steps::SHADOW_BLUR_PX,
        " px",
        true,
    );
    let spread_px = super::slider_i32(
        ui,
        "Spread:",
        shadow.spread_px,
        limits::SHADOW_SPREAD_PX,
        steps::SHADOW_SPREAD_PX,
        " px",
        true,
    );
    // Shown in percent, stored as a fraction
    let opacity = super::slider_f64(
        ui,
        "Opacity:",
        shadow.opacity * 100.0,
        0.0..=100.0,
        steps::SHADOW_OPACITY * 100.0,
        "%",
        true,
    )
    .map(|percent| percent / 100.0);

    ShadowPatch { enabled: None, blur_px, spread_px, opacity }
}
