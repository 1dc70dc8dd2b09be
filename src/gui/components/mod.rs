//! Control panel sections
//!
//! Each section reads the current configuration and returns a `ConfigPatch`
//! describing what the user changed this frame (empty when nothing did).

pub mod action_buttons;
pub mod background_image_controls;
pub mod device_selector;
pub mod fullscreen_overlay;
pub mod gradient_controls;
pub mod preset_gradients;
pub mod shadow_controls;
pub mod website_settings;

use std::ops::RangeInclusive;

use eframe::egui;

/// Labelled float slider; returns the new value when it moved
pub(crate) fn slider_f64(
    ui: &mut egui::Ui,
    label: &str,
    value: f64,
    range: RangeInclusive<f64>,
    step: f64,
    suffix: &str,
    enabled: bool,
) -> Option<f64> {
    let mut edited = value;
    let response = ui
        .horizontal(|ui| {
            ui.label(label);
            ui.add_enabled(
                enabled,
                egui::Slider::new(&mut edited, range).step_by(step).suffix(suffix),
            )
        })
        .inner;
    (response.changed() && edited != value).then_some(edited)
}

/// Labelled integer slider; returns the new value when it moved
pub(crate) fn slider_i32(
    ui: &mut egui::Ui,
    label: &str,
    value: i32,
    range: RangeInclusive<i32>,
    step: f64,
    suffix: &str,
    enabled: bool,
) -> Option<i32> {
    let mut edited = value;
    let response = ui
        .horizontal(|ui| {
            ui.label(label);
            ui.add_enabled(
                enabled,
                egui::Slider::new(&mut edited, range).step_by(step).suffix(suffix),
            )
        })
        .inner;
    (response.changed() && edited != value).then_some(edited)
}

/// Section heading inside a group, as every panel section starts
pub(crate) fn heading(ui: &mut egui::Ui, text: &str) {
    ui.label(egui::RichText::new(text).strong());
    ui.add_space(super::constants::ITEM_SPACING);
}
