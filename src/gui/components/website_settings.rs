//! Website URL and per-device content settings

use eframe::egui;

use crate::config::{ConfigPatch, Configuration, DeviceKind, DevicePatch};
use crate::constants::limits;
use crate::gui::constants::{ITEM_SPACING, steps};
use crate::render::style::looks_like_url;

/// Renders the URL field and the sliders of every visible device.
/// With `url_editable` false the URL is shown read-only.
pub fn ui(ui: &mut egui::Ui, config: &Configuration, url_editable: bool) -> ConfigPatch {
    let mut patch = ConfigPatch::default();

    ui.group(|ui| {
        super::heading(ui, "Website Settings");

        ui.label("Website URL:");
        let mut url = config.website_url.clone();
        let edit = egui::TextEdit::singleline(&mut url)
            .hint_text("https://example.com")
            .desired_width(f32::INFINITY);
        if ui.add_enabled(url_editable, edit).changed() {
            patch = std::mem::take(&mut patch).merge(ConfigPatch::website_url(url));
        }
        if !looks_like_url(&config.website_url) {
            ui.label(
                egui::RichText::new("Not a valid http(s) URL, showing a placeholder")
                    .small()
                    .color(crate::gui::constants::STATUS_ERROR),
            );
        }

        for &kind in config.active_device.devices() {
            ui.add_space(ITEM_SPACING);
            let device_patch = device_sliders(ui, config, kind, config.active_device.devices().len() > 1);
            if device_patch != DevicePatch::default() {
                patch = std::mem::take(&mut patch).merge(ConfigPatch::device(kind, device_patch));
            }
        }
    });

    patch
}

/// Content scale, corner radius and device scale of one device
pub fn device_sliders(ui: &mut egui::Ui, config: &Configuration, kind: DeviceKind, show_name: bool) -> DevicePatch {
    let settings = config.device(kind);
    let mut patch = DevicePatch::default();

    if show_name {
        ui.label(egui::RichText::new(kind.label()).italics());
    }

    patch.content_scale = super::slider_f64(
        ui,
        "Content Scale:",
        settings.content_scale,
        limits::CONTENT_SCALE,
        steps::CONTENT_SCALE,
        "x",
        true,
    );
    patch.corner_radius_px = super::slider_i32(
        ui,
        "Corner Radius:",
        settings.corner_radius_px,
        limits::CORNER_RADIUS_PX,
        steps::CORNER_RADIUS_PX,
        " px",
        true,
    );
    patch.device_scale = super::slider_f64(
        ui,
        "Device Scale:",
        settings.device_scale,
        limits::DEVICE_SCALE,
        steps::DEVICE_SCALE,
        "x",
        true,
    );

    patch
}
