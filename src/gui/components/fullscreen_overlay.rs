//! Settings panel floating over the display in fullscreen
//!
//! Editing is restricted to numeric sliders and a content refresh. The URL is
//! read-only unless the URL-edit policy allows it.

use eframe::egui;

use crate::config::{ConfigPatch, Configuration, DevicePatch, ShadowPatch};
use crate::gui::constants::{ITEM_SPACING, OVERLAY_PANEL_WIDTH};

#[derive(Debug, Default)]
pub struct OverlayOutput {
    pub patch: ConfigPatch,
    pub refresh: bool,
    pub close: bool,
    /// Pointer over the panel or any widget used; postpones auto-hide
    pub interacted: bool,
}

pub fn show(ctx: &egui::Context, config: &Configuration, allow_url_edit: bool) -> OverlayOutput {
    let mut output = OverlayOutput::default();

    let area = egui::Area::new(egui::Id::new("fullscreen_settings_overlay"))
        .order(egui::Order::Foreground)
        .anchor(egui::Align2::LEFT_TOP, [12.0, 12.0])
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                ui.set_width(OVERLAY_PANEL_WIDTH);
                egui::ScrollArea::vertical()
                    .max_height(ctx.available_rect().height() - 48.0)
                    .show(ui, |ui| contents(ui, config, allow_url_edit, &mut output));
            });
        });

    output.interacted = area.response.contains_pointer() || !output.patch.is_empty() || output.refresh;
    output
}

fn contents(ui: &mut egui::Ui, config: &Configuration, allow_url_edit: bool, output: &mut OverlayOutput) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("Settings").strong());
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("✕").on_hover_text("Close").clicked() {
                output.close = true;
            }
        });
    });
    ui.add_space(ITEM_SPACING);

    let mut url = config.website_url.clone();
    ui.label("Website URL:");
    let edit = egui::TextEdit::singleline(&mut url).desired_width(f32::INFINITY);
    let response = ui
        .add_enabled(allow_url_edit, edit)
        .on_disabled_hover_text("Leave fullscreen to change the URL");
    if response.changed() {
        output.patch = std::mem::take(&mut output.patch).merge(ConfigPatch::website_url(url));
    }

    for &kind in config.active_device.devices() {
        ui.add_space(ITEM_SPACING);
        let device = super::website_settings::device_sliders(ui, config, kind, true);
        if device != DevicePatch::default() {
            output.patch = std::mem::take(&mut output.patch).merge(ConfigPatch::device(kind, device));
        }
    }

    if config.shadow.enabled {
        ui.add_space(ITEM_SPACING);
        ui.label(egui::RichText::new("Shadow").italics());
        let shadow = super::shadow_controls::sliders(ui, &config.shadow);
        if shadow != ShadowPatch::default() {
            output.patch = std::mem::take(&mut output.patch).merge(ConfigPatch::shadow(shadow));
        }
    }

    ui.add_space(ITEM_SPACING);
    if ui.button("🔄 Refresh Content").clicked() {
        output.refresh = true;
    }
}
