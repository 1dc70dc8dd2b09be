use eframe::egui;

use crate::config::{ActiveDevice, ConfigPatch, Configuration};

/// Renders the device choice and returns the selection change, if any
pub fn ui(ui: &mut egui::Ui, config: &Configuration) -> ConfigPatch {
    let mut patch = ConfigPatch::default();

    ui.group(|ui| {
        super::heading(ui, "Device");
        ui.horizontal(|ui| {
            for device in ActiveDevice::ALL {
                if ui
                    .selectable_label(config.active_device == device, device.label())
                    .clicked()
                    && config.active_device != device
                {
                    patch = ConfigPatch::select_device(device);
                }
            }
        });
    });

    patch
}
