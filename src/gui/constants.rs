//! GUI-specific constants for layout, colors and slider steps

use egui;

/// Main window dimensions
pub const WINDOW_WIDTH: f32 = 1280.0;
pub const WINDOW_HEIGHT: f32 = 860.0;
pub const WINDOW_MIN_WIDTH: f32 = 900.0;
pub const WINDOW_MIN_HEIGHT: f32 = 640.0;

/// Control panel
pub const PANEL_WIDTH: f32 = 340.0;
pub const OVERLAY_PANEL_WIDTH: f32 = 300.0;

/// Layout spacing
pub const SECTION_SPACING: f32 = 15.0;
pub const ITEM_SPACING: f32 = 8.0;

/// Padding around the devices inside the display area
pub const DISPLAY_PADDING: f32 = 32.0;
pub const DISPLAY_PADDING_FULLSCREEN: f32 = 16.0;

/// Gap between devices when both are shown
pub const DEVICE_GAP: f32 = 32.0;

/// Gradient preview swatch and preset tiles
pub const SWATCH_HEIGHT: f32 = 48.0;
pub const PRESET_TILE_HEIGHT: f32 = 40.0;
pub const PRESET_COLUMNS: usize = 3;

/// Background image thumbnail in the control panel
pub const IMAGE_PREVIEW_HEIGHT: f32 = 96.0;

/// Status colors
pub const STATUS_ERROR: egui::Color32 = egui::Color32::from_rgb(200, 0, 0);
pub const STATUS_OK: egui::Color32 = egui::Color32::from_rgb(0, 160, 0);

/// Content surface placeholder
pub const CONTENT_BACKGROUND: egui::Color32 = egui::Color32::WHITE;
pub const CONTENT_TEXT: egui::Color32 = egui::Color32::from_rgb(90, 90, 90);
pub const CONTENT_INVALID_TEXT: egui::Color32 = egui::Color32::from_rgb(180, 60, 60);

/// Phone notch
pub const NOTCH_WIDTH: f32 = 160.0;
pub const NOTCH_HEIGHT: f32 = 28.0;
pub const NOTCH_COLOR: egui::Color32 = egui::Color32::BLACK;

/// Slider steps
pub mod steps {
    pub const CONTENT_SCALE: f64 = 0.1;
    pub const CORNER_RADIUS_PX: f64 = 1.0;
    pub const DEVICE_SCALE: f64 = 0.05;
    pub const SHADOW_BLUR_PX: f64 = 5.0;
    pub const SHADOW_SPREAD_PX: f64 = 2.0;
    pub const SHADOW_OPACITY: f64 = 0.1;
    pub const IMAGE_OFFSET_PX: f64 = 5.0;
    pub const IMAGE_SCALE: f64 = 0.05;
    pub const IMAGE_ROTATION_DEGREES: f64 = 1.0;
}
