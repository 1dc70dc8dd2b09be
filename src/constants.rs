//! Application-wide constants
//!
//! Ranges, defaults and timings shared by the store, the renderer and the GUI,
//! providing a single source of truth for constant values.

/// Settings file location
pub mod config {
    /// Directory under the platform config dir
    pub const APP_DIR: &str = "mockup-studio";

    /// Settings slot file name
    pub const FILENAME: &str = "settings.json";
}

/// Inclusive ranges every numeric field is clamped to
pub mod limits {
    use std::ops::RangeInclusive;

    pub const CONTENT_SCALE: RangeInclusive<f64> = 0.5..=2.0;
    pub const CORNER_RADIUS_PX: RangeInclusive<i32> = 0..=50;
    pub const DEVICE_SCALE: RangeInclusive<f64> = 0.5..=1.5;

    pub const SHADOW_BLUR_PX: RangeInclusive<i32> = 0..=80;
    pub const SHADOW_SPREAD_PX: RangeInclusive<i32> = -20..=20;
    pub const SHADOW_OPACITY: RangeInclusive<f64> = 0.0..=1.0;

    pub const IMAGE_OFFSET_PX: RangeInclusive<i32> = -400..=400;
    pub const IMAGE_SCALE: RangeInclusive<f64> = 0.5..=3.0;
    pub const IMAGE_ROTATION_DEGREES: RangeInclusive<i32> = -180..=180;
}

/// Documented defaults restored by `reset`
pub mod defaults {
    pub const GRADIENT_START: &str = "#56ab2f";
    pub const GRADIENT_END: &str = "#a8e6cf";

    pub const WEBSITE_URL: &str = "https://example.com";

    pub const IPHONE_CORNER_RADIUS_PX: i32 = 50;
    pub const MACBOOK_CORNER_RADIUS_PX: i32 = 0;
    pub const CONTENT_SCALE: f64 = 1.0;
    pub const DEVICE_SCALE: f64 = 1.0;

    pub const SHADOW_ENABLED: bool = true;
    pub const SHADOW_BLUR_PX: i32 = 40;
    pub const SHADOW_SPREAD_PX: i32 = 0;
    pub const SHADOW_OPACITY: f64 = 0.3;

    pub const IMAGE_SCALE: f64 = 1.0;
}

/// Composition geometry
pub mod layout {
    /// Height reserved for the phone status bar in the content viewport
    pub const STATUS_BAR_HEIGHT_PX: f64 = 44.0;

    /// Battery fill shown in the status bar
    pub const BATTERY_LEVEL_PERCENT: u8 = 85;

    /// Frame height in fullscreen, as a percentage of the viewport height
    pub const FULLSCREEN_FRAME_HEIGHT_PERCENT: f64 = 85.0;

    /// Opacity factor of the secondary (softer) drop shadow
    pub const SECONDARY_SHADOW_OPACITY_FACTOR: f64 = 0.5;
}

/// Timers
pub mod timing {
    use std::time::Duration;

    /// Status bar clock refresh period
    pub const CLOCK_TICK: Duration = Duration::from_secs(60);

    /// Fullscreen settings overlay dwell before auto-hide
    pub const OVERLAY_DWELL: Duration = Duration::from_secs(3);

    /// Quiet period after the last mutation before settings are written
    pub const PERSIST_DEBOUNCE: Duration = Duration::from_millis(250);

    /// How long a fullscreen request may stay unconfirmed by the platform
    pub const FULLSCREEN_CONFIRM_TIMEOUT: Duration = Duration::from_secs(2);
}

/// Fullscreen overlay trigger
pub mod overlay {
    /// Width of the left-edge hover zone that reveals the settings panel
    pub const HOVER_ZONE_WIDTH_PX: f32 = 24.0;
}
