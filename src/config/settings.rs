//! Visual configuration model
//!
//! One cohesive value holding every user-adjustable parameter. It is never
//! edited in place by the GUI: mutations go through `ConfigPatch` and produce
//! a new value (see `config::patch`).

use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;
use tracing::debug;

use crate::constants::{defaults, limits};

/// CSS angle of the background gradient line
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GradientDirection {
    #[serde(rename = "0deg")]
    Deg0,
    #[serde(rename = "45deg")]
    Deg45,
    #[serde(rename = "90deg")]
    Deg90,
    #[default]
    #[serde(rename = "135deg")]
    Deg135,
    #[serde(rename = "180deg")]
    Deg180,
    #[serde(rename = "270deg")]
    Deg270,
}

impl GradientDirection {
    /// Every supported direction, in the order the direction picker lists them
    pub const ALL: [GradientDirection; 6] = [
        GradientDirection::Deg135,
        GradientDirection::Deg90,
        GradientDirection::Deg0,
        GradientDirection::Deg45,
        GradientDirection::Deg180,
        GradientDirection::Deg270,
    ];

    pub fn degrees(self) -> u16 {
        match self {
            GradientDirection::Deg0 => 0,
            GradientDirection::Deg45 => 45,
            GradientDirection::Deg90 => 90,
            GradientDirection::Deg135 => 135,
            GradientDirection::Deg180 => 180,
            GradientDirection::Deg270 => 270,
        }
    }

    pub fn from_degrees(degrees: i64) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|direction| i64::from(direction.degrees()) == degrees)
    }

    /// Accepts `"135deg"` or a bare `"135"`
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();
        let digits = text.strip_suffix("deg").unwrap_or(text).trim();
        digits.parse::<i64>().ok().and_then(Self::from_degrees)
    }
}

/// A single device silhouette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeviceKind {
    Iphone,
    Macbook,
}

impl DeviceKind {
    pub fn label(self) -> &'static str {
        match self {
            DeviceKind::Iphone => "iPhone",
            DeviceKind::Macbook => "MacBook",
        }
    }
}

/// Which device slots are shown
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ActiveDevice {
    #[default]
    Iphone,
    Macbook,
    Both,
}

impl ActiveDevice {
    pub const ALL: [ActiveDevice; 3] = [ActiveDevice::Iphone, ActiveDevice::Macbook, ActiveDevice::Both];

    /// Devices rendered for this selection, left to right
    pub fn devices(self) -> &'static [DeviceKind] {
        match self {
            ActiveDevice::Iphone => &[DeviceKind::Iphone],
            ActiveDevice::Macbook => &[DeviceKind::Macbook],
            ActiveDevice::Both => &[DeviceKind::Macbook, DeviceKind::Iphone],
        }
    }

    pub fn parse(text: &str) -> Option<Self> {
        match text.trim().to_ascii_lowercase().as_str() {
            "iphone" => Some(ActiveDevice::Iphone),
            "macbook" => Some(ActiveDevice::Macbook),
            "both" => Some(ActiveDevice::Both),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ActiveDevice::Iphone => "iPhone",
            ActiveDevice::Macbook => "MacBook",
            ActiveDevice::Both => "Both",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradient {
    pub start_color: String,
    pub end_color: String,
    #[serde(rename = "directionDegrees")]
    pub direction: GradientDirection,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            start_color: defaults::GRADIENT_START.to_string(),
            end_color: defaults::GRADIENT_END.to_string(),
            direction: GradientDirection::default(),
        }
    }
}

/// Per-device settings, kept independently for each device kind
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceSettings {
    pub content_scale: f64,
    pub corner_radius_px: i32,
    pub device_scale: f64,
}

impl DeviceSettings {
    pub fn default_for(kind: DeviceKind) -> Self {
        let corner_radius_px = match kind {
            DeviceKind::Iphone => defaults::IPHONE_CORNER_RADIUS_PX,
            DeviceKind::Macbook => defaults::MACBOOK_CORNER_RADIUS_PX,
        };
        Self {
            content_scale: defaults::CONTENT_SCALE,
            corner_radius_px,
            device_scale: defaults::DEVICE_SCALE,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShadowSettings {
    pub enabled: bool,
    pub blur_px: i32,
    pub spread_px: i32,
    pub opacity: f64,
}

impl Default for ShadowSettings {
    fn default() -> Self {
        Self {
            enabled: defaults::SHADOW_ENABLED,
            blur_px: defaults::SHADOW_BLUR_PX,
            spread_px: defaults::SHADOW_SPREAD_PX,
            opacity: defaults::SHADOW_OPACITY,
        }
    }
}

/// Optional custom image drawn over the gradient
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackgroundImage {
    pub enabled: bool,
    /// `data:` URI of the image, empty when none was loaded
    pub image_data: String,
    pub offset_x: i32,
    pub offset_y: i32,
    pub scale: f64,
    pub rotation_degrees: i32,
}

impl BackgroundImage {
    pub fn has_image(&self) -> bool {
        !self.image_data.trim().is_empty()
    }

    /// Whether the image layer takes part in the composition
    pub fn is_visible(&self) -> bool {
        self.enabled && self.has_image()
    }
}

impl Default for BackgroundImage {
    fn default() -> Self {
        Self {
            enabled: false,
            image_data: String::new(),
            offset_x: 0,
            offset_y: 0,
            scale: defaults::IMAGE_SCALE,
            rotation_degrees: 0,
        }
    }
}

/// The whole visual configuration, as persisted
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Configuration {
    pub gradient: Gradient,
    pub active_device: ActiveDevice,
    pub website_url: String,
    pub iphone: DeviceSettings,
    pub macbook: DeviceSettings,
    pub shadow: ShadowSettings,
    pub background_image: BackgroundImage,
    pub is_dark_mode: bool,
}

impl Default for Configuration {
    fn default() -> Self {
        Self {
            gradient: Gradient::default(),
            active_device: ActiveDevice::default(),
            website_url: defaults::WEBSITE_URL.to_string(),
            iphone: DeviceSettings::default_for(DeviceKind::Iphone),
            macbook: DeviceSettings::default_for(DeviceKind::Macbook),
            shadow: ShadowSettings::default(),
            background_image: BackgroundImage::default(),
            is_dark_mode: false,
        }
    }
}

impl Configuration {
    pub fn device(&self, kind: DeviceKind) -> &DeviceSettings {
        match kind {
            DeviceKind::Iphone => &self.iphone,
            DeviceKind::Macbook => &self.macbook,
        }
    }

    pub(crate) fn device_mut(&mut self, kind: DeviceKind) -> &mut DeviceSettings {
        match kind {
            DeviceKind::Iphone => &mut self.iphone,
            DeviceKind::Macbook => &mut self.macbook,
        }
    }

    /// Force every numeric field into its documented range
    pub fn clamped(mut self) -> Self {
        for kind in [DeviceKind::Iphone, DeviceKind::Macbook] {
            let device = self.device_mut(kind);
            device.content_scale = clamp_f64("contentScale", device.content_scale, limits::CONTENT_SCALE, defaults::CONTENT_SCALE);
            device.corner_radius_px = clamp_i32("cornerRadiusPx", device.corner_radius_px, limits::CORNER_RADIUS_PX);
            device.device_scale = clamp_f64("deviceScale", device.device_scale, limits::DEVICE_SCALE, defaults::DEVICE_SCALE);
        }

        let shadow = &mut self.shadow;
        shadow.blur_px = clamp_i32("blurPx", shadow.blur_px, limits::SHADOW_BLUR_PX);
        shadow.spread_px = clamp_i32("spreadPx", shadow.spread_px, limits::SHADOW_SPREAD_PX);
        shadow.opacity = clamp_f64("opacity", shadow.opacity, limits::SHADOW_OPACITY, defaults::SHADOW_OPACITY);

        let image = &mut self.background_image;
        image.offset_x = clamp_i32("offsetX", image.offset_x, limits::IMAGE_OFFSET_PX);
        image.offset_y = clamp_i32("offsetY", image.offset_y, limits::IMAGE_OFFSET_PX);
        image.scale = clamp_f64("scale", image.scale, limits::IMAGE_SCALE, defaults::IMAGE_SCALE);
        image.rotation_degrees = clamp_i32("rotationDegrees", image.rotation_degrees, limits::IMAGE_ROTATION_DEGREES);

        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Clamp a float into `range`; `NaN` becomes `fallback`
pub(crate) fn clamp_f64(field: &str, value: f64, range: RangeInclusive<f64>, fallback: f64) -> f64 {
    if value.is_nan() {
        debug!(field, fallback, "NaN value replaced");
        return fallback;
    }
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        debug!(field, value, clamped, "value out of range, clamping");
    }
    clamped
}

pub(crate) fn clamp_i32(field: &str, value: i32, range: RangeInclusive<i32>) -> i32 {
    let clamped = value.clamp(*range.start(), *range.end());
    if clamped != value {
        debug!(field, value, clamped, "value out of range, clamping");
    }
    clamped
}
