//! Partial updates to the visual configuration
//!
//! A `ConfigPatch` names only the fields that change. Applying it yields a new
//! `Configuration`; numeric values are clamped to their documented range on
//! the way in. Device switches never touch per-device settings.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::settings::{
    clamp_f64, clamp_i32, ActiveDevice, BackgroundImage, Configuration, DeviceKind, DeviceSettings,
    Gradient, GradientDirection, ShadowSettings,
};
use crate::constants::limits;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GradientPatch {
    pub start_color: Option<String>,
    pub end_color: Option<String>,
    #[serde(rename = "directionDegrees")]
    pub direction: Option<GradientDirection>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DevicePatch {
    pub content_scale: Option<f64>,
    pub corner_radius_px: Option<i32>,
    pub device_scale: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ShadowPatch {
    pub enabled: Option<bool>,
    pub blur_px: Option<i32>,
    pub spread_px: Option<i32>,
    pub opacity: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct BackgroundImagePatch {
    pub enabled: Option<bool>,
    pub image_data: Option<String>,
    pub offset_x: Option<i32>,
    pub offset_y: Option<i32>,
    pub scale: Option<f64>,
    pub rotation_degrees: Option<i32>,
}

/// Partial configuration update, same JSON shape as the persisted blob
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConfigPatch {
    pub gradient: Option<GradientPatch>,
    pub active_device: Option<ActiveDevice>,
    pub website_url: Option<String>,
    pub iphone: Option<DevicePatch>,
    pub macbook: Option<DevicePatch>,
    pub shadow: Option<ShadowPatch>,
    pub background_image: Option<BackgroundImagePatch>,
    pub is_dark_mode: Option<bool>,
}

impl ConfigPatch {
    pub fn select_device(device: ActiveDevice) -> Self {
        Self { active_device: Some(device), ..Self::default() }
    }

    pub fn website_url(url: impl Into<String>) -> Self {
        Self { website_url: Some(url.into()), ..Self::default() }
    }

    pub fn dark_mode(enabled: bool) -> Self {
        Self { is_dark_mode: Some(enabled), ..Self::default() }
    }

    /// Replace both gradient colors, keeping the direction
    pub fn gradient_colors(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self::gradient(GradientPatch {
            start_color: Some(start.into()),
            end_color: Some(end.into()),
            direction: None,
        })
    }

    pub fn gradient_direction(direction: GradientDirection) -> Self {
        Self::gradient(GradientPatch { direction: Some(direction), ..GradientPatch::default() })
    }

    pub fn gradient(patch: GradientPatch) -> Self {
        Self { gradient: Some(patch), ..Self::default() }
    }

    pub fn device(kind: DeviceKind, patch: DevicePatch) -> Self {
        match kind {
            DeviceKind::Iphone => Self { iphone: Some(patch), ..Self::default() },
            DeviceKind::Macbook => Self { macbook: Some(patch), ..Self::default() },
        }
    }

    pub fn shadow(patch: ShadowPatch) -> Self {
        Self { shadow: Some(patch), ..Self::default() }
    }

    pub fn background_image(patch: BackgroundImagePatch) -> Self {
        Self { background_image: Some(patch), ..Self::default() }
    }

    /// Drop the loaded image and disable the layer; placement is kept
    pub fn clear_background_image() -> Self {
        Self::background_image(BackgroundImagePatch {
            enabled: Some(false),
            image_data: Some(String::new()),
            ..BackgroundImagePatch::default()
        })
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Combine two patches; fields set in `other` win
    pub fn merge(self, other: ConfigPatch) -> ConfigPatch {
        ConfigPatch {
            gradient: merge_nested(self.gradient, other.gradient, |a, b| GradientPatch {
                start_color: b.start_color.or(a.start_color),
                end_color: b.end_color.or(a.end_color),
                direction: b.direction.or(a.direction),
            }),
            active_device: other.active_device.or(self.active_device),
            website_url: other.website_url.or(self.website_url),
            iphone: merge_nested(self.iphone, other.iphone, DevicePatch::merge),
            macbook: merge_nested(self.macbook, other.macbook, DevicePatch::merge),
            shadow: merge_nested(self.shadow, other.shadow, |a, b| ShadowPatch {
                enabled: b.enabled.or(a.enabled),
                blur_px: b.blur_px.or(a.blur_px),
                spread_px: b.spread_px.or(a.spread_px),
                opacity: b.opacity.or(a.opacity),
            }),
            background_image: merge_nested(self.background_image, other.background_image, |a, b| {
                BackgroundImagePatch {
                    enabled: b.enabled.or(a.enabled),
                    image_data: b.image_data.or(a.image_data),
                    offset_x: b.offset_x.or(a.offset_x),
                    offset_y: b.offset_y.or(a.offset_y),
                    scale: b.scale.or(a.scale),
                    rotation_degrees: b.rotation_degrees.or(a.rotation_degrees),
                }
            }),
            is_dark_mode: other.is_dark_mode.or(self.is_dark_mode),
        }
    }
}

impl DevicePatch {
    fn merge(self, other: DevicePatch) -> DevicePatch {
        DevicePatch {
            content_scale: other.content_scale.or(self.content_scale),
            corner_radius_px: other.corner_radius_px.or(self.corner_radius_px),
            device_scale: other.device_scale.or(self.device_scale),
        }
    }
}

fn merge_nested<T>(base: Option<T>, other: Option<T>, merge: impl FnOnce(T, T) -> T) -> Option<T> {
    match (base, other) {
        (Some(a), Some(b)) => Some(merge(a, b)),
        (a, b) => b.or(a),
    }
}

/// Clamped float update; `NaN` is rejected and leaves the field as it was
fn apply_f64(field: &str, target: &mut f64, value: Option<f64>, range: std::ops::RangeInclusive<f64>) {
    if let Some(value) = value {
        if value.is_nan() {
            warn!(field, "ignoring NaN update");
            return;
        }
        *target = clamp_f64(field, value, range, *target);
    }
}

fn apply_i32(field: &str, target: &mut i32, value: Option<i32>, range: std::ops::RangeInclusive<i32>) {
    if let Some(value) = value {
        *target = clamp_i32(field, value, range);
    }
}

impl Configuration {
    /// New configuration with `patch` applied on top of `self`
    pub fn with_patch(&self, patch: &ConfigPatch) -> Configuration {
        let mut next = self.clone();

        if let Some(gradient) = &patch.gradient {
            apply_gradient(&mut next.gradient, gradient);
        }
        if let Some(device) = patch.active_device {
            next.active_device = device;
        }
        if let Some(url) = &patch.website_url {
            next.website_url = url.clone();
        }
        if let Some(device) = &patch.iphone {
            apply_device(&mut next.iphone, device);
        }
        if let Some(device) = &patch.macbook {
            apply_device(&mut next.macbook, device);
        }
        if let Some(shadow) = &patch.shadow {
            apply_shadow(&mut next.shadow, shadow);
        }
        if let Some(image) = &patch.background_image {
            apply_background_image(&mut next.background_image, image);
        }
        if let Some(dark) = patch.is_dark_mode {
            next.is_dark_mode = dark;
        }

        next
    }
}

fn apply_gradient(gradient: &mut Gradient, patch: &GradientPatch) {
    if let Some(color) = &patch.start_color {
        gradient.start_color = color.clone();
    }
    if let Some(color) = &patch.end_color {
        gradient.end_color = color.clone();
    }
    if let Some(direction) = patch.direction {
        gradient.direction = direction;
    }
}

fn apply_device(device: &mut DeviceSettings, patch: &DevicePatch) {
    apply_f64("contentScale", &mut device.content_scale, patch.content_scale, limits::CONTENT_SCALE);
    apply_i32("cornerRadiusPx", &mut device.corner_radius_px, patch.corner_radius_px, limits::CORNER_RADIUS_PX);
    apply_f64("deviceScale", &mut device.device_scale, patch.device_scale, limits::DEVICE_SCALE);
}

fn apply_shadow(shadow: &mut ShadowSettings, patch: &ShadowPatch) {
    if let Some(enabled) = patch.enabled {
        shadow.enabled = enabled;
    }
    apply_i32("blurPx", &mut shadow.blur_px, patch.blur_px, limits::SHADOW_BLUR_PX);
    apply_i32("spreadPx", &mut shadow.spread_px, patch.spread_px, limits::SHADOW_SPREAD_PX);
    apply_f64("opacity", &mut shadow.opacity, patch.opacity, limits::SHADOW_OPACITY);
}

fn apply_background_image(image: &mut BackgroundImage, patch: &BackgroundImagePatch) {
    if let Some(enabled) = patch.enabled {
        image.enabled = enabled;
    }
    if let Some(data) = &patch.image_data {
        image.image_data = data.clone();
    }
    apply_i32("offsetX", &mut image.offset_x, patch.offset_x, limits::IMAGE_OFFSET_PX);
    apply_i32("offsetY", &mut image.offset_y, patch.offset_y, limits::IMAGE_OFFSET_PX);
    apply_f64("scale", &mut image.scale, patch.scale, limits::IMAGE_SCALE);
    apply_i32("rotationDegrees", &mut image.rotation_degrees, patch.rotation_degrees, limits::IMAGE_ROTATION_DEGREES);
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn patch(value: serde_json::Value) -> ConfigPatch {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_content_scale_clamped_to_max() {
        let config = Configuration::default().with_patch(&patch(json!({"iphone": {"contentScale": 5.0}})));
        assert_eq!(config.iphone.content_scale, 2.0);
    }

    #[test]
    fn test_every_numeric_field_clamped() {
        let config = Configuration::default().with_patch(&patch(json!({
            "iphone": {"contentScale": 0.1, "cornerRadiusPx": 99, "deviceScale": 4.0},
            "macbook": {"contentScale": 7.5, "cornerRadiusPx": -10, "deviceScale": 0.0},
            "shadow": {"blurPx": 500, "spreadPx": -90, "opacity": 1.7},
            "backgroundImage": {"offsetX": -1000, "offsetY": 1000, "scale": 0.1, "rotationDegrees": 400}
        })));

        assert_eq!(config.iphone.content_scale, 0.5);
        assert_eq!(config.iphone.corner_radius_px, 50);
        assert_eq!(config.iphone.device_scale, 1.5);
        assert_eq!(config.macbook.content_scale, 2.0);
        assert_eq!(config.macbook.corner_radius_px, 0);
        assert_eq!(config.macbook.device_scale, 0.5);
        assert_eq!(config.shadow.blur_px, 80);
        assert_eq!(config.shadow.spread_px, -20);
        assert_eq!(config.shadow.opacity, 1.0);
        assert_eq!(config.background_image.offset_x, -400);
        assert_eq!(config.background_image.offset_y, 400);
        assert_eq!(config.background_image.scale, 0.5);
        assert_eq!(config.background_image.rotation_degrees, 180);
    }

    #[test]
    fn test_in_range_values_kept() {
        let config = Configuration::default().with_patch(&ConfigPatch::shadow(ShadowPatch {
            blur_px: Some(25),
            opacity: Some(0.6),
            ..ShadowPatch::default()
        }));
        assert_eq!(config.shadow.blur_px, 25);
        assert_eq!(config.shadow.opacity, 0.6);
        assert_eq!(config.shadow.spread_px, 0);
    }

    #[test]
    fn test_nan_leaves_field_unchanged() {
        let config = Configuration::default().with_patch(&ConfigPatch::device(
            DeviceKind::Macbook,
            DevicePatch { content_scale: Some(f64::NAN), ..DevicePatch::default() },
        ));
        assert_eq!(config.macbook.content_scale, 1.0);
    }

    #[test]
    fn test_infinity_clamps_to_bound() {
        let config = Configuration::default().with_patch(&ConfigPatch::device(
            DeviceKind::Iphone,
            DevicePatch { device_scale: Some(f64::INFINITY), ..DevicePatch::default() },
        ));
        assert_eq!(config.iphone.device_scale, 1.5);
    }

    #[test]
    fn test_device_switch_keeps_per_device_settings() {
        let original = Configuration::default().with_patch(&ConfigPatch::device(
            DeviceKind::Iphone,
            DevicePatch { content_scale: Some(1.4), corner_radius_px: Some(32), device_scale: Some(0.8) },
        ));

        let switched = original.with_patch(&ConfigPatch::select_device(ActiveDevice::Macbook));
        assert_eq!(switched.active_device, ActiveDevice::Macbook);
        assert_eq!(switched.macbook.corner_radius_px, 0);

        let back = switched.with_patch(&ConfigPatch::select_device(ActiveDevice::Iphone));
        assert_eq!(back.iphone, original.iphone);
        assert_eq!(back, original);
    }

    #[test]
    fn test_direction_patch_from_json() {
        let config = Configuration::default().with_patch(&patch(json!({"gradient": {"directionDegrees": "90deg"}})));
        assert_eq!(config.gradient.direction, GradientDirection::Deg90);
        assert_eq!(config.gradient.start_color, "#56ab2f");
    }

    #[test]
    fn test_gradient_colors_keep_direction() {
        let base = Configuration::default().with_patch(&ConfigPatch::gradient_direction(GradientDirection::Deg270));
        let config = base.with_patch(&ConfigPatch::gradient_colors("#ff512f", "#f09819"));
        assert_eq!(config.gradient.start_color, "#ff512f");
        assert_eq!(config.gradient.end_color, "#f09819");
        assert_eq!(config.gradient.direction, GradientDirection::Deg270);
    }

    #[test]
    fn test_clear_background_image() {
        let loaded = Configuration::default().with_patch(&ConfigPatch::background_image(BackgroundImagePatch {
            enabled: Some(true),
            image_data: Some("data:image/png;base64,AAAA".to_string()),
            offset_x: Some(40),
            ..BackgroundImagePatch::default()
        }));
        assert!(loaded.background_image.is_visible());

        let cleared = loaded.with_patch(&ConfigPatch::clear_background_image());
        assert!(!cleared.background_image.enabled);
        assert!(!cleared.background_image.has_image());
        assert_eq!(cleared.background_image.offset_x, 40);
    }

    #[test]
    fn test_merge_later_fields_win() {
        let first = ConfigPatch::device(
            DeviceKind::Iphone,
            DevicePatch { content_scale: Some(1.2), corner_radius_px: Some(10), ..DevicePatch::default() },
        )
        .merge(ConfigPatch::dark_mode(true));
        let second = ConfigPatch::device(
            DeviceKind::Iphone,
            DevicePatch { corner_radius_px: Some(20), ..DevicePatch::default() },
        );

        let merged = first.merge(second);
        let iphone = merged.iphone.clone().unwrap();
        assert_eq!(iphone.content_scale, Some(1.2));
        assert_eq!(iphone.corner_radius_px, Some(20));
        assert_eq!(merged.is_dark_mode, Some(true));
        assert!(!merged.is_empty());
        assert!(ConfigPatch::default().is_empty());
    }

    #[test]
    fn test_with_patch_does_not_mutate_source() {
        let original = Configuration::default();
        let _ = original.with_patch(&ConfigPatch::website_url("https://rust-lang.org"));
        assert_eq!(original.website_url, "https://example.com");
    }
}
