//! Per-field restore of a persisted configuration
//!
//! Every known field is taken from the stored JSON when present and of the
//! right type, otherwise the default is kept. One bad field never discards
//! the rest of the blob. Restored numbers are clamped like any other update.

use anyhow::{Context, Result};
use serde_json::{Map, Value};
use tracing::warn;

use super::settings::{ActiveDevice, Configuration, DeviceKind, GradientDirection};

/// Reads typed fields from one JSON object, logging every rejected field
struct FieldReader<'a> {
    section: &'a str,
    object: Option<&'a Map<String, Value>>,
}

impl<'a> FieldReader<'a> {
    fn new(section: &'a str, value: Option<&'a Value>) -> Self {
        let object = match value {
            Some(Value::Object(map)) => Some(map),
            Some(other) => {
                warn!(section, found = %other, "persisted section is not an object, using defaults");
                None
            }
            None => None,
        };
        Self { section, object }
    }

    fn child(&self, key: &'a str) -> FieldReader<'a> {
        FieldReader::new(key, self.object.and_then(|map| map.get(key)))
    }

    fn get<T>(&self, key: &str, expected: &str, convert: impl FnOnce(&Value) -> Option<T>) -> Option<T> {
        let value = self.object?.get(key)?;
        let converted = convert(value);
        if converted.is_none() {
            warn!(section = self.section, field = key, expected, found = %value, "invalid persisted field, using default");
        }
        converted
    }

    fn string(&self, key: &str, target: &mut String) {
        if let Some(value) = self.get(key, "string", |v| v.as_str().map(str::to_string)) {
            *target = value;
        }
    }

    fn bool(&self, key: &str, target: &mut bool) {
        if let Some(value) = self.get(key, "bool", Value::as_bool) {
            *target = value;
        }
    }

    fn f64(&self, key: &str, target: &mut f64) {
        if let Some(value) = self.get(key, "number", Value::as_f64) {
            *target = value;
        }
    }

    /// Integers stored as floats are rounded
    fn i32(&self, key: &str, target: &mut i32) {
        let parsed = self.get(key, "integer", |v| {
            v.as_i64()
                .or_else(|| v.as_f64().filter(|f| f.is_finite()).map(|f| f.round() as i64))
                .map(|n| n.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32)
        });
        if let Some(value) = parsed {
            *target = value;
        }
    }

    fn direction(&self, key: &str, target: &mut GradientDirection) {
        let parsed = self.get(key, "one of 0/45/90/135/180/270 degrees", |v| match v {
            Value::String(text) => GradientDirection::parse(text),
            Value::Number(n) => n.as_i64().and_then(GradientDirection::from_degrees),
            _ => None,
        });
        if let Some(direction) = parsed {
            *target = direction;
        }
    }

    fn active_device(&self, key: &str, target: &mut ActiveDevice) {
        if let Some(device) = self.get(key, "iphone|macbook|both", |v| v.as_str().and_then(ActiveDevice::parse)) {
            *target = device;
        }
    }
}

impl Configuration {
    /// Overlay every valid field of `value` on top of the defaults
    pub fn from_value(value: &Value) -> Configuration {
        let mut config = Configuration::default();
        let root = FieldReader::new("root", Some(value));

        let gradient = root.child("gradient");
        gradient.string("startColor", &mut config.gradient.start_color);
        gradient.string("endColor", &mut config.gradient.end_color);
        gradient.direction("directionDegrees", &mut config.gradient.direction);

        root.active_device("activeDevice", &mut config.active_device);
        root.string("websiteUrl", &mut config.website_url);

        for (key, kind) in [("iphone", DeviceKind::Iphone), ("macbook", DeviceKind::Macbook)] {
            let reader = root.child(key);
            let device = config.device_mut(kind);
            reader.f64("contentScale", &mut device.content_scale);
            reader.i32("cornerRadiusPx", &mut device.corner_radius_px);
            reader.f64("deviceScale", &mut device.device_scale);
        }

        let shadow = root.child("shadow");
        shadow.bool("enabled", &mut config.shadow.enabled);
        shadow.i32("blurPx", &mut config.shadow.blur_px);
        shadow.i32("spreadPx", &mut config.shadow.spread_px);
        shadow.f64("opacity", &mut config.shadow.opacity);

        let image = root.child("backgroundImage");
        image.bool("enabled", &mut config.background_image.enabled);
        image.string("imageData", &mut config.background_image.image_data);
        image.i32("offsetX", &mut config.background_image.offset_x);
        image.i32("offsetY", &mut config.background_image.offset_y);
        image.f64("scale", &mut config.background_image.scale);
        image.i32("rotationDegrees", &mut config.background_image.rotation_degrees);

        root.bool("isDarkMode", &mut config.is_dark_mode);

        config.clamped()
    }

    /// Parse a persisted blob; only malformed JSON is an error
    pub fn from_json(contents: &str) -> Result<Configuration> {
        let value: Value = serde_json::from_str(contents).context("Persisted settings are not valid JSON")?;
        Ok(Self::from_value(&value))
    }
}
