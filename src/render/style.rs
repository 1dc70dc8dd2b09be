//! Derived style values
//!
//! Pure functions from configuration values to the CSS-equivalent strings and
//! geometry the painter consumes. Nothing here touches a rendering backend.

use serde::Serialize;

use crate::config::settings::{BackgroundImage, Gradient, ShadowSettings};
use crate::constants::layout;

/// Format a number the way CSS text expects it: no trailing `.0`, at most
/// four decimals
pub fn css_number(value: f64) -> String {
    let rounded = (value * 10_000.0).round() / 10_000.0;
    // Avoid "-0"
    let rounded = if rounded == 0.0 { 0.0 } else { rounded };
    format!("{rounded}")
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LinearGradient {
    pub angle_degrees: u16,
    pub start_color: String,
    pub end_color: String,
}

impl LinearGradient {
    pub fn from_settings(gradient: &Gradient) -> Self {
        Self {
            angle_degrees: gradient.direction.degrees(),
            start_color: gradient.start_color.clone(),
            end_color: gradient.end_color.clone(),
        }
    }

    pub fn css(&self) -> String {
        format!("linear-gradient({}deg, {}, {})", self.angle_degrees, self.start_color, self.end_color)
    }

    /// Position of `(x, y)` along the gradient line of a `width` x `height`
    /// box: 0 at the start color, 1 at the end color. Follows CSS angle
    /// semantics (0deg points up, 90deg points right) with the gradient line
    /// long enough for the corners to hit exactly 0 and 1.
    pub fn parameter_at(&self, width: f64, height: f64, x: f64, y: f64) -> f64 {
        let angle = f64::from(self.angle_degrees).to_radians();
        let (dx, dy) = (angle.sin(), -angle.cos());
        let length = (width * dx).abs() + (height * dy).abs();
        if length <= f64::EPSILON {
            return 0.0;
        }
        let projected = (x - width / 2.0) * dx + (y - height / 2.0) * dy;
        (projected / length + 0.5).clamp(0.0, 1.0)
    }
}

/// One `drop-shadow()` component, straight down
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DropShadow {
    pub offset_y_px: f64,
    pub blur_px: f64,
    pub opacity: f64,
}

impl DropShadow {
    pub fn css(&self) -> String {
        format!(
            "drop-shadow(0 {}px {}px rgba(0, 0, 0, {}))",
            css_number(self.offset_y_px),
            css_number(self.blur_px),
            css_number(self.opacity)
        )
    }
}

/// Two stacked drop shadows: a primary one driven by blur, a softer one
/// driven by spread at half the opacity
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ShadowFilter {
    pub primary: DropShadow,
    pub secondary: DropShadow,
}

impl ShadowFilter {
    /// `None` when shadows are disabled, whatever the other values are
    pub fn from_settings(shadow: &ShadowSettings) -> Option<Self> {
        if !shadow.enabled {
            return None;
        }
        let blur = f64::from(shadow.blur_px);
        let spread = f64::from(shadow.spread_px);
        Some(Self {
            primary: DropShadow {
                offset_y_px: blur / 2.0,
                blur_px: blur,
                opacity: shadow.opacity,
            },
            secondary: DropShadow {
                offset_y_px: spread,
                // Negative spread lifts the shadow; blur radius stays positive
                blur_px: spread.abs() * 2.0,
                opacity: shadow.opacity * layout::SECONDARY_SHADOW_OPACITY_FACTOR,
            },
        })
    }

    pub fn css(&self) -> String {
        format!("{} {}", self.primary.css(), self.secondary.css())
    }
}

/// CSS `filter` value for an optional shadow
pub fn filter_css(shadow: Option<&ShadowFilter>) -> String {
    shadow.map(ShadowFilter::css).unwrap_or_else(|| "none".to_string())
}

/// Placement of the custom background image relative to the display center
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImageLayer {
    pub source: String,
    pub offset_x: i32,
    pub offset_y: i32,
    pub scale: f64,
    pub rotation_degrees: i32,
}

impl ImageLayer {
    /// `None` unless the layer is enabled and an image is loaded
    pub fn from_settings(image: &BackgroundImage) -> Option<Self> {
        if !image.is_visible() {
            return None;
        }
        Some(Self {
            source: image.image_data.clone(),
            offset_x: image.offset_x,
            offset_y: image.offset_y,
            scale: image.scale,
            rotation_degrees: image.rotation_degrees,
        })
    }

    pub fn css_transform(&self) -> String {
        format!(
            "translate(calc(-50% + {}px), calc(-50% + {}px)) scale({}) rotate({}deg)",
            self.offset_x,
            self.offset_y,
            css_number(self.scale),
            self.rotation_degrees
        )
    }
}

/// Cheap URL-shape check: scheme, host, no whitespace
pub fn looks_like_url(text: &str) -> bool {
    let text = text.trim();
    let rest = match text.split_once("://") {
        Some((scheme, rest)) if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") => rest,
        _ => return false,
    };
    let host = rest.split(['/', '?', '#']).next().unwrap_or("");
    !host.is_empty() && !text.chars().any(char::is_whitespace)
}

/// Content source with the refresh counter appended as a fragment, so a new
/// counter value forces a reload without touching the navigable URL
pub fn content_source(url: &str, refresh_key: u32) -> Option<String> {
    let url = url.trim();
    if !looks_like_url(url) {
        return None;
    }
    if refresh_key == 0 {
        return Some(url.to_string());
    }
    let separator = if url.contains('#') { '&' } else { '#' };
    Some(format!("{url}{separator}refresh={refresh_key}"))
}

/// Embedded content surface sizing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContentViewport {
    /// `None` when the URL is not URL-shaped; a placeholder is shown instead
    pub source: Option<String>,
    pub scale: f64,
    /// Width and height of the scaled box, in percent of the cutout
    pub box_percent: f64,
    /// Space reserved above the content (status bar)
    pub top_margin_px: f64,
}

impl ContentViewport {
    pub fn new(source: Option<String>, scale: f64, top_margin_px: f64) -> Self {
        Self {
            source,
            scale,
            box_percent: 100.0 / scale,
            top_margin_px,
        }
    }

    pub fn css_transform(&self) -> String {
        format!("scale({})", css_number(self.scale))
    }

    pub fn css_box(&self) -> String {
        let percent = css_number(self.box_percent);
        format!("width: {percent}%; height: {percent}%")
    }
}
