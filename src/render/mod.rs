//! Composition renderer
//!
//! `compose` turns a configuration plus transient session state into the
//! layer stack the display paints: background, then per-device frame, shadow,
//! content viewport and status chrome. It is total over clamped
//! configurations and never touches the windowing backend.

pub mod device;
pub mod status_bar;
pub mod style;

use chrono::NaiveTime;
use serde::Serialize;

use crate::config::{Configuration, DeviceKind};
use crate::constants::layout;

pub use device::{FrameAsset, ScreenInsets};
pub use status_bar::StatusBar;
pub use style::{ContentViewport, DropShadow, ImageLayer, LinearGradient, ShadowFilter};

/// Transient inputs that are not part of the persisted configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub is_fullscreen: bool,
    pub current_time: NaiveTime,
    pub refresh_key: u32,
}

impl RenderContext {
    pub fn new(current_time: NaiveTime) -> Self {
        Self {
            is_fullscreen: false,
            current_time,
            refresh_key: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub background: BackgroundLayer,
    pub devices: Vec<DeviceLayer>,
    pub fullscreen: bool,
    pub dark: bool,
}

/// Gradient backdrop with an optional image drawn over it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BackgroundLayer {
    pub gradient: LinearGradient,
    pub image: Option<ImageLayer>,
}

impl BackgroundLayer {
    pub fn css(&self) -> String {
        self.gradient.css()
    }
}

/// How tall the frame is drawn before `device_scale` applies
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum FrameSizing {
    /// The asset's own pixel size, shrunk to fit if the display is smaller
    Natural,
    /// A share of the display height, width following the aspect ratio
    ViewportHeightPercent(f64),
}

impl FrameSizing {
    /// Drawn frame size inside a `available_width` x `available_height` area
    pub fn resolve(self, frame: &FrameAsset, available_width: f64, available_height: f64) -> (f64, f64) {
        let natural_width = f64::from(frame.width);
        let natural_height = f64::from(frame.height);
        let (width, height) = match self {
            FrameSizing::Natural => (natural_width, natural_height),
            FrameSizing::ViewportHeightPercent(percent) => {
                let height = available_height * percent / 100.0;
                (height * natural_width / natural_height, height)
            }
        };

        // max-width: 100%, keeping the aspect ratio
        if width > available_width && available_width > 0.0 {
            let shrink = available_width / width;
            (available_width, height * shrink)
        } else {
            (width, height)
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceLayer {
    pub kind: DeviceKind,
    pub frame: FrameAsset,
    pub sizing: FrameSizing,
    /// Uniform scale of frame and content together
    pub device_scale: f64,
    pub shadow: Option<ShadowFilter>,
    pub screen: ScreenInsets,
    pub corner_radius_px: i32,
    pub content: ContentViewport,
    pub status_bar: Option<StatusBar>,
}

impl DeviceLayer {
    pub fn filter_css(&self) -> String {
        style::filter_css(self.shadow.as_ref())
    }

    pub fn border_radius_css(&self) -> String {
        format!("{}px", self.corner_radius_px)
    }

    pub fn transform_css(&self) -> String {
        format!("scale({})", style::css_number(self.device_scale))
    }
}

/// CSS declarations equivalent to a composition, one entry per layer
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StyleSheet {
    pub background: String,
    pub background_image_transform: Option<String>,
    pub devices: Vec<DeviceStyles>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceStyles {
    pub kind: DeviceKind,
    pub filter: String,
    pub transform: String,
    pub border_radius: String,
    pub content_transform: String,
    pub content_box: String,
}

impl Composition {
    pub fn style_sheet(&self) -> StyleSheet {
        StyleSheet {
            background: self.background.css(),
            background_image_transform: self.background.image.as_ref().map(ImageLayer::css_transform),
            devices: self
                .devices
                .iter()
                .map(|layer| DeviceStyles {
                    kind: layer.kind,
                    filter: layer.filter_css(),
                    transform: layer.transform_css(),
                    border_radius: layer.border_radius_css(),
                    content_transform: layer.content.css_transform(),
                    content_box: layer.content.css_box(),
                })
                .collect(),
        }
    }
}

pub fn compose(config: &Configuration, context: &RenderContext) -> Composition {
    let background = BackgroundLayer {
        gradient: LinearGradient::from_settings(&config.gradient),
        image: ImageLayer::from_settings(&config.background_image),
    };

    let devices = config
        .active_device
        .devices()
        .iter()
        .map(|&kind| device_layer(config, context, kind))
        .collect();

    Composition {
        background,
        devices,
        fullscreen: context.is_fullscreen,
        dark: config.is_dark_mode,
    }
}

fn device_layer(config: &Configuration, context: &RenderContext, kind: DeviceKind) -> DeviceLayer {
    let settings = config.device(kind);

    let status_bar = match kind {
        DeviceKind::Iphone => Some(StatusBar::new(context.current_time, config.is_dark_mode)),
        DeviceKind::Macbook => None,
    };
    let top_margin = status_bar.as_ref().map_or(0.0, |bar| bar.height_px);

    let sizing = if context.is_fullscreen {
        FrameSizing::ViewportHeightPercent(layout::FULLSCREEN_FRAME_HEIGHT_PERCENT)
    } else {
        FrameSizing::Natural
    };

    DeviceLayer {
        kind,
        frame: device::frame_asset(kind),
        sizing,
        device_scale: settings.device_scale,
        shadow: ShadowFilter::from_settings(&config.shadow),
        screen: device::screen_insets(kind),
        corner_radius_px: settings.corner_radius_px,
        content: ContentViewport::new(
            style::content_source(&config.website_url, context.refresh_key),
            settings.content_scale,
            top_margin,
        ),
        status_bar,
    }
}
