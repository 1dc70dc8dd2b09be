//! Device frame assets and their calibrated screen cutouts

use serde::Serialize;

use crate::config::DeviceKind;

/// Decorative frame image for one device kind
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FrameAsset {
    pub path: &'static str,
    pub width: u32,
    pub height: u32,
}

/// Screen cutout as percentages of the frame image, measured from each edge
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScreenInsets {
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
    pub left: f64,
}

/// A rectangle in frame-local pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocalRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl ScreenInsets {
    /// Cutout of a frame drawn at `width` x `height`
    pub fn rect_within(&self, width: f64, height: f64) -> LocalRect {
        let x = width * self.left / 100.0;
        let y = height * self.top / 100.0;
        LocalRect {
            x,
            y,
            width: width * (1.0 - (self.left + self.right) / 100.0),
            height: height * (1.0 - (self.top + self.bottom) / 100.0),
        }
    }
}

pub const IPHONE_FRAME: FrameAsset = FrameAsset {
    path: "assets/iphone-frame.png",
    width: 300,
    height: 600,
};

pub const MACBOOK_FRAME: FrameAsset = FrameAsset {
    path: "assets/macbook-frame.png",
    width: 800,
    height: 500,
};

pub const IPHONE_SCREEN: ScreenInsets = ScreenInsets { top: 2.4, right: 5.5, bottom: 2.5, left: 5.5 };

pub const MACBOOK_SCREEN: ScreenInsets = ScreenInsets { top: 6.2, right: 11.1, bottom: 10.5, left: 11.2 };

pub fn frame_asset(kind: DeviceKind) -> FrameAsset {
    match kind {
        DeviceKind::Iphone => IPHONE_FRAME,
        DeviceKind::Macbook => MACBOOK_FRAME,
    }
}

pub fn screen_insets(kind: DeviceKind) -> ScreenInsets {
    match kind {
        DeviceKind::Iphone => IPHONE_SCREEN,
        DeviceKind::Macbook => MACBOOK_SCREEN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_iphone_cutout_in_natural_frame() {
        let rect = IPHONE_SCREEN.rect_within(300.0, 600.0);
        assert!(approx(rect.x, 16.5));
        assert!(approx(rect.y, 14.4));
        assert!(approx(rect.width, 267.0));
        assert!(approx(rect.height, 570.6));
    }

    #[test]
    fn test_macbook_cutout_scales_with_frame() {
        let natural = MACBOOK_SCREEN.rect_within(800.0, 500.0);
        let doubled = MACBOOK_SCREEN.rect_within(1600.0, 1000.0);
        assert!(approx(doubled.x, natural.x * 2.0));
        assert!(approx(doubled.width, natural.width * 2.0));
        assert!(approx(natural.x, 89.6));
        assert!(approx(natural.y, 31.0));
    }

    #[test]
    fn test_assets_keyed_by_kind() {
        assert_eq!(frame_asset(DeviceKind::Iphone).width, 300);
        assert_eq!(frame_asset(DeviceKind::Macbook).height, 500);
        assert_eq!(screen_insets(DeviceKind::Macbook), MACBOOK_SCREEN);
    }
}
