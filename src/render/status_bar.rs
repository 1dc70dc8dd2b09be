//! Simulated phone status bar

use chrono::NaiveTime;
use serde::Serialize;

use crate::color::HexColor;
use crate::constants::layout;

const BLACK: HexColor = HexColor::new(0, 0, 0);
const WHITE: HexColor = HexColor::new(255, 255, 255);

/// Signal strength bar heights, left to right
pub const SIGNAL_BAR_HEIGHTS_PX: [f32; 4] = [4.0, 6.0, 8.0, 10.0];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatusBar {
    pub time: String,
    pub height_px: f64,
    pub battery_percent: u8,
    #[serde(serialize_with = "serialize_color")]
    pub foreground: HexColor,
    #[serde(serialize_with = "serialize_color")]
    pub background: HexColor,
}

impl StatusBar {
    pub fn new(time: NaiveTime, dark: bool) -> Self {
        let (foreground, background) = if dark { (WHITE, BLACK) } else { (BLACK, WHITE) };
        Self {
            time: format_status_time(time),
            height_px: layout::STATUS_BAR_HEIGHT_PX,
            battery_percent: layout::BATTERY_LEVEL_PERCENT,
            foreground,
            background,
        }
    }

    pub fn battery_fraction(&self) -> f32 {
        f32::from(self.battery_percent) / 100.0
    }
}

/// 24-hour clock, hour without padding: `9:05`, `17:42`
pub fn format_status_time(time: NaiveTime) -> String {
    time.format("%-H:%M").to_string()
}

fn serialize_color<S: serde::Serializer>(color: &HexColor, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(color)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(hour: u32, minute: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(hour, minute, 0).unwrap()
    }

    #[test]
    fn test_time_format() {
        assert_eq!(format_status_time(at(9, 5)), "9:05");
        assert_eq!(format_status_time(at(0, 0)), "0:00");
        assert_eq!(format_status_time(at(17, 42)), "17:42");
    }

    #[test]
    fn test_colors_invert_in_dark_mode() {
        let light = StatusBar::new(at(12, 0), false);
        let dark = StatusBar::new(at(12, 0), true);
        assert_eq!(light.foreground, dark.background);
        assert_eq!(light.background, dark.foreground);
        assert_eq!(dark.foreground.to_hex_string(), "#ffffff");
    }

    #[test]
    fn test_fixed_chrome() {
        let bar = StatusBar::new(at(8, 30), false);
        assert_eq!(bar.height_px, 44.0);
        assert_eq!(bar.battery_percent, 85);
        assert!((bar.battery_fraction() - 0.85).abs() < f32::EPSILON);
    }

    #[test]
    fn test_serializes_colors_as_hex() {
        let value = serde_json::to_value(StatusBar::new(at(8, 30), true)).unwrap();
        assert_eq!(value["foreground"], "#ffffff");
        assert_eq!(value["time"], "8:30");
    }
}
