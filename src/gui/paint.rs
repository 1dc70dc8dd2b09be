//! Painting a `Composition` with the egui painter
//!
//! The renderer decides what goes where; this module only maps those values
//! onto screen rectangles and paint calls.

use eframe::egui::{self, Color32, CornerRadius, Pos2, Rect, Stroke, StrokeKind, Vec2, epaint};

use crate::color::HexColor;
use crate::config::DeviceKind;
use crate::config::settings::Gradient;
use crate::render::{Composition, DeviceLayer, DropShadow, ImageLayer, LinearGradient, StatusBar};
use crate::render::status_bar::SIGNAL_BAR_HEIGHTS_PX;

use super::constants::*;

/// Parse a user-entered color, painting invalid text with `fallback`
fn hex_or(text: &str, fallback: &str) -> HexColor {
    HexColor::parse(text)
        .or_else(|| HexColor::parse(fallback))
        .unwrap_or(HexColor::new(0, 0, 0))
}

fn hex_to_color32(color: HexColor) -> Color32 {
    Color32::from_rgb(color.r, color.g, color.b)
}

/// Where each device of the composition is drawn inside `area`, before
/// `device_scale` is applied
pub fn layout_devices(composition: &Composition, area: Rect) -> Vec<Rect> {
    let padding = if composition.fullscreen { DISPLAY_PADDING_FULLSCREEN } else { DISPLAY_PADDING };
    let inner = area.shrink(padding);
    let count = composition.devices.len();
    if count == 0 {
        return Vec::new();
    }

    // Fullscreen heights are relative to the whole viewport
    let viewport_height = if composition.fullscreen { area.height() } else { inner.height() };
    let gaps = DEVICE_GAP * (count - 1) as f32;
    let slot_width = ((inner.width() - gaps) / count as f32).max(0.0);

    let mut sizes: Vec<Vec2> = composition
        .devices
        .iter()
        .map(|device| {
            let (w, h) = device.sizing.resolve(&device.frame, f64::from(slot_width), f64::from(viewport_height));
            egui::vec2(w as f32, h as f32)
        })
        .collect();

    // Never taller than the display
    let tallest = sizes.iter().map(|s| s.y).fold(0.0, f32::max);
    if tallest > inner.height() && tallest > 0.0 {
        let shrink = inner.height() / tallest;
        for size in &mut sizes {
            *size *= shrink;
        }
    }

    let total_width: f32 = sizes.iter().map(|s| s.x).sum::<f32>() + gaps;
    let mut x = inner.center().x - total_width / 2.0;
    sizes
        .into_iter()
        .map(|size| {
            let rect = Rect::from_min_size(egui::pos2(x, inner.center().y - size.y / 2.0), size);
            x += size.x + DEVICE_GAP;
            rect
        })
        .collect()
}

/// `rect` scaled about its center
pub fn scaled_about_center(rect: Rect, scale: f32) -> Rect {
    Rect::from_center_size(rect.center(), rect.size() * scale)
}

/// Linear gradient as a vertex-colored quad. The gradient parameter is affine
/// over the box so two triangles reproduce it exactly.
pub fn paint_gradient(painter: &egui::Painter, rect: Rect, gradient: &LinearGradient) {
    let fallback = Gradient::default();
    let start = hex_or(&gradient.start_color, &fallback.start_color);
    let end = hex_or(&gradient.end_color, &fallback.end_color);

    let (w, h) = (f64::from(rect.width()), f64::from(rect.height()));
    let corners = [rect.left_top(), rect.right_top(), rect.right_bottom(), rect.left_bottom()];

    let mut mesh = epaint::Mesh::default();
    for corner in corners {
        let local = corner - rect.min;
        let t = gradient.parameter_at(w, h, f64::from(local.x), f64::from(local.y));
        mesh.vertices.push(epaint::Vertex {
            pos: corner,
            uv: epaint::WHITE_UV,
            color: hex_to_color32(start.lerp(end, t as f32)),
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.add(egui::Shape::mesh(mesh));
}

/// Background image centered in `rect`, offset, scaled and rotated about its
/// own center, clipped to the display
pub fn paint_background_image(painter: &egui::Painter, rect: Rect, layer: &ImageLayer, texture: &egui::TextureHandle) {
    let size = texture.size_vec2() * layer.scale as f32;
    let center = rect.center() + egui::vec2(layer.offset_x as f32, layer.offset_y as f32);
    let angle = (layer.rotation_degrees as f32).to_radians();
    let rotation = egui::emath::Rot2::from_angle(angle);

    let half = size / 2.0;
    let corners = [
        (egui::vec2(-half.x, -half.y), egui::pos2(0.0, 0.0)),
        (egui::vec2(half.x, -half.y), egui::pos2(1.0, 0.0)),
        (egui::vec2(half.x, half.y), egui::pos2(1.0, 1.0)),
        (egui::vec2(-half.x, half.y), egui::pos2(0.0, 1.0)),
    ];

    let mut mesh = epaint::Mesh::with_texture(texture.id());
    for (offset, uv) in corners {
        mesh.vertices.push(epaint::Vertex {
            pos: center + rotation * offset,
            uv,
            color: Color32::WHITE,
        });
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    painter.with_clip_rect(rect).add(egui::Shape::mesh(mesh));
}

/// Screen-space geometry of one drawn device
#[derive(Debug, Clone, Copy)]
pub struct DeviceGeometry {
    pub frame: Rect,
    pub screen: Rect,
    /// Pixel scale of CSS lengths (device scale transform)
    pub unit: f32,
}

impl DeviceGeometry {
    pub fn new(layer: &DeviceLayer, slot: Rect) -> Self {
        let unit = layer.device_scale as f32;
        let frame = scaled_about_center(slot, unit);
        let cutout = layer.screen.rect_within(f64::from(frame.width()), f64::from(frame.height()));
        let screen = Rect::from_min_size(
            frame.min + egui::vec2(cutout.x as f32, cutout.y as f32),
            egui::vec2(cutout.width as f32, cutout.height as f32),
        );
        Self { frame, screen, unit }
    }

    pub fn corner_radius(&self, layer: &DeviceLayer) -> CornerRadius {
        let radius = (layer.corner_radius_px as f32 * self.unit).round().clamp(0.0, 255.0);
        CornerRadius::same(radius as u8)
    }

    /// Area of the content surface proper, below the reserved top margin
    pub fn content(&self, layer: &DeviceLayer) -> Rect {
        let mut content = self.screen;
        content.min.y = (content.min.y + layer.content.top_margin_px as f32 * self.unit).min(content.max.y);
        content
    }
}

fn frame_rounding(kind: DeviceKind, frame: Rect) -> CornerRadius {
    let radius = match kind {
        DeviceKind::Iphone => frame.width() * 0.14,
        DeviceKind::Macbook => frame.width() * 0.01,
    };
    CornerRadius::same(radius.clamp(0.0, 255.0) as u8)
}

fn paint_drop_shadow(painter: &egui::Painter, rect: Rect, rounding: CornerRadius, shadow: &DropShadow, unit: f32) {
    let alpha = (shadow.opacity.clamp(0.0, 1.0) * 255.0).round() as u8;
    if alpha == 0 {
        return;
    }
    let offset_y = (shadow.offset_y_px as f32 * unit).round().clamp(-128.0, 127.0) as i8;
    let blur = (shadow.blur_px as f32 * unit).round().clamp(0.0, 255.0) as u8;
    let shape = epaint::Shadow {
        offset: [0, offset_y],
        blur,
        spread: 0,
        color: Color32::from_black_alpha(alpha),
    }
    .as_shape(rect, rounding);
    painter.add(shape);
}

/// Paint one device: shadow, frame, content surface, status chrome.
/// Returns the screen geometry so the caller can attach interactions.
pub fn paint_device(
    painter: &egui::Painter,
    layer: &DeviceLayer,
    slot: Rect,
    frame_texture: Option<&egui::TextureHandle>,
) -> DeviceGeometry {
    let geometry = DeviceGeometry::new(layer, slot);
    let rounding = frame_rounding(layer.kind, geometry.frame);

    if let Some(shadow) = &layer.shadow {
        paint_drop_shadow(painter, geometry.frame, rounding, &shadow.primary, geometry.unit);
        paint_drop_shadow(painter, geometry.frame, rounding, &shadow.secondary, geometry.unit);
    }

    match frame_texture {
        Some(texture) => {
            let uv = Rect::from_min_max(Pos2::ZERO, egui::pos2(1.0, 1.0));
            painter.image(texture.id(), geometry.frame, uv, Color32::WHITE);
        }
        None => {
            painter.rect_filled(geometry.frame, rounding, Color32::from_gray(30));
        }
    }

    let screen_radius = geometry.corner_radius(layer);
    painter.rect_filled(geometry.screen, screen_radius, CONTENT_BACKGROUND);
    paint_content_placeholder(&painter.with_clip_rect(geometry.screen), layer, &geometry);

    if let Some(status_bar) = &layer.status_bar {
        paint_status_bar(&painter.with_clip_rect(geometry.screen), status_bar, &geometry, screen_radius);
    }

    geometry
}

fn paint_content_placeholder(painter: &egui::Painter, layer: &DeviceLayer, geometry: &DeviceGeometry) {
    let content = geometry.content(layer);
    let zoom = layer.content.scale as f32 * geometry.unit;
    let font = |size: f32| egui::FontId::proportional((size * zoom).max(1.0));

    match &layer.content.source {
        Some(source) => {
            let host = source
                .split_once("://")
                .map(|(_, rest)| rest.split(['/', '?', '#']).next().unwrap_or(rest))
                .unwrap_or(source);
            let top = content.center_top() + egui::vec2(0.0, 32.0 * zoom);
            painter.text(top, egui::Align2::CENTER_TOP, host, font(20.0), CONTENT_TEXT);
            painter.text(
                top + egui::vec2(0.0, 32.0 * zoom),
                egui::Align2::CENTER_TOP,
                "Click to open in browser",
                font(12.0),
                CONTENT_TEXT,
            );
        }
        None => {
            painter.text(
                content.center(),
                egui::Align2::CENTER_CENTER,
                "Enter a valid http(s) URL",
                font(14.0),
                CONTENT_INVALID_TEXT,
            );
        }
    }
}

fn paint_status_bar(painter: &egui::Painter, bar: &StatusBar, geometry: &DeviceGeometry, screen_radius: CornerRadius) {
    let unit = geometry.unit;
    let screen = geometry.screen;
    let rect = Rect::from_min_size(screen.min, egui::vec2(screen.width(), bar.height_px as f32 * unit));
    let fg = hex_to_color32(bar.foreground);
    let bg = hex_to_color32(bar.background);

    let top_radius = CornerRadius { nw: screen_radius.nw, ne: screen_radius.ne, sw: 0, se: 0 };
    painter.rect_filled(rect, top_radius, bg);

    let notch = Rect::from_min_size(
        egui::pos2(rect.center().x - NOTCH_WIDTH * unit / 2.0, rect.min.y),
        egui::vec2(NOTCH_WIDTH * unit, NOTCH_HEIGHT * unit),
    );
    let notch_radius = (24.0 * unit).clamp(0.0, 255.0) as u8;
    painter.rect_filled(notch, CornerRadius { nw: 0, ne: 0, sw: notch_radius, se: notch_radius }, NOTCH_COLOR);

    let padding = 24.0 * unit;
    painter.text(
        egui::pos2(rect.min.x + padding, rect.center().y),
        egui::Align2::LEFT_CENTER,
        &bar.time,
        egui::FontId::proportional(14.0 * unit),
        fg,
    );

    // Right cluster, laid out right to left: battery, wifi, signal
    let mut x = rect.max.x - padding;
    let cy = rect.center().y;

    let nub = Rect::from_min_size(egui::pos2(x - 2.0 * unit, cy - 3.0 * unit), egui::vec2(2.0 * unit, 6.0 * unit));
    painter.rect_filled(nub, CornerRadius::same(1), fg);
    x -= 4.0 * unit;
    let battery = Rect::from_min_size(egui::pos2(x - 24.0 * unit, cy - 6.0 * unit), egui::vec2(24.0 * unit, 12.0 * unit));
    painter.rect_stroke(battery, CornerRadius::same(2), Stroke::new(1.0, fg), StrokeKind::Inside);
    let inner = battery.shrink(2.0 * unit);
    let fill = Rect::from_min_size(inner.min, egui::vec2(inner.width() * bar.battery_fraction(), inner.height()));
    painter.rect_filled(fill, CornerRadius::same(1), fg);
    x = battery.min.x - 4.0 * unit;

    let wifi_center = egui::pos2(x - 8.0 * unit, cy + 5.0 * unit);
    painter.circle_filled(wifi_center, 1.5 * unit, fg);
    for radius in [5.0, 9.0] {
        paint_arc(painter, wifi_center, radius * unit, Stroke::new(1.5 * unit, fg));
    }
    x -= 20.0 * unit;

    for (i, height) in SIGNAL_BAR_HEIGHTS_PX.iter().rev().enumerate() {
        let bar_x = x - (i as f32 + 1.0) * 6.0 * unit;
        let bar_rect = Rect::from_min_size(
            egui::pos2(bar_x, cy + 5.0 * unit - height * unit),
            egui::vec2(4.0 * unit, height * unit),
        );
        painter.rect_filled(bar_rect, CornerRadius::same(2), fg);
    }
}

/// Upper quarter-circle pair (the Wi-Fi glyph arcs)
fn paint_arc(painter: &egui::Painter, center: Pos2, radius: f32, stroke: Stroke) {
    let points: Vec<Pos2> = (0..=12)
        .map(|i| {
            let angle = (-135.0 + 90.0 * i as f32 / 12.0_f32).to_radians();
            center + radius * egui::vec2(angle.cos(), angle.sin())
        })
        .collect();
    painter.add(egui::Shape::line(points, stroke));
}

/// Paint the whole composition into `rect`. Returns the content rectangle of
/// every device with its source URL, for click handling.
pub fn paint_composition(
    painter: &egui::Painter,
    rect: Rect,
    composition: &Composition,
    textures: &mut super::image::TextureCache,
) -> Vec<(Rect, Option<String>)> {
    let ctx = painter.ctx().clone();
    paint_gradient(painter, rect, &composition.background.gradient);

    if let Some(image) = &composition.background.image
        && let Some(texture) = textures.background(&ctx, &image.source)
    {
        paint_background_image(painter, rect, image, &texture);
    }

    let slots = layout_devices(composition, rect);
    composition
        .devices
        .iter()
        .zip(slots)
        .map(|(layer, slot)| {
            let texture = textures.frame(&ctx, layer.kind);
            let geometry = paint_device(painter, layer, slot, texture.as_ref());
            (geometry.content(layer), layer.content.source.clone())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ConfigPatch, Configuration};
    use crate::render::{RenderContext, compose};
    use chrono::NaiveTime;
    use serde_json::json;

    fn composition(value: serde_json::Value, fullscreen: bool) -> Composition {
        let patch: ConfigPatch = serde_json::from_value(value).unwrap();
        let config = Configuration::default().with_patch(&patch);
        let context = RenderContext {
            is_fullscreen: fullscreen,
            ..RenderContext::new(NaiveTime::from_hms_opt(10, 0, 0).unwrap())
        };
        compose(&config, &context)
    }

    fn area(width: f32, height: f32) -> Rect {
        Rect::from_min_size(Pos2::ZERO, egui::vec2(width, height))
    }

    #[test]
    fn test_color_fallback() {
        assert_eq!(hex_or("#ff0000", "#000000"), HexColor::new(255, 0, 0));
        assert_eq!(hex_or("oops", "#00ff00"), HexColor::new(0, 255, 0));
    }

    #[test]
    fn test_single_device_centered_at_natural_size() {
        let rects = layout_devices(&composition(json!({}), false), area(1000.0, 800.0));
        assert_eq!(rects.len(), 1);
        assert_eq!(rects[0].size(), egui::vec2(300.0, 600.0));
        assert_eq!(rects[0].center(), egui::pos2(500.0, 400.0));
    }

    #[test]
    fn test_device_shrinks_to_display_height() {
        let rects = layout_devices(&composition(json!({}), false), area(1000.0, 364.0));
        assert_eq!(rects[0].size(), egui::vec2(150.0, 300.0));
    }

    #[test]
    fn test_fullscreen_uses_viewport_height() {
        let rects = layout_devices(&composition(json!({}), true), area(1920.0, 1000.0));
        assert_eq!(rects[0].height(), 850.0);
        assert_eq!(rects[0].width(), 425.0);
    }

    #[test]
    fn test_both_devices_side_by_side() {
        let rects = layout_devices(&composition(json!({"activeDevice": "both"}), false), area(2000.0, 800.0));
        assert_eq!(rects.len(), 2);
        assert!((rects[0].max.x + DEVICE_GAP - rects[1].min.x).abs() < 0.01);
        assert_eq!(rects[0].size(), egui::vec2(800.0, 500.0));
        assert_eq!(rects[1].size(), egui::vec2(300.0, 600.0));
    }

    #[test]
    fn test_device_geometry_applies_scale_and_margin() {
        let composition = composition(json!({"iphone": {"deviceScale": 0.5}}), false);
        let layer = &composition.devices[0];
        let slot = Rect::from_min_size(Pos2::ZERO, egui::vec2(300.0, 600.0));
        let geometry = DeviceGeometry::new(layer, slot);

        assert_eq!(geometry.frame.size(), egui::vec2(150.0, 300.0));
        assert_eq!(geometry.frame.center(), slot.center());
        assert!((geometry.content(layer).min.y - geometry.screen.min.y - 22.0).abs() < 0.01);
        assert_eq!(geometry.corner_radius(layer), CornerRadius::same(25));
    }
}
