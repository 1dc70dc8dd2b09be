//! Image loading for the display
//!
//! Device frames are bundled PNGs. Custom backgrounds are stored in the
//! settings as `data:image/<type>;base64,...` URIs and decoded on demand.

use std::collections::HashMap;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::path::Path;

use anyhow::{Context, Result, anyhow};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use eframe::egui;
use tracing::{debug, error, info, warn};

use crate::config::DeviceKind;

/// Decode encoded image bytes (any enabled format) into an RGBA image
pub fn decode_image(bytes: &[u8]) -> Result<egui::ColorImage> {
    let rgba = image::load_from_memory(bytes).context("Failed to decode image")?.to_rgba8();
    let size = [rgba.width() as usize, rgba.height() as usize];
    Ok(egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw()))
}

/// Wrap image bytes in a data URI carrying their detected MIME type
pub fn image_data_uri(bytes: &[u8]) -> Result<String> {
    let format = image::guess_format(bytes).context("Unrecognized image format")?;
    Ok(format!("data:{};base64,{}", format.to_mime_type(), STANDARD.encode(bytes)))
}

/// Read an image file and return it as a data URI
pub fn load_image_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;
    // Decode once so a broken file is rejected before it reaches the settings
    decode_image(&bytes).with_context(|| format!("Failed to decode image {}", path.display()))?;
    let uri = image_data_uri(&bytes).with_context(|| format!("Unsupported image {}", path.display()))?;
    info!(path = %path.display(), bytes = bytes.len(), "Loaded background image");
    Ok(uri)
}

/// Base64 payload of a `data:image/<type>;base64,...` URI
fn data_uri_payload(uri: &str) -> Result<&str> {
    let (header, payload) = uri
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(','))
        .ok_or_else(|| anyhow!("Not a data URI"))?;
    let media_type = header
        .strip_suffix(";base64")
        .ok_or_else(|| anyhow!("Only base64 data URIs are supported"))?;
    if !media_type.starts_with("image/") {
        return Err(anyhow!("Data URI is not an image: {media_type}"));
    }
    Ok(payload)
}

/// Decode a `data:image/<type>;base64,...` URI
pub fn decode_data_uri(uri: &str) -> Result<egui::ColorImage> {
    let payload = data_uri_payload(uri)?;
    let bytes = STANDARD.decode(payload.trim()).context("Invalid base64 payload")?;
    decode_image(&bytes)
}

fn frame_bytes(kind: DeviceKind) -> &'static [u8] {
    match kind {
        DeviceKind::Iphone => include_bytes!("../../assets/iphone-frame.png"),
        DeviceKind::Macbook => include_bytes!("../../assets/macbook-frame.png"),
    }
}

/// Bundled frame artwork for a device kind
pub fn frame_image(kind: DeviceKind) -> Result<egui::ColorImage> {
    decode_image(frame_bytes(kind)).with_context(|| format!("Failed to decode {} frame", kind.label()))
}

/// GPU textures for frames and the current background image
#[derive(Default)]
pub struct TextureCache {
    frames: HashMap<DeviceKind, Option<egui::TextureHandle>>,
    background: Option<(u64, Option<egui::TextureHandle>)>,
}

impl TextureCache {
    /// Frame texture, `None` if the asset failed to decode (logged once)
    pub fn frame(&mut self, ctx: &egui::Context, kind: DeviceKind) -> Option<egui::TextureHandle> {
        self.frames
            .entry(kind)
            .or_insert_with(|| match frame_image(kind) {
                Ok(image) => {
                    debug!(device = kind.label(), "Uploaded frame texture");
                    Some(ctx.load_texture(format!("frame-{}", kind.label()), image, egui::TextureOptions::LINEAR))
                }
                Err(e) => {
                    error!(error = ?e, device = kind.label(), "Failed to load device frame");
                    None
                }
            })
            .clone()
    }

    /// Texture for a background data URI, re-decoded only when the URI changes
    pub fn background(&mut self, ctx: &egui::Context, uri: &str) -> Option<egui::TextureHandle> {
        let key = uri_key(uri);
        match &self.background {
            Some((cached, texture)) if *cached == key => texture.clone(),
            _ => {
                let texture = match decode_data_uri(uri) {
                    Ok(image) => Some(ctx.load_texture("background-image", image, egui::TextureOptions::LINEAR)),
                    Err(e) => {
                        warn!(error = ?e, "Failed to decode background image");
                        None
                    }
                };
                self.background = Some((key, texture.clone()));
                texture
            }
        }
    }
}

fn uri_key(uri: &str) -> u64 {
    let mut hasher = DefaultHasher::new();
    uri.hash(&mut hasher);
    hasher.finish()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
    use std::io::Cursor;

    fn encode(image: image::DynamicImage, format: ImageFormat) -> Vec<u8> {
        let mut out = Cursor::new(Vec::new());
        image.write_to(&mut out, format).unwrap();
        out.into_inner()
    }

    fn png_bytes(pixels: &[[u8; 4]]) -> Vec<u8> {
        let mut image = RgbaImage::new(pixels.len() as u32, 1);
        for (x, pixel) in pixels.iter().enumerate() {
            image.put_pixel(x as u32, 0, Rgba(*pixel));
        }
        encode(image.into(), ImageFormat::Png)
    }

    fn jpeg_bytes() -> Vec<u8> {
        let image = RgbImage::from_pixel(8, 4, Rgb([200, 200, 200]));
        encode(image.into(), ImageFormat::Jpeg)
    }

    #[test]
    fn test_decode_png_pixels() {
        let bytes = png_bytes(&[[255, 0, 0, 255], [0, 0, 255, 255]]);
        let image = decode_image(&bytes).unwrap();
        assert_eq!(image.size, [2, 1]);
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(255, 0, 0));
        assert_eq!(image.pixels[1], egui::Color32::from_rgb(0, 0, 255));
    }

    #[test]
    fn test_decode_grayscale_png() {
        let image = image::GrayImage::from_raw(1, 2, vec![0, 255]).unwrap();
        let decoded = decode_image(&encode(image.into(), ImageFormat::Png)).unwrap();
        assert_eq!(decoded.pixels[0], egui::Color32::BLACK);
        assert_eq!(decoded.pixels[1], egui::Color32::WHITE);
    }

    #[test]
    fn test_data_uri_roundtrip() {
        let bytes = png_bytes(&[[10, 20, 30, 255]]);
        let uri = image_data_uri(&bytes).unwrap();
        assert!(uri.starts_with("data:image/png;base64,"));

        let image = decode_data_uri(&uri).unwrap();
        assert_eq!(image.pixels[0], egui::Color32::from_rgb(10, 20, 30));
    }

    #[test]
    fn test_jpeg_keeps_its_mime_type() {
        let uri = image_data_uri(&jpeg_bytes()).unwrap();
        assert!(uri.starts_with("data:image/jpeg;base64,"));

        let image = decode_data_uri(&uri).unwrap();
        assert_eq!(image.size, [8, 4]);
        // Lossy, but a flat color stays close
        let pixel = image.pixels[0];
        assert!(pixel.r().abs_diff(200) <= 4);
        assert_eq!(pixel.a(), 255);
    }

    #[test]
    fn test_rejects_non_images() {
        assert!(image_data_uri(b"plain text, not an image").is_err());
        assert!(decode_data_uri("data:text/plain;base64,AAAA").is_err());
        assert!(decode_data_uri("data:image/png,rawdata").is_err());
        assert!(decode_data_uri("data:image/png;base64,!!!").is_err());
        assert!(decode_data_uri("https://example.com/bg.png").is_err());
    }

    #[test]
    fn test_load_image_file() -> Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("bg.png");
        std::fs::write(&path, png_bytes(&[[1, 2, 3, 255]]))?;
        let uri = load_image_file(&path)?;
        assert!(decode_data_uri(&uri).is_ok());

        let jpeg = dir.path().join("bg.jpg");
        std::fs::write(&jpeg, jpeg_bytes())?;
        assert!(load_image_file(&jpeg)?.starts_with("data:image/jpeg;base64,"));

        std::fs::write(&path, b"not an image")?;
        assert!(load_image_file(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_bundled_frames_match_declared_size() {
        use crate::render::device::frame_asset;
        for kind in [DeviceKind::Iphone, DeviceKind::Macbook] {
            let image = frame_image(kind).unwrap();
            let asset = frame_asset(kind);
            assert_eq!(image.size, [asset.width as usize, asset.height as usize]);
        }
    }
}
