//! Custom background image: load, clear and placement

use std::path::PathBuf;

use eframe::egui;
use tracing::warn;

use crate::config::settings::BackgroundImage;
use crate::config::{BackgroundImagePatch, ConfigPatch};
use crate::constants::limits;
use crate::gui::constants::{IMAGE_PREVIEW_HEIGHT, ITEM_SPACING, STATUS_ERROR, STATUS_OK, steps};
use crate::gui::image::{TextureCache, load_image_file};

/// State for the background image section
#[derive(Default)]
pub struct BackgroundImageState {
    path_input: String,
    load_error: Option<String>,
}

impl BackgroundImageState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the image at the typed path; on success the layer is enabled too
    fn load(&mut self) -> ConfigPatch {
        let path = PathBuf::from(self.path_input.trim());
        match load_image_file(&path) {
            Ok(uri) => {
                self.load_error = None;
                ConfigPatch::background_image(BackgroundImagePatch {
                    enabled: Some(true),
                    image_data: Some(uri),
                    ..BackgroundImagePatch::default()
                })
            }
            Err(e) => {
                warn!(error = ?e, path = %path.display(), "Rejected background image");
                self.load_error = Some(format!("{e:#}"));
                ConfigPatch::default()
            }
        }
    }
}

pub fn ui(
    ui: &mut egui::Ui,
    image: &BackgroundImage,
    state: &mut BackgroundImageState,
    textures: &mut TextureCache,
) -> ConfigPatch {
    let mut patch = ConfigPatch::default();

    ui.group(|ui| {
        super::heading(ui, "Custom Background Image");

        let mut enabled = image.enabled;
        if ui.checkbox(&mut enabled, "Enable Background Image").changed() {
            patch = ConfigPatch::background_image(BackgroundImagePatch {
                enabled: Some(enabled),
                ..BackgroundImagePatch::default()
            });
        }

        ui.add_space(ITEM_SPACING);
        ui.horizontal(|ui| {
            ui.label("Image file:");
            ui.add(
                egui::TextEdit::singleline(&mut state.path_input)
                    .hint_text("/path/to/background.jpg")
                    .desired_width(160.0),
            );
        });
        ui.horizontal(|ui| {
            let load_label = if image.has_image() { "📂 Replace Image" } else { "📂 Load Image" };
            if ui
                .add_enabled(!state.path_input.trim().is_empty(), egui::Button::new(load_label))
                .clicked()
            {
                patch = state.load();
            }
            if ui.add_enabled(image.has_image(), egui::Button::new("🗑 Remove")).clicked() {
                state.load_error = None;
                patch = ConfigPatch::clear_background_image();
            }
        });
        if let Some(error) = &state.load_error {
            ui.colored_label(STATUS_ERROR, error);
        }

        if image.has_image()
            && let Some(texture) = textures.background(ui.ctx(), &image.image_data)
        {
            ui.add_space(ITEM_SPACING);
            let size = texture.size_vec2();
            let height = IMAGE_PREVIEW_HEIGHT.min(size.y);
            let width = (size.x * height / size.y.max(1.0)).min(ui.available_width());
            ui.add(
                egui::Image::new(egui::load::SizedTexture::from_handle(&texture))
                    .fit_to_exact_size(egui::vec2(width, height)),
            );
            ui.colored_label(STATUS_OK, format!("✓ {}×{} px", size.x as u32, size.y as u32));
        }

        ui.add_space(ITEM_SPACING);
        let editable = image.is_visible();
        let placement = BackgroundImagePatch {
            offset_x: super::slider_i32(
                ui,
                "Offset X:",
                image.offset_x,
                limits::IMAGE_OFFSET_PX,
                steps::IMAGE_OFFSET_PX,
                " px",
                editable,
            ),
            offset_y: super::slider_i32(
                ui,
                "Offset Y:",
                image.offset_y,
                limits::IMAGE_OFFSET_PX,
                steps::IMAGE_OFFSET_PX,
                " px",
                editable,
            ),
            scale: super::slider_f64(
                ui,
                "Scale:",
                image.scale,
                limits::IMAGE_SCALE,
                steps::IMAGE_SCALE,
                "x",
                editable,
            ),
            rotation_degrees: super::slider_i32(
                ui,
                "Rotation:",
                image.rotation_degrees,
                limits::IMAGE_ROTATION_DEGREES,
                steps::IMAGE_ROTATION_DEGREES,
                "°",
                editable,
            ),
            ..BackgroundImagePatch::default()
        };
        if placement != BackgroundImagePatch::default() {
            patch = std::mem::take(&mut patch).merge(ConfigPatch::background_image(placement));
        }
    });

    patch
}
