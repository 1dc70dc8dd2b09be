//! Mockup Studio window implemented with egui/eframe

use std::time::Instant;

use anyhow::{Result, anyhow};
use eframe::{CreationContext, NativeOptions, egui};
use tracing::{debug, info};

use super::components::action_buttons::{Action, ActionButtons};
use super::components::background_image_controls::{self, BackgroundImageState};
use super::components::{
    device_selector, fullscreen_overlay, gradient_controls, preset_gradients, shadow_controls, website_settings,
};
use super::constants::*;
use super::image::TextureCache;
use super::paint;
use crate::config::{ConfigPatch, ConfigStore};
use crate::persistence::SettingsStorage;
use crate::render;
use crate::session::{ScrollIndicators, Session};

/// Window launch options decided on the command line
#[derive(Debug, Clone, Copy, Default)]
pub struct LaunchOptions {
    pub start_fullscreen: bool,
    /// Keep the URL editable in the fullscreen overlay
    pub allow_url_edit_in_fullscreen: bool,
}

struct MockupApp {
    store: ConfigStore<Box<dyn SettingsStorage>>,
    session: Session,
    textures: TextureCache,
    actions: ActionButtons,
    background_state: BackgroundImageState,
    options: LaunchOptions,
    applied_dark_mode: Option<bool>,
}

impl MockupApp {
    fn new(cc: &CreationContext<'_>, store: ConfigStore<Box<dyn SettingsStorage>>, options: LaunchOptions) -> Self {
        info!("Initializing mockup studio window");
        let now = Instant::now();
        let mut app = Self {
            store,
            session: Session::new(now),
            textures: TextureCache::default(),
            actions: ActionButtons::new(),
            background_state: BackgroundImageState::new(),
            options,
            applied_dark_mode: None,
        };
        app.apply_theme(&cc.egui_ctx);
        if options.start_fullscreen {
            app.request_fullscreen(&cc.egui_ctx, true, now);
        }
        app
    }

    fn apply(&mut self, patch: ConfigPatch) {
        if self.store.update(&patch) {
            debug!("Configuration updated");
        }
    }

    fn apply_theme(&mut self, ctx: &egui::Context) {
        let dark = self.store.config().is_dark_mode;
        if self.applied_dark_mode == Some(dark) {
            return;
        }
        ctx.set_visuals(if dark { egui::Visuals::dark() } else { egui::Visuals::light() });
        self.applied_dark_mode = Some(dark);
    }

    fn request_fullscreen(&mut self, ctx: &egui::Context, target: bool, now: Instant) {
        if self.session.fullscreen.request(target, now) {
            ctx.send_viewport_cmd(egui::ViewportCommand::Fullscreen(target));
        }
    }

    fn handle_action(&mut self, ctx: &egui::Context, action: Action, now: Instant) {
        match action {
            Action::None => {}
            Action::ToggleFullscreen => {
                let target = !self.session.fullscreen.is_fullscreen();
                self.request_fullscreen(ctx, target, now);
            }
            Action::ToggleDarkMode => {
                let dark = !self.store.config().is_dark_mode;
                self.apply(ConfigPatch::dark_mode(dark));
            }
            Action::RefreshContent => self.session.refresh_content(),
            Action::ResetSettings => {
                self.store.reset();
                self.textures = TextureCache::default();
            }
        }
    }

    fn control_panel(&mut self, ui: &mut egui::Ui, now: Instant) {
        ui.add_space(SECTION_SPACING);
        ui.heading("Mockup Studio");
        ui.add_space(ITEM_SPACING);

        let indicators = self.session.scroll;
        if indicators.can_scroll_up {
            ui.vertical_centered(|ui| ui.weak("▲ more above"));
        }

        let scroll = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .max_height(ui.available_height() - if indicators.can_scroll_down { 24.0 } else { 0.0 })
            .show(ui, |ui| {
                let mut patch = ConfigPatch::default();
                let config = self.store.config().clone();

                patch = patch.merge(device_selector::ui(ui, &config));
                ui.add_space(SECTION_SPACING);
                patch = patch.merge(website_settings::ui(ui, &config, true));
                ui.add_space(SECTION_SPACING);
                patch = patch.merge(shadow_controls::ui(ui, &config.shadow));
                ui.add_space(SECTION_SPACING);
                patch = patch.merge(gradient_controls::ui(ui, &config.gradient));
                ui.add_space(SECTION_SPACING);
                patch = patch.merge(background_image_controls::ui(
                    ui,
                    &config.background_image,
                    &mut self.background_state,
                    &mut self.textures,
                ));
                ui.add_space(SECTION_SPACING);
                let action = self.actions.ui(
                    ui,
                    self.session.fullscreen.is_fullscreen(),
                    config.is_dark_mode,
                );
                ui.add_space(SECTION_SPACING);
                patch = patch.merge(preset_gradients::ui(ui, &config.gradient));
                ui.add_space(SECTION_SPACING);
                (patch, action)
            });

        let (patch, action) = scroll.inner;
        self.session.scroll = ScrollIndicators::measure(
            scroll.state.offset.y,
            scroll.content_size.y,
            scroll.inner_rect.height(),
        );
        if indicators.can_scroll_down {
            ui.vertical_centered(|ui| ui.weak("▼ more below"));
        }

        self.apply(patch);
        self.handle_action(ui.ctx(), action, now);
    }

    fn display(&mut self, ui: &mut egui::Ui, now: Instant) {
        let rect = ui.max_rect();
        let composition = render::compose(self.store.config(), &self.session.render_context());
        let painter = ui.painter_at(rect);
        let surfaces = paint::paint_composition(&painter, rect, &composition, &mut self.textures);

        for (index, (content, source)) in surfaces.into_iter().enumerate() {
            let Some(url) = source else { continue };
            let response = ui
                .interact(content, ui.id().with(("content_surface", index)), egui::Sense::click())
                .on_hover_cursor(egui::CursorIcon::PointingHand)
                .on_hover_text(&url);
            if response.clicked() {
                info!(url = %url, "Opening content in browser");
                ui.ctx().open_url(egui::OpenUrl::new_tab(url));
            }
        }

        if self.session.fullscreen.is_fullscreen() {
            let pointer_x = ui.ctx().pointer_hover_pos().map(|p| p.x);
            self.session.overlay.hover(pointer_x, rect.min.x, now);
        }
    }
}

impl eframe::App for MockupApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();

        let platform_fullscreen = ctx.input(|i| i.viewport().fullscreen).unwrap_or(false);
        self.session.sync_fullscreen(platform_fullscreen, now);
        self.session.tick(now);
        self.apply_theme(ctx);

        let fullscreen = self.session.fullscreen.is_fullscreen();
        if !fullscreen {
            egui::SidePanel::left("control_panel")
                .resizable(false)
                .exact_width(PANEL_WIDTH)
                .show(ctx, |ui| self.control_panel(ui, now));
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::NONE)
            .show(ctx, |ui| self.display(ui, now));

        if fullscreen && self.session.overlay.is_visible() {
            let output = fullscreen_overlay::show(ctx, self.store.config(), self.options.allow_url_edit_in_fullscreen);
            if output.interacted {
                self.session.overlay.touch(now);
            }
            if output.refresh {
                self.session.refresh_content();
            }
            if output.close {
                self.session.overlay.close();
            }
            self.apply(output.patch);
        }

        if fullscreen && ctx.input(|i| i.key_pressed(egui::Key::Escape)) {
            self.request_fullscreen(ctx, false, now);
        }

        self.store.flush_due(now);

        let mut deadline = self.session.next_deadline(now);
        if let Some(flush_at) = self.store.flush_deadline() {
            deadline = deadline.min(flush_at);
        }
        ctx.request_repaint_after(deadline.saturating_duration_since(now));
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.store.flush();
        info!("Mockup studio exiting");
    }
}

pub fn run_gui(store: ConfigStore<Box<dyn SettingsStorage>>, options: LaunchOptions) -> Result<()> {
    let native_options = NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([WINDOW_WIDTH, WINDOW_HEIGHT])
            .with_min_inner_size([WINDOW_MIN_WIDTH, WINDOW_MIN_HEIGHT])
            .with_title("Mockup Studio"),
        ..Default::default()
    };

    eframe::run_native(
        "Mockup Studio",
        native_options,
        Box::new(move |cc| Ok(Box::new(MockupApp::new(cc, store, options)))),
    )
    .map_err(|err| anyhow!("Failed to launch mockup studio window: {err}"))
}
