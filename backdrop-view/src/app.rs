//! Full-window particle backdrop behind a small piece of page content.
//!
//! [`BackdropApp`] owns the egui host plumbing and, while mounted, the
//! [`Backdrop`] handle. Every egui frame it:
//! 1. Lays out the central panel and records its rect as the drawing area.
//! 2. Forwards pointer, touch and resize input to the backdrop.
//! 3. Runs the pending backdrop frame, if any, onto the panel painter.
//! 4. Draws the foreground content on top.

use backdrop_core::Backdrop;
use rand::rngs::ThreadRng;

use crate::{
    host::{EguiHost, EguiSurface},
    settings::Settings,
};

pub struct BackdropApp {
    settings: Settings,
    host: EguiHost,
    backdrop: Option<Backdrop>,
    rng: ThreadRng,

    /// Whether the backdrop should be shown; toggled with Space.
    enabled: bool,
    /// Size of the area a mount last failed in. Not retried until the area
    /// changes to a non-empty size.
    mount_failed: Option<egui::Vec2>,
}

impl BackdropApp {
    pub fn new(settings: Settings, ctx: Option<egui::Context>) -> Self {
        Self {
            settings,
            host: EguiHost::new(ctx),
            backdrop: None,
            rng: rand::rng(),
            enabled: true,
            mount_failed: None,
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.backdrop.is_some()
    }

    pub fn backdrop(&self) -> Option<&Backdrop> {
        self.backdrop.as_ref()
    }

    /// Mounts a fresh backdrop into `rect`.
    ///
    /// Failure is logged by the core and leaves the page without a backdrop
    /// until the drawing area is resized to something non-empty.
    fn mount(&mut self, rect: egui::Rect) {
        if self.backdrop.is_some() {
            return;
        }
        if let Some(failed) = self.mount_failed {
            let usable = rect.width() > 0.0 && rect.height() > 0.0;
            if !usable || failed == rect.size() {
                return;
            }
        }
        match Backdrop::mount(&mut self.host, self.settings.field, &mut self.rng) {
            Ok(b) => {
                self.backdrop = Some(b);
                self.mount_failed = None;
            }
            Err(_) => self.mount_failed = Some(rect.size()),
        }
    }

    fn unmount(&mut self) {
        if let Some(b) = self.backdrop.take() {
            b.unmount(&mut self.host);
        }
    }

    /// Shows or hides the backdrop. Showing it again mounts a new field.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        if enabled {
            self.mount_failed = None;
        } else {
            self.unmount();
        }
    }

    /// One host frame for the given drawing area.
    ///
    /// ### Parameters
    /// - `rect` - Screen rect the backdrop fills.
    /// - `input` - This frame's egui input.
    /// - `painter` - Painter clipped to `rect`.
    fn frame(&mut self, rect: egui::Rect, input: &egui::InputState, painter: &egui::Painter) {
        self.host.set_surface_rect(rect);

        if self.enabled {
            self.mount(rect);
        }

        let Some(backdrop) = self.backdrop.as_mut() else {
            painter.rect_filled(rect, 0.0, self.settings.background());
            return;
        };

        for ev in self.host.collect_events(input) {
            backdrop.handle_event(ev);
        }

        let mut surface = EguiSurface::new(painter, rect, self.settings.background());
        match self.host.take_due() {
            Some(request) => {
                backdrop.tick(&mut self.host, request, &mut surface);
            }
            // Repaint triggered by something else before our request fired.
            None => {
                painter.rect_filled(rect, 0.0, self.settings.background());
            }
        }
    }

    fn ui_content(&self, ui: &mut egui::Ui) {
        ui.vertical_centered(|ui| {
            ui.add_space(ui.available_height() * 0.35);
            ui.heading(egui::RichText::new("Hello there.").size(40.0).strong());
            ui.label("Move the pointer around the window.");
            ui.add_space(12.0);

            let status = match &self.backdrop {
                Some(b) => format!(
                    "{} particles · {} links · frame {}",
                    b.scheduler().field().len(),
                    b.scheduler().connections().len(),
                    b.scheduler().frames()
                ),
                None if self.mount_failed.is_some() => "backdrop unavailable".to_string(),
                None => "backdrop off".to_string(),
            };
            ui.label(egui::RichText::new(status).weak());
            ui.label(egui::RichText::new("Space toggles the backdrop").weak().small());
        });
    }
}

impl eframe::App for BackdropApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if ctx.input(|i| i.key_pressed(egui::Key::Space)) {
            self.set_enabled(!self.enabled);
        }

        egui::CentralPanel::default()
            .frame(egui::Frame::new())
            .show(ctx, |ui| {
                let rect = ui.max_rect();
                let painter = ui.painter_at(rect);
                // Cloned so no context lock is held while the backdrop requests repaints.
                let input = ctx.input(|i| i.clone());
                self.frame(rect, &input, &painter);

                self.ui_content(ui);
            });
    }
}

impl Drop for BackdropApp {
    fn drop(&mut self) {
        self.unmount();
    }
}
