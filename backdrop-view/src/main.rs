//! Application entry point for the particle backdrop viewer.
//!
//! Loads [`Settings`], sets up eframe/egui and hands everything else to
//! [`BackdropApp`].

use anyhow::anyhow;
use backdrop_view::{app::BackdropApp, settings::Settings};

/// Starts the native eframe application.
///
/// Settings that fail to load are replaced by defaults with a warning; the
/// backdrop is decoration and must never keep the window from opening.
///
/// ### Returns
/// - `Ok(())` once the window is closed.
/// - `Err` if eframe fails to create the native window or event loop.
fn main() -> anyhow::Result<()> {
    env_logger::init();
    log::info!("Starting particle backdrop viewer");

    let settings = Settings::load().unwrap_or_else(|e| {
        log::warn!("Failed to load settings: {e}. Using defaults.");
        Settings::default()
    });

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(settings.window.title.clone())
            .with_inner_size([settings.window.width, settings.window.height]),
        ..Default::default()
    };

    let title = settings.window.title.clone();
    eframe::run_native(
        &title,
        options,
        Box::new(|cc| Ok(Box::new(BackdropApp::new(settings, Some(cc.egui_ctx.clone()))))),
    )
    .map_err(|e| anyhow!("eframe failed: {e}"))
}
