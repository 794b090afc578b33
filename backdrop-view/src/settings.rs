//! Viewer settings
//!
//! Loaded from several sources, lowest to highest priority:
//! 1. `config/default.toml` (version controlled)
//! 2. `config/user.toml` (local overrides, not committed)
//! 3. Environment variables (`BACKDROP_SECTION__KEY`)
//!
//! egui repaints the whole window every frame, so a `trail` clear mode has
//! nothing to fade and is replaced by `hard` with a warning.

use backdrop_core::config::{ClearMode, Config};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub window: WindowSettings,
    /// Particle field tuning, passed straight to the core.
    #[serde(default)]
    pub field: Config,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowSettings {
    pub title: String,
    pub width: f32,
    pub height: f32,
    /// Page colour behind the particles, RGB.
    pub background: [u8; 3],
}

impl Default for WindowSettings {
    fn default() -> Self {
        Self {
            title: "Particle Backdrop".to_string(),
            width: 1280.0,
            height: 800.0,
            background: [14, 14, 18],
        }
    }
}

impl Settings {
    /// Loads settings from `./config` and the environment.
    pub fn load() -> Result<Self, figment::Error> {
        Self::load_from("config")
    }

    /// Loads settings from `config_dir` and the environment.
    ///
    /// Missing files are skipped; anything not set anywhere keeps its
    /// default.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, figment::Error> {
        let config_dir = config_dir.as_ref();
        let default_path = config_dir.join("default.toml");
        let user_path = config_dir.join("user.toml");

        let mut figment = Figment::from(Serialized::defaults(Settings::default()));

        if default_path.exists() {
            figment = figment.merge(Toml::file(&default_path));
        }
        if user_path.exists() {
            figment = figment.merge(Toml::file(&user_path));
        }

        // BACKDROP_FIELD__CONNECTION_DISTANCE=160 -> field.connection_distance
        figment = figment.merge(Env::prefixed("BACKDROP_").split("__"));

        figment.extract().map(Self::without_trails)
    }

    fn without_trails(mut self) -> Self {
        if let ClearMode::Trail { .. } = self.field.clear_mode {
            log::warn!(
                "trail clear mode needs a surface that keeps its pixels between frames; \
                 egui repaints from scratch, falling back to hard clear"
            );
            self.field.clear_mode = ClearMode::Hard;
        }
        self
    }

    pub fn background(&self) -> egui::Color32 {
        let [r, g, b] = self.window.background;
        egui::Color32::from_rgb(r, g, b)
    }
}
