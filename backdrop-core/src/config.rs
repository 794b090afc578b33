use serde::{Deserialize, Serialize};

use crate::types::Rgba;

/// How the renderer disposes of the previous frame.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ClearMode {
    /// Wipe the surface completely every frame.
    Hard,
    /// Paint a translucent overlay instead of clearing, leaving faint trails.
    Trail { color: Rgba },
}

/// Tuning constants for the particle field.
///
/// The defaults are the calibrated look of the backdrop. Every distance is
/// in surface pixels and every speed in pixels per tick.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub sparse_count: usize,
    pub dense_count: usize,
    /// Viewport widths strictly below this use `sparse_count`.
    pub width_threshold: f32,

    pub connection_distance: f32,
    pub mouse_distance: f32,
    pub push_strength: f32,

    pub max_speed: f32,
    pub radius_min: f32,
    pub radius_max: f32,

    pub accent: [u8; 3],
    pub particle_alpha: f32,
    pub link_alpha: f32,
    pub link_width: f32,
    pub pointer_alpha: f32,
    pub pointer_width: f32,

    pub clear_mode: ClearMode,
    /// Bucket particles in a uniform grid before linking. Same output as the
    /// pairwise scan, only faster for large counts.
    pub spatial_grid: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sparse_count: 45,
            dense_count: 90,
            width_threshold: 768.0,
            connection_distance: 140.0,
            mouse_distance: 200.0,
            push_strength: 3.0,
            max_speed: 0.4,
            radius_min: 1.0,
            radius_max: 3.0,
            accent: [212, 175, 55],
            particle_alpha: 0.6,
            link_alpha: 0.25,
            link_width: 0.5,
            pointer_alpha: 0.5,
            pointer_width: 0.8,
            clear_mode: ClearMode::Hard,
            spatial_grid: false,
        }
    }
}

impl Config {
    /// Accent colour at the given alpha.
    pub fn accent(&self, alpha: f32) -> Rgba {
        let [r, g, b] = self.accent;
        Rgba::new(r, g, b, 0.0).with_alpha(alpha)
    }
}
