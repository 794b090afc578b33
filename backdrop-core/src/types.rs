use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Rectangular simulation region `[0, width] × [0, height]`.
///
/// Bounds only decide where particles reflect; they never affect how many
/// particles a field holds.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    /// Creates bounds of the given size.
    ///
    /// ### Parameters
    /// - `width` - Horizontal extent in pixels.
    /// - `height` - Vertical extent in pixels.
    ///
    /// Negative, NaN and infinite extents become `0.0`.
    pub fn new(width: f32, height: f32) -> Self {
        Self {
            width: Self::extent(width),
            height: Self::extent(height),
        }
    }

    fn extent(v: f32) -> f32 {
        if v.is_finite() { v.max(0.0) } else { 0.0 }
    }

    /// Returns `true` if `p` lies inside the closed rectangle.
    pub fn contains(&self, p: Vec2) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

/// An 8-bit RGB colour with a floating-point alpha in `[0, 1]`.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Rgba {
    /// ### Parameters
    /// - `r`, `g`, `b` - Colour channels.
    /// - `a` - Opacity, `0.0` transparent to `1.0` opaque. Not clamped here;
    ///   see [`Rgba::with_alpha`].
    pub const fn new(r: u8, g: u8, b: u8, a: f32) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour with a different alpha, clamped to `[0, 1]`.
    pub fn with_alpha(self, a: f32) -> Self {
        Self {
            a: a.clamp(0.0, 1.0),
            ..self
        }
    }
}
