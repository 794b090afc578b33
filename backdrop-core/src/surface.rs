//! Drawing contract between the renderer and whatever the host paints on.

use glam::Vec2;

use crate::types::Rgba;

/// A 2-D drawing target in surface pixel coordinates.
///
/// Implementations never fail; a host that cannot provide a drawable
/// context reports that at mount time through
/// [`crate::scheduler::FrameHost::acquire_surface`] instead.
pub trait Surface {
    /// Erases everything drawn by the previous frame.
    fn clear(&mut self);

    /// Covers the whole surface with a translucent colour.
    fn fade(&mut self, color: Rgba);

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba);
}

impl<S: Surface + ?Sized> Surface for &mut S {
    fn clear(&mut self) {
        (**self).clear();
    }

    fn fade(&mut self, color: Rgba) {
        (**self).fade(color);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        (**self).fill_circle(center, radius, color);
    }

    fn stroke_line(&mut self, from: Vec2, to: Vec2, width: f32, color: Rgba) {
        (**self).stroke_line(from, to, width, color);
    }
}
