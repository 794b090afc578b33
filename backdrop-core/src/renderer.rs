use crate::{
    config::{ClearMode, Config},
    field::ParticleField,
    linker::Connection,
    surface::Surface,
};

/// Draws one frame: clear (or fade), particles, then connections.
///
/// Connections are drawn last so their thin lines sit on top of the discs.
#[derive(Clone, Copy, Debug)]
pub struct Renderer {
    clear_mode: ClearMode,
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new(ClearMode::Hard)
    }
}

impl Renderer {
    pub fn new(clear_mode: ClearMode) -> Self {
        Self { clear_mode }
    }

    pub fn clear_mode(&self) -> ClearMode {
        self.clear_mode
    }

    pub fn render(
        &self,
        surface: &mut impl Surface,
        field: &ParticleField,
        connections: &[Connection],
        cfg: &Config,
    ) {
        match self.clear_mode {
            ClearMode::Hard => surface.clear(),
            ClearMode::Trail { color } => surface.fade(color),
        }

        for p in field {
            p.draw(&mut *surface, cfg);
        }

        for c in connections {
            surface.stroke_line(c.from, c.to, c.width, c.color(cfg));
        }
    }
}
