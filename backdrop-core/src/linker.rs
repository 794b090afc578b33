//! Per-tick proximity search producing the lines drawn between particles.
//!
//! [`link`] is the reference scan: every unordered pair is tested, which is
//! `O(n²)` and fine for the particle counts in [`Config`]. For larger fields
//! [`link_with_grid`] buckets particles with a [`SpatialGrid`] first and
//! produces exactly the same list.

use glam::Vec2;

use crate::{
    config::Config, field::ParticleField, pointer::PointerState, spatial::SpatialGrid,
    types::Rgba,
};

/// Which things a [`Connection`] joins.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConnectionKind {
    /// Two particles, by index, with `a < b`.
    Particles { a: usize, b: usize },
    /// A particle and the pointer.
    Pointer { particle: usize },
}

/// A line to draw this frame. Rebuilt from scratch every tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Connection {
    pub kind: ConnectionKind,
    pub from: Vec2,
    pub to: Vec2,
    pub opacity: f32,
    pub width: f32,
}

impl Connection {
    pub fn color(&self, cfg: &Config) -> Rgba {
        cfg.accent(self.opacity)
    }
}

/// Linear opacity falloff: `base` at distance zero, fading to zero at `radius`.
///
/// Returns `None` when `d >= radius` (or `d` is NaN), so nothing at or beyond
/// the radius is ever linked.
#[inline]
pub fn link_opacity(d: f32, radius: f32, base: f32) -> Option<f32> {
    if d < radius {
        Some(base * (1.0 - d / radius))
    } else {
        None
    }
}

/// Computes every connection for the current positions.
///
/// `out` is cleared first so the same buffer can be reused every frame.
/// Inter-particle links come first, ordered by `(a, b)`, followed by pointer
/// links in particle order.
pub fn link(field: &ParticleField, pointer: &PointerState, cfg: &Config, out: &mut Vec<Connection>) {
    out.clear();

    let ps = field.particles();
    for (a, pa) in ps.iter().enumerate() {
        for (b, pb) in ps.iter().enumerate().skip(a + 1) {
            push_pair(out, a, pa.pos, b, pb.pos, cfg);
        }
    }

    link_pointer(field, pointer, cfg, out);
}

/// Same output as [`link`], using a uniform grid with cells the size of
/// `cfg.connection_distance` so only neighbouring cells are compared.
pub fn link_with_grid(
    field: &ParticleField,
    pointer: &PointerState,
    cfg: &Config,
    grid: &mut SpatialGrid,
    out: &mut Vec<Connection>,
) {
    out.clear();

    let ps = field.particles();
    grid.rebuild(field.bounds(), cfg.connection_distance, ps.iter().map(|p| p.pos));
    grid.for_each_candidate_pair(|a, b| {
        push_pair(out, a, ps[a].pos, b, ps[b].pos, cfg);
    });

    // Candidates come out grouped by cell, put them back in scan order.
    out.sort_unstable_by_key(|c| match c.kind {
        ConnectionKind::Particles { a, b } => (a, b),
        ConnectionKind::Pointer { particle } => (usize::MAX, particle),
    });

    link_pointer(field, pointer, cfg, out);
}

#[inline]
fn push_pair(out: &mut Vec<Connection>, a: usize, pa: Vec2, b: usize, pb: Vec2, cfg: &Config) {
    let d = pa.distance(pb);
    if let Some(opacity) = link_opacity(d, cfg.connection_distance, cfg.link_alpha) {
        out.push(Connection {
            kind: ConnectionKind::Particles { a, b },
            from: pa,
            to: pb,
            opacity,
            width: cfg.link_width,
        });
    }
}

fn link_pointer(field: &ParticleField, pointer: &PointerState, cfg: &Config, out: &mut Vec<Connection>) {
    let Some(target) = pointer.position() else {
        return;
    };

    for (i, p) in field.iter().enumerate() {
        let d = p.pos.distance(target);
        if let Some(opacity) = link_opacity(d, cfg.mouse_distance, cfg.pointer_alpha) {
            out.push(Connection {
                kind: ConnectionKind::Pointer { particle: i },
                from: p.pos,
                to: target,
                opacity,
                width: cfg.pointer_width,
            });
        }
    }
}
