use rand::Rng;

use crate::{config::Config, particle::Particle, pointer::PointerState, types::Bounds};

/// A fixed-size, ordered set of particles plus the bounds they bounce in.
///
/// The number of particles is decided once in [`ParticleField::create`] and
/// never changes afterwards; [`ParticleField::update_bounds`] only moves the
/// walls.
#[derive(Debug, Clone)]
pub struct ParticleField {
    particles: Vec<Particle>,
    bounds: Bounds,
}

impl ParticleField {
    /// Spawns a new field.
    ///
    /// ### Parameters
    /// - `bounds` - Initial reflection bounds; particles spawn inside them.
    /// - `viewport_width` - Width used to pick the particle count, see
    ///   [`ParticleField::cardinality_for`].
    /// - `cfg` - Counts, threshold and spawn ranges.
    /// - `rng` - Source of randomness for positions, velocities and radii.
    pub fn create(bounds: Bounds, viewport_width: f32, cfg: &Config, rng: &mut impl Rng) -> Self {
        let count = Self::cardinality_for(viewport_width, cfg);
        let particles = (0..count)
            .map(|_| Particle::spawn(bounds, cfg, rng))
            .collect();

        log::debug!(
            "spawned {count} particles in {}x{} (viewport width {viewport_width})",
            bounds.width,
            bounds.height
        );

        Self { particles, bounds }
    }

    /// Builds a field from explicit particles.
    pub fn from_particles(particles: Vec<Particle>, bounds: Bounds) -> Self {
        Self { particles, bounds }
    }

    /// Sparse count below `cfg.width_threshold`, dense count at or above it.
    pub fn cardinality_for(viewport_width: f32, cfg: &Config) -> usize {
        if viewport_width < cfg.width_threshold {
            cfg.sparse_count
        } else {
            cfg.dense_count
        }
    }

    /// Replaces the reflection bounds. Positions are left untouched; the new
    /// walls take effect on the next [`ParticleField::step`].
    pub fn update_bounds(&mut self, bounds: Bounds) {
        self.bounds = bounds;
    }

    /// Steps every particle once, in order.
    pub fn step(&mut self, pointer: &PointerState, cfg: &Config) {
        let bounds = self.bounds;
        for p in &mut self.particles {
            p.step(bounds, pointer, cfg);
        }
    }

    pub fn bounds(&self) -> Bounds {
        self.bounds
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Particle> {
        self.particles.iter()
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }
}

impl<'a> IntoIterator for &'a ParticleField {
    type Item = &'a Particle;
    type IntoIter = std::slice::Iter<'a, Particle>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
