use glam::Vec2;
use rand::Rng;

use crate::{config::Config, pointer::PointerState, surface::Surface, types::Bounds};

/// A single drifting dot.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Particle {
    /// Position in surface pixels. May lie outside the bounds for a few
    /// ticks after a reflection.
    pub pos: Vec2,
    /// Displacement per tick.
    pub vel: Vec2,
    /// Drawn radius in pixels; fixed for the particle's lifetime.
    pub radius: f32,
}

impl Particle {
    /// ### Parameters
    /// - `pos` - Starting position.
    /// - `vel` - Displacement per tick.
    /// - `radius` - Drawn radius.
    pub fn new(pos: Vec2, vel: Vec2, radius: f32) -> Self {
        Self { pos, vel, radius }
    }

    /// Places a particle uniformly inside `bounds` with a slow random drift.
    ///
    /// Each velocity component is uniform in `[-cfg.max_speed, cfg.max_speed)`
    /// and the radius is uniform in `[cfg.radius_min, cfg.radius_max)`.
    /// Zero-sized bounds put the particle at the origin.
    ///
    /// ### Parameters
    /// - `bounds` - Region the position is drawn from.
    /// - `cfg` - Speed and radius ranges.
    /// - `rng` - Randomness source; seed it for reproducible fields.
    pub fn spawn(bounds: Bounds, cfg: &Config, rng: &mut impl Rng) -> Self {
        let pos = Vec2::new(
            rng.random::<f32>() * bounds.width,
            rng.random::<f32>() * bounds.height,
        );
        let vel = Vec2::new(
            (rng.random::<f32>() - 0.5) * 2.0 * cfg.max_speed,
            (rng.random::<f32>() - 0.5) * 2.0 * cfg.max_speed,
        );
        let radius = cfg.radius_min + rng.random::<f32>() * (cfg.radius_max - cfg.radius_min);

        Self { pos, vel, radius }
    }

    /// Advances the particle by one tick.
    ///
    /// 1. Moves by `vel` (one tick is one unit of time, regardless of how
    ///    much wall-clock time passed).
    /// 2. Pushes away from the pointer, see [`Particle::repulsion`].
    /// 3. Reflects the velocity at the edges of `bounds`. The position is not
    ///    clamped, so a particle may overshoot an edge for a few ticks.
    ///
    /// ### Parameters
    /// - `bounds` - Walls to reflect off.
    /// - `pointer` - Current pointer; [`PointerState::Absent`] pushes nothing.
    /// - `cfg` - Repulsion radius and strength.
    ///
    /// ### Returns
    /// The displacement applied by the pointer this tick (zero when the
    /// pointer is out of range or absent).
    pub fn step(&mut self, bounds: Bounds, pointer: &PointerState, cfg: &Config) -> Vec2 {
        self.pos += self.vel;

        let push = self.repulsion(pointer, cfg);
        self.pos += push;

        self.reflect(bounds);
        push
    }

    /// Displacement the pointer would apply at the current position.
    ///
    /// Inside `cfg.mouse_distance` the push points from the pointer to the
    /// particle with magnitude `push_strength * (mouse_distance - d) / mouse_distance`.
    /// When the pointer sits exactly on the particle there is no direction
    /// "away", so the particle is pushed along its own heading (or `+X` if it
    /// is at rest) with the full `push_strength`.
    pub fn repulsion(&self, pointer: &PointerState, cfg: &Config) -> Vec2 {
        let Some(p) = pointer.position() else {
            return Vec2::ZERO;
        };

        let away = self.pos - p;
        let d = away.length();
        // Also rejects NaN distances.
        if !(d < cfg.mouse_distance) {
            return Vec2::ZERO;
        }

        let force = (cfg.mouse_distance - d) / cfg.mouse_distance;
        let dir = away
            .try_normalize()
            .or_else(|| self.vel.try_normalize())
            .unwrap_or(Vec2::X);

        dir * force * cfg.push_strength
    }

    /// Turns the velocity back inward on any axis where the particle is
    /// outside `bounds`.
    fn reflect(&mut self, bounds: Bounds) {
        if self.pos.x < 0.0 {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > bounds.width {
            self.vel.x = -self.vel.x.abs();
        }

        if self.pos.y < 0.0 {
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > bounds.height {
            self.vel.y = -self.vel.y.abs();
        }
    }

    /// Fills one disc in the accent colour at `cfg.particle_alpha`.
    pub fn draw(&self, surface: &mut impl Surface, cfg: &Config) {
        surface.fill_circle(self.pos, self.radius, cfg.accent(cfg.particle_alpha));
    }
}
