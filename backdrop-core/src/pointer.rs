use glam::Vec2;

/// Last known pointer or touch position, relative to the surface.
///
/// [`PointerState::Absent`] means no pointer can currently influence the
/// field: its distance to anything is infinite.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum PointerState {
    #[default]
    Absent,
    At(Vec2),
}

impl PointerState {
    pub fn position(&self) -> Option<Vec2> {
        match *self {
            PointerState::Absent => None,
            PointerState::At(p) => Some(p),
        }
    }

    /// Euclidean distance from `p` to the pointer, `f32::INFINITY` when absent.
    #[inline]
    pub fn distance_to(&self, p: Vec2) -> f32 {
        match *self {
            PointerState::Absent => f32::INFINITY,
            PointerState::At(q) => p.distance(q),
        }
    }

    pub fn set(&mut self, p: Vec2) {
        *self = PointerState::At(p);
    }

    pub fn clear(&mut self) {
        *self = PointerState::Absent;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_pointer_is_infinitely_far() {
        let p = PointerState::default();
        assert_eq!(p.position(), None);
        assert_eq!(p.distance_to(Vec2::ZERO), f32::INFINITY);
    }

    #[test]
    fn set_and_clear() {
        let mut p = PointerState::Absent;
        p.set(Vec2::new(3.0, 4.0));
        assert_eq!(p.distance_to(Vec2::ZERO), 5.0);
        p.clear();
        assert_eq!(p, PointerState::Absent);
    }
}
