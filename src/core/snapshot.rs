//! Consumer-facing projection of particle state.

use crate::core::particle::{Color, Particle};
use crate::math::tuple::Tuple;

/// What a consumer needs to draw one particle: position and color, nothing
/// else. A snapshot is a plain value with no tie back to the live particle,
/// so consumer lifetime and read rate are independent of the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OutputParticle<const N: usize> {
    pub pos: Tuple<N>,
    pub color: Color,
}

impl<const N: usize> OutputParticle<N> {
    /// Overwrites this slot with `particle`'s current projection.
    pub(crate) fn capture(&mut self, particle: &Particle<N>) {
        self.pos = particle.pos;
        self.color = particle.color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_copies_position_and_color() {
        let p = Particle::new(Tuple::new([1.0, 2.0]), 1.0).with_color(Color::new(10, 20, 30));
        let mut out = OutputParticle::default();
        out.capture(&p);

        assert_eq!(out.pos, p.pos);
        assert_eq!(out.color, Color::new(10, 20, 30));
    }
}
