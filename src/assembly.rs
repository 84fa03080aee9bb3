//! Builders that wire particle sets into connected bodies.

use rand::Rng;

use crate::core::particle::Particle;
use crate::core::spring::SpringTemplate;
use crate::error::SimError;
use crate::math::random::random_unit;
use crate::math::tuple::Tuple;
use crate::sim::simulator::Simulator;

/// Connects every unordered pair in `indices` with a spring.
///
/// Each spring copies `template`'s laws, strengths, and deformation, but
/// takes its natural length from the pair's current separation, so the
/// assembly is born at equilibrium.
pub fn connect_clique<const N: usize>(
    sim: &Simulator<N>,
    indices: &[usize],
    template: &SpringTemplate,
) -> Result<(), SimError> {
    for (i, &a) in indices.iter().enumerate() {
        for &b in &indices[i + 1..] {
            let pa = lookup(sim, a)?;
            let pb = lookup(sim, b)?;
            let mut pair_template = *template;
            pair_template.natural_length = (pb.pos - pa.pos).magnitude();
            sim.add_spring(a, b, pair_template)?;
        }
    }
    Ok(())
}

/// Drops a randomly oriented hypercube into the simulator: 2^N particles of
/// equal mass at the vertices, fully interconnected as a clique.
///
/// `mass` is the total mass of the cube; `template` supplies the spring
/// behavior for every edge and diagonal. Returns the new particle indices.
pub fn add_cube<const N: usize, R: Rng + ?Sized>(
    sim: &Simulator<N>,
    center: Tuple<N>,
    side_length: f64,
    mass: f64,
    template: &SpringTemplate,
    rng: &mut R,
) -> Result<Vec<usize>, SimError> {
    let axes = random_basis(rng);
    let half = side_length * 0.5;

    let mut vertices = vec![center];
    for axis in axes.iter() {
        let offset = *axis * half;
        vertices = vertices
            .into_iter()
            .flat_map(|v| [v + offset, v - offset])
            .collect();
    }

    let mass_per_vertex = mass / vertices.len() as f64;
    let indices: Vec<usize> = vertices
        .into_iter()
        .map(|pos| sim.add_particle(Particle::new(pos, mass_per_vertex)))
        .collect();

    connect_clique(sim, &indices, template)?;
    Ok(indices)
}

/// A random orthonormal basis: Gram-Schmidt over random unit vectors,
/// redrawing whenever a candidate collapses onto the span built so far.
fn random_basis<const N: usize, R: Rng + ?Sized>(rng: &mut R) -> [Tuple<N>; N] {
    let mut basis = [Tuple::ZERO; N];
    for i in 0..N {
        loop {
            let mut candidate: Tuple<N> = random_unit(rng);
            for prev in &basis[..i] {
                candidate -= candidate.project_vector(*prev);
            }
            if candidate.magnitude_squared() > 1e-12 {
                basis[i] = candidate / candidate.magnitude();
                break;
            }
        }
    }
    basis
}

fn lookup<const N: usize>(sim: &Simulator<N>, index: usize) -> Result<Particle<N>, SimError> {
    sim.particle(index).ok_or(SimError::ParticleOutOfBounds {
        index,
        count: sim.size(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn random_basis_is_orthonormal() {
        let mut rng = SmallRng::seed_from_u64(21);
        let basis = random_basis::<4, _>(&mut rng);

        for (i, a) in basis.iter().enumerate() {
            assert!((a.magnitude() - 1.0).abs() < 1e-9);
            for b in &basis[i + 1..] {
                assert!(a.dot(*b).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn clique_covers_every_pair() {
        let sim: Simulator<2> = Simulator::with_seed(22);
        let indices: Vec<usize> = [[0.0, 0.0], [1.0, 0.0], [0.0, 1.0], [1.0, 1.0]]
            .into_iter()
            .map(|pos| sim.add_particle(Particle::new(Tuple::new(pos), 1.0)))
            .collect();

        connect_clique(&sim, &indices, &SpringTemplate::ideal(0.0, 5.0)).unwrap();

        // Born at equilibrium: one step must not move anything.
        sim.advance(1.0 / 60.0);
        for &index in &indices {
            assert_eq!(sim.particle(index).unwrap().vel, Tuple::ZERO);
        }
    }

    #[test]
    fn cube_has_two_to_the_n_vertices() {
        let mut rng = SmallRng::seed_from_u64(23);
        let sim: Simulator<3> = Simulator::with_seed(23);
        let template = SpringTemplate::ideal(0.0, 10.0);

        let indices =
            add_cube(&sim, Tuple::new([0.0, 0.0, 5.0]), 1.0, 8.0, &template, &mut rng).unwrap();

        assert_eq!(indices.len(), 8);
        assert_eq!(sim.size(), 8);
        for &index in &indices {
            assert_eq!(sim.particle(index).unwrap().mass, 1.0);
        }

        // Adjacent vertices sit one side length apart.
        let p0 = sim.particle(indices[0]).unwrap().pos;
        let nearest = indices[1..]
            .iter()
            .map(|&i| (sim.particle(i).unwrap().pos - p0).magnitude())
            .fold(f64::INFINITY, f64::min);
        assert!((nearest - 1.0).abs() < 1e-9);
    }
}
