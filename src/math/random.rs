//! Uniform sampling on the surface of the unit N-sphere.

use std::f64::consts::TAU;

use rand::Rng;

use crate::math::tuple::Tuple;

/// Returns a randomly oriented unit vector, uniformly distributed over the
/// surface of the unit N-sphere.
///
/// Built from generalized spherical coordinates: N−1 angles are drawn
/// uniformly on [0, 2π) and converted to Cartesian components through the
/// recursive cosine/sine product, so the magnitude is 1 by construction.
/// One dimension degenerates to a coin flip between +1 and −1.
pub fn random_unit<const N: usize, R: Rng + ?Sized>(rng: &mut R) -> Tuple<N> {
    if N == 0 {
        return Tuple::ZERO;
    }
    if N == 1 {
        let sign = if rng.gen_bool(0.5) { 1.0 } else { -1.0 };
        return Tuple::splat(sign);
    }

    let mut out = [1.0; N];
    for i in 0..N - 1 {
        let angle = rng.gen_range(0.0..TAU);
        out[i] *= angle.cos();
        for c in out.iter_mut().skip(i + 1) {
            *c *= angle.sin();
        }
    }
    Tuple::new(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn unit_magnitude_in_every_arity() {
        let mut rng = SmallRng::seed_from_u64(11);
        for _ in 0..100 {
            assert!((random_unit::<2, _>(&mut rng).magnitude() - 1.0).abs() < 1e-12);
            assert!((random_unit::<3, _>(&mut rng).magnitude() - 1.0).abs() < 1e-12);
            assert!((random_unit::<7, _>(&mut rng).magnitude() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn one_dimension_is_a_sign_flip() {
        let mut rng = SmallRng::seed_from_u64(12);
        let mut seen = [false; 2];
        for _ in 0..64 {
            let v = random_unit::<1, _>(&mut rng);
            assert!(v == Tuple::new([1.0]) || v == Tuple::new([-1.0]));
            seen[usize::from(v[0] > 0.0)] = true;
        }
        assert!(seen[0] && seen[1]);
    }
}
