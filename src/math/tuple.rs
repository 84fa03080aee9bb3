//! Fixed-arity Euclidean vectors and the arithmetic defined on them.

use std::fmt;
use std::ops::{
    Add, AddAssign, Div, DivAssign, Index, IndexMut, Mul, MulAssign, Neg, Sub, SubAssign,
};

use rand::Rng;

use crate::error::SimError;
use crate::math::random::random_unit;

/// How [`Tuple::unit`] treats a zero-length input.
///
/// The zero vector has no direction. Permissive callers substitute a random
/// one and keep the physics moving; strict callers turn the degeneracy into
/// an error so unexpected configurations surface immediately.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ZeroPolicy {
    /// Substitute a uniformly random unit vector.
    #[default]
    Randomize,
    /// Fail with [`SimError::DegenerateVector`].
    Fail,
}

/// An N-component vector in Euclidean space.
///
/// Plain value semantics: `Tuple` is `Copy` and carries no identity. The
/// arity is a const generic, so mixing dimensions is a compile error rather
/// than a runtime one.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuple<const N: usize>(pub [f64; N]);

impl<const N: usize> Tuple<N> {
    /// The zero vector.
    pub const ZERO: Self = Self([0.0; N]);

    pub const fn new(components: [f64; N]) -> Self {
        Self(components)
    }

    /// A vector with every component set to `value`.
    pub const fn splat(value: f64) -> Self {
        Self([value; N])
    }

    pub fn dot(self, other: Self) -> f64 {
        self.0
            .iter()
            .zip(other.0.iter())
            .map(|(a, b)| a * b)
            .sum()
    }

    pub fn magnitude_squared(self) -> f64 {
        self.dot(self)
    }

    pub fn magnitude(self) -> f64 {
        self.magnitude_squared().sqrt()
    }

    /// The unit vector parallel to `self`.
    ///
    /// `policy` decides what a zero-length input produces: a uniformly
    /// random direction, or [`SimError::DegenerateVector`].
    pub fn unit<R: Rng + ?Sized>(self, policy: ZeroPolicy, rng: &mut R) -> Result<Self, SimError> {
        let mag = self.magnitude();
        if mag > 0.0 {
            Ok(self / mag)
        } else {
            match policy {
                ZeroPolicy::Randomize => Ok(random_unit(rng)),
                ZeroPolicy::Fail => Err(SimError::DegenerateVector),
            }
        }
    }

    /// Scalar projection of `self` onto `onto`.
    pub fn project_scalar(self, onto: Self) -> f64 {
        self.dot(onto) / onto.magnitude()
    }

    /// Vector projection of `self` onto `onto`.
    pub fn project_vector(self, onto: Self) -> Self {
        onto * (self.dot(onto) / onto.magnitude_squared())
    }

    pub fn is_finite(self) -> bool {
        self.0.iter().all(|c| c.is_finite())
    }
}

impl Tuple<3> {
    /// Cross product, defined for three dimensions only.
    pub fn cross(self, other: Self) -> Self {
        Self([
            self.0[1] * other.0[2] - self.0[2] * other.0[1],
            self.0[2] * other.0[0] - self.0[0] * other.0[2],
            self.0[0] * other.0[1] - self.0[1] * other.0[0],
        ])
    }
}

impl<const N: usize> Default for Tuple<N> {
    fn default() -> Self {
        Self::ZERO
    }
}

impl<const N: usize> Add for Tuple<N> {
    type Output = Self;

    fn add(mut self, rhs: Self) -> Self {
        self += rhs;
        self
    }
}

impl<const N: usize> AddAssign for Tuple<N> {
    fn add_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a += b;
        }
    }
}

impl<const N: usize> Sub for Tuple<N> {
    type Output = Self;

    fn sub(mut self, rhs: Self) -> Self {
        self -= rhs;
        self
    }
}

impl<const N: usize> SubAssign for Tuple<N> {
    fn sub_assign(&mut self, rhs: Self) {
        for (a, b) in self.0.iter_mut().zip(rhs.0) {
            *a -= b;
        }
    }
}

impl<const N: usize> Neg for Tuple<N> {
    type Output = Self;

    fn neg(mut self) -> Self {
        for c in self.0.iter_mut() {
            *c = -*c;
        }
        self
    }
}

impl<const N: usize> Mul<f64> for Tuple<N> {
    type Output = Self;

    fn mul(mut self, rhs: f64) -> Self {
        self *= rhs;
        self
    }
}

impl<const N: usize> Mul<Tuple<N>> for f64 {
    type Output = Tuple<N>;

    fn mul(self, rhs: Tuple<N>) -> Tuple<N> {
        rhs * self
    }
}

impl<const N: usize> MulAssign<f64> for Tuple<N> {
    fn mul_assign(&mut self, rhs: f64) {
        for c in self.0.iter_mut() {
            *c *= rhs;
        }
    }
}

impl<const N: usize> Div<f64> for Tuple<N> {
    type Output = Self;

    fn div(mut self, rhs: f64) -> Self {
        self /= rhs;
        self
    }
}

impl<const N: usize> DivAssign<f64> for Tuple<N> {
    fn div_assign(&mut self, rhs: f64) {
        for c in self.0.iter_mut() {
            *c /= rhs;
        }
    }
}

impl<const N: usize> Index<usize> for Tuple<N> {
    type Output = f64;

    fn index(&self, index: usize) -> &f64 {
        &self.0[index]
    }
}

impl<const N: usize> IndexMut<usize> for Tuple<N> {
    fn index_mut(&mut self, index: usize) -> &mut f64 {
        &mut self.0[index]
    }
}

impl<const N: usize> fmt::Display for Tuple<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "(")?;
        for (i, c) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{c}")?;
        }
        write!(f, ")")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    #[test]
    fn component_wise_arithmetic() {
        let a = Tuple::new([1.0, 2.0, 3.0]);
        let b = Tuple::new([4.0, 5.0, 6.0]);

        assert_eq!(a + b, Tuple::new([5.0, 7.0, 9.0]));
        assert_eq!(b - a, Tuple::new([3.0, 3.0, 3.0]));
        assert_eq!(-a, Tuple::new([-1.0, -2.0, -3.0]));
        assert_eq!(a * 2.0, Tuple::new([2.0, 4.0, 6.0]));
        assert_eq!(2.0 * a, a * 2.0);
        assert_eq!(b / 2.0, Tuple::new([2.0, 2.5, 3.0]));
    }

    #[test]
    fn dot_and_magnitude() {
        let v = Tuple::new([3.0, 4.0]);
        assert_eq!(v.dot(v), 25.0);
        assert_eq!(v.magnitude_squared(), 25.0);
        assert_eq!(v.magnitude(), 5.0);
    }

    #[test]
    fn cross_follows_right_hand_rule() {
        let i = Tuple::new([1.0, 0.0, 0.0]);
        let j = Tuple::new([0.0, 1.0, 0.0]);
        assert_eq!(i.cross(j), Tuple::new([0.0, 0.0, 1.0]));
        assert_eq!(j.cross(i), Tuple::new([0.0, 0.0, -1.0]));
    }

    #[test]
    fn unit_preserves_direction() {
        let mut rng = SmallRng::seed_from_u64(1);
        let v = Tuple::new([3.0, 0.0, 4.0]);
        let u = v.unit(ZeroPolicy::Fail, &mut rng).unwrap();
        assert!((u.magnitude() - 1.0).abs() < 1e-9);
        assert!((u.dot(v) - v.magnitude()).abs() < 1e-9);
    }

    #[test]
    fn unit_of_zero_vector_respects_policy() {
        let mut rng = SmallRng::seed_from_u64(2);
        let zero = Tuple::<4>::ZERO;

        let random = zero.unit(ZeroPolicy::Randomize, &mut rng).unwrap();
        assert!((random.magnitude() - 1.0).abs() < 1e-9);

        assert_eq!(
            zero.unit(ZeroPolicy::Fail, &mut rng),
            Err(SimError::DegenerateVector)
        );
    }

    #[test]
    fn projections() {
        let v = Tuple::new([3.0, 4.0]);
        let x_axis = Tuple::new([2.0, 0.0]);

        assert!((v.project_scalar(x_axis) - 3.0).abs() < 1e-12);
        assert_eq!(v.project_vector(x_axis), Tuple::new([3.0, 0.0]));
    }
}
