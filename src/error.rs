//! Error types for simulation setup.
//!
//! Every variant is a configuration mistake detected while wiring up the
//! simulation; none is a recoverable runtime condition. Callers that want
//! the classic abort-on-misconfiguration behavior can simply `unwrap`.

use std::error::Error;
use std::fmt;

/// Errors raised while configuring a simulation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SimError {
    /// Both ends of a spring refer to the same particle.
    SelfAttachment { index: usize },
    /// A spring endpoint does not name an existing particle.
    ParticleOutOfBounds { index: usize, count: usize },
    /// Deformation coefficients must lie in [0, 1].
    InvalidDeformation(f64),
    /// A zero-length vector was normalized under [`ZeroPolicy::Fail`].
    ///
    /// [`ZeroPolicy::Fail`]: crate::math::tuple::ZeroPolicy::Fail
    DegenerateVector,
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfAttachment { index } => {
                write!(f, "cannot attach particle {index} to itself")
            }
            Self::ParticleOutOfBounds { index, count } => {
                write!(f, "particle index {index} out of bounds (count: {count})")
            }
            Self::InvalidDeformation(value) => {
                write!(f, "deformation coefficient {value} outside [0, 1]")
            }
            Self::DegenerateVector => {
                write!(f, "zero-length vector has no direction")
            }
        }
    }
}

impl Error for SimError {}
