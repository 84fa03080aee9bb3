//! Pairwise spring constraints and their restoring-force laws.

use rand::Rng;

use crate::config::INV_SQUARE_EPSILON;
use crate::core::particle::Particle;
use crate::error::SimError;
use crate::math::tuple::{Tuple, ZeroPolicy};

/// Restoring-force law applied on one side (compression or tension) of a
/// spring.
///
/// Magnitudes are attractive when positive. Every law is continuous and
/// sign-correct: stretched springs pull their endpoints together, compressed
/// springs push them apart (or do nothing, under [`ForceLaw::None`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForceLaw {
    /// No restoring force.
    None,
    /// Hooke's law: magnitude proportional to the displacement.
    Hooke,
    /// Constant magnitude, direction set by the displacement sign.
    Constant,
    /// Magnitude falls off with the squared separation (softened so
    /// coincident endpoints stay finite).
    InverseSquare,
    /// Hard constraint: position and velocity are corrected directly
    /// instead of applying a force.
    Rigid,
}

/// Named (compression law, tension law) combinations.
///
/// Presets are pure convenience; the behavior lives entirely in the per-side
/// [`ForceLaw`] tags they expand to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpringPreset {
    /// Ideal spring both ways.
    Ideal,
    /// Spring under compression, constant pull under tension.
    Stiff,
    /// Spring under compression, inextensible under tension.
    Gelatin,
    /// Slack when compressed, spring when stretched.
    Bungee,
    /// Slack when compressed, constant pull when stretched.
    BouncyRope,
    /// Slack when compressed, inextensible when stretched.
    Rope,
    /// Constant push when compressed, spring when stretched.
    StretchyBouncy,
    /// Constant push when compressed, inextensible when stretched.
    Bouncy,
    /// Constant magnitude both ways.
    Rubber,
    /// Incompressible, spring when stretched.
    Slinky,
    /// Incompressible, constant pull when stretched.
    SlinkyRope,
    /// Fully rigid rod.
    Strut,
    /// Inverse-square attraction/repulsion both ways.
    Tractor,
}

impl SpringPreset {
    /// Expands the preset name to its (compression, tension) law pair.
    pub const fn laws(self) -> (ForceLaw, ForceLaw) {
        match self {
            Self::Ideal => (ForceLaw::Hooke, ForceLaw::Hooke),
            Self::Stiff => (ForceLaw::Hooke, ForceLaw::Constant),
            Self::Gelatin => (ForceLaw::Hooke, ForceLaw::Rigid),
            Self::Bungee => (ForceLaw::None, ForceLaw::Hooke),
            Self::BouncyRope => (ForceLaw::None, ForceLaw::Constant),
            Self::Rope => (ForceLaw::None, ForceLaw::Rigid),
            Self::StretchyBouncy => (ForceLaw::Constant, ForceLaw::Hooke),
            Self::Bouncy => (ForceLaw::Constant, ForceLaw::Rigid),
            Self::Rubber => (ForceLaw::Constant, ForceLaw::Constant),
            Self::Slinky => (ForceLaw::Rigid, ForceLaw::Hooke),
            Self::SlinkyRope => (ForceLaw::Rigid, ForceLaw::Constant),
            Self::Strut => (ForceLaw::Rigid, ForceLaw::Rigid),
            Self::Tractor => (ForceLaw::InverseSquare, ForceLaw::InverseSquare),
        }
    }
}

/// Everything that describes a spring except its two endpoints.
#[derive(Debug, Clone, Copy)]
pub struct SpringTemplate {
    /// Separation at which the restoring force is zero.
    pub natural_length: f64,
    pub compression_law: ForceLaw,
    pub tension_law: ForceLaw,
    pub compression_strength: f64,
    pub tension_strength: f64,
    /// Rate in [0, 1] at which the natural length permanently drifts toward
    /// the current separation while deformed. 0 is fully elastic; 1 relaxes
    /// instantly.
    pub deformation: f64,
}

impl SpringTemplate {
    /// An ideal Hookean spring, equally strong both ways, fully elastic.
    pub fn ideal(natural_length: f64, strength: f64) -> Self {
        Self {
            natural_length,
            compression_law: ForceLaw::Hooke,
            tension_law: ForceLaw::Hooke,
            compression_strength: strength,
            tension_strength: strength,
            deformation: 0.0,
        }
    }

    /// A template expanded from a [`SpringPreset`].
    pub fn with_preset(
        natural_length: f64,
        compression_strength: f64,
        tension_strength: f64,
        preset: SpringPreset,
        deformation: f64,
    ) -> Result<Self, SimError> {
        let (compression_law, tension_law) = preset.laws();
        Self::custom(
            natural_length,
            compression_law,
            tension_law,
            compression_strength,
            tension_strength,
            deformation,
        )
    }

    /// A template from explicit per-side laws.
    pub fn custom(
        natural_length: f64,
        compression_law: ForceLaw,
        tension_law: ForceLaw,
        compression_strength: f64,
        tension_strength: f64,
        deformation: f64,
    ) -> Result<Self, SimError> {
        if !(0.0..=1.0).contains(&deformation) {
            return Err(SimError::InvalidDeformation(deformation));
        }
        Ok(Self {
            natural_length,
            compression_law,
            tension_law,
            compression_strength,
            tension_strength,
            deformation,
        })
    }
}

/// A spring-like connection between two distinct particles.
///
/// Endpoints are stable indices into the simulator's particle storage;
/// particles are never removed, so an index can never dangle.
#[derive(Debug, Clone)]
pub struct Spring {
    a: usize,
    b: usize,
    natural_length: f64,
    compression_law: ForceLaw,
    tension_law: ForceLaw,
    compression_strength: f64,
    tension_strength: f64,
    deformation: f64,
}

impl Spring {
    /// Binds `template` between the particles at indices `a` and `b`.
    pub fn new(a: usize, b: usize, template: SpringTemplate) -> Result<Self, SimError> {
        if a == b {
            return Err(SimError::SelfAttachment { index: a });
        }
        Ok(Self {
            a,
            b,
            natural_length: template.natural_length,
            compression_law: template.compression_law,
            tension_law: template.tension_law,
            compression_strength: template.compression_strength,
            tension_strength: template.tension_strength,
            deformation: template.deformation,
        })
    }

    pub fn endpoints(&self) -> (usize, usize) {
        (self.a, self.b)
    }

    /// Current rest length; drifts under plastic deformation.
    pub fn natural_length(&self) -> f64 {
        self.natural_length
    }

    /// Applies one step of this spring's forces (or rigid corrections) to
    /// its two endpoints.
    ///
    /// An exactly-equilibrated spring is a no-op. Otherwise the natural
    /// length deforms first, then the side selected by the displacement sign
    /// dispatches on its force law. The only fallible path is normalizing a
    /// zero-length axis under [`ZeroPolicy::Fail`].
    pub(crate) fn apply<const N: usize, R: Rng + ?Sized>(
        &mut self,
        particles: &mut [Particle<N>],
        policy: ZeroPolicy,
        rng: &mut R,
    ) -> Result<(), SimError> {
        let (pa, pb) = pair_mut(particles, self.a, self.b);

        let delta = pb.pos - pa.pos;
        let distance = delta.magnitude();
        if distance == self.natural_length {
            return Ok(());
        }
        let axis = delta.unit(policy, rng)?;

        self.natural_length += (distance - self.natural_length) * self.deformation;
        let displacement = distance - self.natural_length;

        let (law, strength) = if displacement < 0.0 {
            (self.compression_law, self.compression_strength)
        } else {
            (self.tension_law, self.tension_strength)
        };

        let magnitude = match law {
            ForceLaw::None => return Ok(()),
            ForceLaw::Hooke => strength * displacement,
            ForceLaw::Constant => strength * displacement.signum(),
            ForceLaw::InverseSquare => {
                displacement.signum() * strength / (distance * distance + INV_SQUARE_EPSILON)
            }
            ForceLaw::Rigid => {
                solve_rigid(pa, pb, axis, displacement);
                return Ok(());
            }
        };

        // Positive magnitude attracts: A is pulled along `axis` toward B.
        let force = axis * magnitude;
        pa.force += force;
        pb.force -= force;
        Ok(())
    }
}

/// Moves both endpoints so their separation equals the natural length and
/// their closing velocity along `axis` is zero, splitting each correction in
/// proportion to inverse mass. Two immovable endpoints stay put.
fn solve_rigid<const N: usize>(
    pa: &mut Particle<N>,
    pb: &mut Particle<N>,
    axis: Tuple<N>,
    displacement: f64,
) {
    let inv_sum = pa.inv_mass + pb.inv_mass;
    if inv_sum == 0.0 {
        return;
    }

    let correction = displacement / inv_sum;
    pa.pos += axis * (correction * pa.inv_mass);
    pb.pos -= axis * (correction * pb.inv_mass);

    let closing = (pb.vel - pa.vel).dot(axis);
    let velocity_correction = closing / inv_sum;
    pa.vel += axis * (velocity_correction * pa.inv_mass);
    pb.vel -= axis * (velocity_correction * pb.inv_mass);
}

/// Mutable references to two distinct slots of `slice`.
fn pair_mut<T>(slice: &mut [T], a: usize, b: usize) -> (&mut T, &mut T) {
    debug_assert_ne!(a, b);
    if a < b {
        let (left, right) = slice.split_at_mut(b);
        (&mut left[a], &mut right[0])
    } else {
        let (left, right) = slice.split_at_mut(a);
        (&mut right[0], &mut left[b])
    }
}
