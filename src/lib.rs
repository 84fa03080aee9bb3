//! Filament – an N-dimensional particle-and-spring physics simulator.
//!
//! Point masses connected by deformable or rigid springs are advanced
//! through time, either synchronously or on a dedicated background thread,
//! while consumers read triple-buffered snapshots at their own pace. The
//! arity of the simulation space is a const generic, fixed at instantiation.
//!
//! # Example
//!
//! ```
//! use filament::{Particle, Simulator, SpringTemplate, Tuple};
//!
//! let sim: Simulator<2> = Simulator::with_seed(7);
//! let a = sim.add_particle(Particle::new(Tuple::new([0.0, 0.0]), 1.0));
//! let b = sim.add_particle(Particle::new(Tuple::new([1.0, 0.0]), 1.0));
//! sim.add_spring(a, b, SpringTemplate::ideal(0.5, 10.0)).unwrap();
//!
//! sim.advance(0.01);
//! assert!(sim.update_output());
//! assert_eq!(sim.output().len(), 2);
//! ```

pub mod assembly;
pub mod config;
pub mod core;
pub mod error;
pub mod math;
pub mod sim;
mod utils;

pub use crate::core::particle::{Color, Particle};
pub use crate::core::snapshot::OutputParticle;
pub use crate::core::spring::{ForceLaw, Spring, SpringPreset, SpringTemplate};
pub use crate::error::SimError;
pub use crate::math::random::random_unit;
pub use crate::math::tuple::{Tuple, ZeroPolicy};
pub use crate::sim::simulator::Simulator;
