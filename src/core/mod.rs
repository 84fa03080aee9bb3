//! Core simulation entities: particles, springs, and output snapshots.

pub mod particle;
pub mod snapshot;
pub mod spring;

pub use particle::{Color, Particle};
pub use snapshot::OutputParticle;
pub use spring::{ForceLaw, Spring, SpringPreset, SpringTemplate};
