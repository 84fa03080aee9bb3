//! Global configuration constants for the filament engine.

/// Default integration timestep (in seconds) used by benches and demos.
pub const DEFAULT_TIME_STEP: f64 = 1.0 / 60.0;

/// Softening term added to the squared separation in the inverse-square
/// force law, so coincident endpoints never produce a singular force.
pub const INV_SQUARE_EPSILON: f64 = 1e-6;

/// Name given to the background integration thread.
pub const PHYSICS_THREAD_NAME: &str = "filament-physics";
