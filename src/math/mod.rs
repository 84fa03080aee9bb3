//! Vector math: the fixed-arity tuple type and sphere-uniform sampling.

pub mod random;
pub mod tuple;

pub use random::random_unit;
pub use tuple::{Tuple, ZeroPolicy};
