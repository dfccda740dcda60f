//! Shared primitives: frame indices, errors, and the seeded random source.

/// Frame index and frame rate types.
pub mod core;
/// Error taxonomy.
pub mod error;
/// Seeded pseudo-random integer source.
pub mod rng;
