//! Displacement effect: parameters, trigger rule, block transform, and the per-frame pass.

/// Block copy/swap.
pub mod block;
/// Full raster pass.
pub mod frame;
/// Effect configuration.
pub mod params;
/// Trigger and distance decision.
pub mod rule;
