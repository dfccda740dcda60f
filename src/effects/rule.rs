use crate::{
    buffer::pixel::PixelBuffer, effects::params::EffectParameters, foundation::rng::RandomSource,
};

/// Outcome of evaluating a block origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Displacement {
    /// The block moves by `distance` along the configured axis (or axes).
    Triggered {
        /// Offset in pixels, in `[0, max_offset)`.
        distance: u32,
    },
    /// The block stays put.
    NotTriggered,
}

/// Trigger and offset decision for a single block origin.
///
/// Dark origins (brightness below the tolerance) always trigger; otherwise the block triggers
/// with `trigger_chance` percent probability. The chance draw is skipped when the brightness test
/// already passed, so the random stream consumed depends on image content.
pub struct DisplacementRule;

impl DisplacementRule {
    /// Decide whether the block at `(x, y)` moves, and by how far.
    pub fn evaluate(
        buf: &PixelBuffer,
        x: u32,
        y: u32,
        params: &EffectParameters,
        rng: &mut dyn RandomSource,
    ) -> Displacement {
        let dark = u32::from(buf.brightness(x, y)) < params.brightness_tolerance;
        if !dark && rng.next(0, 99) >= params.trigger_chance {
            return Displacement::NotTriggered;
        }
        let distance = rng.next(0, params.max_offset.saturating_sub(1));
        Displacement::Triggered { distance }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/rule.rs"]
mod tests;
