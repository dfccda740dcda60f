use crate::{
    buffer::pixel::PixelBuffer,
    effects::block::BlockTransform,
    effects::params::EffectParameters,
    effects::rule::{Displacement, DisplacementRule},
    foundation::rng::RandomSource,
};

/// Counters for a single displacement pass.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PassStats {
    /// Block origins evaluated.
    pub blocks_visited: u64,
    /// Block origins that triggered a displacement.
    pub blocks_triggered: u64,
}

impl PassStats {
    /// Accumulate another pass into this one.
    pub fn merge(&mut self, other: PassStats) {
        self.blocks_visited += other.blocks_visited;
        self.blocks_triggered += other.blocks_triggered;
    }
}

/// One full "bleed" (copy) or "diffuse" (swap) pass over `buf`.
///
/// Block origins are visited in row-major order with step `block_size`.
#[tracing::instrument(level = "trace", skip(buf, rng))]
pub fn run_pass(
    buf: &mut PixelBuffer,
    params: &EffectParameters,
    rng: &mut dyn RandomSource,
) -> PassStats {
    let step = params.block_size.max(1) as usize;
    let mut stats = PassStats::default();
    for y in (0..buf.height()).step_by(step) {
        for x in (0..buf.width()).step_by(step) {
            stats.blocks_visited += 1;
            if let Displacement::Triggered { distance } =
                DisplacementRule::evaluate(buf, x, y, params, rng)
            {
                BlockTransform::apply(buf, x, y, distance, params);
                stats.blocks_triggered += 1;
            }
        }
    }
    stats
}

#[cfg(test)]
#[path = "../../tests/unit/effects/frame.rs"]
mod tests;
