/// Seedable source of bounded pseudo-random integers.
///
/// Implementations must be deterministic: the same seed yields the same sequence of `next` results.
pub trait RandomSource {
    /// Reset the generator state from `seed`.
    fn seed(&mut self, seed: u64);
    /// Uniform integer in `[low, high]` (inclusive). Returns `low` when `high <= low`.
    fn next(&mut self, low: u32, high: u32) -> u32;
}

/// SplitMix64 generator; the default [`RandomSource`].
#[derive(Clone, Copy, Debug)]
pub struct SplitMix64 {
    state: u64,
}

impl SplitMix64 {
    /// Create a generator positioned at `seed`.
    pub fn new(seed: u64) -> Self {
        Self { state: seed }
    }

    /// Next raw 64-bit output.
    pub fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

impl RandomSource for SplitMix64 {
    fn seed(&mut self, seed: u64) {
        self.state = seed;
    }

    fn next(&mut self, low: u32, high: u32) -> u32 {
        if high <= low {
            return low;
        }
        let span = u64::from(high - low) + 1;
        low + (self.next_u64() % span) as u32
    }
}

/// Derive the per-frame seed from a sequence seed and a frame ordinal.
pub fn frame_seed(seed: u64, frame: u64) -> u64 {
    seed ^ frame.wrapping_add(1).wrapping_mul(0xD6E8_FEB8_6659_FD93)
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/rng.rs"]
mod tests;
