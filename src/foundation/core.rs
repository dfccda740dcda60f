use crate::foundation::error::{PixbleedError, PixbleedResult};

/// Zero-based ordinal of a produced frame.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct FrameIndex(pub u64);

/// Rational frame rate used when muxing frames into a container.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Fps {
    /// Numerator (frames).
    pub num: u32,
    /// Denominator (seconds), must be > 0.
    pub den: u32,
}

impl Fps {
    /// Build a validated frame rate.
    pub fn new(num: u32, den: u32) -> PixbleedResult<Self> {
        if den == 0 {
            return Err(PixbleedError::config("Fps den must be > 0"));
        }
        if num == 0 {
            return Err(PixbleedError::config("Fps num must be > 0"));
        }
        Ok(Self { num, den })
    }

    /// Frame rate as a float.
    pub fn as_f64(self) -> f64 {
        f64::from(self.num) / f64::from(self.den)
    }
}

impl Default for Fps {
    fn default() -> Self {
        Self { num: 12, den: 1 }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
