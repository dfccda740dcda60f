use crate::foundation::error::{PixbleedError, PixbleedResult};

/// Which destination coordinate(s) receive the displacement distance.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum AxisMode {
    /// Horizontal only.
    #[default]
    X,
    /// Vertical only.
    Y,
    /// Diagonal: both axes move by the same distance.
    Both,
}

/// How a triggered block moves pixels.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TransferMode {
    /// One-directional copy from source to destination ("bleed").
    #[default]
    Copy,
    /// Exchange source and destination ("diffuse").
    Swap,
}

/// What the working buffer starts from at each frame boundary.
#[derive(Clone, Copy, Debug, Default, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Persistence {
    /// Displacements accumulate across the whole sequence.
    #[default]
    Cumulative,
    /// Every frame is an independent glitch of the pristine original.
    ResetEachFrame,
}

/// Effect configuration, immutable for the duration of a sequence.
///
/// Deserializes from JSON presets; missing fields take their [`Default`] value.
#[derive(Clone, Copy, Debug, serde::Serialize, serde::Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct EffectParameters {
    /// Exclusive upper bound of the displacement distance (>= 1).
    pub max_offset: u32,
    /// Percent chance (0..=100) that a block triggers regardless of brightness.
    pub trigger_chance: u32,
    /// Blocks whose origin brightness is strictly below this (0..=255) always trigger.
    pub brightness_tolerance: u32,
    /// Destination axis selection.
    pub axis_mode: AxisMode,
    /// Fold the displaced block origin back into the image.
    pub wrap: bool,
    /// Block edge length in pixels (>= 1).
    pub block_size: u32,
    /// Copy ("bleed") or swap ("diffuse").
    pub transfer_mode: TransferMode,
    /// Frame-boundary persistence policy.
    pub persistence: Persistence,
}

impl Default for EffectParameters {
    fn default() -> Self {
        Self {
            max_offset: 10,
            trigger_chance: 5,
            brightness_tolerance: 50,
            axis_mode: AxisMode::X,
            wrap: false,
            block_size: 1,
            transfer_mode: TransferMode::Copy,
            persistence: Persistence::Cumulative,
        }
    }
}

impl EffectParameters {
    /// Reject parameters that would make a pass ill-defined.
    pub fn validate(&self) -> PixbleedResult<()> {
        if self.max_offset == 0 {
            return Err(PixbleedError::config("max_offset must be >= 1"));
        }
        if self.block_size == 0 {
            return Err(PixbleedError::config("block_size must be >= 1"));
        }
        if self.trigger_chance > 100 {
            return Err(PixbleedError::config(format!(
                "trigger_chance must be in 0..=100, got {}",
                self.trigger_chance
            )));
        }
        if self.brightness_tolerance > 255 {
            return Err(PixbleedError::config(format!(
                "brightness_tolerance must be in 0..=255, got {}",
                self.brightness_tolerance
            )));
        }
        Ok(())
    }

    /// Copy with out-of-range values pulled into their valid ranges.
    pub fn clamped(mut self) -> Self {
        self.max_offset = self.max_offset.max(1);
        self.block_size = self.block_size.max(1);
        self.trigger_chance = self.trigger_chance.min(100);
        self.brightness_tolerance = self.brightness_tolerance.min(255);
        self
    }

    /// Parse a JSON preset.
    pub fn from_json(json: &str) -> PixbleedResult<Self> {
        serde_json::from_str(json).map_err(|e| PixbleedError::serde(e.to_string()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/effects/params.rs"]
mod tests;
