use neurite_core::traits::Validate;
use neurite_core::{NeuriteError, Result};
use serde::{Deserialize, Serialize};

/// What a traveler does when its cursor reaches the overflow ceiling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WrapMode {
    /// Restart at cycle 0.
    #[default]
    Reset,
    /// Keep the overshoot: `cycles % ceiling`.
    Carry,
}

/// Upper bound on `max_cycles` and `camera_samples`; each sample is a stored point.
pub const MAX_SAMPLES: usize = 1_000_000;

/// Timing parameters shared by every traveler and the camera flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnimationPreset {
    /// Samples per axon path and length of the visible part of a loop.
    pub max_cycles: usize,
    /// Overflow ceiling is `max_cycles * overflow_multiplier`.
    pub overflow_multiplier: usize,
    /// Cursor increment per tick.
    pub step: usize,
    pub wrap: WrapMode,
    /// Start offsets are drawn from `[0, start_spread * max_cycles)`.
    pub start_spread: usize,
    /// Sample count of the camera flight path.
    pub camera_samples: usize,
}

impl AnimationPreset {
    /// Multi-axon neuron layout: fast pulses, dense camera path.
    pub const fn neuron() -> Self {
        Self {
            max_cycles: 50,
            overflow_multiplier: 10,
            step: 3,
            wrap: WrapMode::Reset,
            start_spread: 8,
            camera_samples: 500,
        }
    }

    /// Point-to-point synapse layout: one sample per tick, coarse camera path.
    pub const fn synapse() -> Self {
        Self {
            step: 1,
            camera_samples: 50,
            ..Self::neuron()
        }
    }

    pub fn overflow_ceiling(&self) -> usize {
        self.max_cycles.saturating_mul(self.overflow_multiplier)
    }
}

impl Default for AnimationPreset {
    fn default() -> Self {
        Self::neuron()
    }
}

impl Validate for AnimationPreset {
    fn validate(&self) -> Result<()> {
        let checks = [
            (self.max_cycles, "max_cycles"),
            (self.overflow_multiplier, "overflow_multiplier"),
            (self.step, "step"),
            (self.camera_samples, "camera_samples"),
        ];
        for (value, field) in checks {
            if value == 0 {
                return Err(NeuriteError::Config(format!("{} must be at least 1", field)));
            }
        }
        for (value, field) in [(self.max_cycles, "max_cycles"), (self.camera_samples, "camera_samples")] {
            if value > MAX_SAMPLES {
                return Err(NeuriteError::Config(format!(
                    "{} must be at most {}, got {}",
                    field, MAX_SAMPLES, value
                )));
            }
        }
        let ceiling = self
            .max_cycles
            .checked_mul(self.overflow_multiplier)
            .ok_or_else(|| NeuriteError::Config("max_cycles * overflow_multiplier overflows".into()))?;
        if self.max_cycles.checked_mul(self.start_spread).is_none() {
            return Err(NeuriteError::Config("max_cycles * start_spread overflows".into()));
        }
        if self.step > ceiling {
            return Err(NeuriteError::Config(format!(
                "step {} exceeds the overflow ceiling {}",
                self.step, ceiling
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets_differ_only_in_step_and_density() {
        let neuron = AnimationPreset::neuron();
        let synapse = AnimationPreset::synapse();
        assert_eq!(neuron.step, 3);
        assert_eq!(synapse.step, 1);
        assert_eq!(neuron.camera_samples, 500);
        assert_eq!(synapse.camera_samples, 50);
        assert_eq!(neuron.overflow_ceiling(), 500);
        assert_eq!(synapse.overflow_ceiling(), 500);
    }

    #[test]
    fn test_validate_rejects_zero() {
        let preset = AnimationPreset {
            step: 0,
            ..AnimationPreset::neuron()
        };
        assert!(matches!(preset.validate(), Err(NeuriteError::Config(_))));
        assert!(AnimationPreset::synapse().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let cases = [
            AnimationPreset { step: usize::MAX, ..AnimationPreset::neuron() },
            AnimationPreset { step: 501, ..AnimationPreset::neuron() },
            AnimationPreset { overflow_multiplier: usize::MAX, ..AnimationPreset::neuron() },
            AnimationPreset { start_spread: usize::MAX, ..AnimationPreset::neuron() },
            AnimationPreset { max_cycles: MAX_SAMPLES + 1, ..AnimationPreset::neuron() },
            AnimationPreset { camera_samples: usize::MAX, ..AnimationPreset::neuron() },
        ];
        for preset in cases {
            assert!(matches!(preset.validate(), Err(NeuriteError::Config(_))), "{:?}", preset);
        }
        let edge = AnimationPreset { step: 500, ..AnimationPreset::neuron() };
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let preset: AnimationPreset = serde_json::from_str(r#"{"step": 1, "wrap": "carry"}"#).unwrap();
        assert_eq!(preset.step, 1);
        assert_eq!(preset.wrap, WrapMode::Carry);
        assert_eq!(preset.max_cycles, 50);
    }
}
