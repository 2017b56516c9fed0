//! Generator settings
//!
//! Physical constants shared with gameplay (square size and speed), the
//! render-space scale, and the retry policy. Loadable from JSON; missing
//! fields take their defaults.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{LevelError, Result};

/// Time jitter applied to retried attempts
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Perturbation {
    /// Seed for the per-attempt PCG streams
    pub seed: u64,
    /// Largest shift of any event time, as a fraction of the smallest gap
    /// between events. Must be in [0, 0.5).
    pub max_shift: f64,
}

/// Level generator settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// Side length of the square (generator units)
    pub square_size: f64,
    /// Per-axis speed of the square (generator units per second)
    pub square_speed: f64,
    /// Generator units to render-space units
    pub render_scale: f64,
    /// Attempt cap when retries are perturbed
    pub max_attempts: u32,
    /// Nesting limit for curve repair
    pub max_repair_depth: usize,
    /// Retry perturbation. Without it generation is a pure function of the
    /// events and a failed attempt is final.
    pub perturbation: Option<Perturbation>,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            square_size: SQUARE_SIZE,
            square_speed: SQUARE_SPEED,
            render_scale: RENDER_SCALE,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            max_repair_depth: MAX_REPAIR_DEPTH,
            perturbation: None,
        }
    }
}

impl GeneratorSettings {
    /// Enable perturbed retries
    pub fn with_perturbation(mut self, seed: u64, max_shift: f64) -> Self {
        self.perturbation = Some(Perturbation { seed, max_shift });
        self
    }

    /// Number of attempts level assembly will make
    pub fn effective_attempts(&self) -> u32 {
        match self.perturbation {
            Some(_) => self.max_attempts,
            None => 1,
        }
    }

    pub fn validate(&self) -> Result<()> {
        let positive = |name: &str, value: f64| {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(LevelError::InvalidSettings(format!("{} must be positive, got {}", name, value)))
            }
        };
        positive("square_size", self.square_size)?;
        positive("square_speed", self.square_speed)?;
        positive("render_scale", self.render_scale)?;

        if self.max_attempts == 0 {
            return Err(LevelError::InvalidSettings("max_attempts must be at least 1".into()));
        }
        if let Some(p) = &self.perturbation {
            if !(0.0..0.5).contains(&p.max_shift) {
                return Err(LevelError::InvalidSettings(format!(
                    "perturbation max_shift must be in [0, 0.5), got {}",
                    p.max_shift
                )));
            }
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!("Loaded generator settings from {}", path.display());
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = GeneratorSettings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.square_size, 0.1);
        assert_eq!(settings.render_scale, 150.0);
        assert_eq!(settings.effective_attempts(), 1);
    }

    #[test]
    fn test_perturbation_enables_retries() {
        let settings = GeneratorSettings {
            max_attempts: 20,
            ..Default::default()
        }
        .with_perturbation(7, 0.1);
        assert_eq!(settings.effective_attempts(), 20);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = GeneratorSettings::from_json(r#"{"render_scale": 75.0}"#).unwrap();
        assert_eq!(settings.render_scale, 75.0);
        assert_eq!(settings.square_size, SQUARE_SIZE);
        assert!(settings.perturbation.is_none());
    }

    #[test]
    fn test_invalid_settings_rejected() {
        assert!(matches!(
            GeneratorSettings::from_json(r#"{"square_size": -1.0}"#),
            Err(LevelError::InvalidSettings(_))
        ));
        assert!(matches!(
            GeneratorSettings::from_json(r#"{"perturbation": {"seed": 1, "max_shift": 0.5}}"#),
            Err(LevelError::InvalidSettings(_))
        ));
        assert!(matches!(
            GeneratorSettings::from_json(r#"{"max_attempts": "many"}"#),
            Err(LevelError::Json(_))
        ));
    }
}
