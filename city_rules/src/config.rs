//! Typed configuration for a simulation session.
//!
//! The configuration is supplied by the host as TOML text; this crate never
//! reads it from storage. Every section and field is optional and falls back
//! to the built-in defaults; rule fields fall back to their phase preset.
//!
//! ```toml
//! [grid]
//! width = 100
//! height = 80
//!
//! [population]
//! human = 0.1
//! vampire = 0.05
//!
//! [clock]
//! day_duration = 10.0
//!
//! [simulation]
//! seed = 42
//!
//! [rules.night.vampire]
//! hunger_threshold = 6
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{CityError, Result};
use crate::mechanics::RuleSet;
use crate::world_state::PopulationRatios;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CityConfig {
    #[serde(default)]
    pub grid: GridConfig,

    /// Initial population ratios for random populate.
    #[serde(default)]
    pub population: PopulationRatios,

    #[serde(default)]
    pub clock: ClockConfig,

    #[serde(default)]
    pub simulation: SimulationConfig,

    /// Day and night rule bundles.
    #[serde(default)]
    pub rules: RuleSet,
}

impl CityConfig {
    /// Parse and validate configuration from TOML text.
    ///
    /// # Errors
    ///
    /// Returns [`CityError::ConfigParse`] if the text is not valid TOML for
    /// this structure, or [`CityError::InvalidConfig`] if validation fails.
    pub fn parse(text: &str) -> Result<Self> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check the values the engine cannot run with.
    ///
    /// Population ratios and rule parameters are deliberately not checked.
    ///
    /// # Errors
    ///
    /// Returns [`CityError::InvalidConfig`] for a zero grid dimension or a
    /// day duration that is not a positive finite number.
    pub fn validate(&self) -> Result<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(CityError::InvalidConfig {
                reason: format!(
                    "grid must be at least 1x1, got {}x{}",
                    self.grid.width, self.grid.height
                ),
            });
        }
        if !self.clock.day_duration.is_finite() || self.clock.day_duration <= 0.0 {
            return Err(CityError::InvalidConfig {
                reason: format!(
                    "day_duration must be positive, got {}",
                    self.clock.day_duration
                ),
            });
        }
        Ok(())
    }
}

/// Grid dimensions in cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    #[serde(default = "default_grid_width")]
    pub width: usize,
    #[serde(default = "default_grid_height")]
    pub height: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width: default_grid_width(),
            height: default_grid_height(),
        }
    }
}

fn default_grid_width() -> usize {
    100
}

fn default_grid_height() -> usize {
    80
}

/// Day/night timing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClockConfig {
    /// Seconds per phase.
    #[serde(default = "default_day_duration")]
    pub day_duration: f32,
}

impl Default for ClockConfig {
    fn default() -> Self {
        Self {
            day_duration: default_day_duration(),
        }
    }
}

fn default_day_duration() -> f32 {
    10.0
}

/// Simulation-wide settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Seed for the simulation's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            seed: default_seed(),
        }
    }
}

fn default_seed() -> u64 {
    42
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mechanics::Phase;

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = CityConfig::parse("").unwrap();
        assert_eq!(config, CityConfig::default());
        assert_eq!(config.grid.width, 100);
        assert_eq!(config.grid.height, 80);
        assert_eq!(config.clock.day_duration, 10.0);
        assert_eq!(config.simulation.seed, 42);
    }

    #[test]
    fn test_partial_sections() {
        let config = CityConfig::parse(
            r#"
            [grid]
            width = 30

            [population]
            vampire = 0.2

            [simulation]
            seed = 7
            "#,
        )
        .unwrap();

        assert_eq!(config.grid.width, 30);
        assert_eq!(config.grid.height, 80);
        assert!((config.population.vampire - 0.2).abs() < 1e-6);
        assert!((config.population.human - 0.1).abs() < 1e-6);
        assert_eq!(config.simulation.seed, 7);
    }

    #[test]
    fn test_rules_override() {
        let mut rules = RuleSet::default();
        rules.night.vampire.hunger_threshold = 3;
        let text = toml::to_string(&CityConfig {
            rules: rules.clone(),
            ..CityConfig::default()
        })
        .unwrap();

        let config = CityConfig::parse(&text).unwrap();
        assert_eq!(config.rules.for_phase(Phase::Night).vampire.hunger_threshold, 3);
    }

    #[test]
    fn test_single_rule_field_override() {
        let config = CityConfig::parse("[rules.night.vampire]\nhunger_threshold = 3\n").unwrap();

        let night = config.rules.for_phase(Phase::Night);
        assert_eq!(night.vampire.hunger_threshold, 3);
        assert_eq!(night.vampire.reproduce, 2);
        assert_eq!(night.human, RuleSet::default().night.human);
        assert_eq!(config.rules.day, RuleSet::default().day);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let zero_width = CityConfig::parse("[grid]\nwidth = 0\n");
        assert!(matches!(zero_width, Err(CityError::InvalidConfig { .. })));

        let zero_day = CityConfig::parse("[clock]\nday_duration = 0.0\n");
        assert!(matches!(zero_day, Err(CityError::InvalidConfig { .. })));

        let malformed = CityConfig::parse("[grid\nwidth = 3");
        assert!(matches!(malformed, Err(CityError::ConfigParse { .. })));
    }
}
