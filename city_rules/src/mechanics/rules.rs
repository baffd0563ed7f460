//! Rule parameter bundles.
//!
//! A [`RuleSet`] holds one [`PhaseRules`] bundle for the day and one for the
//! night. Neighbour counts are compared as integers; the conversion and
//! sunlight parameters are continuous modifiers.
//!
//! When deserialized, each phase starts from its preset and any field the
//! input gives overrides the preset value, so configuration may name just
//! the fields it changes.

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::Phase;

/// Parameters governing human cells for one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HumanRules {
    /// Fewest human neighbours a human survives with.
    pub survive_min: u32,
    /// Most human neighbours a human survives with.
    pub survive_max: u32,
    /// Exact human neighbour count that spawns a human in an empty slot.
    pub reproduce: u32,
    /// Conversion happens once `vulnerability * vampire_neighbours` reaches this.
    pub convert_threshold: f32,
    /// Most vampire neighbours an empty slot tolerates for a human birth.
    pub fear_threshold: u32,
    /// Human neighbour count at which a human counts as defended.
    pub defense_threshold: u32,
    pub base_vulnerability: f32,
    /// Humans strictly older than this get `wisdom_resistance`.
    pub wisdom_age: u32,
    pub wisdom_resistance: f32,
    /// Vulnerability multiplier for defended humans.
    pub group_resistance: f32,
}

/// Parameters governing vampire cells for one phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VampireRules {
    pub survive_min: u32,
    pub survive_max: u32,
    /// Exact vampire neighbour count that spawns a vampire in an empty slot.
    pub reproduce: u32,
    pub die_in_sunlight: bool,
    /// Death chance of a newborn vampire in sunlight, from 0.0 to 1.0.
    pub sunlight_mortality: f32,
    /// Age at which a vampire becomes fully resistant to sunlight.
    pub age_resistance: f32,
    /// Unfed generations after which a vampire starves.
    pub hunger_threshold: u32,
}

/// Human and vampire rules for a single phase.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PhaseRules {
    pub human: HumanRules,
    pub vampire: VampireRules,
}

impl PhaseRules {
    /// Daytime defaults: humans hold their ground, vampires burn.
    pub fn day() -> Self {
        Self {
            human: HumanRules {
                survive_min: 2,
                survive_max: 3,
                reproduce: 3,
                convert_threshold: 2.0,
                fear_threshold: 1,
                defense_threshold: 3,
                base_vulnerability: 1.0,
                wisdom_age: 10,
                wisdom_resistance: 0.7,
                group_resistance: 0.5,
            },
            vampire: VampireRules {
                survive_min: 2,
                survive_max: 3,
                reproduce: 3,
                die_in_sunlight: true,
                sunlight_mortality: 0.8,
                age_resistance: 20.0,
                hunger_threshold: 5,
            },
        }
    }

    /// Nighttime defaults: humans struggle, vampires spread.
    pub fn night() -> Self {
        Self {
            human: HumanRules {
                survive_min: 3,
                survive_max: 4,
                reproduce: 4,
                convert_threshold: 1.0,
                fear_threshold: 0,
                defense_threshold: 4,
                base_vulnerability: 1.0,
                wisdom_age: 10,
                wisdom_resistance: 0.7,
                group_resistance: 0.6,
            },
            vampire: VampireRules {
                survive_min: 1,
                survive_max: 4,
                reproduce: 2,
                die_in_sunlight: false,
                sunlight_mortality: 0.0,
                age_resistance: 20.0,
                hunger_threshold: 8,
            },
        }
    }
}

/// Complete rule set: one bundle per phase.
///
/// Immutable while a generation runs; swap it between steps with
/// [`crate::Simulation::set_rules`]. Omitted phases and fields fall back
/// to the phase preset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RuleSet {
    #[serde(default = "PhaseRules::day", deserialize_with = "day_over_preset")]
    pub day: PhaseRules,
    #[serde(default = "PhaseRules::night", deserialize_with = "night_over_preset")]
    pub night: PhaseRules,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            day: PhaseRules::day(),
            night: PhaseRules::night(),
        }
    }
}

impl RuleSet {
    /// Rules active during the given phase.
    pub fn for_phase(&self, phase: Phase) -> &PhaseRules {
        match phase {
            Phase::Day => &self.day,
            Phase::Night => &self.night,
        }
    }

    /// Mutable access for editing a phase between steps.
    pub fn for_phase_mut(&mut self, phase: Phase) -> &mut PhaseRules {
        match phase {
            Phase::Day => &mut self.day,
            Phase::Night => &mut self.night,
        }
    }
}

fn day_over_preset<'de, D: Deserializer<'de>>(deserializer: D) -> Result<PhaseRules, D::Error> {
    over_preset(deserializer, PhaseRules::day())
}

fn night_over_preset<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<PhaseRules, D::Error> {
    over_preset(deserializer, PhaseRules::night())
}

/// Deserialize a phase as a partial table layered over `preset`.
///
/// Unknown and mistyped fields are still rejected by the typed pass.
fn over_preset<'de, D: Deserializer<'de>>(
    deserializer: D,
    preset: PhaseRules,
) -> Result<PhaseRules, D::Error> {
    let overrides = Value::deserialize(deserializer)?;
    let mut merged = serde_json::to_value(preset).map_err(D::Error::custom)?;
    overlay(&mut merged, overrides);
    serde_json::from_value(merged).map_err(D::Error::custom)
}

fn overlay(base: &mut Value, overrides: Value) {
    match (base, overrides) {
        (Value::Object(base), Value::Object(overrides)) => {
            for (key, value) in overrides {
                match base.get_mut(&key) {
                    Some(slot) => overlay(slot, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, overrides) => *base = overrides,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_for_phase() {
        let rules = RuleSet::default();
        assert!(rules.for_phase(Phase::Day).vampire.die_in_sunlight);
        assert!(!rules.for_phase(Phase::Night).vampire.die_in_sunlight);
        assert_eq!(rules.for_phase(Phase::Night).vampire.reproduce, 2);
    }

    #[test]
    fn test_missing_phase_uses_preset() {
        let rules: RuleSet = toml::from_str("").unwrap();
        assert_eq!(rules, RuleSet::default());
    }

    #[test]
    fn test_partial_bundle_keeps_phase_preset() {
        let rules: RuleSet = toml::from_str(
            r#"
            [day.human]
            survive_min = 1

            [night.vampire]
            hunger_threshold = 3
            "#,
        )
        .unwrap();

        let mut expected = RuleSet::default();
        expected.day.human.survive_min = 1;
        expected.night.vampire.hunger_threshold = 3;
        assert_eq!(rules, expected);
    }

    #[test]
    fn test_mistyped_field_rejected() {
        let result = toml::from_str::<RuleSet>("[night.vampire]\nhunger_threshold = \"soon\"\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_field_rejected() {
        let mut text = toml::to_string(&RuleSet::default()).unwrap();
        text.push_str("\n[dusk]\nfoo = 1\n");
        assert!(toml::from_str::<RuleSet>(&text).is_err());

        let misspelled = toml::from_str::<RuleSet>("[day.vampire]\nhunger_treshold = 3\n");
        assert!(misspelled.is_err());
    }
}
