//! Tunable generation constants.
//!
//! Configs are plain serde structs so they can live in TOML or JSON files
//! next to the game data. Missing keys fall back to [`GeneratorConfig::default`].

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GeneratorError;
use crate::mapgen::MAX_DIMENSION;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountRange {
    pub min: usize,
    pub max: usize,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EncounterRates {
    /// Must stay zero; the entrance square never rolls encounters.
    pub safe: f64,
    pub boss: f64,
    pub special_mobs: f64,
    pub high_frequency: f64,
}

impl Default for EncounterRates {
    fn default() -> Self {
        Self { safe: 0.0, boss: 0.6, special_mobs: 0.35, high_frequency: 0.45 }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorConfig {
    pub room_attempts: u32,
    pub room_min_size: usize,
    pub room_max_size: usize,
    /// Rooms whose sides both reach this size are tagged as halls.
    pub hall_min_size: usize,
    pub winding_percent: f64,
    pub extra_connector_chance: f64,
    pub doors_enabled: bool,
    pub door_chance: f64,
    pub remove_dead_ends: bool,
    pub safe_zone_radius: usize,
    pub boss_zone_radius: usize,
    pub special_mob_zones: CountRange,
    pub high_frequency_zones: CountRange,
    pub high_frequency_zone_radius: usize,
    pub encounter_rates: EncounterRates,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            room_attempts: 50,
            room_min_size: 3,
            room_max_size: 9,
            hall_min_size: 7,
            winding_percent: 0.3,
            extra_connector_chance: 0.05,
            doors_enabled: true,
            door_chance: 0.5,
            remove_dead_ends: false,
            safe_zone_radius: 2,
            boss_zone_radius: 2,
            special_mob_zones: CountRange { min: 1, max: 2 },
            high_frequency_zones: CountRange { min: 1, max: 3 },
            high_frequency_zone_radius: 1,
            encounter_rates: EncounterRates::default(),
        }
    }
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), GeneratorError> {
        let probabilities = [
            ("winding_percent", self.winding_percent),
            ("extra_connector_chance", self.extra_connector_chance),
            ("door_chance", self.door_chance),
        ];
        for (name, value) in probabilities {
            if !(0.0..=1.0).contains(&value) {
                return Err(GeneratorError::InvalidConfig(format!(
                    "{name} must be within [0, 1], got {value}"
                )));
            }
        }

        let rates = [
            ("encounter_rates.safe", self.encounter_rates.safe),
            ("encounter_rates.boss", self.encounter_rates.boss),
            ("encounter_rates.special_mobs", self.encounter_rates.special_mobs),
            ("encounter_rates.high_frequency", self.encounter_rates.high_frequency),
        ];
        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(GeneratorError::InvalidConfig(format!(
                    "{name} must be a non-negative number, got {value}"
                )));
            }
        }

        if self.encounter_rates.safe != 0.0 {
            return Err(GeneratorError::InvalidConfig(format!(
                "encounter_rates.safe must be 0, got {}",
                self.encounter_rates.safe
            )));
        }

        let bounded = [
            ("room_max_size", self.room_max_size),
            ("hall_min_size", self.hall_min_size),
            ("safe_zone_radius", self.safe_zone_radius),
            ("boss_zone_radius", self.boss_zone_radius),
            ("high_frequency_zone_radius", self.high_frequency_zone_radius),
            ("special_mob_zones.max", self.special_mob_zones.max),
            ("high_frequency_zones.max", self.high_frequency_zones.max),
        ];
        for (name, value) in bounded {
            if value > MAX_DIMENSION {
                return Err(GeneratorError::InvalidConfig(format!(
                    "{name} must be at most {MAX_DIMENSION}, got {value}"
                )));
            }
        }

        if self.room_min_size == 0 {
            return Err(GeneratorError::InvalidConfig("room_min_size must be at least 1".into()));
        }
        if self.room_min_size > self.room_max_size {
            return Err(GeneratorError::InvalidConfig(format!(
                "room_min_size {} exceeds room_max_size {}",
                self.room_min_size, self.room_max_size
            )));
        }

        for (name, range) in [
            ("special_mob_zones", self.special_mob_zones),
            ("high_frequency_zones", self.high_frequency_zones),
        ] {
            if range.min > range.max {
                return Err(GeneratorError::InvalidConfig(format!(
                    "{name}.min {} exceeds {name}.max {}",
                    range.min, range.max
                )));
            }
        }

        Ok(())
    }

    /// Room size bounds bumped to odd values so rooms stay on the maze lattice.
    pub fn odd_room_sizes(&self) -> (usize, usize) {
        (force_odd(self.room_min_size), force_odd(self.room_max_size))
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, GeneratorError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_str(raw: &str) -> Result<Self, GeneratorError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file, picking the format from the extension (`.json` or TOML otherwise).
    pub fn load(path: &Path) -> Result<Self, GeneratorError> {
        let raw = fs::read_to_string(path)
            .map_err(|source| GeneratorError::ConfigRead { path: path.to_path_buf(), source })?;
        if path.extension().is_some_and(|extension| extension == "json") {
            Self::from_json_str(&raw)
        } else {
            Self::from_toml_str(&raw)
        }
    }
}

pub(crate) fn force_odd(value: usize) -> usize {
    if value % 2 == 0 { value + 1 } else { value }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn default_config_is_valid() {
        GeneratorConfig::default().validate().expect("defaults should validate");
    }

    #[test]
    fn even_room_sizes_are_bumped_to_odd() {
        let config = GeneratorConfig { room_min_size: 4, room_max_size: 8, ..Default::default() };
        assert_eq!(config.odd_room_sizes(), (5, 9));
    }

    #[test]
    fn probability_out_of_range_is_rejected() {
        let config = GeneratorConfig { door_chance: 1.5, ..Default::default() };
        let err = config.validate().expect_err("door chance above one should fail");
        assert!(err.to_string().contains("door_chance"), "unexpected error: {err}");
    }

    #[test]
    fn non_zero_safe_encounter_rate_is_rejected() {
        let config = GeneratorConfig {
            encounter_rates: EncounterRates { safe: 0.5, ..Default::default() },
            ..Default::default()
        };
        let err = config.validate().expect_err("safe rate must stay zero");
        assert!(err.to_string().contains("encounter_rates.safe"), "unexpected error: {err}");
    }

    #[test]
    fn oversized_sizes_and_radii_are_rejected() {
        let huge_room = r#"{ "room_max_size": 18446744073709551615 }"#;
        assert!(matches!(
            GeneratorConfig::from_json_str(huge_room),
            Err(GeneratorError::InvalidConfig(message)) if message.contains("room_max_size")
        ));

        let huge_radius =
            GeneratorConfig { boss_zone_radius: MAX_DIMENSION + 1, ..Default::default() };
        assert!(huge_radius.validate().is_err());

        let huge_count = GeneratorConfig {
            high_frequency_zones: CountRange { min: 0, max: usize::MAX },
            ..Default::default()
        };
        assert!(huge_count.validate().is_err());

        let at_limit = GeneratorConfig {
            room_max_size: MAX_DIMENSION,
            safe_zone_radius: MAX_DIMENSION,
            ..Default::default()
        };
        at_limit.validate().expect("limits are inclusive");
    }

    #[test]
    fn inverted_room_bounds_are_rejected() {
        let config = GeneratorConfig { room_min_size: 9, room_max_size: 3, ..Default::default() };
        assert!(config.validate().is_err());
    }

    #[test]
    fn partial_toml_falls_back_to_defaults() {
        let config = GeneratorConfig::from_toml_str(
            "winding_percent = 0.8\n\n[special_mob_zones]\nmin = 0\nmax = 4\n",
        )
        .expect("partial toml should parse");
        assert_eq!(config.winding_percent, 0.8);
        assert_eq!(config.special_mob_zones, CountRange { min: 0, max: 4 });
        assert_eq!(config.room_attempts, GeneratorConfig::default().room_attempts);
    }

    #[test]
    fn load_picks_format_from_extension() {
        let dir = tempdir().expect("tempdir");

        let json_path = dir.path().join("gen.json");
        fs::write(&json_path, r#"{ "doors_enabled": false }"#).expect("write json");
        let from_json = GeneratorConfig::load(&json_path).expect("load json");
        assert!(!from_json.doors_enabled);

        let toml_path = dir.path().join("gen.toml");
        fs::write(&toml_path, "remove_dead_ends = true\n").expect("write toml");
        let from_toml = GeneratorConfig::load(&toml_path).expect("load toml");
        assert!(from_toml.remove_dead_ends);
    }

    #[test]
    fn load_reports_missing_file_path() {
        let dir = tempdir().expect("tempdir");
        let path = dir.path().join("missing.toml");
        let err = GeneratorConfig::load(&path).expect_err("missing file should error");
        assert!(matches!(err, GeneratorError::ConfigRead { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
