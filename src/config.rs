//! Convoy tunables.
//!
//! Every field has a default, so a config file only needs to name what it
//! changes. Validation uses stillwater's `Validation` to report every bad
//! field in one pass instead of stopping at the first.

use crate::formation::TrailFormation;
use crate::path::{PathWalker, Vec2, DEFAULT_MAX_STEPS};
use serde::{Deserialize, Serialize};
use stillwater::validation::Validation;
use stillwater::NonEmptyVec;
use thiserror::Error;

/// Cargo units carried by the lead and by each trailing unit.
pub const DEFAULT_CARGO_PER_UNIT: usize = 6;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigViolation {
    #[error("{field} must be a positive finite number (got {value})")]
    NotPositive { field: &'static str, value: f32 },

    #[error("{field} must be a non-negative finite number (got {value})")]
    Negative { field: &'static str, value: f32 },

    #[error("{field} must be finite")]
    NotFinite { field: &'static str },

    #[error("{field} must be at least 1")]
    Zero { field: &'static str },
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config parse failed: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Config has {} invalid field(s): {}", .0.len(), join(.0))]
    Invalid(Vec<ConfigViolation>),
}

fn join(violations: &[ConfigViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ConvoyConfig {
    /// Lead travel speed, read by the travel behavior.
    pub speed: f32,
    /// Cargo units loaded per second, read by the load behavior.
    pub load_rate: f32,
    /// Cargo units unloaded per second, read by the unload behavior.
    pub unload_rate: f32,
    pub cargo_per_unit: usize,
    /// Arc length between the lead and the first trailing unit.
    pub first_car_distance: f32,
    /// Arc length between consecutive trailing units.
    pub car_spacing: f32,
    /// Constant visual offset added to every trailing unit's position.
    pub car_offset: Vec2,
    pub max_walk_steps: usize,
}

impl Default for ConvoyConfig {
    fn default() -> Self {
        Self {
            speed: 1.0,
            load_rate: 3.0,
            unload_rate: 3.0,
            cargo_per_unit: DEFAULT_CARGO_PER_UNIT,
            first_car_distance: 0.5,
            car_spacing: 0.4,
            car_offset: Vec2::ZERO,
            max_walk_steps: DEFAULT_MAX_STEPS,
        }
    }
}

impl ConvoyConfig {
    /// Parse a JSON config and validate it.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Collect every violation in the config.
    pub fn validate(&self) -> Validation<(), NonEmptyVec<ConfigViolation>> {
        let checks = vec![
            positive("speed", self.speed),
            positive("load_rate", self.load_rate),
            positive("unload_rate", self.unload_rate),
            at_least_one("cargo_per_unit", self.cargo_per_unit),
            non_negative("first_car_distance", self.first_car_distance),
            non_negative("car_spacing", self.car_spacing),
            finite("car_offset.x", self.car_offset.x),
            finite("car_offset.y", self.car_offset.y),
            at_least_one("max_walk_steps", self.max_walk_steps),
        ];

        Validation::all_vec(checks).map(|_| ())
    }

    /// [`validate`](Self::validate) as a `Result`.
    pub fn check(&self) -> Result<(), ConfigError> {
        match self.validate() {
            Validation::Success(()) => Ok(()),
            Validation::Failure(errors) => {
                Err(ConfigError::Invalid(errors.iter().cloned().collect()))
            }
        }
    }

    /// Cargo capacity of a convoy with `trailing_units` behind the lead.
    pub fn capacity(&self, trailing_units: usize) -> usize {
        self.cargo_per_unit * (trailing_units + 1)
    }

    pub fn walker(&self) -> PathWalker {
        PathWalker::new(self.max_walk_steps)
    }

    pub fn formation(&self) -> TrailFormation {
        TrailFormation::new(
            self.first_car_distance,
            self.car_spacing,
            self.car_offset,
            self.walker(),
        )
    }
}

fn positive(field: &'static str, value: f32) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value.is_finite() && value > 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::NotPositive { field, value })
    }
}

fn non_negative(field: &'static str, value: f32) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value.is_finite() && value >= 0.0 {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::Negative { field, value })
    }
}

fn finite(field: &'static str, value: f32) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value.is_finite() {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::NotFinite { field })
    }
}

fn at_least_one(field: &'static str, value: usize) -> Validation<(), NonEmptyVec<ConfigViolation>> {
    if value >= 1 {
        Validation::success(())
    } else {
        Validation::fail(ConfigViolation::Zero { field })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let config = ConvoyConfig::default();
        assert!(config.validate().is_success());
        assert_eq!(config.capacity(0), 6);
        assert_eq!(config.capacity(2), 18);
        assert_eq!(config.walker().max_steps(), 50);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = ConvoyConfig::from_json(r#"{ "car_spacing": 0.6 }"#).unwrap();

        assert_eq!(config.car_spacing, 0.6);
        assert_eq!(config.first_car_distance, 0.5);
        assert_eq!(config.cargo_per_unit, 6);
    }

    #[test]
    fn validation_accumulates_all_violations() {
        let config = ConvoyConfig {
            speed: 0.0,
            load_rate: -1.0,
            cargo_per_unit: 0,
            car_spacing: f32::NAN,
            ..ConvoyConfig::default()
        };

        match config.validate() {
            Validation::Failure(errors) => {
                assert_eq!(errors.len(), 4);
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::Zero { field: "cargo_per_unit" })));
                assert!(errors
                    .iter()
                    .any(|e| matches!(e, ConfigViolation::Negative { field: "car_spacing", .. })));
            }
            Validation::Success(_) => panic!("Expected failures, got success"),
        }
    }

    #[test]
    fn from_json_rejects_invalid_values() {
        let result = ConvoyConfig::from_json(r#"{ "max_walk_steps": 0, "unload_rate": 0 }"#);

        match result {
            Err(ConfigError::Invalid(violations)) => assert_eq!(violations.len(), 2),
            other => panic!("Expected invalid config, got {other:?}"),
        }
    }

    #[test]
    fn from_json_reports_parse_errors() {
        let result = ConvoyConfig::from_json("{ not json");
        assert!(matches!(result, Err(ConfigError::Parse(_))));
    }
}
