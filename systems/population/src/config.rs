use reef_core::Species;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

/// Rows used when a configuration asks for an empty field.
pub const DEFAULT_DEPTH: u32 = 80;

/// Columns used when a configuration asks for an empty field.
pub const DEFAULT_WIDTH: u32 = 120;

/// Reasons a configuration cannot be used as given.
#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    /// The field would have no cells.
    #[error("field dimensions must be positive, got depth {depth} and width {width}")]
    ZeroDimension {
        /// Requested rows.
        depth: u32,
        /// Requested columns.
        width: u32,
    },
    /// A seeding probability lies outside `[0, 1]`.
    #[error("seeding probability for {species} must lie in [0, 1], got {value}")]
    ProbabilityOutOfRange {
        /// Species whose probability is invalid.
        species: &'static str,
        /// Offending value.
        value: f64,
    },
}

/// Per-cell chance of seeding each species, tried in priority order.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SeedingProbabilities {
    /// Shark probability.
    pub shark: f64,
    /// Shrimp probability.
    pub shrimp: f64,
    /// Otter probability.
    pub otter: f64,
    /// Plankton probability.
    pub plankton: f64,
    /// Human probability.
    pub human: f64,
    /// Plant probability.
    pub plant: f64,
    /// Plastic probability.
    pub plastic: f64,
}

impl Default for SeedingProbabilities {
    fn default() -> Self {
        Self {
            shark: 0.06,
            shrimp: 0.08,
            otter: 0.04,
            plankton: 0.07,
            human: 0.10,
            plant: 0.12,
            plastic: 0.14,
        }
    }
}

impl SeedingProbabilities {
    /// Probability configured for `species`.
    #[must_use]
    pub const fn probability_of(&self, species: Species) -> f64 {
        match species {
            Species::Shark => self.shark,
            Species::Shrimp => self.shrimp,
            Species::Otter => self.otter,
            Species::Plankton => self.plankton,
            Species::Human => self.human,
            Species::Plant => self.plant,
            Species::Pollutant => self.plastic,
        }
    }
}

/// Field dimensions and seeding probabilities of a simulation run.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// Number of rows.
    pub depth: u32,
    /// Number of columns.
    pub width: u32,
    /// Initial population mix.
    pub seeding: SeedingProbabilities,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            width: DEFAULT_WIDTH,
            seeding: SeedingProbabilities::default(),
        }
    }
}

impl SimulationConfig {
    /// Checks dimensions and probabilities.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == 0 || self.width == 0 {
            return Err(ConfigError::ZeroDimension {
                depth: self.depth,
                width: self.width,
            });
        }
        for species in Species::ALL {
            let value = self.seeding.probability_of(species);
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::ProbabilityOutOfRange {
                    species: species.name(),
                    value,
                });
            }
        }
        Ok(())
    }

    /// Replaces empty dimensions with the defaults, logging a warning.
    #[must_use]
    pub fn with_fallback_dimensions(mut self) -> Self {
        if self.depth == 0 || self.width == 0 {
            warn!(
                depth = self.depth,
                width = self.width,
                fallback_depth = DEFAULT_DEPTH,
                fallback_width = DEFAULT_WIDTH,
                "field dimensions must be positive; using defaults"
            );
            self.depth = DEFAULT_DEPTH;
            self.width = DEFAULT_WIDTH;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::{ConfigError, SimulationConfig, DEFAULT_DEPTH, DEFAULT_WIDTH};
    use reef_core::Species;

    #[test]
    fn defaults_validate() {
        let config = SimulationConfig::default();
        assert_eq!(config.validate(), Ok(()));
        assert_eq!(config.seeding.probability_of(Species::Pollutant), 0.14);
    }

    #[test]
    fn zero_dimension_is_rejected_then_replaced() {
        let config = SimulationConfig {
            depth: 0,
            width: 30,
            ..SimulationConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDimension {
                depth: 0,
                width: 30
            })
        );
        let fixed = config.with_fallback_dimensions();
        assert_eq!((fixed.depth, fixed.width), (DEFAULT_DEPTH, DEFAULT_WIDTH));
    }

    #[test]
    fn probabilities_must_be_unit_interval() {
        let mut config = SimulationConfig::default();
        config.seeding.otter = 1.5;
        let error = config.validate().expect_err("otter probability too large");
        assert_eq!(
            error.to_string(),
            "seeding probability for otter must lie in [0, 1], got 1.5"
        );
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config: SimulationConfig = toml::from_str(
            r#"
                depth = 20

                [seeding]
                plastic = 0.0
            "#,
        )
        .expect("parse config");
        assert_eq!(config.depth, 20);
        assert_eq!(config.width, DEFAULT_WIDTH);
        assert_eq!(config.seeding.plastic, 0.0);
        assert_eq!(config.seeding.shark, 0.06);
    }
}
