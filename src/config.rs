//! Analysis configuration
//!
//! Classifier rule thresholds and indicator bands. Every section carries
//! `#[serde(default)]` so a partial JSON file only overrides what it names.

use crate::error::AnalysisError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Top-level configuration passed explicitly to the analyzer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Decision-table thresholds and confidence formulas
    pub rules: ClassifierRules,
    /// Descriptive indicator bands
    pub indicators: IndicatorThresholds,
}

/// Thresholds, multipliers, and caps of the classification decision table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassifierRules {
    /// Turning angle (radians) above which a direction change is recorded
    pub direction_change_angle: f64,

    pub hyperactive_velocity_std: f64,
    pub hyperactive_acceleration: f64,
    pub hyperactive_base: f64,
    pub hyperactive_std_weight: f64,
    pub hyperactive_acceleration_weight: f64,
    pub hyperactive_cap: f64,

    /// Direction changes per input sample above which the trace is inattentive
    pub inattentive_change_ratio: f64,
    pub inattentive_base: f64,
    pub inattentive_ratio_weight: f64,
    pub inattentive_cap: f64,

    pub combined_velocity_std: f64,
    pub combined_change_ratio: f64,
    pub combined_base: f64,
    pub combined_std_weight: f64,
    pub combined_ratio_weight: f64,
    pub combined_cap: f64,

    pub no_indicators_base: f64,
    pub no_indicators_std_weight: f64,
    /// Lower bound only; this branch has no upper cap
    pub no_indicators_floor: f64,
}

impl Default for ClassifierRules {
    fn default() -> Self {
        Self {
            direction_change_angle: std::f64::consts::FRAC_PI_4,

            hyperactive_velocity_std: 5.0,
            hyperactive_acceleration: 0.5,
            hyperactive_base: 60.0,
            hyperactive_std_weight: 3.0,
            hyperactive_acceleration_weight: 10.0,
            hyperactive_cap: 85.0,

            inattentive_change_ratio: 0.3,
            inattentive_base: 55.0,
            inattentive_ratio_weight: 100.0,
            inattentive_cap: 80.0,

            combined_velocity_std: 3.0,
            combined_change_ratio: 0.2,
            combined_base: 58.0,
            combined_std_weight: 2.0,
            combined_ratio_weight: 50.0,
            combined_cap: 82.0,

            no_indicators_base: 90.0,
            no_indicators_std_weight: 2.0,
            no_indicators_floor: 70.0,
        }
    }
}

/// Lower and upper bound of a single indicator band
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandThresholds {
    pub low: f64,
    pub high: f64,
}

impl BandThresholds {
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

/// Thresholds for the descriptive movement indicators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorThresholds {
    pub total_distance: BandThresholds,
    pub max_velocity: BandThresholds,
    pub max_acceleration: BandThresholds,
    pub velocity_std_dev: BandThresholds,
    pub acceleration_std_dev: BandThresholds,
    pub reversals: BandThresholds,
}

impl Default for IndicatorThresholds {
    fn default() -> Self {
        Self {
            total_distance: BandThresholds::new(1000.0, 4000.0),
            max_velocity: BandThresholds::new(300.0, 1000.0),
            max_acceleration: BandThresholds::new(5000.0, 20000.0),
            velocity_std_dev: BandThresholds::new(100.0, 500.0),
            acceleration_std_dev: BandThresholds::new(1000.0, 5000.0),
            reversals: BandThresholds::new(5.0, 20.0),
        }
    }
}

impl AnalysisConfig {
    /// Parse a configuration from JSON and validate it
    pub fn from_json(json: &str) -> Result<Self, AnalysisError> {
        let config: AnalysisConfig = serde_json::from_str(json)
            .map_err(|e| AnalysisError::InvalidConfig(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration file (JSON)
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, AnalysisError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Check that every threshold is usable
    pub fn validate(&self) -> Result<(), AnalysisError> {
        self.rules.validate()?;
        self.indicators.validate()
    }
}

impl ClassifierRules {
    fn validate(&self) -> Result<(), AnalysisError> {
        let non_negative = [
            ("direction_change_angle", self.direction_change_angle),
            ("hyperactive_velocity_std", self.hyperactive_velocity_std),
            ("hyperactive_acceleration", self.hyperactive_acceleration),
            ("hyperactive_base", self.hyperactive_base),
            ("hyperactive_std_weight", self.hyperactive_std_weight),
            ("hyperactive_acceleration_weight", self.hyperactive_acceleration_weight),
            ("inattentive_change_ratio", self.inattentive_change_ratio),
            ("inattentive_base", self.inattentive_base),
            ("inattentive_ratio_weight", self.inattentive_ratio_weight),
            ("combined_velocity_std", self.combined_velocity_std),
            ("combined_change_ratio", self.combined_change_ratio),
            ("combined_base", self.combined_base),
            ("combined_std_weight", self.combined_std_weight),
            ("combined_ratio_weight", self.combined_ratio_weight),
            ("no_indicators_base", self.no_indicators_base),
            ("no_indicators_std_weight", self.no_indicators_std_weight),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(AnalysisError::InvalidConfig(format!(
                    "rules.{name} must be a finite non-negative number, got {value}"
                )));
            }
        }

        if self.direction_change_angle > std::f64::consts::PI {
            return Err(AnalysisError::InvalidConfig(
                "rules.direction_change_angle must not exceed π".to_string(),
            ));
        }

        let percentages = [
            ("hyperactive_cap", self.hyperactive_cap),
            ("inattentive_cap", self.inattentive_cap),
            ("combined_cap", self.combined_cap),
            ("no_indicators_floor", self.no_indicators_floor),
        ];
        for (name, value) in percentages {
            if !(0.0..=100.0).contains(&value) {
                return Err(AnalysisError::InvalidConfig(format!(
                    "rules.{name} must be within [0, 100], got {value}"
                )));
            }
        }

        Ok(())
    }
}

impl IndicatorThresholds {
    fn validate(&self) -> Result<(), AnalysisError> {
        let bands = [
            ("total_distance", self.total_distance),
            ("max_velocity", self.max_velocity),
            ("max_acceleration", self.max_acceleration),
            ("velocity_std_dev", self.velocity_std_dev),
            ("acceleration_std_dev", self.acceleration_std_dev),
            ("reversals", self.reversals),
        ];
        for (name, band) in bands {
            if !band.low.is_finite() || !band.high.is_finite() || band.low > band.high {
                return Err(AnalysisError::InvalidConfig(format!(
                    "indicators.{name}: low ({}) must not exceed high ({})",
                    band.low, band.high
                )));
            }
        }
        Ok(())
    }
}
