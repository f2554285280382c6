//! Movement indicator bands
//!
//! Places each extended profile metric into a Normal / Borderline / High band.
//! Bands are descriptive only and never change the classifier's label.

use crate::config::{BandThresholds, IndicatorThresholds};
use crate::types::{IndicatorBand, IndicatorReading, TrajectoryProfile};

/// Band a value: below `low` is Normal, above `high` is High, otherwise Borderline
pub fn band(value: f64, thresholds: BandThresholds) -> IndicatorBand {
    if value < thresholds.low {
        IndicatorBand::Normal
    } else if value > thresholds.high {
        IndicatorBand::High
    } else {
        IndicatorBand::Borderline
    }
}

/// Band every indicator metric of a profile, in report order
pub fn assess(
    profile: &TrajectoryProfile,
    thresholds: &IndicatorThresholds,
) -> Vec<IndicatorReading> {
    let metrics = [
        ("Total Distance", profile.total_distance, thresholds.total_distance),
        ("Max Velocity", profile.max_velocity, thresholds.max_velocity),
        ("Max Acceleration", profile.max_acceleration, thresholds.max_acceleration),
        ("Velocity Variability", profile.velocity_std_dev, thresholds.velocity_std_dev),
        (
            "Acceleration Variability",
            profile.acceleration_std_dev,
            thresholds.acceleration_std_dev,
        ),
        ("Reversals", profile.reversals as f64, thresholds.reversals),
    ];

    metrics
        .into_iter()
        .map(|(name, value, limits)| IndicatorReading {
            name: name.to_string(),
            value,
            band: band(value, limits),
        })
        .collect()
}
