//! Trajectory feature classifier
//!
//! Maps the movement statistics of a pointer trace to a coarse behavioral
//! category with a bounded heuristic confidence. Rules are evaluated in a
//! fixed order and the first match wins:
//!
//! | Rule | Label | Confidence |
//! |---|---|---|
//! | `std > 5 && acc > 0.5` | Hyperactive ADHD | `min(85, 60 + 3·std + 10·acc)` |
//! | `changes > 0.3·N` | Inattentive ADHD | `min(80, 55 + 100·changes/N)` |
//! | `std > 3 && changes > 0.2·N` | Combined ADHD | `min(82, 58 + 2·std + 50·changes/N)` |
//! | otherwise | No ADHD | `max(70, 90 - 2·std)` |
//!
//! `std` is the velocity standard deviation, `acc` the mean acceleration and
//! `changes` the direction-change count. `N` is the number of input samples,
//! not the number of velocity samples.

use crate::config::ClassifierRules;
use crate::features::{round_to, TrajectoryFeatureDeriver};
use crate::types::{ClassificationLabel, ClassificationResult, PointerSample, TrajectoryProfile};
use tracing::{debug, warn};

/// Traces with fewer samples are reported as "Insufficient Data"
pub const MIN_SAMPLES: usize = 10;

/// Heuristic classifier over pointer-trace statistics
#[derive(Debug, Clone, Default)]
pub struct TrajectoryClassifier {
    rules: ClassifierRules,
}

impl TrajectoryClassifier {
    /// Create a classifier with the default decision table
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a classifier with custom thresholds
    pub fn with_rules(rules: ClassifierRules) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &ClassifierRules {
        &self.rules
    }

    /// Classify a pointer trace
    pub fn classify(&self, samples: &[PointerSample]) -> ClassificationResult {
        self.classify_with_profile(samples).0
    }

    /// Classify a pointer trace and also return the movement profile it was based on
    pub fn classify_with_profile(
        &self,
        samples: &[PointerSample],
    ) -> (ClassificationResult, Option<TrajectoryProfile>) {
        if samples.len() < MIN_SAMPLES {
            return (ClassificationResult::insufficient_data(), None);
        }

        let metrics = TrajectoryFeatureDeriver::derive(samples, self.rules.direction_change_angle);
        match TrajectoryFeatureDeriver::summarize(&metrics) {
            Some(profile) if profile.is_finite() => {
                (self.classify_profile(&profile, samples.len()), Some(profile))
            }
            Some(profile) => {
                warn!(
                    samples = samples.len(),
                    avg_velocity = profile.avg_velocity,
                    avg_acceleration = profile.avg_acceleration,
                    "movement statistics overflowed; treating trace as insufficient"
                );
                (ClassificationResult::insufficient_data(), None)
            }
            None => {
                debug!(
                    samples = samples.len(),
                    "no step with a non-zero time delta; treating trace as insufficient"
                );
                (ClassificationResult::insufficient_data(), None)
            }
        }
    }

    /// Apply the decision table to an already derived profile.
    ///
    /// `sample_count` is the length of the input trace.
    pub fn classify_profile(
        &self,
        profile: &TrajectoryProfile,
        sample_count: usize,
    ) -> ClassificationResult {
        if sample_count < MIN_SAMPLES {
            return ClassificationResult::insufficient_data();
        }

        let (label, confidence) = self.decide(profile, sample_count as f64);

        debug!(
            label = %label,
            confidence,
            velocity_std = profile.velocity_std_dev,
            avg_acceleration = profile.avg_acceleration,
            direction_changes = profile.direction_changes,
            samples = sample_count,
            "classified pointer trace"
        );

        ClassificationResult {
            label,
            confidence: round_to(confidence, 1),
            statistics: Some(TrajectoryFeatureDeriver::statistics(profile)),
        }
    }

    fn decide(&self, profile: &TrajectoryProfile, n: f64) -> (ClassificationLabel, f64) {
        let r = &self.rules;
        let std = profile.velocity_std_dev;
        let acc = profile.avg_acceleration;
        let changes = profile.direction_changes as f64;
        let change_ratio = changes / n;

        if std > r.hyperactive_velocity_std && acc > r.hyperactive_acceleration {
            let confidence = r.hyperactive_base
                + std * r.hyperactive_std_weight
                + acc * r.hyperactive_acceleration_weight;
            return (
                ClassificationLabel::Hyperactive,
                confidence.min(r.hyperactive_cap),
            );
        }

        if changes > r.inattentive_change_ratio * n {
            let confidence = r.inattentive_base + change_ratio * r.inattentive_ratio_weight;
            return (
                ClassificationLabel::Inattentive,
                confidence.min(r.inattentive_cap),
            );
        }

        if std > r.combined_velocity_std && changes > r.combined_change_ratio * n {
            let confidence = r.combined_base
                + std * r.combined_std_weight
                + change_ratio * r.combined_ratio_weight;
            return (ClassificationLabel::Combined, confidence.min(r.combined_cap));
        }

        let confidence = r
            .no_indicators_floor
            .max(r.no_indicators_base - std * r.no_indicators_std_weight);
        (ClassificationLabel::NoIndicators, confidence)
    }
}

/// Classify a pointer trace with the default decision table
pub fn classify(samples: &[PointerSample]) -> ClassificationResult {
    TrajectoryClassifier::new().classify(samples)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    /// Build a trace from per-step displacements with a constant time delta
    fn from_steps(dt: f64, steps: &[(f64, f64)]) -> Vec<PointerSample> {
        let mut samples = vec![PointerSample::new(0.0, 0.0, 0.0)];
        for (i, (dx, dy)) in steps.iter().enumerate() {
            let last = samples[i];
            samples.push(PointerSample::new(last.time + dt, last.x + dx, last.y + dy));
        }
        samples
    }

    #[test]
    fn test_straight_line_is_no_indicators() {
        let samples = from_steps(100.0, &[(1.0, 0.0); 19]);
        assert_eq!(samples.len(), 20);

        let result = classify(&samples);
        assert_eq!(result.label, ClassificationLabel::NoIndicators);
        assert_eq!(result.confidence, 90.0);

        let stats = result.statistics.unwrap();
        assert_eq!(stats.avg_velocity, 0.01);
        assert_eq!(stats.velocity_std_dev, 0.0);
        assert_eq!(stats.avg_acceleration, 0.0);
        assert_eq!(stats.direction_changes, 0);
    }

    #[test]
    fn test_alternating_jumps_are_hyperactive() {
        let steps: Vec<(f64, f64)> = (0..19)
            .map(|k| if k % 2 == 0 { (10.0, 0.0) } else { (500.0, 0.0) })
            .collect();
        let result = classify(&from_steps(10.0, &steps));

        assert_eq!(result.label, ClassificationLabel::Hyperactive);
        assert_eq!(result.confidence, 85.0);
        let stats = result.statistics.unwrap();
        assert!(stats.velocity_std_dev > 5.0);
        assert!(stats.avg_acceleration > 0.5);
    }

    #[test]
    fn test_hyperactive_below_cap() {
        // velocities alternate 1 and 12 -> std 5.5, acceleration 11/20
        let steps: Vec<(f64, f64)> = (0..20)
            .map(|k| if k % 2 == 0 { (20.0, 0.0) } else { (240.0, 0.0) })
            .collect();
        let result = classify(&from_steps(20.0, &steps));

        assert_eq!(result.label, ClassificationLabel::Hyperactive);
        assert_eq!(result.confidence, 82.0);
    }

    #[test]
    fn test_staircase_is_inattentive() {
        let steps: Vec<(f64, f64)> = (0..19)
            .map(|k| if k % 2 == 0 { (1.0, 0.0) } else { (0.0, 1.0) })
            .collect();
        let result = classify(&from_steps(100.0, &steps));

        assert_eq!(result.label, ClassificationLabel::Inattentive);
        assert_eq!(result.confidence, 80.0);
        assert_eq!(result.statistics.unwrap().direction_changes, 18);
    }

    #[test]
    fn test_periodic_right_angle_turns_are_inattentive() {
        // two steps right, two steps down, ... -> a turn every second step
        let steps: Vec<(f64, f64)> = (0..19)
            .map(|k| if (k / 2) % 2 == 0 { (1.0, 0.0) } else { (0.0, 1.0) })
            .collect();
        let result = classify(&from_steps(100.0, &steps));

        assert_eq!(result.label, ClassificationLabel::Inattentive);
        assert_eq!(result.statistics.unwrap().direction_changes, 9);
    }

    #[test]
    fn test_variable_speed_with_some_turns_is_combined() {
        let steps: Vec<(f64, f64)> = (0..19)
            .map(|k| {
                let len = if k % 2 == 0 { 10.0 } else { 1000.0 };
                if [4, 10, 18].contains(&k) {
                    (0.0, len)
                } else {
                    (len, 0.0)
                }
            })
            .collect();
        let result = classify(&from_steps(100.0, &steps));

        assert_eq!(result.label, ClassificationLabel::Combined);
        assert_eq!(result.confidence, 80.4);
        assert_eq!(result.statistics.unwrap().direction_changes, 5);
    }

    #[test]
    fn test_hyperactive_takes_precedence_over_inattentive() {
        let steps: Vec<(f64, f64)> = (0..19)
            .map(|k| if k % 2 == 0 { (1.0, 0.0) } else { (0.0, 50.0) })
            .collect();
        let (result, profile) = TrajectoryClassifier::new()
            .classify_with_profile(&from_steps(1.0, &steps));

        let profile = profile.unwrap();
        assert!(profile.direction_changes as f64 > 0.3 * 20.0);
        assert_eq!(result.label, ClassificationLabel::Hyperactive);
    }

    #[test]
    fn test_nine_samples_is_insufficient() {
        let steps: Vec<(f64, f64)> = (0..8)
            .map(|k| if k % 2 == 0 { (1.0, 0.0) } else { (0.0, 50.0) })
            .collect();
        let samples = from_steps(1.0, &steps);
        assert_eq!(samples.len(), 9);

        assert_eq!(classify(&samples), ClassificationResult::insufficient_data());
    }

    #[test]
    fn test_empty_trace_is_insufficient() {
        assert_eq!(classify(&[]), ClassificationResult::insufficient_data());
    }

    #[test]
    fn test_ten_samples_is_enough() {
        let samples = from_steps(100.0, &[(1.0, 0.0); 9]);
        assert_eq!(samples.len(), MIN_SAMPLES);
        assert_eq!(classify(&samples).label, ClassificationLabel::NoIndicators);
    }

    #[test]
    fn test_all_identical_timestamps_is_insufficient() {
        let samples: Vec<PointerSample> = (0..12)
            .map(|i| PointerSample::new(5.0, i as f64, 0.0))
            .collect();
        assert_eq!(classify(&samples), ClassificationResult::insufficient_data());
    }

    #[test]
    fn test_stationary_trace_is_no_indicators() {
        let samples: Vec<PointerSample> = (0..12)
            .map(|i| PointerSample::new(i as f64, 50.0, 50.0))
            .collect();
        let result = classify(&samples);

        assert_eq!(result.label, ClassificationLabel::NoIndicators);
        assert_eq!(result.confidence, 90.0);
    }

    #[test]
    fn test_no_indicators_floor() {
        let profile = TrajectoryProfile {
            avg_velocity: 4.0,
            velocity_std_dev: 4.5,
            avg_acceleration: 0.1,
            direction_changes: 0,
            total_distance: 0.0,
            max_velocity: 0.0,
            max_acceleration: 0.0,
            acceleration_std_dev: 0.0,
            reversals: 0,
            duration: 0.0,
            velocity_samples: 19,
        };
        let result = TrajectoryClassifier::new().classify_profile(&profile, 20);
        assert_eq!(result.label, ClassificationLabel::NoIndicators);
        assert_eq!(result.confidence, 81.0);

        let wild = TrajectoryProfile {
            velocity_std_dev: 40.0,
            ..profile
        };
        let result = TrajectoryClassifier::new().classify_profile(&wild, 20);
        assert_eq!(result.label, ClassificationLabel::NoIndicators);
        assert_eq!(result.confidence, 70.0);
    }

    #[test]
    fn test_custom_rules() {
        let rules = ClassifierRules {
            inattentive_change_ratio: 0.95,
            combined_change_ratio: 0.95,
            ..ClassifierRules::default()
        };
        let steps: Vec<(f64, f64)> = (0..19)
            .map(|k| if k % 2 == 0 { (1.0, 0.0) } else { (0.0, 1.0) })
            .collect();
        let result = TrajectoryClassifier::with_rules(rules).classify(&from_steps(100.0, &steps));

        assert_eq!(result.label, ClassificationLabel::NoIndicators);
    }

    #[test]
    fn test_classification_is_deterministic() {
        let steps: Vec<(f64, f64)> = (0..30)
            .map(|k| ((k as f64 * 0.7).sin() * 40.0, (k as f64 * 1.3).cos() * 25.0))
            .collect();
        let samples = from_steps(16.0, &steps);

        let first = classify(&samples);
        let second = classify(&samples);
        assert_eq!(first.label, second.label);
        assert_eq!(first.confidence.to_bits(), second.confidence.to_bits());
        assert_eq!(first.statistics, second.statistics);
    }

    #[test]
    fn test_huge_coordinates_still_count_reversals() {
        let samples: Vec<PointerSample> = (0..12)
            .map(|i| {
                let x = if i % 2 == 0 { 1e200 } else { -1e200 };
                PointerSample::new(i as f64, x, 0.0)
            })
            .collect();
        let result = classify(&samples);

        assert_eq!(result.label, ClassificationLabel::Inattentive);
        assert_eq!(result.confidence, 80.0);
        let stats = result.statistics.unwrap();
        assert_eq!(stats.direction_changes, 10);
        assert!(stats.avg_velocity.is_finite());
        assert!(stats.velocity_std_dev.is_finite());
        assert!(stats.avg_acceleration.is_finite());
    }

    #[test]
    fn test_overflowing_velocity_is_insufficient() {
        let samples: Vec<PointerSample> = (0..12)
            .map(|i| {
                let x = if i % 2 == 0 { 0.0 } else { 1000.0 };
                PointerSample::new(i as f64 * 1e-310, x, 0.0)
            })
            .collect();
        let (result, profile) = TrajectoryClassifier::new().classify_with_profile(&samples);

        assert_eq!(result, ClassificationResult::insufficient_data());
        assert!(profile.is_none());
    }
}
