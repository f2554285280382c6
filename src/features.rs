//! Trajectory feature derivation
//!
//! Computes first and second derivatives of a pointer trace and its turning
//! behavior in a single left-to-right pass, then reduces them to summary
//! statistics.

use crate::types::{PointerSample, TrajectoryMetrics, TrajectoryProfile, TrajectoryStatistics};

/// Displacement and speed of the last step that produced a velocity sample
#[derive(Debug, Clone, Copy)]
struct RecordedStep {
    dx: f64,
    dy: f64,
    velocity: f64,
}

/// Feature deriver for pointer traces
pub struct TrajectoryFeatureDeriver;

impl TrajectoryFeatureDeriver {
    /// Derive per-step series from a trace.
    ///
    /// Steps with a zero time delta are skipped entirely. A direction change is
    /// recorded when the angle between consecutive recorded displacements
    /// exceeds `direction_change_angle` (radians); steps without displacement
    /// never produce an angle.
    pub fn derive(samples: &[PointerSample], direction_change_angle: f64) -> TrajectoryMetrics {
        let mut metrics = TrajectoryMetrics {
            duration: match (samples.first(), samples.last()) {
                (Some(first), Some(last)) => last.time - first.time,
                _ => 0.0,
            },
            ..TrajectoryMetrics::default()
        };

        let mut previous: Option<RecordedStep> = None;

        for pair in samples.windows(2) {
            let (from, to) = (pair[0], pair[1]);

            let dt = to.time - from.time;
            if dt == 0.0 {
                continue;
            }

            let dx = to.x - from.x;
            let dy = to.y - from.y;
            let distance = dx.hypot(dy);
            let velocity = distance / dt;

            metrics.distances.push(distance);
            metrics.velocities.push(velocity);

            if let Some(prev) = previous {
                metrics
                    .accelerations
                    .push((velocity - prev.velocity).abs() / dt);

                if let Some(turn) = turn_between((prev.dx, prev.dy), (dx, dy)) {
                    if turn.angle > direction_change_angle {
                        metrics.direction_changes.push(turn.angle);
                    }
                    if turn.opposing {
                        metrics.reversal_count += 1;
                    }
                }
            }

            previous = Some(RecordedStep { dx, dy, velocity });
        }

        metrics
    }

    /// Reduce derived series to a movement profile.
    ///
    /// Returns `None` when no step produced a velocity sample (fewer than two
    /// samples, or every time delta was zero): the mean of an empty series is
    /// undefined and is not substituted with zero.
    pub fn summarize(metrics: &TrajectoryMetrics) -> Option<TrajectoryProfile> {
        let avg_velocity = mean(&metrics.velocities)?;
        let velocity_std_dev = population_std_dev(&metrics.velocities, avg_velocity);

        // A single recorded step has no acceleration; treated as zero
        let avg_acceleration = mean(&metrics.accelerations).unwrap_or(0.0);
        let acceleration_std_dev = population_std_dev(&metrics.accelerations, avg_acceleration);

        Some(TrajectoryProfile {
            avg_velocity,
            velocity_std_dev,
            avg_acceleration,
            direction_changes: metrics.direction_changes.len(),
            total_distance: metrics.distances.iter().sum(),
            max_velocity: max_of(&metrics.velocities),
            max_acceleration: max_of(&metrics.accelerations),
            acceleration_std_dev,
            reversals: metrics.reversal_count,
            duration: metrics.duration,
            velocity_samples: metrics.velocities.len(),
        })
    }

    /// The rounded statistics block reported alongside a classification
    pub fn statistics(profile: &TrajectoryProfile) -> TrajectoryStatistics {
        TrajectoryStatistics {
            avg_velocity: round_to(profile.avg_velocity, 2),
            velocity_std_dev: round_to(profile.velocity_std_dev, 2),
            avg_acceleration: round_to(profile.avg_acceleration, 2),
            direction_changes: profile.direction_changes,
        }
    }
}

/// Turn between two consecutive displacements
#[derive(Debug, Clone, Copy)]
struct Turn {
    /// Unsigned angle in radians, within [0, π]
    angle: f64,
    /// The displacements point in opposing directions (negative dot product)
    opposing: bool,
}

/// Turn between two displacement vectors, `None` if either has no usable length.
///
/// Both vectors are normalized first and the angle is taken with `atan2`, so
/// large coordinates cannot overflow into a NaN cosine.
fn turn_between(a: (f64, f64), b: (f64, f64)) -> Option<Turn> {
    let (ax, ay) = unit(a)?;
    let (bx, by) = unit(b)?;
    let dot = ax * bx + ay * by;
    let cross = ax * by - ay * bx;
    Some(Turn {
        angle: cross.atan2(dot).abs(),
        opposing: dot < 0.0,
    })
}

fn unit((x, y): (f64, f64)) -> Option<(f64, f64)> {
    let magnitude = x.hypot(y);
    if magnitude == 0.0 || !magnitude.is_finite() {
        return None;
    }
    Some((x / magnitude, y / magnitude))
}

fn mean(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    Some(values.iter().sum::<f64>() / values.len() as f64)
}

fn population_std_dev(values: &[f64], mean: f64) -> f64 {
    // Deviations are scaled by the largest one so squaring cannot overflow
    let scale = values.iter().map(|v| (v - mean).abs()).fold(0.0, f64::max);
    if scale == 0.0 || !scale.is_finite() {
        return scale;
    }
    let variance = values
        .iter()
        .map(|v| ((v - mean) / scale).powi(2))
        .sum::<f64>()
        / values.len() as f64;
    scale * variance.sqrt()
}

fn max_of(values: &[f64]) -> f64 {
    values.iter().copied().fold(0.0, f64::max)
}

/// Round half away from zero to `decimals` places
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    if !scaled.is_finite() {
        // Too large to carry a fractional part
        return value;
    }
    scaled.round() / factor
}
