//! Core data types for Attention Trace
//!
//! This module defines the types that flow through the pointer-trace pipeline:
//! raw samples, derived trajectory metrics, classification results, and the
//! wire objects handed to callers and the persistence layer.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One observed pointer input event
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PointerSample {
    /// Timestamp, non-decreasing within a trace (unit-agnostic but consistent)
    pub time: f64,
    /// Screen-space x coordinate
    pub x: f64,
    /// Screen-space y coordinate
    pub y: f64,
}

impl PointerSample {
    pub fn new(time: f64, x: f64, y: f64) -> Self {
        Self { time, x, y }
    }
}

/// Per-step series derived from a single forward pass over a trace
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrajectoryMetrics {
    /// Speed of every step with a non-zero time delta
    pub velocities: Vec<f64>,
    /// Absolute change of speed between consecutive recorded steps, per unit time
    pub accelerations: Vec<f64>,
    /// Turning angles (radians) above the direction-change threshold
    pub direction_changes: Vec<f64>,
    /// Euclidean length of every recorded step
    pub distances: Vec<f64>,
    /// Consecutive recorded steps whose displacements point in opposing directions
    pub reversal_count: usize,
    /// Elapsed time between the first and last sample
    pub duration: f64,
}

/// The fixed statistics block reported with every classification
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryStatistics {
    /// Mean velocity, rounded to 2 decimals
    pub avg_velocity: f64,
    /// Population standard deviation of velocity, rounded to 2 decimals
    pub velocity_std_dev: f64,
    /// Mean acceleration, rounded to 2 decimals
    pub avg_acceleration: f64,
    /// Number of turns sharper than 45°
    pub direction_changes: usize,
}

/// Extended movement profile used for indicator bands and reports
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryProfile {
    pub avg_velocity: f64,
    pub velocity_std_dev: f64,
    pub avg_acceleration: f64,
    pub direction_changes: usize,
    /// Sum of step lengths
    pub total_distance: f64,
    pub max_velocity: f64,
    pub max_acceleration: f64,
    pub acceleration_std_dev: f64,
    /// Turns sharper than 90° (negative dot product between steps)
    pub reversals: usize,
    pub duration: f64,
    /// Number of steps that produced a velocity sample
    pub velocity_samples: usize,
}

impl TrajectoryProfile {
    /// Whether every measurement is a finite number
    pub fn is_finite(&self) -> bool {
        [
            self.avg_velocity,
            self.velocity_std_dev,
            self.avg_acceleration,
            self.total_distance,
            self.max_velocity,
            self.max_acceleration,
            self.acceleration_std_dev,
            self.duration,
        ]
        .iter()
        .all(|v| v.is_finite())
    }
}

/// Coarse behavioral category produced by the classifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClassificationLabel {
    #[serde(rename = "Hyperactive ADHD")]
    Hyperactive,
    #[serde(rename = "Inattentive ADHD")]
    Inattentive,
    #[serde(rename = "Combined ADHD")]
    Combined,
    #[serde(rename = "No ADHD")]
    NoIndicators,
    #[serde(rename = "Insufficient Data")]
    InsufficientData,
}

impl ClassificationLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClassificationLabel::Hyperactive => "Hyperactive ADHD",
            ClassificationLabel::Inattentive => "Inattentive ADHD",
            ClassificationLabel::Combined => "Combined ADHD",
            ClassificationLabel::NoIndicators => "No ADHD",
            ClassificationLabel::InsufficientData => "Insufficient Data",
        }
    }
}

impl fmt::Display for ClassificationLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output of the classifier, immutable once produced
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub label: ClassificationLabel,
    /// Heuristic certainty in [0, 100], rounded to one decimal
    pub confidence: f64,
    /// `None` when there was not enough data to compute statistics
    pub statistics: Option<TrajectoryStatistics>,
}

impl ClassificationResult {
    /// The short-circuit result for traces too small to analyze
    pub fn insufficient_data() -> Self {
        Self {
            label: ClassificationLabel::InsufficientData,
            confidence: 0.0,
            statistics: None,
        }
    }
}

/// Band of a single movement indicator relative to its thresholds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IndicatorBand {
    Normal,
    Borderline,
    High,
}

impl fmt::Display for IndicatorBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            IndicatorBand::Normal => "Normal",
            IndicatorBand::Borderline => "Borderline",
            IndicatorBand::High => "High",
        };
        f.write_str(s)
    }
}

/// A movement indicator value together with its band
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndicatorReading {
    pub name: String,
    pub value: f64,
    pub band: IndicatorBand,
}

/// Full analysis of one trace: the classification plus descriptive detail
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrajectoryAnalysis {
    pub result: ClassificationResult,
    /// `None` when the result is "Insufficient Data": too few samples, no
    /// step with a non-zero time delta, or statistics that overflowed
    pub profile: Option<TrajectoryProfile>,
    pub indicators: Vec<IndicatorReading>,
}

// ============================================================================
// Wire types
// ============================================================================

/// Statistics block of the wire response, keyed by display name.
///
/// Every field is absent for "Insufficient Data", which serializes as `{}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResponseClassifications {
    #[serde(rename = "Avg Velocity", skip_serializing_if = "Option::is_none", default)]
    pub avg_velocity: Option<String>,
    #[serde(rename = "Velocity Std Dev", skip_serializing_if = "Option::is_none", default)]
    pub velocity_std_dev: Option<String>,
    #[serde(rename = "Avg Acceleration", skip_serializing_if = "Option::is_none", default)]
    pub avg_acceleration: Option<String>,
    #[serde(rename = "Direction Changes", skip_serializing_if = "Option::is_none", default)]
    pub direction_changes: Option<usize>,
}

/// Response object returned to the request handler
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub adhd_type: ClassificationLabel,
    pub confidence: f64,
    pub classifications: ResponseClassifications,
}

/// Producer metadata stamped on persisted records
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordProducer {
    pub name: String,
    pub version: String,
}

/// Envelope handed to the persistence layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    /// Unique record identifier (UUID v4)
    pub record_id: String,
    /// Trusted user identifier supplied by the identity layer
    pub user_id: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub session_id: Option<String>,
    /// RFC 3339 UTC timestamp of when the record was built
    pub recorded_at: String,
    pub producer: RecordProducer,
    pub sample_count: usize,
    pub samples: Vec<PointerSample>,
    pub result: AnalysisResponse,
}
