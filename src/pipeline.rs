//! Pipeline orchestration
//!
//! Public API for pointer-trace analysis. Runs the full pipeline from a
//! captured trace to a response object, report, or persistence record:
//! Trace JSON → Adapter → Features → Classifier → Indicators → Encoder.

use crate::adapter::SampleAdapter;
use crate::classifier::TrajectoryClassifier;
use crate::config::AnalysisConfig;
use crate::encoder::ResponseEncoder;
use crate::error::AnalysisError;
use crate::indicators;
use crate::report;
use crate::types::{
    AnalysisRecord, AnalysisResponse, ClassificationResult, PointerSample, TrajectoryAnalysis,
};

/// Convert a pointer-trace JSON array to a response JSON object (stateless, one-shot).
///
/// # Arguments
/// * `samples_json` - JSON array of `{time, x, y}` objects
///
/// # Returns
/// Response JSON `{adhd_type, confidence, classifications}`
///
/// # Example
/// ```
/// let json = r#"[{"time": 0, "x": 0, "y": 0}]"#;
/// let response = attention_trace::analyze_json(json).unwrap();
/// assert!(response.contains("Insufficient Data"));
/// ```
pub fn analyze_json(samples_json: &str) -> Result<String, AnalysisError> {
    TraceAnalyzer::new().process(samples_json)
}

/// Analyzer holding an explicit configuration.
///
/// Immutable after construction; share it across threads freely.
#[derive(Debug, Clone)]
pub struct TraceAnalyzer {
    config: AnalysisConfig,
    classifier: TrajectoryClassifier,
    encoder: ResponseEncoder,
}

impl Default for TraceAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

impl TraceAnalyzer {
    /// Create an analyzer with the default configuration
    pub fn new() -> Self {
        Self::from_valid_config(AnalysisConfig::default())
    }

    /// Create an analyzer with a custom configuration
    pub fn with_config(config: AnalysisConfig) -> Result<Self, AnalysisError> {
        config.validate()?;
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: AnalysisConfig) -> Self {
        Self {
            classifier: TrajectoryClassifier::with_rules(config.rules.clone()),
            config,
            encoder: ResponseEncoder::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Validate and fully analyze a trace
    pub fn analyze(&self, samples: &[PointerSample]) -> Result<TrajectoryAnalysis, AnalysisError> {
        SampleAdapter::validate(samples)?;

        let (result, profile) = self.classifier.classify_with_profile(samples);
        let indicators = profile
            .as_ref()
            .map(|p| indicators::assess(p, &self.config.indicators))
            .unwrap_or_default();

        Ok(TrajectoryAnalysis {
            result,
            profile,
            indicators,
        })
    }

    /// Validate and classify a trace
    pub fn classify(
        &self,
        samples: &[PointerSample],
    ) -> Result<ClassificationResult, AnalysisError> {
        SampleAdapter::validate(samples)?;
        Ok(self.classifier.classify(samples))
    }

    /// Validate and classify a trace, returning the response object
    pub fn respond(&self, samples: &[PointerSample]) -> Result<AnalysisResponse, AnalysisError> {
        let result = self.classify(samples)?;
        Ok(self.encoder.encode(&result))
    }

    /// Process a trace JSON array and return response JSON
    pub fn process(&self, samples_json: &str) -> Result<String, AnalysisError> {
        let samples = SampleAdapter::parse_samples(samples_json)?;
        let result = self.classifier.classify(&samples);
        self.encoder.encode_to_json(&result)
    }

    /// Process a trace JSON array and return a plain-text report
    pub fn report(&self, samples_json: &str) -> Result<String, AnalysisError> {
        let samples = SampleAdapter::parse_array(samples_json)?;
        let analysis = self.analyze(&samples)?;
        Ok(report::render(&analysis))
    }

    /// Validate and classify a trace, wrapping the response for persistence
    pub fn record(
        &self,
        user_id: &str,
        session_id: Option<&str>,
        samples: &[PointerSample],
    ) -> Result<AnalysisRecord, AnalysisError> {
        let result = self.classify(samples)?;
        self.encoder.build_record(user_id, session_id, samples, &result)
    }
}
