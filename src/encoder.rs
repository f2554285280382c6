//! Response encoder
//!
//! Encodes classification results into the response object returned to the
//! request handler, and wraps responses into records for the persistence layer.

use crate::error::AnalysisError;
use crate::types::{
    AnalysisRecord, AnalysisResponse, ClassificationResult, PointerSample, RecordProducer,
    ResponseClassifications,
};
use crate::{PRODUCER_NAME, VERSION};
use chrono::Utc;
use uuid::Uuid;

/// Encoder for analysis responses and persistence records
#[derive(Debug, Clone, Default)]
pub struct ResponseEncoder;

impl ResponseEncoder {
    pub fn new() -> Self {
        Self
    }

    /// Build the response object for a classification result
    pub fn encode(&self, result: &ClassificationResult) -> AnalysisResponse {
        let classifications = match &result.statistics {
            Some(stats) => ResponseClassifications {
                avg_velocity: Some(format!("{:.2}", stats.avg_velocity)),
                velocity_std_dev: Some(format!("{:.2}", stats.velocity_std_dev)),
                avg_acceleration: Some(format!("{:.2}", stats.avg_acceleration)),
                direction_changes: Some(stats.direction_changes),
            },
            None => ResponseClassifications::default(),
        };

        AnalysisResponse {
            adhd_type: result.label,
            confidence: result.confidence,
            classifications,
        }
    }

    /// Encode a classification result to a JSON string
    pub fn encode_to_json(&self, result: &ClassificationResult) -> Result<String, AnalysisError> {
        serde_json::to_string(&self.encode(result)).map_err(AnalysisError::JsonError)
    }

    /// Wrap a response into a record keyed by user and (optionally) session
    pub fn build_record(
        &self,
        user_id: &str,
        session_id: Option<&str>,
        samples: &[PointerSample],
        result: &ClassificationResult,
    ) -> Result<AnalysisRecord, AnalysisError> {
        if user_id.trim().is_empty() {
            return Err(AnalysisError::EncodingError(
                "record requires a non-empty user_id".to_string(),
            ));
        }

        Ok(AnalysisRecord {
            record_id: Uuid::new_v4().to_string(),
            user_id: user_id.to_string(),
            session_id: session_id.map(str::to_string),
            recorded_at: Utc::now().to_rfc3339(),
            producer: RecordProducer {
                name: PRODUCER_NAME.to_string(),
                version: VERSION.to_string(),
            },
            sample_count: samples.len(),
            samples: samples.to_vec(),
            result: self.encode(result),
        })
    }
}
