//! Pointer trace adapter
//!
//! Parses captured pointer traces (JSON array or NDJSON) into `PointerSample`s
//! and rejects malformed samples at the boundary, before any analysis runs.

use crate::error::AnalysisError;
use crate::types::PointerSample;
use serde_json::Value;
use tracing::warn;

/// Adapter for converting raw trace payloads into validated samples
pub struct SampleAdapter;

impl SampleAdapter {
    /// Parse a JSON array of `{time, x, y}` objects
    pub fn parse_array(json: &str) -> Result<Vec<PointerSample>, AnalysisError> {
        let value: Value = serde_json::from_str(json)?;
        let items = match value {
            Value::Array(items) => items,
            other => {
                return Err(AnalysisError::ParseError(format!(
                    "expected a JSON array of samples, got {}",
                    json_kind(&other)
                )))
            }
        };

        items
            .into_iter()
            .enumerate()
            .map(|(index, item)| sample_from_value(index, item))
            .collect()
    }

    /// Parse NDJSON (one sample object per line); blank lines are ignored
    pub fn parse_ndjson(ndjson: &str) -> Result<Vec<PointerSample>, AnalysisError> {
        let mut samples = Vec::new();
        for (line_num, line) in ndjson.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                continue;
            }
            let value: Value = serde_json::from_str(trimmed).map_err(|e| {
                AnalysisError::ParseError(format!("Failed to parse line {}: {}", line_num + 1, e))
            })?;
            samples.push(sample_from_value(samples.len(), value)?);
        }
        Ok(samples)
    }

    /// Validate a trace, failing on the first malformed sample
    pub fn validate(samples: &[PointerSample]) -> Result<(), AnalysisError> {
        match Self::validate_samples(samples).into_iter().next() {
            Some(issue) => {
                warn!(index = issue.index, reason = %issue.reason, "rejecting pointer trace");
                Err(AnalysisError::invalid_input(issue.index, issue.reason))
            }
            None => Ok(()),
        }
    }

    /// Collect every validation issue in a trace
    pub fn validate_samples(samples: &[PointerSample]) -> Vec<SampleIssue> {
        let mut issues = Vec::new();
        let mut last_time: Option<f64> = None;

        for (index, sample) in samples.iter().enumerate() {
            if let Some(reason) = non_finite_field(sample) {
                issues.push(SampleIssue { index, reason });
                continue;
            }
            if let Some(prev) = last_time {
                if sample.time < prev {
                    issues.push(SampleIssue {
                        index,
                        reason: format!(
                            "time {} precedes previous sample time {}",
                            sample.time, prev
                        ),
                    });
                    continue;
                }
            }
            last_time = Some(sample.time);
        }

        issues
    }

    /// Parse a JSON array and validate it in one step
    pub fn parse_samples(json: &str) -> Result<Vec<PointerSample>, AnalysisError> {
        let samples = Self::parse_array(json)?;
        Self::validate(&samples)?;
        Ok(samples)
    }
}

/// A malformed sample found during validation
#[derive(Debug, Clone, PartialEq)]
pub struct SampleIssue {
    pub index: usize,
    pub reason: String,
}

fn sample_from_value(index: usize, value: Value) -> Result<PointerSample, AnalysisError> {
    if !value.is_object() {
        return Err(AnalysisError::invalid_input(
            index,
            format!("expected an object, got {}", json_kind(&value)),
        ));
    }
    serde_json::from_value(value).map_err(|e| AnalysisError::invalid_input(index, e.to_string()))
}

fn non_finite_field(sample: &PointerSample) -> Option<String> {
    [("time", sample.time), ("x", sample.x), ("y", sample.y)]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, v)| format!("{name} must be finite, got {v}"))
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
