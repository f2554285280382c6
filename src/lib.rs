//! Attention Trace - Pointer-movement feature extraction and attention screening
//!
//! Attention Trace turns a captured pointer trace (timestamped `x`/`y` samples)
//! into a coarse behavioral label with a bounded confidence through a
//! deterministic pipeline: sample validation → feature derivation (velocity,
//! acceleration, turning angles) → rule-based classification → encoding.
//!
//! Every stage is pure and synchronous; analyzers can be shared between
//! threads without locking.

pub mod adapter;
pub mod classifier;
pub mod config;
pub mod encoder;
pub mod error;
pub mod features;
pub mod indicators;
pub mod pipeline;
pub mod report;
pub mod types;

// FFI bindings for C interop (always available for cdylib/staticlib builds)
pub mod ffi;

pub use adapter::SampleAdapter;
pub use classifier::{classify, TrajectoryClassifier, MIN_SAMPLES};
pub use config::{AnalysisConfig, ClassifierRules, IndicatorThresholds};
pub use error::AnalysisError;
pub use pipeline::{analyze_json, TraceAnalyzer};
pub use types::{
    AnalysisRecord, AnalysisResponse, ClassificationLabel, ClassificationResult, PointerSample,
    TrajectoryAnalysis, TrajectoryStatistics,
};

/// Crate version stamped on persistence records
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Producer name stamped on persistence records
pub const PRODUCER_NAME: &str = "attention-trace";
