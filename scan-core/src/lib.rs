//! CortexShield Detection Core
//!
//! Feature layout, trained-model artifacts, inference backends, and verdict
//! assembly for the CortexShield demo scanner.
//!
//! ## Structure
//! - `features/` - Versioned feature layout and synthetic extraction
//! - `model/` - Scaler, label encoder, random forest, artifact persistence
//! - `backend` - Inference backends (trained model / mock)
//! - `verdict/` - Threat levels, indicators, verdict assembly
//! - `family/` - Static malware family tables
//! - `dataset/` - Sample generation and JSONL I/O
//! - `trainer` - Offline training pipeline

pub mod backend;
pub mod constants;
pub mod dataset;
pub mod family;
pub mod features;
pub mod model;
pub mod trainer;
pub mod verdict;

// Re-export the request-path surface
pub use backend::{Classification, InferenceBackend, MockBackend, ModelBackend};
pub use features::{FeatureVector, FEATURE_COUNT};
pub use verdict::{build_verdict, ScanVerdict, ThreatLevel};
