//! Model Module - Classifiers & Artifact Persistence
//!
//! Scaler, label encoder, and random forest, plus the JSON artifact blobs
//! they persist to. Every component validates itself at load time so a
//! corrupt or stale artifact set falls back to the mock backend instead of
//! misclassifying quietly.

pub mod artifacts;
pub mod forest;
pub mod labels;
pub mod scaler;
pub mod tree;

// Re-export common types
pub use artifacts::{ArtifactError, FeatureColumns, ModelArtifacts};
pub use forest::{ForestParams, RandomForest};
pub use labels::LabelEncoder;
pub use scaler::StandardScaler;
