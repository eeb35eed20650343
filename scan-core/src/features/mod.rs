//! Features Module - Feature Layout & Synthesis
//!
//! Owns the versioned feature schema and the synthetic extraction that
//! stands in for real PE parsing in this demo.

pub mod layout;
pub mod synth;
pub mod vector;

// Re-export common types
pub use layout::{
    layout_hash, validate_layout, LayoutMismatchError, FEATURE_COUNT, FEATURE_LAYOUT,
    FEATURE_VERSION,
};
pub use synth::{synthesize_features, synthesize_with};
pub use vector::{FeatureVector, FeatureVectorBuilder};
