//! Synthetic Feature Extraction
//!
//! Stands in for real PE parsing: every scan draws a plausible feature
//! vector from fixed ranges instead of reading the binary. The same ranges
//! feed the dataset generator so trained models see the distribution the
//! request path produces.

use rand::Rng;

use super::vector::{FeatureVector, FeatureVectorBuilder};

/// Synthesize a feature vector with the process-wide RNG
pub fn synthesize_features() -> FeatureVector {
    synthesize_with(&mut rand::thread_rng())
}

/// Synthesize a feature vector from a caller-provided RNG
///
/// Used by the dataset generator with a seeded RNG for reproducible output.
pub fn synthesize_with<R: Rng>(rng: &mut R) -> FeatureVector {
    FeatureVectorBuilder::new()
        .size(rng.gen_range(10_000..=500_000) as f64)
        .entropy(round2(rng.gen_range(4.0..8.0)))
        .num_sections(rng.gen_range(3..=10) as f64)
        .imports_count(rng.gen_range(10..=200) as f64)
        .has_debug(if rng.gen_bool(0.5) { 1.0 } else { 0.0 })
        .has_resources(if rng.gen_bool(0.5) { 1.0 } else { 0.0 })
        .build()
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
