//! Verdict assembly
//!
//! Turns a backend classification plus the extracted features into the full
//! response payload: threat level, indicator list, and family details.

pub mod indicators;
pub mod rules;
pub mod types;

pub use indicators::evaluate;
pub use types::{Indicator, IndicatorValue, IndicatorVerdict, ScanVerdict, ThreatLevel};

use crate::backend::Classification;
use crate::family::{family_profile, BENIGN_LABEL};
use crate::features::FeatureVector;

/// Description reported when the classifier names a family the table
/// does not know
const UNKNOWN_FAMILY_DESCRIPTION: &str = "Unknown malware";

const BENIGN_DESCRIPTION: &str = "No malware detected";

/// Assemble the response for one classified sample
pub fn build_verdict(features: &FeatureVector, classification: &Classification) -> ScanVerdict {
    let confidence = classification.confidence();
    let threat_level = ThreatLevel::from_confidence(confidence);
    let indicators = evaluate(features);

    match classification {
        Classification::Benign { .. } => ScanVerdict {
            is_malware: false,
            confidence,
            threat_level,
            features: features.to_json(),
            indicators,
            family: BENIGN_LABEL.to_string(),
            family_description: BENIGN_DESCRIPTION,
            impact: &[],
            simulation_steps: &[],
        },
        Classification::Malware { family, .. } => {
            let profile = family_profile(family);
            ScanVerdict {
                is_malware: true,
                confidence,
                threat_level,
                features: features.to_json(),
                indicators,
                family: family.clone(),
                family_description: profile
                    .map(|p| p.description)
                    .unwrap_or(UNKNOWN_FAMILY_DESCRIPTION),
                impact: profile.map(|p| p.impact).unwrap_or(&[]),
                simulation_steps: profile.map(|p| p.simulation).unwrap_or(&[]),
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
