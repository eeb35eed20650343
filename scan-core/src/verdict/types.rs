//! Verdict wire types
//!
//! These serialize straight into the scan response body, so field names and
//! casing here are the API contract.

use serde::Serialize;

use crate::family::SimulationStep;

// ============================================================================
// THREAT LEVEL
// ============================================================================

/// Coarse severity bucket derived from classifier confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ThreatLevel {
    High,
    Medium,
    Low,
}

impl ThreatLevel {
    /// HIGH above 0.8, MEDIUM above 0.5, LOW otherwise
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence > 0.8 {
            ThreatLevel::High
        } else if confidence > 0.5 {
            ThreatLevel::Medium
        } else {
            ThreatLevel::Low
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ThreatLevel::High => "HIGH",
            ThreatLevel::Medium => "MEDIUM",
            ThreatLevel::Low => "LOW",
        }
    }
}

// ============================================================================
// INDICATORS
// ============================================================================

/// The `value` field is heterogeneous on the wire: a number for threshold
/// rules, a short string for presence rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum IndicatorValue {
    Int(i64),
    Float(f64),
    Text(&'static str),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IndicatorVerdict {
    Suspicious,
    Normal,
}

/// One named observation surfaced to the caller
#[derive(Debug, Clone, Serialize)]
pub struct Indicator {
    pub name: &'static str,
    pub value: IndicatorValue,
    pub verdict: IndicatorVerdict,
    pub description: &'static str,
}

// ============================================================================
// SCAN VERDICT
// ============================================================================

/// Complete scan response for one sample.
///
/// Benign verdicts still carry the family fields: family "benign", an empty
/// impact list, and an empty simulation timeline.
#[derive(Debug, Clone, Serialize)]
pub struct ScanVerdict {
    pub is_malware: bool,
    pub confidence: f64,
    pub threat_level: ThreatLevel,
    pub features: serde_json::Value,
    pub indicators: Vec<Indicator>,
    pub family: String,
    pub family_description: &'static str,
    pub impact: &'static [&'static str],
    pub simulation_steps: &'static [SimulationStep],
}

// ============================================================================
// TESTS
// ============================================================================
