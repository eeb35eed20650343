//! Indicator rule table
//!
//! Each rule inspects one feature and fires when it crosses the suspicious
//! threshold, returning the value to surface in the response. Rules are
//! evaluated in table order and the order is part of the response contract.

use crate::features::FeatureVector;

use super::types::IndicatorValue;

pub struct IndicatorRule {
    pub name: &'static str,
    pub description: &'static str,
    /// Some(value) when the rule fires
    pub check: fn(&FeatureVector) -> Option<IndicatorValue>,
}

pub const INDICATOR_RULES: [IndicatorRule; 4] = [
    IndicatorRule {
        name: "High Entropy",
        description: "File appears compressed or encrypted",
        check: |f| (f.entropy() > 7.0).then(|| IndicatorValue::Float(f.entropy())),
    },
    IndicatorRule {
        name: "Many Imports",
        description: "Unusually high number of function calls",
        check: |f| (f.imports_count() > 100.0).then(|| IndicatorValue::Int(f.imports_count() as i64)),
    },
    IndicatorRule {
        name: "No Debug Info",
        description: "Debug symbols removed - common in malware",
        check: |f| (f.has_debug() == 0.0).then(|| IndicatorValue::Text("missing")),
    },
    IndicatorRule {
        name: "Many Sections",
        description: "Unusual number of PE sections",
        check: |f| (f.num_sections() > 8.0).then(|| IndicatorValue::Int(f.num_sections() as i64)),
    },
];

/// Emitted when nothing in the table fires
pub const NORMAL_INDICATOR_NAME: &str = "File Statistics";
pub const NORMAL_INDICATOR_VALUE: &str = "Normal";
pub const NORMAL_INDICATOR_DESCRIPTION: &str = "No suspicious patterns detected";

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::FeatureVectorBuilder;

    fn quiet_features() -> FeatureVector {
        FeatureVectorBuilder::new()
            .size(50_000.0)
            .entropy(5.0)
            .num_sections(4.0)
            .imports_count(40.0)
            .has_debug(1.0)
            .has_resources(1.0)
            .build()
    }

    #[test]
    fn test_no_rule_fires_on_quiet_features() {
        let features = quiet_features();
        for rule in &INDICATOR_RULES {
            assert!((rule.check)(&features).is_none(), "{} fired", rule.name);
        }
    }

    #[test]
    fn test_entropy_threshold_is_strict() {
        let at = FeatureVectorBuilder::new().entropy(7.0).has_debug(1.0).build();
        let above = FeatureVectorBuilder::new().entropy(7.01).has_debug(1.0).build();

        let entropy_rule = &INDICATOR_RULES[0];
        assert!((entropy_rule.check)(&at).is_none());
        assert_eq!(
            (entropy_rule.check)(&above),
            Some(IndicatorValue::Float(7.01))
        );
    }

    #[test]
    fn test_imports_threshold_is_strict() {
        let at = FeatureVectorBuilder::new().imports_count(100.0).has_debug(1.0).build();
        let above = FeatureVectorBuilder::new().imports_count(101.0).has_debug(1.0).build();

        let imports_rule = &INDICATOR_RULES[1];
        assert!((imports_rule.check)(&at).is_none());
        assert_eq!((imports_rule.check)(&above), Some(IndicatorValue::Int(101)));
    }

    #[test]
    fn test_missing_debug_info_fires() {
        let stripped = FeatureVectorBuilder::new().entropy(5.0).has_debug(0.0).build();

        let debug_rule = &INDICATOR_RULES[2];
        assert_eq!(
            (debug_rule.check)(&stripped),
            Some(IndicatorValue::Text("missing"))
        );
    }

    #[test]
    fn test_section_count_fires_above_eight() {
        let packed = FeatureVectorBuilder::new().num_sections(9.0).has_debug(1.0).build();

        let sections_rule = &INDICATOR_RULES[3];
        assert_eq!((sections_rule.check)(&packed), Some(IndicatorValue::Int(9)));
    }
}
