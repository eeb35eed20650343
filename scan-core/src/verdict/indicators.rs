//! Indicator evaluation
//!
//! Runs the rule table over a feature vector. At least one indicator always
//! comes back: when nothing fires, a single "File Statistics" entry marks
//! the sample as unremarkable.

use crate::features::FeatureVector;

use super::rules::{
    INDICATOR_RULES, NORMAL_INDICATOR_DESCRIPTION, NORMAL_INDICATOR_NAME, NORMAL_INDICATOR_VALUE,
};
use super::types::{Indicator, IndicatorValue, IndicatorVerdict};

pub fn evaluate(features: &FeatureVector) -> Vec<Indicator> {
    let mut indicators: Vec<Indicator> = INDICATOR_RULES
        .iter()
        .filter_map(|rule| {
            (rule.check)(features).map(|value| Indicator {
                name: rule.name,
                value,
                verdict: IndicatorVerdict::Suspicious,
                description: rule.description,
            })
        })
        .collect();

    if indicators.is_empty() {
        indicators.push(Indicator {
            name: NORMAL_INDICATOR_NAME,
            value: IndicatorValue::Text(NORMAL_INDICATOR_VALUE),
            verdict: IndicatorVerdict::Normal,
            description: NORMAL_INDICATOR_DESCRIPTION,
        });
    }

    indicators
}

// ============================================================================
// TESTS
// ============================================================================
