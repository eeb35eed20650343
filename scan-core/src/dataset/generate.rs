use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::family::MALWARE_FAMILY_NAMES;
use crate::features::synthesize_with;

use super::record::SampleRecord;

#[derive(Debug, Clone)]
pub struct GeneratorParams {
    pub samples: usize,
    pub malware_ratio: f64,
    pub seed: u64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            samples: 1000,
            malware_ratio: 0.3,
            seed: 42,
        }
    }
}

/// Generate a synthetic labeled dataset.
///
/// Labels are drawn independently of the feature values, so the dataset is
/// only good for exercising the training pipeline, not for producing a
/// model that detects anything real.
pub fn generate(params: &GeneratorParams) -> Vec<SampleRecord> {
    let mut rng = StdRng::seed_from_u64(params.seed);

    (0..params.samples)
        .map(|_| {
            let features = synthesize_with(&mut rng);
            if rng.gen_bool(params.malware_ratio) {
                let family = MALWARE_FAMILY_NAMES
                    .choose(&mut rng)
                    .copied()
                    .unwrap_or("trojan");
                SampleRecord::malware(features, family)
            } else {
                SampleRecord::benign(features)
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSummary {
    pub total: usize,
    pub malware: usize,
    pub benign: usize,
    pub families: BTreeMap<String, usize>,
}

pub fn summarize(records: &[SampleRecord]) -> DatasetSummary {
    let mut families: BTreeMap<String, usize> = BTreeMap::new();
    let mut malware = 0;

    for record in records {
        *families.entry(record.family.clone()).or_insert(0) += 1;
        if record.is_malware() {
            malware += 1;
        }
    }

    DatasetSummary {
        total: records.len(),
        malware,
        benign: records.len() - malware,
        families,
    }
}
