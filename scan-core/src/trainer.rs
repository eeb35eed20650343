//! Offline training
//!
//! Fits the full artifact set from a labeled dataset: scaler over every
//! row, the binary forest on scaled features against the malware label,
//! and the family forest on the scaled malware rows against the encoded
//! family. The label encoder is fit on the whole family column, so class
//! indices stay aligned between the two forests and the verdict path.

use log::info;
use ndarray::Array2;
use thiserror::Error;

use crate::dataset::SampleRecord;
use crate::features::FEATURE_COUNT;
use crate::model::{
    FeatureColumns, ForestParams, LabelEncoder, ModelArtifacts, RandomForest, StandardScaler,
};

#[derive(Debug, Error)]
pub enum TrainError {
    #[error("dataset has no records")]
    EmptyDataset,

    #[error("dataset has no malware records, cannot fit the family classifier")]
    NoMalwareRecords,

    #[error("family {0:?} missing from the label encoding")]
    UnknownFamily(String),
}

/// Training summary for operator logs
#[derive(Debug, Clone)]
pub struct TrainReport {
    pub samples: usize,
    pub malware_samples: usize,
    pub binary_accuracy: f64,
    pub family_accuracy: f64,
    pub families: Vec<String>,
}

/// Train the full artifact set
pub fn train(
    records: &[SampleRecord],
    params: &ForestParams,
) -> Result<(ModelArtifacts, TrainReport), TrainError> {
    if records.is_empty() {
        return Err(TrainError::EmptyDataset);
    }

    let mut x = Array2::zeros((records.len(), FEATURE_COUNT));
    for (mut row, record) in x.rows_mut().into_iter().zip(records) {
        for (slot, value) in row.iter_mut().zip(record.features.as_array()) {
            *slot = *value;
        }
    }
    let binary_y: Vec<usize> = records.iter().map(|r| r.label as usize).collect();

    let families: Vec<&str> = records.iter().map(|r| r.family.as_str()).collect();
    let label_encoder = LabelEncoder::fit(&families);

    let scaler = StandardScaler::fit(&x);
    let scaled = scaler.transform(&x);

    info!("Training binary classifier on {} samples", records.len());
    let binary_model = RandomForest::fit(&scaled, &binary_y, 2, params);
    let binary_accuracy = binary_model.accuracy(&scaled, &binary_y);

    // Family classifier sees only the malware rows, in full-encoder class
    // space so its predictions decode directly
    let malware_indices: Vec<usize> = records
        .iter()
        .enumerate()
        .filter(|(_, r)| r.is_malware())
        .map(|(i, _)| i)
        .collect();
    if malware_indices.is_empty() {
        return Err(TrainError::NoMalwareRecords);
    }

    let mut malware_x = Array2::zeros((malware_indices.len(), FEATURE_COUNT));
    let mut family_y = Vec::with_capacity(malware_indices.len());
    for (mut row, &index) in malware_x.rows_mut().into_iter().zip(&malware_indices) {
        row.assign(&scaled.row(index));
        let family = &records[index].family;
        let encoded = label_encoder
            .encode(family)
            .ok_or_else(|| TrainError::UnknownFamily(family.clone()))?;
        family_y.push(encoded);
    }

    info!(
        "Training family classifier on {} malware samples ({} classes)",
        malware_indices.len(),
        label_encoder.len()
    );
    let family_model = RandomForest::fit(&malware_x, &family_y, label_encoder.len(), params);
    let family_accuracy = family_model.accuracy(&malware_x, &family_y);

    let report = TrainReport {
        samples: records.len(),
        malware_samples: malware_indices.len(),
        binary_accuracy,
        family_accuracy,
        families: label_encoder.classes.clone(),
    };

    let artifacts = ModelArtifacts {
        scaler,
        binary_model,
        family_model,
        label_encoder,
        feature_columns: FeatureColumns::current(),
    };

    Ok((artifacts, report))
}

// ============================================================================
// TESTS
// ============================================================================
