//! Scan handlers
//!
//! Both endpoints run the same pipeline: synthesize features, classify with
//! the process-wide backend, assemble the verdict. Uploaded files are
//! parked under a random name for the duration of extraction and removed
//! before the response goes out.

use std::sync::atomic::Ordering;

use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Deserialize;
use sha2::{Digest, Sha256};
use uuid::Uuid;

use cortexshield_core::backend::Classification;
use cortexshield_core::features::{synthesize_features, FeatureVector};
use cortexshield_core::{build_verdict, ScanVerdict};

use crate::{AppError, AppResult, AppState};

/// Scan an uploaded file
pub async fn scan_file(
    State(state): State<AppState>,
    multipart: Option<Multipart>,
) -> AppResult<Json<ScanVerdict>> {
    let Some(mut multipart) = multipart else {
        return Err(AppError::BadRequest("No file provided"));
    };

    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|_| AppError::BadRequest("No file provided"))?
    {
        if field.name() != Some("file") {
            continue;
        }
        // Form values without a filename are not uploads
        let Some(file_name) = field.file_name().map(str::to_string) else {
            continue;
        };
        let data = field
            .bytes()
            .await
            .map_err(|_| AppError::BadRequest("No file provided"))?;
        upload = Some((file_name, data));
        break;
    }

    let Some((file_name, data)) = upload else {
        return Err(AppError::BadRequest("No file provided"));
    };
    if file_name.is_empty() {
        return Err(AppError::BadRequest("Empty filename"));
    }

    // Park the upload under a random name while features are extracted
    let temp_path = state
        .config
        .upload_dir
        .join(format!("{}.exe", Uuid::new_v4()));
    tokio::fs::write(&temp_path, &data)
        .await
        .map_err(|e| AppError::Internal(format!("saving upload: {}", e)))?;

    let digest = hex::encode(Sha256::digest(&data));
    tracing::info!(
        size = data.len(),
        sha256 = %digest,
        "📄 Scanning uploaded file {}",
        file_name
    );

    let features = synthesize_features();

    tokio::fs::remove_file(&temp_path)
        .await
        .map_err(|e| AppError::Internal(format!("removing upload: {}", e)))?;

    Ok(Json(classify_and_report(&state, &features)))
}

#[derive(Debug, Deserialize)]
pub struct ScanUrlRequest {
    pub url: Option<String>,
}

/// Scan a URL
pub async fn scan_url(
    State(state): State<AppState>,
    payload: Option<Json<ScanUrlRequest>>,
) -> AppResult<Json<ScanVerdict>> {
    let url = payload
        .and_then(|Json(request)| request.url)
        .filter(|url| !url.is_empty())
        .ok_or(AppError::BadRequest("No URL provided"))?;

    tracing::info!("🔗 Scanning URL {}", url);

    let features = synthesize_features();
    Ok(Json(classify_and_report(&state, &features)))
}

fn classify_and_report(state: &AppState, features: &FeatureVector) -> ScanVerdict {
    let classification = state.backend.classify(features);
    state.scan_count.fetch_add(1, Ordering::Relaxed);

    match &classification {
        Classification::Benign { confidence } => {
            tracing::info!("✅ Verdict: benign ({:.2})", confidence);
        }
        Classification::Malware { confidence, family } => {
            tracing::warn!("🚨 Verdict: {} ({:.2})", family, confidence);
        }
    }

    build_verdict(features, &classification)
}
