//! Offline model training
//!
//! Reads the JSONL sample dataset, fits the scaler and both forests, and
//! writes the five artifact files the server loads at startup.

use std::path::Path;

use anyhow::Context;
use log::info;

use cortexshield_core::constants;
use cortexshield_core::dataset::read_jsonl;
use cortexshield_core::features::layout::LayoutInfo;
use cortexshield_core::model::ForestParams;
use cortexshield_core::trainer::train;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let dataset_path = constants::dataset_path();
    let model_dir = constants::model_dir();

    info!("📊 Loading dataset from {}", dataset_path);
    let records = read_jsonl(Path::new(&dataset_path))
        .with_context(|| format!("loading dataset from {}", dataset_path))?;
    info!("   {} records loaded", records.len());

    let layout = LayoutInfo::current();
    info!(
        "📊 Feature layout v{}: {} features (hash {:08x})",
        layout.version, layout.feature_count, layout.hash
    );

    let (artifacts, report) =
        train(&records, &ForestParams::default()).context("training failed")?;

    info!("   Binary accuracy: {:.2}", report.binary_accuracy);
    info!("   Family accuracy: {:.2}", report.family_accuracy);
    info!("   Families: {}", report.families.join(", "));

    info!("💾 Saving models...");
    artifacts
        .save(Path::new(&model_dir))
        .with_context(|| format!("saving artifacts to {}", model_dir))?;
    info!("✅ All models saved in '{}'", model_dir);

    Ok(())
}
