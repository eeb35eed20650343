//! Synthetic dataset generator
//!
//! Writes the labeled JSONL sample dataset the trainer consumes. Output is
//! deterministic for the default seed, so regenerating produces the same
//! file byte for byte.

use std::path::Path;

use anyhow::Context;
use log::info;

use cortexshield_core::constants;
use cortexshield_core::dataset::{generate, summarize, write_jsonl, GeneratorParams};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let params = GeneratorParams::default();
    let path = constants::dataset_path();

    info!(
        "📊 Generating {} samples for {} (seed {})",
        params.samples,
        constants::APP_NAME,
        params.seed
    );
    let records = generate(&params);
    write_jsonl(Path::new(&path), &records)
        .with_context(|| format!("writing dataset to {}", path))?;

    let summary = summarize(&records);
    info!("✅ Sample dataset created: {}", path);
    info!("   Total samples: {}", summary.total);
    info!("   Malware samples: {}", summary.malware);
    info!("   Benign samples: {}", summary.benign);
    info!("📊 Family distribution:");
    for (family, count) in &summary.families {
        info!("   {}: {}", family, count);
    }

    Ok(())
}
