//! Central Configuration Constants
//!
//! Single source of truth for default paths shared by the training bins and
//! the web server.

/// Default directory for trained model artifacts
pub const DEFAULT_MODEL_DIR: &str = "models";

/// Default path for the generated sample dataset
pub const DEFAULT_DATASET_PATH: &str = "data/samples.jsonl";

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "CortexShield";

// ============================================
// Helper functions to read from env with fallback
// ============================================

/// Get the model artifact directory from environment or use default
pub fn model_dir() -> String {
    std::env::var("CORTEX_MODEL_DIR").unwrap_or_else(|_| DEFAULT_MODEL_DIR.to_string())
}

/// Get the dataset path from environment or use default
pub fn dataset_path() -> String {
    std::env::var("CORTEX_DATASET_PATH").unwrap_or_else(|_| DEFAULT_DATASET_PATH.to_string())
}
