//! Feature Layout - Centralized Feature Definition
//!
//! **CRITICAL: This file controls the feature schema**
//!
//! ## Rules (NEVER break these):
//! 1. Add feature → increment FEATURE_VERSION
//! 2. Change order → increment FEATURE_VERSION
//! 3. Remove feature → increment FEATURE_VERSION
//!
//! Trained artifacts record the layout version and hash; a mismatch at load
//! time rejects the artifact instead of silently misaligning columns.

use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

// ============================================================================
// FEATURE VERSION
// ============================================================================

/// Current feature layout version
/// MUST be incremented when layout changes
pub const FEATURE_VERSION: u8 = 1;

// ============================================================================
// FEATURE LAYOUT (Authoritative source)
// ============================================================================

/// Feature names in exact order they appear in the vector
/// This is the SINGLE SOURCE OF TRUTH for feature layout
pub const FEATURE_LAYOUT: &[&str] = &[
    "size",           // 0: File size in bytes
    "entropy",        // 1: Shannon entropy of the file body
    "num_sections",   // 2: Number of PE sections
    "imports_count",  // 3: Imported function count
    "has_debug",      // 4: Debug directory present (0/1)
    "has_resources",  // 5: Resource section present (0/1)
];

/// Total number of features
/// IMPORTANT: Must match FEATURE_LAYOUT.len()!
pub const FEATURE_COUNT: usize = 6;

/// How a feature value renders on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureKind {
    /// Serializes as a JSON integer
    Integral,
    /// Serializes as a JSON float
    Fractional,
}

/// Rendering kind per feature, in layout order
pub const FEATURE_KINDS: [FeatureKind; FEATURE_COUNT] = [
    FeatureKind::Integral,   // size
    FeatureKind::Fractional, // entropy
    FeatureKind::Integral,   // num_sections
    FeatureKind::Integral,   // imports_count
    FeatureKind::Integral,   // has_debug
    FeatureKind::Integral,   // has_resources
];

// ============================================================================
// LAYOUT HASH
// ============================================================================

/// Compute CRC32 hash of the feature layout
/// Used to detect layout mismatches when loading artifacts or datasets
pub fn compute_layout_hash() -> u32 {
    let mut hasher = Hasher::new();

    // Include version in hash
    hasher.update(&[FEATURE_VERSION]);

    // Hash all feature names in order
    for name in FEATURE_LAYOUT {
        hasher.update(name.as_bytes());
        hasher.update(&[0]); // Separator
    }

    hasher.finalize()
}

/// Get layout hash (inputs are const, so this is stable across calls)
pub fn layout_hash() -> u32 {
    compute_layout_hash()
}

// ============================================================================
// LAYOUT VALIDATION
// ============================================================================

/// Error when feature layout doesn't match expected
#[derive(Debug, Clone)]
pub struct LayoutMismatchError {
    pub expected_version: u8,
    pub expected_hash: u32,
    pub actual_version: u8,
    pub actual_hash: u32,
}

impl std::fmt::Display for LayoutMismatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Feature layout mismatch: expected v{} (hash: {:08x}), got v{} (hash: {:08x})",
            self.expected_version,
            self.expected_hash,
            self.actual_version,
            self.actual_hash
        )
    }
}

impl std::error::Error for LayoutMismatchError {}

/// Validate that incoming data matches current layout
pub fn validate_layout(incoming_version: u8, incoming_hash: u32) -> Result<(), LayoutMismatchError> {
    let current_hash = layout_hash();

    if incoming_version != FEATURE_VERSION || incoming_hash != current_hash {
        return Err(LayoutMismatchError {
            expected_version: FEATURE_VERSION,
            expected_hash: current_hash,
            actual_version: incoming_version,
            actual_hash: incoming_hash,
        });
    }

    Ok(())
}

// ============================================================================
// FEATURE INDEX LOOKUP
// ============================================================================

/// Get feature index by name (O(n) but features are few)
pub fn feature_index(name: &str) -> Option<usize> {
    FEATURE_LAYOUT.iter().position(|&n| n == name)
}

/// Get feature name by index
pub fn feature_name(index: usize) -> Option<&'static str> {
    FEATURE_LAYOUT.get(index).copied()
}

// ============================================================================
// LAYOUT INFO
// ============================================================================

/// Complete layout information for serialization/logging
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LayoutInfo {
    pub version: u8,
    pub hash: u32,
    pub feature_count: usize,
    pub feature_names: Vec<String>,
}

impl LayoutInfo {
    pub fn current() -> Self {
        Self {
            version: FEATURE_VERSION,
            hash: layout_hash(),
            feature_count: FEATURE_COUNT,
            feature_names: FEATURE_LAYOUT.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for LayoutInfo {
    fn default() -> Self {
        Self::current()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_count() {
        assert_eq!(FEATURE_COUNT, 6);
        assert_eq!(FEATURE_LAYOUT.len(), FEATURE_COUNT);
        assert_eq!(FEATURE_KINDS.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_layout_hash_consistency() {
        // Hash should be consistent across calls
        let hash1 = compute_layout_hash();
        let hash2 = compute_layout_hash();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_layout_hash_non_zero() {
        let hash = layout_hash();
        assert_ne!(hash, 0);
    }

    #[test]
    fn test_validate_layout_success() {
        let result = validate_layout(FEATURE_VERSION, layout_hash());
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_layout_version_mismatch() {
        let result = validate_layout(FEATURE_VERSION + 1, layout_hash());
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_layout_hash_mismatch() {
        let result = validate_layout(FEATURE_VERSION, layout_hash() + 1);
        assert!(result.is_err());
    }

    #[test]
    fn test_feature_index() {
        assert_eq!(feature_index("size"), Some(0));
        assert_eq!(feature_index("entropy"), Some(1));
        assert_eq!(feature_index("has_resources"), Some(5));
        assert_eq!(feature_index("nonexistent"), None);
    }

    #[test]
    fn test_feature_name() {
        assert_eq!(feature_name(0), Some("size"));
        assert_eq!(feature_name(5), Some("has_resources"));
        assert_eq!(feature_name(100), None);
    }

    #[test]
    fn test_entropy_is_the_only_fractional_feature() {
        for (i, kind) in FEATURE_KINDS.iter().enumerate() {
            if FEATURE_LAYOUT[i] == "entropy" {
                assert_eq!(*kind, FeatureKind::Fractional);
            } else {
                assert_eq!(*kind, FeatureKind::Integral);
            }
        }
    }

    #[test]
    fn test_layout_info() {
        let info = LayoutInfo::current();
        assert_eq!(info.version, FEATURE_VERSION);
        assert_eq!(info.feature_count, FEATURE_COUNT);
        assert_eq!(info.feature_names.len(), FEATURE_COUNT);
    }
}
