//! Feature Vector - Core data structure for ML input
//!
//! Versioned vector with layout validation. Uses the centralized layout from
//! `layout.rs` for consistent ordering and compatibility checks.

use serde::{Deserialize, Serialize};

use super::layout::{
    feature_index, layout_hash, validate_layout, FeatureKind, LayoutMismatchError, FEATURE_COUNT,
    FEATURE_KINDS, FEATURE_LAYOUT, FEATURE_VERSION,
};

// ============================================================================
// VERSIONED FEATURE VECTOR
// ============================================================================

/// Versioned feature vector with layout metadata
///
/// All feature data flows through this struct; never pass raw `Vec<f64>`
/// between modules.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    /// Feature layout version
    pub version: u8,
    /// CRC32 hash of the feature layout (for mismatch detection)
    pub layout_hash: u32,
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create a new zeroed feature vector with current version
    pub fn new() -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values: [0.0; FEATURE_COUNT],
        }
    }

    /// Create from raw values with current version
    pub fn from_values(values: [f64; FEATURE_COUNT]) -> Self {
        Self {
            version: FEATURE_VERSION,
            layout_hash: layout_hash(),
            values,
        }
    }

    /// Get values as array reference
    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Get feature by name
    pub fn get_by_name(&self, name: &str) -> Option<f64> {
        feature_index(name).and_then(|i| self.get(i))
    }

    /// Set feature by name
    pub fn set_by_name(&mut self, name: &str, value: f64) -> bool {
        if let Some(index) = feature_index(name) {
            self.values[index] = value;
            true
        } else {
            false
        }
    }

    /// Validate that this vector is compatible with current layout
    pub fn validate(&self) -> Result<(), LayoutMismatchError> {
        validate_layout(self.version, self.layout_hash)
    }

    // ------------------------------------------------------------------
    // Typed accessors (layout order)
    // ------------------------------------------------------------------

    pub fn size(&self) -> f64 {
        self.values[0]
    }

    pub fn entropy(&self) -> f64 {
        self.values[1]
    }

    pub fn num_sections(&self) -> f64 {
        self.values[2]
    }

    pub fn imports_count(&self) -> f64 {
        self.values[3]
    }

    pub fn has_debug(&self) -> f64 {
        self.values[4]
    }

    pub fn has_resources(&self) -> f64 {
        self.values[5]
    }

    /// Render as the response-facing JSON object
    ///
    /// Integral features serialize as JSON integers, fractional as floats,
    /// matching the shape the front-end expects.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        for (i, name) in FEATURE_LAYOUT.iter().enumerate() {
            let value = match FEATURE_KINDS[i] {
                FeatureKind::Integral => serde_json::Value::from(self.values[i] as i64),
                FeatureKind::Fractional => serde_json::Value::from(self.values[i]),
            };
            map.insert(name.to_string(), value);
        }
        serde_json::Value::Object(map)
    }
}

impl Default for FeatureVector {
    fn default() -> Self {
        Self::new()
    }
}

impl From<[f64; FEATURE_COUNT]> for FeatureVector {
    fn from(values: [f64; FEATURE_COUNT]) -> Self {
        Self::from_values(values)
    }
}

// ============================================================================
// BUILDER PATTERN
// ============================================================================

/// Builder for creating FeatureVector with named setters
pub struct FeatureVectorBuilder {
    vector: FeatureVector,
}

impl FeatureVectorBuilder {
    pub fn new() -> Self {
        Self {
            vector: FeatureVector::new(),
        }
    }

    pub fn size(mut self, value: f64) -> Self {
        self.vector.set_by_name("size", value);
        self
    }

    pub fn entropy(mut self, value: f64) -> Self {
        self.vector.set_by_name("entropy", value);
        self
    }

    pub fn num_sections(mut self, value: f64) -> Self {
        self.vector.set_by_name("num_sections", value);
        self
    }

    pub fn imports_count(mut self, value: f64) -> Self {
        self.vector.set_by_name("imports_count", value);
        self
    }

    pub fn has_debug(mut self, value: f64) -> Self {
        self.vector.set_by_name("has_debug", value);
        self
    }

    pub fn has_resources(mut self, value: f64) -> Self {
        self.vector.set_by_name("has_resources", value);
        self
    }

    pub fn build(self) -> FeatureVector {
        self.vector
    }
}

impl Default for FeatureVectorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feature_vector_new() {
        let vector = FeatureVector::new();
        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.layout_hash, layout_hash());
        assert_eq!(vector.values.len(), FEATURE_COUNT);
    }

    #[test]
    fn test_feature_vector_builder() {
        let vector = FeatureVectorBuilder::new()
            .size(120_000.0)
            .entropy(7.42)
            .num_sections(5.0)
            .build();

        assert_eq!(vector.size(), 120_000.0);
        assert_eq!(vector.entropy(), 7.42);
        assert_eq!(vector.num_sections(), 5.0);
        assert_eq!(vector.imports_count(), 0.0);
    }

    #[test]
    fn test_feature_vector_set_by_name() {
        let mut vector = FeatureVector::new();
        assert!(vector.set_by_name("imports_count", 42.0));
        assert_eq!(vector.get_by_name("imports_count"), Some(42.0));

        assert!(!vector.set_by_name("nonexistent", 0.0));
    }

    #[test]
    fn test_feature_vector_validation() {
        let vector = FeatureVector::new();
        assert!(vector.validate().is_ok());

        let stale = FeatureVector {
            version: FEATURE_VERSION + 1,
            ..FeatureVector::new()
        };
        assert!(stale.validate().is_err());
    }

    #[test]
    fn test_feature_vector_from_array() {
        let array = [1.0; FEATURE_COUNT];
        let vector: FeatureVector = array.into();

        assert_eq!(vector.version, FEATURE_VERSION);
        assert_eq!(vector.values, array);
    }

    #[test]
    fn test_to_json_renders_integers_and_floats() {
        let vector = FeatureVectorBuilder::new()
            .size(250_000.0)
            .entropy(6.91)
            .num_sections(7.0)
            .imports_count(150.0)
            .has_debug(1.0)
            .has_resources(0.0)
            .build();

        let json = vector.to_json();
        assert_eq!(json["size"], serde_json::json!(250_000));
        assert_eq!(json["entropy"], serde_json::json!(6.91));
        assert_eq!(json["num_sections"], serde_json::json!(7));
        assert_eq!(json["has_debug"], serde_json::json!(1));

        // Integral features must not serialize with a decimal point
        assert!(json["size"].is_i64());
        assert!(json["entropy"].is_f64());
    }
}
