//! Feature Vector - Core data structure for model input
//!
//! Uses the centralized layout from `layout.rs` so that named form fields
//! and positional CSV columns map to the same slots.

use serde::{Deserialize, Serialize};

use super::layout::{feature_index, FEATURE_COUNT, FEATURE_LAYOUT};
use crate::error::InputError;

// ============================================================================
// FEATURE VECTOR
// ============================================================================

/// Raw (unscaled) financial ratios for one company, in layout order.
///
/// Construction validates that every value is finite, so downstream code
/// can index by layout position without re-checking.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Create from raw values in layout order
    pub fn from_values(values: Vec<f64>) -> Result<Self, InputError> {
        if values.len() != FEATURE_COUNT {
            return Err(InputError::DimensionMismatch {
                expected: FEATURE_COUNT,
                found: values.len(),
            });
        }

        let mut array = [0.0f64; FEATURE_COUNT];
        for (i, value) in values.into_iter().enumerate() {
            if !value.is_finite() {
                return Err(InputError::NotFinite {
                    field: FEATURE_LAYOUT[i].to_string(),
                });
            }
            array[i] = value;
        }

        Ok(Self { values: array })
    }

    /// Create from named string fields (e.g. a submitted form).
    ///
    /// Field order does not matter; every layout name must appear exactly
    /// once and nothing else may appear.
    pub fn from_fields<I, K, V>(fields: I) -> Result<Self, InputError>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut slots: [Option<f64>; FEATURE_COUNT] = [None; FEATURE_COUNT];

        for (name, raw) in fields {
            let name = name.as_ref();
            let index = feature_index(name)
                .ok_or_else(|| InputError::UnknownField(name.to_string()))?;

            if slots[index].is_some() {
                return Err(InputError::DuplicateField(name.to_string()));
            }
            slots[index] = Some(parse_ratio(name, raw.as_ref())?);
        }

        let mut values = [0.0f64; FEATURE_COUNT];
        for (i, slot) in slots.iter().enumerate() {
            values[i] = slot.ok_or_else(|| InputError::MissingField(FEATURE_LAYOUT[i].to_string()))?;
        }

        Ok(Self { values })
    }

    pub fn as_array(&self) -> &[f64; FEATURE_COUNT] {
        &self.values
    }

    pub fn as_slice(&self) -> &[f64] {
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

    /// Named values for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        serde_json::Value::Object(
            FEATURE_LAYOUT
                .iter()
                .zip(self.values.iter())
                .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
                .collect(),
        )
    }
}

impl TryFrom<Vec<f64>> for FeatureVector {
    type Error = InputError;

    fn try_from(values: Vec<f64>) -> Result<Self, Self::Error> {
        Self::from_values(values)
    }
}

/// Parse one submitted ratio; surrounding whitespace is ignored
fn parse_ratio(field: &str, raw: &str) -> Result<f64, InputError> {
    let value: f64 = raw.trim().parse().map_err(|_| InputError::NotANumber {
        field: field.to_string(),
        value: raw.to_string(),
    })?;

    if !value.is_finite() {
        return Err(InputError::NotFinite {
            field: field.to_string(),
        });
    }

    Ok(value)
}
