//! Input features and the boundary validation.

use std::fmt;

use serde::Serialize;
use serde_json::{Map, Value};

pub const N_FEATURES: usize = 8;

/// Canonical feature order.
///
/// The artifact's coefficients are positional and must follow this exact
/// order — there is no embedded schema tying a coefficient to a name.
pub const FEATURE_NAMES: [&str; N_FEATURES] = [
    "MedInc",
    "HouseAge",
    "AveRooms",
    "AveBedrms",
    "Population",
    "AveOccup",
    "Latitude",
    "Longitude",
];

/// A validated input vector, values in the canonical feature order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector([f64; N_FEATURES]);

impl FeatureVector {
    #[must_use]
    pub const fn new(values: [f64; N_FEATURES]) -> Self {
        Self(values)
    }

    /// Validates the decoded request payload.
    ///
    /// Every canonical field must be present and a finite number, unknown
    /// extra fields are ignored, and the field names are case-sensitive.
    /// All offending fields are collected before failing, so the client
    /// gets the complete list in one go.
    pub fn from_json(object: &Map<String, Value>) -> Result<Self, ValidationError> {
        let mut values = [0.0; N_FEATURES];
        let mut error = ValidationError::default();
        for (index, name) in FEATURE_NAMES.into_iter().enumerate() {
            match object.get(name).and_then(Value::as_f64) {
                Some(value) if value.is_finite() => values[index] = value,
                Some(_) => error.malformed.push(name),
                None if object.contains_key(name) => error.malformed.push(name),
                None => error.missing.push(name),
            }
        }
        if error.is_empty() {
            Ok(Self::new(values))
        } else {
            Err(error)
        }
    }

    #[must_use]
    pub const fn as_array(&self) -> &[f64; N_FEATURES] {
        &self.0
    }
}

/// Names the payload fields that failed validation.
///
/// A request carrying any of these never reaches the predictor.
#[derive(Debug, Default, Serialize, PartialEq, Eq)]
pub struct ValidationError {
    pub missing: Vec<&'static str>,
    pub malformed: Vec<&'static str>,
}

impl ValidationError {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.missing.is_empty() && self.malformed.is_empty()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.missing.is_empty() {
            write!(formatter, "missing fields: {}", self.missing.join(", "))?;
            if !self.malformed.is_empty() {
                write!(formatter, "; ")?;
            }
        }
        if !self.malformed.is_empty() {
            write!(formatter, "non-numeric fields: {}", self.malformed.join(", "))?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}
