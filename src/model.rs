//! The model artifact and the linear predictor.

use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::features::{FeatureVector, N_FEATURES};
use crate::prelude::*;

/// On-disk artifact layout: the coefficients in the canonical feature order,
/// then the intercept. Positional and versionless, see
/// [`crate::features::FEATURE_NAMES`] for the order contract.
#[derive(Deserialize)]
struct Artifact(Vec<f64>, f64);

/// The fitted linear model, immutable once loaded.
pub struct LinearModel {
    coefficients: [f64; N_FEATURES],
    intercept: f64,
}

impl LinearModel {
    pub fn new(coefficients: [f64; N_FEATURES], intercept: f64) -> Result<Self> {
        if coefficients.iter().any(|coefficient| !coefficient.is_finite()) {
            return Err(anyhow!("the model contains a non-finite coefficient"));
        }
        if !intercept.is_finite() {
            return Err(anyhow!("the model intercept is not finite"));
        }
        Ok(Self { coefficients, intercept })
    }

    /// Reads and decodes the model artifact.
    ///
    /// Any failure here must abort startup: the service never comes up
    /// without a model and never falls back to serving without one.
    pub fn load(path: &Path) -> Result<Self> {
        let blob = fs::read(path)
            .with_context(|| format!("failed to read the model artifact `{}`", path.display()))?;
        let Artifact(coefficients, intercept) =
            serde_pickle::from_slice(&blob, Default::default()).with_context(|| {
                format!("failed to decode the model artifact `{}`", path.display())
            })?;
        let coefficients: [f64; N_FEATURES] =
            coefficients.try_into().map_err(|coefficients: Vec<f64>| {
                anyhow!("expected {} coefficients, got {}", N_FEATURES, coefficients.len())
            })?;
        Self::new(coefficients, intercept)
    }

    /// Intercept plus the dot product, summed in the canonical feature order.
    ///
    /// Pure function: the same model and vector always yield the same bits.
    #[must_use]
    pub fn predict(&self, features: &FeatureVector) -> f64 {
        self.intercept
            + self
                .coefficients
                .iter()
                .zip(features.as_array())
                .map(|(coefficient, feature)| coefficient * feature)
                .sum::<f64>()
    }
}

/// Rounds to 2 decimal places, halves away from zero (`f64::round`).
#[must_use]
pub fn round_to_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
pub mod tests {
    use std::env;

    use super::*;

    /// Coefficients in the ballpark of a least-squares fit
    /// on the California housing dataset.
    pub const TEST_COEFFICIENTS: [f64; N_FEATURES] =
        [0.4487, 0.0097, -0.1233, 0.7831, -0.0000020, -0.0035, -0.4198, -0.4337];
    pub const TEST_INTERCEPT: f64 = -34.9852;

    pub fn test_model() -> LinearModel {
        LinearModel::new(TEST_COEFFICIENTS, TEST_INTERCEPT).unwrap()
    }

    pub fn example_features() -> FeatureVector {
        FeatureVector::new([3.8716, 21.0, 5.80, 1.04, 1425.0, 2.55, 37.88, -122.23])
    }

    fn write_artifact(name: &str, coefficients: &[f64], intercept: f64) -> std::path::PathBuf {
        let path = env::temp_dir().join(name);
        let blob =
            serde_pickle::to_vec(&(coefficients, intercept), Default::default()).unwrap();
        fs::write(&path, blob).unwrap();
        path
    }

    #[test]
    fn load_ok() -> Result {
        let path =
            write_artifact("housing-model-ok.pickle", &TEST_COEFFICIENTS, TEST_INTERCEPT);
        let model = LinearModel::load(&path)?;
        assert_eq!(model.coefficients, TEST_COEFFICIENTS);
        assert_eq!(model.intercept, TEST_INTERCEPT);
        Ok(())
    }

    #[test]
    fn load_missing_file_fails() {
        let path = env::temp_dir().join("no-such-housing-model.pickle");
        assert!(LinearModel::load(&path).is_err());
    }

    #[test]
    fn load_wrong_coefficient_count_fails() {
        let path = write_artifact(
            "housing-model-short.pickle",
            &TEST_COEFFICIENTS[..7],
            TEST_INTERCEPT,
        );
        assert!(LinearModel::load(&path).is_err());
    }

    #[test]
    fn load_corrupt_blob_fails() {
        let path = env::temp_dir().join("housing-model-corrupt.pickle");
        fs::write(&path, b"not a pickle").unwrap();
        assert!(LinearModel::load(&path).is_err());
    }

    #[test]
    fn non_finite_coefficient_rejected() {
        let mut coefficients = TEST_COEFFICIENTS;
        coefficients[3] = f64::NAN;
        assert!(LinearModel::new(coefficients, TEST_INTERCEPT).is_err());
    }

    #[test]
    fn predict_is_deterministic() {
        let model = test_model();
        let features = example_features();
        let first = model.predict(&features);
        for _ in 0..100 {
            assert_eq!(model.predict(&features).to_bits(), first.to_bits());
        }
    }

    #[test]
    fn predict_example_rounds_to_reference_value() {
        let model = test_model();
        assert_eq!(round_to_cents(model.predict(&example_features())), 4.15);
    }

    #[test]
    fn rounding_halves_away_from_zero() {
        assert_eq!(round_to_cents(0.125), 0.13);
        assert_eq!(round_to_cents(-0.125), -0.13);
        assert_eq!(round_to_cents(3.14159), 3.14);
        assert_eq!(round_to_cents(4.0), 4.0);
    }
}
