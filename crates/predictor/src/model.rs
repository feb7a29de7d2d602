//! Predictor trait and the linear admission model.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use admitd_core::FEATURE_COUNT;

#[derive(Debug, Error)]
pub enum PredictError {
    #[error("invalid feature vector: {0}")]
    InvalidInput(String),

    #[error("inference failed: {0}")]
    InferenceFailed(String),
}

/// Stateless prediction capability: feature vector → admission probability.
///
/// Implementations must be `Send + Sync` and tolerate unlimited concurrent
/// calls; the batch processor fans invocations out from background tasks.
pub trait Predictor: Send + Sync + 'static {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64, PredictError>;
}

/// Linear regression over the seven admission features.
///
/// Coefficients come from the offline training pipeline; the defaults are
/// the fit against the public admission dataset. Raw regression output can
/// land slightly outside [0, 1], so predictions are clamped to the
/// documented output bound.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub weights: [f64; FEATURE_COUNT],
}

impl Default for LinearModel {
    fn default() -> Self {
        Self {
            intercept: -1.2757,
            weights: [
                0.00186, // gre_score
                0.00278, // toefl_score
                0.00594, // university_rating
                0.00159, // sop
                0.01686, // lor
                0.11839, // cgpa
                0.02453, // research
            ],
        }
    }
}

impl LinearModel {
    pub fn new(intercept: f64, weights: [f64; FEATURE_COUNT]) -> Self {
        Self { intercept, weights }
    }

    /// Load coefficients exported by the training pipeline as JSON
    /// (`{"intercept": ..., "weights": [...7 values...]}`).
    pub fn from_json_file(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("reading model file {}", path.display()))?;
        let model: Self = serde_json::from_str(&raw)
            .with_context(|| format!("parsing model file {}", path.display()))?;
        Ok(model)
    }
}

impl Predictor for LinearModel {
    fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64, PredictError> {
        if features.iter().any(|v| !v.is_finite()) {
            return Err(PredictError::InvalidInput(
                "feature vector contains a non-finite value".to_string(),
            ));
        }

        let raw = self
            .weights
            .iter()
            .zip(features.iter())
            .map(|(w, x)| w * x)
            .sum::<f64>()
            + self.intercept;

        if !raw.is_finite() {
            return Err(PredictError::InferenceFailed(
                "model produced a non-finite prediction".to_string(),
            ));
        }

        Ok(raw.clamp(0.0, 1.0))
    }
}

#[cfg(test)]
mod tests {
    use admitd_core::AdmissionInput;

    use super::*;

    fn strong_profile() -> AdmissionInput {
        AdmissionInput {
            gre_score: 335.0,
            toefl_score: 118.0,
            university_rating: 5.0,
            sop: 5.0,
            lor: 5.0,
            cgpa: 9.8,
            research: 1,
        }
    }

    fn weak_profile() -> AdmissionInput {
        AdmissionInput {
            gre_score: 260.0,
            toefl_score: 70.0,
            university_rating: 1.0,
            sop: 1.0,
            lor: 1.0,
            cgpa: 5.0,
            research: 0,
        }
    }

    #[test]
    fn predictions_stay_in_unit_interval() {
        let model = LinearModel::default();
        for input in [strong_profile(), weak_profile()] {
            let p = model.predict(&input.to_features()).unwrap();
            assert!((0.0..=1.0).contains(&p), "prediction {p} out of bounds");
        }
    }

    #[test]
    fn stronger_profiles_score_higher() {
        let model = LinearModel::default();
        let strong = model.predict(&strong_profile().to_features()).unwrap();
        let weak = model.predict(&weak_profile().to_features()).unwrap();
        assert!(strong > weak);
    }

    #[test]
    fn non_finite_features_are_rejected() {
        let model = LinearModel::default();
        let mut features = strong_profile().to_features();
        features[3] = f64::NAN;
        assert!(matches!(
            model.predict(&features),
            Err(PredictError::InvalidInput(_))
        ));
    }

    #[test]
    fn coefficients_round_trip_through_json() {
        let model = LinearModel::new(0.5, [0.1, 0.2, 0.3, 0.4, 0.5, 0.6, 0.7]);
        let raw = serde_json::to_string(&model).unwrap();
        let parsed: LinearModel = serde_json::from_str(&raw).unwrap();
        assert_eq!(model, parsed);
    }
}
