//! Admission feature records and prediction outputs.
//!
//! Field bounds mirror the public API contract:
//! `gre_score` 0–340, `toefl_score` 0–120, `university_rating` 1–5,
//! `sop` 1–5, `lor` 1–5, `cgpa` 0–10, `research` ∈ {0, 1}.

use serde::{Deserialize, Serialize};

use crate::error::DomainError;

/// Width of the feature vector fed to the predictor.
pub const FEATURE_COUNT: usize = 7;

/// Maximum number of records accepted in one batch submission.
pub const MAX_BATCH_SIZE: usize = 1000;

/// One admission prediction input record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AdmissionInput {
    pub gre_score: f64,
    pub toefl_score: f64,
    pub university_rating: f64,
    pub sop: f64,
    pub lor: f64,
    pub cgpa: f64,
    pub research: u8,
}

impl AdmissionInput {
    /// Check every field against its documented bounds.
    ///
    /// Non-finite values are rejected; serde alone would let them through
    /// when a permissive JSON parser is in front of us.
    pub fn validate(&self) -> Result<(), DomainError> {
        in_range("gre_score", self.gre_score, 0.0, 340.0)?;
        in_range("toefl_score", self.toefl_score, 0.0, 120.0)?;
        in_range("university_rating", self.university_rating, 1.0, 5.0)?;
        in_range("sop", self.sop, 1.0, 5.0)?;
        in_range("lor", self.lor, 1.0, 5.0)?;
        in_range("cgpa", self.cgpa, 0.0, 10.0)?;
        if self.research > 1 {
            return Err(DomainError::validation("research must be 0 or 1"));
        }
        Ok(())
    }

    /// Feature vector in model order.
    pub fn to_features(&self) -> [f64; FEATURE_COUNT] {
        [
            self.gre_score,
            self.toefl_score,
            self.university_rating,
            self.sop,
            self.lor,
            self.cgpa,
            f64::from(self.research),
        ]
    }
}

/// One admission prediction output record, `chance_of_admit` in [0, 1].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub chance_of_admit: f64,
}

/// Validate a whole batch before any job is created.
///
/// Rejection is atomic: size out of `[1, MAX_BATCH_SIZE]` or any
/// out-of-bounds record fails the submission as a whole.
pub fn validate_batch(inputs: &[AdmissionInput]) -> Result<(), DomainError> {
    if inputs.is_empty() {
        return Err(DomainError::validation(
            "batch must contain at least 1 input",
        ));
    }
    if inputs.len() > MAX_BATCH_SIZE {
        return Err(DomainError::validation(format!(
            "batch size cannot exceed {MAX_BATCH_SIZE} records"
        )));
    }
    for (i, input) in inputs.iter().enumerate() {
        input
            .validate()
            .map_err(|e| DomainError::validation(format!("inputs[{i}]: {e}")))?;
    }
    Ok(())
}

fn in_range(field: &str, value: f64, lo: f64, hi: f64) -> Result<(), DomainError> {
    if !value.is_finite() || value < lo || value > hi {
        return Err(DomainError::validation(format!(
            "{field} must be between {lo} and {hi}"
        )));
    }
    Ok(())
}
