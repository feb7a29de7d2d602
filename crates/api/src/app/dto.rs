use serde::{Deserialize, Serialize};

use admitd_core::{AdmissionInput, Prediction};
use admitd_jobs::JobStatus;

// -------------------------
// Request DTOs
// -------------------------

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct BatchSubmitRequest {
    pub inputs: Vec<AdmissionInput>,
}

// -------------------------
// Response DTOs
// -------------------------

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct BatchSubmitResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct BatchStatusResponse {
    pub job_id: String,
    pub status: JobStatus,
}

#[derive(Debug, Serialize)]
pub struct BatchResultsResponse {
    pub job_id: String,
    pub status: JobStatus,
    pub results: Vec<Prediction>,
    pub total: usize,
}
