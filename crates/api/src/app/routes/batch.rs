//! Asynchronous batch endpoints: submit, status polling, result retrieval.

use std::sync::Arc;

use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use admitd_core::{validate_batch, JobId};
use admitd_jobs::JobStatus;

use crate::app::{
    dto::{BatchResultsResponse, BatchStatusResponse, BatchSubmitRequest, BatchSubmitResponse},
    errors,
    services::AppServices,
};

pub fn router() -> Router {
    Router::new()
        .route("/submit", post(submit))
        .route("/status/:job_id", get(status))
        .route("/results/:job_id", get(results))
}

/// POST /batch/submit
///
/// Validates the whole batch up front; a job record only exists for
/// submissions that passed. Returns as soon as the job is created — the
/// dispatched execution runs on its own.
pub async fn submit(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<BatchSubmitRequest>,
) -> axum::response::Response {
    if let Err(e) = validate_batch(&body.inputs) {
        return errors::domain_error_to_response(&e);
    }

    let job_id = services.store.create(body.inputs).await;
    services.processor.dispatch(job_id);

    tracing::info!(%job_id, "batch job submitted");

    (
        StatusCode::OK,
        Json(BatchSubmitResponse {
            job_id: job_id.to_string(),
            status: JobStatus::Pending,
            message: "Batch job submitted successfully".to_string(),
        }),
    )
        .into_response()
}

/// GET /batch/status/{job_id}
///
/// Current status only; results never ride along here.
pub async fn status(
    Extension(services): Extension<Arc<AppServices>>,
    Path(job_id): Path<String>,
) -> axum::response::Response {
    let Some(job_id) = parse_job_id(&job_id) else {
        return job_not_found();
    };

    match services.store.get(&job_id).await {
        Some(job) => (
            StatusCode::OK,
            Json(BatchStatusResponse {
                job_id: job.id.to_string(),
                status: job.status,
            }),
        )
            .into_response(),
        None => job_not_found(),
    }
}

/// GET /batch/results/{job_id}
///
/// - completed → 200 with the full ordered result set and its count
/// - pending/processing → 202, a "still working" answer rather than an error
/// - failed → 500 carrying the recorded cause
pub async fn results(
    Extension(services): Extension<Arc<AppServices>>,
    Path(job_id): Path<String>,
) -> axum::response::Response {
    let Some(job_id) = parse_job_id(&job_id) else {
        return job_not_found();
    };

    let Some(job) = services.store.get(&job_id).await else {
        return job_not_found();
    };

    match job.status {
        JobStatus::Completed => {
            let total = job.results.len();
            (
                StatusCode::OK,
                Json(BatchResultsResponse {
                    job_id: job.id.to_string(),
                    status: job.status,
                    results: job.results,
                    total,
                }),
            )
                .into_response()
        }
        JobStatus::Pending | JobStatus::Processing => (
            StatusCode::ACCEPTED,
            Json(serde_json::json!({
                "job_id": job.id.to_string(),
                "status": job.status,
                "message": "Job is still processing",
            })),
        )
            .into_response(),
        JobStatus::Failed => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "job_id": job.id.to_string(),
                "status": job.status,
                "error": job.error.as_deref().unwrap_or("Unknown error"),
            })),
        )
            .into_response(),
    }
}

/// Unknown and malformed identifiers are indistinguishable to clients:
/// both are "no such job".
fn parse_job_id(raw: &str) -> Option<JobId> {
    raw.parse::<JobId>().ok()
}

fn job_not_found() -> axum::response::Response {
    errors::json_error(StatusCode::NOT_FOUND, "not_found", "job not found")
}
