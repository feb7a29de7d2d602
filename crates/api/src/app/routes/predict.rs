//! Synchronous single prediction.

use std::sync::Arc;

use axum::{extract::Extension, http::StatusCode, response::IntoResponse, Json};

use admitd_core::{AdmissionInput, Prediction};

use crate::app::{errors, services::AppServices};

/// POST /predict
///
/// One feature record in, one probability out, on the request path.
pub async fn predict(
    Extension(services): Extension<Arc<AppServices>>,
    Json(input): Json<AdmissionInput>,
) -> axum::response::Response {
    if let Err(e) = input.validate() {
        return errors::domain_error_to_response(&e);
    }

    let predictor = services.predictor.clone();
    let features = input.to_features();

    // Same isolation as the batch path: model work stays off async workers.
    match tokio::task::spawn_blocking(move || predictor.predict(&features)).await {
        Ok(Ok(chance_of_admit)) => {
            (StatusCode::OK, Json(Prediction { chance_of_admit })).into_response()
        }
        Ok(Err(e)) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "prediction_failed",
            e.to_string(),
        ),
        Err(e) => errors::json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "prediction_failed",
            format!("prediction task panicked: {e}"),
        ),
    }
}
