use std::sync::Arc;

use admitd_auth::AuthConfig;
use admitd_predictor::{LinearModel, Predictor};

#[tokio::main]
async fn main() {
    admitd_observability::init();

    let config = AuthConfig::from_env();

    let predictor: Arc<dyn Predictor> = match std::env::var("MODEL_PATH") {
        Ok(path) => match LinearModel::from_json_file(&path) {
            Ok(model) => Arc::new(model),
            Err(e) => {
                tracing::warn!("failed to load model from {path}: {e}; using built-in coefficients");
                Arc::new(LinearModel::default())
            }
        },
        Err(_) => Arc::new(LinearModel::default()),
    };

    let app = admitd_api::app::build_app(config, predictor);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:8080")
        .await
        .expect("failed to bind 0.0.0.0:8080");

    tracing::info!("listening on {}", listener.local_addr().unwrap());

    axum::serve(listener, app).await.unwrap();
}
