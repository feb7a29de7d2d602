use std::sync::Arc;
use std::time::Duration;

use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::json;

use admitd_auth::{AuthConfig, Claims};
use admitd_core::FEATURE_COUNT;
use admitd_predictor::{LinearModel, PredictError, Predictor};

const JWT_SECRET: &str = "test-secret";
const USERNAME: &str = "admin";
const PASSWORD: &str = "secret123";

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(predictor: Arc<dyn Predictor>) -> Self {
        // Same router as prod, bound to an ephemeral port.
        let config = AuthConfig {
            secret: JWT_SECRET.to_string(),
            token_ttl: ChronoDuration::minutes(10),
            username: USERNAME.to_string(),
            password: PASSWORD.to_string(),
        };
        let app = admitd_api::app::build_app(config, predictor);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }

    async fn spawn_default() -> Self {
        Self::spawn(Arc::new(LinearModel::default())).await
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Predictor that sleeps long enough for tests to observe an in-flight job.
struct SlowPredictor;

impl Predictor for SlowPredictor {
    fn predict(&self, _features: &[f64; FEATURE_COUNT]) -> Result<f64, PredictError> {
        std::thread::sleep(Duration::from_millis(300));
        Ok(0.5)
    }
}

struct FailingPredictor;

impl Predictor for FailingPredictor {
    fn predict(&self, _features: &[f64; FEATURE_COUNT]) -> Result<f64, PredictError> {
        Err(PredictError::InferenceFailed("model unavailable".to_string()))
    }
}

fn sample_input() -> serde_json::Value {
    json!({
        "gre_score": 320.0,
        "toefl_score": 110.0,
        "university_rating": 4.0,
        "sop": 4.5,
        "lor": 4.0,
        "cgpa": 9.1,
        "research": 1,
    })
}

async fn login(client: &reqwest::Client, base_url: &str) -> String {
    let res = client
        .post(format!("{}/login", base_url))
        .json(&json!({ "username": USERNAME, "password": PASSWORD }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn submit_batch(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    inputs: Vec<serde_json::Value>,
) -> reqwest::Response {
    client
        .post(format!("{}/batch/submit", base_url))
        .bearer_auth(token)
        .json(&json!({ "inputs": inputs }))
        .send()
        .await
        .unwrap()
}

async fn status_eventually(
    client: &reqwest::Client,
    base_url: &str,
    token: &str,
    job_id: &str,
    wanted: &str,
) -> serde_json::Value {
    // Batch completion is asynchronous; poll with bounded retries.
    for _ in 0..100 {
        let res = client
            .get(format!("{}/batch/status/{}", base_url, job_id))
            .bearer_auth(token)
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let body: serde_json::Value = res.json().await.unwrap();

        if body["status"] == wanted {
            return body;
        }

        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    panic!("job did not reach status {wanted} within timeout");
}

#[tokio::test]
async fn auth_required_for_protected_endpoints() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/predict", srv.base_url))
        .json(&sample_input())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let res = client
        .get(format!(
            "{}/batch/status/{}",
            srv.base_url,
            uuid::Uuid::now_v7()
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn public_paths_bypass_authentication() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    for path in ["/healthz", "/readyz", "/livez"] {
        let res = client
            .get(format!("{}{}", srv.base_url, path))
            .send()
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK, "{path}");
    }
}

#[tokio::test]
async fn login_rejects_wrong_password_and_issues_no_token() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/login", srv.base_url))
        .json(&json!({ "username": USERNAME, "password": "wrong" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("token").is_none());
}

#[tokio::test]
async fn expired_token_is_rejected_even_when_well_signed() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let now = Utc::now();
    let claims = Claims {
        sub: USERNAME.to_string(),
        iat: now - ChronoDuration::minutes(60),
        exp: now - ChronoDuration::minutes(30),
    };
    let expired = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(JWT_SECRET.as_bytes()),
    )
    .expect("failed to encode jwt");

    let res = client
        .post(format!("{}/predict", srv.base_url))
        .bearer_auth(expired)
        .json(&sample_input())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn token_signed_with_wrong_secret_is_rejected() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();

    let now = Utc::now();
    let claims = Claims {
        sub: USERNAME.to_string(),
        iat: now,
        exp: now + ChronoDuration::minutes(10),
    };
    let forged = jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(b"another-secret"),
    )
    .expect("failed to encode jwt");

    let res = client
        .post(format!("{}/predict", srv.base_url))
        .bearer_auth(forged)
        .json(&sample_input())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn single_predict_returns_probability_in_unit_interval() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let res = client
        .post(format!("{}/predict", srv.base_url))
        .bearer_auth(&token)
        .json(&sample_input())
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let chance = body["chance_of_admit"].as_f64().unwrap();
    assert!((0.0..=1.0).contains(&chance));
}

#[tokio::test]
async fn single_predict_rejects_out_of_bounds_input() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let mut input = sample_input();
    input["gre_score"] = json!(400.0);

    let res = client
        .post(format!("{}/predict", srv.base_url))
        .bearer_auth(&token)
        .json(&input)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn batch_size_limits_are_enforced() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let res = submit_batch(&client, &srv.base_url, &token, vec![]).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = submit_batch(&client, &srv.base_url, &token, vec![sample_input(); 1001]).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = submit_batch(&client, &srv.base_url, &token, vec![sample_input(); 1000]).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn invalid_record_rejects_batch_atomically() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let mut bad = sample_input();
    bad["cgpa"] = json!(42.0);
    let res = submit_batch(&client, &srv.base_url, &token, vec![sample_input(), bad]).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body.get("job_id").is_none());
}

#[tokio::test]
async fn batch_end_to_end_submit_poll_fetch() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let res = submit_batch(
        &client,
        &srv.base_url,
        &token,
        vec![sample_input(), sample_input(), sample_input()],
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let submitted: serde_json::Value = res.json().await.unwrap();
    assert_eq!(submitted["status"], "pending");
    let job_id = submitted["job_id"].as_str().unwrap().to_string();

    // Submit never blocks on processing: the immediate status is an early
    // state, never terminal-before-processing.
    let res = client
        .get(format!("{}/batch/status/{}", srv.base_url, job_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    status_eventually(&client, &srv.base_url, &token, &job_id, "completed").await;

    let res = client
        .get(format!("{}/batch/results/{}", srv.base_url, job_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["total"], 3);
    let results = body["results"].as_array().unwrap();
    assert_eq!(results.len(), 3);
    for r in results {
        let chance = r["chance_of_admit"].as_f64().unwrap();
        assert!((0.0..=1.0).contains(&chance));
    }
}

#[tokio::test]
async fn results_for_in_flight_job_answer_202() {
    let srv = TestServer::spawn(Arc::new(SlowPredictor)).await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let res = submit_batch(&client, &srv.base_url, &token, vec![sample_input()]).await;
    assert_eq!(res.status(), StatusCode::OK);
    let submitted: serde_json::Value = res.json().await.unwrap();
    let job_id = submitted["job_id"].as_str().unwrap();

    let res = client
        .get(format!("{}/batch/results/{}", srv.base_url, job_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::ACCEPTED);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Job is still processing");
}

#[tokio::test]
async fn failed_job_surfaces_cause_on_results() {
    let srv = TestServer::spawn(Arc::new(FailingPredictor)).await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let res = submit_batch(&client, &srv.base_url, &token, vec![sample_input()]).await;
    assert_eq!(res.status(), StatusCode::OK);
    let submitted: serde_json::Value = res.json().await.unwrap();
    let job_id = submitted["job_id"].as_str().unwrap().to_string();

    status_eventually(&client, &srv.base_url, &token, &job_id, "failed").await;

    let res = client
        .get(format!("{}/batch/results/{}", srv.base_url, job_id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["status"], "failed");
    assert!(body["error"].as_str().unwrap().contains("model unavailable"));
}

#[tokio::test]
async fn unknown_job_is_not_found_regardless_of_auth() {
    let srv = TestServer::spawn_default().await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    for path in [
        format!("{}/batch/status/{}", srv.base_url, uuid::Uuid::now_v7()),
        format!("{}/batch/results/{}", srv.base_url, uuid::Uuid::now_v7()),
        format!("{}/batch/status/not-a-job-id", srv.base_url),
    ] {
        let res = client.get(path).bearer_auth(&token).send().await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn repeated_polling_observes_monotonic_status() {
    let srv = TestServer::spawn(Arc::new(SlowPredictor)).await;
    let client = reqwest::Client::new();
    let token = login(&client, &srv.base_url).await;

    let res = submit_batch(&client, &srv.base_url, &token, vec![sample_input()]).await;
    let submitted: serde_json::Value = res.json().await.unwrap();
    let job_id = submitted["job_id"].as_str().unwrap().to_string();

    fn rank(status: &str) -> u8 {
        match status {
            "pending" => 0,
            "processing" => 1,
            "completed" | "failed" => 2,
            other => panic!("unexpected status {other}"),
        }
    }

    let mut last = 0;
    for _ in 0..50 {
        let res = client
            .get(format!("{}/batch/status/{}", srv.base_url, job_id))
            .bearer_auth(&token)
            .send()
            .await
            .unwrap();
        let body: serde_json::Value = res.json().await.unwrap();
        let seen = rank(body["status"].as_str().unwrap());
        assert!(seen >= last, "status went backwards");
        last = seen;
        if seen == 2 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
}
