use axum::{
    Router,
    body::Body,
    http::{Request, Response},
};
use qa_relay::{
    config::EndpointConfig,
    inference::{HttpInferenceClient, InferenceClient},
    server::{self, handlers::AppState},
};
use secrecy::Secret;
use serde_json::Value;
use std::sync::Arc;

pub const JSON_TOKEN: &str = "json-relay-token";
pub const FORM_TOKEN: &str = "form-relay-token";

pub fn endpoint_config(url: &str, api_key: &str) -> EndpointConfig {
    EndpointConfig {
        url: url.to_string(),
        api_key: Secret::new(api_key.to_string()),
        timeout_secs: None,
    }
}

pub fn http_client(url: &str, api_key: &str) -> Arc<dyn InferenceClient> {
    Arc::new(HttpInferenceClient::new(endpoint_config(url, api_key)).unwrap())
}

/// Both relay routes backed by the endpoint at `score_url`, each with its own token.
pub fn app_for_endpoint(score_url: &str) -> Router {
    create_test_app(
        http_client(score_url, JSON_TOKEN),
        http_client(score_url, FORM_TOKEN),
    )
}

pub fn create_test_app(
    json_relay: Arc<dyn InferenceClient>,
    form_relay: Arc<dyn InferenceClient>,
) -> Router {
    server::router(AppState {
        json_relay,
        form_relay,
    })
}

pub fn json_request(body: &Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/azure-ml-api")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub fn form_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/local-ml-api")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_string(response: Response<Body>) -> String {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}
