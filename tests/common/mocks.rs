use async_trait::async_trait;
use axum::http::StatusCode;
use qa_relay::{
    Error, Result,
    inference::{InferenceClient, UpstreamResponse},
};
use serde_json::Value;
use std::sync::{Arc, Mutex};

/// Mock inference client for testing
#[derive(Debug)]
pub struct MockInferenceClient {
    pub response: Option<UpstreamResponse>,
    pub requests: Arc<Mutex<Vec<Value>>>,
    pub error: Option<String>,
}

impl MockInferenceClient {
    pub fn new() -> Self {
        Self {
            response: None,
            requests: Arc::new(Mutex::new(Vec::new())),
            error: None,
        }
    }

    pub fn with_response(mut self, status: StatusCode, body: Value) -> Self {
        self.response = Some(UpstreamResponse { status, body });
        self
    }

    pub fn with_error(mut self, error: &str) -> Self {
        self.error = Some(error.to_string());
        self
    }

    pub fn get_requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl InferenceClient for MockInferenceClient {
    async fn score(&self, payload: &Value) -> Result<UpstreamResponse> {
        self.requests.lock().unwrap().push(payload.clone());

        if let Some(ref error) = self.error {
            return Err(Error::internal(error.clone()));
        }

        self.response
            .clone()
            .ok_or_else(|| Error::internal("No mock response configured"))
    }
}

impl Default for MockInferenceClient {
    fn default() -> Self {
        Self::new()
    }
}
