use super::types::UpstreamResponse;
use crate::{Error, Result, config::EndpointConfig};
use async_trait::async_trait;
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error};

#[async_trait]
pub trait InferenceClient: Send + Sync {
    /// Posts `payload` to the endpoint and returns its status and JSON body.
    async fn score(&self, payload: &Value) -> Result<UpstreamResponse>;
}

pub struct HttpInferenceClient {
    client: reqwest::Client,
    url: String,
    api_key: Secret<String>,
}

impl HttpInferenceClient {
    pub fn new(config: EndpointConfig) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(secs) = config.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build()?;

        Ok(Self {
            client,
            url: config.url,
            api_key: config.api_key,
        })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl InferenceClient for HttpInferenceClient {
    async fn score(&self, payload: &Value) -> Result<UpstreamResponse> {
        debug!("Sending inference request to {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .bearer_auth(self.api_key.expose_secret())
            .json(payload)
            .send()
            .await
            .inspect_err(|e| error!("Inference request failed: {}", e))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .inspect_err(|e| error!("Reading inference response failed: {}", e))?;
        let body: Value = serde_json::from_slice(&bytes).map_err(|e| {
            Error::upstream_shape(format!("response body is not JSON ({status}): {e}"))
        })?;

        debug!(status = status.as_u16(), "Received inference response: {}", body);

        Ok(UpstreamResponse { status, body })
    }
}
