use super::types::{AnswerView, IndexTemplate, QaForm};
use crate::{
    Error, Result,
    inference::{InferenceClient, QaAnswer, QaRequest},
};
use axum::{
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Json, Response},
};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, info, instrument};

#[derive(Clone)]
pub struct AppState {
    /// Endpoint behind `POST /azure-ml-api`.
    pub json_relay: Arc<dyn InferenceClient>,
    /// Endpoint behind `POST /local-ml-api`.
    pub form_relay: Arc<dyn InferenceClient>,
}

pub async fn index() -> IndexTemplate {
    IndexTemplate { result: None }
}

pub async fn health_check() -> &'static str {
    "OK"
}

/// Forwards the request body unchanged and relays the endpoint's reply.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn json_relay(
    State(state): State<AppState>,
    payload: std::result::Result<Json<Value>, JsonRejection>,
) -> Result<Response> {
    let Json(payload) = payload.map_err(|e| Error::validation(e.body_text()))?;
    debug!("Received JSON relay request: {}", payload);

    let Some(body) = payload.as_object() else {
        return Err(Error::validation("Request body must be a JSON object"));
    };
    if !body.contains_key("inputs") {
        return Err(Error::validation("Missing required attribute \"inputs\""));
    }

    let upstream = state.json_relay.score(&payload).await?;
    info!(
        status = upstream.status.as_u16(),
        "Relayed inference response"
    );

    Ok((upstream.status, Json(upstream.body)).into_response())
}

/// Wraps the form fields into a single-item batch and renders the first answer.
#[instrument(skip_all, fields(request_id = %uuid::Uuid::new_v4()))]
pub async fn form_relay(
    State(state): State<AppState>,
    form: QaForm,
) -> Result<IndexTemplate> {
    let payload = serde_json::to_value(QaRequest::single(form.question, form.context))?;
    debug!("Constructed inference request: {}", payload);

    let upstream = state.form_relay.score(&payload).await?;
    debug!("Raw inference response: {}", upstream.body);

    if !upstream.status.is_success() {
        return Err(Error::Upstream {
            status: upstream.status.as_u16(),
        });
    }

    let result = QaAnswer::from_batch(upstream.body)?;
    info!(score = %result.score, "Rendering answer");

    Ok(IndexTemplate {
        result: Some(AnswerView::from(&result)),
    })
}
