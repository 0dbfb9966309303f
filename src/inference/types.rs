use crate::{Error, Result};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Batch-shaped question answering payload accepted by the endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaRequest {
    pub inputs: QaInputs,
}

/// Absent form fields serialize as `null` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QaInputs {
    pub question: Vec<Option<String>>,
    pub context: Vec<Option<String>>,
}

impl QaRequest {
    pub fn single(question: Option<String>, context: Option<String>) -> Self {
        Self {
            inputs: QaInputs {
                question: vec![question],
                context: vec![context],
            },
        }
    }
}

/// First result of a batch response, values kept exactly as the endpoint sent them.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct QaAnswer {
    pub answer: Value,
    pub start: Value,
    pub end: Value,
    pub score: Value,
}

impl QaAnswer {
    /// Takes the first result of a batch response.
    pub fn from_batch(body: Value) -> Result<Self> {
        let Value::Array(items) = body else {
            return Err(Error::upstream_shape(format!(
                "expected an array of results, got {}",
                kind_of(&body)
            )));
        };
        let first = items
            .into_iter()
            .next()
            .ok_or_else(|| Error::upstream_shape("empty result array"))?;
        let Value::Object(mut fields) = first else {
            return Err(Error::upstream_shape(format!(
                "expected a result object, got {}",
                kind_of(&first)
            )));
        };

        let mut take = |key: &str| {
            fields
                .remove(key)
                .ok_or_else(|| Error::upstream_shape(format!("missing field `{key}`")))
        };

        Ok(Self {
            answer: take("answer")?,
            start: take("start")?,
            end: take("end")?,
            score: take("score")?,
        })
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamResponse {
    pub status: StatusCode,
    pub body: Value,
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
