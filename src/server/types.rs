use crate::{Error, Result, inference::QaAnswer};
use askama::Template;
use async_trait::async_trait;
use axum::{
    extract::{Form, FromRequest, Multipart, Request},
    http::header::CONTENT_TYPE,
};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// Fields posted by the page form. Neither is required.
///
/// Accepts urlencoded and multipart bodies; any other body yields absent fields.
#[derive(Debug, Default, PartialEq, Deserialize)]
pub struct QaForm {
    #[serde(default)]
    pub question: Option<String>,
    #[serde(default)]
    pub context: Option<String>,
}

#[async_trait]
impl<S> FromRequest<S> for QaForm
where
    S: Send + Sync,
{
    type Rejection = Error;

    async fn from_request(req: Request, state: &S) -> Result<Self> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<QaForm>::from_request(req, state)
                .await
                .map_err(|e| Error::validation(e.body_text()))?;
            return Ok(form);
        }

        if content_type.starts_with("multipart/form-data") {
            let multipart = Multipart::from_request(req, state)
                .await
                .map_err(|e| Error::validation(e.body_text()))?;
            return Self::from_multipart(multipart).await;
        }

        debug!(content_type = %content_type, "No form body, relaying absent fields");
        Ok(Self::default())
    }
}

impl QaForm {
    /// First value wins for repeated fields.
    async fn from_multipart(mut multipart: Multipart) -> Result<Self> {
        let mut form = Self::default();

        while let Some(field) = multipart
            .next_field()
            .await
            .map_err(|e| Error::validation(e.body_text()))?
        {
            let slot = match field.name() {
                Some("question") => &mut form.question,
                Some("context") => &mut form.context,
                _ => continue,
            };
            if slot.is_some() {
                continue;
            }
            let text = field
                .text()
                .await
                .map_err(|e| Error::validation(e.body_text()))?;
            *slot = Some(text);
        }

        Ok(form)
    }
}

/// Answer values as the endpoint wrote them; strings are shown without quotes.
#[derive(Debug, Clone, PartialEq)]
pub struct AnswerView {
    pub answer: String,
    pub start: String,
    pub end: String,
    pub score: String,
}

impl From<&QaAnswer> for AnswerView {
    fn from(result: &QaAnswer) -> Self {
        Self {
            answer: display_value(&result.answer),
            start: display_value(&result.start),
            end: display_value(&result.end),
            score: display_value(&result.score),
        }
    }
}

fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub result: Option<AnswerView>,
}
