//! HTTP client for the reasoning service.
//!
//! Mirrors the service's JSON API under an `/api` prefix. Non-2xx
//! responses become `TrainerError::Service` with the message extracted
//! from the body's `detail` field when present; network and timeout
//! failures become `TrainerError::Transport` with a generic message (the
//! underlying cause goes to the log, not the user).

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use pitchdrill_core::error::{Result, TrainerError};
use pitchdrill_core::types::{FeedbackResult, ObjectionReply, ResponseKind, Scenario};

use crate::service::TrainingService;

#[derive(Debug, Serialize)]
struct ObjectionRequest<'a> {
    objection_text: &'a str,
    language: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    scenario_id: Option<i64>,
}

#[derive(Debug, Serialize)]
struct FeedbackRequest<'a> {
    scenario_id: i64,
    user_response: &'a str,
    response_type: &'static str,
}

#[derive(Debug, Deserialize)]
struct CategoriesReply {
    categories: Vec<String>,
}

/// reqwest-backed implementation of [`TrainingService`].
pub struct HttpTrainingService {
    client: reqwest::Client,
    base_url: String,
}

impl HttpTrainingService {
    /// Build a client for the given base URL (without the `/api`
    /// prefix) and per-request timeout.
    pub fn new(base_url: &str, timeout_secs: u64) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()
            .map_err(|e| TrainerError::Config(format!("failed to build HTTP client: {}", e)))?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/api{}", self.base_url, path)
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self
            .client
            .get(self.url(path))
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(&self, path: &str, body: &B) -> Result<T> {
        let response = self
            .client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(transport_error)?;
        decode(response).await
    }
}

async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        return Err(TrainerError::Service(extract_detail(&body, status)));
    }
    response
        .json::<T>()
        .await
        .map_err(|e| TrainerError::Serialization(e.to_string()))
}

/// Pull a human-readable message out of an error body.
///
/// The service reports failures as `{"detail": "..."}`; anything else
/// falls back to the status line.
fn extract_detail(body: &str, status: StatusCode) -> String {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|v| v.get("detail").and_then(|d| d.as_str()).map(String::from))
        .unwrap_or_else(|| format!("service returned {}", status))
}

fn transport_error(e: reqwest::Error) -> TrainerError {
    tracing::warn!(error = %e, "Request to the training service failed");
    TrainerError::Transport("failed to reach the training service".to_string())
}

#[async_trait]
impl TrainingService for HttpTrainingService {
    async fn fetch_scenarios(&self) -> Result<Vec<Scenario>> {
        self.get_json("/scenarios").await
    }

    async fn fetch_categories(&self) -> Result<Vec<String>> {
        let reply: CategoriesReply = self.get_json("/scenarios/categories").await?;
        Ok(reply.categories)
    }

    async fn fetch_practice_scenarios(&self) -> Result<Vec<Scenario>> {
        self.get_json("/scenarios/practice").await
    }

    async fn handle_objection(
        &self,
        objection_text: &str,
        language: &str,
        scenario_id: Option<i64>,
    ) -> Result<ObjectionReply> {
        let body = ObjectionRequest {
            objection_text,
            language,
            scenario_id,
        };
        self.post_json("/objection/handle", &body).await
    }

    async fn practice_feedback(
        &self,
        scenario_id: i64,
        user_response: &str,
        response_type: ResponseKind,
    ) -> Result<FeedbackResult> {
        let body = FeedbackRequest {
            scenario_id,
            user_response,
            response_type: response_type.as_str(),
        };
        self.post_json("/practice/feedback", &body).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_building() {
        let service = HttpTrainingService::new("http://localhost:8000/", 30).unwrap();
        assert_eq!(
            service.url("/scenarios/practice"),
            "http://localhost:8000/api/scenarios/practice"
        );
    }

    #[test]
    fn test_extract_detail_from_body() {
        let msg = extract_detail(
            r#"{"detail":"Scenario not found"}"#,
            StatusCode::NOT_FOUND,
        );
        assert_eq!(msg, "Scenario not found");
    }

    #[test]
    fn test_extract_detail_fallback() {
        let msg = extract_detail("<html>oops</html>", StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(msg, "service returned 500 Internal Server Error");

        let msg = extract_detail("", StatusCode::BAD_GATEWAY);
        assert!(msg.starts_with("service returned 502"));
    }

    #[test]
    fn test_objection_request_omits_missing_scenario_id() {
        let body = ObjectionRequest {
            objection_text: "Too expensive",
            language: "English",
            scenario_id: None,
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(!json.contains("scenario_id"));

        let body = ObjectionRequest {
            objection_text: "Too expensive",
            language: "English",
            scenario_id: Some(1),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""scenario_id":1"#));
    }

    #[test]
    fn test_feedback_request_wire_shape() {
        let body = FeedbackRequest {
            scenario_id: 4,
            user_response: "I hear you, let me show the value.",
            response_type: ResponseKind::Voice.as_str(),
        };
        let json = serde_json::to_string(&body).unwrap();
        assert!(json.contains(r#""response_type":"voice""#));
        assert!(json.contains(r#""scenario_id":4"#));
    }
}
