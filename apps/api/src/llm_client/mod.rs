/// LLM Client: the single point of entry for all Gemini API calls in AIRE.
///
/// ARCHITECTURAL RULE: No other module may call the Gemini API directly.
/// Handlers depend on the `TextGenerator` trait, never on `GeminiClient`.
///
/// Model: gemini-1.5-pro (hardcoded, not configurable)
use std::time::Duration;

use anyhow::Context;
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::analysis::request::GenerationRequest;
use crate::config::Config;

#[cfg(test)]
pub mod fake;

/// The model used for all generation calls.
pub const MODEL: &str = "gemini-1.5-pro";
const QUOTA_STATUS: &str = "RESOURCE_EXHAUSTED";

/// Classified failure of a generation call. No variant is retried.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("Quota exhausted: {0}")]
    QuotaExceeded(String),

    #[error("API error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("{0}")]
    Unknown(String),
}

impl From<reqwest::Error> for LlmError {
    fn from(e: reqwest::Error) -> Self {
        LlmError::Unknown(format!("HTTP error: {e}"))
    }
}

/// The generation capability: submit the three request parts, get text back.
///
/// Carried in `AppState` as `Arc<dyn TextGenerator>` so tests can swap in a fake.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError>;
}

// ────────────────────────────────────────────────────────────────────────────
// Wire types (generateContent)
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    role: &'a str,
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
    pub prompt_feedback: Option<PromptFeedback>,
    pub usage_metadata: Option<UsageMetadata>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Candidate {
    pub content: Option<CandidateContent>,
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CandidateContent {
    #[serde(default)]
    pub parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
pub struct CandidatePart {
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptFeedback {
    pub block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UsageMetadata {
    pub prompt_token_count: Option<u32>,
    pub candidates_token_count: Option<u32>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate. `None` when the service
    /// answered without any text (blocked prompt, empty candidate).
    pub fn text(&self) -> Option<String> {
        let parts = &self.candidates.first()?.content.as_ref()?.parts;
        let texts: Vec<&str> = parts.iter().filter_map(|p| p.text.as_deref()).collect();
        if texts.is_empty() {
            None
        } else {
            Some(texts.concat())
        }
    }

    fn missing_text_reason(&self) -> String {
        if let Some(reason) = self
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_deref())
        {
            return format!("the prompt was blocked ({reason})");
        }
        match self
            .candidates
            .first()
            .and_then(|c| c.finish_reason.as_deref())
        {
            Some(reason) => format!("the response contained no text (finish reason: {reason})"),
            None => "the response contained no text".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct GeminiError {
    error: GeminiErrorBody,
}

#[derive(Debug, Deserialize)]
struct GeminiErrorBody {
    message: String,
    status: Option<String>,
}

/// Classifies a non-success response. Quota exhaustion is recognised by HTTP
/// 429 or by the `RESOURCE_EXHAUSTED` status in the error body.
fn classify_error(status: u16, body: &str) -> LlmError {
    let parsed = serde_json::from_str::<GeminiError>(body).ok();
    let api_status = parsed.as_ref().and_then(|e| e.error.status.clone());
    let message = parsed
        .map(|e| e.error.message)
        .unwrap_or_else(|| body.trim().to_string());

    if status == 429 || api_status.as_deref() == Some(QUOTA_STATUS) {
        LlmError::QuotaExceeded(message)
    } else {
        LlmError::Service { status, message }
    }
}

/// The error body to classify, or why it could not be read.
fn error_body_or_cause<E: std::fmt::Display>(read: Result<String, E>) -> String {
    read.unwrap_or_else(|e| format!("failed to read error body: {e}"))
}

// ────────────────────────────────────────────────────────────────────────────
// GeminiClient
// ────────────────────────────────────────────────────────────────────────────

/// Production generator backed by the Gemini `generateContent` endpoint.
/// One HTTP call per request; no retry, no backoff, no client-side timeout.
#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    api_key: String,
    endpoint: String,
    request_delay: Duration,
}

impl GeminiClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("aire-api/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            api_key: config.google_api_key.clone(),
            endpoint: endpoint_url(&config.gemini_api_base),
            request_delay: config.request_delay,
        })
    }
}

fn endpoint_url(api_base: &str) -> String {
    format!(
        "{}/v1beta/models/{MODEL}:generateContent",
        api_base.trim_end_matches('/')
    )
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, LlmError> {
        if !self.request_delay.is_zero() {
            tokio::time::sleep(self.request_delay).await;
        }

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                role: "user",
                parts: request
                    .parts()
                    .into_iter()
                    .map(|text| RequestPart { text })
                    .collect(),
            }],
        };

        debug!("Sending '{}' request to Gemini", request.action);
        let response = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = error_body_or_cause(response.text().await);
            let error = classify_error(status.as_u16(), &body);
            warn!("Gemini API returned {status}: {error}");
            return Err(error);
        }

        let body = response.text().await?;
        let parsed: GenerateContentResponse = serde_json::from_str(&body)
            .map_err(|e| LlmError::Unknown(format!("Unreadable Gemini response: {e}")))?;

        if let Some(usage) = &parsed.usage_metadata {
            debug!(
                "Gemini call succeeded: prompt_tokens={:?}, candidate_tokens={:?}",
                usage.prompt_token_count, usage.candidates_token_count
            );
        }

        parsed
            .text()
            .ok_or_else(|| LlmError::Unknown(parsed.missing_text_reason()))
    }
}


#[cfg(test)]
mod http_tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::post,
        Json, Router,
    };
    use serde_json::{json, Value};

    use super::*;
    use crate::analysis::action::AnalysisAction;
    use crate::analysis::prompts::MATCH_SCORE_PROMPT;
    use crate::config::Config;

    const GENERATE_PATH: &str = "/v1beta/models/gemini-1.5-pro:generateContent";

    #[derive(Clone, Default)]
    struct Captured {
        api_key: Arc<Mutex<Option<String>>>,
        body: Arc<Mutex<Option<Value>>>,
    }

    /// Serves one canned reply on the generateContent path and records the request.
    async fn stub_gemini(status: StatusCode, reply: &'static str) -> (String, Captured) {
        let captured = Captured::default();
        let app = Router::new()
            .route(
                GENERATE_PATH,
                post(
                    move |State(captured): State<Captured>,
                          headers: HeaderMap,
                          Json(body): Json<Value>| async move {
                        *captured.api_key.lock().unwrap() = headers
                            .get("x-goog-api-key")
                            .and_then(|v| v.to_str().ok())
                            .map(String::from);
                        *captured.body.lock().unwrap() = Some(body);
                        (status, reply)
                    },
                ),
            )
            .with_state(captured.clone());

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move { axum::serve(listener, app).await.unwrap() });

        (format!("http://{addr}"), captured)
    }

    fn client_for(api_base: String) -> GeminiClient {
        GeminiClient::new(&Config {
            google_api_key: "test-key".to_string(),
            gemini_api_base: api_base,
            request_delay: Duration::ZERO,
            max_upload_bytes: 1024,
            port: 0,
            rust_log: "debug".to_string(),
        })
        .unwrap()
    }

    fn match_score_request() -> GenerationRequest {
        GenerationRequest::assemble(
            AnalysisAction::MatchScore,
            "Backend engineer, Python, 3 years",
            "Jane Doe, 5 years Python backend experience",
        )
    }

    #[tokio::test]
    async fn test_success_returns_text_verbatim_and_sends_three_parts() {
        let (base, captured) = stub_gemini(
            StatusCode::OK,
            r#"{"candidates":[{"content":{"role":"model","parts":[{"text":"85%\n"},{"text":"Missing: Django"}]},"finishReason":"STOP"}]}"#,
        )
        .await;

        let text = client_for(base)
            .generate(&match_score_request())
            .await
            .unwrap();

        assert_eq!(text, "85%\nMissing: Django");
        assert_eq!(captured.api_key.lock().unwrap().as_deref(), Some("test-key"));
        let body = captured.body.lock().unwrap().clone().unwrap();
        assert_eq!(
            body,
            json!({"contents": [{"role": "user", "parts": [
                {"text": MATCH_SCORE_PROMPT},
                {"text": "Job Description:\nBackend engineer, Python, 3 years"},
                {"text": "Resume:\nJane Doe, 5 years Python backend experience"}
            ]}]})
        );
    }

    #[tokio::test]
    async fn test_http_429_resource_exhausted_is_quota_exceeded() {
        let (base, _) = stub_gemini(
            StatusCode::TOO_MANY_REQUESTS,
            r#"{"error":{"code":429,"message":"Resource has been exhausted","status":"RESOURCE_EXHAUSTED"}}"#,
        )
        .await;

        match client_for(base).generate(&match_score_request()).await {
            Err(LlmError::QuotaExceeded(message)) => {
                assert_eq!(message, "Resource has been exhausted")
            }
            other => panic!("expected QuotaExceeded, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_400_is_service_error() {
        let (base, _) = stub_gemini(
            StatusCode::BAD_REQUEST,
            r#"{"error":{"code":400,"message":"API key not valid","status":"INVALID_ARGUMENT"}}"#,
        )
        .await;

        match client_for(base).generate(&match_score_request()).await {
            Err(LlmError::Service { status, message }) => {
                assert_eq!(status, 400);
                assert_eq!(message, "API key not valid");
            }
            other => panic!("expected Service, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_unreadable_success_body_is_unknown() {
        let (base, _) = stub_gemini(StatusCode::OK, "not json").await;

        match client_for(base).generate(&match_score_request()).await {
            Err(LlmError::Unknown(cause)) => assert!(cause.contains("Unreadable Gemini response")),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_blocked_prompt_is_unknown() {
        let (base, _) = stub_gemini(StatusCode::OK, r#"{"promptFeedback":{"blockReason":"SAFETY"}}"#).await;

        match client_for(base).generate(&match_score_request()).await {
            Err(LlmError::Unknown(cause)) => assert!(cause.contains("SAFETY")),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_connection_failure_is_unknown() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        match client_for(format!("http://{addr}"))
            .generate(&match_score_request())
            .await
        {
            Err(LlmError::Unknown(cause)) => assert!(cause.starts_with("HTTP error")),
            other => panic!("expected Unknown, got {other:?}"),
        }
    }
}
