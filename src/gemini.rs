use reqwest::StatusCode;
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};

use crate::config::GeminiConfig;
use crate::error::SessionError;

/// Single-shot prompt completion. Each prompt is self-contained.
pub trait CompletionClient: Send + Sync {
    fn complete(&self, prompt: &str) -> Result<String, SessionError>;
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: Client,
    api_key: String,
    model: String,
    endpoint: String,
}

impl GeminiClient {
    pub fn new(config: &GeminiConfig) -> Result<Self, SessionError> {
        if config.api_key.trim().is_empty() {
            return Err(SessionError::Transport("API key is required".to_string()));
        }
        let http = Client::builder()
            .timeout(config.request_timeout())
            .build()
            .map_err(|err| {
                SessionError::Transport(format!("failed to create HTTP client: {err}"))
            })?;
        tracing::info!(model = %config.model, "gemini client initialized");
        Ok(Self {
            http,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        })
    }

    pub fn generate_url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

impl CompletionClient for GeminiClient {
    fn complete(&self, prompt: &str) -> Result<String, SessionError> {
        let response = self
            .http
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&GenerateRequest::from_prompt(prompt))
            .send()
            .map_err(|err| SessionError::Transport(format!("failed to generate content: {err}")))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|err| SessionError::Transport(format!("failed to read response: {err}")))?;
        if !status.is_success() {
            return Err(SessionError::Transport(format!(
                "HTTP {status}: {}",
                parse_error_message(status, &body)
            )));
        }
        extract_text(&body)
    }
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<RequestContent<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn from_prompt(prompt: &'a str) -> Self {
        Self {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        }
    }
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorPayload {
    error: Option<ErrorFields>,
}

#[derive(Debug, Deserialize)]
struct ErrorFields {
    message: Option<String>,
}

/// Text of the first part of the first candidate.
fn extract_text(body: &str) -> Result<String, SessionError> {
    let parsed: GenerateResponse = serde_json::from_str(body)
        .map_err(|err| SessionError::Transport(format!("malformed response: {err}")))?;
    parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or_else(|| SessionError::Transport("no text content found in response".to_string()))
}

fn parse_error_message(status: StatusCode, body: &str) -> String {
    let fallback = || {
        if body.trim().is_empty() {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        } else {
            body.trim().to_string()
        }
    };
    serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.error)
        .and_then(|fields| fields.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(fallback)
}
