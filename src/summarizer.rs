//! Summarizer client for the Gemini `generateContent` REST endpoint.
//!
//! The API key travels as the `key` query parameter, so request URLs are
//! stripped from every error this module produces.

use crate::config::GeminiConfig;
use crate::scraper::{self, FetchError, Fetcher};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

/// Returned when the API answers without a summary field
pub const NO_SUMMARY: &str = "No summary generated.";

#[derive(Error, Debug)]
pub enum SummarizerError {
    #[error("{0}")]
    Fetch(#[from] FetchError),
    #[error("invalid API endpoint: {0}")]
    Endpoint(#[from] url::ParseError),
    #[error("summary request failed: {0}")]
    Transport(reqwest::Error),
    #[error("summary request failed: server responded with {0}")]
    Status(StatusCode),
    #[error("failed to parse response: {0}")]
    ParseError(#[from] serde_json::Error),
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    contents: [Content<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Content<'a> {
    parts: [Part<'a>; 1],
}

#[derive(Debug, Serialize)]
struct Part<'a> {
    text: &'a str,
}

impl<'a> GenerateRequest<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            contents: [Content {
                parts: [Part { text }],
            }],
        }
    }
}

/// Client for a single configured model
#[derive(Debug, Clone)]
pub struct Summarizer {
    client: Client,
    endpoint: String,
}

impl Summarizer {
    /// Build a summarizer sharing the fetcher's HTTP client
    pub fn new(client: Client, config: &GeminiConfig) -> Self {
        let endpoint = format!(
            "{}/{}:generateContent",
            config.endpoint.trim_end_matches('/'),
            config.model
        );
        Self { client, endpoint }
    }

    /// Model endpoint without the key
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Summarize a text payload.
    ///
    /// `Ok` carries either the summary or [`NO_SUMMARY`]; `Err` means no
    /// summary could be obtained at all.
    pub async fn summarize_text(&self, text: &str, api_key: &str) -> Result<String, SummarizerError> {
        let result = self.request(text, api_key).await;
        if let Err(e) = &result {
            tracing::warn!("error during summary generation: {}", e);
        }
        result
    }

    /// Fetch a document and summarize its article text.
    ///
    /// Documents without article paragraphs are sent as their raw body.
    pub async fn summarize_document(
        &self,
        fetcher: &Fetcher,
        url: &Url,
        api_key: &str,
    ) -> Result<String, SummarizerError> {
        let body = match fetcher.fetch(url).await {
            Ok(fetched) => fetched.body,
            Err(e) => {
                tracing::warn!("error fetching article at {}: {}", url, e);
                return Err(e.into());
            }
        };
        let payload = scraper::article_text(&body).unwrap_or(body);
        self.summarize_text(&payload, api_key).await
    }

    async fn request(&self, text: &str, api_key: &str) -> Result<String, SummarizerError> {
        let url = Url::parse_with_params(&self.endpoint, &[("key", api_key)])?;
        tracing::debug!(endpoint = %self.endpoint, chars = text.len(), "requesting summary");

        let response = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .json(&GenerateRequest::new(text))
            .send()
            .await
            .map_err(|e| SummarizerError::Transport(e.without_url()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SummarizerError::Status(status));
        }

        let body = response
            .text()
            .await
            .map_err(|e| SummarizerError::Transport(e.without_url()))?;
        let value: Value = serde_json::from_str(&body)?;
        Ok(parse_summary(&value))
    }
}

/// Pull the summary out of a response body.
///
/// A top-level string `content` wins; otherwise the text parts of the first
/// Gemini candidate are joined; otherwise [`NO_SUMMARY`].
pub fn parse_summary(value: &Value) -> String {
    if let Some(content) = value.get("content").and_then(Value::as_str) {
        return content.to_string();
    }

    let candidate_text = value
        .pointer("/candidates/0/content/parts")
        .and_then(Value::as_array)
        .map(|parts| {
            parts
                .iter()
                .filter_map(|part| part.get("text").and_then(Value::as_str))
                .collect::<String>()
        })
        .filter(|text| !text.trim().is_empty());

    candidate_text.unwrap_or_else(|| NO_SUMMARY.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn content_field_is_returned() {
        assert_eq!(parse_summary(&json!({"content": "X"})), "X");
    }

    #[test]
    fn empty_object_gives_placeholder() {
        assert_eq!(parse_summary(&json!({})), NO_SUMMARY);
        assert_eq!(parse_summary(&json!({"content": {"parts": []}})), NO_SUMMARY);
    }

    #[test]
    fn gemini_candidates_are_read() {
        let response = json!({
            "candidates": [{
                "content": {"parts": [{"text": "First. "}, {"text": "Second."}], "role": "model"},
                "finishReason": "STOP"
            }]
        });
        assert_eq!(parse_summary(&response), "First. Second.");
    }

    #[test]
    fn request_body_shape() {
        let body = serde_json::to_value(GenerateRequest::new("payload")).unwrap();
        assert_eq!(body, json!({"contents": [{"parts": [{"text": "payload"}]}]}));
    }

    #[test]
    fn endpoint_joins_base_and_model() {
        let config = GeminiConfig {
            endpoint: "https://api.example.com/v1beta/models/".into(),
            model: "gemini-2.0-flash".into(),
            api_key: None,
        };
        let summarizer = Summarizer::new(Client::new(), &config);
        assert_eq!(
            summarizer.endpoint(),
            "https://api.example.com/v1beta/models/gemini-2.0-flash:generateContent"
        );
    }
}
