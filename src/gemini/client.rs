use std::time::Duration;

use base64::{engine::general_purpose, Engine as _};
use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::Config;

/// Everything that can go wrong during one generation attempt
///
/// There is no retry; each variant is terminal for the attempt and the user
/// re-triggers generation manually.
#[derive(Debug, Clone, Error)]
pub enum GenerationError {
    #[error("The image service could not be reached: {0}")]
    Transport(String),
    #[error("The image service returned status {status}: {detail}")]
    Service { status: StatusCode, detail: String },
    #[error("No image data found in the generation response")]
    NoImageInResponse,
    #[error("The generated image payload could not be decoded")]
    InvalidImagePayload,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    parts: Option<Vec<Part>>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Part {
    InlineData {
        #[serde(rename = "inlineData")]
        inline_data: InlineData,
    },
    Text {
        text: String,
    },
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    #[allow(dead_code)]
    mime_type: String,
    data: String,
}

/// Client for the Gemini image generation endpoint
///
/// Holds the shared HTTP connection pool, the ambient API key, and the model
/// name. Cheap to clone; each generation sends exactly one request.
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GenerationClient {
    /// Build the client from process configuration
    ///
    /// Panics when the TLS backend cannot be initialized; the app cannot
    /// function without an HTTP client.
    pub fn new(config: &Config) -> Self {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        GenerationClient {
            http,
            api_key: config.gemini_api_key.clone(),
            model: config.gemini_image_model.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Generate a headshot from an encoded selfie and a composed instruction
    ///
    /// Sends one generateContent request and returns the decoded bytes of
    /// the first inline image in the response.
    pub async fn generate(
        &self,
        encoded_image: &str,
        media_type: &str,
        instruction: &str,
    ) -> Result<Vec<u8>, GenerationError> {
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);
        let payload = build_payload(encoded_image, media_type, instruction);

        debug!(
            target: "gemini",
            model = %self.model,
            media_type,
            payload_len = encoded_image.len(),
            "sending generation request"
        );

        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|err| self.transport_error(err))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = summarize_error_body(&body);
            warn!(target: "gemini", %status, %detail, "generation request failed");
            return Err(GenerationError::Service { status, detail });
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|err| self.transport_error(err))?;

        let encoded = first_inline_image(parsed).ok_or(GenerationError::NoImageInResponse)?;
        general_purpose::STANDARD
            .decode(encoded)
            .map_err(|_| GenerationError::InvalidImagePayload)
    }

    fn transport_error(&self, err: reqwest::Error) -> GenerationError {
        // reqwest errors can embed the request URL; never leak the key
        GenerationError::Transport(redact(&err.to_string(), &self.api_key))
    }
}

/// Build the generateContent request body
///
/// The image part comes first and the instruction second, and the response
/// is constrained to image output.
fn build_payload(encoded_image: &str, media_type: &str, instruction: &str) -> Value {
    json!({
        "contents": [{
            "role": "user",
            "parts": [
                { "inlineData": { "mimeType": media_type, "data": encoded_image } },
                { "text": instruction }
            ]
        }],
        "generationConfig": {
            "responseModalities": ["IMAGE"]
        }
    })
}

/// Return the first inline image payload, scanning parts in response order
fn first_inline_image(response: GenerateResponse) -> Option<String> {
    for candidate in response.candidates.unwrap_or_default() {
        let Some(content) = candidate.content else {
            continue;
        };
        for part in content.parts.unwrap_or_default() {
            if let Part::InlineData { inline_data } = part {
                return Some(inline_data.data);
            }
        }
    }
    None
}

/// Pull a human-readable message out of an error response body
///
/// The API reports failures as `{"error": {"message": ...}}`; anything else
/// is passed through truncated.
fn summarize_error_body(body: &str) -> String {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }

    if let Ok(value) = serde_json::from_str::<Value>(trimmed) {
        if let Some(message) = value.pointer("/error/message").and_then(|v| v.as_str()) {
            return message.to_string();
        }
    }

    truncate_for_log(trimmed, 500)
}

fn truncate_for_log(value: &str, limit: usize) -> String {
    if value.chars().count() <= limit {
        return value.to_string();
    }
    let truncated: String = value.chars().take(limit).collect();
    format!("{truncated}... (truncated)")
}

fn redact(text: &str, api_key: &str) -> String {
    let key = api_key.trim();
    if key.is_empty() {
        return text.to_string();
    }
    text.replace(key, "[redacted]")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(json_body: &str) -> GenerateResponse {
        serde_json::from_str(json_body).unwrap()
    }

    #[test]
    fn test_payload_shape() {
        let payload = build_payload("QUJD", "image/jpeg", "make it professional");
        let parts = payload
            .pointer("/contents/0/parts")
            .and_then(|v| v.as_array())
            .unwrap();
        assert_eq!(parts.len(), 2);
        // Image part first, instruction second
        assert_eq!(
            parts[0].pointer("/inlineData/mimeType").unwrap(),
            "image/jpeg"
        );
        assert_eq!(parts[0].pointer("/inlineData/data").unwrap(), "QUJD");
        assert_eq!(parts[1]["text"], "make it professional");
        assert_eq!(
            payload.pointer("/generationConfig/responseModalities/0").unwrap(),
            "IMAGE"
        );
    }

    #[test]
    fn test_first_inline_image_skips_text_parts() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            { "text": "Here is your headshot." },
                            { "inlineData": { "mimeType": "image/png", "data": "Zmlyc3Q=" } },
                            { "inlineData": { "mimeType": "image/png", "data": "c2Vjb25k" } }
                        ]
                    }
                }]
            }"#,
        );
        assert_eq!(first_inline_image(response).as_deref(), Some("Zmlyc3Q="));
    }

    #[test]
    fn test_no_inline_image_in_response() {
        let response = parse(
            r#"{
                "candidates": [{
                    "content": { "parts": [{ "text": "I cannot do that." }] }
                }]
            }"#,
        );
        assert!(first_inline_image(response).is_none());
    }

    #[test]
    fn test_empty_candidates() {
        assert!(first_inline_image(parse(r#"{}"#)).is_none());
        assert!(first_inline_image(parse(r#"{"candidates": []}"#)).is_none());
    }

    #[test]
    fn test_error_body_message_extraction() {
        let body = r#"{"error": {"code": 429, "message": "rate limited", "status": "RESOURCE_EXHAUSTED"}}"#;
        assert_eq!(summarize_error_body(body), "rate limited");
    }

    #[test]
    fn test_error_body_passthrough() {
        assert_eq!(summarize_error_body("service unavailable"), "service unavailable");
        assert_eq!(summarize_error_body("   "), "empty response body");
    }

    #[test]
    fn test_redact_api_key() {
        let redacted = redact("error calling https://api?key=sk-secret-123", "sk-secret-123");
        assert_eq!(redacted, "error calling https://api?key=[redacted]");
        // An empty key must not blow up the replacement
        assert_eq!(redact("unchanged", ""), "unchanged");
    }
}
