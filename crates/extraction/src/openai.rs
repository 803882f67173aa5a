//! OpenAI chat-completions backend.

use std::time::Duration;

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use folio_core::language::LanguageTag;
use serde::Deserialize;
use serde_json::json;

use crate::prompts::{translation_instruction, TRANSCRIPTION_INSTRUCTION};
use crate::{ExtractionConfig, ExtractionError, TextExtractor};

/// HTTP client for the chat-completions endpoint.
pub struct OpenAiExtractor {
    client: reqwest::Client,
    config: ExtractionConfig,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl OpenAiExtractor {
    /// Build a client whose every request is bounded by
    /// `config.timeout_secs`.
    pub fn new(config: ExtractionConfig) -> Result<Self, ExtractionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    async fn complete(&self, body: serde_json::Value) -> Result<String, ExtractionError> {
        let response = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        completion_text(status, text)
    }
}

/// Turn a finished chat-completions exchange into the model's text.
///
/// Non-2xx replies become [`ExtractionError::Api`] carrying OpenAI's
/// `error.message` when the body has one, else the raw body.
fn completion_text(status: reqwest::StatusCode, body: String) -> Result<String, ExtractionError> {
    if !status.is_success() {
        return Err(ExtractionError::Api {
            status: status.as_u16(),
            body: api_error_message(&body).unwrap_or(body),
        });
    }
    parse_completion(&body)
}

/// Pull the first choice's content out of a chat-completions body.
///
/// A `null` content (the model declined) is an empty result, not an error.
fn parse_completion(body: &str) -> Result<String, ExtractionError> {
    let payload: ChatResponse = serde_json::from_str(body)
        .map_err(|e| ExtractionError::MalformedResponse(format!("invalid JSON: {e}")))?;
    let choice = payload
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| ExtractionError::MalformedResponse("no choices returned".into()))?;
    Ok(choice.message.content.unwrap_or_default().trim().to_string())
}

/// `error.message` from an OpenAI error body, if present.
fn api_error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_string)
}

#[async_trait]
impl TextExtractor for OpenAiExtractor {
    async fn transcribe(&self, image: &[u8], content_type: &str) -> Result<String, ExtractionError> {
        let data_url = format!("data:{content_type};base64,{}", BASE64.encode(image));
        let body = json!({
            "model": self.config.transcription_model,
            "max_tokens": self.config.max_tokens,
            "messages": [{
                "role": "user",
                "content": [
                    { "type": "text", "text": TRANSCRIPTION_INSTRUCTION },
                    { "type": "image_url", "image_url": { "url": data_url, "detail": "auto" } }
                ]
            }]
        });

        tracing::debug!(
            model = %self.config.transcription_model,
            image_bytes = image.len(),
            "Requesting transcription"
        );
        self.complete(body).await
    }

    async fn translate(&self, text: &str, target: &LanguageTag) -> Result<String, ExtractionError> {
        let body = json!({
            "model": self.config.translation_model,
            "max_tokens": self.config.max_tokens,
            "messages": [{
                "role": "user",
                "content": translation_instruction(text, target)
            }]
        });

        tracing::debug!(
            model = %self.config.translation_model,
            language = %target,
            chars = text.len(),
            "Requesting translation"
        );
        self.complete(body).await
    }
}
