//! Extraction service adapter.
//!
//! Wraps a multimodal chat model behind [`TextExtractor`]: transcribe the
//! text in a cropped image, and translate text into a target language.
//! Calls are single-shot; any upstream failure surfaces as one
//! [`ExtractionError`] and is never retried here.

pub mod config;
pub mod mock;
pub mod openai;
pub mod prompts;

use async_trait::async_trait;
use folio_core::language::LanguageTag;

pub use config::ExtractionConfig;
pub use mock::MockExtractor;
pub use openai::OpenAiExtractor;

/// Errors from the extraction layer.
#[derive(Debug, thiserror::Error)]
pub enum ExtractionError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("Extraction request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The model API returned a non-2xx status code.
    #[error("Extraction API error ({status}): {body}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Upstream error message or raw body.
        body: String,
    },

    /// The model API answered with something we could not interpret.
    #[error("Malformed extraction response: {0}")]
    MalformedResponse(String),

    /// Required configuration is missing or invalid.
    #[error("Extraction configuration error: {0}")]
    Config(String),
}

/// Turns images into text and text into other languages.
#[async_trait]
pub trait TextExtractor: Send + Sync {
    /// Literal transcription of the text in `image`.
    ///
    /// An empty string means the model found (or would return) nothing;
    /// callers treat it as a valid result.
    async fn transcribe(&self, image: &[u8], content_type: &str) -> Result<String, ExtractionError>;

    /// Translation of `text` into `target`, with no commentary.
    async fn translate(&self, text: &str, target: &LanguageTag) -> Result<String, ExtractionError>;
}
