//! Mock extractor for testing.
//!
//! Returns canned replies and records every call so tests can assert on
//! what the pipeline sent to the model.
//!
//! ```rust,ignore
//! let extractor = MockExtractor::new("Hello", "Bonjour");
//! // ... run the pipeline ...
//! assert_eq!(extractor.calls().len(), 2);
//! ```

use std::sync::Mutex;

use async_trait::async_trait;
use folio_core::language::LanguageTag;

use crate::{ExtractionError, TextExtractor};

/// One recorded call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MockCall {
    Transcribe { image: Vec<u8>, content_type: String },
    Translate { text: String, language: String },
}

/// Canned-response [`TextExtractor`].
pub struct MockExtractor {
    transcript: String,
    translation: String,
    fail_transcribe: bool,
    fail_translate: bool,
    calls: Mutex<Vec<MockCall>>,
}

impl MockExtractor {
    pub fn new(transcript: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            transcript: transcript.into(),
            translation: translation.into(),
            fail_transcribe: false,
            fail_translate: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Make `transcribe` fail with an upstream API error.
    pub fn failing_transcribe(mut self) -> Self {
        self.fail_transcribe = true;
        self
    }

    /// Make `translate` fail with an upstream API error.
    pub fn failing_translate(mut self) -> Self {
        self.fail_translate = true;
        self
    }

    /// Every call made so far, in order.
    pub fn calls(&self) -> Vec<MockCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: MockCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

fn upstream_failure() -> ExtractionError {
    ExtractionError::Api {
        status: 503,
        body: "mock upstream unavailable".into(),
    }
}

#[async_trait]
impl TextExtractor for MockExtractor {
    async fn transcribe(&self, image: &[u8], content_type: &str) -> Result<String, ExtractionError> {
        self.record(MockCall::Transcribe {
            image: image.to_vec(),
            content_type: content_type.to_string(),
        });
        if self.fail_transcribe {
            return Err(upstream_failure());
        }
        Ok(self.transcript.clone())
    }

    async fn translate(&self, text: &str, target: &LanguageTag) -> Result<String, ExtractionError> {
        self.record(MockCall::Translate {
            text: text.to_string(),
            language: target.to_string(),
        });
        if self.fail_translate {
            return Err(upstream_failure());
        }
        Ok(self.translation.clone())
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    #[tokio::test]
    async fn records_calls_in_order() {
        let mock = MockExtractor::new("Hallo", "Bonjour");
        let fr = LanguageTag::parse("fr").unwrap();

        assert_eq!(mock.transcribe(&[9, 9], "image/png").await.unwrap(), "Hallo");
        assert_eq!(mock.translate("Hallo", &fr).await.unwrap(), "Bonjour");

        assert_eq!(
            mock.calls(),
            vec![
                MockCall::Transcribe {
                    image: vec![9, 9],
                    content_type: "image/png".into()
                },
                MockCall::Translate {
                    text: "Hallo".into(),
                    language: "fr".into()
                },
            ]
        );
    }

    #[tokio::test]
    async fn failures_are_api_errors() {
        let mock = MockExtractor::new("a", "b").failing_translate();
        let de = LanguageTag::parse("de").unwrap();
        assert!(mock.transcribe(&[], "image/png").await.is_ok());
        assert_matches!(
            mock.translate("a", &de).await,
            Err(ExtractionError::Api { status: 503, .. })
        );
    }
}
