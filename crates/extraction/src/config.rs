use crate::ExtractionError;

/// Model API settings loaded from environment variables.
///
/// | Env Var                   | Default                      |
/// |---------------------------|------------------------------|
/// | `OPENAI_API_KEY`          | required                     |
/// | `OPENAI_BASE_URL`         | `https://api.openai.com/v1`  |
/// | `TRANSCRIPTION_MODEL`     | `gpt-4o`                     |
/// | `TRANSLATION_MODEL`       | `gpt-4o`                     |
/// | `EXTRACTION_TIMEOUT_SECS` | `120`                        |
/// | `EXTRACTION_MAX_TOKENS`   | `4000`                       |
#[derive(Clone)]
pub struct ExtractionConfig {
    pub api_key: String,
    pub base_url: String,
    pub transcription_model: String,
    pub translation_model: String,
    pub timeout_secs: u64,
    pub max_tokens: u32,
}

impl std::fmt::Debug for ExtractionConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractionConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("transcription_model", &self.transcription_model)
            .field("translation_model", &self.translation_model)
            .field("timeout_secs", &self.timeout_secs)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

impl ExtractionConfig {
    pub fn from_env() -> Result<Self, ExtractionError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ExtractionError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let api_key = get("OPENAI_API_KEY")
            .ok_or_else(|| ExtractionError::Config("OPENAI_API_KEY must be set".into()))?;

        let timeout_secs = match get("EXTRACTION_TIMEOUT_SECS") {
            Some(raw) => raw.parse().map_err(|_| {
                ExtractionError::Config("EXTRACTION_TIMEOUT_SECS must be a valid u64".into())
            })?,
            None => 120,
        };
        let max_tokens = match get("EXTRACTION_MAX_TOKENS") {
            Some(raw) => raw.parse().map_err(|_| {
                ExtractionError::Config("EXTRACTION_MAX_TOKENS must be a valid u32".into())
            })?,
            None => 4000,
        };

        Ok(Self {
            api_key,
            base_url: get("OPENAI_BASE_URL").unwrap_or_else(|| "https://api.openai.com/v1".into()),
            transcription_model: get("TRANSCRIPTION_MODEL").unwrap_or_else(|| "gpt-4o".into()),
            translation_model: get("TRANSLATION_MODEL").unwrap_or_else(|| "gpt-4o".into()),
            timeout_secs,
            max_tokens,
        })
    }
}
