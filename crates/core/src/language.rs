//! Target-language tags for translations.
//!
//! A [`LanguageTag`] is a lower-cased BCP 47 style tag (`fr`, `de`,
//! `pt-br`). Only the syntax is checked; any well-formed tag may be
//! requested from the translation model.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// English names for the languages the canvas offers, used when wording
/// translation instructions for the model.
const KNOWN_LANGUAGES: &[(&str, &str)] = &[
    ("de", "German"),
    ("en", "English"),
    ("es", "Spanish"),
    ("fr", "French"),
    ("it", "Italian"),
    ("la", "Latin"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("pt", "Portuguese"),
    ("ru", "Russian"),
    ("yi", "Yiddish"),
];

/// A validated, normalised language tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LanguageTag(String);

impl LanguageTag {
    /// Parse and normalise a tag.
    ///
    /// The primary subtag must be 2-3 ASCII letters; optional further
    /// subtags are 1-8 ASCII alphanumerics separated by `-` (or `_`).
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let normalised = raw.trim().to_ascii_lowercase().replace('_', "-");
        let mut parts = normalised.split('-');

        let primary = parts.next().unwrap_or_default();
        if !(2..=3).contains(&primary.len()) || !primary.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(invalid(raw));
        }
        for sub in parts {
            if !(1..=8).contains(&sub.len()) || !sub.chars().all(|c| c.is_ascii_alphanumeric()) {
                return Err(invalid(raw));
            }
        }

        Ok(Self(normalised))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The primary language subtag (`pt` for `pt-br`).
    pub fn primary(&self) -> &str {
        self.0.split('-').next().unwrap_or(&self.0)
    }

    /// Human-readable English name, falling back to the tag itself.
    pub fn english_name(&self) -> &str {
        KNOWN_LANGUAGES
            .iter()
            .find(|(code, _)| *code == self.primary())
            .map(|(_, name)| *name)
            .unwrap_or(self.as_str())
    }
}

fn invalid(raw: &str) -> CoreError {
    CoreError::Validation(format!("Invalid language tag '{raw}'"))
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for LanguageTag {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<LanguageTag> for String {
    fn from(tag: LanguageTag) -> Self {
        tag.0
    }
}
