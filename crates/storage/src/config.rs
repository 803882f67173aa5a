use crate::StorageError;

/// S3 connection settings loaded from environment variables.
///
/// | Env Var                 | Required |
/// |-------------------------|----------|
/// | `AWS_REGION`            | yes      |
/// | `AWS_ACCESS_KEY_ID`     | yes      |
/// | `AWS_SECRET_ACCESS_KEY` | yes      |
/// | `AWS_BUCKET_NAME`       | yes      |
/// | `S3_PUBLIC_BASE_URL`    | no       |
#[derive(Clone)]
pub struct StorageConfig {
    pub region: String,
    pub access_key_id: String,
    pub secret_access_key: String,
    pub bucket: String,
    /// Base URL objects are publicly served from, e.g. a CDN in front of
    /// the bucket.
    pub public_base_url: Option<String>,
}

impl std::fmt::Debug for StorageConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorageConfig")
            .field("region", &self.region)
            .field("access_key_id", &self.access_key_id)
            .field("secret_access_key", &"<redacted>")
            .field("bucket", &self.bucket)
            .field("public_base_url", &self.public_base_url)
            .finish()
    }
}

impl StorageConfig {
    /// Load from the process environment. Any missing credential is an error
    /// so the server refuses to start half-configured.
    pub fn from_env() -> Result<Self, StorageError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load using an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, StorageError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
                .ok_or_else(|| StorageError::Config(format!("{name} must be set")))
        };

        Ok(Self {
            region: required("AWS_REGION")?,
            access_key_id: required("AWS_ACCESS_KEY_ID")?,
            secret_access_key: required("AWS_SECRET_ACCESS_KEY")?,
            bucket: required("AWS_BUCKET_NAME")?,
            public_base_url: lookup("S3_PUBLIC_BASE_URL")
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use assert_matches::assert_matches;

    use super::*;

    fn env(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn loads_all_fields() {
        let vars = env(&[
            ("AWS_REGION", "eu-west-3"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_BUCKET_NAME", "gazettes"),
            ("S3_PUBLIC_BASE_URL", "https://cdn.example.com"),
        ]);
        let config = StorageConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert_eq!(config.region, "eu-west-3");
        assert_eq!(config.bucket, "gazettes");
        assert_eq!(config.public_base_url.as_deref(), Some("https://cdn.example.com"));
    }

    #[test]
    fn missing_credential_fails() {
        let vars = env(&[
            ("AWS_REGION", "eu-west-3"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_BUCKET_NAME", "gazettes"),
        ]);
        let err = StorageConfig::from_lookup(|k| vars.get(k).cloned()).unwrap_err();
        assert_matches!(err, StorageError::Config(msg) if msg.contains("AWS_SECRET_ACCESS_KEY"));
    }

    #[test]
    fn blank_values_count_as_missing() {
        let vars = env(&[
            ("AWS_REGION", "  "),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "secret"),
            ("AWS_BUCKET_NAME", "gazettes"),
        ]);
        assert!(StorageConfig::from_lookup(|k| vars.get(k).cloned()).is_err());
    }

    #[test]
    fn debug_redacts_secret() {
        let vars = env(&[
            ("AWS_REGION", "eu-west-3"),
            ("AWS_ACCESS_KEY_ID", "AKIA"),
            ("AWS_SECRET_ACCESS_KEY", "hunter2"),
            ("AWS_BUCKET_NAME", "gazettes"),
        ]);
        let config = StorageConfig::from_lookup(|k| vars.get(k).cloned()).unwrap();
        assert!(!format!("{config:?}").contains("hunter2"));
    }
}
