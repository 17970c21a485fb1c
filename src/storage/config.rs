//! Storage configuration
//!
//! The storage endpoint and anonymous key are externally supplied; absence of
//! either is a fatal startup condition.

use serde::{Deserialize, Serialize};

use crate::utils::error::StorageError;

/// Environment variable holding the storage base endpoint
pub const ENV_STORAGE_URL: &str = "CLIPCAST_STORAGE_URL";

/// Environment variable holding the anonymous access key
pub const ENV_STORAGE_KEY: &str = "CLIPCAST_STORAGE_KEY";

/// Logical container clips are uploaded into
pub const DEFAULT_BUCKET: &str = "videos";

/// Connection settings for the object store
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Base endpoint of the storage service, without a trailing slash
    pub base_url: String,

    /// Anonymous access key sent with every request
    pub anon_key: String,

    /// Bucket clips are written to
    pub bucket: String,
}

impl StorageConfig {
    pub fn new(base_url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            anon_key: anon_key.into(),
            bucket: DEFAULT_BUCKET.to_string(),
        }
    }

    /// Read the endpoint and key from the environment.
    pub fn from_env() -> Result<Self, StorageError> {
        let base_url =
            std::env::var(ENV_STORAGE_URL).map_err(|_| StorageError::MissingConfig(ENV_STORAGE_URL))?;
        let anon_key =
            std::env::var(ENV_STORAGE_KEY).map_err(|_| StorageError::MissingConfig(ENV_STORAGE_KEY))?;
        Ok(Self::new(base_url, anon_key))
    }

    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.bucket = bucket.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_strips_trailing_slash() {
        let config = StorageConfig::new("https://store.example.com/", "anon");
        assert_eq!(config.base_url, "https://store.example.com");
        assert_eq!(config.bucket, DEFAULT_BUCKET);
    }

    #[test]
    fn with_bucket_overrides_default() {
        let config = StorageConfig::new("https://store.example.com", "anon").with_bucket("clips");
        assert_eq!(config.bucket, "clips");
    }
}
