//! Object-storage client
//!
//! HTTP client for an authenticated object store with a public-URL read side.
//! Writes are non-overwriting by default: a name collision fails instead of
//! silently replacing existing content.

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use crate::storage::config::StorageConfig;
use crate::utils::error::StorageError;

/// Options for a single upload
#[derive(Debug, Clone)]
pub struct UploadOptions {
    /// `Cache-Control` max-age forwarded to the store, in seconds
    pub cache_control: String,

    /// Whether an existing object at the same path may be replaced
    pub upsert: bool,

    /// MIME type of the uploaded bytes
    pub content_type: String,
}

impl Default for UploadOptions {
    fn default() -> Self {
        Self {
            cache_control: "3600".to_string(),
            upsert: false,
            content_type: "application/octet-stream".to_string(),
        }
    }
}

/// Write + public-URL boundary of the object store
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Store `bytes` at `path` inside `bucket`, returning the stored path.
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        options: &UploadOptions,
    ) -> Result<String, StorageError>;

    /// Resolve the public URL for an object. No request is made.
    fn public_url(&self, bucket: &str, path: &str) -> String;
}

/// HTTP implementation of [`ObjectStore`]
pub struct StorageClient {
    http: reqwest::Client,
    config: StorageConfig,
}

impl StorageClient {
    pub fn new(config: StorageConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &StorageConfig {
        &self.config
    }

    fn object_path(&self, bucket: &str, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/object/{}/{}",
            self.config.base_url,
            urlencoding::encode(bucket),
            encoded.join("/")
        )
    }
}

#[async_trait]
impl ObjectStore for StorageClient {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Bytes,
        options: &UploadOptions,
    ) -> Result<String, StorageError> {
        let url = self.object_path(bucket, path);
        tracing::debug!(%url, bytes = bytes.len(), upsert = options.upsert, "Uploading object");

        let response = self
            .http
            .post(&url)
            .bearer_auth(&self.config.anon_key)
            .header("apikey", &self.config.anon_key)
            .header("x-upsert", if options.upsert { "true" } else { "false" })
            .header("cache-control", &options.cache_control)
            .header(reqwest::header::CONTENT_TYPE, &options.content_type)
            .body(bytes)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            tracing::info!(%bucket, %path, "Object stored");
            Ok(path.to_string())
        } else {
            // Surface the service's message verbatim.
            let body = response.text().await.unwrap_or_default();
            let message = if body.is_empty() {
                status.to_string()
            } else {
                body
            };
            tracing::warn!(%bucket, %path, %status, "Upload rejected");
            Err(StorageError::Upload(message))
        }
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        let encoded: Vec<String> = path
            .split('/')
            .map(|segment| urlencoding::encode(segment).into_owned())
            .collect();
        format!(
            "{}/object/public/{}/{}",
            self.config.base_url,
            urlencoding::encode(bucket),
            encoded.join("/")
        )
    }
}

/// Generate a globally-unique object name with an extension derived from the
/// MIME type: `webm` when the MIME mentions webm, `mp4` otherwise.
pub fn object_name(mime_type: &str) -> String {
    let extension = if mime_type.contains("webm") {
        "webm"
    } else {
        "mp4"
    };
    format!("{}.{}", Uuid::new_v4().simple(), extension)
}
