//! Recorder state management
//!
//! Defines the recorder state machine vocabulary and the artifacts it
//! produces.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::capture::traits::StreamConstraints;
use crate::recorder::encoder::EncodingOptions;

/// Current state of the recorder controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecorderState {
    /// No stream acquired, nothing recorded
    Idle,
    /// A live stream is acquired and previewing
    StreamReady,
    /// A recording session is active
    Recording,
    /// A finalized clip is held, pending upload or discard
    Recorded,
    /// An upload of the held clip is in flight
    Uploading,
}

impl Default for RecorderState {
    fn default() -> Self {
        Self::Idle
    }
}

/// A finalized recording: immutable bytes plus MIME type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedArtifact {
    bytes: bytes::Bytes,
    mime_type: String,
    recorded_at: DateTime<Utc>,
}

impl RecordedArtifact {
    pub fn new(bytes: bytes::Bytes, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
            recorded_at: Utc::now(),
        }
    }

    pub fn bytes(&self) -> &bytes::Bytes {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &str {
        &self.mime_type
    }

    pub fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }
}

/// Result of a completed upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadOutcome {
    /// Object path inside the bucket
    pub path: String,

    /// Publicly resolvable URL for the stored object
    pub public_url: String,
}

/// Configuration for the recorder controller
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecorderConfig {
    /// Constraints used for every stream acquisition
    pub constraints: StreamConstraints,

    /// Encoding requested for recording sessions
    pub encoding: EncodingOptions,

    /// Segment buffering granularity hint in milliseconds
    pub segment_interval_ms: u64,
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            constraints: StreamConstraints::default(),
            encoding: EncodingOptions::default(),
            segment_interval_ms: 1000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn artifact_reports_length_and_mime() {
        let artifact = RecordedArtifact::new(bytes::Bytes::from(vec![0u8; 42]), "video/webm");
        assert_eq!(artifact.len(), 42);
        assert!(!artifact.is_empty());
        assert_eq!(artifact.mime_type(), "video/webm");
    }

    #[test]
    fn state_serializes_lowercase() {
        let json = serde_json::to_string(&RecorderState::StreamReady).unwrap();
        assert_eq!(json, "\"streamready\"");
    }

    #[test]
    fn default_config_uses_one_second_segments() {
        let config = RecorderConfig::default();
        assert_eq!(config.segment_interval_ms, 1000);
    }
}
