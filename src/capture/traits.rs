//! Capture trait definitions
//!
//! Platform-agnostic traits for acquiring input streams and binding them to a
//! preview surface. The crate ships no device drivers; embedders implement
//! these against their platform capture subsystem.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::capture::stream::CaptureStream;
use crate::utils::error::CaptureError;

/// Video resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: u32,
    pub height: u32,
}

/// Constraints for a stream acquisition request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StreamConstraints {
    /// Requested video resolution, or `None` for an audio-only stream
    pub video: Option<Resolution>,

    /// Whether to capture microphone audio
    pub audio: bool,
}

impl Default for StreamConstraints {
    fn default() -> Self {
        Self {
            video: Some(Resolution {
                width: 1280,
                height: 720,
            }),
            audio: true,
        }
    }
}

/// Source of capture streams (camera + microphone)
///
/// Acquisition is exclusive: implementors may refuse a second live stream
/// until the previous `CaptureStream` has been released. Callers own the
/// returned handle and must let it release (explicitly or on drop) before
/// acquiring again.
#[async_trait]
pub trait CaptureSource: Send {
    /// Acquire a live stream matching `constraints`
    async fn acquire(
        &mut self,
        constraints: &StreamConstraints,
    ) -> Result<CaptureStream, CaptureError>;
}

/// Visible preview surface for an acquired stream
pub trait PreviewSink: Send {
    /// Bind the stream to the preview surface
    fn attach(&mut self, stream: &CaptureStream);

    /// Unbind the current stream, if any
    fn detach(&mut self);
}

/// Preview sink that renders nowhere, for headless embedders
#[derive(Debug, Default)]
pub struct NullPreview;

impl PreviewSink for NullPreview {
    fn attach(&mut self, stream: &CaptureStream) {
        tracing::debug!(stream = %stream.id(), "Preview attached (null sink)");
    }

    fn detach(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_constraints_request_hd_video_and_audio() {
        let c = StreamConstraints::default();
        assert_eq!(c.video, Some(Resolution { width: 1280, height: 720 }));
        assert!(c.audio);
    }

    #[test]
    fn constraints_serialize_camel_case() {
        let json = serde_json::to_value(StreamConstraints::default()).unwrap();
        assert!(json.get("video").is_some());
        assert_eq!(json["audio"], serde_json::Value::Bool(true));
    }
}
