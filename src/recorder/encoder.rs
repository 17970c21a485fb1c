//! Encoder boundary
//!
//! The encoder turns a live capture stream into timestamped binary segments.
//! Implementations wrap a platform media encoder; the crate only relies on
//! the delivery contract: segments arrive in capture order on the returned
//! channel, and the channel closes once `stop` has flushed the final segment.

use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::capture::stream::CaptureStream;
use crate::utils::error::RecorderError;

/// Requested encoding for a recording session
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EncodingOptions {
    /// Container + codec identifier, e.g. `video/webm;codecs=vp8`
    pub mime_type: String,
}

impl Default for EncodingOptions {
    fn default() -> Self {
        Self {
            mime_type: "video/webm;codecs=vp8".to_string(),
        }
    }
}

/// Segment-producing media encoder bound to one capture stream
#[async_trait]
pub trait SegmentEncoder: Send {
    /// MIME type of the segments this encoder produces
    fn mime_type(&self) -> &str;

    /// Begin encoding `stream`, delivering segments at roughly
    /// `segment_interval` granularity. The interval is a buffering hint,
    /// not a correctness parameter.
    async fn start(
        &mut self,
        stream: &CaptureStream,
        segment_interval: Duration,
    ) -> Result<mpsc::UnboundedReceiver<Bytes>, RecorderError>;

    /// Stop encoding, flush any pending segment, and close the channel.
    async fn stop(&mut self) -> Result<(), RecorderError>;
}

/// Creates a fresh encoder per recording session
pub trait EncoderFactory: Send {
    fn create(&self, options: &EncodingOptions) -> Result<Box<dyn SegmentEncoder>, RecorderError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_encoding_is_vp8_webm() {
        let options = EncodingOptions::default();
        assert!(options.mime_type.contains("webm"));
        assert!(options.mime_type.contains("vp8"));
    }
}
