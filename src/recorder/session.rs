//! Recording sessions
//!
//! A `RecordingSession` binds one encoder to one capture stream, buffers the
//! segments the encoder delivers, and finalizes them into a single
//! `RecordedArtifact` on stop. Stopping also releases every track of the
//! bound stream, so the device is free for the next acquisition.

use bytes::{Bytes, BytesMut};
use std::time::Duration;
use tokio::sync::mpsc;

use crate::capture::stream::CaptureStream;
use crate::recorder::encoder::SegmentEncoder;
use crate::recorder::state::RecordedArtifact;
use crate::utils::error::RecorderError;

/// One in-flight recording: encoder + stream + buffered segments
pub struct RecordingSession {
    encoder: Box<dyn SegmentEncoder>,
    stream: CaptureStream,
    segments: mpsc::UnboundedReceiver<Bytes>,
    stopped: bool,
}

impl RecordingSession {
    /// Start encoding `stream`. On failure the stream is dropped, which
    /// releases its tracks.
    pub async fn start(
        mut encoder: Box<dyn SegmentEncoder>,
        stream: CaptureStream,
        segment_interval: Duration,
    ) -> Result<Self, RecorderError> {
        let segments = encoder.start(&stream, segment_interval).await?;
        tracing::info!(
            stream = %stream.id(),
            mime = encoder.mime_type(),
            interval_ms = segment_interval.as_millis() as u64,
            "Recording session started"
        );
        Ok(Self {
            encoder,
            stream,
            segments,
            stopped: false,
        })
    }

    /// Stop the session and finalize the artifact.
    ///
    /// The first call stops the encoder, drains every remaining segment in
    /// arrival order, releases the stream's tracks, and returns the
    /// artifact. Zero buffered segments finalize into a zero-length artifact
    /// of the declared MIME type. Calling again is a no-op returning `None`.
    pub async fn stop(&mut self) -> Result<Option<RecordedArtifact>, RecorderError> {
        if self.stopped {
            return Ok(None);
        }
        self.stopped = true;

        let stop_result = self.encoder.stop().await;
        // Free the device whether or not the encoder shut down cleanly.
        self.stream.release();
        stop_result?;

        let mut buffer = BytesMut::new();
        let mut segment_count = 0usize;
        while let Some(segment) = self.segments.recv().await {
            buffer.extend_from_slice(&segment);
            segment_count += 1;
        }

        let artifact = RecordedArtifact::new(buffer.freeze(), self.encoder.mime_type());
        tracing::info!(
            segments = segment_count,
            bytes = artifact.len(),
            mime = artifact.mime_type(),
            "Recording session finalized"
        );
        Ok(Some(artifact))
    }

    /// Whether the session has already been stopped
    pub fn is_stopped(&self) -> bool {
        self.stopped
    }
}
