//! Common test utilities
//!
//! Fake capture and encoder backends for driving the controller without real
//! devices. The fake camera enforces exclusive acquisition: it refuses a new
//! stream while tracks from the previous one are still live, which is what a
//! real device lock does.

use async_trait::async_trait;
use bytes::Bytes;
use std::time::Duration;
use tokio::sync::mpsc;

use clipcast::capture::{CaptureSource, CaptureStream, MediaTrack, StreamConstraints, TrackKind};
use clipcast::recorder::{EncoderFactory, EncodingOptions, SegmentEncoder};
use clipcast::utils::error::{CaptureError, RecorderError};

/// Camera that hands out two-track streams, one live stream at a time
pub struct FakeCamera {
    handed_out: Vec<MediaTrack>,
}

impl FakeCamera {
    pub fn new() -> Self {
        Self {
            handed_out: Vec::new(),
        }
    }
}

#[async_trait]
impl CaptureSource for FakeCamera {
    async fn acquire(
        &mut self,
        constraints: &StreamConstraints,
    ) -> Result<CaptureStream, CaptureError> {
        if self.handed_out.iter().any(MediaTrack::is_live) {
            return Err(CaptureError::DeviceUnavailable(
                "device is locked by a previous stream".into(),
            ));
        }

        let mut tracks = Vec::new();
        if constraints.video.is_some() {
            tracks.push(MediaTrack::new(TrackKind::Video, "fake camera"));
        }
        if constraints.audio {
            tracks.push(MediaTrack::new(TrackKind::Audio, "fake microphone"));
        }
        self.handed_out = tracks.clone();
        Ok(CaptureStream::new(tracks))
    }
}

/// Encoder that replays a scripted list of segments in order
pub struct ScriptedEncoder {
    mime_type: String,
    segments: Vec<Bytes>,
    tx: Option<mpsc::UnboundedSender<Bytes>>,
}

#[async_trait]
impl SegmentEncoder for ScriptedEncoder {
    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    async fn start(
        &mut self,
        _stream: &CaptureStream,
        _segment_interval: Duration,
    ) -> Result<mpsc::UnboundedReceiver<Bytes>, RecorderError> {
        let (tx, rx) = mpsc::unbounded_channel();
        for segment in self.segments.drain(..) {
            tx.send(segment).expect("receiver alive");
        }
        self.tx = Some(tx);
        Ok(rx)
    }

    async fn stop(&mut self) -> Result<(), RecorderError> {
        // Dropping the sender closes the channel, signalling the final
        // segment has been delivered.
        self.tx.take();
        Ok(())
    }
}

/// Factory producing [`ScriptedEncoder`]s with the same segment script
pub struct ScriptedEncoders {
    pub segments: Vec<Bytes>,
}

impl EncoderFactory for ScriptedEncoders {
    fn create(&self, options: &EncodingOptions) -> Result<Box<dyn SegmentEncoder>, RecorderError> {
        Ok(Box::new(ScriptedEncoder {
            mime_type: options.mime_type.clone(),
            segments: self.segments.clone(),
            tx: None,
        }))
    }
}
