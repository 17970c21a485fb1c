//! Capture stream handles
//!
//! A `CaptureStream` is an owned handle over the live input tracks of a
//! capture device. Releasing the stream stops every track and frees the
//! underlying device; it happens at most once and also runs on drop, so no
//! exit path can leave the camera or microphone locked.

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Kind of media carried by a track
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrackKind {
    Video,
    Audio,
}

/// A single live input track (one camera or microphone signal)
#[derive(Debug, Clone)]
pub struct MediaTrack {
    kind: TrackKind,
    label: String,
    live: Arc<AtomicBool>,
}

impl MediaTrack {
    pub fn new(kind: TrackKind, label: impl Into<String>) -> Self {
        Self {
            kind,
            label: label.into(),
            live: Arc::new(AtomicBool::new(true)),
        }
    }

    pub fn kind(&self) -> TrackKind {
        self.kind
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether the track is still delivering media
    pub fn is_live(&self) -> bool {
        self.live.load(Ordering::Acquire)
    }

    /// Stop the track. Idempotent.
    pub fn stop(&self) {
        if self.live.swap(false, Ordering::AcqRel) {
            tracing::debug!(label = %self.label, kind = ?self.kind, "Track stopped");
        }
    }
}

/// Owned handle to a live set of input tracks
///
/// Exclusive by construction: whoever holds the stream holds the device.
/// `release` stops all tracks; it is idempotent and is also invoked on drop.
pub struct CaptureStream {
    id: uuid::Uuid,
    tracks: Vec<MediaTrack>,
    released: bool,
}

impl CaptureStream {
    pub fn new(tracks: Vec<MediaTrack>) -> Self {
        Self {
            id: uuid::Uuid::new_v4(),
            tracks,
            released: false,
        }
    }

    pub fn id(&self) -> uuid::Uuid {
        self.id
    }

    pub fn tracks(&self) -> &[MediaTrack] {
        &self.tracks
    }

    pub fn video_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind() == TrackKind::Video)
    }

    pub fn audio_tracks(&self) -> impl Iterator<Item = &MediaTrack> {
        self.tracks.iter().filter(|t| t.kind() == TrackKind::Audio)
    }

    /// Whether any track is still live
    pub fn is_live(&self) -> bool {
        self.tracks.iter().any(MediaTrack::is_live)
    }

    /// Stop every track and free the device. Idempotent.
    pub fn release(&mut self) {
        if self.released {
            return;
        }
        self.released = true;
        for track in &self.tracks {
            track.stop();
        }
        tracing::info!(stream = %self.id, "Capture stream released");
    }
}

impl Drop for CaptureStream {
    fn drop(&mut self) {
        self.release();
    }
}

impl std::fmt::Debug for CaptureStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CaptureStream")
            .field("id", &self.id)
            .field("tracks", &self.tracks.len())
            .field("live", &self.is_live())
            .finish()
    }
}
