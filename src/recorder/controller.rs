//! Recorder controller
//!
//! Orchestrates stream acquisition, the recording session, and the upload of
//! the finalized clip. The controller is an explicit state machine: every
//! action checks the transition table and rejects invalid moves with a typed
//! error, independent of whatever guards the presentation layer applies.

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;

use crate::capture::stream::CaptureStream;
use crate::capture::traits::{CaptureSource, PreviewSink};
use crate::recorder::encoder::EncoderFactory;
use crate::recorder::session::RecordingSession;
use crate::recorder::state::{RecordedArtifact, RecorderConfig, RecorderState, UploadOutcome};
use crate::storage::client::{object_name, ObjectStore, UploadOptions};
use crate::utils::error::{AppError, AppResult, RecorderError};

/// Events emitted by the controller
#[derive(Debug, Clone)]
pub enum RecorderEvent {
    /// A live stream was acquired and attached to the preview
    StreamAcquired,
    /// Recording started
    Started,
    /// Recording stopped, a clip is held
    Stopped,
    /// Upload of the held clip started
    UploadStarted,
    /// Upload completed
    Uploaded { path: String, url: String },
    /// Upload was rejected by the store
    UploadFailed(String),
    /// Error occurred
    Error(String),
}

/// Drives the record/upload flow over the capture, encoder, and storage
/// boundaries
pub struct RecorderController {
    /// Current controller state
    state: Arc<RwLock<RecorderState>>,

    /// Human-readable status line for the presentation layer
    status: Arc<RwLock<String>>,

    config: RecorderConfig,

    source: Box<dyn CaptureSource>,
    encoders: Box<dyn EncoderFactory>,
    preview: Box<dyn PreviewSink>,
    store: Arc<dyn ObjectStore>,

    /// Bucket uploads are written to
    bucket: String,

    /// Live stream while previewing (moves into the session when recording)
    stream: Option<CaptureStream>,

    /// Active recording session, at most one system-wide
    session: Option<RecordingSession>,

    /// Finalized clip pending upload or discard
    artifact: Option<RecordedArtifact>,

    /// Event broadcaster
    event_tx: broadcast::Sender<RecorderEvent>,
}

impl RecorderController {
    pub fn new(
        config: RecorderConfig,
        source: Box<dyn CaptureSource>,
        encoders: Box<dyn EncoderFactory>,
        preview: Box<dyn PreviewSink>,
        store: Arc<dyn ObjectStore>,
        bucket: impl Into<String>,
    ) -> Self {
        let (event_tx, _) = broadcast::channel(100);
        Self {
            state: Arc::new(RwLock::new(RecorderState::Idle)),
            status: Arc::new(RwLock::new(String::new())),
            config,
            source,
            encoders,
            preview,
            store,
            bucket: bucket.into(),
            stream: None,
            session: None,
            artifact: None,
            event_tx,
        }
    }

    /// Get the current controller state
    pub fn state(&self) -> RecorderState {
        *self.state.read()
    }

    /// Get the current status line
    pub fn status(&self) -> String {
        self.status.read().clone()
    }

    /// The held clip, if any
    pub fn artifact(&self) -> Option<&RecordedArtifact> {
        self.artifact.as_ref()
    }

    /// Whether a live stream is currently held
    pub fn has_stream(&self) -> bool {
        self.stream.as_ref().is_some_and(CaptureStream::is_live)
    }

    /// Subscribe to controller events
    pub fn subscribe(&self) -> broadcast::Receiver<RecorderEvent> {
        self.event_tx.subscribe()
    }

    fn set_status(&self, status: impl Into<String>) {
        *self.status.write() = status.into();
    }

    fn release_stream(&mut self) {
        if let Some(mut stream) = self.stream.take() {
            stream.release();
        }
        self.preview.detach();
    }

    /// Acquire a live stream and attach it to the preview.
    ///
    /// Allowed from `Idle` and `StreamReady` (a prior stream is released
    /// first). On failure the status is updated and the controller sits in
    /// `Idle`; no artifact is touched.
    pub async fn acquire(&mut self) -> Result<(), RecorderError> {
        let current = self.state();
        if !matches!(current, RecorderState::Idle | RecorderState::StreamReady) {
            return Err(RecorderError::InvalidTransition {
                action: "acquire stream",
                state: current,
            });
        }

        // The old handle must be fully released before asking the device
        // for a fresh one.
        self.release_stream();

        let acquired = self.source.acquire(&self.config.constraints).await;
        match acquired {
            Ok(stream) => {
                tracing::info!(stream = %stream.id(), "Capture stream acquired");
                self.preview.attach(&stream);
                self.stream = Some(stream);
                *self.state.write() = RecorderState::StreamReady;
                self.set_status("Camera ready");
                let _ = self.event_tx.send(RecorderEvent::StreamAcquired);
                Ok(())
            }
            Err(err) => {
                tracing::warn!(error = %err, "Stream acquisition failed");
                *self.state.write() = RecorderState::Idle;
                self.set_status(err.to_string());
                let _ = self.event_tx.send(RecorderEvent::Error(err.to_string()));
                Err(err.into())
            }
        }
    }

    /// Start a recording session on the current stream.
    ///
    /// From `Idle` an implicit acquire runs first; its failure leaves the
    /// controller in `Idle`. From `Recorded` the held clip is replaced once
    /// the new take starts; if the start fails the clip is retained and the
    /// controller returns to `Recorded`. Rejected while `Recording` or
    /// `Uploading`.
    pub async fn start_recording(&mut self) -> Result<(), RecorderError> {
        let current = self.state();
        if matches!(current, RecorderState::Recording | RecorderState::Uploading) {
            return Err(RecorderError::InvalidTransition {
                action: "start recording",
                state: current,
            });
        }

        if !self.has_stream() {
            *self.state.write() = RecorderState::Idle;
            if let Err(err) = self.acquire().await {
                self.restore_held_clip();
                return Err(err);
            }
        }

        let encoder = match self.encoders.create(&self.config.encoding) {
            Ok(encoder) => encoder,
            Err(err) => {
                self.fail_to_idle(&err);
                return Err(err);
            }
        };

        // The stream moves into the session; it comes back free (released)
        // when the session stops.
        let stream = self.stream.take().ok_or(RecorderError::Capture(
            crate::utils::error::CaptureError::DeviceUnavailable("no stream acquired".into()),
        ))?;
        self.preview.detach();

        let interval = Duration::from_millis(self.config.segment_interval_ms);
        match RecordingSession::start(encoder, stream, interval).await {
            Ok(session) => {
                // The previous clip is superseded only once the new take is
                // actually rolling; a failed start must not destroy it.
                self.artifact = None;
                self.session = Some(session);
                *self.state.write() = RecorderState::Recording;
                self.set_status("Recording");
                let _ = self.event_tx.send(RecorderEvent::Started);
                Ok(())
            }
            Err(err) => {
                // The session dropped the stream on failure, releasing it.
                self.fail_to_idle(&err);
                Err(err)
            }
        }
    }

    /// Stop the active recording and hold the finalized clip.
    ///
    /// A no-op outside `Recording`: the state is left unchanged.
    pub async fn stop_recording(&mut self) -> Result<(), RecorderError> {
        if self.state() != RecorderState::Recording {
            return Ok(());
        }

        let mut session = match self.session.take() {
            Some(session) => session,
            None => return Ok(()),
        };

        match session.stop().await {
            Ok(Some(artifact)) => {
                self.artifact = Some(artifact);
                *self.state.write() = RecorderState::Recorded;
                self.set_status("Recording stopped");
                let _ = self.event_tx.send(RecorderEvent::Stopped);
                Ok(())
            }
            // Session already stopped: a no-op, the state stays put.
            Ok(None) => Ok(()),
            Err(err) => {
                self.fail_to_idle(&err);
                Err(err)
            }
        }
    }

    /// Upload the held clip to the object store.
    ///
    /// On success the clip is discarded, a fresh stream is re-acquired for
    /// the next take, and the status carries the object name and its public
    /// URL. On failure the clip is retained and the store's message is
    /// surfaced verbatim; the caller may retry or discard.
    pub async fn upload(&mut self) -> AppResult<UploadOutcome> {
        let current = self.state();
        if current == RecorderState::Uploading {
            return Err(RecorderError::InvalidTransition {
                action: "upload",
                state: current,
            }
            .into());
        }

        let artifact = match self.artifact.clone() {
            Some(artifact) => artifact,
            None => {
                self.set_status("No recording to upload");
                return Err(RecorderError::NoArtifact.into());
            }
        };

        *self.state.write() = RecorderState::Uploading;
        self.set_status("Uploading...");
        let _ = self.event_tx.send(RecorderEvent::UploadStarted);

        let name = object_name(artifact.mime_type());
        let options = UploadOptions {
            content_type: artifact.mime_type().to_string(),
            ..UploadOptions::default()
        };

        let uploaded = self
            .store
            .upload(&self.bucket, &name, artifact.bytes().clone(), &options)
            .await;
        match uploaded {
            Ok(path) => {
                let url = self.store.public_url(&self.bucket, &path);
                self.artifact = None;
                *self.state.write() = RecorderState::Idle;

                // Fresh stream for the next take. Acquisition failure lands
                // in Idle with an Error event; the upload itself succeeded.
                if let Err(err) = self.acquire().await {
                    tracing::warn!(error = %err, "Re-acquire after upload failed");
                }

                self.set_status(format!("Uploaded {name} ({url})"));
                let _ = self.event_tx.send(RecorderEvent::Uploaded {
                    path: path.clone(),
                    url: url.clone(),
                });
                Ok(UploadOutcome {
                    path,
                    public_url: url,
                })
            }
            Err(err) => {
                let message = err.to_string();
                tracing::warn!(error = %message, "Upload failed");
                *self.state.write() = RecorderState::Recorded;
                self.set_status(message.clone());
                let _ = self.event_tx.send(RecorderEvent::UploadFailed(message));
                Err(AppError::Storage(err))
            }
        }
    }

    /// Drop the held clip without uploading it.
    ///
    /// A no-op outside `Recorded`; rejected while `Uploading`.
    pub fn discard(&mut self) -> Result<(), RecorderError> {
        let current = self.state();
        match current {
            RecorderState::Uploading => Err(RecorderError::InvalidTransition {
                action: "discard",
                state: current,
            }),
            RecorderState::Recorded => {
                self.artifact = None;
                *self.state.write() = RecorderState::Idle;
                self.set_status("Recording discarded");
                Ok(())
            }
            _ => Ok(()),
        }
    }

    fn fail_to_idle(&mut self, err: &RecorderError) {
        self.release_stream();
        *self.state.write() = RecorderState::Idle;
        self.set_status(err.to_string());
        let _ = self.event_tx.send(RecorderEvent::Error(err.to_string()));
        self.restore_held_clip();
    }

    /// A clip held before a failed re-record is still only superseded by a
    /// successful one; go back to holding it.
    fn restore_held_clip(&mut self) {
        if self.artifact.is_some() {
            *self.state.write() = RecorderState::Recorded;
        }
    }
}
