//! clipcast - Camera clip recording and cloud upload, made simple.
//!
//! The crate drives one flow: acquire a camera/microphone stream, record it
//! into a single clip, and upload the clip to a cloud object-storage bucket.
//! Device capture and media encoding sit behind traits ([`capture::CaptureSource`],
//! [`recorder::SegmentEncoder`]) so embedders plug in their platform; the
//! [`storage::StorageClient`] talks to the store over HTTP.

pub mod capture;
pub mod recorder;
pub mod storage;
pub mod utils;

pub use capture::{CaptureSource, CaptureStream, PreviewSink, StreamConstraints};
pub use recorder::{RecorderConfig, RecorderController, RecorderEvent, RecorderState};
pub use storage::{StorageClient, StorageConfig};
pub use utils::error::{AppError, AppResult};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize tracing/logging for binaries and tests embedding the crate
pub fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "clipcast=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .ok();
}
