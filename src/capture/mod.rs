//! Capture layer
//!
//! Owned handles for live input streams and the traits that bound the
//! platform capture subsystem.

pub mod stream;
pub mod traits;

pub use stream::{CaptureStream, MediaTrack, TrackKind};
pub use traits::{CaptureSource, NullPreview, PreviewSink, Resolution, StreamConstraints};
