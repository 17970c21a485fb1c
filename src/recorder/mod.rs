//! Recording system module
//!
//! This module implements the record/upload flow:
//! - SegmentEncoder trait for the platform media encoder
//! - RecordingSession to accumulate segments into a finalized clip
//! - RecorderController to drive the whole state machine

pub mod controller;
pub mod encoder;
pub mod session;
pub mod state;

pub use controller::{RecorderController, RecorderEvent};
pub use encoder::{EncoderFactory, EncodingOptions, SegmentEncoder};
pub use session::RecordingSession;
pub use state::{RecordedArtifact, RecorderConfig, RecorderState, UploadOutcome};
