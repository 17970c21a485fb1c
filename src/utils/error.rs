//! Error types and handling
//!
//! Common error types used across the crate, one enum per boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::recorder::state::RecorderState;

/// Errors raised while acquiring a capture stream
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CaptureError {
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("Device unavailable: {0}")]
    DeviceUnavailable(String),
}

/// Errors raised by the recorder controller and recording sessions
#[derive(Error, Debug)]
pub enum RecorderError {
    #[error("Failed to start encoder: {0}")]
    EncodingStart(String),

    #[error("Invalid transition: cannot {action} while {state:?}")]
    InvalidTransition {
        action: &'static str,
        state: RecorderState,
    },

    #[error("No recorded clip to upload")]
    NoArtifact,

    #[error(transparent)]
    Capture(#[from] CaptureError),
}

/// Errors raised at the object-storage boundary
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Upload failed: {0}")]
    Upload(String),

    #[error("Missing storage configuration: {0} is not set")]
    MissingConfig(&'static str),

    #[error("Storage request error: {0}")]
    Request(#[from] reqwest::Error),
}

/// Application-wide error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Capture error: {0}")]
    Capture(#[from] CaptureError),

    #[error("Recording error: {0}")]
    Recording(#[from] RecorderError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Error response for embedders
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

impl From<AppError> for ErrorResponse {
    fn from(error: AppError) -> Self {
        let code = match &error {
            AppError::Capture(CaptureError::PermissionDenied(_)) => "PERMISSION_DENIED",
            AppError::Capture(CaptureError::DeviceUnavailable(_)) => "DEVICE_UNAVAILABLE",
            AppError::Recording(RecorderError::EncodingStart(_)) => "ENCODING_START_FAILURE",
            AppError::Recording(RecorderError::InvalidTransition { .. }) => "INVALID_TRANSITION",
            AppError::Recording(RecorderError::NoArtifact) => "NO_ARTIFACT",
            AppError::Recording(RecorderError::Capture(_)) => "CAPTURE_FAILURE",
            AppError::Storage(StorageError::Upload(_)) => "UPLOAD_FAILURE",
            AppError::Storage(StorageError::MissingConfig(_)) => "MISSING_CONFIG",
            AppError::Storage(StorageError::Request(_)) => "STORAGE_REQUEST_ERROR",
            AppError::Serialization(_) => "SERIALIZATION_ERROR",
        };

        ErrorResponse {
            code: code.to_string(),
            message: error.to_string(),
        }
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
