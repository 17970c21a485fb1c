//! Object-storage layer
//!
//! Configuration and HTTP client for the cloud object store clips are
//! uploaded to.

pub mod client;
pub mod config;

pub use client::{object_name, ObjectStore, StorageClient, UploadOptions};
pub use config::{StorageConfig, DEFAULT_BUCKET, ENV_STORAGE_KEY, ENV_STORAGE_URL};
