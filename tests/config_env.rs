//! Environment-sourced storage configuration.
//!
//! Kept in its own test binary so nothing else races on the process
//! environment.

use clipcast::storage::{StorageConfig, ENV_STORAGE_KEY, ENV_STORAGE_URL};
use clipcast::utils::error::StorageError;

#[test]
fn missing_endpoint_is_fatal() {
    std::env::remove_var(ENV_STORAGE_URL);
    std::env::remove_var(ENV_STORAGE_KEY);

    match StorageConfig::from_env() {
        Err(StorageError::MissingConfig(var)) => assert_eq!(var, ENV_STORAGE_URL),
        other => panic!("expected missing config, got {other:?}"),
    }

    std::env::set_var(ENV_STORAGE_URL, "https://store.example.com");
    match StorageConfig::from_env() {
        Err(StorageError::MissingConfig(var)) => assert_eq!(var, ENV_STORAGE_KEY),
        other => panic!("expected missing key, got {other:?}"),
    }

    std::env::set_var(ENV_STORAGE_KEY, "anon");
    let config = StorageConfig::from_env().unwrap();
    assert_eq!(config.base_url, "https://store.example.com");
    assert_eq!(config.anon_key, "anon");
}
