//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process
//! startup and then passed into core services. The intent is to avoid reading
//! process-wide environment variables during request handling, which can lead
//! to inconsistent behaviour in multi-threaded runtimes and test harnesses.

use crate::constants::{
    ADMINS_SNAPSHOT_FILENAME, DEFAULT_NAMESPACE, DOCTORS_SNAPSHOT_FILENAME,
    PATIENTS_SNAPSHOT_FILENAME,
};
use crate::error::{StoreError, StoreResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct CoreConfig {
    data_dir: PathBuf,
    namespace: String,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// The namespace becomes a subdirectory of `data_dir`, so it is restricted
    /// to a conservative character set that is safe as a directory name.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::InvalidInput` if the namespace is empty, overly
    /// long, or contains characters outside `[0-9a-zA-Z._-]`.
    pub fn new(data_dir: PathBuf, namespace: String) -> StoreResult<Self> {
        validate_namespace_safe_for_path(&namespace)?;
        Ok(Self {
            data_dir,
            namespace,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Directory that holds this namespace's snapshot files.
    pub fn store_dir(&self) -> PathBuf {
        self.data_dir.join(&self.namespace)
    }

    pub fn patients_snapshot_path(&self) -> PathBuf {
        self.store_dir().join(PATIENTS_SNAPSHOT_FILENAME)
    }

    pub fn doctors_snapshot_path(&self) -> PathBuf {
        self.store_dir().join(DOCTORS_SNAPSHOT_FILENAME)
    }

    pub fn admins_snapshot_path(&self) -> PathBuf {
        self.store_dir().join(ADMINS_SNAPSHOT_FILENAME)
    }
}

/// Parse the store namespace from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default namespace.
/// Binaries pass the raw environment variable here so the library itself never
/// reads the process environment.
pub fn namespace_from_env_value(value: Option<String>) -> StoreResult<String> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    match value {
        Some(ns) => {
            validate_namespace_safe_for_path(&ns)?;
            Ok(ns)
        }
        None => Ok(DEFAULT_NAMESPACE.to_string()),
    }
}

/// Validates that a namespace string is safe to use as a directory name.
///
/// Guardrails:
/// - Rejects empty or whitespace-only strings
/// - Bounds the length to avoid pathological inputs
/// - Restricts characters to a conservative ASCII set
///
/// # Errors
///
/// Returns a `StoreError::InvalidInput` if the namespace is invalid.
fn validate_namespace_safe_for_path(namespace: &str) -> StoreResult<()> {
    const MAX_NAMESPACE_LEN: usize = 253;

    if namespace.trim().is_empty() {
        return Err(StoreError::InvalidInput(
            "namespace cannot be empty".into(),
        ));
    }

    if namespace.len() > MAX_NAMESPACE_LEN {
        return Err(StoreError::InvalidInput(format!(
            "namespace exceeds maximum length of {} characters",
            MAX_NAMESPACE_LEN
        )));
    }

    let ok = namespace
        .bytes()
        .all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'z' | b'A'..=b'Z' | b'.' | b'-' | b'_'));

    if !ok {
        return Err(StoreError::InvalidInput(
            "namespace contains invalid characters (only alphanumeric, '.', '-', '_' allowed)"
                .into(),
        ));
    }

    Ok(())
}
