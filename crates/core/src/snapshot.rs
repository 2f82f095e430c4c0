//! Versioned JSON snapshot persistence.
//!
//! Each collection persists as one JSON file holding a version envelope:
//!
//! ```text
//! { "version": 1, "records": [ ... ] }
//! ```
//!
//! Loading accepts two shapes: the current envelope, and the legacy shape —
//! a bare top-level array with no envelope — which is migrated in place on
//! the next persist. Unknown future versions are rejected rather than
//! guessed at.
//!
//! Writes go to a sibling temp file first and are renamed over the target,
//! so a failed write never truncates the previous snapshot and in-memory
//! state cannot silently outrun the durable state.

use crate::constants::SNAPSHOT_VERSION;
use crate::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

#[derive(Serialize, Deserialize)]
struct Envelope<T> {
    version: u32,
    records: Vec<T>,
}

/// Loads a collection from `path`.
///
/// Returns `Ok(None)` if the file does not exist (first run). A bare-array
/// legacy file is accepted and logged; it gains an envelope on next persist.
///
/// # Errors
///
/// Returns `StoreError::SnapshotRead` on I/O failure,
/// `StoreError::Deserialization` on malformed JSON, and
/// `StoreError::UnsupportedSnapshotVersion` when the envelope declares a
/// version newer than this build understands.
pub fn load<T: DeserializeOwned>(path: &Path) -> StoreResult<Option<Vec<T>>> {
    let raw = match fs::read_to_string(path) {
        Ok(raw) => raw,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(StoreError::SnapshotRead(e)),
    };

    let value: serde_json::Value =
        serde_json::from_str(&raw).map_err(StoreError::Deserialization)?;

    if value.is_array() {
        // Legacy unversioned shape.
        tracing::info!(
            path = %path.display(),
            "migrating legacy unversioned snapshot"
        );
        let records: Vec<T> = serde_json::from_value(value).map_err(StoreError::Deserialization)?;
        return Ok(Some(records));
    }

    let envelope: Envelope<T> =
        serde_json::from_value(value).map_err(StoreError::Deserialization)?;
    if envelope.version != SNAPSHOT_VERSION {
        return Err(StoreError::UnsupportedSnapshotVersion {
            found: envelope.version,
            expected: SNAPSHOT_VERSION,
        });
    }

    Ok(Some(envelope.records))
}

/// Persists a collection to `path`, wrapping it in the current envelope.
///
/// The parent directory must already exist (the store creates it during
/// initialisation). The write is temp-file-then-rename.
///
/// # Errors
///
/// Returns `StoreError::Serialization` if encoding fails,
/// `StoreError::SnapshotWrite` if the temp file cannot be written, and
/// `StoreError::SnapshotReplace` if the rename fails.
pub fn persist<T: Serialize>(path: &Path, records: &[T]) -> StoreResult<()> {
    let envelope = Envelope {
        version: SNAPSHOT_VERSION,
        records: records.iter().collect::<Vec<_>>(),
    };
    let json = serde_json::to_string_pretty(&envelope).map_err(StoreError::Serialization)?;

    let tmp_path = path.with_extension("json.tmp");
    fs::write(&tmp_path, json).map_err(StoreError::SnapshotWrite)?;
    fs::rename(&tmp_path, path).map_err(StoreError::SnapshotReplace)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Rec {
        id: String,
        value: u32,
    }

    fn recs() -> Vec<Rec> {
        vec![
            Rec {
                id: "a".to_string(),
                value: 1,
            },
            Rec {
                id: "b".to_string(),
                value: 2,
            },
        ]
    }

    #[test]
    fn load_returns_none_for_missing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let loaded: Option<Vec<Rec>> = load(&dir.path().join("missing.json")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn persist_then_load_round_trips() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("recs.json");

        persist(&path, &recs()).expect("persist should succeed");
        let loaded: Vec<Rec> = load(&path).unwrap().expect("snapshot should exist");

        assert_eq!(loaded, recs());
    }

    #[test]
    fn persist_writes_version_envelope() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("recs.json");

        persist(&path, &recs()).expect("persist should succeed");

        let raw = std::fs::read_to_string(&path).unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value["version"], SNAPSHOT_VERSION);
        assert!(value["records"].is_array());
    }

    #[test]
    fn load_migrates_legacy_bare_array() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("recs.json");
        std::fs::write(&path, r#"[{"id":"a","value":1}]"#).unwrap();

        let loaded: Vec<Rec> = load(&path).unwrap().expect("snapshot should exist");
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "a");
    }

    #[test]
    fn load_rejects_future_version() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("recs.json");
        std::fs::write(&path, r#"{"version":99,"records":[]}"#).unwrap();

        let err = load::<Rec>(&path).expect_err("future version should fail");
        assert!(matches!(
            err,
            StoreError::UnsupportedSnapshotVersion {
                found: 99,
                expected: SNAPSHOT_VERSION
            }
        ));
    }

    #[test]
    fn load_rejects_malformed_json() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("recs.json");
        std::fs::write(&path, "not json {{{").unwrap();

        let err = load::<Rec>(&path).expect_err("malformed json should fail");
        assert!(matches!(err, StoreError::Deserialization(_)));
    }

    #[test]
    fn failed_replace_leaves_previous_snapshot_intact() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("recs.json");
        persist(&path, &recs()).expect("persist should succeed");

        // A second persist overwrites atomically; the file is never truncated
        // in between, so a load at any point sees a complete snapshot.
        persist(&path, &recs()[..1].to_vec()).expect("persist should succeed");
        let loaded: Vec<Rec> = load(&path).unwrap().expect("snapshot should exist");
        assert_eq!(loaded.len(), 1);
    }
}
