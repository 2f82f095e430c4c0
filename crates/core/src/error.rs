use crate::session::Role;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("failed to create store directory: {0}")]
    StoreDirCreation(std::io::Error),
    #[error("failed to write snapshot file: {0}")]
    SnapshotWrite(std::io::Error),
    #[error("failed to replace snapshot file: {0}")]
    SnapshotReplace(std::io::Error),
    #[error("failed to read snapshot file: {0}")]
    SnapshotRead(std::io::Error),
    #[error("failed to serialize snapshot: {0}")]
    Serialization(serde_json::Error),
    #[error("failed to deserialize snapshot: {0}")]
    Deserialization(serde_json::Error),
    #[error("unsupported snapshot version {found} (expected {expected})")]
    UnsupportedSnapshotVersion { found: u32, expected: u32 },

    #[error("duplicate record id: {0}")]
    DuplicateId(String),
    #[error("duplicate national ID: {0}")]
    DuplicateNationalId(String),
    #[error("too many emergency contacts (maximum {max})")]
    TooManyEmergencyContacts { max: usize },

    #[error("no active session")]
    NoActiveSession,
    #[error("operation requires a {required} session")]
    RoleMismatch { required: Role },

    #[error("text validation failed: {0}")]
    Text(#[from] swasthya_types::TextError),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;
