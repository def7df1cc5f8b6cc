use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreErrorCode {
    Io,
    InvalidRoot,
    InvalidIdMap,
}

/// Errors that stop a run (or a map load) before any file is touched.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{code:?}: {message}")]
pub struct CoreError {
    pub code: CoreErrorCode,
    pub message: String,
}

impl CoreError {
    pub fn new(code: CoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

/// Per-file conditions that are reported as warnings; the run carries on.
#[derive(Debug, thiserror::Error)]
pub enum FileError {
    #[error("I/O error reading file: {0}")]
    Read(std::io::Error),
    #[error("invalid JSON: {0}")]
    InvalidJson(serde_json::Error),
    #[error("cannot derive champion folder; expected <champion>/Recommended/<file>.json")]
    Location,
    #[error("I/O error creating backup {path}: {source}")]
    Backup {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to serialize JSON: {0}")]
    Serialize(serde_json::Error),
    #[error("I/O error writing file: {0}")]
    Write(std::io::Error),
}
