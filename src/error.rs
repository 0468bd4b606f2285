use thiserror::Error;

/// Failure reported by a host collaborator (vault or workspace).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("{0} does not exist")]
    NotFound(String),
    #[error("{0} already exists")]
    AlreadyExists(String),
    #[error("{0}")]
    Io(String),
    #[error("rejected by host: {0}")]
    Rejected(String),
}

impl From<std::io::Error> for HostError {
    fn from(e: std::io::Error) -> Self {
        HostError::Io(e.to_string())
    }
}

/// Errors raised while loading or persisting the settings blob.
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to read settings file: {0}")]
    Read(#[source] std::io::Error),
    #[error("Failed to parse settings file: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Failed to serialize settings: {0}")]
    Serialize(#[source] serde_json::Error),
    #[error("Failed to write settings file: {0}")]
    Write(#[source] std::io::Error),
    #[error("Could not determine data directory")]
    NoDataDir,
}

/// Panel-level operation failures.
///
/// The `Display` text is what ends up in the user-visible notice.
#[derive(Debug, Error)]
pub enum ExplorerError {
    #[error("Failed to create new {kind} file: {source}")]
    CreateFile {
        kind: &'static str,
        #[source]
        source: HostError,
    },
    #[error("Failed to create new folder: {0}")]
    CreateFolder(#[source] HostError),
    #[error("Failed to rename: {0}")]
    Rename(#[source] HostError),
    #[error("Failed to delete {path}: {source}")]
    Delete {
        path: String,
        #[source]
        source: HostError,
    },
    #[error("Failed to move {failed} item(s)")]
    Move { failed: usize },
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: HostError,
    },
    #[error("Invalid name: {0}")]
    InvalidName(String),
    #[error(transparent)]
    Settings(#[from] SettingsError),
}
