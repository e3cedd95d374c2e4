use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstallerError {
    #[error("Failed to determine home directory")]
    HomeDirNotFound,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration {}: {message}", path.display())]
    Config { path: PathBuf, message: String },

    #[error("Failed to create directory {}: {source}", path.display())]
    DirectoryCreation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Target directory does not exist: {}", .0.display())]
    TargetMissing(PathBuf),

    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Fetch(#[from] FetchError),
}

/// Failure of a single clone. Collected into the report unless running strict.
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("could not run {program} for {url}: {source}")]
    Spawn {
        program: String,
        url: String,
        #[source]
        source: std::io::Error,
    },

    #[error("clone of {url} failed ({status}): {stderr}")]
    Failed {
        url: String,
        status: String,
        stderr: String,
    },

    #[error("clone of {url} timed out after {timeout:?}")]
    Timeout {
        url: String,
        timeout: std::time::Duration,
    },

    #[error("{url} does not name a usable folder (got {name:?})")]
    InvalidName { url: String, name: String },

    #[error("{url} would be cloned into {}, which another repository in this run already uses", path.display())]
    DestinationTaken { url: String, path: PathBuf },
}

pub type Result<T> = std::result::Result<T, InstallerError>;
