use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Why a line of the task file could not be turned into a `Task`.
///
/// Every variant means "skip this line" to the loader.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("expected 4 tab-separated fields, found {0}")]
    MissingFields(usize),

    #[error("invalid task id: {0:?}")]
    InvalidId(String),

    #[error("invalid timestamp: {0:?}")]
    InvalidTimestamp(String),
}

/// Failures at the task file boundary. Reported to the user, never fatal.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("{}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Why `TaskStore::add` refused to create a task.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AddError {
    #[error("task text is empty")]
    EmptyText,

    #[error("no task ids left")]
    IdsExhausted,
}
