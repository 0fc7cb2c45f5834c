// error.rs - Error taxonomy for the selection pipeline

use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SelectError {
    /// Malformed FASTA, hierarchy, report or config content
    #[error("Parse error in {origin}: {message}")]
    Parse { origin: String, message: String },

    /// Non-positive counts, empty class set, unknown scorer, ...
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Unreadable input or unwritable destination
    #[error("I/O error on '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// One or more output destinations failed; nothing was committed
    #[error("Failed to write outputs: {}", .0.join("; "))]
    Output(Vec<String>),
}

impl SelectError {
    pub fn parse(origin: impl Into<String>, message: impl Into<String>) -> Self {
        SelectError::Parse {
            origin: origin.into(),
            message: message.into(),
        }
    }

    pub fn io(path: &Path, source: std::io::Error) -> Self {
        SelectError::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn invalid(message: impl Into<String>) -> Self {
        SelectError::InvalidParameter(message.into())
    }

    /// Process exit code for this error class
    pub fn exit_code(&self) -> i32 {
        match self {
            SelectError::InvalidParameter(_) => 2,
            SelectError::Io { .. } | SelectError::Output(_) => 3,
            SelectError::Parse { .. } => 4,
        }
    }
}

pub type Result<T> = std::result::Result<T, SelectError>;
