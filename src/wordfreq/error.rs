use std::io;
use std::path::PathBuf;

use thiserror::Error;

use crate::common::io_error_msg;

/// A failure at the file-system boundary. Every variant is terminal for the run.
#[derive(Debug, Error)]
pub enum WordFreqError {
    #[error("cannot open '{}' for reading: {}", .path.display(), io_error_msg(.source))]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error reading '{}': {}", .path.display(), io_error_msg(.source))]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot create '{}': {}", .path.display(), io_error_msg(.source))]
    Create {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("error writing '{}': {}", .path.display(), io_error_msg(.source))]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WordFreqError {
    /// Process exit status for this error. Usage errors (status 2) are
    /// rejected by the argument parser before any I/O happens.
    pub fn exit_code(&self) -> i32 {
        match self {
            WordFreqError::Open { .. }
            | WordFreqError::Read { .. }
            | WordFreqError::Create { .. }
            | WordFreqError::Write { .. } => 1,
        }
    }

    /// The underlying OS error.
    pub fn io_error(&self) -> &io::Error {
        match self {
            WordFreqError::Open { source, .. }
            | WordFreqError::Read { source, .. }
            | WordFreqError::Create { source, .. }
            | WordFreqError::Write { source, .. } => source,
        }
    }
}
