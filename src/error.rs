//! Error types for gridseek.
//!
//! [`GridError`] is what every fallible library call returns. At the command
//! surface it is flattened into the serialisable [`ErrorEnvelope`](crate::types::ErrorEnvelope).

use std::io::Error as IoError;

use thiserror::Error;

/// The unified error type for grid and thumbnail operations.
#[derive(Debug, Error)]
pub enum GridError {
    /// Non-physical parameters such as zero columns or a non-positive
    /// seconds-per-cell.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A referenced video id or file does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An external tool exited unsuccessfully or produced unusable output.
    #[error("{tool} failed: {message}")]
    CollaboratorFailure {
        /// Name of the tool (`ffprobe`, `ffmpeg`).
        tool: &'static str,
        /// What went wrong.
        message: String,
    },

    /// An external tool did not finish within its time budget.
    #[error("{tool} timed out after {seconds:.1}s")]
    Timeout {
        tool: &'static str,
        seconds: f64,
    },

    #[error("I/O error: {0}")]
    Io(#[from] IoError),
}

impl GridError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    pub(crate) fn collaborator(tool: &'static str, message: impl Into<String>) -> Self {
        Self::CollaboratorFailure {
            tool,
            message: message.into(),
        }
    }
}

pub type GridResult<T> = Result<T, GridError>;
