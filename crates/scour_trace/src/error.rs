//! Error types for trace persistence and file removal.

use std::path::PathBuf;

/// Errors that can fail a reconciliation cycle.
///
/// Loading a trace and deleting files never fail the cycle; only persisting
/// the new trace does, since a silently lost trace would make every later
/// cleanup decision wrong.
#[derive(Debug, thiserror::Error)]
pub enum TraceError {
    /// An I/O error occurred while writing the trace file.
    #[error("trace I/O error at {path}: {source}")]
    Io {
        /// The path that caused the error.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The manifest could not be serialized.
    #[error("serialization error: {reason}")]
    Serialization {
        /// Description of the serialization failure.
        reason: String,
    },
}

/// A single file that could not be removed.
///
/// Collected into a [`RemovalReport`](crate::RemovalReport); never propagated.
#[derive(Debug, thiserror::Error)]
#[error("cannot remove {path}: {kind}")]
pub struct DeleteError {
    /// The path that was to be removed.
    pub path: PathBuf,
    /// Why removal failed.
    pub kind: DeleteErrorKind,
}

/// Reasons a removal can fail.
#[derive(Debug, thiserror::Error)]
pub enum DeleteErrorKind {
    /// Nothing exists at the path (already removed).
    #[error("no such file")]
    NotFound,

    /// The path names a directory; selective cleanup only removes files.
    #[error("not a file")]
    NotAFile,

    /// The manifest path resolves outside the public directory.
    #[error("outside the public directory")]
    OutsidePublicDir,

    /// Any other I/O failure, such as a permission error.
    #[error("{0}")]
    Io(#[from] std::io::Error),
}

impl DeleteError {
    /// Creates a new delete error for the given path.
    pub fn new(path: impl Into<PathBuf>, kind: DeleteErrorKind) -> Self {
        Self {
            path: path.into(),
            kind,
        }
    }

    /// Returns `true` if the file was already gone.
    pub fn is_not_found(&self) -> bool {
        matches!(self.kind, DeleteErrorKind::NotFound)
    }
}
