//! Persistence of the manifest between build cycles.
//!
//! The trace file lives at an explicit path (outside the public directory so
//! a full wipe leaves it alone). Loading is fail-safe: a missing or corrupt
//! file reads as "no history". Saving writes a sibling temp file and renames
//! it over the target, so a failed save leaves the previous trace intact.

use std::ffi::OsString;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::TraceError;
use crate::manifest::Manifest;

/// Suffix appended to the trace file name for the in-progress write.
const TEMP_SUFFIX: &str = ".tmp";

/// Result of reading the trace file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedTrace {
    /// A previous manifest was read successfully.
    Found(Manifest),
    /// No usable previous manifest: first run, deleted, or unreadable.
    Absent,
}

impl LoadedTrace {
    /// Returns the loaded manifest, or an empty one when absent.
    pub fn into_manifest(self) -> Manifest {
        match self {
            LoadedTrace::Found(manifest) => manifest,
            LoadedTrace::Absent => Manifest::new(),
        }
    }
}

/// Reads and writes the manifest at a fixed trace file path.
#[derive(Debug, Clone)]
pub struct TraceStore {
    path: PathBuf,
}

impl TraceStore {
    /// Creates a store backed by the trace file at `path`.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Returns the trace file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Loads the previous manifest.
    ///
    /// Any failure to read or parse the file yields [`LoadedTrace::Absent`];
    /// first runs and corrupted state are treated the same way.
    pub fn load(&self) -> LoadedTrace {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "no previous trace");
                return LoadedTrace::Absent;
            }
        };
        match serde_json::from_str(&content) {
            Ok(manifest) => LoadedTrace::Found(manifest),
            Err(e) => {
                debug!(path = %self.path.display(), error = %e, "discarding unreadable trace");
                LoadedTrace::Absent
            }
        }
    }

    /// Loads the previous manifest, substituting an empty one when absent.
    pub fn load_or_empty(&self) -> Manifest {
        self.load().into_manifest()
    }

    /// Persists `manifest`, replacing any previous trace.
    ///
    /// Creates the parent directory if it doesn't exist.
    pub fn save(&self, manifest: &Manifest) -> Result<(), TraceError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| TraceError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        let json = serde_json::to_string(manifest).map_err(|e| TraceError::Serialization {
            reason: e.to_string(),
        })?;

        let temp_path = self.temp_path();
        std::fs::write(&temp_path, json).map_err(|e| TraceError::Io {
            path: temp_path.clone(),
            source: e,
        })?;
        if let Err(e) = std::fs::rename(&temp_path, &self.path) {
            let _ = std::fs::remove_file(&temp_path);
            return Err(TraceError::Io {
                path: self.path.clone(),
                source: e,
            });
        }

        debug!(
            path = %self.path.display(),
            categories = manifest.len(),
            paths = manifest.path_count(),
            "trace saved"
        );
        Ok(())
    }

    fn temp_path(&self) -> PathBuf {
        let mut name: OsString = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(TEMP_SUFFIX);
        self.path.with_file_name(name)
    }
}
