//! Path resolution: anchoring configured paths at the project directory.

use crate::error::ConfigError;
use crate::types::ScourConfig;
use scour_common::normalize_lexically;
use std::path::{Path, PathBuf};

/// Absolute locations the reconciliation cycle operates on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    /// The public directory, absolute and lexically normalized.
    pub public_dir: PathBuf,
    /// The trace file, absolute and lexically normalized.
    pub trace_file: PathBuf,
}

/// Resolves the configured public directory and trace file against the
/// project directory.
///
/// Relative paths are joined onto `project_dir`; absolute ones are kept.
/// Fails if the trace file would land inside the public directory, where a
/// full wipe would destroy it.
pub fn resolve_paths(
    config: &ScourConfig,
    project_dir: &Path,
) -> Result<ResolvedPaths, ConfigError> {
    let public_dir = anchor(project_dir, &config.paths.public);
    let trace_file = anchor(project_dir, &config.paths.trace);

    if trace_file.starts_with(&public_dir) {
        return Err(ConfigError::ValidationError(format!(
            "trace file {} must live outside the public directory {}",
            trace_file.display(),
            public_dir.display()
        )));
    }

    Ok(ResolvedPaths {
        public_dir,
        trace_file,
    })
}

fn anchor(project_dir: &Path, configured: &str) -> PathBuf {
    normalize_lexically(&project_dir.join(configured))
}
