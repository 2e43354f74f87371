//! Filesystem side of reconciliation: deleting leftovers, or wiping the
//! public directory outright.
//!
//! Every removal is best-effort. Each path gets its own
//! `Result<_, DeleteError>`, the batch collects them into a
//! [`RemovalReport`], and nothing is propagated to the caller. Removals of
//! distinct paths are independent and run on the rayon pool; both entry
//! points return only after every removal has finished.

use std::ffi::OsString;
use std::io;
use std::path::{Component, Path, PathBuf};

use rayon::prelude::*;
use scour_common::{normalize_lexically, PathResolver};
use tracing::{debug, info, warn};

use crate::error::{DeleteError, DeleteErrorKind};
use crate::manifest::Manifest;

/// Outcome of a batch of removals.
#[derive(Debug, Default)]
pub struct RemovalReport {
    /// Paths that were removed.
    pub removed: Vec<PathBuf>,
    /// Paths that were already gone.
    pub missing: Vec<PathBuf>,
    /// Paths that could not be removed, with the reason.
    pub failed: Vec<DeleteError>,
}

impl RemovalReport {
    fn from_results(results: Vec<Result<PathBuf, DeleteError>>) -> Self {
        results
            .into_iter()
            .fold(Self::default(), |mut report, result| {
                match result {
                    Ok(path) => report.removed.push(path),
                    Err(e) if e.is_not_found() => report.missing.push(e.path),
                    Err(e) => report.failed.push(e),
                }
                report
            })
    }

    /// Returns the number of paths a removal was attempted for.
    pub fn attempted(&self) -> usize {
        self.removed.len() + self.missing.len() + self.failed.len()
    }

    /// Returns `true` if no removal was attempted.
    pub fn is_empty(&self) -> bool {
        self.attempted() == 0
    }

    fn log_summary(&self, what: &str) {
        for failure in &self.failed {
            warn!(path = %failure.path.display(), reason = %failure.kind, "{what}: could not remove");
        }
        info!(
            removed = self.removed.len(),
            missing = self.missing.len(),
            failed = self.failed.len(),
            "{what} finished"
        );
    }
}

/// Deletes every file named in `leftovers` from `public_dir`.
///
/// Only files are removed: a path naming a directory, or one that would
/// resolve outside `public_dir`, is recorded as a failure. Directories left
/// empty are not pruned.
pub fn remove_files(leftovers: &Manifest, public_dir: &Path) -> RemovalReport {
    let resolver = PathResolver::new(public_dir);
    let relatives: Vec<&str> = leftovers.paths().collect();
    if relatives.is_empty() {
        return RemovalReport::default();
    }

    let results: Vec<_> = relatives
        .par_iter()
        .map(|relative| remove_leftover(&resolver, relative))
        .collect();

    let report = RemovalReport::from_results(results);
    report.log_summary("stale output cleanup");
    report
}

/// Deletes the whole contents of `public_dir`, keeping the directory itself.
///
/// When `cwd` lies inside `public_dir`, the top-level entry that contains it
/// is kept (see [`protected_segment`]). A missing public directory is an
/// empty report.
pub fn wipe(public_dir: &Path, cwd: &Path) -> RemovalReport {
    let protected = protected_segment(public_dir, cwd);
    let entries = match std::fs::read_dir(public_dir) {
        Ok(entries) => entries,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            debug!(path = %public_dir.display(), "public directory absent, nothing to wipe");
            return RemovalReport::default();
        }
        Err(e) => {
            let report = RemovalReport {
                failed: vec![DeleteError::new(public_dir, DeleteErrorKind::Io(e))],
                ..RemovalReport::default()
            };
            report.log_summary("public directory wipe");
            return report;
        }
    };

    if let Some(segment) = &protected {
        info!(segment = %segment.to_string_lossy(), "keeping entry holding the working directory");
    }

    let targets: Vec<PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|entry| protected.as_deref() != Some(entry.file_name().as_os_str()))
        .map(|entry| entry.path())
        .collect();

    let results: Vec<_> = targets.par_iter().map(|path| wipe_entry(path)).collect();

    let report = RemovalReport::from_results(results);
    report.log_summary("public directory wipe");
    report
}

/// Returns the first path segment below `public_dir` that contains `cwd`, if
/// `cwd` is strictly inside `public_dir`.
///
/// Both paths are canonicalized when they exist so symlinked locations
/// compare equal; otherwise they are compared lexically.
pub fn protected_segment(public_dir: &Path, cwd: &Path) -> Option<OsString> {
    let public = canonical_or_lexical(public_dir);
    let cwd = canonical_or_lexical(cwd);
    let below = cwd.strip_prefix(&public).ok()?;
    match below.components().next()? {
        Component::Normal(segment) => Some(segment.to_os_string()),
        _ => None,
    }
}

fn canonical_or_lexical(path: &Path) -> PathBuf {
    std::fs::canonicalize(path).unwrap_or_else(|_| normalize_lexically(path))
}

fn remove_leftover(resolver: &PathResolver, relative: &str) -> Result<PathBuf, DeleteError> {
    // `..` segments are folded here, so a vanished intermediate directory
    // doesn't hide the file.
    let path = resolver.resolve(relative);
    if !resolver.is_within(relative) {
        return Err(DeleteError::new(path, DeleteErrorKind::OutsidePublicDir));
    }

    let metadata = std::fs::symlink_metadata(&path).map_err(|e| delete_error(&path, e))?;
    if metadata.is_dir() {
        return Err(DeleteError::new(path, DeleteErrorKind::NotAFile));
    }
    std::fs::remove_file(&path).map_err(|e| delete_error(&path, e))?;

    debug!(path = %path.display(), "removed stale output");
    Ok(path)
}

fn wipe_entry(path: &Path) -> Result<PathBuf, DeleteError> {
    let metadata = std::fs::symlink_metadata(path).map_err(|e| delete_error(path, e))?;
    let removal = if metadata.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    removal.map_err(|e| delete_error(path, e))?;

    debug!(path = %path.display(), "wiped");
    Ok(path.to_path_buf())
}

fn delete_error(path: &Path, e: io::Error) -> DeleteError {
    let kind = if e.kind() == io::ErrorKind::NotFound {
        DeleteErrorKind::NotFound
    } else {
        DeleteErrorKind::Io(e)
    };
    DeleteError::new(path, kind)
}
