//! Mapping between absolute output paths and public-directory-relative paths.
//!
//! Manifests store paths relative to the public directory, always joined with
//! `/` so that a manifest written on one platform compares equal to the same
//! build's manifest on another.

use std::path::{Component, Path, PathBuf};

/// Resolves build output paths against a fixed public directory.
///
/// All operations are lexical: nothing here touches the filesystem, so paths
/// that do not exist yet (or no longer exist) resolve the same way. The one
/// exception is [`PathResolver::relative`], which anchors a relative path at
/// the working directory when the other side is absolute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResolver {
    public_dir: PathBuf,
}

impl PathResolver {
    /// Creates a resolver rooted at the given public directory.
    pub fn new(public_dir: impl Into<PathBuf>) -> Self {
        Self {
            public_dir: normalize_lexically(&public_dir.into()),
        }
    }

    /// Returns the public directory this resolver is rooted at.
    pub fn public_dir(&self) -> &Path {
        &self.public_dir
    }

    /// Converts an output path into a `/`-separated path relative to the
    /// public directory.
    ///
    /// Paths outside the public directory come back with leading `..`
    /// segments rather than being rejected; the reconciler refuses to delete
    /// those. If only one of the two paths is absolute, the other is joined
    /// onto the working directory first; when that is unavailable the output
    /// path is returned as an absolute `/`-separated string.
    pub fn relative(&self, path: &Path) -> String {
        if self.public_dir.is_absolute() == path.is_absolute() {
            return to_slash(&relative_path(&self.public_dir, path));
        }
        to_slash(&relative_path(
            &anchor_at_cwd(&self.public_dir),
            &anchor_at_cwd(path),
        ))
    }

    /// Resolves a manifest path back to a path under the public directory,
    /// folding any `.` and `..` segments it contains.
    pub fn resolve(&self, relative: &str) -> PathBuf {
        let mut resolved = self.public_dir.clone();
        for segment in split_segments(relative) {
            resolved.push(segment);
        }
        normalize_lexically(&resolved)
    }

    /// Returns `true` if a manifest path names something strictly inside the
    /// public directory.
    pub fn is_within(&self, relative: &str) -> bool {
        let normalized = normalize_separators(relative);
        if normalized.starts_with('/') || Path::new(&normalized).has_root() {
            return false;
        }
        let lexical = normalize_lexically(Path::new(&normalized));
        matches!(lexical.components().next(), Some(Component::Normal(_)))
    }
}

/// Replaces Windows-style `\` separators with `/`.
pub fn normalize_separators(path: &str) -> String {
    path.replace('\\', "/")
}

/// Removes `.` segments and folds `..` segments into their parent, without
/// consulting the filesystem.
///
/// A `..` that would climb above a root is dropped; one that climbs above the
/// start of a relative path is kept.
pub fn normalize_lexically(path: &Path) -> PathBuf {
    let mut parts: Vec<Component<'_>> = Vec::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }
    parts.iter().collect()
}

/// Computes the lexical path from `base` to `path`, inserting `..` segments
/// where `path` is not below `base`.
///
/// Returns an empty path when both name the same location. If one path is
/// absolute and the other is not there is no common anchor, so the
/// normalized `path` is returned unchanged.
pub fn relative_path(base: &Path, path: &Path) -> PathBuf {
    let base = normalize_lexically(base);
    let path = normalize_lexically(path);
    if base.is_absolute() != path.is_absolute() {
        return path;
    }

    let base_parts: Vec<Component<'_>> = base.components().collect();
    let path_parts: Vec<Component<'_>> = path.components().collect();
    let common = base_parts
        .iter()
        .zip(path_parts.iter())
        .take_while(|(a, b)| a == b)
        .count();

    let mut relative = PathBuf::new();
    for _ in common..base_parts.len() {
        relative.push("..");
    }
    for part in &path_parts[common..] {
        relative.push(part.as_os_str());
    }
    relative
}

fn anchor_at_cwd(path: &Path) -> PathBuf {
    match std::env::current_dir() {
        Ok(cwd) if path.is_relative() => cwd.join(path),
        _ => path.to_path_buf(),
    }
}

fn to_slash(path: &Path) -> String {
    let mut slashed = String::new();
    for component in path.components() {
        match component {
            Component::RootDir => slashed.push('/'),
            other => {
                if !slashed.is_empty() && !slashed.ends_with('/') {
                    slashed.push('/');
                }
                slashed.push_str(&other.as_os_str().to_string_lossy());
            }
        }
    }
    slashed
}

fn split_segments(relative: &str) -> impl Iterator<Item = String> + '_ {
    relative
        .split(['/', '\\'])
        .filter(|s| !s.is_empty() && *s != ".")
        .map(str::to_string)
}
