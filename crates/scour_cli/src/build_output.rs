//! The JSON build-output listing the asset pipeline hands to `scour`.
//!
//! ```json
//! {
//!   "files": [{ "type": "javascript", "path": "public/app.js" }],
//!   "static_files": { "app/index.jade": { "destination_path": "public/index.html" } },
//!   "assets": [{ "destination_path": "public/img/logo.png" }]
//! }
//! ```

use std::path::{Path, PathBuf};

use scour_trace::{CompiledFile, FileList};
use serde::Deserialize;

/// One build's outputs as reported by the pipeline.
#[derive(Debug, Default, Deserialize)]
pub struct BuildOutput {
    /// Joined output files.
    #[serde(default)]
    pub files: Vec<CompiledFile>,
    /// Static files and copied assets.
    #[serde(flatten)]
    pub file_list: FileList,
}

impl BuildOutput {
    /// Reads a listing from disk.
    pub fn read(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("failed to read build output {}: {e}", path.display()))?;
        Self::from_json(&content)
            .map_err(|e| format!("invalid build output {}: {e}", path.display()).into())
    }

    /// Parses a listing from a JSON string.
    pub fn from_json(content: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(content)
    }

    /// Interprets relative output paths as relative to `base`.
    pub fn anchored(mut self, base: &Path) -> Self {
        for file in &mut self.files {
            anchor(&mut file.path, base);
        }
        for file in self.file_list.static_files.values_mut() {
            anchor(&mut file.destination_path, base);
        }
        for asset in &mut self.file_list.assets {
            anchor(&mut asset.destination_path, base);
        }
        self
    }
}

fn anchor(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"{
        "files": [
            { "type": "javascript", "path": "public/app.js" },
            { "type": "stylesheet", "path": "/abs/public/app.css" }
        ],
        "static_files": {
            "app/index.jade": { "destination_path": "public/index.html" },
            "app/old.jade": { "destination_path": "public/old.html", "removed": true }
        },
        "assets": [{ "destination_path": "public/img/logo.png" }]
    }"#;

    #[test]
    fn parses_full_listing() {
        let out = BuildOutput::from_json(LISTING).unwrap();
        assert_eq!(out.files.len(), 2);
        assert_eq!(out.files[0].file_type, "javascript");
        assert_eq!(out.file_list.static_files.len(), 2);
        assert!(out.file_list.static_files["app/old.jade"].removed);
        assert_eq!(out.file_list.assets.len(), 1);
    }

    #[test]
    fn sections_are_optional() {
        let out = BuildOutput::from_json("{}").unwrap();
        assert!(out.files.is_empty());
        assert!(out.file_list.static_files.is_empty());
        assert!(out.file_list.assets.is_empty());
    }

    #[test]
    fn anchored_joins_relative_paths_only() {
        let out = BuildOutput::from_json(LISTING)
            .unwrap()
            .anchored(Path::new("/proj"));
        assert_eq!(out.files[0].path, PathBuf::from("/proj/public/app.js"));
        assert_eq!(out.files[1].path, PathBuf::from("/abs/public/app.css"));
        assert_eq!(
            out.file_list.static_files["app/index.jade"].destination_path,
            PathBuf::from("/proj/public/index.html")
        );
        assert_eq!(
            out.file_list.assets[0].destination_path,
            PathBuf::from("/proj/public/img/logo.png")
        );
    }

    #[test]
    fn read_missing_file_errors() {
        let err = BuildOutput::read(Path::new("/nonexistent/build.json")).unwrap_err();
        assert!(err.to_string().contains("failed to read build output"));
    }

    #[test]
    fn read_invalid_json_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build.json");
        std::fs::write(&path, "[1, 2").unwrap();
        let err = BuildOutput::read(&path).unwrap_err();
        assert!(err.to_string().contains("invalid build output"));
    }
}
