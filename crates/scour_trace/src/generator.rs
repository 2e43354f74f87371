//! Trace generation: turning one build's outputs into a [`Manifest`].
//!
//! The asset pipeline hands over three lists: the compiled (joined) files, the
//! static files it compiled into the public directory, and the assets it
//! copied verbatim. Every compiled file also accounts for a `.map` next to
//! it. Source maps are recorded even when the current run has them disabled;
//! the differ decides whether stale maps go.

use std::collections::BTreeMap;
use std::path::PathBuf;

use scour_common::{OutputDescriptor, OutputKind, PathResolver};
use serde::{Deserialize, Serialize};

use crate::manifest::Manifest;

/// Extension appended to a compiled file's path to name its source map.
const SOURCE_MAP_EXT: &str = ".map";

/// A joined output file produced by the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompiledFile {
    /// Pipeline type of the file, e.g. `javascript` or `stylesheet`.
    #[serde(rename = "type")]
    pub file_type: String,
    /// Absolute output path.
    pub path: PathBuf,
}

/// A static file the pipeline compiled into the public directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticFile {
    /// Absolute output path.
    pub destination_path: PathBuf,
    /// Whether the source was removed during this run; removed files produce
    /// no output.
    #[serde(default)]
    pub removed: bool,
}

/// An asset copied verbatim into the public directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Absolute output path.
    pub destination_path: PathBuf,
}

/// The pipeline's view of static files and assets for the current build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileList {
    /// Static files keyed by source path.
    #[serde(default)]
    pub static_files: BTreeMap<String, StaticFile>,
    /// Copied assets.
    #[serde(default)]
    pub assets: Vec<Asset>,
}

impl CompiledFile {
    /// Creates a compiled file record.
    pub fn new(file_type: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        Self {
            file_type: file_type.into(),
            path: path.into(),
        }
    }

    /// Returns the path of the source map accompanying this file.
    pub fn map_path(&self) -> PathBuf {
        let mut map = self.path.clone().into_os_string();
        map.push(SOURCE_MAP_EXT);
        PathBuf::from(map)
    }
}

/// Lists every artifact produced by the build.
///
/// Compiled files come first, each immediately followed by its source map,
/// then static files that weren't removed, then assets.
pub fn output_descriptors(files: &[CompiledFile], file_list: &FileList) -> Vec<OutputDescriptor> {
    let compiled = files.iter().flat_map(|file| {
        [
            OutputDescriptor::new(OutputKind::Compiled(file.file_type.clone()), &file.path),
            OutputDescriptor::new(OutputKind::SourceMap(file.file_type.clone()), file.map_path()),
        ]
    });
    let statics = file_list
        .static_files
        .values()
        .filter(|f| !f.removed)
        .map(|f| OutputDescriptor::new(OutputKind::CompiledAsset, &f.destination_path));
    let assets = file_list
        .assets
        .iter()
        .map(|a| OutputDescriptor::new(OutputKind::Asset, &a.destination_path));

    compiled.chain(statics).chain(assets).collect()
}

/// Builds the manifest for the current build.
///
/// Groups every output descriptor under its category and records its path
/// relative to the resolver's public directory.
pub fn generate_trace(
    files: &[CompiledFile],
    file_list: &FileList,
    resolver: &PathResolver,
) -> Manifest {
    output_descriptors(files, file_list)
        .into_iter()
        .fold(Manifest::new(), |manifest, out| {
            manifest.with_path(out.kind.category(), resolver.relative(&out.path))
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    const PUBLIC: &str = "/site/public";

    fn resolver() -> PathResolver {
        PathResolver::new(PUBLIC)
    }

    fn static_file(path: &str, removed: bool) -> StaticFile {
        StaticFile {
            destination_path: PathBuf::from(path),
            removed,
        }
    }

    #[test]
    fn compiled_files_imply_source_maps() {
        let files = [CompiledFile::new("javascript", "/site/public/app.js")];
        let m = generate_trace(&files, &FileList::default(), &resolver());
        assert_eq!(m.get("javascripts").unwrap(), ["app.js"]);
        assert_eq!(m.get("javascript-maps").unwrap(), ["app.js.map"]);
        assert_eq!(m.len(), 2);
    }

    #[test]
    fn removed_static_files_are_skipped() {
        let mut list = FileList::default();
        list.static_files
            .insert("app/index.jade".into(), static_file("/site/public/index.html", false));
        list.static_files
            .insert("app/old.jade".into(), static_file("/site/public/old.html", true));
        let m = generate_trace(&[], &list, &resolver());
        assert_eq!(m.get("compiled-assets").unwrap(), ["index.html"]);
    }

    #[test]
    fn assets_are_recorded() {
        let list = FileList {
            assets: vec![
                Asset {
                    destination_path: "/site/public/img/logo.png".into(),
                },
                Asset {
                    destination_path: "/site/public/robots.txt".into(),
                },
            ],
            ..FileList::default()
        };
        let m = generate_trace(&[], &list, &resolver());
        assert_eq!(m.get("assets").unwrap(), ["img/logo.png", "robots.txt"]);
    }

    #[test]
    fn every_artifact_is_accounted_for() {
        let files = [
            CompiledFile::new("javascript", "/site/public/app.js"),
            CompiledFile::new("javascript", "/site/public/vendor.js"),
            CompiledFile::new("stylesheet", "/site/public/app.css"),
        ];
        let mut list = FileList::default();
        list.static_files
            .insert("a.jade".into(), static_file("/site/public/a.html", false));
        list.assets.push(Asset {
            destination_path: "/site/public/favicon.ico".into(),
        });

        let descriptors = output_descriptors(&files, &list);
        assert_eq!(descriptors.len(), 8);

        let m = generate_trace(&files, &list, &resolver());
        assert_eq!(m.path_count(), 8);
        assert_eq!(m.get("javascripts").unwrap(), ["app.js", "vendor.js"]);
        assert_eq!(
            m.get("javascript-maps").unwrap(),
            ["app.js.map", "vendor.js.map"]
        );
        assert_eq!(m.get("stylesheets").unwrap(), ["app.css"]);
        assert_eq!(m.get("stylesheet-maps").unwrap(), ["app.css.map"]);
    }

    #[test]
    fn descriptor_order_is_compiled_static_assets() {
        let files = [CompiledFile::new("javascript", "/site/public/app.js")];
        let mut list = FileList::default();
        list.static_files
            .insert("a.jade".into(), static_file("/site/public/a.html", false));
        list.assets.push(Asset {
            destination_path: "/site/public/b.png".into(),
        });
        let kinds: Vec<String> = output_descriptors(&files, &list)
            .into_iter()
            .map(|d| d.kind.type_tag())
            .collect();
        assert_eq!(
            kinds,
            ["javascript", "javascript-map", "compiled-asset", "asset"]
        );
    }

    #[test]
    fn empty_build_is_empty_manifest() {
        assert!(generate_trace(&[], &FileList::default(), &resolver()).is_empty());
    }

    #[test]
    fn map_path_appends_extension() {
        let f = CompiledFile::new("javascript", "/site/public/app.min.js");
        assert_eq!(f.map_path(), PathBuf::from("/site/public/app.min.js.map"));
    }

    #[test]
    fn compiled_file_json_uses_type_key() {
        let f: CompiledFile =
            serde_json::from_str(r#"{"type":"javascript","path":"/site/public/app.js"}"#).unwrap();
        assert_eq!(f, CompiledFile::new("javascript", "/site/public/app.js"));
    }

    #[test]
    fn static_file_removed_defaults_false() {
        let f: StaticFile = serde_json::from_str(r#"{"destination_path":"/p/a.html"}"#).unwrap();
        assert!(!f.removed);
    }
}
