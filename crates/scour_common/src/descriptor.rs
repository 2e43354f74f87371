//! Output descriptors: one record per artifact a build wrote into the public
//! directory.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Marker that identifies source-map categories (`javascript-maps`, ...).
const SOURCE_MAP_MARKER: &str = "-maps";

/// The kind of artifact an [`OutputDescriptor`] records.
///
/// Compiled files carry the pipeline's own type name (`javascript`,
/// `stylesheet`, `template`, ...); every compiled file also implies a source
/// map of the matching `-map` type.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutputKind {
    /// A joined/compiled output file of the given pipeline type.
    Compiled(String),
    /// The source map accompanying a compiled file of the given type.
    SourceMap(String),
    /// A static file compiled into the public directory.
    CompiledAsset,
    /// An asset copied verbatim into the public directory.
    Asset,
}

impl OutputKind {
    /// Returns the type tag, e.g. `javascript`, `javascript-map`, `asset`.
    pub fn type_tag(&self) -> String {
        match self {
            OutputKind::Compiled(ty) => ty.clone(),
            OutputKind::SourceMap(ty) => format!("{ty}-map"),
            OutputKind::CompiledAsset => "compiled-asset".to_string(),
            OutputKind::Asset => "asset".to_string(),
        }
    }

    /// Returns the manifest category: the type tag with an `s` appended.
    pub fn category(&self) -> String {
        format!("{}s", self.type_tag())
    }
}

impl fmt::Display for OutputKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.type_tag())
    }
}

/// One produced artifact: its kind and its path as written by the build.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputDescriptor {
    /// What kind of artifact this is.
    pub kind: OutputKind,
    /// Path of the artifact, normally absolute and inside the public directory.
    pub path: PathBuf,
}

impl OutputDescriptor {
    /// Creates a descriptor for the given kind and path.
    pub fn new(kind: OutputKind, path: impl Into<PathBuf>) -> Self {
        Self {
            kind,
            path: path.into(),
        }
    }
}

/// Returns `true` if a manifest category holds source maps.
pub fn is_source_map_category(category: &str) -> bool {
    category.contains(SOURCE_MAP_MARKER)
}
