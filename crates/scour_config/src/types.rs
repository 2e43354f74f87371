//! Configuration types deserialized from `scour.toml`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer};
use std::fmt;

/// Default location of the trace file, relative to the project directory.
pub const DEFAULT_TRACE_FILE: &str = ".scour-output";

/// The top-level configuration parsed from `scour.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct ScourConfig {
    /// Public directory and trace file locations.
    pub paths: PathsConfig,
    /// Whether the build emits source maps. When disabled, previously
    /// recorded maps are always cleaned up.
    #[serde(default = "default_source_maps")]
    pub source_maps: bool,
    /// Which cleanup strategy runs around each build.
    #[serde(default)]
    pub clean: CleanSetting,
}

/// Filesystem locations, relative to the project directory unless absolute.
#[derive(Debug, Clone, Deserialize)]
pub struct PathsConfig {
    /// The public directory the build writes into.
    pub public: String,
    /// The trace file recording the previous build's outputs. Must live
    /// outside the public directory so that a full wipe leaves it alone.
    #[serde(default = "default_trace")]
    pub trace: String,
}

fn default_source_maps() -> bool {
    true
}

fn default_trace() -> String {
    DEFAULT_TRACE_FILE.to_string()
}

/// The `clean` setting.
///
/// Accepts one of the strings `"all"`, `"none"`, `"brunch-files"`, or a list
/// of manifest category names that restricts selective cleanup to those
/// categories.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CleanSetting {
    /// `"all"`: wipe the whole public directory before each build.
    All,
    /// `"none"`: leave the public directory alone.
    Disabled,
    /// `"brunch-files"`: remove files recorded by the previous build that the
    /// current build no longer produces.
    #[default]
    TrackedFiles,
    /// A list of categories: as [`CleanSetting::TrackedFiles`], limited to
    /// the named categories.
    Categories(Vec<String>),
}

impl fmt::Display for CleanSetting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CleanSetting::All => f.write_str("all"),
            CleanSetting::Disabled => f.write_str("none"),
            CleanSetting::TrackedFiles => f.write_str("brunch-files"),
            CleanSetting::Categories(names) => write!(f, "[{}]", names.join(", ")),
        }
    }
}

impl<'de> Deserialize<'de> for CleanSetting {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct CleanSettingVisitor;

        impl<'de> Visitor<'de> for CleanSettingVisitor {
            type Value = CleanSetting;

            fn expecting(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
                formatter.write_str(
                    "\"all\", \"none\", \"brunch-files\", or a list of category names",
                )
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                match v {
                    "all" => Ok(CleanSetting::All),
                    "none" => Ok(CleanSetting::Disabled),
                    "brunch-files" => Ok(CleanSetting::TrackedFiles),
                    other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
                }
            }

            fn visit_seq<A: de::SeqAccess<'de>>(
                self,
                mut seq: A,
            ) -> Result<Self::Value, A::Error> {
                let mut names = Vec::new();
                while let Some(name) = seq.next_element::<String>()? {
                    names.push(name);
                }
                Ok(CleanSetting::Categories(names))
            }
        }

        deserializer.deserialize_any(CleanSettingVisitor)
    }
}
