//! Parsing and validation of `scour.toml` project configuration files.
//!
//! This crate reads the project configuration and produces a strongly-typed
//! [`ScourConfig`], plus the absolute public directory and trace file
//! locations the reconciliation cycle operates on.

#![warn(missing_docs)]

pub mod error;
pub mod loader;
pub mod resolve;
pub mod types;

pub use error::ConfigError;
pub use loader::{load_config, load_config_from_str, CONFIG_FILE};
pub use resolve::{resolve_paths, ResolvedPaths};
pub use types::*;
