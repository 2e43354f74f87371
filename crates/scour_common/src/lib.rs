//! Shared foundational types used across the scour workspace.
//!
//! This crate provides the path resolver that maps build outputs into and out
//! of the public directory, and the output descriptor types that the trace
//! generator groups into manifest categories.

#![warn(missing_docs)]

pub mod descriptor;
pub mod paths;

pub use descriptor::{is_source_map_category, OutputDescriptor, OutputKind};
pub use paths::{normalize_lexically, normalize_separators, relative_path, PathResolver};
