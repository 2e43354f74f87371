//! Build-output reconciliation for the public directory.
//!
//! Each build cycle records which files it wrote into the public directory as
//! a categorized [`Manifest`]. On the next cycle the previous manifest is
//! diffed against the fresh one and files that are no longer produced are
//! deleted, while everything still current is left untouched.
//!
//! The pieces, leaf-first:
//! - [`generator`] turns the build's outputs into a manifest,
//! - [`store`] persists and loads the manifest,
//! - [`differ`] computes the per-category leftover set and spares paths
//!   the build still produces elsewhere,
//! - [`reconciler`] deletes leftovers or wipes the public directory,
//! - [`dispatcher`] picks the strategy from the `clean` setting.

#![warn(missing_docs)]

pub mod differ;
pub mod dispatcher;
pub mod error;
pub mod generator;
pub mod manifest;
pub mod reconciler;
pub mod store;

pub use differ::{diff, spare_produced, DiffOptions};
pub use dispatcher::{CleanMode, CycleOutcome, Dispatcher};
pub use error::{DeleteError, DeleteErrorKind, TraceError};
pub use generator::{generate_trace, output_descriptors, Asset, CompiledFile, FileList, StaticFile};
pub use manifest::Manifest;
pub use reconciler::{protected_segment, remove_files, wipe, RemovalReport};
pub use store::{LoadedTrace, TraceStore};
