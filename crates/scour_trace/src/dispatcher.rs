//! Cleanup strategy selection and the two per-cycle dispatch points.
//!
//! Selective cleanup happens after the build: the fresh manifest is diffed
//! against the persisted one, so files that are still produced are never
//! deleted mid-build. Full wipes happen before the build. The trace file is
//! written last, so an interrupted cycle is recomputed correctly next time.

use std::path::Path;

use scour_common::PathResolver;
use scour_config::{CleanSetting, ResolvedPaths, ScourConfig};
use tracing::info;

use crate::differ::{diff, spare_produced, DiffOptions};
use crate::error::TraceError;
use crate::generator::{generate_trace, CompiledFile, FileList};
use crate::manifest::Manifest;
use crate::reconciler::{remove_files, wipe, RemovalReport};
use crate::store::TraceStore;

/// The cleanup strategy, fixed by configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CleanMode {
    /// Remove files the previous build produced and this one didn't.
    Selective,
    /// As [`CleanMode::Selective`], limited to the listed categories.
    SelectiveFiltered(Vec<String>),
    /// Delete the public directory's contents before each build.
    FullWipe,
    /// Do nothing: no deletions, no trace I/O.
    Disabled,
}

impl From<&CleanSetting> for CleanMode {
    fn from(setting: &CleanSetting) -> Self {
        match setting {
            CleanSetting::All => CleanMode::FullWipe,
            CleanSetting::Disabled => CleanMode::Disabled,
            CleanSetting::TrackedFiles => CleanMode::Selective,
            CleanSetting::Categories(names) => CleanMode::SelectiveFiltered(names.clone()),
        }
    }
}

/// What one dispatch point did.
#[derive(Debug, Default)]
pub struct CycleOutcome {
    /// The leftover set that was acted on (empty for wipes and no-ops).
    pub leftovers: Manifest,
    /// Removal results.
    pub report: RemovalReport,
    /// Whether a new trace was persisted.
    pub trace_written: bool,
}

/// Runs the configured cleanup strategy around a build.
#[derive(Debug, Clone)]
pub struct Dispatcher {
    mode: CleanMode,
    resolver: PathResolver,
    source_maps: bool,
    store: TraceStore,
}

impl Dispatcher {
    /// Creates a dispatcher for an explicit mode, public directory and trace file.
    pub fn new(
        mode: CleanMode,
        public_dir: impl AsRef<Path>,
        trace_file: impl AsRef<Path>,
        source_maps: bool,
    ) -> Self {
        Self {
            mode,
            resolver: PathResolver::new(public_dir.as_ref()),
            source_maps,
            store: TraceStore::new(trace_file.as_ref()),
        }
    }

    /// Creates a dispatcher from a loaded configuration and its resolved paths.
    pub fn from_config(config: &ScourConfig, paths: &ResolvedPaths) -> Self {
        Self::new(
            CleanMode::from(&config.clean),
            &paths.public_dir,
            &paths.trace_file,
            config.source_maps,
        )
    }

    /// Returns the configured mode.
    pub fn mode(&self) -> &CleanMode {
        &self.mode
    }

    /// Returns the public directory.
    pub fn public_dir(&self) -> &Path {
        self.resolver.public_dir()
    }

    /// Returns the trace store.
    pub fn store(&self) -> &TraceStore {
        &self.store
    }

    /// Pre-build dispatch.
    ///
    /// Wipes the public directory in [`CleanMode::FullWipe`], protecting the
    /// entry that holds `cwd`. Every other mode does nothing here.
    pub fn before_build(&self, cwd: &Path) -> CycleOutcome {
        match self.mode {
            CleanMode::FullWipe => {
                info!(public = %self.public_dir().display(), "wiping public directory");
                CycleOutcome {
                    report: wipe(self.public_dir(), cwd),
                    ..CycleOutcome::default()
                }
            }
            _ => CycleOutcome::default(),
        }
    }

    /// Post-build dispatch.
    ///
    /// In the selective modes: builds the new manifest, removes what the
    /// previous one listed and this one doesn't produce at all, then persists
    /// the new one.
    /// Only the final save can fail. Full-wipe and disabled modes touch
    /// neither the filesystem nor the trace here.
    pub fn after_build(
        &self,
        files: &[CompiledFile],
        file_list: &FileList,
    ) -> Result<CycleOutcome, TraceError> {
        let Some(options) = self.diff_options() else {
            return Ok(CycleOutcome::default());
        };

        let current = generate_trace(files, file_list, &self.resolver);
        let leftovers = self.leftovers(&current, &options);
        info!(
            stale = leftovers.path_count(),
            tracked = current.path_count(),
            "reconciling public directory"
        );

        let report = remove_files(&leftovers, self.public_dir());
        self.store.save(&current)?;

        Ok(CycleOutcome {
            leftovers,
            report,
            trace_written: true,
        })
    }

    /// Computes the leftover set `after_build` would act on, without
    /// deleting anything or writing the trace.
    pub fn plan(&self, files: &[CompiledFile], file_list: &FileList) -> Manifest {
        let Some(options) = self.diff_options() else {
            return Manifest::new();
        };
        let current = generate_trace(files, file_list, &self.resolver);
        self.leftovers(&current, &options)
    }

    /// The stale set, minus anything the build still produces under another
    /// category.
    fn leftovers(&self, current: &Manifest, options: &DiffOptions) -> Manifest {
        let stale = diff(&self.store.load_or_empty(), current, options);
        spare_produced(&stale, current, options)
    }

    fn diff_options(&self) -> Option<DiffOptions> {
        let categories = match &self.mode {
            CleanMode::Selective => None,
            CleanMode::SelectiveFiltered(names) => Some(names.clone()),
            CleanMode::FullWipe | CleanMode::Disabled => return None,
        };
        Some(DiffOptions {
            source_maps: self.source_maps,
            categories,
        })
    }
}
