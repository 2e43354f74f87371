//! Project discovery shared by all commands.

use std::path::{Path, PathBuf};

use scour_config::ScourConfig;
use scour_trace::Dispatcher;
use tracing::debug;

use crate::GlobalArgs;

/// A loaded project: its directory, configuration and dispatcher.
pub struct Project {
    /// The project directory (where `scour.toml` lives).
    pub dir: PathBuf,
    /// The loaded configuration.
    pub config: ScourConfig,
    /// Dispatcher built from the configuration.
    pub dispatcher: Dispatcher,
}

/// Resolves the project directory from `--project` or the working directory.
pub fn resolve_project_dir(global: &GlobalArgs, cwd: &Path) -> PathBuf {
    match &global.project {
        Some(dir) => cwd.join(dir),
        None => cwd.to_path_buf(),
    }
}

/// Loads `scour.toml` and builds the dispatcher for the project.
pub fn open_project(
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<Project, Box<dyn std::error::Error>> {
    let dir = resolve_project_dir(global, cwd);
    let config = scour_config::load_config(&dir)
        .map_err(|e| format!("{} in {}: {e}", scour_config::CONFIG_FILE, dir.display()))?;
    let paths = scour_config::resolve_paths(&config, &dir)?;
    debug!(
        public = %paths.public_dir.display(),
        trace = %paths.trace_file.display(),
        clean = %config.clean,
        source_maps = config.source_maps,
        "loaded project configuration"
    );
    let dispatcher = Dispatcher::from_config(&config, &paths);
    Ok(Project {
        dir,
        config,
        dispatcher,
    })
}
