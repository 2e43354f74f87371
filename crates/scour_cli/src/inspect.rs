//! `scour plan` and `scour show`: read-only views of the trace.

use std::path::Path;

use scour_trace::Manifest;

use crate::build_output::BuildOutput;
use crate::project::open_project;
use crate::{GlobalArgs, OutputsArgs};

/// Runs the `scour plan` command.
///
/// Prints the leftover set `reconcile` would act on as JSON on stdout.
pub fn run_plan(
    args: &OutputsArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    println!("{}", plan_in(args, global, &cwd)?);
    Ok(0)
}

/// Runs the `scour show` command.
///
/// Prints the stored trace as JSON on stdout, `{}` when there is none.
pub fn run_show(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    println!("{}", show_in(global, &cwd)?);
    Ok(0)
}

fn plan_in(
    args: &OutputsArgs,
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<String, Box<dyn std::error::Error>> {
    let project = open_project(global, cwd)?;
    let output = BuildOutput::read(&cwd.join(&args.outputs))?.anchored(&project.dir);
    let leftovers = project.dispatcher.plan(&output.files, &output.file_list);
    to_json(&leftovers)
}

fn show_in(global: &GlobalArgs, cwd: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let project = open_project(global, cwd)?;
    to_json(&project.dispatcher.store().load_or_empty())
}

fn to_json(manifest: &Manifest) -> Result<String, Box<dyn std::error::Error>> {
    Ok(serde_json::to_string_pretty(manifest)?)
}
