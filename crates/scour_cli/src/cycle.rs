//! `scour clean` and `scour reconcile`: the two dispatch points of a cycle.

use std::path::Path;

use scour_trace::RemovalReport;

use crate::build_output::BuildOutput;
use crate::project::open_project;
use crate::{GlobalArgs, OutputsArgs};

/// Runs the `scour clean` command (pre-build).
pub fn run_clean(global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    clean_in(global, &cwd)
}

/// Runs the `scour reconcile` command (post-build).
pub fn run_reconcile(
    args: &OutputsArgs,
    global: &GlobalArgs,
) -> Result<i32, Box<dyn std::error::Error>> {
    let cwd = std::env::current_dir()?;
    reconcile_in(args, global, &cwd)
}

fn clean_in(global: &GlobalArgs, cwd: &Path) -> Result<i32, Box<dyn std::error::Error>> {
    let project = open_project(global, cwd)?;
    if !global.quiet {
        eprintln!(
            "  Cleaning {} (clean = {})",
            project.dispatcher.public_dir().display(),
            project.config.clean
        );
    }

    let outcome = project.dispatcher.before_build(cwd);
    print_report(&outcome.report, global);
    Ok(0)
}

fn reconcile_in(
    args: &OutputsArgs,
    global: &GlobalArgs,
    cwd: &Path,
) -> Result<i32, Box<dyn std::error::Error>> {
    let project = open_project(global, cwd)?;
    let output = BuildOutput::read(&cwd.join(&args.outputs))?.anchored(&project.dir);

    let outcome = project
        .dispatcher
        .after_build(&output.files, &output.file_list)?;

    print_report(&outcome.report, global);
    if !global.quiet && outcome.trace_written {
        eprintln!("  Recorded {}", project.dispatcher.store().path().display());
    }
    Ok(0)
}

/// Prints a removal summary; removal failures never change the exit code.
fn print_report(report: &RemovalReport, global: &GlobalArgs) {
    if global.quiet {
        return;
    }
    if global.verbose {
        for path in &report.removed {
            eprintln!("   Removed {}", path.display());
        }
    }
    for failure in &report.failed {
        eprintln!("   Skipped {failure}");
    }
    eprintln!(
        "  Finished {} removed, {} already gone, {} failed",
        report.removed.len(),
        report.missing.len(),
        report.failed.len()
    );
}
