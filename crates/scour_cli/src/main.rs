//! scour CLI: drives build-output reconciliation around an external build.
//!
//! Provides `scour clean` to run before a build, `scour reconcile` to run
//! after it, `scour plan` to preview what reconciliation would remove, and
//! `scour show` to print the stored trace.

#![warn(missing_docs)]

mod build_output;
mod cycle;
mod inspect;
mod logging;
mod project;

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

/// scour: keep a build's public directory free of stale outputs.
#[derive(Parser, Debug)]
#[command(name = "scour", version, about = "Build output reconciliation")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Project directory containing `scour.toml` (defaults to the current directory).
    #[arg(long, global = true)]
    pub project: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Pre-build step: wipe the public directory when `clean = "all"`.
    Clean,
    /// Post-build step: remove stale outputs and record the new trace.
    Reconcile(OutputsArgs),
    /// Print the files `reconcile` would remove, without removing them.
    Plan(OutputsArgs),
    /// Print the stored trace.
    Show,
}

/// Arguments for commands that consume a build-output listing.
#[derive(Parser, Debug)]
pub struct OutputsArgs {
    /// JSON file listing the build's compiled files, static files and assets.
    #[arg(short, long)]
    pub outputs: PathBuf,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Optional project directory.
    pub project: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    logging::init(cli.quiet, cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        project: cli.project,
    };

    let result = match cli.command {
        Command::Clean => cycle::run_clean(&global),
        Command::Reconcile(ref args) => cycle::run_reconcile(args, &global),
        Command::Plan(ref args) => inspect::run_plan(args, &global),
        Command::Show => inspect::run_show(&global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_clean() {
        let cli = Cli::parse_from(["scour", "clean"]);
        assert!(matches!(cli.command, Command::Clean));
        assert!(cli.project.is_none());
    }

    #[test]
    fn parse_reconcile_with_outputs() {
        let cli = Cli::parse_from(["scour", "reconcile", "--outputs", "build.json"]);
        match cli.command {
            Command::Reconcile(ref args) => {
                assert_eq!(args.outputs, PathBuf::from("build.json"));
            }
            _ => panic!("expected Reconcile command"),
        }
    }

    #[test]
    fn parse_plan_short_flag() {
        let cli = Cli::parse_from(["scour", "plan", "-o", "out.json"]);
        assert!(matches!(cli.command, Command::Plan(_)));
    }

    #[test]
    fn reconcile_requires_outputs() {
        assert!(Cli::try_parse_from(["scour", "reconcile"]).is_err());
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from(["scour", "--quiet", "--project", "site", "show"]);
        assert!(cli.quiet);
        assert!(!cli.verbose);
        assert_eq!(cli.project, Some(PathBuf::from("site")));
    }

    #[test]
    fn parse_verbose_after_subcommand() {
        let cli = Cli::parse_from(["scour", "show", "--verbose"]);
        assert!(cli.verbose);
    }

    #[test]
    fn unknown_command_errors() {
        assert!(Cli::try_parse_from(["scour", "build"]).is_err());
    }
}
