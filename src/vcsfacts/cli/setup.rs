use clap::Parser;
use std::path::PathBuf;

/// Attributes reported when neither the command line nor the config names any.
pub const DEFAULT_ATTRIBUTES: [&str; 2] = ["branch", "dirty"];

#[derive(Parser, Debug)]
#[command(name = "vcsfacts", bin_name = "vcsfacts", version)]
#[command(about = "Repository facts for shell prompts", long_about = None)]
#[command(
    after_help = "Attributes:\n  vcs revision branch tag state has-remote ahead behind has-stash stashes\n  dirty has-added added has-modified modified has-deleted deleted\n  has-renamed renamed has-unmerged unmerged has-untracked"
)]
pub struct Cli {
    /// Directory inside the repository
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Attributes to report, comma separated (repeatable)
    #[arg(
        short,
        long = "attributes",
        value_name = "NAMES",
        value_delimiter = ',',
        help_heading = "Selection"
    )]
    pub attributes: Vec<String>,

    /// Report every attribute
    #[arg(long, conflicts_with = "attributes", help_heading = "Selection")]
    pub all: bool,

    /// Print a JSON object instead of name=value lines
    #[arg(long, help_heading = "Output")]
    pub json: bool,

    /// Do not count untracked files as dirty
    #[arg(long, help_heading = "Detection")]
    pub ignore_untracked: bool,

    /// Also detect renames from rewrites
    #[arg(long, help_heading = "Detection")]
    pub renames_from_rewrites: bool,

    /// Include submodules in status scans
    #[arg(long, help_heading = "Detection")]
    pub include_submodules: bool,

    /// Give up after this many milliseconds and report what was found
    #[arg(long, value_name = "MS", help_heading = "Detection")]
    pub timeout_ms: Option<u64>,

    /// Config file to use instead of the default location
    #[arg(long, value_name = "FILE", help_heading = "Options")]
    pub config: Option<PathBuf>,

    /// Verbose output (debug logs on stderr)
    #[arg(short, long, help_heading = "Options")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose", help_heading = "Options")]
    pub quiet: bool,
}
