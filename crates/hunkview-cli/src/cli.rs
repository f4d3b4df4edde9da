use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use hunkview_script::DiffAlgorithm;

#[derive(Parser)]
#[command(
    name = "hunkview",
    about = "hunkview: sparse, intraline-aware file diffs",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// TOML file with diff settings; flags override it
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show the differences between two files
    Diff(DiffArgs),
    /// Print the effective diff configuration
    Config,
}

#[derive(Args)]
pub struct DiffArgs {
    /// The old revision of the file
    pub old: PathBuf,
    /// The new revision of the file
    pub new: PathBuf,
    #[arg(long, default_value = "text")]
    pub format: OutputFormat,
    /// Common lines shown around each change
    #[arg(short = 'U', long, conflicts_with = "full")]
    pub context: Option<usize>,
    /// Load and show both files completely
    #[arg(long)]
    pub full: bool,
    #[arg(long)]
    pub no_intraline: bool,
    #[arg(long)]
    pub algorithm: Option<DiffAlgorithm>,
    /// Colour text output
    #[arg(long)]
    pub color: bool,
    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,
}
