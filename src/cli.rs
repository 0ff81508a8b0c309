use std::path::PathBuf;

use clap::Parser;

use crate::cmd::Commands;

/// Simple, file-backed personal task list.
/// Storage defaults to ~/.daink or a directory passed via --data-dir.
#[derive(Parser)]
#[command(name = "daink", version, about = "Personal task list for the terminal")]
pub struct Cli {
    /// Directory holding the task collection and theme preference.
    #[arg(long, global = true)]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}
