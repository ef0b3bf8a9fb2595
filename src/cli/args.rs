//! cli::args
//!
//! Command-line argument definitions using clap derive.
//!
//! # Flags
//!
//! - `--help` / `-h`: Show help
//! - `--version`: Show version
//! - `--config <path>`: Read configuration from this file
//! - `--quiet` / `-q`: Minimal output

use clap::Parser;
use std::path::PathBuf;

/// Strata - an in-memory object store with git-style staging, commits,
/// and branches
#[derive(Parser, Debug)]
#[command(name = "strata")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Script of store commands, one per line (default: read stdin)
    pub script: Option<PathBuf>,

    /// Read configuration from this file instead of the standard locations
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Minimal output; success messages are not echoed
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}
