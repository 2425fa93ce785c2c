//! CLI argument parsing using clap.

use arcscan_core::ScanLimits;
use clap::Parser;
use clap::Subcommand;
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "arcscan")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output results in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    #[command(flatten)]
    pub limits: LimitArgs,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show archive metadata
    Meta(MetaArgs),
    /// List archive entries from headers
    List(ScanArgs),
    /// Extract entries in memory and report what was found
    Content(ScanArgs),
    /// Generate shell completions
    Completion(CompletionArgs),
}

/// Resource ceilings, in megabytes.
#[derive(clap::Args)]
pub struct LimitArgs {
    /// Maximum size of the archive file
    #[arg(long, global = true, value_name = "MB", default_value = "10")]
    pub max_file_size: u64,

    /// Maximum size of a solid archive
    #[arg(long, global = true, value_name = "MB", default_value = "10")]
    pub max_solid_size: u64,

    /// Maximum uncompressed size of a single entry
    #[arg(long, global = true, value_name = "MB", default_value = "10")]
    pub max_buffer_size: u64,

    /// Maximum memory held by extracted entries at once
    #[arg(long, global = true, value_name = "MB", default_value = "500")]
    pub max_memory: u64,
}

impl LimitArgs {
    pub const fn to_limits(&self) -> ScanLimits {
        ScanLimits::new(
            self.max_file_size,
            self.max_solid_size,
            self.max_buffer_size,
            self.max_memory,
        )
    }
}

#[derive(clap::Args)]
pub struct MetaArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,
}

#[derive(clap::Args)]
pub struct ScanArgs {
    /// Path to the archive file
    #[arg(value_name = "ARCHIVE")]
    pub archive: PathBuf,

    /// Descend into nested archives up to this depth
    #[arg(short, long, value_name = "N", value_parser = clap::value_parser!(u16).range(1..))]
    pub depth: Option<u16>,
}

#[derive(clap::Args)]
pub struct CompletionArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: Shell,
}
