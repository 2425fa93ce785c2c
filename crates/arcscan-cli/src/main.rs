//! Arcscan CLI - Command-line utility for recursive, bomb-aware archive
//! inspection.

mod cli;
mod commands;
mod error;
mod output;

use anyhow::Context;
use anyhow::Result;
use arcscan_core::ArchiveScanner;
use arcscan_core::backend::shared;
use clap::Parser;
use tracing_subscriber::EnvFilter;

fn init_tracing(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> Result<()> {
    let cli = cli::Cli::parse();

    if let cli::Commands::Completion(args) = &cli.command {
        commands::completion::execute(args.shell);
        return Ok(());
    }

    init_tracing(cli.verbose, cli.quiet);
    shared::init_native().context("failed to initialize archive backend")?;
    let scanner = ArchiveScanner::new(cli.limits.to_limits())?;

    let formatter = output::create_formatter(cli.json, cli.verbose, cli.quiet);

    match &cli.command {
        cli::Commands::Meta(args) => commands::meta::execute(args, &scanner, &*formatter),
        cli::Commands::List(args) => commands::list::execute(args, &scanner, &*formatter),
        cli::Commands::Content(args) => commands::content::execute(args, &scanner, &*formatter),
        cli::Commands::Completion(_) => Ok(()),
    }
}
