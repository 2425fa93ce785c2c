//! Meta command implementation

use crate::cli::MetaArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use anyhow::Result;
use arcscan_core::ArchiveScanner;

pub fn execute(
    args: &MetaArgs,
    scanner: &ArchiveScanner,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let outcome = add_archive_context(scanner.get_metadata(&args.archive), &args.archive)?;
    formatter.format_meta(&args.archive, &outcome)
}
