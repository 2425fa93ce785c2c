//! Content command implementation
//!
//! Entries are extracted in memory only; the report carries sizes, never
//! the bytes themselves.

use crate::cli::ScanArgs;
use crate::error::add_archive_context;
use crate::output::OutputFormatter;
use crate::output::count_fail_fast;
use anyhow::Result;
use arcscan_core::ArchiveScanner;

pub fn execute(
    args: &ScanArgs,
    scanner: &ArchiveScanner,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let nodes = match args.depth {
        Some(depth) => scanner.get_content_recursive(&args.archive, usize::from(depth)),
        None => scanner.get_content(&args.archive),
    };
    let nodes = add_archive_context(nodes, &args.archive)?;

    formatter.format_content(&args.archive, &nodes)?;
    if count_fail_fast(nodes.iter().map(|node| node.info.state)) > 0 {
        formatter.format_warning("scan stopped early: unsafe content or memory budget exhausted");
    }
    Ok(())
}
