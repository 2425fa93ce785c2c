//! List command implementation

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
        Some(depth) => scanner.get_content_list_recursive(&args.archive, usize::from(depth)),
        None => scanner.get_content_list(&args.archive),
    };
    let nodes = add_archive_context(nodes, &args.archive)?;

    formatter.format_listing(&args.archive, &nodes)?;
    if count_fail_fast(nodes.iter().map(|info| info.state)) > 0 {
        formatter.format_warning("scan stopped early: unsafe content or memory budget exhausted");
    }
    Ok(())
}
