//! Human-readable output formatter with colors and styling.

use super::formatter::OutputFormatter;
use super::formatter::count_fail_fast;
use anyhow::Result;
use arcscan_core::ArcInfo;
use arcscan_core::Decompressed;
use arcscan_core::MetaOutcome;
use arcscan_core::OutcomeState;
use console::StyledObject;
use console::Term;
use console::style;
use std::path::Path;

pub struct HumanFormatter {
    verbose: bool,
    quiet: bool,
    use_colors: bool,
    term: Term,
}

impl HumanFormatter {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            verbose,
            quiet,
            use_colors: console::colors_enabled(),
            term: Term::stdout(),
        }
    }

    fn format_size(bytes: u64) -> String {
        const KB: u64 = 1024;
        const MB: u64 = KB * 1024;
        const GB: u64 = MB * 1024;

        if bytes >= GB {
            format!("{:.1} GB", bytes as f64 / GB as f64)
        } else if bytes >= MB {
            format!("{:.1} MB", bytes as f64 / MB as f64)
        } else if bytes >= KB {
            format!("{:.1} KB", bytes as f64 / KB as f64)
        } else {
            format!("{bytes} B")
        }
    }

    fn format_number(n: usize) -> String {
        let s = n.to_string();
        let mut result = String::new();
        let mut count = 0;

        for c in s.chars().rev() {
            if count == 3 {
                result.push(',');
                count = 0;
            }
            result.push(c);
            count += 1;
        }

        result.chars().rev().collect()
    }

    fn styled_state(state: OutcomeState) -> StyledObject<&'static str> {
        let label = style(state.as_str());
        if state.is_fail_fast() {
            label.red().bold()
        } else if state == OutcomeState::Extractable || state == OutcomeState::NotValid {
            label.green()
        } else {
            label.yellow()
        }
    }

    fn state_label(&self, state: OutcomeState) -> String {
        if self.use_colors {
            Self::styled_state(state).to_string()
        } else {
            state.as_str().to_string()
        }
    }

    /// Indents nested nodes so the tree shape stays visible.
    fn node_line(&self, info: &ArcInfo, suffix: &str) -> String {
        let indent = "  ".repeat(info.depth.saturating_sub(1));
        format!(
            "{indent}{}  [{}]{suffix}",
            info.base_path,
            self.state_label(info.state)
        )
    }

    fn write_summary(&self, archive: &Path, nodes: usize, states: &[OutcomeState]) {
        let _ = self.term.write_line("");
        let _ = self.term.write_line(&format!(
            "{}: {} nodes",
            archive.display(),
            Self::format_number(nodes)
        ));
        let rejected = states
            .iter()
            .filter(|state| state.is_rejection() && **state != OutcomeState::NotValid)
            .count();
        let _ = self.term.write_line(&format!(
            "  Rejected: {}  Stopped: {}",
            Self::format_number(rejected),
            count_fail_fast(states.iter().copied())
        ));
    }
}

impl OutputFormatter for HumanFormatter {
    fn format_meta(&self, archive: &Path, outcome: &MetaOutcome) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        match outcome {
            MetaOutcome::Meta(meta) => {
                let _ = self.term.write_line(&format!("Archive: {}", archive.display()));
                let extension = if meta.extension().is_empty() {
                    "unknown"
                } else {
                    meta.extension()
                };
                let _ = self.term.write_line(&format!("  Format:       {extension}"));
                let _ = self
                    .term
                    .write_line(&format!("  Items:        {}", meta.items_count));
                let _ = self
                    .term
                    .write_line(&format!("  Files:        {}", meta.files_count));
                let _ = self
                    .term
                    .write_line(&format!("  Directories:  {}", meta.folders_count));
                let _ = self.term.write_line(&format!(
                    "  Total size:   {}",
                    Self::format_size(meta.size)
                ));
                let _ = self.term.write_line(&format!(
                    "  Packed size:  {}",
                    Self::format_size(meta.pack_size)
                ));
            }
            MetaOutcome::Rejected(state) => {
                let _ = self.term.write_line(&format!(
                    "{}  [{}]",
                    archive.display(),
                    self.state_label(*state)
                ));
            }
        }

        Ok(())
    }

    fn format_listing(&self, archive: &Path, nodes: &[ArcInfo]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        for info in nodes {
            let _ = self.term.write_line(&self.node_line(info, ""));
        }

        if self.verbose {
            let states: Vec<_> = nodes.iter().map(|info| info.state).collect();
            self.write_summary(archive, nodes.len(), &states);
        }

        Ok(())
    }

    fn format_content(&self, archive: &Path, nodes: &[Decompressed]) -> Result<()> {
        if self.quiet {
            return Ok(());
        }

        let mut total = 0u64;
        for node in nodes {
            let size = node.buffer.len() as u64;
            total = total.saturating_add(size);
            let suffix = if node.buffer.is_empty() {
                String::new()
            } else {
                format!("  {}", Self::format_size(size))
            };
            let _ = self.term.write_line(&self.node_line(&node.info, &suffix));
        }

        if self.verbose {
            let states: Vec<_> = nodes.iter().map(|node| node.info.state).collect();
            self.write_summary(archive, nodes.len(), &states);
            let _ = self
                .term
                .write_line(&format!("  Extracted: {}", Self::format_size(total)));
        }

        Ok(())
    }

    fn format_warning(&self, message: &str) {
        if self.quiet {
            return;
        }

        if self.use_colors {
            let _ = self
                .term
                .write_line(&format!("{} {message}", style("⚠").yellow().bold()));
        } else {
            let _ = self.term.write_line(&format!("WARNING: {message}"));
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn plain() -> HumanFormatter {
        HumanFormatter {
            verbose: false,
            quiet: false,
            use_colors: false,
            term: Term::stdout(),
        }
    }

    #[test]
    fn test_format_size_bytes() {
        assert_eq!(HumanFormatter::format_size(0), "0 B");
        assert_eq!(HumanFormatter::format_size(512), "512 B");
        assert_eq!(HumanFormatter::format_size(1023), "1023 B");
    }

    #[test]
    fn test_format_size_kilobytes() {
        assert_eq!(HumanFormatter::format_size(1024), "1.0 KB");
        assert_eq!(HumanFormatter::format_size(1536), "1.5 KB");
    }

    #[test]
    fn test_format_size_megabytes() {
        assert_eq!(HumanFormatter::format_size(1024 * 1024), "1.0 MB");
        assert_eq!(HumanFormatter::format_size(1536 * 1024), "1.5 MB");
    }

    #[test]
    fn test_format_size_gigabytes() {
        assert_eq!(HumanFormatter::format_size(1024 * 1024 * 1024), "1.0 GB");
        assert_eq!(HumanFormatter::format_size(u64::MAX), "17179869184.0 GB");
    }

    #[test]
    fn test_format_number() {
        assert_eq!(HumanFormatter::format_number(0), "0");
        assert_eq!(HumanFormatter::format_number(999), "999");
        assert_eq!(HumanFormatter::format_number(1000), "1,000");
        assert_eq!(HumanFormatter::format_number(1_234_567), "1,234,567");
    }

    #[test]
    fn test_node_line_indents_by_depth() {
        let formatter = plain();
        let top = ArcInfo::new("a.zip->b.zip", 1, OutcomeState::Extractable);
        let nested = ArcInfo::new("a.zip->b.zip->c.txt", 2, OutcomeState::NotValid);
        assert_eq!(formatter.node_line(&top, ""), "a.zip->b.zip  [extractable]");
        assert_eq!(
            formatter.node_line(&nested, "  4 B"),
            "  a.zip->b.zip->c.txt  [not_valid]  4 B"
        );
    }

    #[test]
    fn test_rejected_top_level_not_indented() {
        let formatter = plain();
        let info = ArcInfo::new("missing.zip", 0, OutcomeState::NotExist);
        assert_eq!(formatter.node_line(&info, ""), "missing.zip  [not_exist]");
    }
}
