//! JSON output formatter for machine-readable results.

use super::formatter::JsonOutput;
use super::formatter::OutputFormatter;
use super::formatter::Status;
use anyhow::Result;
use arcscan_core::ArcInfo;
use arcscan_core::Decompressed;
use arcscan_core::MetaOutcome;
use serde::Serialize;
use std::io::Write;
use std::io::{self};
use std::path::Path;

pub struct JsonFormatter;

#[derive(Debug, Serialize)]
struct NodeOutput<'a> {
    path: &'a str,
    depth: usize,
    state: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    bytes: Option<usize>,
}

impl<'a> NodeOutput<'a> {
    fn header(info: &'a ArcInfo) -> Self {
        Self {
            path: &info.base_path,
            depth: info.depth,
            state: info.state.as_str(),
            bytes: None,
        }
    }

    fn extracted(node: &'a Decompressed) -> Self {
        Self {
            bytes: Some(node.buffer.len()),
            ..Self::header(&node.info)
        }
    }
}

#[derive(Debug, Serialize)]
struct ScanOutput<'a> {
    archive: String,
    nodes: Vec<NodeOutput<'a>>,
}

impl JsonFormatter {
    fn output<T: Serialize>(value: &T) -> Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        writeln!(io::stdout(), "{json}")?;
        Ok(())
    }

    fn meta_output(archive: &Path, outcome: &MetaOutcome) -> JsonOutput<serde_json::Value> {
        let archive = archive.display().to_string();
        match outcome {
            MetaOutcome::Meta(meta) => JsonOutput::new(
                "meta",
                Status::Clean,
                serde_json::json!({
                    "archive": archive,
                    "format": meta.extension(),
                    "items_count": meta.items_count,
                    "files_count": meta.files_count,
                    "folders_count": meta.folders_count,
                    "size": meta.size,
                    "pack_size": meta.pack_size,
                }),
            ),
            MetaOutcome::Rejected(state) => JsonOutput::new(
                "meta",
                if state.is_fail_fast() {
                    Status::Aborted
                } else {
                    Status::Partial
                },
                serde_json::json!({
                    "archive": archive,
                    "rejected": state.as_str(),
                }),
            ),
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_meta(&self, archive: &Path, outcome: &MetaOutcome) -> Result<()> {
        Self::output(&Self::meta_output(archive, outcome))
    }

    fn format_listing(&self, archive: &Path, nodes: &[ArcInfo]) -> Result<()> {
        let data = ScanOutput {
            archive: archive.display().to_string(),
            nodes: nodes.iter().map(NodeOutput::header).collect(),
        };
        let status = Status::from_states(nodes.iter().map(|info| info.state));
        Self::output(&JsonOutput::new("list", status, data))
    }

    fn format_content(&self, archive: &Path, nodes: &[Decompressed]) -> Result<()> {
        let data = ScanOutput {
            archive: archive.display().to_string(),
            nodes: nodes.iter().map(NodeOutput::extracted).collect(),
        };
        let status = Status::from_states(nodes.iter().map(|node| node.info.state));
        Self::output(&JsonOutput::new("content", status, data))
    }

    fn format_warning(&self, message: &str) {
        #[derive(Serialize)]
        struct WarningData {
            message: String,
        }

        // Stdout carries exactly one document per command.
        let output = JsonOutput::new(
            "warning",
            Status::Partial,
            WarningData {
                message: message.to_string(),
            },
        );
        if let Ok(json) = serde_json::to_string(&output) {
            let _ = writeln!(io::stderr(), "{json}");
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use arcscan_core::Meta;
    use arcscan_core::OutcomeState;

    #[test]
    fn test_node_output_structure() {
        let info = ArcInfo::new("a.zip->b.txt", 1, OutcomeState::NotValid);
        let node = Decompressed::new(info.clone(), b"abc".to_vec());

        let header = serde_json::to_value(NodeOutput::header(&info)).unwrap();
        assert_eq!(header["path"], "a.zip->b.txt");
        assert_eq!(header["state"], "not_valid");
        assert!(header.get("bytes").is_none());

        let extracted = serde_json::to_value(NodeOutput::extracted(&node)).unwrap();
        assert_eq!(extracted["bytes"], 3);
        assert_eq!(extracted["depth"], 1);
    }

    #[test]
    fn test_meta_output() {
        let meta = Meta {
            items_count: 2,
            files_count: 2,
            ..Meta::default()
        };
        let value =
            serde_json::to_value(JsonFormatter::meta_output(Path::new("a.zip"), &MetaOutcome::Meta(meta)))
                .unwrap();
        assert_eq!(value["operation"], "meta");
        assert_eq!(value["status"], "clean");
        assert_eq!(value["data"]["items_count"], 2);

        let rejected = serde_json::to_value(JsonFormatter::meta_output(
            Path::new("a.zip"),
            &MetaOutcome::Rejected(OutcomeState::FileSizeGreaterThanMax),
        ))
        .unwrap();
        assert_eq!(rejected["status"], "partial");
        assert_eq!(rejected["data"]["rejected"], "file_size_greater_than_max");
    }
}
