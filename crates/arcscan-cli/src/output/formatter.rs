//! Output formatter trait for CLI results.

use anyhow::Result;
use arcscan_core::ArcInfo;
use arcscan_core::Decompressed;
use arcscan_core::MetaOutcome;
use arcscan_core::OutcomeState;
use serde::Serialize;
use std::path::Path;

/// Common output formatter trait
pub trait OutputFormatter {
    /// Format archive metadata or the reason it was rejected
    fn format_meta(&self, archive: &Path, outcome: &MetaOutcome) -> Result<()>;

    /// Format a header-only listing
    fn format_listing(&self, archive: &Path, nodes: &[ArcInfo]) -> Result<()>;

    /// Format extracted nodes; bytes are summarized, never printed
    fn format_content(&self, archive: &Path, nodes: &[Decompressed]) -> Result<()>;

    /// Format warning message
    fn format_warning(&self, message: &str);
}

/// Generic JSON output structure
#[derive(Debug, Serialize)]
pub struct JsonOutput<T> {
    pub operation: String,
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    /// Every node passed the policy
    Clean,
    /// Some nodes were rejected, none of them fail-fast
    Partial,
    /// The scan stopped on an unsafe node or the memory budget
    Aborted,
}

impl Status {
    pub fn from_states(states: impl IntoIterator<Item = OutcomeState>) -> Self {
        let mut status = Self::Clean;
        for state in states {
            if state.is_fail_fast() {
                return Self::Aborted;
            }
            if state.is_rejection() && state != OutcomeState::NotValid {
                status = Self::Partial;
            }
        }
        status
    }
}

impl<T: Serialize> JsonOutput<T> {
    pub fn new(operation: impl Into<String>, status: Status, data: T) -> Self {
        Self {
            operation: operation.into(),
            status,
            data: Some(data),
        }
    }
}

/// Number of nodes that stopped the scan.
pub fn count_fail_fast(states: impl IntoIterator<Item = OutcomeState>) -> usize {
    states.into_iter().filter(|state| state.is_fail_fast()).count()
}
