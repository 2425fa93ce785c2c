//! Metadata of a top-level container.

use super::FormatId;
use super::OutcomeState;

/// Counts and sizes of a top-level container.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Meta {
    /// Number of entries (files and folders).
    pub items_count: u32,
    /// Number of folder entries.
    pub folders_count: u32,
    /// Number of file entries.
    pub files_count: u32,
    /// Sum of the uncompressed entry sizes.
    pub size: u64,
    /// Packed size as reported by the backend.
    pub pack_size: u64,
    /// Detected format.
    pub format: FormatId,
}

impl Meta {
    /// Short extension of the detected format, e.g. `"7z"`.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        self.format.extension()
    }
}

/// Metadata, or the reason the file was not opened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MetaOutcome {
    /// The file passed the admission policy.
    Meta(Meta),
    /// The file was rejected.
    Rejected(OutcomeState),
}

impl MetaOutcome {
    /// Returns the metadata if the file was accepted.
    #[must_use]
    pub const fn meta(&self) -> Option<&Meta> {
        match self {
            Self::Meta(meta) => Some(meta),
            Self::Rejected(_) => None,
        }
    }

    /// Returns the rejection state if the file was rejected.
    #[must_use]
    pub const fn rejection(&self) -> Option<OutcomeState> {
        match self {
            Self::Meta(_) => None,
            Self::Rejected(state) => Some(*state),
        }
    }
}
