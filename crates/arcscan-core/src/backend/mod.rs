//! Archive backend capability.
//!
//! The scanner never parses container formats itself. It asks an
//! [`ArchiveBackend`] to detect and open a file or an in-memory buffer, and
//! then works with the returned [`Container`] only through "list entries,
//! extract one, validate all, is it solid".
//!
//! [`native::NativeBackend`] implements the capability on top of the zip,
//! tar, 7z and single-stream decoders. Any other decoder can be plugged in
//! through [`ArchiveScanner::with_backend`](crate::ArchiveScanner::with_backend)
//! or the process-wide handle in [`shared`].

use std::fmt;
use std::path::Path;

use crate::Result;
use crate::types::FormatId;

pub mod native;
pub mod shared;

pub use native::NativeBackend;
pub use shared::BackendCell;

/// One entry of a container as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemInfo {
    /// Position of the entry, used for extraction.
    pub index: usize,
    /// Path of the entry inside its container.
    pub path: String,
    /// Declared uncompressed size in bytes.
    pub size: u64,
    /// Whether the entry is a directory.
    pub is_directory: bool,
}

impl ItemInfo {
    /// Creates a file entry.
    #[must_use]
    pub fn file(index: usize, path: impl Into<String>, size: u64) -> Self {
        Self {
            index,
            path: path.into(),
            size,
            is_directory: false,
        }
    }

    /// Creates a directory entry.
    #[must_use]
    pub fn directory(index: usize, path: impl Into<String>) -> Self {
        Self {
            index,
            path: path.into(),
            size: 0,
            is_directory: true,
        }
    }
}

/// An opened container.
pub trait Container {
    /// Detected format.
    fn format(&self) -> FormatId;

    /// Entries in the order the backend enumerates them.
    fn items(&self) -> &[ItemInfo];

    /// Extracts the entry at `index` into memory.
    ///
    /// # Errors
    ///
    /// Returns an error if the entry is corrupt, larger than declared, or
    /// the index is out of range.
    fn extract(&mut self, index: usize) -> Result<Vec<u8>>;

    /// Tests every entry without keeping the data.
    ///
    /// # Errors
    ///
    /// Returns an error if any entry fails to decode or checksum.
    fn validate(&mut self) -> Result<()>;

    /// Whether all entries share one compressed block.
    fn is_solid(&self) -> bool;

    /// Packed size in bytes.
    fn pack_size(&self) -> u64;
}

/// Detects and opens containers.
///
/// Implementations must be usable from many threads at once; every `open_*`
/// call returns an independent [`Container`].
pub trait ArchiveBackend: Send + Sync + fmt::Debug {
    /// Opens a container stored in a file.
    ///
    /// # Errors
    ///
    /// Returns `Io` if the file cannot be read, or a soft error if the data
    /// is not a supported container.
    fn open_path(&self, path: &Path) -> Result<Box<dyn Container>>;

    /// Opens a container held in memory.
    ///
    /// # Errors
    ///
    /// Returns a soft error if the bytes are not a supported container.
    fn open_bytes<'a>(&self, bytes: &'a [u8]) -> Result<Box<dyn Container + 'a>>;
}
