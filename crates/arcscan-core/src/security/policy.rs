//! Admission decisions for top-level files and container entries.

use std::fs;
use std::io;
use std::path::Path;

use tracing::debug;
use tracing::warn;

use super::bomb::is_bomb;
use crate::Result;
use crate::backend::ArchiveBackend;
use crate::backend::ItemInfo;
use crate::config::ScanLimits;
use crate::engine::TraversalContext;
use crate::types::OutcomeState;

/// Classifies files and entries against the configured [`ScanLimits`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AdmissionPolicy {
    limits: ScanLimits,
}

impl AdmissionPolicy {
    /// Creates a policy enforcing `limits`.
    #[must_use]
    pub const fn new(limits: ScanLimits) -> Self {
        Self { limits }
    }

    /// Limits enforced by this policy.
    #[must_use]
    pub const fn limits(&self) -> &ScanLimits {
        &self.limits
    }

    /// Decides whether a file on disk may be scanned.
    ///
    /// Checks run cheapest first and stop at the first rejection: existence,
    /// directory, file size, the bomb heuristic over the raw bytes, a full
    /// open-and-test by `backend`, and finally the solid-size ceiling.
    ///
    /// # Errors
    ///
    /// Returns `Io` when the filesystem fails for a reason other than the
    /// file being missing, and any hard backend error. A file the backend
    /// does not recognize is `Ok(NotValid)`, not an error.
    pub fn check_file(&self, backend: &dyn ArchiveBackend, path: &Path) -> Result<OutcomeState> {
        let path = std::path::absolute(path)?;

        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(OutcomeState::NotExist),
            Err(e) => return Err(e.into()),
        };
        if metadata.is_dir() {
            return Ok(OutcomeState::IsDirectory);
        }

        let size = metadata.len();
        if size > self.limits.max_file_size_bytes() {
            debug!(path = %path.display(), size, "file exceeds size ceiling");
            return Ok(OutcomeState::FileSizeGreaterThanMax);
        }

        let raw = fs::read(&path)?;
        if is_bomb(&raw) {
            warn!(path = %path.display(), size, "raw file content trips the bomb heuristic");
            return Ok(OutcomeState::Unsafe);
        }
        drop(raw);

        let mut container = match backend.open_path(&path) {
            Ok(container) => container,
            Err(e) if e.is_hard() => return Err(e),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "not a container");
                return Ok(OutcomeState::NotValid);
            }
        };
        match container.validate() {
            Ok(()) => {}
            Err(e) if e.is_hard() => return Err(e),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "container failed its test");
                return Ok(OutcomeState::NotValid);
            }
        }

        if container.is_solid() && size > self.limits.max_solid_size_bytes() {
            debug!(path = %path.display(), size, "solid container exceeds solid ceiling");
            return Ok(OutcomeState::SolidFileSizeGreaterThanMax);
        }

        Ok(OutcomeState::Extractable)
    }

    /// Decides whether an entry may be extracted in `ctx`.
    ///
    /// Only header data is inspected. `Extractable` is optimistic: the bomb
    /// heuristic and the nested-container test run after extraction.
    #[must_use]
    pub fn check_item(&self, item: &ItemInfo, ctx: &TraversalContext) -> OutcomeState {
        if item.size.saturating_add(ctx.allocated_bytes()) > self.limits.max_used_memory_bytes() {
            return OutcomeState::StackFilled;
        }
        if item.size > self.limits.max_buffer_size_bytes() {
            return OutcomeState::BufferSizeGreaterThanMax;
        }
        if item.is_directory {
            return OutcomeState::IsDirectory;
        }
        OutcomeState::Extractable
    }
}
