//! Recursive traversal of nested containers.
//!
//! Both walkers visit entries in the order the backend enumerates them and
//! go depth-first. At each entry they ask the
//! [`AdmissionPolicy`](crate::security::AdmissionPolicy) first,
//! extract only admitted entries, run the bomb heuristic on every extracted
//! buffer and then try to open the buffer as a container of its own.
//!
//! A `StackFilled` or `Unsafe` node ends the whole call: the walker that
//! sees it returns [`Flow::Abort`] and every caller up the recursion stops
//! its own sibling loop.

use tracing::debug;
use tracing::warn;

use crate::Result;
use crate::backend::ArchiveBackend;
use crate::backend::Container;
use crate::types::OutcomeState;

pub mod content;
pub mod context;
pub mod listing;

pub use content::ContentWalker;
pub use context::DepthGuard;
pub use context::TraversalContext;
pub use listing::ListingWalker;

/// Whether a walk may go on with the next sibling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Flow {
    /// Keep scanning.
    Continue,
    /// A fail-fast node was recorded; unwind the whole call.
    Abort,
}

impl Flow {
    /// Whether the walk was aborted.
    #[must_use]
    pub const fn is_abort(self) -> bool {
        matches!(self, Self::Abort)
    }
}

/// Outcome of admitting one entry, before any extraction.
pub(crate) enum Admission {
    /// Extract and inspect the entry.
    Extract,
    /// Record the node without bytes and go on.
    Record(OutcomeState),
    /// Record the node without bytes and abort the call.
    Abort(OutcomeState),
    /// Do not record the entry at all.
    Skip,
}

pub(crate) fn admit(state: OutcomeState) -> Admission {
    match state {
        OutcomeState::Extractable => Admission::Extract,
        OutcomeState::NotExist | OutcomeState::IsDirectory => Admission::Skip,
        state if state.is_fail_fast() => Admission::Abort(state),
        state => Admission::Record(state),
    }
}

/// Extracts one admitted entry.
///
/// A soft failure means the member is corrupt even though the container
/// passed its test; it is reported as `Ok(None)`.
pub(crate) fn extract_member(
    container: &mut dyn Container,
    index: usize,
    path: &str,
) -> Result<Option<Vec<u8>>> {
    match container.extract(index) {
        Ok(buffer) => Ok(Some(buffer)),
        Err(e) if e.is_hard() => Err(e),
        Err(e) => {
            warn!(path, error = %e, "corrupt member");
            Ok(None)
        }
    }
}

/// Opens `buffer` as a nested container and tests it.
///
/// Returns `Ok(None)` when the bytes are not a valid container.
pub(crate) fn open_nested<'a>(
    backend: &dyn ArchiveBackend,
    buffer: &'a [u8],
    path: &str,
) -> Result<Option<Box<dyn Container + 'a>>> {
    let opened = backend.open_bytes(buffer).and_then(|mut container| {
        container.validate()?;
        Ok(container)
    });
    match opened {
        Ok(container) => {
            debug!(path, format = ?container.format(), entries = container.items().len(), "nested container");
            Ok(Some(container))
        }
        Err(e) if e.is_hard() => Err(e),
        Err(e) => {
            debug!(path, error = %e, "not a nested container");
            Ok(None)
        }
    }
}
