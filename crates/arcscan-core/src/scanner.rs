//! Public entry point.

use std::path::Path;
use std::sync::Arc;

use tracing::debug;

use crate::Result;
use crate::backend::ArchiveBackend;
use crate::backend::Container;
use crate::backend::shared;
use crate::config::ScanLimits;
use crate::engine::ContentWalker;
use crate::engine::ListingWalker;
use crate::engine::TraversalContext;
use crate::security::AdmissionPolicy;
use crate::types::ArcInfo;
use crate::types::Content;
use crate::types::ContentList;
use crate::types::Decompressed;
use crate::types::Meta;
use crate::types::MetaOutcome;
use crate::types::OutcomeState;

/// Scans containers on disk within fixed resource limits.
///
/// A scanner holds only immutable state, so one instance can serve many
/// threads at once. Every call builds its own traversal context.
///
/// Node paths start with the file path exactly as passed in, followed by
/// `->` and the entry path for each level of nesting.
///
/// # Examples
///
/// ```no_run
/// use arcscan_core::ArchiveScanner;
/// use arcscan_core::ScanLimits;
/// use arcscan_core::backend::shared;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// shared::init_native()?;
/// let scanner = ArchiveScanner::new(ScanLimits::default())?;
/// for node in scanner.get_content_recursive("upload.zip", 4)? {
///     println!("{} {} {}", node.info.base_path, node.info.depth, node.info.state);
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ArchiveScanner {
    backend: Arc<dyn ArchiveBackend>,
    policy: AdmissionPolicy,
}

impl ArchiveScanner {
    /// Creates a scanner using the process-wide backend.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if [`shared::init_with`] or
    /// [`shared::init_native`] has not succeeded yet.
    pub fn new(limits: ScanLimits) -> Result<Self> {
        Ok(Self::with_backend(limits, shared::handle()?))
    }

    /// Creates a scanner using `backend`.
    #[must_use]
    pub fn with_backend(limits: ScanLimits, backend: Arc<dyn ArchiveBackend>) -> Self {
        Self {
            backend,
            policy: AdmissionPolicy::new(limits),
        }
    }

    /// Limits enforced by this scanner.
    #[must_use]
    pub const fn limits(&self) -> &ScanLimits {
        self.policy.limits()
    }

    /// Reads counts, sizes and format of a top-level container.
    ///
    /// # Errors
    ///
    /// Returns hard errors only; a rejected file is
    /// [`MetaOutcome::Rejected`].
    pub fn get_metadata<P: AsRef<Path>>(&self, path: P) -> Result<MetaOutcome> {
        let path = path.as_ref();
        let state = self.policy.check_file(self.backend.as_ref(), path)?;
        if state != OutcomeState::Extractable {
            return Ok(MetaOutcome::Rejected(state));
        }

        let Some(container) = self.open_checked(path)? else {
            return Ok(MetaOutcome::Rejected(OutcomeState::NotValid));
        };
        Ok(MetaOutcome::Meta(summarize(container.as_ref())))
    }

    /// Extracts the direct entries of a container without looking inside
    /// nested containers.
    ///
    /// # Errors
    ///
    /// Returns hard errors only; policy outcomes are nodes in the result.
    pub fn get_content<P: AsRef<Path>>(&self, path: P) -> Result<Content> {
        self.content(path.as_ref(), TraversalContext::single_level())
    }

    /// Extracts a container tree down to `depth_limit` levels.
    ///
    /// Returns the leaves of the tree with their bytes. A limit of 0 is
    /// treated as 1.
    ///
    /// # Errors
    ///
    /// Returns hard errors only; policy outcomes are nodes in the result.
    pub fn get_content_recursive<P: AsRef<Path>>(
        &self,
        path: P,
        depth_limit: usize,
    ) -> Result<Content> {
        self.content(path.as_ref(), TraversalContext::recursive(depth_limit))
    }

    /// Lists the direct entries of a container from headers alone.
    ///
    /// # Errors
    ///
    /// Returns hard errors only; policy outcomes are nodes in the result.
    pub fn get_content_list<P: AsRef<Path>>(&self, path: P) -> Result<ContentList> {
        self.listing(path.as_ref(), TraversalContext::single_level())
    }

    /// Lists a container tree down to `depth_limit` levels, including every
    /// intermediate container right after its own entries.
    ///
    /// # Errors
    ///
    /// Returns hard errors only; policy outcomes are nodes in the result.
    pub fn get_content_list_recursive<P: AsRef<Path>>(
        &self,
        path: P,
        depth_limit: usize,
    ) -> Result<ContentList> {
        self.listing(path.as_ref(), TraversalContext::recursive(depth_limit))
    }

    fn content(&self, path: &Path, mut ctx: TraversalContext) -> Result<Content> {
        let base = path.to_string_lossy();
        debug!(path = %base, depth_limit = ctx.depth_limit(), "content scan");

        let state = self.policy.check_file(self.backend.as_ref(), path)?;
        if state != OutcomeState::Extractable {
            return Ok(vec![Decompressed::rejected(ArcInfo::new(base, 0, state))]);
        }
        let Some(mut container) = self.open_checked(path)? else {
            return Ok(vec![Decompressed::rejected(ArcInfo::new(
                base,
                0,
                OutcomeState::NotValid,
            ))]);
        };

        let mut out = Content::new();
        let flow = ContentWalker::new(self.backend.as_ref(), &self.policy).walk(
            container.as_mut(),
            &base,
            &mut ctx,
            &mut out,
        )?;
        if flow.is_abort() {
            debug!(path = %base, nodes = out.len(), "content scan stopped early");
        }
        Ok(out)
    }

    fn listing(&self, path: &Path, mut ctx: TraversalContext) -> Result<ContentList> {
        let base = path.to_string_lossy();
        debug!(path = %base, depth_limit = ctx.depth_limit(), "listing scan");

        let state = self.policy.check_file(self.backend.as_ref(), path)?;
        if state != OutcomeState::Extractable {
            return Ok(vec![ArcInfo::new(base, 0, state)]);
        }
        let Some(mut container) = self.open_checked(path)? else {
            return Ok(vec![ArcInfo::new(base, 0, OutcomeState::NotValid)]);
        };

        let mut out = ContentList::new();
        let flow = ListingWalker::new(self.backend.as_ref(), &self.policy).walk(
            container.as_mut(),
            &base,
            &mut ctx,
            &mut out,
        )?;
        if flow.is_abort() {
            debug!(path = %base, nodes = out.len(), "listing scan stopped early");
        }
        Ok(out)
    }

    /// Reopens a file that already passed [`AdmissionPolicy::check_file`].
    ///
    /// The file may have changed in between; a soft failure is `None`.
    fn open_checked(&self, path: &Path) -> Result<Option<Box<dyn Container>>> {
        match self.backend.open_path(path) {
            Ok(container) => Ok(Some(container)),
            Err(e) if e.is_hard() => Err(e),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "file changed after admission");
                Ok(None)
            }
        }
    }
}

fn summarize(container: &dyn Container) -> Meta {
    let items = container.items();
    let folders = items.iter().filter(|item| item.is_directory).count();
    let size = items
        .iter()
        .fold(0u64, |acc, item| acc.saturating_add(item.size));
    let count = |n: usize| u32::try_from(n).unwrap_or(u32::MAX);

    Meta {
        items_count: count(items.len()),
        folders_count: count(folders),
        files_count: count(items.len() - folders),
        size,
        pack_size: container.pack_size(),
        format: container.format(),
    }
}
