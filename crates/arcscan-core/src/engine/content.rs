//! Content walker: nodes with their extracted bytes.

use tracing::debug;
use tracing::warn;

use super::Admission;
use super::Flow;
use super::TraversalContext;
use super::admit;
use super::extract_member;
use super::open_nested;
use crate::Result;
use crate::backend::ArchiveBackend;
use crate::backend::Container;
use crate::security::AdmissionPolicy;
use crate::security::is_bomb;
use crate::types::ArcInfo;
use crate::types::Content;
use crate::types::Decompressed;
use crate::types::OutcomeState;
use crate::types::compose_path;

/// Collects the leaves of a container tree together with their bytes.
///
/// Leaves are entries that are not containers, containers that could not be
/// descended into, and rejected entries (recorded without bytes). A nested
/// container that yields no nodes of its own is recorded once as a leaf so
/// its bytes are not lost.
#[derive(Debug, Clone, Copy)]
pub struct ContentWalker<'a> {
    backend: &'a dyn ArchiveBackend,
    policy: &'a AdmissionPolicy,
}

impl<'a> ContentWalker<'a> {
    /// Creates a walker opening nested containers with `backend`.
    #[must_use]
    pub const fn new(backend: &'a dyn ArchiveBackend, policy: &'a AdmissionPolicy) -> Self {
        Self { backend, policy }
    }

    /// Walks every entry of `container`, appending nodes to `out`.
    ///
    /// `base` is the composite path of `container` itself.
    ///
    /// # Errors
    ///
    /// Only hard errors are returned; policy outcomes end up in `out`.
    pub fn walk(
        &self,
        container: &mut dyn Container,
        base: &str,
        ctx: &mut TraversalContext,
        out: &mut Content,
    ) -> Result<Flow> {
        let items = container.items().to_vec();
        for item in items {
            let path = compose_path(base, &item.path);
            let depth = ctx.child_depth();

            match admit(self.policy.check_item(&item, ctx)) {
                Admission::Skip => continue,
                Admission::Record(state) => {
                    debug!(%path, depth, %state, "entry rejected");
                    out.push(Decompressed::rejected(ArcInfo::new(path, depth, state)));
                    continue;
                }
                Admission::Abort(state) => {
                    warn!(%path, depth, %state, "aborting scan");
                    out.push(Decompressed::rejected(ArcInfo::new(path, depth, state)));
                    return Ok(Flow::Abort);
                }
                Admission::Extract => {}
            }

            let Some(buffer) = extract_member(container, item.index, &path)? else {
                out.push(Decompressed::rejected(ArcInfo::new(
                    path,
                    depth,
                    OutcomeState::NotValid,
                )));
                continue;
            };

            let held = buffer.len() as u64;
            ctx.charge(held);
            if is_bomb(&buffer) {
                ctx.release(held);
                warn!(%path, depth, size = held, "bomb heuristic tripped, aborting scan");
                out.push(Decompressed::rejected(ArcInfo::new(
                    path,
                    depth,
                    OutcomeState::Unsafe,
                )));
                return Ok(Flow::Abort);
            }

            let settled = self.settle(path, depth, buffer, ctx, out);
            ctx.release(held);
            if settled?.is_abort() {
                return Ok(Flow::Abort);
            }
        }
        Ok(Flow::Continue)
    }

    /// Records an extracted buffer, descending into it when it is a
    /// container.
    fn settle(
        &self,
        path: String,
        depth: usize,
        buffer: Vec<u8>,
        ctx: &mut TraversalContext,
        out: &mut Content,
    ) -> Result<Flow> {
        if !ctx.probes_nested() {
            debug!(%path, depth, size = buffer.len(), "entry extracted");
            out.push(Decompressed::new(
                ArcInfo::new(path, depth, OutcomeState::Extractable),
                buffer,
            ));
            return Ok(Flow::Continue);
        }

        let recorded = out.len();
        let flow = match open_nested(self.backend, &buffer, &path)? {
            Some(mut nested) => match ctx.descend() {
                Some(mut level) => {
                    debug!(%path, depth, "descending");
                    Some(self.walk(nested.as_mut(), &path, &mut level, out)?)
                }
                None => {
                    debug!(%path, depth, "depth limit reached");
                    Some(Flow::Continue)
                }
            },
            None => None,
        };

        let Some(flow) = flow else {
            out.push(Decompressed::new(
                ArcInfo::new(path, depth, OutcomeState::NotValid),
                buffer,
            ));
            return Ok(Flow::Continue);
        };

        if out.len() == recorded {
            out.push(Decompressed::new(
                ArcInfo::new(path, depth, OutcomeState::Extractable),
                buffer,
            ));
        }
        Ok(flow)
    }
}
