//! Listing walker: header-only nodes.

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
use crate::types::ContentList;
use crate::types::OutcomeState;
use crate::types::compose_path;

/// Lists a container tree without keeping any bytes.
///
/// Every nested container is recorded after its own entries. Entries are
/// extracted only when they can still be descended into; at the depth
/// frontier, and in single-level mode, nodes are built from headers alone.
#[derive(Debug, Clone, Copy)]
pub struct ListingWalker<'a> {
    backend: &'a dyn ArchiveBackend,
    policy: &'a AdmissionPolicy,
}

impl<'a> ListingWalker<'a> {
    /// Creates a walker opening nested containers with `backend`.
    #[must_use]
    pub const fn new(backend: &'a dyn ArchiveBackend, policy: &'a AdmissionPolicy) -> Self {
        Self { backend, policy }
    }

    /// Walks every entry of `container`, appending nodes to `out`.
    ///
    /// # Errors
    ///
    /// Only hard errors are returned; policy outcomes end up in `out`.
    pub fn walk(
        &self,
        container: &mut dyn Container,
        base: &str,
        ctx: &mut TraversalContext,
        out: &mut ContentList,
    ) -> Result<Flow> {
        let items = container.items().to_vec();
        for item in items {
            let path = compose_path(base, &item.path);
            let depth = ctx.child_depth();

            match admit(self.policy.check_item(&item, ctx)) {
                Admission::Skip => continue,
                Admission::Record(state) => {
                    out.push(ArcInfo::new(path, depth, state));
                    continue;
                }
                Admission::Abort(state) => {
                    warn!(%path, depth, %state, "aborting listing");
                    out.push(ArcInfo::new(path, depth, state));
                    return Ok(Flow::Abort);
                }
                Admission::Extract => {}
            }

            if !ctx.probes_nested() || !ctx.can_descend() {
                out.push(ArcInfo::new(path, depth, OutcomeState::Extractable));
                continue;
            }

            let Some(buffer) = extract_member(container, item.index, &path)? else {
                out.push(ArcInfo::new(path, depth, OutcomeState::NotValid));
                continue;
            };

            let held = buffer.len() as u64;
            ctx.charge(held);
            if is_bomb(&buffer) {
                ctx.release(held);
                warn!(%path, depth, size = held, "bomb heuristic tripped, aborting listing");
                out.push(ArcInfo::new(path, depth, OutcomeState::Unsafe));
                return Ok(Flow::Abort);
            }

            let expanded = self.expand(path, depth, &buffer, ctx, out);
            ctx.release(held);
            if expanded?.is_abort() {
                return Ok(Flow::Abort);
            }
        }
        Ok(Flow::Continue)
    }

    fn expand(
        &self,
        path: String,
        depth: usize,
        buffer: &[u8],
        ctx: &mut TraversalContext,
        out: &mut ContentList,
    ) -> Result<Flow> {
        let Some(mut nested) = open_nested(self.backend, buffer, &path)? else {
            out.push(ArcInfo::new(path, depth, OutcomeState::NotValid));
            return Ok(Flow::Continue);
        };

        // The container follows its own entries.
        let flow = match ctx.descend() {
            Some(mut level) => self.walk(nested.as_mut(), &path, &mut level, out)?,
            None => {
                debug!(%path, depth, "depth limit reached");
                Flow::Continue
            }
        };
        out.push(ArcInfo::new(path, depth, OutcomeState::Extractable));
        Ok(flow)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::backend::NativeBackend;
    use crate::config::ScanLimits;
    use crate::test_utils;
    use crate::test_utils::ZipTestBuilder;

    fn list(data: &[u8], ctx: &mut TraversalContext) -> (ContentList, Flow) {
        let backend = NativeBackend::new();
        let policy = AdmissionPolicy::new(ScanLimits::default());
        let mut container = backend.open_bytes(data).unwrap();
        let mut out = ContentList::new();
        let flow = ListingWalker::new(&backend, &policy)
            .walk(container.as_mut(), "top.zip", ctx, &mut out)
            .unwrap();
        (out, flow)
    }

    #[test]
    fn test_single_level_is_header_only() {
        let data = ZipTestBuilder::new()
            .add_file("a", b"1")
            .add_directory("dir/")
            .add_file("dir/b", b"2")
            .add_file("c.zip", &test_utils::create_test_zip(vec![("x", b"x")]))
            .build();
        let mut ctx = TraversalContext::single_level();
        let (out, _) = list(&data, &mut ctx);

        let paths: Vec<_> = out.iter().map(|info| info.base_path.as_str()).collect();
        assert_eq!(paths, vec!["top.zip->a", "top.zip->dir/b", "top.zip->c.zip"]);
        assert!(out.iter().all(|info| info.depth == 1));
        assert!(out.iter().all(|info| info.state == OutcomeState::Extractable));
    }

    #[test]
    fn test_intermediate_nodes_follow_children() {
        let level2 = test_utils::create_test_zip(vec![("deep.txt", b"deep")]);
        let level1 = ZipTestBuilder::new()
            .add_file("level2.zip", &level2)
            .add_file("mid.txt", b"mid")
            .build();
        let top = ZipTestBuilder::new().add_file("level1.zip", &level1).build();
        let mut ctx = TraversalContext::recursive(5);
        let (out, flow) = list(&top, &mut ctx);

        assert_eq!(flow, Flow::Continue);
        assert_eq!(
            out,
            vec![
                ArcInfo::new("top.zip->level1.zip->level2.zip->deep.txt", 3, OutcomeState::NotValid),
                ArcInfo::new("top.zip->level1.zip->level2.zip", 2, OutcomeState::Extractable),
                ArcInfo::new("top.zip->level1.zip->mid.txt", 2, OutcomeState::NotValid),
                ArcInfo::new("top.zip->level1.zip", 1, OutcomeState::Extractable),
            ]
        );
        assert_eq!(out[0].state, OutcomeState::NotValid);
        assert_eq!(out[1].state, OutcomeState::Extractable);
        assert_eq!(out[3].state, OutcomeState::Extractable);
        assert_eq!(ctx.allocated_bytes(), 0);
    }

    #[test]
    fn test_frontier_entries_are_not_extracted() {
        let level2 = test_utils::create_test_zip(vec![("deep.txt", b"deep")]);
        let level1 = ZipTestBuilder::new().add_file("level2.zip", &level2).build();
        let top = ZipTestBuilder::new().add_file("level1.zip", &level1).build();
        let mut ctx = TraversalContext::recursive(2);
        let (out, _) = list(&top, &mut ctx);

        assert_eq!(
            out,
            vec![
                ArcInfo::new("top.zip->level1.zip->level2.zip", 2, OutcomeState::Extractable),
                ArcInfo::new("top.zip->level1.zip", 1, OutcomeState::Extractable),
            ]
        );
        assert_eq!(out[0].state, OutcomeState::Extractable);
        assert!(out.iter().all(|info| info.depth <= 2));
    }

    #[test]
    fn test_bomb_stops_listing() {
        let data = ZipTestBuilder::new()
            .add_deflated_file("zeros.bin", &test_utils::skewed(32 * 1024))
            .add_file("after.txt", b"never")
            .build();
        let mut ctx = TraversalContext::recursive(3);
        let (out, flow) = list(&data, &mut ctx);

        assert_eq!(flow, Flow::Abort);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].state, OutcomeState::Unsafe);
    }
}
