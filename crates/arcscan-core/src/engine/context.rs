//! Per-call traversal state.

use std::ops::Deref;
use std::ops::DerefMut;

/// Mutable state of one scan call.
///
/// A context is created fresh for every public call and passed by `&mut`
/// down the recursion, so concurrent calls on one scanner never share it.
///
/// Depth is the depth of the container currently being enumerated: the
/// top-level file is 0 and its entries are recorded at depth 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraversalContext {
    current_depth: usize,
    depth_limit: usize,
    allocated_bytes: u64,
    probe_nested: bool,
}

impl TraversalContext {
    /// Context for a recursive scan. A limit of 0 is treated as 1.
    #[must_use]
    pub fn recursive(depth_limit: usize) -> Self {
        Self {
            current_depth: 0,
            depth_limit: depth_limit.max(1),
            allocated_bytes: 0,
            probe_nested: true,
        }
    }

    /// Context for a single-level scan: depth limit 1, nested containers
    /// are never opened.
    #[must_use]
    pub fn single_level() -> Self {
        Self {
            probe_nested: false,
            ..Self::recursive(1)
        }
    }

    /// Depth of the container being enumerated.
    #[must_use]
    pub const fn current_depth(&self) -> usize {
        self.current_depth
    }

    /// Configured depth ceiling.
    #[must_use]
    pub const fn depth_limit(&self) -> usize {
        self.depth_limit
    }

    /// Depth recorded on entries of the container being enumerated.
    #[must_use]
    pub const fn child_depth(&self) -> usize {
        self.current_depth + 1
    }

    /// Whether entries of the current container may still be enumerated in
    /// turn.
    #[must_use]
    pub const fn can_descend(&self) -> bool {
        self.child_depth() < self.depth_limit
    }

    /// Whether extracted entries are probed as nested containers.
    #[must_use]
    pub const fn probes_nested(&self) -> bool {
        self.probe_nested
    }

    /// Bytes of extracted buffers currently held by this call.
    #[must_use]
    pub const fn allocated_bytes(&self) -> u64 {
        self.allocated_bytes
    }

    /// Adds a freshly extracted buffer to the live memory count.
    pub fn charge(&mut self, bytes: u64) {
        self.allocated_bytes = self.allocated_bytes.saturating_add(bytes);
    }

    /// Removes a buffer from the live memory count once it is settled.
    pub fn release(&mut self, bytes: u64) {
        self.allocated_bytes = self.allocated_bytes.saturating_sub(bytes);
    }

    /// Steps one level down.
    ///
    /// Returns `None`, with the depth unchanged, when the new depth would
    /// reach the limit. The returned guard restores the depth when dropped,
    /// whichever way the nested scan exits.
    pub fn descend(&mut self) -> Option<DepthGuard<'_>> {
        if !self.can_descend() {
            return None;
        }
        self.current_depth += 1;
        Some(DepthGuard { ctx: self })
    }
}

/// Restores the depth of a [`TraversalContext`] on drop.
#[derive(Debug)]
pub struct DepthGuard<'a> {
    ctx: &'a mut TraversalContext,
}

impl Deref for DepthGuard<'_> {
    type Target = TraversalContext;

    fn deref(&self) -> &Self::Target {
        self.ctx
    }
}

impl DerefMut for DepthGuard<'_> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.ctx
    }
}

impl Drop for DepthGuard<'_> {
    fn drop(&mut self) {
        self.ctx.current_depth -= 1;
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_limit_clamped() {
        let ctx = TraversalContext::recursive(0);
        assert_eq!(ctx.depth_limit(), 1);
        assert!(!ctx.can_descend());
    }

    #[test]
    fn test_single_level() {
        let ctx = TraversalContext::single_level();
        assert_eq!(ctx.depth_limit(), 1);
        assert_eq!(ctx.child_depth(), 1);
        assert!(!ctx.probes_nested());
    }

    #[test]
    fn test_descend_restores_depth() {
        let mut ctx = TraversalContext::recursive(3);
        {
            let mut level1 = ctx.descend().unwrap();
            assert_eq!(level1.current_depth(), 1);
            assert_eq!(level1.child_depth(), 2);
            {
                let level2 = level1.descend().unwrap();
                assert_eq!(level2.current_depth(), 2);
                assert!(!level2.can_descend());
            }
            assert_eq!(level1.current_depth(), 1);
        }
        assert_eq!(ctx.current_depth(), 0);
    }

    #[test]
    fn test_descend_stops_at_limit() {
        let mut ctx = TraversalContext::recursive(2);
        let mut level1 = ctx.descend().unwrap();
        assert!(level1.descend().is_none());
        assert_eq!(level1.current_depth(), 1);
    }

    #[test]
    fn test_guard_restores_on_early_return() {
        fn bail(ctx: &mut TraversalContext) -> Result<(), ()> {
            let _guard = ctx.descend().ok_or(())?;
            Err(())
        }

        let mut ctx = TraversalContext::recursive(5);
        assert!(bail(&mut ctx).is_err());
        assert_eq!(ctx.current_depth(), 0);
    }

    #[test]
    fn test_memory_accounting() {
        let mut ctx = TraversalContext::recursive(2);
        ctx.charge(100);
        ctx.charge(50);
        assert_eq!(ctx.allocated_bytes(), 150);
        ctx.release(100);
        assert_eq!(ctx.allocated_bytes(), 50);
        ctx.release(500);
        assert_eq!(ctx.allocated_bytes(), 0);
        ctx.charge(u64::MAX);
        ctx.charge(1);
        assert_eq!(ctx.allocated_bytes(), u64::MAX);
    }
}
