//! Result nodes produced by a scan.

use super::OutcomeState;

/// Separator placed between ancestor paths in a composite path.
pub const PATH_SEPARATOR: &str = "->";

/// Builds the composite path of an entry found inside `parent`.
///
/// # Examples
///
/// ```
/// use arcscan_core::types::compose_path;
///
/// assert_eq!(compose_path("outer.zip", "inner.zip"), "outer.zip->inner.zip");
/// ```
#[must_use]
pub fn compose_path(parent: &str, entry: &str) -> String {
    let mut path = String::with_capacity(parent.len() + PATH_SEPARATOR.len() + entry.len());
    path.push_str(parent);
    path.push_str(PATH_SEPARATOR);
    path.push_str(entry);
    path
}

/// Identity of one node in the scanned tree.
///
/// Equality compares the composite path and the depth only; the state is
/// deliberately ignored so expected listings can be written without states.
#[derive(Debug, Clone, Default, Eq)]
pub struct ArcInfo {
    /// Composite path: every ancestor chained with [`PATH_SEPARATOR`].
    pub base_path: String,
    /// Depth at which the node was found. Entries of the top-level file are
    /// at depth 1; the top-level file itself is depth 0.
    pub depth: usize,
    /// Outcome recorded for the node.
    pub state: OutcomeState,
}

impl ArcInfo {
    /// Creates a node identity.
    #[must_use]
    pub fn new(base_path: impl Into<String>, depth: usize, state: OutcomeState) -> Self {
        Self {
            base_path: base_path.into(),
            depth,
            state,
        }
    }
}

impl PartialEq for ArcInfo {
    fn eq(&self, other: &Self) -> bool {
        self.base_path == other.base_path && self.depth == other.depth
    }
}

impl std::hash::Hash for ArcInfo {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.base_path.hash(state);
        self.depth.hash(state);
    }
}

/// A node together with the bytes extracted for it.
///
/// `buffer` is empty whenever the state signals a rejection that happened
/// before or instead of extraction.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decompressed {
    /// Node identity.
    pub info: ArcInfo,
    /// Extracted bytes.
    pub buffer: Vec<u8>,
}

impl Decompressed {
    /// Creates a node carrying bytes.
    #[must_use]
    pub fn new(info: ArcInfo, buffer: Vec<u8>) -> Self {
        Self { info, buffer }
    }

    /// Creates a node without bytes.
    #[must_use]
    pub fn rejected(info: ArcInfo) -> Self {
        Self {
            info,
            buffer: Vec::new(),
        }
    }
}

/// Full scan result: nodes with their bytes, in depth-first order.
pub type Content = Vec<Decompressed>;

/// Header-only scan result, in depth-first order.
pub type ContentList = Vec<ArcInfo>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_path() {
        assert_eq!(compose_path("a.zip", "b.txt"), "a.zip->b.txt");
        assert_eq!(
            compose_path(&compose_path("a.zip", "b.rar"), "c/d.txt"),
            "a.zip->b.rar->c/d.txt"
        );
    }

    #[test]
    fn test_equality_ignores_state() {
        let a = ArcInfo::new("x.zip->y", 1, OutcomeState::Extractable);
        let b = ArcInfo::new("x.zip->y", 1, OutcomeState::NotValid);
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_uses_depth() {
        let a = ArcInfo::new("x.zip->y", 1, OutcomeState::Extractable);
        let b = ArcInfo::new("x.zip->y", 2, OutcomeState::Extractable);
        assert_ne!(a, b);
    }

    #[test]
    fn test_rejected_has_no_bytes() {
        let node = Decompressed::rejected(ArcInfo::new("x", 1, OutcomeState::Unsafe));
        assert!(node.buffer.is_empty());
        assert_eq!(node.info.state, OutcomeState::Unsafe);
    }
}
