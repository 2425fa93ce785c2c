//! Per-node outcome of the admission policy.

use std::fmt;

/// Why a node was (or was not) fully processed.
///
/// Exactly one state applies to a node when it is recorded. Every state
/// other than [`OutcomeState::Extractable`] is a rejection reason; none of
/// them is an error.
///
/// # Examples
///
/// ```
/// use arcscan_core::OutcomeState;
///
/// assert_eq!(OutcomeState::default(), OutcomeState::Extractable);
/// assert!(OutcomeState::Unsafe.is_fail_fast());
/// assert!(!OutcomeState::NotValid.is_fail_fast());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum OutcomeState {
    /// Passed every check.
    #[default]
    Extractable,
    /// The top-level path does not exist.
    NotExist,
    /// The path or entry is a directory.
    IsDirectory,
    /// The backend rejected the bytes as a container.
    NotValid,
    /// The top-level container is solid and above the solid ceiling.
    SolidFileSizeGreaterThanMax,
    /// The top-level file is above the file ceiling.
    FileSizeGreaterThanMax,
    /// A single entry is above the buffer ceiling.
    BufferSizeGreaterThanMax,
    /// The per-call memory budget would be exceeded.
    StackFilled,
    /// The bomb heuristic flagged the bytes.
    Unsafe,
}

impl OutcomeState {
    /// Returns `true` for every state except `Extractable`.
    #[must_use]
    pub const fn is_rejection(self) -> bool {
        !matches!(self, Self::Extractable)
    }

    /// Returns `true` if this state terminates the whole scan call.
    #[must_use]
    pub const fn is_fail_fast(self) -> bool {
        matches!(self, Self::StackFilled | Self::Unsafe)
    }

    /// Stable snake-case label.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Extractable => "extractable",
            Self::NotExist => "not_exist",
            Self::IsDirectory => "is_directory",
            Self::NotValid => "not_valid",
            Self::SolidFileSizeGreaterThanMax => "solid_file_size_greater_than_max",
            Self::FileSizeGreaterThanMax => "file_size_greater_than_max",
            Self::BufferSizeGreaterThanMax => "buffer_size_greater_than_max",
            Self::StackFilled => "stack_filled",
            Self::Unsafe => "unsafe",
        }
    }
}

impl fmt::Display for OutcomeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_only_extractable_is_not_rejection() {
        assert!(!OutcomeState::Extractable.is_rejection());
        for state in [
            OutcomeState::NotExist,
            OutcomeState::IsDirectory,
            OutcomeState::NotValid,
            OutcomeState::SolidFileSizeGreaterThanMax,
            OutcomeState::FileSizeGreaterThanMax,
            OutcomeState::BufferSizeGreaterThanMax,
            OutcomeState::StackFilled,
            OutcomeState::Unsafe,
        ] {
            assert!(state.is_rejection(), "{state} should be a rejection");
        }
    }

    #[test]
    fn test_fail_fast_states() {
        assert!(OutcomeState::StackFilled.is_fail_fast());
        assert!(OutcomeState::Unsafe.is_fail_fast());
        assert!(!OutcomeState::BufferSizeGreaterThanMax.is_fail_fast());
        assert!(!OutcomeState::Extractable.is_fail_fast());
    }

    #[test]
    fn test_display() {
        assert_eq!(OutcomeState::StackFilled.to_string(), "stack_filled");
        assert_eq!(
            OutcomeState::SolidFileSizeGreaterThanMax.to_string(),
            "solid_file_size_greater_than_max"
        );
    }
}
