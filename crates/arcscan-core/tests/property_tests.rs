//! Property-based tests for the bomb heuristic and traversal bounds.
//!
//! These tests use proptest to generate arbitrary inputs and verify
//! safety properties hold across a wide range of cases.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::sync::Arc;

use arcscan_core::ArchiveScanner;
use arcscan_core::FormatId;
use arcscan_core::NativeBackend;
use arcscan_core::ScanLimits;
use arcscan_core::is_bomb;
use arcscan_core::test_utils;
use arcscan_core::types::PATH_SEPARATOR;
use arcscan_core::types::extension_for_code;
use proptest::prelude::*;
use tempfile::TempDir;

fn scanner() -> ArchiveScanner {
    ArchiveScanner::with_backend(ScanLimits::default(), Arc::new(NativeBackend::new()))
}

proptest! {
    /// Buffers up to 1024 bytes are never flagged.
    #[test]
    fn prop_small_buffers_never_flagged(data in prop::collection::vec(any::<u8>(), 0..=1024)) {
        prop_assert!(!is_bomb(&data));
    }

    /// A long run of a single value is always flagged.
    #[test]
    fn prop_single_value_runs_flagged(byte in any::<u8>(), len in 1025usize..16384) {
        prop_assert!(is_bomb(&vec![byte; len]));
    }

    /// The verdict depends on the byte histogram only, not on byte order.
    #[test]
    fn prop_verdict_ignores_order(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let mut reversed = data.clone();
        reversed.reverse();
        let mut sorted = data.clone();
        sorted.sort_unstable();
        prop_assert_eq!(is_bomb(&data), is_bomb(&reversed));
        prop_assert_eq!(is_bomb(&data), is_bomb(&sorted));
    }

    /// Long buffers made of two values are always flagged.
    #[test]
    fn prop_two_values_always_flagged(a in any::<u8>(), b in any::<u8>(), len in 1025usize..8192, split in 0usize..8192) {
        let split = split % len;
        let mut data = vec![a; len];
        data[..split].fill(b);
        prop_assert!(is_bomb(&data));
    }

    /// Mapped codes round-trip; unmapped codes have no extension.
    #[test]
    fn prop_format_codes_total(code in any::<u8>()) {
        let format = FormatId::from_code(code);
        if format == FormatId::Unknown {
            prop_assert_eq!(extension_for_code(code), "");
        } else {
            prop_assert_eq!(format.code(), code);
            prop_assert_eq!(format.extension(), extension_for_code(code));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(24))]

    /// Node depths never exceed the limit and always match the number of
    /// path separators.
    #[test]
    fn prop_depth_bounded_by_limit(levels in 1usize..6, limit in 0usize..7) {
        let temp = TempDir::new().unwrap();
        let data = test_utils::create_nested_zip(levels, "leaf.bin", &test_utils::noise(512));
        let path = test_utils::write_fixture(temp.path(), "nested.zip", &data);
        let effective = limit.max(1);

        let content = scanner().get_content_recursive(&path, limit).unwrap();
        prop_assert_eq!(content.len(), 1);
        prop_assert_eq!(content[0].info.depth, levels.min(effective));

        let list = scanner().get_content_list_recursive(&path, limit).unwrap();
        let expected_len = levels.min(effective);
        prop_assert_eq!(list.len(), expected_len);
        for (index, info) in list.iter().enumerate() {
            prop_assert!(info.depth <= effective);
            prop_assert_eq!(info.depth, expected_len - index);
            let suffix = info
                .base_path
                .strip_prefix(path.to_string_lossy().as_ref())
                .unwrap();
            prop_assert_eq!(suffix.matches(PATH_SEPARATOR).count(), info.depth);
        }
    }
}
