//! Process-wide backend lifecycle.
//!
//! Kept in its own test binary: the global handle can be set only once per
//! process.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use arcscan_core::ArchiveScanner;
use arcscan_core::OutcomeState;
use arcscan_core::ScanError;
use arcscan_core::ScanLimits;
use arcscan_core::backend::shared;
use arcscan_core::test_utils;
use tempfile::TempDir;

#[test]
fn test_scanner_requires_initialized_backend() {
    assert!(!shared::is_initialized());
    assert!(matches!(
        ArchiveScanner::new(ScanLimits::default()),
        Err(ScanError::NotInitialized)
    ));

    std::thread::scope(|scope| {
        for _ in 0..8 {
            scope.spawn(|| shared::init_native().unwrap());
        }
    });
    assert!(shared::is_initialized());

    let temp = TempDir::new().unwrap();
    let data = test_utils::create_test_zip(vec![("hello.txt", b"hello")]);
    let path = test_utils::write_fixture(temp.path(), "hello.zip", &data);

    let scanner = ArchiveScanner::new(ScanLimits::default()).unwrap();
    let list = scanner.get_content_list(&path).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].state, OutcomeState::Extractable);

    let a = shared::handle().unwrap();
    let b = shared::handle().unwrap();
    assert!(std::sync::Arc::ptr_eq(&a, &b));
}
