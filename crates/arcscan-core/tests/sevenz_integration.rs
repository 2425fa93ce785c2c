//! Integration tests for 7z containers.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::path::PathBuf;
use std::sync::Arc;

use arcscan_core::ArchiveScanner;
use arcscan_core::FormatId;
use arcscan_core::NativeBackend;
use arcscan_core::OutcomeState;
use arcscan_core::ScanLimits;
use arcscan_core::test_utils;
use arcscan_core::test_utils::ZipTestBuilder;
use tempfile::TempDir;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests/fixtures")
        .join(name)
}

fn scanner(limits: ScanLimits) -> ArchiveScanner {
    ArchiveScanner::with_backend(limits, Arc::new(NativeBackend::new()))
}

#[test]
fn test_7z_content() {
    let path = fixture("single.7z");
    let content = scanner(ScanLimits::default())
        .get_content_recursive(&path, 3)
        .unwrap();

    assert_eq!(content.len(), 1);
    assert_eq!(
        content[0].info.base_path,
        format!("{}->a.txt", path.to_string_lossy())
    );
    assert_eq!(content[0].info.state, OutcomeState::NotValid);
    assert_eq!(content[0].buffer, b"hello from seven zip\n");
}

#[test]
fn test_7z_metadata() {
    let outcome = scanner(ScanLimits::default())
        .get_metadata(fixture("solid.7z"))
        .unwrap();
    let meta = outcome.meta().unwrap();

    assert_eq!(meta.format, FormatId::SevenZip);
    assert_eq!(meta.extension(), "7z");
    assert_eq!(meta.files_count, 2);
    assert_eq!(meta.size, 39);
}

#[test]
fn test_solid_7z_over_ceiling_rejected() {
    let limited = scanner(ScanLimits::default().with_max_solid_size_mb(0));

    let list = limited.get_content_list(fixture("solid.7z")).unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].depth, 0);
    assert_eq!(list[0].state, OutcomeState::SolidFileSizeGreaterThanMax);

    // The ceiling only applies to solid archives.
    let list = limited.get_content_list(fixture("single.7z")).unwrap();
    assert_eq!(list[0].state, OutcomeState::Extractable);
}

#[test]
fn test_solid_7z_entries_in_order() {
    let content = scanner(ScanLimits::default())
        .get_content(fixture("solid.7z"))
        .unwrap();

    let buffers: Vec<_> = content.iter().map(|node| node.buffer.as_slice()).collect();
    assert_eq!(
        buffers,
        vec![&b"hello from seven zip\n"[..], &b"second entry body\n"[..]]
    );
}

#[test]
fn test_7z_nested_in_zip() {
    let temp = TempDir::new().unwrap();
    let inner = std::fs::read(fixture("solid.7z")).unwrap();
    let data = ZipTestBuilder::new().add_file("docs.7z", &inner).build();
    let path = test_utils::write_fixture(temp.path(), "outer.zip", &data);

    let list = scanner(ScanLimits::default())
        .get_content_list_recursive(&path, 4)
        .unwrap();

    let root = path.to_string_lossy();
    let paths: Vec<_> = list.iter().map(|info| info.base_path.clone()).collect();
    assert_eq!(
        paths,
        vec![
            format!("{root}->docs.7z->a.txt"),
            format!("{root}->docs.7z->b.txt"),
            format!("{root}->docs.7z"),
        ]
    );
    assert_eq!(list[0].depth, 2);
    assert_eq!(list[2].depth, 1);
}
