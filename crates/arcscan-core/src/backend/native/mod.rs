//! Archive backend built on pure-Rust and bundled decoders.
//!
//! Formats are detected by magic bytes, never by file name. Formats that are
//! recognized but cannot be decoded here (RAR, CAB, disk images, ...) fail to
//! open with [`ScanError::UnsupportedFormat`], which the scanner reports as
//! `NotValid`.

use std::fs::File;
use std::io::Cursor;
use std::io::Read;
use std::io::Seek;
use std::path::Path;

use tracing::trace;

use self::sevenz::SevenZContainer;
use self::stream::StreamContainer;
use self::tar::TarContainer;
use self::zip::ZipContainer;
use super::ArchiveBackend;
use super::Container;
use crate::Result;
use crate::ScanError;
use crate::types::FormatId;

pub mod detect;
pub mod sevenz;
pub mod stream;
pub mod tar;
pub mod zip;

/// Backend for zip, 7z, tar, gzip, bzip2, xz and zstd.
///
/// Stateless; every open call gets its own reader, so one instance is safe
/// to share between threads.
#[derive(Debug, Default, Clone, Copy)]
pub struct NativeBackend;

impl NativeBackend {
    /// Creates the backend.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn open_source<'a, R: Read + Seek + 'a>(mut source: R) -> Result<Box<dyn Container + 'a>> {
        let header = read_header(&mut source)?;
        source.rewind()?;

        let Some(format) = detect::sniff(&header) else {
            return Err(ScanError::UnsupportedFormat);
        };
        if !detect::is_openable(format) {
            trace!(?format, "recognized but not decodable");
            return Err(ScanError::UnsupportedFormat);
        }

        Ok(match format {
            FormatId::Zip => Box::new(ZipContainer::open(source)?),
            FormatId::SevenZip => Box::new(SevenZContainer::open(source)?),
            FormatId::Tar => Box::new(TarContainer::open(source)?),
            _ => Box::new(StreamContainer::open(source, format)?),
        })
    }
}

impl ArchiveBackend for NativeBackend {
    fn open_path(&self, path: &Path) -> Result<Box<dyn Container>> {
        let file = File::open(path)?;
        Self::open_source(file)
    }

    fn open_bytes<'a>(&self, bytes: &'a [u8]) -> Result<Box<dyn Container + 'a>> {
        Self::open_source(Cursor::new(bytes))
    }
}

fn read_header<R: Read>(source: &mut R) -> Result<Vec<u8>> {
    let mut header = Vec::with_capacity(detect::SNIFF_LEN);
    source
        .take(detect::SNIFF_LEN as u64)
        .read_to_end(&mut header)?;
    Ok(header)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::test_utils;

    #[test]
    fn test_dispatch_by_content() {
        let backend = NativeBackend::new();
        let cases = [
            (test_utils::create_test_zip(vec![("a", b"1")]), FormatId::Zip),
            (test_utils::create_test_tar(vec![("a", b"1")]), FormatId::Tar),
            (test_utils::gzip("a", b"1"), FormatId::GZip),
            (test_utils::zstd(b"1"), FormatId::Zstd),
        ];
        for (data, format) in cases {
            let container = backend.open_bytes(&data).unwrap();
            assert_eq!(container.format(), format);
            assert_eq!(container.items().len(), 1);
        }
    }

    #[test]
    fn test_plain_data_is_unsupported() {
        let backend = NativeBackend::new();
        assert!(matches!(
            backend.open_bytes(b"just some text"),
            Err(ScanError::UnsupportedFormat)
        ));
        assert!(matches!(
            backend.open_bytes(b""),
            Err(ScanError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_detect_only_format_is_unsupported() {
        let backend = NativeBackend::new();
        let rar = b"Rar!\x1a\x07\x01\x00 and more bytes".to_vec();
        assert!(matches!(
            backend.open_bytes(&rar),
            Err(ScanError::UnsupportedFormat)
        ));
    }

    #[test]
    fn test_open_path_missing_is_io() {
        let backend = NativeBackend::new();
        let err = backend
            .open_path(Path::new("/definitely/not/here.zip"))
            .err()
            .unwrap();
        assert!(err.is_hard());
    }

    #[test]
    fn test_open_path() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = test_utils::write_fixture(
            dir.path(),
            "a.zip",
            &test_utils::create_test_zip(vec![("x.txt", b"xyz")]),
        );
        let mut container = NativeBackend::new().open_path(&path).unwrap();
        assert_eq!(container.extract(0).unwrap(), b"xyz");
    }
}
