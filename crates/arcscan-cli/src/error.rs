//! Error conversion utilities for CLI.
//!
//! Converts arcscan-core's typed errors (thiserror) into user-friendly
//! contextual errors (anyhow) with actionable guidance.

use anyhow::anyhow;
use arcscan_core::ScanError;
use std::path::Path;

/// Converts `ScanError` to user-friendly anyhow error with context
pub fn convert_scan_error(err: ScanError, archive: &Path) -> anyhow::Error {
    match err {
        ScanError::Io(io_err) => {
            anyhow!(
                "I/O error while scanning '{}': {}",
                archive.display(),
                io_err
            )
        }
        ScanError::NotInitialized | ScanError::BackendInit(_) => {
            anyhow!(
                "Archive backend unavailable while scanning '{}': {}\n\
                 HINT: This is an installation problem, not a problem with the archive.",
                archive.display(),
                err
            )
        }
        ScanError::UnsupportedFormat => {
            anyhow!(
                "Archive format not supported: {}\n\
                 HINT: Supported formats: zip, 7z, tar, gz, bz2, xz, zst",
                archive.display()
            )
        }
        ScanError::InvalidArchive(reason) => {
            anyhow!(
                "Invalid archive '{}': {}\n\
                 HINT: The archive may be corrupted or malformed.",
                archive.display(),
                reason
            )
        }
        ScanError::Encrypted(reason) => {
            anyhow!(
                "Encrypted archive '{}': {}\n\
                 HINT: Password-protected entries are not scanned.",
                archive.display(),
                reason
            )
        }
    }
}

/// Adds context to a scan result about the archive being processed
pub fn add_archive_context<T>(
    result: Result<T, ScanError>,
    archive: &Path,
) -> anyhow::Result<T> {
    result.map_err(|e| convert_scan_error(e, archive))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_convert_io_error() {
        let io_err = io::Error::new(io::ErrorKind::PermissionDenied, "denied");
        let converted = convert_scan_error(ScanError::Io(io_err), Path::new("archive.zip"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("I/O error"));
        assert!(msg.contains("archive.zip"));
    }

    #[test]
    fn test_convert_not_initialized() {
        let converted = convert_scan_error(ScanError::NotInitialized, Path::new("a.7z"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("backend unavailable"));
        assert!(msg.contains("HINT"));
    }

    #[test]
    fn test_convert_invalid_archive() {
        let err = ScanError::InvalidArchive("bad header".into());
        let converted = convert_scan_error(err, Path::new("broken.tar"));
        let msg = format!("{converted:?}");
        assert!(msg.contains("bad header"));
        assert!(msg.contains("corrupted"));
    }
}
