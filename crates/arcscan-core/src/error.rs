//! Error types for archive scanning operations.
//!
//! Policy decisions (too large, unsafe, not a container, ...) are not errors:
//! they are reported as [`OutcomeState`](crate::OutcomeState) values inside
//! the scan result. `ScanError` is reserved for failures of the environment
//! or of the backend itself.

use thiserror::Error;

/// Result type alias using `ScanError`.
pub type Result<T> = std::result::Result<T, ScanError>;

/// Errors that can occur while scanning an archive.
#[derive(Error, Debug)]
pub enum ScanError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The shared archive backend was used before it was initialized.
    #[error("archive backend is not initialized")]
    NotInitialized,

    /// The archive backend could not be initialized.
    #[error("failed to initialize archive backend: {0}")]
    BackendInit(String),

    /// The data was recognized but no handler exists for its format.
    #[error("unsupported archive format")]
    UnsupportedFormat,

    /// Archive is corrupted or invalid.
    #[error("invalid archive: {0}")]
    InvalidArchive(String),

    /// Archive content is password protected.
    #[error("encrypted archive: {0}")]
    Encrypted(String),
}

impl ScanError {
    /// Returns `true` if this error comes from the environment rather than
    /// from the bytes being inspected.
    ///
    /// Hard errors abort a scan call. Soft errors (unsupported, invalid or
    /// encrypted data) only mean that a buffer is not a usable container and
    /// are turned into a `NotValid` outcome by the engine.
    ///
    /// # Examples
    ///
    /// ```
    /// use arcscan_core::ScanError;
    ///
    /// assert!(ScanError::NotInitialized.is_hard());
    /// assert!(!ScanError::UnsupportedFormat.is_hard());
    /// ```
    #[must_use]
    pub const fn is_hard(&self) -> bool {
        matches!(
            self,
            Self::Io(_) | Self::NotInitialized | Self::BackendInit(_)
        )
    }
}
