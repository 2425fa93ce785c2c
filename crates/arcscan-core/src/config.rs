//! Resource ceilings for archive scanning.

/// Number of bytes in one megabyte as used by every ceiling.
pub const MEGABYTE: u64 = 1024 * 1024;

/// Resource ceilings applied to every scan call.
///
/// All values are expressed in megabytes. A value is a strict upper bound:
/// sizes equal to the ceiling are still accepted.
///
/// # Examples
///
/// ```
/// use arcscan_core::ScanLimits;
///
/// // Secure defaults
/// let limits = ScanLimits::default();
/// assert_eq!(limits.max_used_memory_mb, 500);
///
/// // Tighter solid-archive limit
/// let limits = ScanLimits::default().with_max_solid_size_mb(3);
/// assert_eq!(limits.max_solid_size_bytes(), 3 * 1024 * 1024);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanLimits {
    /// Maximum size of the top-level file.
    pub max_file_size_mb: u64,

    /// Maximum size of a top-level solid archive.
    pub max_solid_size_mb: u64,

    /// Maximum uncompressed size of a single entry.
    pub max_buffer_size_mb: u64,

    /// Maximum memory held by extracted buffers at once within one call.
    pub max_used_memory_mb: u64,
}

impl Default for ScanLimits {
    /// Creates limits with the following values:
    /// - `max_file_size_mb`: 10
    /// - `max_solid_size_mb`: 10
    /// - `max_buffer_size_mb`: 10
    /// - `max_used_memory_mb`: 500
    fn default() -> Self {
        Self {
            max_file_size_mb: 10,
            max_solid_size_mb: 10,
            max_buffer_size_mb: 10,
            max_used_memory_mb: 500,
        }
    }
}

impl ScanLimits {
    /// Creates limits from the four ceilings, in megabytes.
    #[must_use]
    pub const fn new(
        max_file_size_mb: u64,
        max_solid_size_mb: u64,
        max_buffer_size_mb: u64,
        max_used_memory_mb: u64,
    ) -> Self {
        Self {
            max_file_size_mb,
            max_solid_size_mb,
            max_buffer_size_mb,
            max_used_memory_mb,
        }
    }

    /// Sets the top-level file size ceiling.
    #[must_use]
    pub const fn with_max_file_size_mb(mut self, mb: u64) -> Self {
        self.max_file_size_mb = mb;
        self
    }

    /// Sets the solid archive size ceiling.
    #[must_use]
    pub const fn with_max_solid_size_mb(mut self, mb: u64) -> Self {
        self.max_solid_size_mb = mb;
        self
    }

    /// Sets the per-entry buffer ceiling.
    #[must_use]
    pub const fn with_max_buffer_size_mb(mut self, mb: u64) -> Self {
        self.max_buffer_size_mb = mb;
        self
    }

    /// Sets the per-call memory ceiling.
    #[must_use]
    pub const fn with_max_used_memory_mb(mut self, mb: u64) -> Self {
        self.max_used_memory_mb = mb;
        self
    }

    /// Top-level file ceiling in bytes.
    #[must_use]
    pub const fn max_file_size_bytes(&self) -> u64 {
        self.max_file_size_mb.saturating_mul(MEGABYTE)
    }

    /// Solid archive ceiling in bytes.
    #[must_use]
    pub const fn max_solid_size_bytes(&self) -> u64 {
        self.max_solid_size_mb.saturating_mul(MEGABYTE)
    }

    /// Per-entry ceiling in bytes.
    #[must_use]
    pub const fn max_buffer_size_bytes(&self) -> u64 {
        self.max_buffer_size_mb.saturating_mul(MEGABYTE)
    }

    /// Per-call memory ceiling in bytes.
    #[must_use]
    pub const fn max_used_memory_bytes(&self) -> u64 {
        self.max_used_memory_mb.saturating_mul(MEGABYTE)
    }
}
