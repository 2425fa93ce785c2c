//! Process-wide backend handle.
//!
//! The backend is the only process-wide state of the crate. It is installed
//! once and then handed out as a shared, read-only `Arc`.
//!
//! ```
//! use arcscan_core::backend::shared;
//!
//! # fn main() -> arcscan_core::Result<()> {
//! shared::init_native()?;
//! let backend = shared::handle()?;
//! # let _ = backend;
//! # Ok(())
//! # }
//! ```

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::OnceLock;

use tracing::debug;

use super::ArchiveBackend;
use super::NativeBackend;
use crate::Result;
use crate::ScanError;

/// A one-time-initialized slot holding a shared backend.
///
/// Initialization is serialized: concurrent first callers queue on a mutex
/// and only the first successful factory result is stored. A failed factory
/// leaves the cell empty so a later attempt can succeed.
#[derive(Debug, Default)]
pub struct BackendCell {
    slot: OnceLock<Arc<dyn ArchiveBackend>>,
    init_lock: Mutex<()>,
}

impl BackendCell {
    /// Creates an empty cell.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            slot: OnceLock::new(),
            init_lock: Mutex::new(()),
        }
    }

    /// Installs the backend built by `factory` unless one is already present.
    ///
    /// The factory is not called when the cell is already initialized.
    ///
    /// # Errors
    ///
    /// Returns the factory's error; the cell stays uninitialized.
    pub fn init_with<F>(&self, factory: F) -> Result<()>
    where
        F: FnOnce() -> Result<Arc<dyn ArchiveBackend>>,
    {
        if self.slot.get().is_some() {
            return Ok(());
        }

        // A poisoned lock only means another initializer panicked before
        // storing anything.
        let _guard = self
            .init_lock
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner);

        if self.slot.get().is_some() {
            return Ok(());
        }

        let backend = factory()?;
        debug!(?backend, "archive backend initialized");
        // Cannot fail: the slot is empty and writers hold the lock.
        let _ = self.slot.set(backend);
        Ok(())
    }

    /// Returns the shared backend.
    ///
    /// # Errors
    ///
    /// Returns `NotInitialized` if no backend was installed.
    pub fn handle(&self) -> Result<Arc<dyn ArchiveBackend>> {
        self.slot.get().cloned().ok_or(ScanError::NotInitialized)
    }

    /// Whether a backend has been installed.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.slot.get().is_some()
    }
}

static GLOBAL: BackendCell = BackendCell::new();

/// Installs the process-wide backend built by `factory`.
///
/// # Errors
///
/// Returns the factory's error; the global stays uninitialized.
pub fn init_with<F>(factory: F) -> Result<()>
where
    F: FnOnce() -> Result<Arc<dyn ArchiveBackend>>,
{
    GLOBAL.init_with(factory)
}

/// Installs [`NativeBackend`] as the process-wide backend.
///
/// # Errors
///
/// Never fails today; the signature matches [`init_with`].
pub fn init_native() -> Result<()> {
    init_with(|| Ok(Arc::new(NativeBackend::new())))
}

/// Returns the process-wide backend.
///
/// # Errors
///
/// Returns `NotInitialized` before a successful [`init_with`].
pub fn handle() -> Result<Arc<dyn ArchiveBackend>> {
    GLOBAL.handle()
}

/// Whether the process-wide backend has been installed.
#[must_use]
pub fn is_initialized() -> bool {
    GLOBAL.is_initialized()
}
