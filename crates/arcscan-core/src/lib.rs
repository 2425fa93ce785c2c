//! Bounded recursive scanning of untrusted archives.
//!
//! `arcscan-core` enumerates and extracts the contents of compressed
//! containers, including containers nested inside containers, without
//! letting adversarial input exhaust memory or recursion depth. Every node
//! of the tree passes an admission policy before it is extracted, every
//! extracted buffer passes a statistical bomb heuristic, and the scan stops
//! as soon as a resource or safety limit is hit.
//!
//! Policy decisions are data, not errors: each node carries an
//! [`OutcomeState`] saying whether it was extracted or why not.
//!
//! # Examples
//!
//! ```no_run
//! use arcscan_core::ArchiveScanner;
//! use arcscan_core::OutcomeState;
//! use arcscan_core::ScanLimits;
//! use arcscan_core::backend::shared;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! shared::init_native()?;
//! let scanner = ArchiveScanner::new(ScanLimits::default())?;
//! let nodes = scanner.get_content_list_recursive("bundle.zip", 3)?;
//! let unsafe_nodes = nodes
//!     .iter()
//!     .filter(|node| node.state == OutcomeState::Unsafe)
//!     .count();
//! println!("{} nodes, {unsafe_nodes} unsafe", nodes.len());
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod backend;
pub mod config;
pub mod engine;
pub mod error;
pub mod io;
pub mod scanner;
pub mod security;
#[doc(hidden)]
pub mod test_utils;
pub mod types;

pub use backend::ArchiveBackend;
pub use backend::Container;
pub use backend::ItemInfo;
pub use backend::NativeBackend;
pub use config::ScanLimits;
pub use error::Result;
pub use error::ScanError;
pub use scanner::ArchiveScanner;
pub use security::AdmissionPolicy;
pub use security::is_bomb;

pub use types::ArcInfo;
pub use types::Content;
pub use types::ContentList;
pub use types::Decompressed;
pub use types::FormatId;
pub use types::Meta;
pub use types::MetaOutcome;
pub use types::OutcomeState;
