//! Value types shared by the scanner, the policy and the engine.
//!
//! Everything here is plain data: outcome states, format identifiers,
//! result nodes and top-level metadata.

pub mod format_id;
pub mod meta;
pub mod node;
pub mod outcome;

pub use format_id::FormatId;
pub use format_id::extension_for_code;
pub use meta::Meta;
pub use meta::MetaOutcome;
pub use node::ArcInfo;
pub use node::Content;
pub use node::ContentList;
pub use node::Decompressed;
pub use node::PATH_SEPARATOR;
pub use node::compose_path;
pub use outcome::OutcomeState;
