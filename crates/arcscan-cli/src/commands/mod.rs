//! Subcommand implementations.

pub mod completion;
pub mod content;
pub mod list;
pub mod meta;
