//! I/O utilities shared by the native format handlers.

pub mod bounded;

pub use bounded::count_bytes;
pub use bounded::decode_error;
pub use bounded::drain_bounded;
pub use bounded::read_bounded;
