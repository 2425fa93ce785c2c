//! Admission control: the bomb heuristic and the per-node policy.

pub mod bomb;
pub mod policy;

pub use bomb::is_bomb;
pub use policy::AdmissionPolicy;
