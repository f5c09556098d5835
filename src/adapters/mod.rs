//! Adapters layer: concrete implementations of ports.
//!
//! - `memory`: in-process record store
//! - `sanitize`: PHI filtering for logs

pub mod memory;
pub mod sanitize;

pub use memory::MemoryStore;
