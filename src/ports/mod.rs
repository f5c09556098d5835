//! Ports layer: trait definitions at the boundary of the core.
//!
//! Following Hexagonal Architecture, the use cases talk to the record store
//! through this trait only.

mod store;

pub use store::RecordStore;
