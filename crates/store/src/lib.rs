//! `stockhand-store` — the remote store boundary.
//!
//! **Responsibility:** the contract the engine consumes from the remote
//! relational store (point reads and writes, no multi-row transaction), plus
//! an in-memory reference implementation for tests/dev and a fault-injecting
//! decorator for rollback tests.

pub mod error;
pub mod fault;
pub mod memory;
pub mod remote;

pub use error::StoreError;
pub use fault::FaultStore;
pub use memory::InMemoryStore;
pub use remote::RemoteStore;
