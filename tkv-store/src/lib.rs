//! # tkv Ephemeral Store
//!
//! Purpose: Provide the disposable store instance the demo's tests run
//! against: a sharded in-memory engine behind a RESP2 TCP server, launched
//! on an OS-assigned port and torn down on drop.
//!
//! This crate implements no durability, TTL, or eviction. It exists so a
//! real store can be started per test run without any external process.

mod engine;
mod ephemeral;
mod server;

pub use engine::Store;
pub use ephemeral::{EphemeralStore, StoreError, StoreResult};
pub use server::serve;
