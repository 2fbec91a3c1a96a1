//! JSON-RPC implementations of the reader traits.

/// Generated contract bindings.
pub mod bindings;
/// Provider-backed readers.
pub mod client;

pub use client::{EvmClient, RouterClient};
