//! Domain types and pure math for pool pricing and liquidity provisioning.
//!
//! Nothing in this crate performs I/O. Values read from chain are handed in
//! already decoded, and every calculation is a function of its inputs.

/// Tokens, pools, balances and transaction history.
pub mod entities;
/// Small closed sets shared across the workspace.
pub mod enums;
/// Domain error type.
pub mod error;
/// Tick, ratio and swap calculations.
pub mod math;
/// Read-only checks performed before a deposit is submitted.
pub mod preflight;
/// Immutable results and measurement types.
pub mod value_objects;

pub use error::DomainError;
