//! Runtime pieces around the pool price.
//!
//! - Periodic refresh scheduling
//! - Price monitoring with freshness checks
//! - Single-flight gating of user actions

/// Prelude module for convenient imports.
pub mod prelude;

/// Execution errors.
pub mod error;
/// In-flight action gate.
pub mod gate;
/// Price monitoring.
pub mod monitor;
/// Scheduler for refresh timing.
pub mod scheduler;

pub use error::ExecutionError;
