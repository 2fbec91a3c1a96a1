//! Prelude module for convenient imports.
//!
//! ```rust
//! use lp_desk_execution::prelude::*;
//! ```

pub use crate::error::ExecutionError;
pub use crate::gate::{ActionGate, ActionPermit};
pub use crate::monitor::{MonitorConfig, PriceMonitor};
pub use crate::scheduler::{
    DEFAULT_REFRESH_INTERVAL, Schedule, ScheduleBuilder, ScheduledTask, Scheduler, StopHandle,
    TaskEvent,
};
