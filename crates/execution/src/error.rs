use lp_desk_domain::DomainError;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExecutionError {
    /// Another run of the same action has not finished.
    #[error("{0} already in progress")]
    GateBusy(String),
    /// The latest quote is older than the configured maximum age.
    #[error("pool price is stale ({age:?} old, max {max_age:?})")]
    StaleQuote { age: Duration, max_age: Duration },
    /// No quote has been fetched yet.
    #[error("pool price has not been fetched yet")]
    NoQuote,
    #[error(transparent)]
    Domain(#[from] DomainError),
}
