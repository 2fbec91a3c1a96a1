//! Allows one in-flight run of an action at a time. A trigger that arrives
//! while the action is running is rejected, not queued.

use crate::error::ExecutionError;
use std::future::Future;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, warn};

#[derive(Debug, Clone)]
pub struct ActionGate {
    name: Arc<str>,
    busy: Arc<AtomicBool>,
}

impl ActionGate {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: Arc::from(name.into()),
            busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst)
    }

    /// Claims the gate. The returned permit releases it when dropped.
    pub fn try_acquire(&self) -> Result<ActionPermit, ExecutionError> {
        if self
            .busy
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .is_err()
        {
            warn!(action = %self.name, "Action already in progress");
            return Err(ExecutionError::GateBusy(self.name.to_string()));
        }
        debug!(action = %self.name, "Action started");
        Ok(ActionPermit {
            name: self.name.clone(),
            busy: self.busy.clone(),
        })
    }

    /// Runs `action` while holding the gate.
    pub async fn run<F, T>(&self, action: F) -> Result<T, ExecutionError>
    where
        F: Future<Output = T>,
    {
        let _permit = self.try_acquire()?;
        Ok(action.await)
    }
}

#[derive(Debug)]
pub struct ActionPermit {
    name: Arc<str>,
    busy: Arc<AtomicBool>,
}

impl Drop for ActionPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
        debug!(action = %self.name, "Action finished");
    }
}
