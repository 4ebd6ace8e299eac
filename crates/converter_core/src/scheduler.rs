//! Deferred hiding of transient messages.

use std::time::Duration;

use tokio::runtime::{Handle, TryCurrentError};

pub type HideTask = Box<dyn FnOnce() + Send + 'static>;

/// Handle to a pending hide task. Dropping it leaves the task scheduled;
/// call [`ScheduledHide::cancel`] to stop it from firing.
pub struct ScheduledHide {
    cancel: Option<Box<dyn FnOnce() + Send>>,
}

impl ScheduledHide {
    pub fn new(cancel: impl FnOnce() + Send + 'static) -> Self {
        Self {
            cancel: Some(Box::new(cancel)),
        }
    }

    pub fn detached() -> Self {
        Self { cancel: None }
    }

    pub fn cancel(mut self) {
        if let Some(cancel) = self.cancel.take() {
            cancel();
        }
    }
}

pub trait HideScheduler: Send + Sync {
    fn schedule(&self, delay: Duration, task: HideTask) -> ScheduledHide;
}

/// Never runs the task; messages stay until the next state change.
pub struct NeverHide;

impl HideScheduler for NeverHide {
    fn schedule(&self, _delay: Duration, _task: HideTask) -> ScheduledHide {
        ScheduledHide::detached()
    }
}

pub struct TokioHideScheduler {
    runtime: Handle,
}

impl TokioHideScheduler {
    pub fn new(runtime: Handle) -> Self {
        Self { runtime }
    }

    /// Uses the runtime of the calling context.
    pub fn current() -> Result<Self, TryCurrentError> {
        Handle::try_current().map(Self::new)
    }
}

impl HideScheduler for TokioHideScheduler {
    fn schedule(&self, delay: Duration, task: HideTask) -> ScheduledHide {
        let handle = self.runtime.spawn(async move {
            tokio::time::sleep(delay).await;
            task();
        });
        ScheduledHide::new(move || handle.abort())
    }
}
