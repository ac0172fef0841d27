use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;

use crate::{EngineEvent, EventSink, Timer};

/// Cancels one scheduled timer.
#[derive(Debug, Clone)]
pub struct TimerHandle {
    token: CancellationToken,
}

impl TimerHandle {
    pub(crate) fn new(token: CancellationToken) -> Self {
        Self { token }
    }

    pub fn cancel(&self) {
        self.token.cancel();
    }

    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }
}

/// Fires [`EngineEvent::TimerFired`] after a delay unless cancelled first.
///
/// Every timer hangs off one root token, so [`Scheduler::shutdown`] cancels
/// all of them at once.
pub struct Scheduler {
    runtime: Handle,
    root: CancellationToken,
    sink: Arc<dyn EventSink>,
}

impl Scheduler {
    pub fn new(runtime: Handle, sink: Arc<dyn EventSink>) -> Self {
        Self::with_root(runtime, sink, CancellationToken::new())
    }

    pub fn with_root(runtime: Handle, sink: Arc<dyn EventSink>, root: CancellationToken) -> Self {
        Self { runtime, root, sink }
    }

    pub fn schedule(&self, after: Duration, timer: Timer) -> TimerHandle {
        let token = self.root.child_token();
        self.schedule_with(after, timer, token.clone());
        TimerHandle::new(token)
    }

    /// Schedules against a token created by the caller.
    pub(crate) fn schedule_with(&self, after: Duration, timer: Timer, token: CancellationToken) {
        let sink = self.sink.clone();
        self.runtime.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => {}
                _ = tokio::time::sleep(after) => {
                    if !token.is_cancelled() {
                        sink.emit(EngineEvent::TimerFired(timer));
                    }
                }
            }
        });
    }

    pub fn shutdown(&self) {
        self.root.cancel();
    }
}
