use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

use seotools_core::RateLimitState;
use seotools_logging::{client_debug, client_warn};

use crate::{EngineEvent, EventSink, TaskApi};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Polls the remaining request budget and publishes it.
///
/// A failed poll keeps the last published value; it is never reset.
pub struct RateLimitMonitor {
    api: Arc<dyn TaskApi>,
    sink: Arc<dyn EventSink>,
    latest: Mutex<Option<RateLimitState>>,
}

impl RateLimitMonitor {
    pub fn new(api: Arc<dyn TaskApi>, sink: Arc<dyn EventSink>) -> Self {
        Self {
            api,
            sink,
            latest: Mutex::new(None),
        }
    }

    /// Last successfully polled state.
    pub fn latest(&self) -> Option<RateLimitState> {
        *self.latest.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub async fn poll_once(&self) -> Option<RateLimitState> {
        match self.api.rate_limit().await {
            Ok(state) => {
                client_debug!("Rate limit {}/{}", state.remaining, state.limit);
                *self.latest.lock().unwrap_or_else(PoisonError::into_inner) = Some(state);
                self.sink.emit(EngineEvent::RateLimitUpdated(state));
                Some(state)
            }
            Err(err) => {
                client_warn!("Error fetching rate limit: {}", err);
                self.sink.emit(EngineEvent::RateLimitPollFailed(err));
                None
            }
        }
    }

    /// Polls immediately, then once per `interval` until `cancel` fires.
    pub fn spawn(
        self: Arc<Self>,
        runtime: &Handle,
        interval: Duration,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        let interval = if interval.is_zero() {
            DEFAULT_POLL_INTERVAL
        } else {
            interval
        };
        runtime.spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                tokio::select! {
                    _ = cancel.cancelled() => break,
                    _ = ticker.tick() => {
                        self.poll_once().await;
                    }
                }
            }
        })
    }
}
