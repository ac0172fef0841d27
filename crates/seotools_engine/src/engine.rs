use std::sync::mpsc::{self, RecvTimeoutError};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use seotools_core::{Endpoint, TaskRequest};
use seotools_logging::{client_error, client_info, client_warn};

use crate::monitor::RateLimitMonitor;
use crate::scheduler::{Scheduler, TimerHandle};
use crate::sink::{ChannelEventSink, EventSink};
use crate::{ApiError, ApiSettings, EngineEvent, ReqwestTaskApi, TaskApi, Timer};

enum EngineCommand {
    Submit {
        endpoint: Endpoint,
        request: TaskRequest,
    },
    PollRateLimit,
    StartMonitor {
        interval: Duration,
    },
    Schedule {
        after: Duration,
        timer: Timer,
        token: CancellationToken,
    },
    Stop,
}

/// Owns the IO thread. Dropping the handle cancels pending timers and the
/// rate-limit monitor.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
    root: CancellationToken,
}

impl EngineHandle {
    pub fn new(settings: ApiSettings) -> Result<Self, ApiError> {
        let api = ReqwestTaskApi::new(settings)?;
        Ok(Self::with_api(Arc::new(api)))
    }

    pub fn with_api(api: Arc<dyn TaskApi>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let root = CancellationToken::new();
        let engine_root = root.clone();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    client_error!("Failed to start engine runtime: {}", err);
                    return;
                }
            };
            let sink: Arc<dyn EventSink> = Arc::new(ChannelEventSink::new(event_tx));
            let scheduler =
                Scheduler::with_root(runtime.handle().clone(), sink.clone(), engine_root.clone());
            let monitor = Arc::new(RateLimitMonitor::new(api.clone(), sink.clone()));

            while let Ok(command) = cmd_rx.recv() {
                match command {
                    EngineCommand::Submit { endpoint, request } => {
                        let api = api.clone();
                        let sink = sink.clone();
                        runtime.spawn(async move {
                            let result = api.submit(&endpoint, &request).await;
                            if let Err(err) = &result {
                                client_warn!("Error starting task on {}: {}", endpoint, err);
                            }
                            sink.emit(EngineEvent::SubmitFinished { endpoint, result });
                        });
                    }
                    EngineCommand::PollRateLimit => {
                        let monitor = monitor.clone();
                        runtime.spawn(async move {
                            monitor.poll_once().await;
                        });
                    }
                    EngineCommand::StartMonitor { interval } => {
                        client_info!("Rate-limit monitor every {:?}", interval);
                        monitor.clone().spawn(
                            runtime.handle(),
                            interval,
                            engine_root.child_token(),
                        );
                    }
                    EngineCommand::Schedule {
                        after,
                        timer,
                        token,
                    } => scheduler.schedule_with(after, timer, token),
                    EngineCommand::Stop => break,
                }
            }
            scheduler.shutdown();
            client_info!("Engine stopped");
        });

        Self {
            cmd_tx,
            event_rx,
            root,
        }
    }

    /// Sends one task request; the answer arrives as
    /// [`EngineEvent::SubmitFinished`].
    pub fn submit(&self, endpoint: Endpoint, request: TaskRequest) {
        let _ = self.cmd_tx.send(EngineCommand::Submit { endpoint, request });
    }

    pub fn poll_rate_limit(&self) {
        let _ = self.cmd_tx.send(EngineCommand::PollRateLimit);
    }

    /// Polls once now and then every `interval`.
    pub fn start_rate_limit_monitor(&self, interval: Duration) {
        let _ = self
            .cmd_tx
            .send(EngineCommand::StartMonitor { interval });
    }

    pub fn schedule(&self, after: Duration, timer: Timer) -> TimerHandle {
        let token = self.root.child_token();
        let _ = self.cmd_tx.send(EngineCommand::Schedule {
            after,
            timer,
            token: token.clone(),
        });
        TimerHandle::new(token)
    }

    /// Cancels every pending timer, stops the monitor and ends the engine
    /// thread. Commands sent afterwards are ignored.
    pub fn shutdown(&self) {
        self.root.cancel();
        let _ = self.cmd_tx.send(EngineCommand::Stop);
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    /// Waits up to `timeout` for the next event.
    ///
    /// [`RecvTimeoutError::Disconnected`] means the engine thread is gone
    /// (shut down, or its runtime failed to start) and no event will ever
    /// arrive.
    pub fn recv_timeout(&self, timeout: Duration) -> Result<EngineEvent, RecvTimeoutError> {
        self.event_rx.recv_timeout(timeout)
    }
}

impl Drop for EngineHandle {
    fn drop(&mut self) {
        self.root.cancel();
    }
}
