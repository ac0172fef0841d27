use std::time::Duration;

use chrono::Utc;
use seotools_core::{Effect, Msg};
use seotools_engine::{
    submit_result, Confirm, EngineEvent, EngineHandle, FileKeyValueStore, HistoryStore,
    TimerHandle, Timer, CLEAR_HISTORY_PROMPT,
};
use seotools_logging::{client_debug, client_info};

/// Executes effects against the engine, local storage and the terminal.
pub struct EffectRunner {
    engine: EngineHandle,
    history: HistoryStore<FileKeyValueStore>,
    confirm: Box<dyn Confirm>,
    timers: Vec<TimerHandle>,
    redirect_pending: bool,
}

impl EffectRunner {
    pub fn new(
        engine: EngineHandle,
        history: HistoryStore<FileKeyValueStore>,
        confirm: Box<dyn Confirm>,
    ) -> Self {
        Self {
            engine,
            history,
            confirm,
            timers: Vec::new(),
            redirect_pending: false,
        }
    }

    pub fn engine(&self) -> &EngineHandle {
        &self.engine
    }

    pub fn history(&self) -> &HistoryStore<FileKeyValueStore> {
        &self.history
    }

    /// A redirect was scheduled and has not happened yet.
    pub fn redirect_pending(&self) -> bool {
        self.redirect_pending
    }

    /// Runs effects; returns messages produced synchronously, such as the
    /// answer to a confirmation prompt.
    pub fn run(&mut self, effects: Vec<Effect>) -> Vec<Msg> {
        let mut follow_ups = Vec::new();
        for effect in effects {
            match effect {
                Effect::SubmitTask { endpoint, request } => {
                    client_info!("SubmitTask endpoint={} fields={}", endpoint, request.len());
                    self.engine.submit(endpoint, request);
                }
                Effect::PersistHistory(entries) => {
                    self.history.save(&entries);
                }
                Effect::ClearPersistedHistory => {
                    self.history.discard();
                }
                Effect::ConfirmClearHistory => {
                    let msg = if self.confirm.confirm(CLEAR_HISTORY_PROMPT) {
                        Msg::ClearHistoryConfirmed
                    } else {
                        Msg::ClearHistoryDeclined
                    };
                    follow_ups.push(msg);
                }
                Effect::ScheduleNoticeDismissal { id, after } => {
                    self.schedule(after, Timer::NoticeDismissal { id });
                }
                Effect::ScheduleRedirect { task_id, after } => {
                    self.redirect_pending = true;
                    self.schedule(after, Timer::Redirect { task_id });
                }
                Effect::Navigate { path } => {
                    client_info!("Navigate {}", path);
                    self.redirect_pending = false;
                }
            }
        }
        follow_ups
    }

    fn schedule(&mut self, after: Duration, timer: Timer) {
        client_debug!("Schedule {:?} in {:?}", timer, after);
        self.timers.retain(|handle| !handle.is_cancelled());
        self.timers.push(self.engine.schedule(after, timer));
    }
}

impl Drop for EffectRunner {
    fn drop(&mut self) {
        for handle in &self.timers {
            handle.cancel();
        }
    }
}

/// Translates an engine event into a state-machine message.
pub fn map_event(event: EngineEvent) -> Msg {
    match event {
        EngineEvent::SubmitFinished { result, .. } => Msg::SubmitCompleted {
            result: submit_result(result),
            timestamp: Utc::now().to_rfc3339(),
        },
        EngineEvent::RateLimitUpdated(state) => Msg::RateLimitPolled(state),
        EngineEvent::RateLimitPollFailed(_) => Msg::RateLimitPollFailed,
        EngineEvent::TimerFired(Timer::Redirect { task_id }) => Msg::RedirectDue { task_id },
        EngineEvent::TimerFired(Timer::NoticeDismissal { id }) => Msg::NoticeExpired(id),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seotools_core::{RateLimitState, SubmitResult, TaskStatus};
    use seotools_engine::SubmitOutcome;

    #[test]
    fn engine_events_map_to_messages() {
        let created = map_event(EngineEvent::SubmitFinished {
            endpoint: "robots-check".into(),
            result: Ok(SubmitOutcome::Created {
                task_id: "t1".to_string(),
                status: TaskStatus::Pending,
            }),
        });
        match created {
            Msg::SubmitCompleted { result, timestamp } => {
                assert_eq!(
                    result,
                    SubmitResult::Created {
                        task_id: "t1".to_string(),
                        status: TaskStatus::Pending,
                    }
                );
                assert!(chrono::DateTime::parse_from_rfc3339(&timestamp).is_ok());
            }
            other => panic!("unexpected {other:?}"),
        }

        let state = RateLimitState {
            remaining: 3,
            limit: 10,
        };
        assert_eq!(
            map_event(EngineEvent::RateLimitUpdated(state)),
            Msg::RateLimitPolled(state)
        );
        assert_eq!(
            map_event(EngineEvent::TimerFired(Timer::NoticeDismissal { id: 7 })),
            Msg::NoticeExpired(7)
        );
        assert_eq!(
            map_event(EngineEvent::TimerFired(Timer::Redirect {
                task_id: "t1".to_string()
            })),
            Msg::RedirectDue {
                task_id: "t1".to_string()
            }
        );
    }
}
