//! SEO tools client engine: backend API, local persistence, timers and the
//! rate-limit monitor.
mod api;
mod engine;
mod history_store;
mod monitor;
mod scheduler;
mod sink;
mod storage;
mod types;

pub use api::{ApiSettings, ReqwestTaskApi, TaskApi};
pub use engine::EngineHandle;
pub use history_store::{Confirm, HistoryStore, CLEAR_HISTORY_PROMPT, HISTORY_KEY};
pub use monitor::{RateLimitMonitor, DEFAULT_POLL_INTERVAL};
pub use scheduler::{Scheduler, TimerHandle};
pub use sink::{ChannelEventSink, EventSink};
pub use storage::{ensure_storage_dir, AtomicFileWriter, FileKeyValueStore, KeyValueStore, PersistError};
pub use types::{submit_result, ApiError, EngineEvent, FailureKind, SubmitOutcome, Timer};
