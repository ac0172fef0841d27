use seotools_core::{HistoryEntry, HistoryLog};
use seotools_logging::{client_error, client_info, client_warn};

use crate::storage::KeyValueStore;

/// Fixed key the history blob is stored under.
pub const HISTORY_KEY: &str = "seo_tools_history";

/// Asks the user before a destructive operation.
pub trait Confirm {
    fn confirm(&self, prompt: &str) -> bool;
}

impl<F: Fn(&str) -> bool> Confirm for F {
    fn confirm(&self, prompt: &str) -> bool {
        self(prompt)
    }
}

pub const CLEAR_HISTORY_PROMPT: &str = "Are you sure you want to clear the history?";

/// Durable, newest-first log of submitted tasks.
///
/// Storage problems never reach the caller: unreadable or corrupt data loads
/// as an empty log and failed writes are logged and dropped.
///
/// A caller driven by the core state machine owns the log in `AppState` and
/// only mirrors it: [`save`](Self::save) on `Effect::PersistHistory` and
/// [`discard`](Self::discard) on `Effect::ClearPersistedHistory`, the
/// confirmation having gone through `Effect::ConfirmClearHistory` already.
/// [`add`](Self::add) and [`clear`](Self::clear) are for callers without a
/// state machine; they keep the capacity and confirmation rules on their own.
pub struct HistoryStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Newest first, at most ten entries.
    pub fn get_all(&self) -> Vec<HistoryEntry> {
        self.load().to_vec()
    }

    /// Prepends `entry`, evicting the oldest beyond ten.
    pub fn add(&self, entry: HistoryEntry) {
        let mut log = self.load();
        if let Some(evicted) = log.push(entry) {
            client_info!("History full, dropping task {}", evicted.task_id);
        }
        self.save(&log.to_vec());
    }

    /// Replaces the persisted log, e.g. with the state machine's copy.
    pub fn save(&self, entries: &[HistoryEntry]) {
        let log = HistoryLog::from_entries(entries.iter().cloned());
        let content = match serde_json::to_string(&log.to_vec()) {
            Ok(text) => text,
            Err(err) => {
                client_error!("Failed to serialize history: {}", err);
                return;
            }
        };
        if let Err(err) = self.store.write(HISTORY_KEY, &content) {
            client_error!("Failed to save history: {}", err);
        }
    }

    /// Discards every entry once `confirm` agrees. Returns whether the log
    /// was cleared.
    pub fn clear(&self, confirm: &dyn Confirm) -> bool {
        if !confirm.confirm(CLEAR_HISTORY_PROMPT) {
            return false;
        }
        self.discard();
        true
    }

    /// Discards every entry; callers are expected to have confirmed already.
    pub fn discard(&self) {
        if let Err(err) = self.store.remove(HISTORY_KEY) {
            client_error!("Failed to clear history: {}", err);
        }
    }

    fn load(&self) -> HistoryLog {
        let content = match self.store.read(HISTORY_KEY) {
            Ok(Some(text)) => text,
            Ok(None) => return HistoryLog::new(),
            Err(err) => {
                client_warn!("Failed to read history: {}", err);
                return HistoryLog::new();
            }
        };
        match serde_json::from_str::<Vec<HistoryEntry>>(&content) {
            Ok(entries) => HistoryLog::from_entries(entries),
            Err(err) => {
                client_warn!("Failed to parse history, starting empty: {}", err);
                HistoryLog::new()
            }
        }
    }
}
