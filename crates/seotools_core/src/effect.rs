use std::time::Duration;

use crate::{Endpoint, HistoryEntry, NoticeId, TaskRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Send one task-creation request.
    SubmitTask {
        endpoint: Endpoint,
        request: TaskRequest,
    },
    /// Write the whole history log, newest first.
    PersistHistory(Vec<HistoryEntry>),
    ClearPersistedHistory,
    /// Ask the user before discarding history.
    ConfirmClearHistory,
    ScheduleNoticeDismissal { id: NoticeId, after: Duration },
    ScheduleRedirect { task_id: String, after: Duration },
    /// Leave for the results page.
    Navigate { path: String },
}
