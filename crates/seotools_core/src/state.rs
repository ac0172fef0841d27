use std::time::Duration;

use crate::view_model::{
    AppViewModel, HistoryRowView, QuotaDialogView, RateLimitBadge, SiteAuditView,
};
use crate::{
    tool_label, Endpoint, HistoryEntry, HistoryLog, QuotaExceeded, RateLimitState,
    SiteAuditControls, TaskStatus,
};

pub type NoticeId = u64;

/// Delay between a successful submission and leaving for the results page.
pub const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
/// How long a notice stays on screen.
pub const DEFAULT_NOTICE_TTL: Duration = Duration::from_millis(3000);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub id: NoticeId,
    pub severity: Severity,
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timings {
    pub redirect_delay: Duration,
    pub notice_ttl: Duration,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            notice_ttl: DEFAULT_NOTICE_TTL,
        }
    }
}

/// Submission waiting for the backend. While present the submit control is
/// disabled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct InFlight {
    pub(crate) endpoint: Endpoint,
    pub(crate) url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    timings: Timings,
    in_flight: Option<InFlight>,
    history: HistoryLog,
    rate_limit: Option<RateLimitState>,
    quota_dialog: Option<QuotaExceeded>,
    notices: Vec<Notice>,
    next_notice_id: NoticeId,
    clear_pending: bool,
    pending_redirect: Option<String>,
    location: Option<String>,
    site_audit: SiteAuditControls,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timings(timings: Timings) -> Self {
        Self {
            timings,
            ..Self::default()
        }
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            submit_enabled: self.in_flight.is_none(),
            submitting: self
                .in_flight
                .as_ref()
                .map(|in_flight| in_flight.endpoint.as_str().to_string()),
            history: self.history.entries().map(history_row).collect(),
            rate_limit: self.rate_limit.map(|state| RateLimitBadge {
                text: format!("{}/{}", state.remaining, state.limit),
                low: state.is_low(),
            }),
            quota_dialog: self.quota_dialog.map(|quota| QuotaDialogView {
                limit: quota.limit,
                reset_minutes: quota.reset_minutes(),
            }),
            notices: self.notices.clone(),
            clear_confirmation_pending: self.clear_pending,
            location: self.location.clone(),
            site_audit: SiteAuditView::from(&self.site_audit),
            dirty: self.dirty,
        }
    }

    pub fn timings(&self) -> Timings {
        self.timings
    }

    pub fn history(&self) -> &HistoryLog {
        &self.history
    }

    pub fn rate_limit(&self) -> Option<RateLimitState> {
        self.rate_limit
    }

    pub fn site_audit(&self) -> &SiteAuditControls {
        &self.site_audit
    }

    pub fn is_submitting(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Returns whether anything changed since the last call.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn site_audit_mut(&mut self) -> &mut SiteAuditControls {
        self.mark_dirty();
        &mut self.site_audit
    }

    pub(crate) fn begin_submission(&mut self, endpoint: Endpoint, url: String) {
        self.in_flight = Some(InFlight { endpoint, url });
        self.mark_dirty();
    }

    pub(crate) fn finish_submission(&mut self) -> Option<InFlight> {
        let finished = self.in_flight.take();
        if finished.is_some() {
            self.mark_dirty();
        }
        finished
    }

    pub(crate) fn record_history(&mut self, entry: HistoryEntry) {
        self.history.push(entry);
        self.mark_dirty();
    }

    pub(crate) fn restore_history(&mut self, entries: Vec<HistoryEntry>) {
        self.history = HistoryLog::from_entries(entries);
        self.mark_dirty();
    }

    pub(crate) fn request_clear(&mut self) {
        self.clear_pending = true;
        self.mark_dirty();
    }

    /// Clears history only when a confirmation was pending.
    pub(crate) fn confirm_clear(&mut self) -> bool {
        if !self.clear_pending {
            return false;
        }
        self.clear_pending = false;
        self.history.clear();
        self.mark_dirty();
        true
    }

    pub(crate) fn decline_clear(&mut self) {
        if self.clear_pending {
            self.clear_pending = false;
            self.mark_dirty();
        }
    }

    pub(crate) fn set_rate_limit(&mut self, state: RateLimitState) {
        self.rate_limit = Some(state);
        self.mark_dirty();
    }

    pub(crate) fn show_quota_dialog(&mut self, quota: QuotaExceeded) {
        self.quota_dialog = Some(quota);
        self.mark_dirty();
    }

    pub(crate) fn close_quota_dialog(&mut self) {
        if self.quota_dialog.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn push_notice(&mut self, severity: Severity, message: impl Into<String>) -> NoticeId {
        self.next_notice_id += 1;
        let id = self.next_notice_id;
        self.notices.push(Notice {
            id,
            severity,
            message: message.into(),
        });
        self.mark_dirty();
        id
    }

    pub(crate) fn expire_notice(&mut self, id: NoticeId) {
        let before = self.notices.len();
        self.notices.retain(|notice| notice.id != id);
        if self.notices.len() != before {
            self.mark_dirty();
        }
    }

    pub(crate) fn set_pending_redirect(&mut self, task_id: String) {
        self.pending_redirect = Some(task_id);
    }

    /// Takes the pending redirect when it matches `task_id`.
    pub(crate) fn take_redirect(&mut self, task_id: &str) -> Option<String> {
        if self.pending_redirect.as_deref() != Some(task_id) {
            return None;
        }
        self.pending_redirect = None;
        let path = format!("/results/{task_id}");
        self.location = Some(path.clone());
        self.mark_dirty();
        Some(path)
    }
}

fn history_row(entry: &HistoryEntry) -> HistoryRowView {
    let status_mark = match entry.status {
        TaskStatus::Success => '✓',
        TaskStatus::Failure => '✗',
        _ => '⏳',
    };
    HistoryRowView {
        task_id: entry.task_id.clone(),
        tool_label: tool_label(&entry.tool),
        url: entry.url.clone(),
        status: entry.status.clone(),
        status_mark,
        timestamp: entry.timestamp.clone(),
        link: format!("/results/{}", entry.task_id),
    }
}
