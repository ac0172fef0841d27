use crate::{Notice, SiteAuditControls, TaskStatus};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub submit_enabled: bool,
    /// Endpoint of the in-flight submission.
    pub submitting: Option<String>,
    pub history: Vec<HistoryRowView>,
    pub rate_limit: Option<RateLimitBadge>,
    pub quota_dialog: Option<QuotaDialogView>,
    pub notices: Vec<Notice>,
    pub clear_confirmation_pending: bool,
    /// Page the client navigated to after a successful submission.
    pub location: Option<String>,
    pub site_audit: SiteAuditView,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryRowView {
    pub task_id: String,
    pub tool_label: String,
    pub url: String,
    pub status: TaskStatus,
    pub status_mark: char,
    pub timestamp: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RateLimitBadge {
    pub text: String,
    pub low: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuotaDialogView {
    pub limit: u32,
    pub reset_minutes: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SiteAuditView {
    pub batch_box_visible: bool,
    pub root_url_enabled: bool,
    pub report_mode_enabled: bool,
    pub report_mode: &'static str,
    pub max_pages: i64,
    pub max_pages_limit: i64,
    pub max_pages_hint: &'static str,
}

impl From<&SiteAuditControls> for SiteAuditView {
    fn from(controls: &SiteAuditControls) -> Self {
        Self {
            batch_box_visible: controls.batch_box_visible(),
            root_url_enabled: controls.root_url_enabled(),
            report_mode_enabled: controls.report_mode_enabled(),
            report_mode: controls.report_mode().as_str(),
            max_pages: controls.max_pages(),
            max_pages_limit: controls.max_pages_limit(),
            max_pages_hint: controls.max_pages_hint(),
        }
    }
}
