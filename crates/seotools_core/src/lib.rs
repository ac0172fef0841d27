//! SEO tools client core: form serialization, the site-audit mode policy,
//! the bounded history log and the pure submission state machine.
mod controls;
mod effect;
mod endpoint;
mod field;
mod form;
mod history;
mod msg;
mod rate_limit;
mod request;
mod site_audit;
mod state;
mod update;
mod view_model;

pub use controls::SiteAuditControls;
pub use effect::Effect;
pub use endpoint::{tool_label, Endpoint};
pub use field::FieldValue;
pub use form::{serialize_form, MULTI_VALUED_FIELDS};
pub use history::{HistoryEntry, HistoryLog, TaskStatus, HISTORY_CAPACITY};
pub use msg::{Msg, SubmitResult};
pub use rate_limit::{
    QuotaExceeded, RateLimitState, DEFAULT_QUOTA_LIMIT, DEFAULT_QUOTA_RESET_SECS,
    LOW_REMAINING_THRESHOLD,
};
pub use request::{RequestValue, TaskRequest};
pub use site_audit::{
    apply_site_audit_policy, parse_batch_urls, ReportMode, ScanMode, ValidationError,
    BATCH_URL_LIMIT, FULL_CRAWL_PAGE_CAP, QUICK_CRAWL_PAGE_CAP,
};
pub use state::{
    AppState, Notice, NoticeId, Severity, Timings, DEFAULT_NOTICE_TTL, DEFAULT_REDIRECT_DELAY,
};
pub use update::update;
pub use view_model::{
    AppViewModel, HistoryRowView, QuotaDialogView, RateLimitBadge, SiteAuditView,
};
