use crate::{
    Endpoint, HistoryEntry, NoticeId, QuotaExceeded, RateLimitState, ReportMode, ScanMode,
    TaskStatus,
};

/// How the backend answered a submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitResult {
    Created { task_id: String, status: TaskStatus },
    QuotaExceeded(QuotaExceeded),
    Failed { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User submitted a tool form; fields are in document order.
    FormSubmitted {
        endpoint: Endpoint,
        fields: Vec<(String, String)>,
    },
    /// User submitted the site-audit form held in the controls.
    SiteAuditSubmitted,
    /// Site-audit scan mode selector changed.
    ScanModeChanged(ScanMode),
    /// Site-audit report depth selector changed.
    ReportModeChanged(ReportMode),
    /// Site-audit page cap input changed.
    MaxPagesChanged(i64),
    RootUrlChanged(String),
    BatchTextChanged(String),
    /// Engine finished the in-flight submission. `timestamp` is the RFC 3339
    /// completion time used for the history entry.
    SubmitCompleted {
        result: SubmitResult,
        timestamp: String,
    },
    /// Restore previously persisted history.
    HistoryRestored(Vec<HistoryEntry>),
    /// User clicked "clear history"; nothing is discarded until confirmed.
    ClearHistoryRequested,
    ClearHistoryConfirmed,
    ClearHistoryDeclined,
    /// Rate-limit poll succeeded.
    RateLimitPolled(RateLimitState),
    /// Rate-limit poll failed; the last known value stays on display.
    RateLimitPollFailed,
    QuotaDialogClosed,
    /// A notice reached the end of its display time.
    NoticeExpired(NoticeId),
    /// The post-submit redirect delay elapsed.
    RedirectDue { task_id: String },
}
