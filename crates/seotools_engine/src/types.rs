use std::fmt;

use seotools_core::{Endpoint, NoticeId, QuotaExceeded, RateLimitState, SubmitResult, TaskStatus};

/// Successful answers to a task submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created { task_id: String, status: TaskStatus },
    /// The request budget is exhausted; an expected, recoverable answer.
    QuotaExceeded(QuotaExceeded),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    pub kind: FailureKind,
    pub message: String,
}

impl ApiError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    HttpStatus(u16),
    Timeout,
    InvalidResponse,
    Network,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::InvalidResponse => write!(f, "invalid response"),
            FailureKind::Network => write!(f, "network error"),
        }
    }
}

/// Timers the engine can schedule on behalf of the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timer {
    Redirect { task_id: String },
    NoticeDismissal { id: NoticeId },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SubmitFinished {
        endpoint: Endpoint,
        result: Result<SubmitOutcome, ApiError>,
    },
    RateLimitUpdated(RateLimitState),
    RateLimitPollFailed(ApiError),
    TimerFired(Timer),
}

/// Maps an engine submission result onto the state machine's vocabulary.
pub fn submit_result(result: Result<SubmitOutcome, ApiError>) -> SubmitResult {
    match result {
        Ok(SubmitOutcome::Created { task_id, status }) => SubmitResult::Created { task_id, status },
        Ok(SubmitOutcome::QuotaExceeded(quota)) => SubmitResult::QuotaExceeded(quota),
        Err(err) => SubmitResult::Failed {
            reason: err.to_string(),
        },
    }
}
