use std::sync::Once;
use std::time::Duration;

use seotools_core::{
    update, AppState, Effect, Endpoint, FieldValue, Msg, QuotaExceeded, Severity, SubmitResult,
    TaskStatus, Timings,
};

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(seotools_logging::initialize_for_tests);
}

fn fields(raw: &[(&str, &str)]) -> Vec<(String, String)> {
    raw.iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn submit(state: AppState, endpoint: &str, raw: &[(&str, &str)]) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::FormSubmitted {
            endpoint: Endpoint::from(endpoint),
            fields: fields(raw),
        },
    )
}

fn complete(state: AppState, result: SubmitResult) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::SubmitCompleted {
            result,
            timestamp: "2024-05-01T12:00:00Z".to_string(),
        },
    )
}

fn created(task_id: &str) -> SubmitResult {
    SubmitResult::Created {
        task_id: task_id.to_string(),
        status: TaskStatus::Pending,
    }
}

#[test]
fn submission_disables_submit_and_emits_request() {
    init_logging();
    let (mut state, effects) = submit(
        AppState::new(),
        "bot-check",
        &[("url", "https://example.com"), ("selected_bots", "googlebot")],
    );

    assert!(state.is_submitting());
    assert!(!state.view().submit_enabled);
    assert!(state.consume_dirty());
    assert_eq!(effects.len(), 1);
    match &effects[0] {
        Effect::SubmitTask { endpoint, request } => {
            assert_eq!(*endpoint, Endpoint::BotCheck);
            assert_eq!(request.url(), "https://example.com");
            assert_eq!(
                request.get("selected_bots").and_then(|v| v.as_list()),
                Some(&[FieldValue::from("googlebot")][..])
            );
        }
        other => panic!("unexpected effect {other:?}"),
    }
}

#[test]
fn second_submission_while_in_flight_is_ignored() {
    init_logging();
    let (state, _) = submit(AppState::new(), "robots-check", &[("url", "https://a.example")]);
    let (state, effects) = submit(state, "robots-check", &[("url", "https://b.example")]);

    assert!(effects.is_empty());
    assert_eq!(state.view().submitting.as_deref(), Some("robots-check"));
}

#[test]
fn success_appends_history_then_persists_then_schedules_redirect() {
    init_logging();
    let (state, _) = submit(AppState::new(), "site-analyze", &[("url", "https://example.com")]);
    let (state, effects) = complete(state, created("abc-123"));

    let history = state.history().to_vec();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].task_id, "abc-123");
    assert_eq!(history[0].tool, "site-analyze");
    assert_eq!(history[0].url, "https://example.com");
    assert_eq!(history[0].status, TaskStatus::Pending);
    assert_eq!(history[0].timestamp, "2024-05-01T12:00:00Z");
    assert!(state.view().submit_enabled);

    let persist_at = effects
        .iter()
        .position(|e| matches!(e, Effect::PersistHistory(_)))
        .expect("persist effect");
    let redirect_at = effects
        .iter()
        .position(|e| matches!(e, Effect::ScheduleRedirect { .. }))
        .expect("redirect effect");
    assert!(persist_at < redirect_at);
    assert_eq!(
        effects[redirect_at],
        Effect::ScheduleRedirect {
            task_id: "abc-123".to_string(),
            after: Duration::from_millis(1000),
        }
    );
    assert_eq!(
        effects
            .iter()
            .filter(|e| matches!(e, Effect::PersistHistory(_)))
            .count(),
        1
    );

    let view = state.view();
    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].severity, Severity::Success);
}

#[test]
fn redirect_navigates_to_results_page_once() {
    init_logging();
    let (state, _) = submit(AppState::new(), "site-analyze", &[("url", "https://example.com")]);
    let (state, _) = complete(state, created("abc-123"));

    let (state, effects) = update(
        state,
        Msg::RedirectDue {
            task_id: "abc-123".to_string(),
        },
    );
    assert_eq!(
        effects,
        vec![Effect::Navigate {
            path: "/results/abc-123".to_string()
        }]
    );
    assert_eq!(state.view().location.as_deref(), Some("/results/abc-123"));

    let (_state, effects) = update(
        state,
        Msg::RedirectDue {
            task_id: "abc-123".to_string(),
        },
    );
    assert!(effects.is_empty());
}

#[test]
fn quota_exceeded_shows_dialog_without_history() {
    init_logging();
    let (state, _) = submit(AppState::new(), "mobile-check", &[("url", "https://example.com")]);
    let (state, effects) = complete(
        state,
        SubmitResult::QuotaExceeded(QuotaExceeded::from_parts(Some(10), Some(1800))),
    );

    assert!(effects.is_empty());
    assert!(state.history().is_empty());
    let view = state.view();
    assert!(view.submit_enabled);
    let dialog = view.quota_dialog.expect("quota dialog");
    assert_eq!(dialog.limit, 10);
    assert_eq!(dialog.reset_minutes, 30);

    let (state, _) = update(state, Msg::QuotaDialogClosed);
    assert!(state.view().quota_dialog.is_none());
}

#[test]
fn generic_failure_notifies_and_reenables_submit() {
    init_logging();
    let (state, _) = submit(AppState::new(), "render-audit", &[("url", "https://example.com")]);
    let (state, effects) = complete(
        state,
        SubmitResult::Failed {
            reason: "http status 500".to_string(),
        },
    );

    assert!(state.history().is_empty());
    assert!(state.view().submit_enabled);
    assert!(effects
        .iter()
        .all(|e| matches!(e, Effect::ScheduleNoticeDismissal { .. })));
    let view = state.view();
    assert_eq!(view.notices.len(), 1);
    assert_eq!(view.notices[0].severity, Severity::Error);
    assert_eq!(
        view.notices[0].message,
        "Failed to create task. Try again later."
    );
}

#[test]
fn batch_validation_failure_never_reaches_the_network() {
    init_logging();
    let (state, effects) = submit(
        AppState::new(),
        "site-audit-pro",
        &[("scan_mode", "batch"), ("batch_urls_text", "\n  \n")],
    );

    assert!(!state.is_submitting());
    assert!(!effects
        .iter()
        .any(|e| matches!(e, Effect::SubmitTask { .. })));
    let view = state.view();
    assert_eq!(view.notices[0].severity, Severity::Warning);
    assert_eq!(view.notices[0].message, "Add at least one URL for batch scan");
}

#[test]
fn site_audit_controls_feed_the_submission() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::ScanModeChanged(seotools_core::ScanMode::Batch));
    let (state, _) = update(
        state,
        Msg::BatchTextChanged("https://a.example\nhttps://b.example\n".to_string()),
    );
    let (_state, effects) = update(state, Msg::SiteAuditSubmitted);

    let Some(Effect::SubmitTask { endpoint, request }) = effects.first() else {
        panic!("expected submit effect, got {effects:?}");
    };
    assert_eq!(*endpoint, Endpoint::SiteAuditPro);
    assert_eq!(request.url(), "https://a.example");
    assert_eq!(request.scalar("mode"), Some(&FieldValue::from("full")));
    assert_eq!(request.scalar("max_pages"), Some(&FieldValue::Int(2)));
    assert!(!request.contains("scan_mode"));
}

#[test]
fn notices_expire_by_id() {
    init_logging();
    let timings = Timings {
        redirect_delay: Duration::from_millis(10),
        notice_ttl: Duration::from_millis(20),
    };
    let (state, _) = submit(
        AppState::with_timings(timings),
        "site-audit-pro",
        &[("scan_mode", "batch")],
    );
    let view = state.view();
    let id = view.notices[0].id;

    let (state, _) = update(state, Msg::NoticeExpired(id + 1));
    assert_eq!(state.view().notices.len(), 1);
    let (state, _) = update(state, Msg::NoticeExpired(id));
    assert!(state.view().notices.is_empty());
}

#[test]
fn clearing_history_requires_confirmation() {
    init_logging();
    let (state, _) = submit(AppState::new(), "site-analyze", &[("url", "https://example.com")]);
    let (state, _) = complete(state, created("t1"));

    // Confirmation without a request is ignored.
    let (state, effects) = update(state, Msg::ClearHistoryConfirmed);
    assert!(effects.is_empty());
    assert_eq!(state.history().len(), 1);

    let (state, effects) = update(state, Msg::ClearHistoryRequested);
    assert_eq!(effects, vec![Effect::ConfirmClearHistory]);
    let (state, _) = update(state, Msg::ClearHistoryDeclined);
    assert_eq!(state.history().len(), 1);

    let (state, _) = update(state, Msg::ClearHistoryRequested);
    let (state, effects) = update(state, Msg::ClearHistoryConfirmed);
    assert!(state.history().is_empty());
    assert_eq!(effects[0], Effect::ClearPersistedHistory);
}

#[test]
fn rate_limit_poll_failure_keeps_last_value() {
    init_logging();
    let polled = seotools_core::RateLimitState {
        remaining: 7,
        limit: 10,
    };
    let (state, _) = update(AppState::new(), Msg::RateLimitPolled(polled));
    let (mut state, _) = update(state, Msg::RateLimitPollFailed);

    assert_eq!(state.rate_limit(), Some(polled));
    let badge = state.view().rate_limit.expect("badge");
    assert_eq!(badge.text, "7/10");
    assert!(!badge.low);
    assert!(state.consume_dirty());
}

#[test]
fn poll_failure_without_a_reading_changes_nothing() {
    init_logging();
    let state = AppState::new();
    let (mut next, effects) = update(state.clone(), Msg::RateLimitPollFailed);

    assert!(effects.is_empty());
    assert_eq!(next, state);
    assert!(next.view().rate_limit.is_none());
    assert!(!next.consume_dirty());
}

#[test]
fn stray_completion_is_ignored() {
    init_logging();
    let (state, effects) = complete(AppState::new(), created("ghost"));
    assert!(effects.is_empty());
    assert!(state.history().is_empty());
}
