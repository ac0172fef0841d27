use crate::msg::SubmitResult;
use crate::{
    apply_site_audit_policy, serialize_form, AppState, Effect, Endpoint, HistoryEntry, Msg,
    Severity,
};

const TASK_CREATED_NOTICE: &str = "Task created successfully! Redirecting...";
const TASK_FAILED_NOTICE: &str = "Failed to create task. Try again later.";
const HISTORY_CLEARED_NOTICE: &str = "History cleared";

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::FormSubmitted { endpoint, fields } => submit_form(&mut state, endpoint, &fields),
        Msg::SiteAuditSubmitted => {
            let fields = state.site_audit().form_fields();
            submit_form(&mut state, Endpoint::SiteAuditPro, &fields)
        }
        Msg::ScanModeChanged(mode) => {
            state.site_audit_mut().set_scan_mode(mode);
            Vec::new()
        }
        Msg::ReportModeChanged(mode) => {
            state.site_audit_mut().set_report_mode(mode);
            Vec::new()
        }
        Msg::MaxPagesChanged(pages) => {
            state.site_audit_mut().set_max_pages(pages);
            Vec::new()
        }
        Msg::RootUrlChanged(url) => {
            state.site_audit_mut().set_root_url(url);
            Vec::new()
        }
        Msg::BatchTextChanged(text) => {
            state.site_audit_mut().set_batch_text(text);
            Vec::new()
        }
        Msg::SubmitCompleted { result, timestamp } => {
            complete_submission(&mut state, result, timestamp)
        }
        Msg::HistoryRestored(entries) => {
            state.restore_history(entries);
            Vec::new()
        }
        Msg::ClearHistoryRequested => {
            state.request_clear();
            vec![Effect::ConfirmClearHistory]
        }
        Msg::ClearHistoryConfirmed => {
            if state.confirm_clear() {
                let mut effects = vec![Effect::ClearPersistedHistory];
                effects.push(notify(&mut state, Severity::Success, HISTORY_CLEARED_NOTICE));
                effects
            } else {
                Vec::new()
            }
        }
        Msg::ClearHistoryDeclined => {
            state.decline_clear();
            Vec::new()
        }
        Msg::RateLimitPolled(rate_limit) => {
            state.set_rate_limit(rate_limit);
            Vec::new()
        }
        Msg::QuotaDialogClosed => {
            state.close_quota_dialog();
            Vec::new()
        }
        Msg::NoticeExpired(id) => {
            state.expire_notice(id);
            Vec::new()
        }
        Msg::RedirectDue { task_id } => match state.take_redirect(&task_id) {
            Some(path) => vec![Effect::Navigate { path }],
            None => Vec::new(),
        },
        Msg::RateLimitPollFailed => Vec::new(),
    };

    (state, effects)
}

fn submit_form(state: &mut AppState, endpoint: Endpoint, fields: &[(String, String)]) -> Vec<Effect> {
    // The submit control stays disabled until the in-flight request settles.
    if state.is_submitting() {
        return Vec::new();
    }

    let mut request = serialize_form(fields);
    if endpoint.uses_site_audit_policy() {
        request = match apply_site_audit_policy(request) {
            Ok(request) => request,
            Err(err) => return vec![notify(state, Severity::Warning, err.to_string())],
        };
    }

    state.begin_submission(endpoint.clone(), request.url());
    vec![Effect::SubmitTask { endpoint, request }]
}

fn complete_submission(state: &mut AppState, result: SubmitResult, timestamp: String) -> Vec<Effect> {
    let Some(in_flight) = state.finish_submission() else {
        return Vec::new();
    };

    match result {
        SubmitResult::Created { task_id, status } => {
            state.record_history(HistoryEntry {
                task_id: task_id.clone(),
                tool: in_flight.endpoint.as_str().to_string(),
                url: in_flight.url,
                status,
                timestamp,
            });
            let mut effects = vec![Effect::PersistHistory(state.history().to_vec())];
            effects.push(notify(state, Severity::Success, TASK_CREATED_NOTICE));
            state.set_pending_redirect(task_id.clone());
            effects.push(Effect::ScheduleRedirect {
                task_id,
                after: state.timings().redirect_delay,
            });
            effects
        }
        SubmitResult::QuotaExceeded(quota) => {
            state.show_quota_dialog(quota);
            Vec::new()
        }
        SubmitResult::Failed { .. } => {
            vec![notify(state, Severity::Error, TASK_FAILED_NOTICE)]
        }
    }
}

fn notify(state: &mut AppState, severity: Severity, message: impl Into<String>) -> Effect {
    let id = state.push_notice(severity, message);
    Effect::ScheduleNoticeDismissal {
        id,
        after: state.timings().notice_ttl,
    }
}
