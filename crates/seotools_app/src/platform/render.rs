//! Terminal rendering of the view model.

use std::collections::HashSet;

use chrono::{DateTime, Local, Utc};
use seotools_core::{AppViewModel, HistoryRowView, NoticeId, Severity};

pub const EMPTY_HISTORY: &str = "History is empty";

/// What has already been printed, so re-renders only emit changes.
#[derive(Debug, Default)]
pub struct RenderMemo {
    shown_notices: HashSet<NoticeId>,
    submitting: Option<String>,
    badge: Option<String>,
    quota_shown: bool,
    location: Option<String>,
}

/// Lines to print for this view, given what is already on screen.
pub fn render(view: &AppViewModel, memo: &mut RenderMemo, base_url: &str) -> Vec<String> {
    let mut lines = Vec::new();

    if view.submitting != memo.submitting {
        if let Some(endpoint) = &view.submitting {
            lines.push(format!("Submitting {endpoint}..."));
        }
        memo.submitting = view.submitting.clone();
    }

    for notice in &view.notices {
        if memo.shown_notices.insert(notice.id) {
            lines.push(format!("{} {}", severity_tag(notice.severity), notice.message));
        }
    }

    match &view.quota_dialog {
        Some(dialog) if !memo.quota_shown => {
            lines.push(format!(
                "Request limit reached: {} requests per hour. Try again in {} min.",
                dialog.limit, dialog.reset_minutes
            ));
            memo.quota_shown = true;
        }
        Some(_) => {}
        None => memo.quota_shown = false,
    }

    if let Some(badge) = &view.rate_limit {
        if memo.badge.as_ref() != Some(&badge.text) {
            let suffix = if badge.low { " (low)" } else { "" };
            lines.push(format!("Requests left: {}{}", badge.text, suffix));
            memo.badge = Some(badge.text.clone());
        }
    }

    if view.location != memo.location {
        if let Some(path) = &view.location {
            lines.push(format!("Results: {}", results_url(base_url, path)));
        }
        memo.location = view.location.clone();
    }

    lines
}

/// One line per history entry, newest first.
pub fn history_lines(rows: &[HistoryRowView], now: DateTime<Utc>) -> Vec<String> {
    if rows.is_empty() {
        return vec![EMPTY_HISTORY.to_string()];
    }
    rows.iter()
        .map(|row| {
            format!(
                "{} {:<16} {:<40} {:<14} {}",
                row.status_mark,
                row.tool_label,
                row.url,
                relative_time(&row.timestamp, now),
                row.link
            )
        })
        .collect()
}

/// "just now", minutes, hours, days; older than a week prints the date.
/// Unparseable timestamps are shown verbatim.
pub fn relative_time(timestamp: &str, now: DateTime<Utc>) -> String {
    let Ok(then) = DateTime::parse_from_rfc3339(timestamp) else {
        return timestamp.to_string();
    };
    let then = then.with_timezone(&Utc);
    let secs = (now - then).num_seconds();
    let mins = secs / 60;
    let hours = mins / 60;
    let days = hours / 24;

    if secs < 60 {
        "just now".to_string()
    } else if mins < 60 {
        format!("{mins} min ago")
    } else if hours < 24 {
        format!("{hours} h ago")
    } else if days < 7 {
        format!("{days} d ago")
    } else {
        then.with_timezone(&Local).format("%Y-%m-%d").to_string()
    }
}

/// Joins a `/results/..` path onto the server root of the API base URL.
pub fn results_url(base_url: &str, path: &str) -> String {
    let root = base_url
        .trim_end_matches('/')
        .trim_end_matches("/api")
        .trim_end_matches('/');
    format!("{root}{path}")
}

fn severity_tag(severity: Severity) -> &'static str {
    match severity {
        Severity::Info => "[info]",
        Severity::Success => "[ok]",
        Severity::Warning => "[warn]",
        Severity::Error => "[error]",
    }
}
