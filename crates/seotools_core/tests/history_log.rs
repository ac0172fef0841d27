use seotools_core::{HistoryEntry, HistoryLog, TaskStatus, HISTORY_CAPACITY};

fn entry(n: usize) -> HistoryEntry {
    HistoryEntry {
        task_id: format!("task-{n}"),
        tool: "site-analyze".to_string(),
        url: format!("https://example.com/{n}"),
        status: TaskStatus::Pending,
        timestamp: format!("2024-01-01T00:00:{n:02}Z"),
    }
}

#[test]
fn eleven_adds_keep_the_ten_newest() {
    let mut log = HistoryLog::new();
    for n in 1..=11 {
        log.push(entry(n));
    }

    assert_eq!(log.len(), HISTORY_CAPACITY);
    let ids: Vec<&str> = log.entries().map(|e| e.task_id.as_str()).collect();
    assert_eq!(ids.first(), Some(&"task-11"));
    assert_eq!(ids.last(), Some(&"task-2"));
    assert!(!ids.contains(&"task-1"));
}

#[test]
fn push_reports_the_evicted_entry() {
    let mut log = HistoryLog::new();
    for n in 1..=10 {
        assert_eq!(log.push(entry(n)), None);
    }
    assert_eq!(log.push(entry(11)), Some(entry(1)));
}

#[test]
fn restoring_an_oversized_log_truncates_the_tail() {
    let entries: Vec<_> = (1..=15).map(entry).collect();
    let log = HistoryLog::from_entries(entries);

    assert_eq!(log.len(), 10);
    assert_eq!(log.entries().next(), Some(&entry(1)));
    assert_eq!(log.entries().last(), Some(&entry(10)));
}

#[test]
fn clear_discards_everything() {
    let mut log = HistoryLog::from_entries(vec![entry(1), entry(2)]);
    log.clear();
    assert!(log.is_empty());
    assert!(log.to_vec().is_empty());
}
