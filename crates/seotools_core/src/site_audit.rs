use thiserror::Error;

use crate::{FieldValue, RequestValue, TaskRequest};

/// Maximum number of URLs a batch scan may carry.
pub const BATCH_URL_LIMIT: usize = 500;
/// Crawl page cap for quick reports.
pub const QUICK_CRAWL_PAGE_CAP: i64 = 5;
/// Crawl page cap for full reports.
pub const FULL_CRAWL_PAGE_CAP: i64 = 30;

/// UI-only inputs that never reach the backend.
const SCAN_MODE_FIELD: &str = "scan_mode";
const BATCH_TEXT_FIELD: &str = "batch_urls_text";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanMode {
    #[default]
    Crawl,
    Batch,
}

impl ScanMode {
    /// Anything other than `batch` scans in crawl mode.
    pub fn parse(raw: &str) -> Self {
        if raw == "batch" {
            ScanMode::Batch
        } else {
            ScanMode::Crawl
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ScanMode::Crawl => "crawl",
            ScanMode::Batch => "batch",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReportMode {
    #[default]
    Quick,
    Full,
}

impl ReportMode {
    pub fn parse(raw: &str) -> Self {
        if raw == "full" {
            ReportMode::Full
        } else {
            ReportMode::Quick
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ReportMode::Quick => "quick",
            ReportMode::Full => "full",
        }
    }

    /// Client-side page cap for crawl mode at this report depth.
    pub fn crawl_page_cap(self) -> i64 {
        match self {
            ReportMode::Quick => QUICK_CRAWL_PAGE_CAP,
            ReportMode::Full => FULL_CRAWL_PAGE_CAP,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Batch scan limit: maximum {limit} URLs (got {count})")]
    BatchLimitExceeded { count: usize, limit: usize },
    #[error("Add at least one URL for batch scan")]
    EmptyBatch,
}

/// Splits the batch textbox into trimmed, non-empty lines in input order.
pub fn parse_batch_urls(raw: &str) -> Vec<String> {
    raw.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(ToOwned::to_owned)
        .collect()
}

/// Reconciles scan mode, batch list and report depth into the request that is
/// sent for a site audit.
pub fn apply_site_audit_policy(mut request: TaskRequest) -> Result<TaskRequest, ValidationError> {
    let scan_mode = request
        .remove(SCAN_MODE_FIELD)
        .map(|value| ScanMode::parse(&value.to_text()))
        .unwrap_or_default();
    let raw_batch = request
        .remove(BATCH_TEXT_FIELD)
        .map(|value| value.to_text())
        .unwrap_or_default();
    let parsed = parse_batch_urls(&raw_batch);

    match scan_mode {
        ScanMode::Batch => apply_batch(request, parsed),
        ScanMode::Crawl => Ok(apply_crawl(request)),
    }
}

fn apply_batch(
    mut request: TaskRequest,
    mut urls: Vec<String>,
) -> Result<TaskRequest, ValidationError> {
    if urls.len() > BATCH_URL_LIMIT {
        return Err(ValidationError::BatchLimitExceeded {
            count: urls.len(),
            limit: BATCH_URL_LIMIT,
        });
    }
    if urls.is_empty() {
        return Err(ValidationError::EmptyBatch);
    }
    urls.truncate(BATCH_URL_LIMIT);

    let max_pages = urls.len().clamp(1, BATCH_URL_LIMIT) as i64;
    let first_url = urls[0].clone();

    request.insert("batch_mode", FieldValue::Bool(true));
    request.insert(
        "batch_urls",
        RequestValue::List(urls.into_iter().map(FieldValue::Text).collect()),
    );
    request.insert("max_pages", FieldValue::Int(max_pages));
    request.insert("mode", FieldValue::from(ReportMode::Full.as_str()));

    let url_blank = request
        .get("url")
        .map_or(true, |value| value.to_text().trim().is_empty());
    if url_blank {
        request.insert("url", FieldValue::Text(first_url));
    }
    Ok(request)
}

fn apply_crawl(mut request: TaskRequest) -> TaskRequest {
    request.remove("batch_urls");
    request.insert("batch_mode", FieldValue::Bool(false));

    let report_mode = request
        .scalar("mode")
        .map(|value| ReportMode::parse(&value.to_string()))
        .unwrap_or_default();
    let cap = report_mode.crawl_page_cap();
    if let Some(pages) = request.scalar("max_pages").and_then(FieldValue::as_int) {
        if pages > cap {
            request.insert("max_pages", FieldValue::Int(cap));
        }
    }
    request
}

#[cfg(test)]
mod tests {
    use super::{parse_batch_urls, ReportMode, ScanMode};

    #[test]
    fn batch_text_drops_blank_lines_and_trims() {
        let raw = "  https://a.example \r\n\r\n\t\nhttps://b.example\nhttps://a.example\n";
        assert_eq!(
            parse_batch_urls(raw),
            vec![
                "https://a.example".to_string(),
                "https://b.example".to_string(),
                "https://a.example".to_string(),
            ]
        );
    }

    #[test]
    fn unknown_modes_fall_back_to_defaults() {
        assert_eq!(ScanMode::parse("sitemap"), ScanMode::Crawl);
        assert_eq!(ScanMode::parse("batch"), ScanMode::Batch);
        assert_eq!(ReportMode::parse(""), ReportMode::Quick);
        assert_eq!(ReportMode::parse("full").crawl_page_cap(), 30);
    }
}
