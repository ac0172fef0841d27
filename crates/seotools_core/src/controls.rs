use crate::site_audit::{ReportMode, ScanMode, BATCH_URL_LIMIT};

/// Form control state of the site-audit tool.
///
/// Holds what the page keeps in its inputs: scan mode selector, report depth,
/// the page cap input, the root URL input and the batch textbox. Every change
/// goes through a method that re-syncs the dependent controls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteAuditControls {
    scan_mode: ScanMode,
    report_mode: ReportMode,
    max_pages: i64,
    max_pages_limit: i64,
    root_url: String,
    batch_text: String,
    root_url_enabled: bool,
    report_mode_enabled: bool,
}

impl Default for SiteAuditControls {
    fn default() -> Self {
        let mut controls = Self {
            scan_mode: ScanMode::Crawl,
            report_mode: ReportMode::Quick,
            max_pages: 5,
            max_pages_limit: ReportMode::Quick.crawl_page_cap(),
            root_url: String::new(),
            batch_text: String::new(),
            root_url_enabled: true,
            report_mode_enabled: true,
        };
        controls.sync();
        controls
    }
}

impl SiteAuditControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_scan_mode(&mut self, mode: ScanMode) {
        self.scan_mode = mode;
        self.sync();
    }

    /// Ignored while batch mode keeps the report depth locked to full.
    pub fn set_report_mode(&mut self, mode: ReportMode) {
        if !self.report_mode_enabled {
            return;
        }
        self.report_mode = mode;
        self.apply_crawl_limit();
    }

    pub fn set_max_pages(&mut self, pages: i64) {
        self.max_pages = pages.clamp(1, self.max_pages_limit);
    }

    /// Ignored while the root URL input is disabled.
    pub fn set_root_url(&mut self, url: impl Into<String>) {
        if self.root_url_enabled {
            self.root_url = url.into();
        }
    }

    pub fn set_batch_text(&mut self, text: impl Into<String>) {
        self.batch_text = text.into();
    }

    pub fn scan_mode(&self) -> ScanMode {
        self.scan_mode
    }

    pub fn report_mode(&self) -> ReportMode {
        self.report_mode
    }

    pub fn max_pages(&self) -> i64 {
        self.max_pages
    }

    pub fn max_pages_limit(&self) -> i64 {
        self.max_pages_limit
    }

    pub fn root_url_enabled(&self) -> bool {
        self.root_url_enabled
    }

    pub fn root_url_required(&self) -> bool {
        self.root_url_enabled
    }

    pub fn report_mode_enabled(&self) -> bool {
        self.report_mode_enabled
    }

    pub fn batch_box_visible(&self) -> bool {
        self.scan_mode == ScanMode::Batch
    }

    pub fn max_pages_hint(&self) -> &'static str {
        match (self.scan_mode, self.report_mode) {
            (ScanMode::Batch, _) => "Max URLs in batch mode",
            (ScanMode::Crawl, ReportMode::Full) => "Max pages in crawl mode (full)",
            (ScanMode::Crawl, ReportMode::Quick) => "Max pages in crawl mode (quick)",
        }
    }

    /// Field pairs in document order, as a form submission would produce them.
    /// Disabled inputs are not submitted.
    pub fn form_fields(&self) -> Vec<(String, String)> {
        let mut fields = Vec::with_capacity(6);
        if self.root_url_enabled {
            fields.push(("url".to_string(), self.root_url.clone()));
        }
        fields.push(("scan_mode".to_string(), self.scan_mode.as_str().to_string()));
        fields.push((
            "batch_mode".to_string(),
            (self.scan_mode == ScanMode::Batch).to_string(),
        ));
        fields.push(("batch_urls_text".to_string(), self.batch_text.clone()));
        fields.push(("max_pages".to_string(), self.max_pages.to_string()));
        if self.report_mode_enabled {
            fields.push(("mode".to_string(), self.report_mode.as_str().to_string()));
        }
        fields
    }

    fn sync(&mut self) {
        match self.scan_mode {
            ScanMode::Batch => {
                let limit = BATCH_URL_LIMIT as i64;
                self.max_pages = limit;
                self.max_pages_limit = limit;
                self.root_url_enabled = false;
                self.report_mode = ReportMode::Full;
                self.report_mode_enabled = false;
            }
            ScanMode::Crawl => {
                self.root_url_enabled = true;
                self.report_mode_enabled = true;
                self.apply_crawl_limit();
            }
        }
    }

    fn apply_crawl_limit(&mut self) {
        if self.scan_mode == ScanMode::Batch {
            return;
        }
        let cap = self.report_mode.crawl_page_cap();
        self.max_pages_limit = cap;
        if self.max_pages > cap {
            self.max_pages = cap;
        }
    }
}
