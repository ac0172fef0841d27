//! Turns `submit` arguments into state-machine messages.

use thiserror::Error;

use seotools_core::{Endpoint, Msg, ReportMode, ScanMode, SiteAuditControls};

use crate::cli::SubmitArgs;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    #[error("max_pages must be an integer, got {0:?}")]
    InvalidMaxPages(String),
    #[error("--batch-urls-file only applies to site-audit-pro, not {0}")]
    BatchFileNotSupported(String),
}

/// Messages to dispatch for one submission.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitPlan {
    pub endpoint: Endpoint,
    /// Site-audit control changes applied before submitting.
    pub setup: Vec<Msg>,
    /// Fields sent as given, in order.
    pub extra_fields: Vec<(String, String)>,
}

impl SubmitPlan {
    /// The submission itself, built once `setup` has been applied.
    pub fn submit_message(&self, controls: &SiteAuditControls) -> Msg {
        if !self.endpoint.uses_site_audit_policy() {
            return Msg::FormSubmitted {
                endpoint: self.endpoint.clone(),
                fields: self.extra_fields.clone(),
            };
        }
        if self.extra_fields.is_empty() {
            return Msg::SiteAuditSubmitted;
        }
        let mut fields = controls.form_fields();
        fields.extend(self.extra_fields.iter().cloned());
        Msg::FormSubmitted {
            endpoint: self.endpoint.clone(),
            fields,
        }
    }
}

pub fn plan_submission(args: &SubmitArgs, batch_text: Option<String>) -> Result<SubmitPlan, PlanError> {
    let endpoint = Endpoint::from(args.endpoint.as_str());
    if !endpoint.uses_site_audit_policy() {
        if batch_text.is_some() {
            return Err(PlanError::BatchFileNotSupported(endpoint.to_string()));
        }
        return Ok(SubmitPlan {
            endpoint,
            setup: Vec::new(),
            extra_fields: args.fields.clone(),
        });
    }

    let mut scan_mode = args.scan_mode.clone();
    let mut report_mode = args.report_mode.clone();
    let mut max_pages = args.max_pages;
    let mut root_url = None;
    let mut batch = batch_text;
    let mut extra_fields = Vec::new();

    for (name, value) in &args.fields {
        match name.as_str() {
            "url" => root_url = Some(value.clone()),
            "scan_mode" => scan_mode = scan_mode.or_else(|| Some(value.clone())),
            "mode" => report_mode = report_mode.or_else(|| Some(value.clone())),
            "max_pages" => {
                let pages = value
                    .trim()
                    .parse::<i64>()
                    .map_err(|_| PlanError::InvalidMaxPages(value.clone()))?;
                max_pages = max_pages.or(Some(pages));
            }
            "batch_urls_text" => batch = batch.or_else(|| Some(value.clone())),
            // Derived from the scan mode.
            "batch_mode" => {}
            _ => extra_fields.push((name.clone(), value.clone())),
        }
    }

    // A batch file without an explicit mode means a batch scan.
    let scan_mode = match scan_mode {
        Some(raw) => ScanMode::parse(&raw),
        None if batch.is_some() => ScanMode::Batch,
        None => ScanMode::Crawl,
    };

    let mut setup = vec![Msg::ScanModeChanged(scan_mode)];
    if let Some(raw) = report_mode {
        setup.push(Msg::ReportModeChanged(ReportMode::parse(&raw)));
    }
    if let Some(url) = root_url {
        setup.push(Msg::RootUrlChanged(url));
    }
    if let Some(text) = batch {
        setup.push(Msg::BatchTextChanged(text));
    }
    if let Some(pages) = max_pages {
        setup.push(Msg::MaxPagesChanged(pages));
    }

    Ok(SubmitPlan {
        endpoint,
        setup,
        extra_fields,
    })
}
