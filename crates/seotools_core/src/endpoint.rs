use std::fmt;
use std::str::FromStr;

/// Backend tool selected by the task-submission path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Endpoint {
    SiteAnalyze,
    SiteAuditPro,
    RobotsCheck,
    SitemapValidate,
    RenderAudit,
    MobileCheck,
    BotCheck,
    Other(String),
}

impl Endpoint {
    pub fn as_str(&self) -> &str {
        match self {
            Endpoint::SiteAnalyze => "site-analyze",
            Endpoint::SiteAuditPro => "site-audit-pro",
            Endpoint::RobotsCheck => "robots-check",
            Endpoint::SitemapValidate => "sitemap-validate",
            Endpoint::RenderAudit => "render-audit",
            Endpoint::MobileCheck => "mobile-check",
            Endpoint::BotCheck => "bot-check",
            Endpoint::Other(raw) => raw,
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Endpoint::SiteAnalyze => "Site analysis",
            Endpoint::SiteAuditPro => "Site audit pro",
            Endpoint::RobotsCheck => "Robots.txt",
            Endpoint::SitemapValidate => "Sitemap.xml",
            Endpoint::RenderAudit => "Render audit",
            Endpoint::MobileCheck => "Mobile check",
            Endpoint::BotCheck => "Bot check",
            Endpoint::Other(raw) => raw,
        }
    }

    /// Whether submissions go through the crawl/batch policy.
    pub fn uses_site_audit_policy(&self) -> bool {
        matches!(self, Endpoint::SiteAuditPro)
    }
}

impl From<&str> for Endpoint {
    fn from(raw: &str) -> Self {
        match raw {
            "site-analyze" => Endpoint::SiteAnalyze,
            "site-audit-pro" => Endpoint::SiteAuditPro,
            "robots-check" => Endpoint::RobotsCheck,
            "sitemap-validate" => Endpoint::SitemapValidate,
            "render-audit" => Endpoint::RenderAudit,
            "mobile-check" => Endpoint::MobileCheck,
            "bot-check" => Endpoint::BotCheck,
            other => Endpoint::Other(other.to_string()),
        }
    }
}

impl FromStr for Endpoint {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Endpoint::from(s))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Display label for a tool identifier as stored in history.
pub fn tool_label(tool: &str) -> String {
    Endpoint::from(tool).label().to_string()
}
