use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "seotools",
    version,
    about = "Submit SEO analysis tasks and review recent submissions"
)]
pub struct Cli {
    /// RON config file; defaults to ./seotools.ron when present.
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config_path: Option<PathBuf>,
    /// Backend API base URL, e.g. http://localhost:8000/api
    #[arg(long, value_name = "URL", global = true)]
    pub base_url: Option<String>,
    /// Directory holding the local history.
    #[arg(long, value_name = "DIR", global = true)]
    pub storage_dir: Option<PathBuf>,
    /// Debug-level logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
    /// Also write logs to ./seotools.log
    #[arg(long, global = true)]
    pub log_file: bool,
    /// With --log-file, keep logs off the terminal.
    #[arg(long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a task on one of the analysis tools.
    Submit(SubmitArgs),
    /// List recent submissions, newest first.
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },
    /// Show the remaining request budget.
    RateLimit {
        /// Keep polling until interrupted.
        #[arg(long)]
        watch: bool,
        /// Seconds between polls in watch mode.
        #[arg(long, value_name = "SECS")]
        interval: Option<u64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// Discard the local history.
    Clear {
        /// Skip the confirmation prompt.
        #[arg(long)]
        yes: bool,
    },
}

#[derive(Args, Debug, Default)]
pub struct SubmitArgs {
    /// Tool endpoint, e.g. robots-check or site-audit-pro.
    pub endpoint: String,
    /// Form field; repeat a name to send a list.
    #[arg(short = 'f', long = "field", value_name = "NAME=VALUE", value_parser = parse_field)]
    pub fields: Vec<(String, String)>,
    /// One URL per line, for a site-audit batch scan.
    #[arg(long, value_name = "PATH")]
    pub batch_urls_file: Option<PathBuf>,
    /// Site-audit scan mode.
    #[arg(long, value_parser = ["crawl", "batch"])]
    pub scan_mode: Option<String>,
    /// Site-audit report depth.
    #[arg(long, value_parser = ["quick", "full"])]
    pub report_mode: Option<String>,
    /// Site-audit page cap.
    #[arg(long, value_name = "N")]
    pub max_pages: Option<i64>,
}

/// Parses `name=value`; the value may be empty or contain `=`.
pub fn parse_field(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((name, value)) if !name.trim().is_empty() => {
            Ok((name.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected NAME=VALUE, got {raw:?}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_splits_on_first_equals() {
        assert_eq!(
            parse_field("url=https://a.example/?q=1").unwrap(),
            ("url".to_string(), "https://a.example/?q=1".to_string())
        );
        assert_eq!(parse_field("note=").unwrap(), ("note".to_string(), String::new()));
        assert!(parse_field("novalue").is_err());
        assert!(parse_field("=x").is_err());
    }

    #[test]
    fn submit_collects_repeated_fields() {
        let cli = Cli::try_parse_from([
            "seotools",
            "submit",
            "bot-check",
            "-f",
            "url=https://example.com",
            "-f",
            "selected_bots=Googlebot",
            "-f",
            "selected_bots=Bingbot",
        ])
        .unwrap();
        let Command::Submit(args) = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(args.endpoint, "bot-check");
        assert_eq!(args.fields.len(), 3);
    }

    #[test]
    fn history_clear_accepts_yes() {
        let cli = Cli::try_parse_from(["seotools", "history", "clear", "--yes"]).unwrap();
        assert!(matches!(
            cli.command,
            Command::History {
                action: Some(HistoryAction::Clear { yes: true })
            }
        ));
    }

    #[test]
    fn cli_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
