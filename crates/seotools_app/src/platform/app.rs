use std::collections::VecDeque;
use std::fs;
use std::sync::mpsc::RecvTimeoutError;
use std::time::Duration;

use anyhow::{bail, Context};
use chrono::Utc;
use dialoguer::{theme::ColorfulTheme, Confirm as ConfirmPrompt};
use seotools_core::{update, AppState, Msg};
use seotools_engine::{Confirm, EngineEvent, EngineHandle};
use seotools_logging::{client_info, client_warn};

use super::effects::{map_event, EffectRunner};
use super::logging::{self, LogDestination};
use super::persistence::open_history_store;
use super::render::{history_lines, render, RenderMemo, EMPTY_HISTORY};
use crate::cli::{Cli, Command, HistoryAction, SubmitArgs};
use crate::commands::{plan_submission, SubmitPlan};
use crate::config::{self, ClientConfig, ConfigOverrides, BASE_URL_ENV};

const EVENT_POLL: Duration = Duration::from_millis(100);

pub fn run_app(cli: Cli) -> anyhow::Result<()> {
    logging::initialize(
        LogDestination::from_flags(cli.log_file, cli.quiet),
        logging::level_for(cli.verbose),
    );

    let overrides = ConfigOverrides {
        base_url: cli.base_url.clone(),
        storage_dir: cli.storage_dir.clone(),
        poll_interval_secs: match &cli.command {
            Command::RateLimit { interval, .. } => *interval,
            _ => None,
        },
    };
    let config = config::load(
        cli.config_path.as_deref(),
        std::env::var(BASE_URL_ENV).ok(),
        &overrides,
    )
    .context("loading configuration")?;
    client_info!("Backend at {}", config.base_url);

    match cli.command {
        Command::Submit(args) => {
            let plan = load_plan(&args)?;
            App::open(&config, confirmer(false))?.submit(plan)
        }
        Command::History { action: None } => {
            App::open(&config, confirmer(false))?.print_history();
            Ok(())
        }
        Command::History {
            action: Some(HistoryAction::Clear { yes }),
        } => App::open(&config, confirmer(yes))?.clear_history(),
        Command::RateLimit { watch, .. } => {
            App::open(&config, confirmer(false))?.rate_limit(watch, &config)
        }
    }
}

fn load_plan(args: &SubmitArgs) -> anyhow::Result<SubmitPlan> {
    let batch_text = match &args.batch_urls_file {
        Some(path) => Some(
            fs::read_to_string(path)
                .with_context(|| format!("reading batch URLs from {:?}", path))?,
        ),
        None => None,
    };
    Ok(plan_submission(args, batch_text)?)
}

fn confirmer(assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes {
        return Box::new(|_: &str| true);
    }
    Box::new(prompt_confirm)
}

fn prompt_confirm(prompt: &str) -> bool {
    match ConfirmPrompt::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt)
        .default(false)
        .interact()
    {
        Ok(answer) => answer,
        Err(err) => {
            client_warn!("Confirmation prompt failed, keeping history: {}", err);
            false
        }
    }
}

/// Drives the state machine from the terminal: dispatch, run effects,
/// print what changed.
struct App {
    state: AppState,
    runner: EffectRunner,
    memo: RenderMemo,
    base_url: String,
}

impl App {
    fn open(config: &ClientConfig, confirm: Box<dyn Confirm>) -> anyhow::Result<Self> {
        let history = open_history_store(&config.storage_dir);
        let engine =
            EngineHandle::new(config.api_settings()).context("starting the API client")?;
        let mut app = Self {
            state: AppState::with_timings(config.timings()),
            runner: EffectRunner::new(engine, history, confirm),
            memo: RenderMemo::default(),
            base_url: config.base_url.clone(),
        };
        let entries = app.runner.history().get_all();
        app.dispatch(Msg::HistoryRestored(entries));
        Ok(app)
    }

    fn dispatch(&mut self, msg: Msg) {
        let mut inbox = VecDeque::from([msg]);
        while let Some(msg) = inbox.pop_front() {
            let state = std::mem::take(&mut self.state);
            let (state, effects) = update(state, msg);
            self.state = state;
            inbox.extend(self.runner.run(effects));
        }

        let view = self.state.view();
        if self.state.consume_dirty() {
            for line in render(&view, &mut self.memo, &self.base_url) {
                println!("{line}");
            }
        }
    }

    /// Next engine event, `None` when nothing arrived within `timeout`.
    fn next_event(&self, timeout: Duration) -> anyhow::Result<Option<EngineEvent>> {
        match self.runner.engine().recv_timeout(timeout) {
            Ok(event) => Ok(Some(event)),
            Err(RecvTimeoutError::Timeout) => Ok(None),
            Err(RecvTimeoutError::Disconnected) => bail!("the engine stopped unexpectedly"),
        }
    }

    fn submit(&mut self, plan: SubmitPlan) -> anyhow::Result<()> {
        for msg in plan.setup.iter().cloned() {
            self.dispatch(msg);
        }
        let msg = plan.submit_message(self.state.site_audit());
        self.dispatch(msg);
        if !self.state.is_submitting() {
            bail!("nothing was submitted");
        }

        // No client-side deadline; only the transport bounds a request.
        while self.state.is_submitting() || self.runner.redirect_pending() {
            if let Some(event) = self.next_event(EVENT_POLL)? {
                self.dispatch(map_event(event));
            }
        }

        let view = self.state.view();
        if view.location.is_some() {
            return Ok(());
        }
        if let Some(dialog) = view.quota_dialog {
            self.dispatch(Msg::QuotaDialogClosed);
            bail!(
                "request limit of {} reached, try again in {} min",
                dialog.limit,
                dialog.reset_minutes
            );
        }
        bail!("task was not created")
    }

    fn print_history(&self) {
        for line in history_lines(&self.state.view().history, Utc::now()) {
            println!("{line}");
        }
    }

    fn clear_history(&mut self) -> anyhow::Result<()> {
        if self.state.history().is_empty() {
            println!("{EMPTY_HISTORY}");
            return Ok(());
        }
        self.dispatch(Msg::ClearHistoryRequested);
        if !self.state.history().is_empty() {
            println!("History kept");
        }
        Ok(())
    }

    fn rate_limit(&mut self, watch: bool, config: &ClientConfig) -> anyhow::Result<()> {
        if watch {
            self.runner
                .engine()
                .start_rate_limit_monitor(config.poll_interval);
            loop {
                if let Some(event) = self.next_event(EVENT_POLL)? {
                    self.dispatch(map_event(event));
                }
            }
        }

        self.runner.engine().poll_rate_limit();
        loop {
            match self.next_event(EVENT_POLL)? {
                Some(EngineEvent::RateLimitPollFailed(err)) => {
                    self.dispatch(Msg::RateLimitPollFailed);
                    bail!("could not read the rate limit: {err}");
                }
                Some(event @ EngineEvent::RateLimitUpdated(_)) => {
                    self.dispatch(map_event(event));
                    return Ok(());
                }
                Some(event) => self.dispatch(map_event(event)),
                None => {}
            }
        }
    }
}
