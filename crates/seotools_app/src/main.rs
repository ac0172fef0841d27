mod cli;
mod commands;
mod config;
mod platform;

use clap::Parser;

fn main() -> anyhow::Result<()> {
    platform::run_app(cli::Cli::parse())
}
