use std::path::PathBuf;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};

use crate::commands;

#[derive(Parser, Debug)]
#[command(name = "bng", version, about = "Branch name generator for ticket forms")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the branch name derived by each generator on a page
    Render(PageArgs),
    /// Render, then copy the first generator's branch name to the clipboard
    Copy(PageArgs),
    /// Report whether every control of each generator is filled in
    Check(PageArgs),
    /// Fill in a generator's form interactively
    Fill(FillArgs),
    /// Print the built-in sample page
    Page,
}

#[derive(Args, Debug)]
pub(crate) struct PageArgs {
    /// Page document (YAML, JSON or TOML). Defaults to the built-in sample page
    pub(crate) page: Option<PathBuf>,
    /// Edit a control before rendering, as if typed by a user (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE", value_parser = parse_assignment)]
    pub(crate) set: Vec<(String, String)>,
    /// Date used for hotfix stamps (default: today, local time)
    #[arg(long, value_name = "YYYY-MM-DD", value_parser = parse_date)]
    pub(crate) date: Option<NaiveDate>,
    #[command(flatten)]
    pub(crate) opts: OptionArgs,
}

/// Caller options. They override the container's data attributes.
#[derive(Args, Debug, Default)]
pub(crate) struct OptionArgs {
    /// Options file (YAML, JSON or TOML) with validateOn/liveValidate/validateOnBlur
    #[arg(long = "options", value_name = "FILE")]
    pub(crate) options_file: Option<PathBuf>,
    /// Re-render on field change when `fieldChange`; any other value turns it off
    #[arg(long = "validate-on")]
    pub(crate) validate_on: Option<String>,
    /// Re-render on every input event
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub(crate) live_validate: Option<bool>,
    /// Re-render when a field loses focus
    #[arg(long, num_args = 0..=1, default_missing_value = "true")]
    pub(crate) validate_on_blur: Option<bool>,
}

#[derive(Args, Debug)]
pub(crate) struct FillArgs {
    #[command(flatten)]
    pub(crate) page: PageArgs,
    /// Copy the result without asking
    #[arg(long)]
    pub(crate) copy: bool,
}

fn parse_assignment(raw: &str) -> Result<(String, String), String> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected NAME=VALUE, got {raw:?}"))?;
    if name.is_empty() {
        return Err(format!("missing control name in {raw:?}"));
    }
    Ok((name.to_string(), value.to_string()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").map_err(|e| format!("invalid date {raw:?}: {e}"))
}

pub(crate) fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Render(args) => commands::branch::cmd_render(args),
        Commands::Copy(args) => commands::branch::cmd_copy(args),
        Commands::Check(args) => commands::branch::cmd_check(args),
        Commands::Fill(args) => commands::branch::cmd_fill(args),
        Commands::Page => commands::branch::cmd_page(),
    }
}
