//! `zfs-snap`: tagged ZFS snapshots with keep-N retention.
//!
//! # Overview
//!
//! A thin orchestration layer around `zfs(8)`.  It creates snapshots named
//! `<dataset>@<tag>-<timestamp>`, prunes each tag down to its newest N, and
//! lists what exists.  All snapshot state lives in ZFS; this tool only
//! issues `zfs snapshot`, `zfs destroy` and `zfs list`.
//!
//! # Usage
//!
//! ```text
//! zfs-snap -c -t hourly pool/data          # snapshot pool/data
//! zfs-snap -c -p -t daily -k 7 -r pool     # snapshot, then keep 7 newest "daily"
//! zfs-snap -l -t daily                     # list every "daily" snapshot
//! zfs-snap -n -p -t daily -k 0 pool/data   # print what would be destroyed
//! ```
//!
//! # Module layout
//!
//! | Module                   | Responsibility                              |
//! |--------------------------|---------------------------------------------|
//! | [`cli`]                  | Argument types parsed by clap               |
//! | [`options`]              | Validation into immutable `Options`         |
//! | [`config`]               | `Config` struct + layered TOML loader       |
//! | [`snapshot`]             | Tags, snapshot names, timestamps            |
//! | [`engine`]               | `SnapshotEngine` trait + `zfs` engine       |
//! | [`runner`]               | `zfs` argument construction                 |
//! | [`ui`]                   | Spinner, captured execution, diagnostics    |
//! | [`commands`]             | create / prune / list phases                |
//!
//! # Exit codes
//!
//! `0` success (or `--help`), `1` usage, config or engine error, `2` unknown
//! flag (reported by clap).

mod cli;
mod commands;
mod config;
mod engine;
mod error;
mod options;
mod runner;
mod snapshot;
mod ui;

use std::{io, path::Path, process::ExitCode};

use anyhow::Result;
use clap::{CommandFactory, Parser};
use cli::Cli;
use commands::Session;
use config::{Config, PartialConfig, parse_partial};
use console::style;
use engine::zfs::ZfsEngine;
use error::Error;
use options::Options;
use snapshot::SystemClock;
use tracing_subscriber::EnvFilter;

fn main() -> ExitCode {
    // stdout carries data, so diagnostics go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        // clap exits 0 for --help/--version and 2 for unknown flags
        Err(e) => e.exit(),
    };

    let mut cfg = match load_merged_config(cli.config.as_deref()) {
        Ok(cfg) => cfg,
        Err(e) => {
            ui::print_error(&e);
            return ExitCode::FAILURE;
        },
    };
    if cli.sudo {
        cfg.engine.sudo = true;
    }

    if cli.print_config {
        println!("{cfg:#?}");
        return ExitCode::SUCCESS;
    }

    let opts = match Options::from_cli(&cli, &cfg) {
        Ok(opts) => opts,
        Err(e) => {
            eprintln!("{} {e}", style("error:").red().bold());
            eprintln!();
            eprintln!("{}", Cli::command().render_usage());
            eprintln!("For more information, try '--help'.");
            return ExitCode::FAILURE;
        },
    };

    match run(&opts, &cfg) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            ui::print_error(&anyhow::Error::from(e));
            ExitCode::FAILURE
        },
    }
}

/// Run every requested phase against the real `zfs`.
fn run(opts: &Options, cfg: &Config) -> Result<(), Error> {
    let mut engine = ZfsEngine::new(cfg.engine.clone());
    let clock = SystemClock;
    let stdout = io::stdout();
    let mut out = stdout.lock();

    let mut session = Session::new(opts, &mut engine, &clock, &mut out);
    let result = commands::dispatch(&mut session);

    if opts.verbose {
        ui::print_summary(&ui::Summary::from_records(&session.records), result.is_err());
    }
    result
}

/// Load configuration from two sources and merge them.
///
/// 1. `~/.config/zfs-snap/config.toml`: global defaults
/// 2. `--config <PATH>`: per-invocation overrides; must exist when given
///
/// Local values win on a per-field basis.  A broken global file is reported
/// and skipped rather than blocking every run.
fn load_merged_config(local_path: Option<&Path>) -> Result<Config> {
    let global_path = dirs_next::config_dir().map(|d| d.join("zfs-snap").join("config.toml"));

    let global: PartialConfig = match global_path.as_deref().map(parse_partial) {
        Some(Ok(Some(p))) => p,
        Some(Err(e)) => {
            tracing::warn!("ignoring global config: {e:#}");
            PartialConfig::default()
        },
        Some(Ok(None)) | None => PartialConfig::default(),
    };

    let local: PartialConfig = match local_path {
        Some(path) => parse_partial(path)?
            .ok_or_else(|| anyhow::anyhow!("config file '{}' not found", path.display()))?,
        None => PartialConfig::default(),
    };

    Ok(global.merge(local).resolve())
}
