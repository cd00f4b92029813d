//! Terminal UI: spinner, captured command execution, styled diagnostics.
//!
//! - **stdout is for data.** Listed snapshot names and dry-run/verbose command lines go to stdout,
//!   unstyled, so they can be piped.
//! - **stderr is for people.** The spinner, error banners and the `--verbose` summary go to stderr.
//!   indicatif hides the spinner when stderr is not a terminal.

use std::{
    process::{Command, Output, Stdio},
    time::Duration,
};

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::debug;

use crate::{
    engine::{CommandRecord, Request},
    error::EngineError,
    runner,
};

// ─── Icons ───────────────────────────────────────────────────────────────────

static SPINNER_CHARS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

fn icon_ok() -> console::StyledObject<&'static str> {
    style("✓").green().bold()
}
fn icon_err() -> console::StyledObject<&'static str> {
    style("✗").red().bold()
}
fn icon_dry() -> console::StyledObject<&'static str> {
    style("○").yellow().bold()
}

// ─── Spinner ──────────────────────────────────────────────────────────────────

fn make_spinner(label: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    if let Ok(tpl) = ProgressStyle::with_template("  {spinner:.cyan}  {msg}") {
        pb.set_style(tpl.tick_chars(SPINNER_CHARS));
    }
    pb.set_message(format!("{}", style(label).dim()));
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

// ─── Captured execution ───────────────────────────────────────────────────────

/// Output of a finished child process.
#[derive(Debug)]
pub struct Captured {
    pub stdout: String,
    pub stderr: String,
}

/// Run `args` behind a spinner, capturing stdout and stderr.
///
/// A non-zero exit is an [`EngineError::Failed`] carrying the child's stderr
/// verbatim.
pub fn run_captured(args: &[String]) -> Result<Captured, EngineError> {
    let command = runner::render(args);
    let Some((prog, rest)) = args.split_first() else {
        return Err(EngineError::Rejected("cannot run an empty command".into()));
    };

    debug!(%command, "running engine command");
    let spinner = make_spinner(&command);
    let output: Result<Output, _> = Command::new(prog)
        .args(rest)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output();
    spinner.finish_and_clear();

    let output = output.map_err(|source| EngineError::Spawn {
        command: command.clone(),
        source,
    })?;
    let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

    if !output.status.success() {
        return Err(EngineError::Failed {
            command,
            status: output.status.to_string(),
            stderr: stderr.trim_end().to_string(),
        });
    }
    Ok(Captured { stdout, stderr })
}

// ─── Diagnostics ──────────────────────────────────────────────────────────────

/// Print `err` (and its source chain) to stderr with a red banner.
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {err}", style("error:").red().bold());
    for cause in err.chain().skip(1) {
        eprintln!("  {} {cause}", style("caused by:").dim());
    }
}

// ─── Summary ──────────────────────────────────────────────────────────────────

/// Tally of the mutating requests in a run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
    pub created: usize,
    pub destroyed: usize,
    pub skipped: usize,
}

impl Summary {
    pub fn from_records(records: &[CommandRecord]) -> Self {
        let mut s = Self::default();
        for r in records.iter().filter(|r| r.request.is_mutation()) {
            match (&r.request, r.executed) {
                (_, false) => s.skipped += 1,
                (Request::Create { .. }, true) => s.created += 1,
                (Request::Destroy { .. }, true) => s.destroyed += 1,
                (Request::List { .. }, true) => {},
            }
        }
        s
    }
}

/// Print the `--verbose` run summary to stderr.
pub fn print_summary(summary: &Summary, failed: bool) {
    eprintln!();
    if summary.created > 0 {
        eprintln!("  {}  {} snapshot(s) created", icon_ok(), summary.created);
    }
    if summary.destroyed > 0 {
        eprintln!("  {}  {} snapshot(s) destroyed", icon_ok(), summary.destroyed);
    }
    if summary.skipped > 0 {
        eprintln!(
            "  {}  {} request(s) not executed (dry run)",
            icon_dry(),
            summary.skipped
        );
    }
    if failed {
        eprintln!("  {}  {}", icon_err(), style("Stopped on first error.").red().bold());
    } else {
        eprintln!("  {}  {}", icon_ok(), style("Done.").cyan().bold());
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
