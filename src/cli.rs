//! Command-line interface definition.
//!
//! All argument parsing lives here so the rest of the codebase can stay
//! agnostic to `clap`.  `Cli` is parsed once in `main`, validated into an
//! immutable [`crate::options::Options`], and never consulted again.

use std::path::PathBuf;

use clap::Parser;

/// Create, prune and list tagged ZFS snapshots.
#[derive(Parser, Debug)]
#[command(
    name    = "zfs-snap",
    about   = "Create, prune and list tagged ZFS snapshots",
    version,
    after_help = "\
Examples:
  zfs-snap -c -t hourly pool/data             create pool/data@hourly-<timestamp>
  zfs-snap -c -p -t daily -k 7 -r pool        snapshot, then keep the 7 newest daily
  zfs-snap -l -t daily pool/data              list daily snapshots
  zfs-snap -n -p -t daily -k 0 pool/data      show what would be destroyed",
    // Show a compact two-column help layout.
    help_template = "\
{before-help}{name} {version}
{about}

{usage-heading} {usage}

{all-args}{after-help}"
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    /// Create a snapshot of each dataset named `<dataset>@<tag>-<timestamp>`.
    #[arg(short, long)]
    pub create: bool,

    /// Destroy all but the newest `--keep` snapshots for `--tag`.
    ///
    /// Snapshots created by `--create` in the same run count as the newest.
    #[arg(short, long)]
    pub prune: bool,

    /// List snapshots, optionally filtered by `--tag`.
    ///
    /// With no datasets, lists every snapshot on the system.
    #[arg(short, long)]
    pub list: bool,

    /// Include child datasets.
    #[arg(short, long)]
    pub recursive: bool,

    /// Print the zfs commands that would run, without creating or destroying
    /// anything.
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print each zfs command as it runs, then a summary.
    #[arg(short, long)]
    pub verbose: bool,

    /// Snapshot series label, e.g. `hourly` or `daily`.
    #[arg(short, long)]
    pub tag: Option<String>,

    /// Number of snapshots to keep when pruning.
    ///
    /// Kept as text so that `-k -1` is reported as an invalid count rather
    /// than an unknown flag.
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub keep: Option<String>,

    /// Elevate zfs commands via `doas`.
    #[arg(long)]
    pub sudo: bool,

    /// Additional config file, layered over the global one.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Print the resolved configuration and exit.
    #[arg(long)]
    pub print_config: bool,

    /// Datasets to operate on.
    #[arg(value_name = "DATASET")]
    pub datasets: Vec<String>,
}

// ─── Tests ────────────────────────────────────────────────────────────────────
