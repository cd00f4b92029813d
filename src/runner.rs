//! Command argument construction helpers.
//!
//! This module is responsible for *building* the argument lists that will be
//! passed to `zfs`.  It does **not** execute anything; process execution
//! lives in [`crate::ui`] so that the spinner can own the terminal while
//! commands run.
//!
//! Every function here is pure and unit-testable without a pool.
//!
//! # Privilege escalation
//!
//! [`prefix`] returns a zero- or one-element `Vec` that is prepended to every
//! command.  When `sudo` is enabled it contains `["doas"]`; otherwise it is
//! empty.
//!
//! # Whitespace in dataset names
//!
//! ZFS allows spaces in dataset names.  Arguments are handed to the child
//! process as a vector, never through a shell, so such names arrive intact.
//! [`render`] single-quotes them for display so a printed dry-run line can be
//! pasted back into a shell.

use crate::{config::EngineConfig, engine::SortOrder};

// ─── Privilege prefix ─────────────────────────────────────────────────────────

/// Returns `["doas"]` when `sudo` is set, otherwise an empty `Vec`.
pub fn prefix(cfg: &EngineConfig) -> Vec<String> {
    if cfg.sudo {
        vec!["doas".into()]
    } else {
        vec![]
    }
}

// ─── zfs commands ─────────────────────────────────────────────────────────────

/// `[doas] <binary>`; callers append the subcommand.
pub fn zfs_base(cfg: &EngineConfig) -> Vec<String> {
    let mut cmd = prefix(cfg);
    cmd.push(cfg.binary.clone());
    cmd
}

/// `zfs snapshot [-r] <snapshot>`
pub fn build_create_args(cfg: &EngineConfig, snapshot: &str, recursive: bool) -> Vec<String> {
    let mut cmd = zfs_base(cfg);
    cmd.push("snapshot".into());
    if recursive {
        cmd.push("-r".into());
    }
    cmd.push(snapshot.into());
    cmd
}

/// `zfs destroy [-r] <snapshot>`
pub fn build_destroy_args(cfg: &EngineConfig, snapshot: &str, recursive: bool) -> Vec<String> {
    let mut cmd = zfs_base(cfg);
    cmd.push("destroy".into());
    if recursive {
        cmd.push("-r".into());
    }
    cmd.push(snapshot.into());
    cmd
}

/// `zfs list -H -t snapshot -o name (-s|-S) name [-r | -d 1] [datasets…]`
///
/// Without `-r`, `-d 1` limits the listing to the named datasets' own
/// snapshots.  With no datasets at all, every snapshot on the system is
/// listed.
pub fn build_list_args(
    cfg: &EngineConfig,
    datasets: &[String],
    recursive: bool,
    order: SortOrder,
) -> Vec<String> {
    let mut cmd = zfs_base(cfg);
    cmd.extend([
        "list".into(),
        "-H".into(),
        "-t".into(),
        "snapshot".into(),
        "-o".into(),
        "name".into(),
    ]);
    cmd.push(
        match order {
            SortOrder::Ascending => "-s",
            SortOrder::Descending => "-S",
        }
        .into(),
    );
    cmd.push("name".into());
    if recursive {
        cmd.push("-r".into());
    } else if !datasets.is_empty() {
        cmd.extend(["-d".into(), "1".into()]);
    }
    cmd.extend(datasets.iter().cloned());
    cmd
}

// ─── Rendering ────────────────────────────────────────────────────────────────

/// Join `args` into one shell-pasteable line.
pub fn render(args: &[String]) -> String {
    args.iter()
        .map(|a| quote(a))
        .collect::<Vec<_>>()
        .join(" ")
}

fn quote(arg: &str) -> String {
    let plain = !arg.is_empty()
        && arg
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || "@/:._-+=,%".contains(c));
    if plain {
        arg.to_string()
    } else {
        format!("'{}'", arg.replace('\'', r"'\''"))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
