//! Validated, immutable run options.
//!
//! [`Options::from_cli`] applies the usage rules once, in a fixed order, so
//! every phase can take `&Options` and trust it.  No I/O happens here.

use crate::{cli::Cli, config::Config, error::UsageError, snapshot::Tag};

#[derive(Debug, Clone, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    pub create: bool,
    /// Keep count; `Some` exactly when pruning was requested.
    pub keep: Option<usize>,
    pub list: bool,
    /// Required for create/prune; an optional filter for list.
    pub tag: Option<Tag>,
    pub recursive: bool,
    pub dry_run: bool,
    pub verbose: bool,
    pub datasets: Vec<String>,
}

impl Options {
    /// Validate `cli` (with `cfg` supplying per-tag keep defaults).
    ///
    /// Rules, first failure wins:
    ///
    /// 1. at least one of create/prune/list
    /// 2. create/prune need datasets
    /// 3. create/prune need a valid tag (list only checks a tag if given)
    /// 4. prune needs a non-negative keep count, from `--keep` or `[retention]`
    /// 5. `--keep` only alongside `--prune`
    pub fn from_cli(cli: &Cli, cfg: &Config) -> Result<Self, UsageError> {
        if !(cli.create || cli.prune || cli.list) {
            return Err(UsageError::NoOperation);
        }
        let mutating = cli.create || cli.prune;
        if mutating && cli.datasets.is_empty() {
            return Err(UsageError::MissingDataset);
        }

        let tag = match cli.tag.as_deref() {
            Some(raw) => Some(Tag::parse(raw)?),
            None if mutating => return Err(UsageError::MissingTag),
            None => None,
        };

        let keep = if cli.prune {
            let explicit = cli.keep.as_deref().map(parse_keep).transpose()?;
            let fallback = tag
                .as_ref()
                .and_then(|t| cfg.keep_for(t.as_str()))
                .map(|k| k as usize);
            Some(explicit.or(fallback).ok_or(UsageError::MissingKeep)?)
        } else if cli.keep.is_some() {
            return Err(UsageError::KeepWithoutPrune);
        } else {
            None
        };

        Ok(Self {
            create: cli.create,
            keep,
            list: cli.list,
            tag,
            recursive: cli.recursive,
            dry_run: cli.dry_run,
            verbose: cli.verbose,
            datasets: cli.datasets.clone(),
        })
    }

    pub const fn prune(&self) -> bool {
        self.keep.is_some()
    }

    /// Whether mutating requests are printed before (or instead of) running.
    pub const fn echo(&self) -> bool {
        self.dry_run || self.verbose
    }
}

fn parse_keep(raw: &str) -> Result<usize, UsageError> {
    raw.trim()
        .parse::<usize>()
        .map_err(|_| UsageError::InvalidKeep(raw.into()))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
