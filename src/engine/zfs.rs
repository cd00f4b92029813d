//! `zfs(8)` command-line engine.

use tracing::warn;

use super::{Request, SnapshotEngine, SortOrder};
use crate::{
    config::EngineConfig,
    error::EngineError,
    runner::{build_create_args, build_destroy_args, build_list_args, render},
    ui::{Captured, run_captured},
};

/// Drives the real `zfs` binary (optionally through `doas`).
#[derive(Debug, Clone)]
pub struct ZfsEngine {
    cfg: EngineConfig,
}

impl ZfsEngine {
    pub const fn new(cfg: EngineConfig) -> Self {
        Self { cfg }
    }

    fn args(&self, request: &Request) -> Vec<String> {
        match request {
            Request::Create {
                snapshot,
                recursive,
            } => build_create_args(&self.cfg, snapshot, *recursive),
            Request::Destroy {
                snapshot,
                recursive,
            } => build_destroy_args(&self.cfg, snapshot, *recursive),
            Request::List {
                datasets,
                recursive,
                order,
            } => build_list_args(&self.cfg, datasets, *recursive, *order),
        }
    }

    fn run(&self, request: &Request) -> Result<Captured, EngineError> {
        let out = run_captured(&self.args(request))?;
        if !out.stderr.trim().is_empty() {
            warn!(stderr = %out.stderr.trim_end(), "zfs wrote to stderr");
        }
        Ok(out)
    }
}

/// `zfs list -H -o name` prints one name per line.
pub fn parse_names(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .map(str::trim_end)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

impl SnapshotEngine for ZfsEngine {
    fn render(&self, request: &Request) -> String {
        render(&self.args(request))
    }

    fn create(&mut self, snapshot: &str, recursive: bool) -> Result<(), EngineError> {
        self.run(&Request::Create {
            snapshot: snapshot.into(),
            recursive,
        })
        .map(drop)
    }

    fn destroy(&mut self, snapshot: &str, recursive: bool) -> Result<(), EngineError> {
        self.run(&Request::Destroy {
            snapshot: snapshot.into(),
            recursive,
        })
        .map(drop)
    }

    fn list(
        &mut self,
        datasets: &[String],
        recursive: bool,
        order: SortOrder,
    ) -> Result<Vec<String>, EngineError> {
        let out = self.run(&Request::List {
            datasets: datasets.to_vec(),
            recursive,
            order,
        })?;
        Ok(parse_names(&out.stdout))
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────
