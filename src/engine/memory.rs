//! In-memory engine for unit tests.
//!
//! Tracks a set of datasets and a set of snapshot names, enforces the same
//! failure modes as `zfs` (unknown dataset, duplicate snapshot, missing
//! snapshot) and records every mutating call so tests can assert that
//! dry-run left the engine untouched.

use std::collections::BTreeSet;

use super::{Request, SnapshotEngine, SortOrder};
use crate::{
    error::EngineError,
    snapshot::{self, is_descendant},
};

#[derive(Debug, Default)]
pub struct MemoryEngine {
    pub datasets: BTreeSet<String>,
    pub snapshots: BTreeSet<String>,
    /// Create/destroy calls in the order they were received.
    pub mutations: Vec<Request>,
    /// Number of `list` calls received.
    pub lists: usize,
}

impl MemoryEngine {
    pub fn with_datasets(datasets: &[&str]) -> Self {
        Self {
            datasets: datasets.iter().map(|d| (*d).to_string()).collect(),
            ..Self::default()
        }
    }

    /// Seed existing snapshots (their datasets are registered too).
    pub fn with_snapshots(mut self, names: &[&str]) -> Self {
        for name in names {
            if let Some((dataset, _)) = snapshot::split(name) {
                self.datasets.insert(dataset.into());
            }
            self.snapshots.insert((*name).into());
        }
        self
    }

    /// `dataset` plus, when `recursive`, every dataset below it.
    fn scope<'a>(&'a self, dataset: &'a str, recursive: bool) -> Vec<&'a str> {
        self.datasets
            .iter()
            .map(String::as_str)
            .filter(|d| *d == dataset || (recursive && is_descendant(d, dataset)))
            .collect()
    }
}

impl SnapshotEngine for MemoryEngine {
    fn render(&self, request: &Request) -> String {
        let flag = |recursive: bool| if recursive { " -r" } else { "" };
        match request {
            Request::Create {
                snapshot,
                recursive,
            } => format!("create{} {snapshot}", flag(*recursive)),
            Request::Destroy {
                snapshot,
                recursive,
            } => format!("destroy{} {snapshot}", flag(*recursive)),
            Request::List {
                datasets,
                recursive,
                ..
            } => format!("list{} {}", flag(*recursive), datasets.join(" ")),
        }
    }

    fn create(&mut self, name: &str, recursive: bool) -> Result<(), EngineError> {
        self.mutations.push(Request::Create {
            snapshot: name.into(),
            recursive,
        });
        let (dataset, short) = snapshot::split(name)
            .ok_or_else(|| EngineError::Rejected(format!("invalid snapshot name '{name}'")))?;
        if !self.datasets.contains(dataset) {
            return Err(EngineError::Rejected(format!(
                "dataset does not exist: {dataset}"
            )));
        }
        let targets: Vec<String> = self
            .scope(dataset, recursive)
            .into_iter()
            .map(|d| format!("{d}@{short}"))
            .collect();
        if let Some(dup) = targets.iter().find(|t| self.snapshots.contains(*t)) {
            return Err(EngineError::Rejected(format!(
                "snapshot already exists: {dup}"
            )));
        }
        self.snapshots.extend(targets);
        Ok(())
    }

    fn destroy(&mut self, name: &str, recursive: bool) -> Result<(), EngineError> {
        self.mutations.push(Request::Destroy {
            snapshot: name.into(),
            recursive,
        });
        if !self.snapshots.remove(name) {
            return Err(EngineError::Rejected(format!(
                "could not find any snapshots to destroy: {name}"
            )));
        }
        if recursive && let Some((dataset, short)) = snapshot::split(name) {
            let children: Vec<String> = self
                .scope(dataset, true)
                .into_iter()
                .map(|d| format!("{d}@{short}"))
                .collect();
            for child in children {
                self.snapshots.remove(&child);
            }
        }
        Ok(())
    }

    fn list(
        &mut self,
        datasets: &[String],
        recursive: bool,
        order: SortOrder,
    ) -> Result<Vec<String>, EngineError> {
        self.lists += 1;
        if let Some(missing) = datasets.iter().find(|d| !self.datasets.contains(*d)) {
            return Err(EngineError::Rejected(format!(
                "dataset does not exist: {missing}"
            )));
        }
        let mut names: Vec<String> = self
            .snapshots
            .iter()
            .filter(|name| {
                let Some((dataset, _)) = snapshot::split(name) else {
                    return false;
                };
                datasets.is_empty()
                    || datasets
                        .iter()
                        .any(|d| dataset == d.as_str() || (recursive && is_descendant(dataset, d)))
            })
            .cloned()
            .collect();
        if order == SortOrder::Descending {
            names.reverse();
        }
        Ok(names)
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recursive_create_reaches_children() {
        let mut e = MemoryEngine::with_datasets(&["pool", "pool/a", "pool/a/b", "poolx"]);
        e.create("pool@t-1", true).unwrap();
        assert_eq!(
            e.snapshots.iter().cloned().collect::<Vec<_>>(),
            vec!["pool/a/b@t-1", "pool/a@t-1", "pool@t-1"]
        );
    }

    #[test]
    fn duplicate_create_is_rejected() {
        let mut e = MemoryEngine::with_datasets(&["pool"]).with_snapshots(&["pool@t-1"]);
        assert!(e.create("pool@t-1", false).is_err());
    }

    #[test]
    fn list_without_recursion_skips_children() {
        let mut e = MemoryEngine::default().with_snapshots(&["pool@t-1", "pool/a@t-1"]);
        let names = e
            .list(&["pool".into()], false, SortOrder::Ascending)
            .unwrap();
        assert_eq!(names, vec!["pool@t-1"]);
    }

    #[test]
    fn list_unknown_dataset_fails() {
        let mut e = MemoryEngine::default();
        assert!(e.list(&["nope".into()], false, SortOrder::Ascending).is_err());
    }
}
