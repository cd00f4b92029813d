//! `--list`: print snapshot names, ascending.

use std::io::Write;

use super::Session;
use crate::{
    engine::{Request, SortOrder},
    error::Error,
    snapshot::Tag,
};

pub fn run(session: &mut Session<'_>) -> Result<(), Error> {
    let opts = session.opts;
    let names = session.query(Request::List {
        datasets: opts.datasets.clone(),
        recursive: opts.recursive,
        order: SortOrder::Ascending,
    })?;

    for name in filter(names, opts.tag.as_ref()) {
        writeln!(session.out, "{name}")?;
    }
    Ok(())
}

/// Names containing `@<tag>-`, or all names when no tag is given.
pub fn filter(names: Vec<String>, tag: Option<&Tag>) -> Vec<String> {
    match tag {
        Some(tag) => {
            let marker = tag.marker();
            names.into_iter().filter(|n| n.contains(&marker)).collect()
        },
        None => names,
    }
}

// ─── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{commands::tests::run as run_cli, engine::memory::MemoryEngine};

    fn engine() -> MemoryEngine {
        MemoryEngine::with_datasets(&["pool", "pool/data", "pool/data/child", "tank"])
            .with_snapshots(&[
                "pool/data@daily-2024-01-02T00:00:00Z",
                "pool/data@daily-2024-01-01T00:00:00Z",
                "pool/data@dailybackup-2024-01-01T00:00:00Z",
                "pool/data@hourly-2024-01-01T01:00:00Z",
                "pool/data/child@daily-2024-01-01T00:00:00Z",
                "tank@daily-2024-01-01T00:00:00Z",
            ])
    }

    #[test]
    fn tag_filter_requires_delimiter() {
        let out = run_cli(&["-l", "-t", "daily", "pool/data"], &mut engine()).unwrap();
        insta::assert_snapshot!(out.trim_end(), @r"
        pool/data@daily-2024-01-01T00:00:00Z
        pool/data@daily-2024-01-02T00:00:00Z
        ");
    }

    #[test]
    fn recursive_includes_children() {
        let out = run_cli(&["-l", "-r", "-t", "daily", "pool"], &mut engine()).unwrap();
        assert_eq!(out.lines().collect::<Vec<_>>(), vec![
            "pool/data/child@daily-2024-01-01T00:00:00Z",
            "pool/data@daily-2024-01-01T00:00:00Z",
            "pool/data@daily-2024-01-02T00:00:00Z",
        ]);
    }

    #[test]
    fn no_datasets_lists_everything() {
        let out = run_cli(&["-l"], &mut engine()).unwrap();
        assert_eq!(out.lines().count(), 6);
        assert!(out.contains("tank@daily-2024-01-01T00:00:00Z"));
    }

    #[test]
    fn listing_never_mutates() {
        let mut e = engine();
        run_cli(&["-l", "-n", "-v"], &mut e).unwrap();
        assert!(e.mutations.is_empty());
        assert_eq!(e.lists, 1);
    }

    #[test]
    fn filter_without_tag_is_identity() {
        let names = vec!["a@x-1".to_string(), "b@y-2".to_string()];
        assert_eq!(filter(names.clone(), None), names);
    }
}
