//! `--prune`: keep the newest N snapshots per tag, destroy the rest.
//!
//! For each dataset:
//!
//! 1. list its snapshots, newest first (recursively with `-r`)
//! 2. add the snapshots `--create` made (or would have made) this run
//! 3. keep only exact `@<tag>-<timestamp>` matches
//! 4. per dataset, skip the newest `keep`; the rest are destroyed
//!
//! The selection is [`select_for_deletion`] and the destroy requests come
//! from [`plan_destroys`]; both are pure functions over names.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use tracing::{debug, info};

use super::Session;
use crate::{
    engine::{Request, SortOrder},
    error::Error,
    snapshot::{self, Tag, is_descendant, matches_tag},
};

/// Keep the `keep` newest snapshots tagged `tag`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    pub tag: Tag,
    pub keep: usize,
}

pub fn run(session: &mut Session<'_>, pending: &[String]) -> Result<(), Error> {
    let opts = session.opts;
    let (Some(tag), Some(keep)) = (opts.tag.clone(), opts.keep) else {
        return Ok(());
    };
    let policy = RetentionPolicy { tag, keep };

    // destroyed (or, under dry-run, planned) so far; a repeated or
    // overlapping dataset must not see them again
    let mut gone: HashSet<String> = HashSet::new();

    for dataset in &opts.datasets {
        let listed = session.query(Request::List {
            datasets: vec![dataset.clone()],
            recursive: opts.recursive,
            order: SortOrder::Descending,
        })?;
        let mut names = with_pending(listed, pending, dataset, opts.recursive);
        names.retain(|n| !gone.contains(n));

        let doomed = select_for_deletion(&names, &policy);
        let requests = plan_destroys(&doomed, &names, opts.recursive);
        debug!(
            dataset = %dataset,
            listed = names.len(),
            selected = doomed.len(),
            requests = requests.len(),
            keep,
            "retention decided"
        );

        for request in requests {
            if let Request::Destroy { snapshot, recursive } = &request {
                info!(snapshot = %snapshot, recursive, executed = !opts.dry_run, "destroy");
            }
            session.mutate(request)?;
        }
        gone.extend(doomed);
    }
    Ok(())
}

/// Snapshots eligible for deletion under `policy`, newest first within each
/// dataset.
///
/// Names that do not match the tag exactly are ignored.  Duplicates are
/// collapsed.  Every dataset keeps its own newest `keep`.
pub fn select_for_deletion(names: &[String], policy: &RetentionPolicy) -> Vec<String> {
    let mut groups: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for name in names.iter().filter(|n| matches_tag(n, &policy.tag)) {
        if let Some((dataset, _)) = snapshot::split(name) {
            groups.entry(dataset).or_default().push(name);
        }
    }

    let mut doomed: Vec<&str> = Vec::new();
    for group in groups.values_mut() {
        group.sort_unstable_by(|a, b| b.cmp(a));
        group.dedup();
        doomed.extend(group.iter().skip(policy.keep));
    }

    doomed.into_iter().map(String::from).collect()
}

/// Destroy requests that remove exactly `doomed` from `present`.
///
/// Without `recursive` every doomed snapshot is destroyed on its own.  With
/// it, a snapshot gets `-r` only when every same-named snapshot below it in
/// `present` is doomed as well; those descendants are then left to the
/// ancestor.  An ancestor whose subtree still holds a kept snapshot is
/// destroyed without `-r`.
pub fn plan_destroys(doomed: &[String], present: &[String], recursive: bool) -> Vec<Request> {
    let destroy = |snapshot: &str, recursive: bool| Request::Destroy {
        snapshot: snapshot.into(),
        recursive,
    };
    if !recursive {
        return doomed.iter().map(|n| destroy(n.as_str(), false)).collect();
    }

    let selected: HashSet<&str> = doomed.iter().map(String::as_str).collect();
    let whole: HashSet<&str> = doomed
        .iter()
        .map(String::as_str)
        .filter(|name| {
            present
                .iter()
                .filter(|p| same_name_below(p, name))
                .all(|p| selected.contains(p.as_str()))
        })
        .collect();

    doomed
        .iter()
        .filter(|n| !covered_by_ancestor(n, &whole))
        .map(|n| destroy(n.as_str(), whole.contains(n.as_str())))
        .collect()
}

/// Whether `candidate` is `<descendant of ancestor's dataset>@<same short name>`.
fn same_name_below(candidate: &str, ancestor: &str) -> bool {
    match (snapshot::split(candidate), snapshot::split(ancestor)) {
        (Some((d, short)), Some((root, root_short))) => {
            short == root_short && is_descendant(d, root)
        },
        _ => false,
    }
}

fn covered_by_ancestor(name: &str, whole: &HashSet<&str>) -> bool {
    let Some((mut dataset, short)) = snapshot::split(name) else {
        return false;
    };
    while let Some((parent, _)) = dataset.rsplit_once('/') {
        if whole.contains(format!("{parent}@{short}").as_str()) {
            return true;
        }
        dataset = parent;
    }
    false
}

/// `listed` plus the pending snapshots that fall under `dataset`.
///
/// A recursive create also snapshots every child, so with `recursive` each
/// pending name is copied onto the descendant datasets seen in `listed`.
/// Under dry-run those copies do not exist yet but must still be counted.
fn with_pending(
    mut listed: Vec<String>,
    pending: &[String],
    dataset: &str,
    recursive: bool,
) -> Vec<String> {
    let known: BTreeSet<String> = listed
        .iter()
        .filter_map(|n| snapshot::split(n))
        .map(|(d, _)| d.to_string())
        .collect();

    for name in pending.iter().filter(|p| in_scope(p, dataset, recursive)) {
        listed.push(name.clone());
        if recursive && let Some((root, short)) = snapshot::split(name) {
            listed.extend(
                known
                    .iter()
                    .filter(|d| is_descendant(d, root))
                    .map(|d| format!("{d}@{short}")),
            );
        }
    }
    listed
}

/// Whether pending snapshot `name` falls under `dataset`.
fn in_scope(name: &str, dataset: &str, recursive: bool) -> bool {
    snapshot::split(name)
        .is_some_and(|(d, _)| d == dataset || (recursive && is_descendant(d, dataset)))
}

// ─── Tests ────────────────────────────────────────────────────────────────────
