//! `--create`: one `<dataset>@<tag>-<timestamp>` snapshot per dataset.

use tracing::info;

use super::Session;
use crate::{engine::Request, error::Error, snapshot::snapshot_name};

/// Snapshot every dataset in input order.
///
/// Returns the names created (or, under dry-run, the names that would have
/// been) so a following prune can count them as already present.
pub fn run(session: &mut Session<'_>) -> Result<Vec<String>, Error> {
    let opts = session.opts;
    let Some(tag) = opts.tag.as_ref() else {
        return Ok(Vec::new());
    };

    let mut created = Vec::with_capacity(opts.datasets.len());
    for dataset in &opts.datasets {
        let name = snapshot_name(dataset, tag, session.clock.now());
        session.mutate(Request::Create {
            snapshot: name.clone(),
            recursive: opts.recursive,
        })?;
        info!(snapshot = %name, executed = !opts.dry_run, "create");
        created.push(name);
    }
    Ok(created)
}

// ─── Tests ────────────────────────────────────────────────────────────────────
