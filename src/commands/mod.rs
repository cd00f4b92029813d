//! Phase handlers and the dispatcher that sequences them.
//!
//! | File         | Flag        | Description                               |
//! |--------------|-------------|-------------------------------------------|
//! | `create.rs`  | `--create`  | Snapshot each dataset                     |
//! | `prune.rs`   | `--prune`   | Destroy all but the newest N per tag      |
//! | `list.rs`    | `--list`    | Print snapshot names                      |
//!
//! Phases run in that order, each only if requested.  The first error stops
//! the run; requests that already succeeded are not rolled back.

use std::io::Write;

use crate::{
    engine::{CommandRecord, Request, SnapshotEngine},
    error::Error,
    options::Options,
    snapshot::Clock,
};

pub mod create;
pub mod list;
pub mod prune;

/// Everything a phase needs, borrowed for the length of one run.
pub struct Session<'a> {
    pub opts: &'a Options,
    pub engine: &'a mut dyn SnapshotEngine,
    pub clock: &'a dyn Clock,
    /// Data output: command echoes and listed names.
    pub out: &'a mut dyn Write,
    /// Every request issued (or, under dry-run, only displayed) so far.
    pub records: Vec<CommandRecord>,
}

impl<'a> Session<'a> {
    pub fn new(
        opts: &'a Options,
        engine: &'a mut dyn SnapshotEngine,
        clock: &'a dyn Clock,
        out: &'a mut dyn Write,
    ) -> Self {
        Self {
            opts,
            engine,
            clock,
            out,
            records: Vec::new(),
        }
    }

    /// Issue a create or destroy request.
    ///
    /// Echoed to `out` under dry-run or verbose, executed unless dry-run.
    pub fn mutate(&mut self, request: Request) -> Result<(), Error> {
        if self.opts.echo() {
            writeln!(self.out, "{}", self.engine.render(&request))?;
        }
        let executed = !self.opts.dry_run;
        if executed {
            request.apply(&mut *self.engine)?;
        }
        self.records.push(CommandRecord { request, executed });
        Ok(())
    }

    /// Issue a list request; always executed, never echoed.
    pub fn query(&mut self, request: Request) -> Result<Vec<String>, Error> {
        let names = request.apply(&mut *self.engine)?;
        self.records.push(CommandRecord {
            request,
            executed: true,
        });
        Ok(names)
    }
}

/// Run every requested phase in order: create, prune, list.
pub fn dispatch(session: &mut Session<'_>) -> Result<(), Error> {
    let opts = session.opts;

    let pending = if opts.create {
        create::run(session)?
    } else {
        Vec::new()
    };

    if opts.prune() {
        prune::run(session, &pending)?;
    }

    if opts.list {
        list::run(session)?;
    }

    Ok(())
}

// ─── Tests ────────────────────────────────────────────────────────────────────
