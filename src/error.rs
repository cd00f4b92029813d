//! Error types.
//!
//! Two kinds of failure matter to the caller:
//!
//! - [`UsageError`]: the requested combination of flags cannot run.  Raised before any engine call
//!   is made; `main` prints it with a usage reminder and exits 1.
//! - [`EngineError`]: the snapshot engine rejected a request.  Raised from inside a phase and aborts
//!   the rest of the invocation; the engine's own message is surfaced verbatim.

use std::io;

use thiserror::Error;

/// Invalid flag or argument combination.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UsageError {
    #[error("no operation selected: pass at least one of --create, --prune or --list")]
    NoOperation,

    #[error("missing dataset: --create and --prune need at least one dataset")]
    MissingDataset,

    #[error("missing tag: --create and --prune need --tag")]
    MissingTag,

    #[error("invalid tag '{0}': tags must not contain '@', '/', '#' or whitespace")]
    InvalidTag(String),

    #[error("missing keep count: --prune needs --keep")]
    MissingKeep,

    #[error("invalid keep count '{0}': expected a non-negative integer")]
    InvalidKeep(String),

    #[error("--keep is only valid with --prune")]
    KeepWithoutPrune,
}

/// A failed engine request.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("`{command}` exited with {status}: {stderr}")]
    Failed {
        command: String,
        status: String,
        stderr: String,
    },

    /// Raised by engines that do their own validation (the in-memory engine).
    #[error("{0}")]
    Rejected(String),
}

/// Everything a phase can fail with.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error(transparent)]
    Engine(#[from] EngineError),

    #[error("writing output: {0}")]
    Output(#[from] io::Error),
}

// ─── Tests ────────────────────────────────────────────────────────────────────
