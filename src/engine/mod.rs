//! Snapshot engine client.
//!
//! Everything that touches the storage system goes through
//! [`SnapshotEngine`].  Phases build a [`Request`], ask the engine to
//! [`render`](SnapshotEngine::render) it for dry-run/verbose display, and then
//! [`apply`](Request::apply) it.
//!
//! | Implementation        | Used by                                     |
//! |-----------------------|---------------------------------------------|
//! | [`zfs::ZfsEngine`]    | the binary; shells out to `zfs(8)`          |
//! | `memory::MemoryEngine`| unit tests; in-memory snapshot set          |

use crate::error::EngineError;

#[cfg(test)]
pub mod memory;
pub mod zfs;

/// Ordering of names returned by [`SnapshotEngine::list`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
}

/// One engine call, as data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    Create {
        snapshot: String,
        recursive: bool,
    },
    Destroy {
        snapshot: String,
        recursive: bool,
    },
    List {
        datasets: Vec<String>,
        recursive: bool,
        order: SortOrder,
    },
}

impl Request {
    /// Create and destroy change the engine; list does not.
    pub const fn is_mutation(&self) -> bool {
        !matches!(self, Self::List { .. })
    }

    /// Run this request against `engine`.
    ///
    /// Returns the listed names for [`Request::List`] and an empty `Vec`
    /// otherwise.
    pub fn apply(&self, engine: &mut dyn SnapshotEngine) -> Result<Vec<String>, EngineError> {
        match self {
            Self::Create {
                snapshot,
                recursive,
            } => engine.create(snapshot, *recursive).map(|()| Vec::new()),
            Self::Destroy {
                snapshot,
                recursive,
            } => engine.destroy(snapshot, *recursive).map(|()| Vec::new()),
            Self::List {
                datasets,
                recursive,
                order,
            } => engine.list(datasets, *recursive, *order),
        }
    }
}

/// A request together with whether it actually ran (`false` under dry-run).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandRecord {
    pub request: Request,
    pub executed: bool,
}

/// The capability surface this tool needs from a snapshot engine.
pub trait SnapshotEngine {
    /// One-line, human-readable form of `request` as this engine would run it.
    fn render(&self, request: &Request) -> String;

    fn create(&mut self, snapshot: &str, recursive: bool) -> Result<(), EngineError>;

    fn destroy(&mut self, snapshot: &str, recursive: bool) -> Result<(), EngineError>;

    /// Snapshot names under `datasets` (all datasets when empty).
    ///
    /// Without `recursive`, only snapshots of the named datasets themselves
    /// are returned, not those of their children.
    fn list(
        &mut self,
        datasets: &[String],
        recursive: bool,
        order: SortOrder,
    ) -> Result<Vec<String>, EngineError>;
}

// ─── Tests ────────────────────────────────────────────────────────────────────
