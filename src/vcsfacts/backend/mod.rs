//! # Backend Layer
//!
//! This module defines the capability interface the fact engine reads a
//! repository through. The engine never talks to a VCS directly: it opens a
//! handle with [`VcsBackend::open`] and calls the primitive read operations on
//! [`RepoHandle`].
//!
//! ## Implementations
//!
//! - [`git::GitBackend`]: production backend on top of libgit2 (`git2`)
//! - [`memory::MemBackend`]: in-memory fake repository for testing
//!   - No filesystem needed
//!   - Records every status scan and counts consumed entries, so tests can
//!     assert on the work the engine did, not only on its answers
//!   - Can simulate failures of individual operations
//!
//! ## Contract
//!
//! - Handles are read-only: nothing here writes to the repository, including
//!   the index stat cache.
//! - Sequences (history, stashes, status entries) are returned as iterators
//!   and may be produced lazily; the engine stops consuming them as soon as
//!   it has its answer.
//! - "Absent" outcomes (no commits, detached HEAD, no upstream) are `Ok(None)`,
//!   never errors. Errors mean the operation itself failed.

use crate::deadline::Deadline;
use crate::error::Result;
use crate::model::{RepoState, Vcs};
use chrono::{DateTime, Utc};
use std::fmt;
use std::path::Path;

pub mod git;
pub mod memory;
mod status;

pub use status::{ScanShow, ScanSpec, StatusBits, StatusEntry};

/// Boxed fallible iterator returned by sequence operations.
pub type Entries<'a, T> = Box<dyn Iterator<Item = Result<T>> + 'a>;

/// Commit id in its full hexadecimal form.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Revision(String);

impl Revision {
    pub const SHORT_LEN: usize = 7;

    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Abbreviated id used for prompts.
    pub fn short(&self) -> &str {
        self.0.get(..Self::SHORT_LEN).unwrap_or(&self.0)
    }
}

impl fmt::Display for Revision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A tag and the commit it points at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagInfo {
    pub name: String,
    /// Commit the tag peels to
    pub target: Revision,
    /// Tagger time; `None` for lightweight tags
    pub annotated_at: Option<DateTime<Utc>>,
}

impl TagInfo {
    pub fn is_annotated(&self) -> bool {
        self.annotated_at.is_some()
    }
}

/// The remote-tracking branch a local branch compares against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upstream {
    pub name: String,
    pub target: Revision,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StashEntry {
    pub index: usize,
    pub message: String,
}

/// Entry point of a backend: decides whether a path is inside a repository.
pub trait VcsBackend {
    type Repo: RepoHandle;

    /// The VCS this backend reads.
    fn vcs(&self) -> Vcs;

    /// Open the repository containing `path`.
    /// Returns `Ok(None)` if `path` is not inside a repository.
    fn open(&self, path: &Path) -> Result<Option<Self::Repo>>;
}

/// Primitive read operations on an open repository.
pub trait RepoHandle {
    /// Commit HEAD points at. `None` for a repository without commits.
    fn head(&self) -> Result<Option<Revision>>;

    /// Short name of the checked-out branch. `None` when detached or unborn.
    fn current_branch(&self) -> Result<Option<String>>;

    /// All tags, annotated and lightweight.
    fn tags(&self) -> Result<Vec<TagInfo>>;

    /// Commits reachable from HEAD, most recent first.
    fn walk_history(&self, deadline: Deadline) -> Result<Entries<'_, Revision>>;

    /// Upstream of a local branch. `None` if none is configured or it does not resolve.
    fn upstream(&self, branch: &str) -> Result<Option<Upstream>>;

    /// Commits unique to `local` and to `upstream`, in that order.
    fn ahead_behind(&self, local: &Revision, upstream: &Revision) -> Result<(usize, usize)>;

    fn state(&self) -> Result<RepoState>;

    /// Stash entries, newest first.
    fn stashes(&self) -> Result<Entries<'_, StashEntry>>;

    /// Changed paths for one scan. Unmodified paths are never reported.
    fn status_scan(&self, spec: &ScanSpec, deadline: Deadline) -> Result<Entries<'_, StatusEntry>>;
}
