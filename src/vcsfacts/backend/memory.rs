//! In-memory backend for testing.
//!
//! A [`MemRepo`] is assembled with builder methods and handed to a
//! [`MemBackend`]. The backend shares the repository through an `Rc`, so a
//! test keeps its own handle and inspects what the engine did afterwards:
//! which scans ran with which flags, and how many entries were consumed.
//!
//! Uses `Cell`/`RefCell` for the counters since the engine is
//! single-threaded and every [`RepoHandle`] method takes `&self`.

use super::{
    Entries, RepoHandle, Revision, ScanShow, ScanSpec, StashEntry, StatusBits, StatusEntry, TagInfo,
    Upstream, VcsBackend,
};
use crate::deadline::Deadline;
use crate::error::{FactsError, Result};
use crate::model::{RepoState, Vcs};
use chrono::{DateTime, Utc};
use std::cell::{Cell, RefCell};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use std::rc::Rc;

/// Backend operations that can be made to fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MemOp {
    Open,
    Head,
    Branch,
    Tags,
    History,
    Upstream,
    AheadBehind,
    State,
    Stashes,
    Status,
}

#[derive(Default)]
pub struct MemRepo {
    head: Option<Revision>,
    branch: Option<String>,
    tags: Vec<TagInfo>,
    history: Vec<Revision>,
    upstreams: HashMap<String, Upstream>,
    ahead_behind: (usize, usize),
    state: RepoState,
    stashes: Vec<String>,
    entries: Vec<StatusEntry>,
    failing: HashSet<MemOp>,
    failing_scans: Vec<ScanShow>,

    scans: RefCell<Vec<ScanSpec>>,
    entries_yielded: Cell<usize>,
    commits_yielded: Cell<usize>,
    stashes_yielded: Cell<usize>,
}

impl MemRepo {
    pub fn new() -> Self {
        Self::default()
    }

    /// A repository with `commits` commits on `branch`; HEAD is the newest.
    ///
    /// Commit ids are synthetic 40-digit hex strings, `c0000...01` being the
    /// first commit.
    pub fn with_commits(branch: &str, commits: usize) -> Self {
        let history: Vec<Revision> = (1..=commits).rev().map(Self::commit_id).collect();
        Self {
            head: history.first().cloned(),
            branch: (commits > 0).then(|| branch.to_string()),
            history,
            ..Self::default()
        }
    }

    /// Synthetic id of the n-th commit created by [`MemRepo::with_commits`].
    pub fn commit_id(n: usize) -> Revision {
        Revision::new(format!("c{:039x}", n))
    }

    pub fn detached(mut self) -> Self {
        self.branch = None;
        self
    }

    pub fn tag(mut self, name: &str, target: Revision, annotated_at: Option<DateTime<Utc>>) -> Self {
        self.tags.push(TagInfo {
            name: name.to_string(),
            target,
            annotated_at,
        });
        self
    }

    pub fn upstream(mut self, branch: &str, name: &str, ahead: usize, behind: usize) -> Self {
        let target = self
            .head
            .clone()
            .unwrap_or_else(|| Revision::new("0".repeat(40)));
        self.upstreams.insert(
            branch.to_string(),
            Upstream {
                name: name.to_string(),
                target,
            },
        );
        self.ahead_behind = (ahead, behind);
        self
    }

    pub fn state(mut self, state: RepoState) -> Self {
        self.state = state;
        self
    }

    pub fn stash(mut self, message: &str) -> Self {
        self.stashes.insert(0, message.to_string());
        self
    }

    pub fn entry(mut self, path: &str, status: StatusBits) -> Self {
        self.entries.push(StatusEntry::new(path, status));
        self
    }

    pub fn fail(mut self, op: MemOp) -> Self {
        self.failing.insert(op);
        self
    }

    /// Make status scans showing `show` fail, leaving other scans intact.
    pub fn fail_scan(mut self, show: ScanShow) -> Self {
        self.failing_scans.push(show);
        self
    }

    /// Scans requested so far, in order, including ones that failed.
    pub fn scans(&self) -> Vec<ScanSpec> {
        self.scans.borrow().clone()
    }

    /// Status entries handed to the engine across all scans.
    pub fn entries_yielded(&self) -> usize {
        self.entries_yielded.get()
    }

    pub fn commits_yielded(&self) -> usize {
        self.commits_yielded.get()
    }

    pub fn stashes_yielded(&self) -> usize {
        self.stashes_yielded.get()
    }

    fn check(&self, op: MemOp) -> Result<()> {
        if self.failing.contains(&op) {
            return Err(FactsError::Backend(format!("Simulated {:?} failure", op)));
        }
        Ok(())
    }

    /// What a real status scan with `spec` would report for `status`.
    fn visible(status: StatusBits, spec: &ScanSpec) -> StatusBits {
        let mut hidden = StatusBits::IGNORED;
        if !spec.show.touches_index() {
            hidden |= StatusBits::INDEX_MASK;
        }
        if !spec.show.touches_workdir() {
            hidden |= StatusBits::WT_MASK;
        }
        if !spec.include_untracked {
            hidden |= StatusBits::WT_NEW;
        }
        if !spec.detect_renames {
            hidden |= StatusBits::INDEX_RENAMED | StatusBits::WT_RENAMED;
        }
        status.difference(hidden)
    }
}

pub struct MemBackend {
    repo: Option<Rc<MemRepo>>,
}

impl MemBackend {
    pub fn new(repo: MemRepo) -> Self {
        Self {
            repo: Some(Rc::new(repo)),
        }
    }

    /// A backend for which every path is outside a repository.
    pub fn not_a_repository() -> Self {
        Self { repo: None }
    }

    /// Shared handle to the repository, for inspecting counters.
    pub fn repo(&self) -> Option<Rc<MemRepo>> {
        self.repo.clone()
    }
}

pub struct MemHandle(Rc<MemRepo>);

impl VcsBackend for MemBackend {
    type Repo = MemHandle;

    fn vcs(&self) -> Vcs {
        Vcs::Git
    }

    fn open(&self, _path: &Path) -> Result<Option<MemHandle>> {
        match &self.repo {
            Some(repo) => {
                repo.check(MemOp::Open)?;
                Ok(Some(MemHandle(Rc::clone(repo))))
            }
            None => Ok(None),
        }
    }
}

impl RepoHandle for MemHandle {
    fn head(&self) -> Result<Option<Revision>> {
        self.0.check(MemOp::Head)?;
        Ok(self.0.head.clone())
    }

    fn current_branch(&self) -> Result<Option<String>> {
        self.0.check(MemOp::Branch)?;
        Ok(self.0.branch.clone())
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        self.0.check(MemOp::Tags)?;
        Ok(self.0.tags.clone())
    }

    fn walk_history(&self, deadline: Deadline) -> Result<Entries<'_, Revision>> {
        self.0.check(MemOp::History)?;
        let repo = &self.0;
        Ok(Box::new(
            repo.history
                .iter()
                .take_while(move |_| !deadline.expired())
                .map(move |rev| {
                    repo.commits_yielded.set(repo.commits_yielded.get() + 1);
                    Ok(rev.clone())
                }),
        ))
    }

    fn upstream(&self, branch: &str) -> Result<Option<Upstream>> {
        self.0.check(MemOp::Upstream)?;
        Ok(self.0.upstreams.get(branch).cloned())
    }

    fn ahead_behind(&self, _local: &Revision, _upstream: &Revision) -> Result<(usize, usize)> {
        self.0.check(MemOp::AheadBehind)?;
        Ok(self.0.ahead_behind)
    }

    fn state(&self) -> Result<RepoState> {
        self.0.check(MemOp::State)?;
        Ok(self.0.state)
    }

    fn stashes(&self) -> Result<Entries<'_, StashEntry>> {
        self.0.check(MemOp::Stashes)?;
        let repo = &self.0;
        Ok(Box::new(repo.stashes.iter().enumerate().map(
            move |(index, message)| {
                repo.stashes_yielded.set(repo.stashes_yielded.get() + 1);
                Ok(StashEntry {
                    index,
                    message: message.clone(),
                })
            },
        )))
    }

    fn status_scan(&self, spec: &ScanSpec, deadline: Deadline) -> Result<Entries<'_, StatusEntry>> {
        self.0.scans.borrow_mut().push(*spec);
        self.0.check(MemOp::Status)?;
        if self.0.failing_scans.contains(&spec.show) {
            return Err(FactsError::Backend(format!("Simulated {:?} scan failure", spec.show)));
        }
        let repo = &self.0;
        let spec = *spec;
        Ok(Box::new(
            repo.entries
                .iter()
                .filter_map(move |entry| {
                    let status = MemRepo::visible(entry.status, &spec);
                    (!status.is_empty()).then(|| StatusEntry::new(entry.path.clone(), status))
                })
                .take_while(move |_| !deadline.expired())
                .map(move |entry| {
                    repo.entries_yielded.set(repo.entries_yielded.get() + 1);
                    Ok(entry)
                }),
        ))
    }
}
