//! Git backend on top of libgit2.
//!
//! Repositories are discovered upward from the given path, so any directory
//! inside a working tree works. Every operation is read-only; status scans run
//! with `update_index(false)` so the index stat cache is never refreshed.

use super::{
    Entries, RepoHandle, Revision, ScanShow, ScanSpec, StashEntry, StatusBits, StatusEntry,
    TagInfo, Upstream, VcsBackend,
};
use crate::deadline::Deadline;
use crate::error::Result;
use crate::model::{RepoState, Vcs};
use chrono::{DateTime, Utc};
use git2::{
    BranchType, ErrorCode, Oid, Repository, RepositoryState, Sort, Status, StatusOptions,
    StatusShow,
};
use std::path::Path;
use tracing::debug;

const TAG_REF_PREFIX: &str = "refs/tags/";
const STASH_REF: &str = "refs/stash";

// libgit2 flags git2 has no constant for
const GIT_WT_UNREADABLE: u32 = 1 << 12;
const UNMAPPED: StatusBits = StatusBits::from_bits(1 << 15);

#[derive(Debug, Default, Clone, Copy)]
pub struct GitBackend;

impl GitBackend {
    pub fn new() -> Self {
        Self
    }
}

impl VcsBackend for GitBackend {
    type Repo = GitRepo;

    fn vcs(&self) -> Vcs {
        Vcs::Git
    }

    fn open(&self, path: &Path) -> Result<Option<GitRepo>> {
        match Repository::discover(path) {
            Ok(repo) => {
                debug!(path = %repo.path().display(), "opened git repository");
                Ok(Some(GitRepo { repo }))
            }
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

pub struct GitRepo {
    repo: Repository,
}

fn is_unborn(e: &git2::Error) -> bool {
    matches!(e.code(), ErrorCode::UnbornBranch | ErrorCode::NotFound)
}

fn to_revision(oid: Oid) -> Revision {
    Revision::new(oid.to_string())
}

fn timestamp(seconds: i64) -> DateTime<Utc> {
    DateTime::from_timestamp(seconds, 0).unwrap_or(DateTime::UNIX_EPOCH)
}

impl RepoHandle for GitRepo {
    fn head(&self) -> Result<Option<Revision>> {
        match self.repo.head() {
            Ok(head) => Ok(head.target().map(to_revision)),
            Err(e) if is_unborn(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn current_branch(&self) -> Result<Option<String>> {
        let head = match self.repo.head() {
            Ok(head) => head,
            Err(e) if is_unborn(&e) => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        if !head.is_branch() {
            return Ok(None);
        }
        Ok(head.shorthand().map(str::to_owned))
    }

    fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut refs = Vec::new();
        self.repo.tag_foreach(|oid, name| {
            refs.push((oid, String::from_utf8_lossy(name).into_owned()));
            true
        })?;

        let mut tags = Vec::with_capacity(refs.len());
        for (oid, full_name) in refs {
            let name = full_name
                .strip_prefix(TAG_REF_PREFIX)
                .unwrap_or(&full_name)
                .to_string();
            match self.repo.find_tag(oid) {
                Ok(tag) => {
                    let target = match tag.target().and_then(|obj| obj.peel_to_commit()) {
                        Ok(commit) => commit.id(),
                        Err(_) => {
                            debug!(tag = %name, "annotated tag does not point at a commit");
                            continue;
                        }
                    };
                    let annotated_at = tag
                        .tagger()
                        .map(|sig| timestamp(sig.when().seconds()))
                        .unwrap_or(DateTime::UNIX_EPOCH);
                    tags.push(TagInfo {
                        name,
                        target: to_revision(target),
                        annotated_at: Some(annotated_at),
                    });
                }
                Err(_) => tags.push(TagInfo {
                    name,
                    target: to_revision(oid),
                    annotated_at: None,
                }),
            }
        }
        Ok(tags)
    }

    fn walk_history(&self, deadline: Deadline) -> Result<Entries<'_, Revision>> {
        let mut walk = self.repo.revwalk()?;
        walk.set_sorting(Sort::TIME)?;
        match walk.push_head() {
            Ok(()) => {}
            Err(e) if is_unborn(&e) => return Ok(Box::new(std::iter::empty())),
            Err(e) => return Err(e.into()),
        }
        Ok(Box::new(
            walk.take_while(move |_| !deadline.expired())
                .map(|oid| -> Result<Revision> { Ok(to_revision(oid?)) }),
        ))
    }

    fn upstream(&self, branch: &str) -> Result<Option<Upstream>> {
        let local = match self.repo.find_branch(branch, BranchType::Local) {
            Ok(local) => local,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let upstream = match local.upstream() {
            Ok(upstream) => upstream,
            Err(e) if e.code() == ErrorCode::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let Some(target) = upstream.get().target() else {
            return Ok(None);
        };
        let name = upstream.name()?.unwrap_or_default().to_string();
        Ok(Some(Upstream {
            name,
            target: to_revision(target),
        }))
    }

    fn ahead_behind(&self, local: &Revision, upstream: &Revision) -> Result<(usize, usize)> {
        let local = Oid::from_str(local.as_str())?;
        let upstream = Oid::from_str(upstream.as_str())?;
        Ok(self.repo.graph_ahead_behind(local, upstream)?)
    }

    fn state(&self) -> Result<RepoState> {
        Ok(match self.repo.state() {
            RepositoryState::Clean => RepoState::None,
            RepositoryState::Merge => RepoState::Merge,
            RepositoryState::Revert | RepositoryState::RevertSequence => RepoState::Revert,
            RepositoryState::CherryPick | RepositoryState::CherryPickSequence => {
                RepoState::CherryPick
            }
            RepositoryState::Bisect => RepoState::Bisect,
            RepositoryState::Rebase => RepoState::Rebase,
            RepositoryState::RebaseInteractive => RepoState::RebaseInteractive,
            RepositoryState::RebaseMerge => RepoState::RebaseMerge,
            RepositoryState::ApplyMailbox => RepoState::ApplyMailbox,
            RepositoryState::ApplyMailboxOrRebase => RepoState::ApplyMailboxOrRebase,
        })
    }

    fn stashes(&self) -> Result<Entries<'_, StashEntry>> {
        let reflog = self.repo.reflog(STASH_REF)?;
        let len = reflog.len();
        Ok(Box::new((0..len).map(move |index| {
            let message = reflog
                .get(index)
                .and_then(|entry| entry.message().map(str::to_owned))
                .unwrap_or_default();
            Ok(StashEntry { index, message })
        })))
    }

    fn status_scan(&self, spec: &ScanSpec, deadline: Deadline) -> Result<Entries<'_, StatusEntry>> {
        if deadline.expired() {
            return Ok(Box::new(std::iter::empty()));
        }

        let mut opts = StatusOptions::new();
        opts.show(match spec.show {
            ScanShow::IndexOnly => StatusShow::Index,
            ScanShow::WorkdirOnly => StatusShow::Workdir,
            ScanShow::IndexAndWorkdir => StatusShow::IndexAndWorkdir,
        })
        .include_untracked(spec.include_untracked)
        .include_ignored(false)
        .renames_head_to_index(spec.detect_renames)
        .renames_index_to_workdir(spec.detect_renames)
        .renames_from_rewrites(spec.detect_renames && spec.renames_from_rewrites)
        .exclude_submodules(spec.exclude_submodules)
        .update_index(false);

        let statuses = self.repo.statuses(Some(&mut opts))?;
        let entries: Vec<Result<StatusEntry>> = statuses
            .iter()
            .map(|entry| {
                let path = entry.path().unwrap_or_default().to_string();
                Ok(StatusEntry::new(path, map_status(entry.status())))
            })
            .collect();
        debug!(show = ?spec.show, entries = entries.len(), "status scan");
        Ok(Box::new(entries.into_iter()))
    }
}

fn map_status(status: Status) -> StatusBits {
    const MAPPING: [(Status, StatusBits); 12] = [
        (Status::INDEX_NEW, StatusBits::INDEX_NEW),
        (Status::INDEX_MODIFIED, StatusBits::INDEX_MODIFIED),
        (Status::INDEX_DELETED, StatusBits::INDEX_DELETED),
        (Status::INDEX_RENAMED, StatusBits::INDEX_RENAMED),
        (Status::INDEX_TYPECHANGE, StatusBits::INDEX_TYPECHANGE),
        (Status::WT_NEW, StatusBits::WT_NEW),
        (Status::WT_MODIFIED, StatusBits::WT_MODIFIED),
        (Status::WT_DELETED, StatusBits::WT_DELETED),
        (Status::WT_TYPECHANGE, StatusBits::WT_TYPECHANGE),
        (Status::WT_RENAMED, StatusBits::WT_RENAMED),
        (Status::IGNORED, StatusBits::IGNORED),
        (Status::CONFLICTED, StatusBits::CONFLICTED),
    ];

    let mut bits = StatusBits::CURRENT;
    let mut rest = status.bits();
    for (flag, mapped) in MAPPING {
        if status.contains(flag) {
            bits |= mapped;
            rest &= !flag.bits();
        }
    }
    if rest & GIT_WT_UNREADABLE != 0 {
        bits |= StatusBits::WT_UNREADABLE;
        rest &= !GIT_WT_UNREADABLE;
    }
    if rest != 0 {
        bits |= UNMAPPED;
    }
    bits
}
