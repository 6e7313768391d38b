use crate::attributes::{AttrValue, Attribute, AttributeKind, AttributeSet, Category};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Version control system kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Vcs {
    #[default]
    None,
    Git,
    Mercurial,
}

impl Vcs {
    pub fn as_str(self) -> &'static str {
        match self {
            Vcs::None => "",
            Vcs::Git => "git",
            Vcs::Mercurial => "hg",
        }
    }
}

impl fmt::Display for Vcs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// In-progress multi-step operation (merge conflict, interactive rebase, ...).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RepoState {
    #[default]
    None,
    Merge,
    Revert,
    CherryPick,
    Bisect,
    Rebase,
    RebaseInteractive,
    RebaseMerge,
    ApplyMailbox,
    ApplyMailboxOrRebase,
}

impl RepoState {
    pub fn as_str(self) -> &'static str {
        match self {
            RepoState::None => "",
            RepoState::Merge => "merge",
            RepoState::Revert => "revert",
            RepoState::CherryPick => "cherry",
            RepoState::Bisect => "bisect",
            RepoState::Rebase => "rebase",
            RepoState::RebaseInteractive => "rebase-i",
            RepoState::RebaseMerge => "rebase-m",
            RepoState::ApplyMailbox => "am",
            RepoState::ApplyMailboxOrRebase => "am/rebase",
        }
    }
}

impl fmt::Display for RepoState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caller policy that controls how facts are detected.
///
/// Options are not attributes: they change what counts as dirty and which
/// flags are passed to status scans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Untracked (not ignored) files make the repository dirty.
    pub dirty_if_untracked: bool,

    /// Also detect renames from content rewrites.
    pub renames_from_rewrites: bool,

    /// Include submodules in status scans.
    pub include_submodules: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            dirty_if_untracked: true,
            renames_from_rewrites: false,
            include_submodules: false,
        }
    }
}

/// Requested attributes plus the options controlling their detection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Request {
    pub wanted: AttributeSet,
    pub options: Options,
}

impl Request {
    pub fn new(wanted: AttributeSet, options: Options) -> Self {
        Self { wanted, options }
    }
}

/// Values for every attribute.
///
/// Used both for raw findings (before normalization, possibly holding more
/// than was asked for) and for the filtered result handed to callers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FactRecord {
    pub vcs: Vcs,
    pub revision_short: String,
    /// Current branch; empty when detached or without commits
    pub branch: String,
    /// Latest annotated tag reachable from HEAD
    pub tag: String,
    pub state: RepoState,
    pub has_remote: bool,
    pub commits_ahead: usize,
    pub commits_behind: usize,
    pub has_stash: bool,
    pub stash_count: usize,
    pub is_dirty: bool,
    pub has_added: bool,
    pub added: usize,
    /// In index and/or workdir
    pub has_modified: bool,
    pub modified: usize,
    pub has_deleted: bool,
    pub deleted: usize,
    pub has_renamed: bool,
    pub renamed: usize,
    pub has_unmerged: bool,
    pub unmerged: usize,
    /// Does not include ignored files
    pub has_untracked: bool,
}

impl FactRecord {
    /// Get an attribute value.
    pub fn get_attr(&self, attr: Attribute) -> AttrValue {
        match attr {
            Attribute::Vcs => AttrValue::Enum(self.vcs.as_str()),
            Attribute::RevisionShort => AttrValue::Text(self.revision_short.clone()),
            Attribute::Branch => AttrValue::Text(self.branch.clone()),
            Attribute::Tag => AttrValue::Text(self.tag.clone()),
            Attribute::State => AttrValue::Enum(self.state.as_str()),
            Attribute::HasRemote => AttrValue::Flag(self.has_remote),
            Attribute::CommitsAhead => AttrValue::Count(self.commits_ahead),
            Attribute::CommitsBehind => AttrValue::Count(self.commits_behind),
            Attribute::HasStash => AttrValue::Flag(self.has_stash),
            Attribute::StashCount => AttrValue::Count(self.stash_count),
            Attribute::IsDirty => AttrValue::Flag(self.is_dirty),
            Attribute::HasAdded => AttrValue::Flag(self.has_added),
            Attribute::Added => AttrValue::Count(self.added),
            Attribute::HasModified => AttrValue::Flag(self.has_modified),
            Attribute::Modified => AttrValue::Count(self.modified),
            Attribute::HasDeleted => AttrValue::Flag(self.has_deleted),
            Attribute::Deleted => AttrValue::Count(self.deleted),
            Attribute::HasRenamed => AttrValue::Flag(self.has_renamed),
            Attribute::Renamed => AttrValue::Count(self.renamed),
            Attribute::HasUnmerged => AttrValue::Flag(self.has_unmerged),
            Attribute::Unmerged => AttrValue::Count(self.unmerged),
            Attribute::HasUntracked => AttrValue::Flag(self.has_untracked),
        }
    }

    /// Reset an attribute to the zero value of its kind.
    pub fn reset_attr(&mut self, attr: Attribute) {
        match attr.kind() {
            AttributeKind::Flag => *self.flag_mut(attr) = false,
            AttributeKind::Count => *self.count_mut(attr) = 0,
            AttributeKind::Text | AttributeKind::Enum => match attr {
                Attribute::Vcs => self.vcs = Vcs::None,
                Attribute::RevisionShort => self.revision_short.clear(),
                Attribute::Branch => self.branch.clear(),
                Attribute::Tag => self.tag.clear(),
                Attribute::State => self.state = RepoState::None,
                _ => unreachable!("{attr} is not a text or enum attribute"),
            },
        }
    }

    /// Mutable access to a flag attribute.
    ///
    /// # Panics
    ///
    /// Panics if `attr` is not of kind [`AttributeKind::Flag`].
    pub fn flag_mut(&mut self, attr: Attribute) -> &mut bool {
        match attr {
            Attribute::HasRemote => &mut self.has_remote,
            Attribute::HasStash => &mut self.has_stash,
            Attribute::IsDirty => &mut self.is_dirty,
            Attribute::HasAdded => &mut self.has_added,
            Attribute::HasModified => &mut self.has_modified,
            Attribute::HasDeleted => &mut self.has_deleted,
            Attribute::HasRenamed => &mut self.has_renamed,
            Attribute::HasUnmerged => &mut self.has_unmerged,
            Attribute::HasUntracked => &mut self.has_untracked,
            _ => panic!("{attr} is not a flag attribute"),
        }
    }

    /// Mutable access to a count attribute.
    ///
    /// # Panics
    ///
    /// Panics if `attr` is not of kind [`AttributeKind::Count`].
    pub fn count_mut(&mut self, attr: Attribute) -> &mut usize {
        match attr {
            Attribute::CommitsAhead => &mut self.commits_ahead,
            Attribute::CommitsBehind => &mut self.commits_behind,
            Attribute::StashCount => &mut self.stash_count,
            Attribute::Added => &mut self.added,
            Attribute::Modified => &mut self.modified,
            Attribute::Deleted => &mut self.deleted,
            Attribute::Renamed => &mut self.renamed,
            Attribute::Unmerged => &mut self.unmerged,
            _ => panic!("{attr} is not a count attribute"),
        }
    }

    pub fn has(&self, category: Category) -> bool {
        self.get_attr(category.flag()).as_flag().unwrap_or(false)
    }

    pub fn count(&self, category: Category) -> usize {
        self.get_attr(category.count()).as_count().unwrap_or(0)
    }

    /// Attributes holding a non-zero value.
    pub fn non_zero(&self) -> AttributeSet {
        Attribute::ALL
            .into_iter()
            .filter(|attr| !self.get_attr(*attr).is_zero())
            .collect()
    }
}
