//! Status entry classification.
//!
//! Each status entry carries index-side and workdir-side flags. Both sides are
//! folded into one logical category, and every flag bit is attributed to
//! exactly one category, in the precedence order of [`Category::ALL`]:
//!
//! | Category | Bits |
//! |----------|------|
//! | added | `INDEX_NEW` |
//! | modified | `INDEX_MODIFIED`, `INDEX_TYPECHANGE`, `WT_MODIFIED`, `WT_TYPECHANGE` |
//! | deleted | `INDEX_DELETED`, `WT_DELETED` |
//! | renamed | `INDEX_RENAMED`, `WT_RENAMED` |
//! | unmerged | `CONFLICTED` |
//!
//! `WT_NEW` marks the path untracked. An entry can count toward several
//! categories (e.g. staged as new, then modified in the working tree), but
//! only once toward each.

use crate::attributes::{Attribute, AttributeSet, Category, COUNT_ATTRS};
use crate::backend::{RepoHandle, ScanSpec, StatusBits, StatusEntry};
use crate::deadline::Deadline;
use crate::model::{FactRecord, Options};
use tracing::{debug, warn};

const CATEGORY_BITS: [(Category, StatusBits); 5] = [
    (Category::Added, StatusBits::INDEX_NEW),
    (
        Category::Modified,
        StatusBits::from_bits(
            StatusBits::INDEX_MODIFIED.bits()
                | StatusBits::INDEX_TYPECHANGE.bits()
                | StatusBits::WT_MODIFIED.bits()
                | StatusBits::WT_TYPECHANGE.bits(),
        ),
    ),
    (
        Category::Deleted,
        StatusBits::from_bits(StatusBits::INDEX_DELETED.bits() | StatusBits::WT_DELETED.bits()),
    ),
    (
        Category::Renamed,
        StatusBits::from_bits(StatusBits::INDEX_RENAMED.bits() | StatusBits::WT_RENAMED.bits()),
    ),
    (Category::Unmerged, StatusBits::CONFLICTED),
];

/// What one status entry contributes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Changes {
    categories: [bool; 5],
    pub untracked: bool,
}

impl Changes {
    pub fn contains(&self, category: Category) -> bool {
        self.categories[category.index()]
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        Category::ALL
            .into_iter()
            .filter(move |category| self.contains(*category))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Ignored,
    /// No change at all
    Current,
    /// Carries bits outside the known set
    Unknown(StatusBits),
    Changed(Changes),
}

pub fn classify(status: StatusBits) -> Verdict {
    if status.contains(StatusBits::IGNORED) {
        return Verdict::Ignored;
    }
    if status.is_empty() {
        return Verdict::Current;
    }

    let mut rest = status;
    let mut changes = Changes::default();
    for (category, bits) in CATEGORY_BITS {
        if rest.intersects(bits) {
            changes.categories[category.index()] = true;
            rest.remove(bits);
        }
    }
    if rest.intersects(StatusBits::WT_NEW) {
        changes.untracked = true;
        rest.remove(StatusBits::WT_NEW);
    }

    if rest.is_empty() {
        Verdict::Changed(changes)
    } else {
        Verdict::Unknown(rest)
    }
}

/// How a run of status scans ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Every planned scan was consumed in full
    Complete,
    /// Every wanted flag was answered before the end
    Satisfied,
    TimedOut,
    Failed,
}

/// Accumulates status entries into a [`FactRecord`].
pub struct Classifier<'a> {
    lookup: AttributeSet,
    options: Options,
    found: &'a mut FactRecord,
    needs_counts: bool,
}

impl<'a> Classifier<'a> {
    pub fn new(lookup: AttributeSet, options: Options, found: &'a mut FactRecord) -> Self {
        Self {
            lookup,
            options,
            found,
            needs_counts: lookup.contains_any(&COUNT_ATTRS),
        }
    }

    /// Run the planned scans in order, stopping early when possible.
    ///
    /// A scan that fails drops the partial counters and the next scan still
    /// runs. The run is `Failed` when the last failure was not followed by a
    /// scan that finished.
    pub fn run<R: RepoHandle>(
        &mut self,
        repo: &R,
        scans: &[ScanSpec],
        deadline: Deadline,
    ) -> ScanOutcome {
        let mut failed = false;
        'scans: for spec in scans {
            if deadline.expired() {
                self.abandon("deadline expired");
                return ScanOutcome::TimedOut;
            }
            let entries = match repo.status_scan(spec, deadline) {
                Ok(entries) => entries,
                Err(e) => {
                    warn!(show = ?spec.show, error = %e, "status scan failed");
                    self.abandon("status scan failed");
                    failed = true;
                    continue;
                }
            };
            for entry in entries {
                if deadline.expired() {
                    self.abandon("deadline expired");
                    return ScanOutcome::TimedOut;
                }
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(e) => {
                        warn!(show = ?spec.show, error = %e, "reading status entry failed");
                        self.abandon("status scan failed");
                        failed = true;
                        continue 'scans;
                    }
                };
                if self.accept(&entry) && self.satisfied() {
                    self.abandon("wanted flags satisfied");
                    return ScanOutcome::Satisfied;
                }
            }
            failed = false;
        }
        if failed {
            ScanOutcome::Failed
        } else {
            ScanOutcome::Complete
        }
    }

    /// Count one entry. Returns whether it counted toward anything.
    pub fn accept(&mut self, entry: &StatusEntry) -> bool {
        match classify(entry.status) {
            Verdict::Ignored => false,
            Verdict::Current => {
                debug!(path = %entry.path, "unchanged entry in status scan");
                false
            }
            Verdict::Unknown(bits) => {
                warn!(path = %entry.path, status = ?bits, "unknown status flags, entry skipped");
                false
            }
            Verdict::Changed(changes) => {
                for category in changes.categories() {
                    *self.found.count_mut(category.count()) += 1;
                    *self.found.flag_mut(category.flag()) = true;
                }
                if changes.untracked {
                    self.found.has_untracked = true;
                }
                true
            }
        }
    }

    fn dirty_so_far(&self) -> bool {
        Category::ALL.into_iter().any(|c| self.found.has(c))
            || (self.found.has_untracked && self.options.dirty_if_untracked)
    }

    /// Whether every looked-up flag is already answered.
    ///
    /// Never true while counts are needed: a count is only exact once every
    /// entry has been seen.
    pub fn satisfied(&self) -> bool {
        if self.needs_counts {
            return false;
        }
        if self.lookup.contains(Attribute::IsDirty) && !self.dirty_so_far() {
            return false;
        }
        let categories_found = Category::ALL
            .into_iter()
            .filter(|c| self.lookup.contains(c.flag()))
            .all(|c| self.found.has(c));
        let untracked_found =
            !self.lookup.contains(Attribute::HasUntracked) || self.found.has_untracked;
        categories_found && untracked_found
    }

    /// Counters are partial at this point and reset to zero.
    fn abandon(&mut self, reason: &str) {
        debug!(reason, "status counters reset");
        for attr in COUNT_ATTRS {
            *self.found.count_mut(attr) = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::memory::{MemBackend, MemOp, MemRepo};
    use crate::backend::{ScanShow, VcsBackend};
    use crate::engine::{plan, resolve};
    use std::path::Path;

    fn changes(status: StatusBits) -> Vec<Category> {
        match classify(status) {
            Verdict::Changed(changes) => changes.categories().collect(),
            other => panic!("expected changes, got {:?}", other),
        }
    }

    #[test]
    fn index_and_workdir_fold_into_one_category() {
        assert_eq!(changes(StatusBits::INDEX_MODIFIED), vec![Category::Modified]);
        assert_eq!(changes(StatusBits::WT_MODIFIED), vec![Category::Modified]);
        assert_eq!(
            changes(StatusBits::INDEX_MODIFIED | StatusBits::WT_MODIFIED),
            vec![Category::Modified]
        );
        assert_eq!(changes(StatusBits::WT_TYPECHANGE), vec![Category::Modified]);
        assert_eq!(changes(StatusBits::WT_DELETED), vec![Category::Deleted]);
        assert_eq!(changes(StatusBits::INDEX_RENAMED), vec![Category::Renamed]);
    }

    #[test]
    fn entry_counts_toward_several_categories() {
        assert_eq!(
            changes(StatusBits::INDEX_NEW | StatusBits::WT_DELETED),
            vec![Category::Added, Category::Deleted]
        );
        assert_eq!(
            changes(StatusBits::CONFLICTED | StatusBits::INDEX_MODIFIED),
            vec![Category::Modified, Category::Unmerged]
        );
    }

    #[test]
    fn untracked_is_not_a_category() {
        match classify(StatusBits::WT_NEW) {
            Verdict::Changed(changes) => {
                assert!(changes.untracked);
                assert_eq!(changes.categories().count(), 0);
            }
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn skipped_entries() {
        assert_eq!(classify(StatusBits::IGNORED), Verdict::Ignored);
        assert_eq!(classify(StatusBits::IGNORED | StatusBits::WT_NEW), Verdict::Ignored);
        assert_eq!(classify(StatusBits::CURRENT), Verdict::Current);
        assert_eq!(
            classify(StatusBits::WT_UNREADABLE | StatusBits::WT_MODIFIED),
            Verdict::Unknown(StatusBits::WT_UNREADABLE)
        );
        let odd = StatusBits::from_bits(1 << 14);
        assert_eq!(classify(odd), Verdict::Unknown(odd));
    }

    fn run(repo: MemRepo, wanted: &[Attribute], options: Options) -> (FactRecord, ScanOutcome, MemBackend) {
        let backend = MemBackend::new(repo);
        let handle = backend.open(Path::new(".")).unwrap().unwrap();
        let lookup = resolve(wanted.iter().copied().collect());
        let scans = plan(lookup, &options);
        let mut found = FactRecord::default();
        let outcome = Classifier::new(lookup, options, &mut found).run(&handle, &scans, Deadline::none());
        drop(handle);
        (found, outcome, backend)
    }

    #[test]
    fn counts_need_every_entry() {
        let repo = MemRepo::new()
            .entry("a", StatusBits::INDEX_NEW)
            .entry("b", StatusBits::INDEX_NEW)
            .entry("c", StatusBits::WT_MODIFIED)
            .entry("d", StatusBits::IGNORED);
        let (found, outcome, backend) = run(repo, &[Attribute::Added], Options::default());
        assert_eq!(outcome, ScanOutcome::Complete);
        assert_eq!(found.added, 2);
        assert!(found.has_added);
        assert_eq!(found.modified, 1);
        assert_eq!(backend.repo().unwrap().entries_yielded(), 3);
    }

    #[test]
    fn flag_only_request_exits_at_first_match() {
        let repo = MemRepo::new()
            .entry("a", StatusBits::INDEX_NEW)
            .entry("b", StatusBits::INDEX_NEW)
            .entry("c", StatusBits::INDEX_NEW);
        let (found, outcome, backend) = run(repo, &[Attribute::HasAdded], Options::default());
        assert_eq!(outcome, ScanOutcome::Satisfied);
        assert!(found.has_added);
        assert_eq!(found.added, 0);
        assert_eq!(backend.repo().unwrap().entries_yielded(), 1);
    }

    #[test]
    fn dirty_stops_before_the_second_scan() {
        let repo = MemRepo::new()
            .entry("staged", StatusBits::INDEX_MODIFIED)
            .entry("new", StatusBits::WT_NEW);
        let (found, outcome, backend) = run(repo, &[Attribute::IsDirty], Options::default());
        assert_eq!(outcome, ScanOutcome::Satisfied);
        assert!(found.has_modified);
        let scans = backend.repo().unwrap().scans();
        assert_eq!(scans.len(), 1);
        assert_eq!(scans[0].show, ScanShow::IndexOnly);
    }

    #[test]
    fn untracked_only_counts_as_dirty_under_policy() {
        let repo = || MemRepo::new().entry("a.txt", StatusBits::WT_NEW);

        let (found, outcome, _) = run(repo(), &[Attribute::IsDirty], Options::default());
        assert_eq!(outcome, ScanOutcome::Satisfied);
        assert!(found.has_untracked);

        let options = Options {
            dirty_if_untracked: false,
            ..Options::default()
        };
        let (found, outcome, backend) = run(repo(), &[Attribute::IsDirty], options);
        assert_eq!(outcome, ScanOutcome::Complete);
        assert!(!found.has_untracked);
        assert_eq!(backend.repo().unwrap().scans().len(), 2);
    }

    #[test]
    fn unknown_entries_do_not_count() {
        let repo = MemRepo::new()
            .entry("odd", StatusBits::WT_UNREADABLE)
            .entry("real", StatusBits::WT_MODIFIED);
        let (found, outcome, _) = run(repo, &[Attribute::Modified], Options::default());
        assert_eq!(outcome, ScanOutcome::Complete);
        assert_eq!(found.modified, 1);
    }

    #[test]
    fn failed_scan_resets_counts() {
        let repo = MemRepo::new()
            .entry("a", StatusBits::INDEX_NEW)
            .fail(MemOp::Status);
        let (found, outcome, _) = run(repo, &[Attribute::Added], Options::default());
        assert_eq!(outcome, ScanOutcome::Failed);
        assert_eq!(found, FactRecord::default());
    }

    #[test]
    fn failed_index_scan_still_runs_the_workdir_scan() {
        let repo = MemRepo::new()
            .entry("edited", StatusBits::WT_MODIFIED)
            .fail_scan(ScanShow::IndexOnly);
        let (found, outcome, backend) = run(repo, &[Attribute::IsDirty], Options::default());
        assert_eq!(outcome, ScanOutcome::Satisfied);
        assert!(found.has_modified);
        let shows: Vec<ScanShow> = backend.repo().unwrap().scans().iter().map(|s| s.show).collect();
        assert_eq!(shows, vec![ScanShow::IndexOnly, ScanShow::WorkdirOnly]);
    }

    #[test]
    fn failure_counts_only_when_no_later_scan_finishes() {
        let repo = MemRepo::new()
            .entry("new", StatusBits::WT_NEW)
            .fail_scan(ScanShow::IndexOnly);
        let options = Options {
            dirty_if_untracked: false,
            ..Options::default()
        };
        let (found, outcome, _) = run(repo, &[Attribute::IsDirty], options);
        assert_eq!(outcome, ScanOutcome::Complete);
        assert!(!found.has_modified);

        let repo = MemRepo::new()
            .entry("staged", StatusBits::INDEX_NEW)
            .fail_scan(ScanShow::IndexAndWorkdir);
        let (found, outcome, _) = run(repo, &[Attribute::Added], Options::default());
        assert_eq!(outcome, ScanOutcome::Failed);
        assert_eq!(found.added, 0);
    }

    #[test]
    fn expired_deadline_stops_scanning() {
        let backend = MemBackend::new(MemRepo::new().entry("a", StatusBits::INDEX_NEW));
        let handle = backend.open(Path::new(".")).unwrap().unwrap();
        let lookup = resolve(AttributeSet::from([Attribute::Added]));
        let scans = plan(lookup, &Options::default());
        let mut found = FactRecord::default();
        let outcome = Classifier::new(lookup, Options::default(), &mut found).run(
            &handle,
            &scans,
            Deadline::from_millis(Some(0)),
        );
        assert_eq!(outcome, ScanOutcome::TimedOut);
        assert_eq!(found.added, 0);
        assert!(backend.repo().unwrap().scans().is_empty());
    }
}
