//! Scan planning.
//!
//! Status scans are the expensive part of fact gathering. The planner picks
//! the cheapest sequence of scans that can answer the looked-up attributes:
//! the first rule in [`RULES`] whose predicate holds decides the scans, and
//! [`scan_spec`] fills in the flags for each of them.
//!
//! | Looked up | Scans |
//! |-----------|-------|
//! | any count, or modified/deleted/renamed/unmerged flag | combined |
//! | `has-added` and `has-untracked` | combined |
//! | `dirty` and `has-added` | combined |
//! | `dirty` and `has-untracked` | workdir, then index |
//! | `dirty` | index, then workdir |
//! | `has-added` | index |
//! | `has-untracked` | workdir |

use crate::attributes::{Attribute, AttributeSet, COUNT_ATTRS};
use crate::backend::{ScanShow, ScanSpec};
use crate::model::Options;

use crate::attributes::Attribute::{
    HasAdded, HasDeleted, HasModified, HasRenamed, HasUnmerged, HasUntracked, IsDirty,
};
use crate::backend::ScanShow::{IndexAndWorkdir, IndexOnly, WorkdirOnly};

/// One row of the planning table.
pub struct Rule {
    pub name: &'static str,
    pub applies: fn(AttributeSet) -> bool,
    pub shows: &'static [ScanShow],
}

fn needs_full_scan(lookup: AttributeSet) -> bool {
    lookup.contains_any(&COUNT_ATTRS)
        || lookup.contains_any(&[HasModified, HasDeleted, HasRenamed, HasUnmerged])
}

fn added_and_untracked(lookup: AttributeSet) -> bool {
    lookup.contains(HasAdded) && lookup.contains(HasUntracked)
}

fn dirty_and_added(lookup: AttributeSet) -> bool {
    lookup.contains(IsDirty) && lookup.contains(HasAdded)
}

fn dirty_and_untracked(lookup: AttributeSet) -> bool {
    lookup.contains(IsDirty) && lookup.contains(HasUntracked)
}

fn dirty(lookup: AttributeSet) -> bool {
    lookup.contains(IsDirty)
}

fn added(lookup: AttributeSet) -> bool {
    lookup.contains(HasAdded)
}

fn untracked(lookup: AttributeSet) -> bool {
    lookup.contains(HasUntracked)
}

/// Planning table, first match wins. No match means no scan.
pub const RULES: &[Rule] = &[
    Rule {
        name: "full",
        applies: needs_full_scan,
        shows: &[IndexAndWorkdir],
    },
    Rule {
        name: "added+untracked",
        applies: added_and_untracked,
        shows: &[IndexAndWorkdir],
    },
    Rule {
        name: "dirty+added",
        applies: dirty_and_added,
        shows: &[IndexAndWorkdir],
    },
    Rule {
        name: "dirty+untracked",
        applies: dirty_and_untracked,
        shows: &[WorkdirOnly, IndexOnly],
    },
    Rule {
        name: "dirty",
        applies: dirty,
        shows: &[IndexOnly, WorkdirOnly],
    },
    Rule {
        name: "added",
        applies: added,
        shows: &[IndexOnly],
    },
    Rule {
        name: "untracked",
        applies: untracked,
        shows: &[WorkdirOnly],
    },
];

/// The ordered scans needed to answer `lookup`.
pub fn plan(lookup: AttributeSet, options: &Options) -> Vec<ScanSpec> {
    RULES
        .iter()
        .find(|rule| (rule.applies)(lookup))
        .map(|rule| {
            tracing::debug!(rule = rule.name, "scan plan selected");
            rule.shows
                .iter()
                .map(|show| scan_spec(*show, lookup, options))
                .collect()
        })
        .unwrap_or_default()
}

/// Flags for one scan of the plan.
pub fn scan_spec(show: ScanShow, lookup: AttributeSet, options: &Options) -> ScanSpec {
    let wants_untracked = lookup.contains(HasUntracked)
        || (lookup.contains(IsDirty) && options.dirty_if_untracked);
    let detect_renames = lookup.contains(HasRenamed);
    ScanSpec {
        show,
        include_untracked: show.touches_workdir() && wants_untracked,
        detect_renames,
        renames_from_rewrites: detect_renames && options.renames_from_rewrites,
        exclude_submodules: !options.include_submodules,
    }
}

/// Attributes a set of scans resolves as a side effect.
///
/// Merged into the lookup set after scanning so that categories a scan
/// necessarily reports are not flagged by the audit.
pub fn fetched(scans: &[ScanSpec]) -> AttributeSet {
    let mut set = AttributeSet::empty();
    for scan in scans {
        for attr in [
            HasModified,
            Attribute::Modified,
            HasDeleted,
            Attribute::Deleted,
            HasRenamed,
            Attribute::Renamed,
            HasUnmerged,
            Attribute::Unmerged,
        ] {
            set.insert(attr);
        }
        if scan.show.touches_index() {
            set.insert(HasAdded);
            set.insert(Attribute::Added);
        }
        if scan.include_untracked {
            set.insert(HasUntracked);
        }
    }
    set
}
