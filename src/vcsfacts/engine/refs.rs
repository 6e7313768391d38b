//! Lookups that do not need a status scan: revision, branch, tag, upstream,
//! stash and repository state.
//!
//! A failing backend call is logged and leaves its attributes at zero; the
//! remaining lookups still run.

use crate::attributes::{Attribute, AttributeSet};
use crate::backend::{RepoHandle, Revision, TagInfo};
use crate::deadline::Deadline;
use crate::model::FactRecord;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::fmt::Display;
use tracing::{debug, warn};

fn skipped(what: &str, error: impl Display) {
    warn!(lookup = what, error = %error, "backend lookup failed, skipping");
}

/// Fill in every non-status attribute of `lookup`.
pub fn lookup_refs<R: RepoHandle>(
    repo: &R,
    lookup: AttributeSet,
    deadline: Deadline,
    found: &mut FactRecord,
) {
    let head = if lookup.contains_any(&[
        Attribute::RevisionShort,
        Attribute::Tag,
        Attribute::CommitsAhead,
        Attribute::CommitsBehind,
    ]) {
        match repo.head() {
            Ok(head) => head,
            Err(e) => {
                skipped("head", e);
                None
            }
        }
    } else {
        None
    };

    if lookup.contains(Attribute::RevisionShort) {
        if let Some(head) = &head {
            found.revision_short = head.short().to_string();
        }
    }

    if lookup.contains(Attribute::Branch) {
        match repo.current_branch() {
            Ok(branch) => found.branch = branch.unwrap_or_default(),
            Err(e) => skipped("branch", e),
        }
    }

    if lookup.contains(Attribute::HasRemote) && !found.branch.is_empty() {
        remote(repo, lookup, head.as_ref(), deadline, found);
    }

    if lookup.contains(Attribute::Tag) {
        if let Some(head) = &head {
            if deadline.expired() {
                debug!("deadline expired, skipping tag lookup");
            } else {
                found.tag = nearest_tag(repo, head, deadline).unwrap_or_default();
            }
        }
    }

    if lookup.contains(Attribute::State) {
        match repo.state() {
            Ok(state) => found.state = state,
            Err(e) => skipped("state", e),
        }
    }

    if lookup.contains(Attribute::HasStash) {
        stashes(repo, lookup, found);
    }
}

fn remote<R: RepoHandle>(
    repo: &R,
    lookup: AttributeSet,
    head: Option<&Revision>,
    deadline: Deadline,
    found: &mut FactRecord,
) {
    let upstream = match repo.upstream(&found.branch) {
        Ok(Some(upstream)) => upstream,
        Ok(None) => return,
        Err(e) => return skipped("upstream", e),
    };
    found.has_remote = true;
    debug!(upstream = %upstream.name, "branch has upstream");

    if !lookup.contains_any(&[Attribute::CommitsAhead, Attribute::CommitsBehind]) {
        return;
    }
    let Some(head) = head else {
        return;
    };
    if deadline.expired() {
        debug!("deadline expired, skipping ahead/behind");
        return;
    }
    match repo.ahead_behind(head, &upstream.target) {
        Ok((ahead, behind)) => {
            if lookup.contains(Attribute::CommitsAhead) {
                found.commits_ahead = ahead;
            }
            if lookup.contains(Attribute::CommitsBehind) {
                found.commits_behind = behind;
            }
        }
        Err(e) => skipped("ahead-behind", e),
    }
}

/// Index annotated tags by the commit they point at. Among tags on the
/// same commit the most recently annotated wins, first seen on ties.
pub fn index_tags(tags: Vec<TagInfo>) -> HashMap<Revision, (String, DateTime<Utc>)> {
    let mut index: HashMap<Revision, (String, DateTime<Utc>)> = HashMap::new();
    for tag in tags {
        let Some(at) = tag.annotated_at else {
            continue;
        };
        let newer = index
            .get(&tag.target)
            .map_or(true, |(_, best)| at > *best);
        if newer {
            index.insert(tag.target, (tag.name, at));
        }
    }
    index
}

fn nearest_tag<R: RepoHandle>(repo: &R, head: &Revision, deadline: Deadline) -> Option<String> {
    let tags = match repo.tags() {
        Ok(tags) => index_tags(tags),
        Err(e) => {
            skipped("tags", e);
            return None;
        }
    };
    if tags.is_empty() {
        return None;
    }
    if let Some((name, _)) = tags.get(head) {
        return Some(name.clone());
    }

    let history = match repo.walk_history(deadline) {
        Ok(history) => history,
        Err(e) => {
            skipped("history", e);
            return None;
        }
    };
    for rev in history {
        if deadline.expired() {
            debug!("deadline expired during history walk");
            return None;
        }
        match rev {
            Ok(rev) => {
                if let Some((name, _)) = tags.get(&rev) {
                    return Some(name.clone());
                }
            }
            Err(e) => {
                skipped("history", e);
                return None;
            }
        }
    }
    None
}

fn stashes<R: RepoHandle>(repo: &R, lookup: AttributeSet, found: &mut FactRecord) {
    let entries = match repo.stashes() {
        Ok(entries) => entries,
        Err(e) => return skipped("stashes", e),
    };
    let count = lookup.contains(Attribute::StashCount);
    for entry in entries {
        if let Err(e) = entry {
            return skipped("stashes", e);
        }
        found.has_stash = true;
        if !count {
            break;
        }
        found.stash_count += 1;
    }
}
