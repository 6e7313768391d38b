//! # Fact Engine
//!
//! Turns a [`Request`] into facts about one repository, doing as little
//! backend work as the request allows.
//!
//! ```text
//! wanted ──► resolve ──► lookup ──┬──► refs::lookup_refs ──┐
//!                                 │                        ├──► found ──► normalize ──► result
//!                                 └──► plan ──► Classifier ┘
//!                                                          └──► audit (debug notices)
//! ```
//!
//! 1. [`resolve`] closes the wanted set over the implication table.
//! 2. [`lookup_refs`] answers everything that needs no status scan.
//! 3. [`plan`] picks the scans, [`Classifier`] consumes their entries and may
//!    stop early.
//! 4. The lookup set is widened by what the scans fetched as a side effect.
//! 5. [`Facts::result`] derives and filters; [`Facts::audit`] reports
//!    findings nobody looked up.

use crate::attributes::AttributeSet;
use crate::backend::VcsBackend;
use crate::deadline::Deadline;
use crate::model::{FactRecord, Request};
use std::path::Path;
use tracing::{debug, warn};

mod audit;
mod classify;
mod normalize;
mod plan;
mod refs;
mod resolve;

pub use audit::{audit, AuditNotice};
pub use classify::{classify, Changes, Classifier, ScanOutcome, Verdict};
pub use normalize::{derive, filter, normalize};
pub use plan::{fetched, plan, scan_spec, Rule, RULES};
pub use refs::{index_tags, lookup_refs};
pub use resolve::resolve;

/// Everything learned in one invocation.
#[derive(Debug, Clone)]
pub struct Facts {
    pub request: Request,
    /// Attributes looked up, including what scans fetched as a side effect
    pub lookup: AttributeSet,
    /// Raw findings, before derive and filter
    pub found: FactRecord,
    pub scan_outcome: ScanOutcome,
}

impl Facts {
    /// The record handed to callers: derived, then cut down to the wanted set.
    pub fn result(&self) -> FactRecord {
        normalize(&self.found, self.request.wanted, &self.request.options)
    }

    pub fn audit(&self) -> Vec<AuditNotice> {
        audit(self.lookup, &self.found)
    }
}

/// Gather facts for the repository containing `path`.
///
/// Returns `None` when `path` is not inside a repository. Backend failures
/// never surface here: they are logged and the affected attributes stay zero.
pub fn gather<B: VcsBackend>(
    backend: &B,
    path: &Path,
    request: &Request,
    deadline: Deadline,
) -> Option<Facts> {
    let mut lookup = resolve(request.wanted);
    debug!(wanted = ?request.wanted, lookup = ?lookup, "resolved lookup set");

    let repo = match backend.open(path) {
        Ok(Some(repo)) => repo,
        Ok(None) => {
            debug!(path = %path.display(), "not a repository");
            return None;
        }
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to open repository");
            return None;
        }
    };

    let mut found = FactRecord {
        vcs: backend.vcs(),
        ..FactRecord::default()
    };

    lookup_refs(&repo, lookup, deadline, &mut found);

    let scans = plan(lookup, &request.options);
    debug!(scans = ?scans, "status scans planned");
    let scan_outcome =
        Classifier::new(lookup, request.options, &mut found).run(&repo, &scans, deadline);
    debug!(outcome = ?scan_outcome, "status scans finished");
    lookup = lookup.union(fetched(&scans));

    Some(Facts {
        request: *request,
        lookup,
        found,
        scan_outcome,
    })
}
