//! # API Facade
//!
//! The API layer is a **thin facade** over the engine and the single entry
//! point for callers, whatever the UI.
//!
//! The facade:
//! - **Runs** the engine against its backend
//! - **Reports** audit notices through `tracing` (target `vcsfacts::audit`)
//! - **Returns structured types**: an [`Outcome`], never strings
//!
//! It does no I/O of its own: rendering belongs to the CLI.
//!
//! ## Generic Over VcsBackend
//!
//! `FactsApi<B: VcsBackend>` is generic over the backend:
//! - Production: `FactsApi<GitBackend>`
//! - Testing: `FactsApi<MemBackend>`

use crate::backend::git::GitBackend;
use crate::backend::VcsBackend;
use crate::deadline::Deadline;
use crate::engine::{self, Facts};
use crate::model::{FactRecord, Request};
use std::path::Path;
use tracing::debug;

/// Result of one invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The path is not inside a repository; callers typically print nothing.
    NotARepository,
    Facts(FactRecord),
}

impl Outcome {
    pub fn facts(&self) -> Option<&FactRecord> {
        match self {
            Outcome::Facts(record) => Some(record),
            Outcome::NotARepository => None,
        }
    }
}

pub struct FactsApi<B: VcsBackend> {
    backend: B,
}

impl FactsApi<GitBackend> {
    pub fn git() -> Self {
        Self::new(GitBackend::new())
    }
}

impl<B: VcsBackend> FactsApi<B> {
    pub fn new(backend: B) -> Self {
        Self { backend }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Facts wanted by `request` for the repository containing `path`.
    pub fn facts(&self, path: &Path, request: &Request, deadline: Deadline) -> Outcome {
        match self.gather(path, request, deadline) {
            Some(facts) => Outcome::Facts(facts.result()),
            None => Outcome::NotARepository,
        }
    }

    /// Like [`FactsApi::facts`], but keeps the raw findings and lookup set.
    pub fn gather(&self, path: &Path, request: &Request, deadline: Deadline) -> Option<Facts> {
        let facts = engine::gather(&self.backend, path, request, deadline)?;
        for notice in facts.audit() {
            debug!(target: "vcsfacts::audit", attribute = %notice.attr, value = %notice.value, "{}", notice);
        }
        Some(facts)
    }
}
