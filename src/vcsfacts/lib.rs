//! # vcsfacts Architecture
//!
//! vcsfacts computes a compact snapshot of a repository's state (branch, tag,
//! dirty status, ahead/behind counts, stashes, per-category file changes,
//! merge/rebase state) for shell prompts. It runs on every prompt redraw, so
//! the whole design is about doing **only the work the caller asked for**.
//!
//! Callers declare which facts they want; the library returns exactly those,
//! with everything else at its zero value.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, merges config, renders output          │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over the engine                              │
//! │  - Logs audit notices, returns an Outcome                   │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Engine (engine/)                                           │
//! │  - resolve → plan → classify → normalize                    │
//! │  - Pure decision logic, no VCS specifics                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Backend Layer (backend/)                                   │
//! │  - VcsBackend / RepoHandle traits                           │
//! │  - GitBackend (production), MemBackend (testing)            │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Key Principle: No I/O Assumptions in Core
//!
//! From `api.rs` inward, code never writes to stdout/stderr and never exits
//! the process. Diagnostics go through `tracing`; backend failures are logged
//! and leave the affected facts at zero instead of failing the call.
//!
//! ## Testing Strategy
//!
//! 1. **Engine** (`engine/*.rs`): unit tests against [`backend::memory::MemBackend`],
//!    which also records how much work each request caused.
//! 2. **Git backend** (`tests/git_backend.rs`): scratch repositories built with `git2`.
//! 3. **Properties** (`tests/properties.rs`): normalizer and resolver invariants.
//! 4. **CLI** (`tests/cli.rs`): the binary end to end.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`engine`]: Resolution, scan planning, classification, normalization, audit
//! - [`backend`]: Backend traits and implementations
//! - [`attributes`]: Attribute registry, sets and values
//! - [`model`]: `FactRecord`, `Request`, `Options` and enums
//! - [`config`]: Configuration management
//! - [`deadline`]: Optional time limit for one invocation
//! - [`error`]: Error types
//! - `cli`: Argument parsing, logging setup and rendering for the binary (not part of the lib API)

pub mod api;
pub mod attributes;
pub mod backend;
pub mod config;
pub mod deadline;
pub mod engine;
pub mod error;
pub mod model;
