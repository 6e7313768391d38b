//! # vcsfacts CLI
//!
//! The binary is intentionally thin: the CLI lives in `src/cli/`, while this
//! file only invokes `cli::run()` and maps the outcome to an exit code.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/)                                           │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - tracing subscriber on stderr (logging.rs)                │
//! │  - name=value / JSON output (render.rs)                     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (vcsfacts::api)                                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```

use vcsfacts::api::Outcome;

mod cli;

fn main() {
    match cli::run() {
        Ok(Outcome::Facts(_)) => {}
        Ok(Outcome::NotARepository) => std::process::exit(1),
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(2);
        }
    }
}
