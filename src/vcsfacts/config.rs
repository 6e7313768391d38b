//! # Configuration
//!
//! Settings are loaded with [`confique`], layered in priority order:
//! 1. **Command line**: flags override everything (applied by the CLI).
//! 2. **Environment variables**: `VCSFACTS_DIRTY_IF_UNTRACKED`, `VCSFACTS_TIMEOUT_MS`, etc.
//! 3. **Config file**: `config.toml` in the OS-appropriate config directory
//!    (via `directories`), or the file given with `--config`. A missing file
//!    is not an error.
//! 4. **Compiled defaults**: via `#[config(default = ...)]`.
//!
//! ## Available Settings
//!
//! | Key | Default | Description |
//! |-----|---------|-------------|
//! | `dirty_if_untracked` | `true` | Untracked files make the repository dirty |
//! | `renames_from_rewrites` | `false` | Also detect renames from rewrites |
//! | `include_submodules` | `false` | Include submodules in status scans |
//! | `timeout_ms` | none | Give up gathering after this many milliseconds |
//! | `attributes` | none | Attributes to report when none are named on the command line |

use crate::error::Result;
use crate::model::Options;
use confique::Config;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "config.toml";

/// Configuration for vcsfacts, stored in `config.toml`.
#[derive(Config, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct FactsConfig {
    /// Untracked (not ignored) files make the repository dirty
    #[config(default = true, env = "VCSFACTS_DIRTY_IF_UNTRACKED")]
    pub dirty_if_untracked: bool,

    /// Also detect renames from content rewrites
    #[config(default = false, env = "VCSFACTS_RENAMES_FROM_REWRITES")]
    pub renames_from_rewrites: bool,

    /// Include submodules in status scans
    #[config(default = false, env = "VCSFACTS_INCLUDE_SUBMODULES")]
    pub include_submodules: bool,

    /// Stop gathering after this many milliseconds
    #[config(env = "VCSFACTS_TIMEOUT_MS")]
    pub timeout_ms: Option<u64>,

    /// Attribute names reported when the command line names none
    pub attributes: Option<Vec<String>>,
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            dirty_if_untracked: true,
            renames_from_rewrites: false,
            include_submodules: false,
            timeout_ms: None,
            attributes: None,
        }
    }
}

impl FactsConfig {
    /// Default location of the config file, if the platform has one.
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "vcsfacts").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    /// Load from the environment and `path` (or the default location).
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut builder = Self::builder().env();
        if let Some(file) = path.map(Path::to_path_buf).or_else(Self::default_path) {
            builder = builder.file(file);
        }
        Ok(builder.load()?)
    }

    pub fn options(&self) -> Options {
        Options {
            dirty_if_untracked: self.dirty_if_untracked,
            renames_from_rewrites: self.renames_from_rewrites,
            include_submodules: self.include_submodules,
        }
    }
}
