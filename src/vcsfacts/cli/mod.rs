//! # CLI Behavior
//!
//! This is **one possible client** of the library. It is the only place that
//! knows about stdout, stderr and exit codes.
//!
//! ## Attribute Selection
//!
//! Priority order:
//! 1. `-a/--attributes NAMES` (comma separated, repeatable)
//! 2. `--all`
//! 3. `attributes` in the config file
//! 4. `branch,dirty`
//!
//! ## Options
//!
//! Detection flags override the config, which overrides compiled defaults.
//! `--ignore-untracked` turns `dirty_if_untracked` off.
//!
//! ## Exit Codes
//!
//! - `0`: facts printed
//! - `1`: not inside a repository (nothing printed)
//! - `2`: error (message on stderr)

mod logging;
mod render;
mod setup;

use clap::Parser;
use logging::Verbosity;
use setup::{Cli, DEFAULT_ATTRIBUTES};
use std::io::Write;
use vcsfacts::api::{FactsApi, Outcome};
use vcsfacts::attributes::AttributeSet;
use vcsfacts::config::FactsConfig;
use vcsfacts::deadline::Deadline;
use vcsfacts::error::{FactsError, Result};
use vcsfacts::model::{Options, Request};

pub fn run() -> Result<Outcome> {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    if let Some(path) = &cli.config {
        if !path.is_file() {
            return Err(FactsError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("config file not found: {}", path.display()),
            )));
        }
    }
    let config = FactsConfig::load(cli.config.as_deref())?;

    let request = Request::new(wanted(&cli, &config)?, options(&cli, &config));
    let deadline = Deadline::from_millis(cli.timeout_ms.or(config.timeout_ms));

    let outcome = FactsApi::git().facts(&cli.path, &request, deadline);
    if let Outcome::Facts(record) = &outcome {
        let out = if cli.json {
            render::json(record, request.wanted)?
        } else {
            render::lines(record, request.wanted)
        };
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(out.as_bytes())?;
        stdout.flush()?;
    }
    Ok(outcome)
}

fn wanted(cli: &Cli, config: &FactsConfig) -> Result<AttributeSet> {
    if !cli.attributes.is_empty() {
        return AttributeSet::parse(&cli.attributes);
    }
    if cli.all {
        return Ok(AttributeSet::all());
    }
    match &config.attributes {
        Some(names) => AttributeSet::parse(names),
        None => AttributeSet::parse(DEFAULT_ATTRIBUTES),
    }
}

fn options(cli: &Cli, config: &FactsConfig) -> Options {
    let mut options = config.options();
    if cli.ignore_untracked {
        options.dirty_if_untracked = false;
    }
    options.renames_from_rewrites |= cli.renames_from_rewrites;
    options.include_submodules |= cli.include_submodules;
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcsfacts::attributes::Attribute;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["vcsfacts"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn default_selection_is_branch_and_dirty() {
        let set = wanted(&parse(&[]), &FactsConfig::default()).unwrap();
        assert_eq!(set, AttributeSet::from([Attribute::Branch, Attribute::IsDirty]));
    }

    #[test]
    fn command_line_beats_config() {
        let config = FactsConfig {
            attributes: Some(vec!["tag".into()]),
            ..FactsConfig::default()
        };
        let set = wanted(&parse(&["-a", "ahead"]), &config).unwrap();
        assert_eq!(set, AttributeSet::from([Attribute::CommitsAhead]));

        let set = wanted(&parse(&[]), &config).unwrap();
        assert_eq!(set, AttributeSet::from([Attribute::Tag]));

        assert_eq!(wanted(&parse(&["--all"]), &config).unwrap(), AttributeSet::all());
    }

    #[test]
    fn unknown_attribute_is_an_error() {
        let err = wanted(&parse(&["-a", "branch,bookmark"]), &FactsConfig::default()).unwrap_err();
        assert!(matches!(err, FactsError::UnknownAttribute(name) if name == "bookmark"));
    }

    #[test]
    fn flags_override_config_options() {
        let config = FactsConfig {
            include_submodules: true,
            ..FactsConfig::default()
        };
        let opts = options(&parse(&["--ignore-untracked"]), &config);
        assert!(!opts.dirty_if_untracked);
        assert!(opts.include_submodules);
        assert!(!opts.renames_from_rewrites);
    }
}
