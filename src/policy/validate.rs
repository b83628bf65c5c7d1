//! Project name, raw regex and timezone validation.
//!
//! Validation runs over the whole document before any command is built and
//! stops at the first problem.

use std::sync::LazyLock;

use chrono_tz::Tz;
use regex::Regex;
use tracing::{debug, info};

use crate::config::Settings;
use crate::error::{CuratorError, Result};

use super::types::{DEFAULTS_KEY, Defaults, PolicyEntry, RetentionConfig};

/// Project names follow the DNS label rules used for namespaces.
pub const PROJECT_NAME_PATTERN: &str = r"^[a-z0-9]([-a-z0-9]*[a-z0-9])?$";
pub const PROJECT_NAME_MAX_LEN: usize = 63;

static PROJECT_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(PROJECT_NAME_PATTERN).expect("valid regex"));

/// A policy document that passed validation, with its resolved schedule.
#[derive(Debug, Clone)]
pub struct ValidatedConfig {
    config: RetentionConfig,
    timezone: Tz,
    run_hour: u32,
    run_minute: u32,
}

impl ValidatedConfig {
    #[must_use]
    pub const fn config(&self) -> &RetentionConfig {
        &self.config
    }

    #[must_use]
    pub fn defaults(&self) -> Option<&Defaults> {
        self.config.defaults.as_ref()
    }

    #[must_use]
    pub fn entries(&self) -> &[PolicyEntry] {
        &self.config.entries
    }

    #[must_use]
    pub const fn timezone(&self) -> Tz {
        self.timezone
    }

    #[must_use]
    pub const fn run_hour(&self) -> u32 {
        self.run_hour
    }

    #[must_use]
    pub const fn run_minute(&self) -> u32 {
        self.run_minute
    }
}

/// Validate every entry, then resolve the timezone and run time.
pub fn validate(config: RetentionConfig, settings: &Settings) -> Result<ValidatedConfig> {
    if config.is_empty() {
        return Err(CuratorError::Configuration(
            "No configuration supplied.".to_string(),
        ));
    }

    for entry in &config.entries {
        check_entry(entry)?;
        info!("Adding project [{}]", entry.name);
    }

    let defaults = config.defaults.as_ref();
    let timezone = resolve_timezone(defaults, &settings.run_timezone)?;
    debug!("Using timezone [{}]", timezone);

    let run_hour = run_field(defaults.and_then(|d| d.runhour), "runhour", 23)?;
    let run_minute = run_field(defaults.and_then(|d| d.runminute), "runminute", 59)?;

    Ok(ValidatedConfig {
        config,
        timezone,
        run_hour,
        run_minute,
    })
}

/// Check one entry: raw regexes must compile, other keys must be project names.
pub fn check_entry(entry: &PolicyEntry) -> Result<()> {
    if entry.raw_regex {
        check_raw_regex(&entry.name)
    } else {
        check_project_name(&entry.name)
    }
}

pub fn check_project_name(name: &str) -> Result<()> {
    if name.chars().count() > PROJECT_NAME_MAX_LEN {
        return Err(CuratorError::validation(
            name,
            format!(
                "The project name length must be less than or equal to {PROJECT_NAME_MAX_LEN} characters"
            ),
        ));
    }
    if !PROJECT_NAME.is_match(name) {
        return Err(CuratorError::validation(
            name,
            format!("The project name must match this regex: [{PROJECT_NAME_PATTERN}]"),
        ));
    }
    Ok(())
}

/// Raw regexes are handed to the index-maintenance tool, whose engine has
/// look-around and backreferences, so they are compiled with `fancy_regex`.
pub fn check_raw_regex(pattern: &str) -> Result<()> {
    fancy_regex::Regex::new(pattern).map(|_| ()).map_err(|err| {
        CuratorError::validation(
            pattern,
            format!("not a valid regular expression. Message from compiler: {err}"),
        )
    })
}

/// Resolve the effective timezone: `.defaults.timezone`, then `fallback`,
/// then UTC. Empty strings count as unset.
pub fn resolve_timezone(defaults: Option<&Defaults>, fallback: &str) -> Result<Tz> {
    let configured = defaults
        .and_then(|d| d.timezone.as_deref())
        .filter(|tz| !tz.trim().is_empty());
    let name = configured
        .or_else(|| Some(fallback).filter(|tz| !tz.trim().is_empty()))
        .unwrap_or("UTC");

    name.parse::<Tz>().map_err(|err| {
        CuratorError::validation(
            name,
            format!(
                "The timezone must be specified as a string in the tzselect(8) or timedatectl(1) \
                 \"Region/Locality\" format e.g. \"America/New_York\" or \"UTC\": {err}"
            ),
        )
    })
}

fn run_field(value: Option<i64>, field: &str, max: u32) -> Result<u32> {
    let value = value.unwrap_or(0);
    u32::try_from(value)
        .ok()
        .filter(|v| *v <= max)
        .ok_or_else(|| {
            CuratorError::validation(
                format!("{DEFAULTS_KEY}.{field}"),
                format!("must be between 0 and {max}, got {value}"),
            )
        })
}
