//! Typed records for the retention policy document.

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{CuratorError, Result};

/// Reserved top-level key holding global defaults.
pub const DEFAULTS_KEY: &str = ".defaults";
/// Reserved top-level key; accepted and ignored.
pub const OPERATIONS_KEY: &str = ".operations";
/// Per-entry parameter marking the key as a literal regular expression.
pub const RAW_REGEX_KEY: &str = "raw_regex";

/// Age granularity accepted by the index-maintenance tool.
///
/// No `hours`: index names carry a `%Y.%m.%d` stamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeUnit {
    Days,
    Weeks,
    Months,
}

impl TimeUnit {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Days => "days",
            Self::Weeks => "weeks",
            Self::Months => "months",
        }
    }
}

impl fmt::Display for TimeUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TimeUnit {
    type Err = String;

    fn from_str(value: &str) -> std::result::Result<Self, Self::Err> {
        match value {
            "days" => Ok(Self::Days),
            "weeks" => Ok(Self::Weeks),
            "months" => Ok(Self::Months),
            "hours" => Err(
                "unit [hours] is not supported, index timestamps have day granularity".to_string(),
            ),
            other => Err(format!(
                "unit [{other}] is not supported (expected days, weeks or months)"
            )),
        }
    }
}

/// Operations the tool can be asked to perform on matching indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Delete,
}

impl OperationKind {
    /// Resolve an operation key from the policy document.
    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "delete" => Some(Self::Delete),
            _ => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Delete => "delete",
        }
    }
}

impl fmt::Display for OperationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The whole policy document, in document order.
#[derive(Debug, Clone, Default)]
pub struct RetentionConfig {
    /// `.defaults`, when present.
    pub defaults: Option<Defaults>,
    /// Whether a `.operations` key was present.
    pub has_operations_key: bool,
    pub entries: Vec<PolicyEntry>,
}

impl RetentionConfig {
    /// True when the document had no top-level keys at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.defaults.is_none() && !self.has_operations_key && self.entries.is_empty()
    }
}

/// Global settings from `.defaults`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Defaults {
    #[serde(default)]
    pub timezone: Option<String>,
    #[serde(default)]
    pub runhour: Option<i64>,
    #[serde(default)]
    pub runminute: Option<i64>,
    #[serde(default)]
    pub delete: Option<DefaultDeleteBlock>,
}

/// `.defaults.delete` as written; fields are checked when the command is built.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct DefaultDeleteBlock {
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub count: Option<u64>,
}

/// One project (or raw regex) and its operation blocks.
#[derive(Debug, Clone, PartialEq)]
pub struct PolicyEntry {
    pub name: String,
    pub raw_regex: bool,
    /// Operation key to its block, undecoded, in document order.
    pub operations: IndexMap<String, serde_yaml::Value>,
}

/// An operation block as written in the document.
#[derive(Debug, Clone, Default, Deserialize)]
struct OperationBlock {
    #[serde(default)]
    unit: Option<String>,
    #[serde(default)]
    count: Option<u64>,
    #[serde(default)]
    size_unit: Option<String>,
    #[serde(default)]
    quota: Option<serde_yaml::Number>,
}

/// Age threshold: indices older than `count` `unit`s.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AgeThreshold {
    pub unit: TimeUnit,
    pub count: u64,
}

impl AgeThreshold {
    /// Decode `.defaults.delete`.
    pub fn from_default_block(block: &DefaultDeleteBlock) -> Result<Self> {
        let unit = block
            .unit
            .as_deref()
            .ok_or_else(|| missing(DEFAULTS_KEY, "delete.unit"))?;
        let unit = unit
            .parse::<TimeUnit>()
            .map_err(|reason| CuratorError::command_build(DEFAULTS_KEY, reason))?;
        let count = block
            .count
            .ok_or_else(|| missing(DEFAULTS_KEY, "delete.count"))?;
        Ok(Self { unit, count })
    }
}

/// Disk-space threshold: the `quota`, labelled with its `size_unit`.
///
/// The quota is kept as written, integer or fractional, and printed as is.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DiskQuota {
    pub size_unit: String,
    pub quota: serde_yaml::Number,
}

/// A fully decoded operation block.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Operation {
    pub age: AgeThreshold,
    pub disk: DiskQuota,
}

impl Operation {
    /// Decode the block stored under `entry` for a recognized operation.
    ///
    /// Every field is required; a missing or malformed one names the entry.
    pub fn decode(entry: &str, operation: OperationKind, block: &serde_yaml::Value) -> Result<Self> {
        let parsed: OperationBlock = serde_yaml::from_value(block.clone()).map_err(|err| {
            CuratorError::command_build(entry, format!("malformed [{operation}] block: {err}"))
        })?;

        let unit = parsed
            .unit
            .ok_or_else(|| missing(entry, &format!("{operation}.unit")))?;
        let unit = unit
            .parse::<TimeUnit>()
            .map_err(|reason| CuratorError::command_build(entry, reason))?;
        let count = parsed
            .count
            .ok_or_else(|| missing(entry, &format!("{operation}.count")))?;
        let size_unit = parsed
            .size_unit
            .ok_or_else(|| missing(entry, &format!("{operation}.size_unit")))?;
        let quota = parsed
            .quota
            .ok_or_else(|| missing(entry, &format!("{operation}.quota")))?;

        Ok(Self {
            age: AgeThreshold { unit, count },
            disk: DiskQuota { size_unit, quota },
        })
    }
}

fn missing(entry: &str, field: &str) -> CuratorError {
    CuratorError::command_build(entry, format!("missing required field `{field}`"))
}
