//! Reads the YAML policy document into typed records.

use std::path::Path;

use indexmap::IndexMap;
use serde_yaml::{Mapping, Value};

use crate::error::{CuratorError, Result};

use super::types::{
    DEFAULTS_KEY, Defaults, OPERATIONS_KEY, PolicyEntry, RAW_REGEX_KEY, RetentionConfig,
};

/// Load the policy document at `path`.
pub fn load_file(path: &Path) -> Result<RetentionConfig> {
    let raw = std::fs::read_to_string(path).map_err(|err| {
        CuratorError::Configuration(format!("read config {}: {err}", path.display()))
    })?;
    parse_str(&raw).map_err(|err| match err {
        CuratorError::Yaml(err) => {
            CuratorError::Configuration(format!("parse config {}: {err}", path.display()))
        }
        other => other,
    })
}

/// Parse a policy document. An empty document yields an empty config.
pub fn parse_str(raw: &str) -> Result<RetentionConfig> {
    let document: Value = if raw.trim().is_empty() {
        Value::Null
    } else {
        serde_yaml::from_str(raw)?
    };

    match document {
        Value::Null => Ok(RetentionConfig::default()),
        Value::Mapping(mapping) => parse_mapping(mapping),
        other => Err(CuratorError::Configuration(format!(
            "the top level of the configuration must be a mapping, found {}",
            describe(&other)
        ))),
    }
}

fn parse_mapping(mapping: Mapping) -> Result<RetentionConfig> {
    let mut config = RetentionConfig::default();

    for (key, value) in mapping {
        let name = key_to_string(&key)?;
        match name.as_str() {
            DEFAULTS_KEY => {
                let defaults = if value.is_null() {
                    Defaults::default()
                } else {
                    serde_yaml::from_value(value).map_err(|err| {
                        CuratorError::Configuration(format!("invalid [{DEFAULTS_KEY}]: {err}"))
                    })?
                };
                config.defaults = Some(defaults);
            }
            OPERATIONS_KEY => config.has_operations_key = true,
            _ => config.entries.push(parse_entry(name, value)?),
        }
    }

    Ok(config)
}

fn parse_entry(name: String, value: Value) -> Result<PolicyEntry> {
    let Value::Mapping(mapping) = value else {
        return Err(CuratorError::Configuration(format!(
            "[{name}] must be a mapping of operations, found {}",
            describe(&value)
        )));
    };

    let mut raw_regex = false;
    let mut operations = IndexMap::new();
    for (key, block) in mapping {
        let key = key_to_string(&key)?;
        if key == RAW_REGEX_KEY {
            raw_regex = match block {
                Value::Bool(flag) => flag,
                Value::Null => false,
                other => {
                    return Err(CuratorError::Configuration(format!(
                        "[{name}] {RAW_REGEX_KEY} must be a boolean, found {}",
                        describe(&other)
                    )));
                }
            };
        } else {
            operations.insert(key, block);
        }
    }

    Ok(PolicyEntry {
        name,
        raw_regex,
        operations,
    })
}

/// YAML reads `123:` as a number; project names are strings either way.
fn key_to_string(key: &Value) -> Result<String> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        other => Err(CuratorError::Configuration(format!(
            "configuration keys must be strings, found {}",
            describe(other)
        ))),
    }
}

const fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
