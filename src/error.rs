//! Error types for curator-cron.

use thiserror::Error;

/// Every failure the pipeline can report.
#[derive(Debug, Error)]
pub enum CuratorError {
    /// Configuration is missing, empty, unreadable, or an environment value is malformed.
    #[error("configuration error: {0}")]
    Configuration(String),

    /// A project name, raw regex, timezone, or run time failed validation.
    #[error("invalid [{name}]: {rule}")]
    Validation { name: String, rule: String },

    /// An operation key that is neither a known operation nor a known parameter.
    ///
    /// Only ever logged; the offending record is skipped.
    #[error("an unsupported or unknown operation [{operation}] was provided for [{entry}]")]
    UnsupportedOperation { entry: String, operation: String },

    /// A recognized operation is missing a required field or carries a bad value.
    #[error("cannot build command for [{entry}]: {reason}")]
    CommandBuild { entry: String, reason: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("yaml error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

impl CuratorError {
    pub fn validation(name: impl Into<String>, rule: impl Into<String>) -> Self {
        Self::Validation {
            name: name.into(),
            rule: rule.into(),
        }
    }

    pub fn command_build(entry: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::CommandBuild {
            entry: entry.into(),
            reason: reason.into(),
        }
    }

    /// Short machine-readable code used in robot output.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "configuration_error",
            Self::Validation { .. } => "validation_error",
            Self::UnsupportedOperation { .. } => "unsupported_operation",
            Self::CommandBuild { .. } => "command_build_error",
            Self::Io(_) => "io_error",
            Self::Yaml(_) => "yaml_error",
            Self::Json(_) => "json_error",
        }
    }
}

pub type Result<T> = std::result::Result<T, CuratorError>;
