//! Runtime settings read from the environment.
//!
//! Every value has a hardcoded fallback. Settings are resolved through a
//! lookup function so callers (and tests) can supply an explicit environment
//! instead of the process one.

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use serde::Serialize;

use crate::error::{CuratorError, Result};

pub const DEFAULT_CONF_LOCATION: &str = "config.yaml";
pub const DEFAULT_CURATOR_BIN: &str = "/usr/bin/curator";
pub const DEFAULT_TIMEZONE: &str = "UTC";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Settings {
    /// Location of the retention policy file.
    pub conf_location: PathBuf,
    /// Path of the index-maintenance binary placed at the start of each command.
    pub curator_bin: String,
    pub connection: ConnectionSettings,
    /// Value passed through as `--loglevel` to the tool.
    pub curator_log_level: String,
    /// Verbosity of this program's own logging.
    pub script_log_level: ScriptLogLevel,
    /// Timezone used when `.defaults` does not name one.
    pub run_timezone: String,
    /// Retention window applied when `.defaults` has no `delete` block.
    pub default_days: Option<u32>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            conf_location: PathBuf::from(DEFAULT_CONF_LOCATION),
            curator_bin: DEFAULT_CURATOR_BIN.to_string(),
            connection: ConnectionSettings::default(),
            curator_log_level: "INFO".to_string(),
            script_log_level: ScriptLogLevel::Info,
            run_timezone: DEFAULT_TIMEZONE.to_string(),
            default_days: None,
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through `lookup`, falling back to defaults for unset keys.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Self::default();
        let env = EnvReader { lookup: &lookup };

        if let Some(value) = env.string("CURATOR_CONF_LOCATION") {
            settings.conf_location = PathBuf::from(value);
        }
        if let Some(value) = env.string("CURATOR_BIN") {
            settings.curator_bin = value;
        }

        if let Some(value) = env.string("ES_HOST") {
            settings.connection.host = value;
        }
        if let Some(value) = env.u16("ES_PORT")? {
            settings.connection.port = value;
        }
        if let Some(value) = env.string("ES_CA") {
            settings.connection.ca = value;
        }
        if let Some(value) = env.string("ES_CLIENT_CERT") {
            settings.connection.client_cert = value;
        }
        if let Some(value) = env.string("ES_CLIENT_KEY") {
            settings.connection.client_key = value;
        }
        if let Some(value) = env.u32("CURATOR_TIMEOUT")? {
            settings.connection.timeout = value;
        }

        if let Some(value) = env.string("CURATOR_LOG_LEVEL") {
            settings.curator_log_level = value;
        }
        if let Some(value) = env.string("CURATOR_SCRIPT_LOG_LEVEL") {
            settings.script_log_level = value.parse()?;
        }
        if let Some(value) = env.string("CURATOR_RUN_TIMEZONE") {
            settings.run_timezone = value;
        }
        settings.default_days = env.u32("CURATOR_DEFAULT_DAYS")?;

        Ok(settings)
    }
}

/// Connection parameters handed through to the tool on every command line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSettings {
    pub host: String,
    pub port: u16,
    pub ca: String,
    pub client_cert: String,
    pub client_key: String,
    /// Request timeout in seconds.
    pub timeout: u32,
}

impl Default for ConnectionSettings {
    fn default() -> Self {
        Self {
            host: "localhost".to_string(),
            port: 9200,
            ca: "/etc/ca".to_string(),
            client_cert: "/etc/cert".to_string(),
            client_key: "/etc/key".to_string(),
            timeout: 30,
        }
    }
}

/// Log level names accepted by `CURATOR_SCRIPT_LOG_LEVEL`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ScriptLogLevel {
    Critical,
    Error,
    Warning,
    Info,
    Debug,
}

impl ScriptLogLevel {
    /// `EnvFilter` directive for this level. `tracing` has no critical level,
    /// so it maps onto `error`.
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Critical | Self::Error => "error",
            Self::Warning => "warn",
            Self::Info => "info",
            Self::Debug => "debug",
        }
    }
}

impl FromStr for ScriptLogLevel {
    type Err = CuratorError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_uppercase().as_str() {
            "CRITICAL" => Ok(Self::Critical),
            "ERROR" => Ok(Self::Error),
            "WARNING" | "WARN" => Ok(Self::Warning),
            "INFO" => Ok(Self::Info),
            "DEBUG" => Ok(Self::Debug),
            _ => Err(CuratorError::Configuration(format!(
                "The CURATOR_SCRIPT_LOG_LEVEL must be one of CRITICAL, ERROR, WARNING, INFO or DEBUG, got [{value}]"
            ))),
        }
    }
}

impl fmt::Display for ScriptLogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Critical => "CRITICAL",
            Self::Error => "ERROR",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
        };
        f.write_str(name)
    }
}

struct EnvReader<'a, F> {
    lookup: &'a F,
}

impl<F> EnvReader<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn string(&self, key: &str) -> Option<String> {
        (self.lookup)(key)
    }

    fn u16(&self, key: &str) -> Result<Option<u16>> {
        self.parsed(key)
    }

    fn u32(&self, key: &str) -> Result<Option<u32>> {
        self.parsed(key)
    }

    fn parsed<T>(&self, key: &str) -> Result<Option<T>>
    where
        T: FromStr,
        T::Err: fmt::Display,
    {
        match (self.lookup)(key) {
            Some(value) => value.trim().parse::<T>().map(Some).map_err(|err| {
                CuratorError::Configuration(format!("invalid {key} value {value}: {err}"))
            }),
            None => Ok(None),
        }
    }
}
