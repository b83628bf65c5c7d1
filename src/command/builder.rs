//! Builds curator command lines from a validated policy document.
//!
//! The output always starts with the default command (indices no policy
//! claims), followed by an age-based and a disk-quota-based command for every
//! `(operation, pattern)` pair, in document order.

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{debug, error};

use crate::config::Settings;
use crate::error::{CuratorError, Result};
use crate::policy::{
    AgeThreshold, DEFAULTS_KEY, Operation, OperationKind, PolicyEntry, RAW_REGEX_KEY, TimeUnit,
    ValidatedConfig,
};

use super::shell::{prefix_pattern, shell_quote};

/// Index name timestamp format understood by curator.
pub const TIMESTRING: &str = "%Y.%m.%d";

/// Prefix that namespaced project indices carry.
pub const PROJECT_PREFIX: &str = "project.";

/// Index prefixes the default command never deletes.
const ALWAYS_EXCLUDED: [&str; 2] = [".searchguard.", ".kibana."];

/// Settings folded per operation and resolved pattern.
///
/// A later entry resolving to the same pattern replaces the earlier one but
/// keeps its position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregatedSettings {
    by_operation: IndexMap<OperationKind, IndexMap<String, Operation>>,
}

impl AggregatedSettings {
    /// Record `operation` for `pattern`, returning the settings it replaced.
    pub fn insert(
        &mut self,
        kind: OperationKind,
        pattern: String,
        operation: Operation,
    ) -> Option<Operation> {
        self.by_operation
            .entry(kind)
            .or_default()
            .insert(pattern, operation)
    }

    #[must_use]
    pub fn get(&self, kind: OperationKind, pattern: &str) -> Option<&Operation> {
        self.by_operation.get(&kind)?.get(pattern)
    }

    pub fn iter(&self) -> impl Iterator<Item = (OperationKind, &str, &Operation)> {
        self.by_operation.iter().flat_map(|(kind, patterns)| {
            patterns
                .iter()
                .map(move |(pattern, op)| (*kind, pattern.as_str(), op))
        })
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.by_operation.values().map(IndexMap::len).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The two commands emitted for one `(operation, pattern)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PolicyCommands {
    pub operation: OperationKind,
    pub pattern: String,
    pub age_command: String,
    pub disk_command: String,
}

/// Everything one build produced.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandPlan {
    /// Empty when no default deletion is configured; still slot 0.
    pub default_command: String,
    pub policies: Vec<PolicyCommands>,
}

impl CommandPlan {
    /// The flat command list: default command first, then each policy's
    /// age command followed by its disk command.
    #[must_use]
    pub fn commands(&self) -> Vec<String> {
        let mut out = Vec::with_capacity(1 + self.policies.len() * 2);
        out.push(self.default_command.clone());
        for policy in &self.policies {
            out.push(policy.age_command.clone());
            out.push(policy.disk_command.clone());
        }
        out
    }
}

/// Resolve the index pattern an entry governs.
///
/// Raw regex keys are used as written. Keys already starting with `.` or
/// `project.` match `^<key>\..*$`; anything else is a project name and
/// matches `^project\.<key>\..*$`.
#[must_use]
pub fn resolve_pattern(entry: &PolicyEntry) -> String {
    if entry.raw_regex {
        return entry.name.clone();
    }
    if entry.name.starts_with('.') || entry.name.starts_with(PROJECT_PREFIX) {
        prefix_pattern(&format!("{}.", entry.name))
    } else {
        prefix_pattern(&format!("{PROJECT_PREFIX}{}.", entry.name))
    }
}

/// The `--exclude` argument for an entry on the default command.
///
/// Raw regexes are wrapped in single quotes as written rather than going
/// through [`shell_quote`].
fn exclude_argument(entry: &PolicyEntry, pattern: &str) -> String {
    if entry.raw_regex {
        format!("'{pattern}'")
    } else {
        shell_quote(pattern)
    }
}

/// Turns a [`ValidatedConfig`] into command lines.
pub struct CommandBuilder<'a> {
    config: &'a ValidatedConfig,
    settings: &'a Settings,
}

impl<'a> CommandBuilder<'a> {
    #[must_use]
    pub const fn new(config: &'a ValidatedConfig, settings: &'a Settings) -> Self {
        Self { config, settings }
    }

    /// Build the flat command list.
    pub fn build_cmd_list(&self) -> Result<Vec<String>> {
        Ok(self.build()?.commands())
    }

    /// Build the default command and every policy command.
    pub fn build(&self) -> Result<CommandPlan> {
        let mut default_command = self.default_command()?;
        let aggregated = self.aggregate(&mut default_command)?;

        let policies = aggregated
            .iter()
            .map(|(kind, pattern, op)| PolicyCommands {
                operation: kind,
                pattern: pattern.to_string(),
                age_command: self.age_command(kind, pattern, op.age),
                disk_command: self.disk_command(kind, pattern, &op.disk.quota),
            })
            .collect();

        Ok(CommandPlan {
            default_command,
            policies,
        })
    }

    /// Fold every entry into [`AggregatedSettings`], appending each resolved
    /// pattern to the default command's exclusions.
    ///
    /// With no default deletion configured the default command is empty and
    /// gets no exclusions: `--exclude` clauses alone are not a runnable line,
    /// and slot 0 has to stay an empty placeholder.
    pub fn aggregate(&self, default_command: &mut String) -> Result<AggregatedSettings> {
        let mut aggregated = AggregatedSettings::default();

        for entry in self.config.entries() {
            for (key, block) in &entry.operations {
                let Some(kind) = OperationKind::from_key(key) else {
                    if key != RAW_REGEX_KEY {
                        let err = CuratorError::UnsupportedOperation {
                            entry: entry.name.clone(),
                            operation: key.clone(),
                        };
                        error!(entry = %entry.name, operation = %key, "{err}... Record skipped");
                    }
                    continue;
                };

                let pattern = resolve_pattern(entry);
                if !default_command.is_empty() {
                    default_command.push_str(" --exclude ");
                    default_command.push_str(&exclude_argument(entry, &pattern));
                }

                let operation = Operation::decode(&entry.name, kind, block)?;
                debug!(
                    "Using [{}] [{}] [{}] [{}] for [{}]",
                    operation.age.unit,
                    operation.age.count,
                    operation.disk.size_unit,
                    operation.disk.quota,
                    pattern
                );
                aggregated.insert(kind, pattern, operation);
            }
        }

        Ok(aggregated)
    }

    /// Age threshold for indices no policy claims: `.defaults.delete`, or
    /// the configured default retention window in days.
    pub fn default_age(&self) -> Result<Option<AgeThreshold>> {
        if let Some(block) = self.config.defaults().and_then(|d| d.delete.as_ref()) {
            return AgeThreshold::from_default_block(block).map(Some);
        }
        Ok(self.settings.default_days.map(|days| AgeThreshold {
            unit: TimeUnit::Days,
            count: u64::from(days),
        }))
    }

    fn default_command(&self) -> Result<String> {
        let Some(age) = self.default_age()? else {
            debug!("No [{DEFAULTS_KEY}] delete policy, default command left empty");
            return Ok(String::new());
        };

        let mut command = format!(
            "{} {} indices --timestring {TIMESTRING} --older-than {} --time-unit {}",
            self.base(),
            OperationKind::Delete,
            age.count,
            age.unit
        );
        for prefix in ALWAYS_EXCLUDED {
            command.push_str(" --exclude ");
            command.push_str(&shell_quote(&prefix_pattern(prefix)));
        }
        Ok(command)
    }

    fn age_command(&self, kind: OperationKind, pattern: &str, age: AgeThreshold) -> String {
        format!(
            "{} {kind} indices --timestring {TIMESTRING} --older-than {} --time-unit {} --regex {}",
            self.base(),
            age.count,
            age.unit,
            shell_quote(pattern)
        )
    }

    fn disk_command(&self, kind: OperationKind, pattern: &str, quota: &serde_yaml::Number) -> String {
        format!(
            "{} {kind} --disk-space {quota} indices --regex {}",
            self.base(),
            shell_quote(pattern)
        )
    }

    /// Tool, log level and connection flags shared by every command.
    fn base(&self) -> String {
        format!(
            "{} --loglevel {} {}",
            shell_quote(&self.settings.curator_bin),
            shell_quote(&self.settings.curator_log_level),
            self.connection_flags()
        )
    }

    fn connection_flags(&self) -> String {
        let conn = &self.settings.connection;
        format!(
            "--host {} --port {} --use_ssl --certificate {} --client-cert {} --client-key {} --timeout {}",
            shell_quote(&conn.host),
            conn.port,
            shell_quote(&conn.ca),
            shell_quote(&conn.client_cert),
            shell_quote(&conn.client_key),
            conn.timeout
        )
    }
}
