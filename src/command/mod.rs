//! Curator command line generation.

pub mod builder;
pub mod shell;

pub use builder::{
    AggregatedSettings, CommandBuilder, CommandPlan, PROJECT_PREFIX, PolicyCommands, TIMESTRING,
    resolve_pattern,
};
pub use shell::{escape_regex_literal, prefix_pattern, shell_quote};
