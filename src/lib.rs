//! curator-cron: generate curator index retention commands from a
//! per-project policy file and pair them with a daily cron schedule.
//!
//! The pipeline is load → validate → build → schedule:
//!
//! ```
//! use curator_cron::command::CommandBuilder;
//! use curator_cron::config::Settings;
//! use curator_cron::policy::{parse_str, validate};
//!
//! let yaml = "
//! .defaults:
//!   delete: {unit: days, count: 30}
//! app:
//!   delete: {unit: days, count: 7, size_unit: gigabytes, quota: 5}
//! ";
//! let settings = Settings::default();
//! let validated = validate(parse_str(yaml)?, &settings)?;
//! let commands = CommandBuilder::new(&validated, &settings).build_cmd_list()?;
//!
//! assert_eq!(commands.len(), 3);
//! assert!(commands[0].ends_with("--exclude '^project\\.app\\..*$'"));
//! # Ok::<(), curator_cron::CuratorError>(())
//! ```

pub mod app;
pub mod cli;
pub mod command;
pub mod config;
pub mod error;
pub mod policy;
pub mod schedule;
pub mod test_utils;

pub use error::{CuratorError, Result};
