use std::path::PathBuf;

use tracing::debug;

use crate::cli::{Cli, OutputFormat};
use crate::command::{CommandBuilder, CommandPlan};
use crate::config::Settings;
use crate::error::Result;
use crate::policy::{ValidatedConfig, load_file, validate};

/// Everything a subcommand needs, resolved once from the CLI and environment.
pub struct AppContext {
    pub settings: Settings,
    pub config_path: PathBuf,
    pub output_format: OutputFormat,
}

impl AppContext {
    pub fn from_cli(cli: &Cli, settings: Settings) -> Self {
        let config_path = cli
            .config
            .clone()
            .unwrap_or_else(|| settings.conf_location.clone());

        Self {
            settings,
            config_path,
            output_format: cli.output_format(),
        }
    }

    /// Load and validate the policy file.
    pub fn load_validated(&self) -> Result<ValidatedConfig> {
        debug!(path = %self.config_path.display(), "Loading retention policy");
        let config = load_file(&self.config_path)?;
        validate(config, &self.settings)
    }

    /// Load, validate and build in one go.
    pub fn build_plan(&self) -> Result<(ValidatedConfig, CommandPlan)> {
        let validated = self.load_validated()?;
        let plan = CommandBuilder::new(&validated, &self.settings).build()?;
        Ok((validated, plan))
    }

    #[must_use]
    pub fn is_json(&self) -> bool {
        self.output_format == OutputFormat::Json
    }
}
