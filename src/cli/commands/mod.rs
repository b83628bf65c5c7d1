//! CLI command implementations
//!
//! Each subcommand has its own module with:
//! - Args struct for command-line arguments
//! - run() function to execute the command

use clap::Subcommand;

pub mod generate;
pub mod schedule;
pub mod validate;

use crate::app::AppContext;
use crate::error::Result;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the curator command lines, default command first
    Generate(generate::GenerateArgs),

    /// Check the policy file without building commands
    Validate(validate::ValidateArgs),

    /// Print the cron registrations for every command
    Schedule(schedule::ScheduleArgs),
}

/// Dispatch a command to its handler
pub fn run(ctx: &AppContext, command: &Commands) -> Result<()> {
    match command {
        Commands::Generate(args) => generate::run(ctx, args),
        Commands::Validate(args) => validate::run(ctx, args),
        Commands::Schedule(args) => schedule::run(ctx, args),
    }
}
