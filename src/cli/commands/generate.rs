//! curator-cron generate - Print curator command lines

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{emit_json, robot_ok};
use crate::command::PolicyCommands;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Prefix each line with its slot number
    #[arg(long)]
    pub numbered: bool,
}

#[derive(Serialize)]
struct GenerateReport<'a> {
    config: String,
    commands: Vec<String>,
    default_command: &'a str,
    policies: &'a [PolicyCommands],
}

pub fn run(ctx: &AppContext, args: &GenerateArgs) -> Result<()> {
    let (_, plan) = ctx.build_plan()?;
    let commands = plan.commands();

    if ctx.is_json() {
        let report = GenerateReport {
            config: ctx.config_path.display().to_string(),
            commands,
            default_command: &plan.default_command,
            policies: &plan.policies,
        };
        return emit_json(&robot_ok(report));
    }

    // Slot 0 prints even when empty so line numbers line up with job slots.
    for (slot, command) in commands.iter().enumerate() {
        if args.numbered {
            println!("{slot}\t{command}");
        } else {
            println!("{command}");
        }
    }
    Ok(())
}
