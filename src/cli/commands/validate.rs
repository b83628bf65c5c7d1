//! curator-cron validate - Check the policy file

use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::command::resolve_pattern;
use crate::error::Result;

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Also list the index pattern each entry resolves to
    #[arg(long)]
    pub patterns: bool,
}

#[derive(Serialize)]
struct ValidateReport {
    config: String,
    timezone: String,
    run_hour: u32,
    run_minute: u32,
    entries: Vec<EntryOutput>,
    valid: bool,
}

#[derive(Serialize)]
struct EntryOutput {
    name: String,
    raw_regex: bool,
    pattern: String,
    operations: Vec<String>,
}

pub fn run(ctx: &AppContext, args: &ValidateArgs) -> Result<()> {
    let validated = ctx.load_validated()?;

    let entries = validated
        .entries()
        .iter()
        .map(|entry| EntryOutput {
            name: entry.name.clone(),
            raw_regex: entry.raw_regex,
            pattern: resolve_pattern(entry),
            operations: entry.operations.keys().cloned().collect(),
        })
        .collect::<Vec<_>>();

    if ctx.is_json() {
        let report = ValidateReport {
            config: ctx.config_path.display().to_string(),
            timezone: validated.timezone().name().to_string(),
            run_hour: validated.run_hour(),
            run_minute: validated.run_minute(),
            entries,
            valid: true,
        };
        return emit_json(&robot_ok(report));
    }

    let mut layout = HumanLayout::new();
    layout.title("Validation");
    layout.kv("Config", &ctx.config_path.display().to_string());
    layout.kv("Timezone", validated.timezone().name());
    layout.kv(
        "Runs at",
        &format!("{:02}:{:02}", validated.run_hour(), validated.run_minute()),
    );
    layout.kv("Entries", &entries.len().to_string());

    if !entries.is_empty() {
        layout.section("Entries");
        for entry in &entries {
            let kind = if entry.raw_regex { "raw regex" } else { "project" };
            if args.patterns {
                layout.bullet(&format!("{} ({kind}) -> {}", entry.name, entry.pattern));
            } else {
                layout.bullet(&format!("{} ({kind})", entry.name));
            }
        }
    }

    layout.section("Status");
    layout.bullet("OK");
    emit_human(layout);
    Ok(())
}
