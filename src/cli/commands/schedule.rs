//! curator-cron schedule - Print cron registrations

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use clap::Args;
use serde::Serialize;

use crate::app::AppContext;
use crate::cli::output::{HumanLayout, emit_human, emit_json, robot_ok};
use crate::error::Result;
use crate::schedule::{ScheduledJob, render_crontab, schedule_jobs};

#[derive(Args, Debug)]
pub struct ScheduleArgs {
    /// Show the next run time of each job instead of crontab text
    #[arg(long)]
    pub next: bool,
}

#[derive(Serialize)]
struct JobOutput<'a> {
    #[serde(flatten)]
    job: &'a ScheduledJob,
    next_run: Option<DateTime<Tz>>,
}

pub fn run(ctx: &AppContext, args: &ScheduleArgs) -> Result<()> {
    let (validated, plan) = ctx.build_plan()?;
    let jobs = schedule_jobs(&validated, plan.commands());
    let now = Utc::now();

    if ctx.is_json() {
        let items = jobs
            .iter()
            .map(|job| JobOutput {
                job,
                next_run: job.next_run_after(now),
            })
            .collect::<Vec<_>>();
        return emit_json(&robot_ok(items));
    }

    if !args.next {
        print!("{}", render_crontab(&jobs));
        return Ok(());
    }

    let mut layout = HumanLayout::new();
    layout.title("Schedule");
    layout.kv("Timezone", validated.timezone().name());
    layout.kv(
        "Runs at",
        &format!("{:02}:{:02}", validated.run_hour(), validated.run_minute()),
    );
    layout.section("Jobs");
    for job in &jobs {
        let next = job
            .next_run_after(now)
            .map_or_else(|| "unscheduled".to_string(), |t| t.to_rfc3339());
        if job.is_placeholder() {
            layout.bullet(&format!("slot {}: (no default delete policy) next {next}", job.slot));
        } else {
            layout.bullet(&format!("slot {}: next {next}", job.slot));
        }
    }
    emit_human(layout);
    Ok(())
}
