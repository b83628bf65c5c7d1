//! Periodic job registrations for generated commands.
//!
//! Every command runs once a day at the configured hour and minute in the
//! configured timezone. Nothing here installs or runs jobs; registrations are
//! handed to whatever owns the host's scheduler, usually as crontab text.

use chrono::{DateTime, Days, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Serialize, Serializer};

use crate::policy::ValidatedConfig;

/// One `(command, hour, minute, timezone)` registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScheduledJob {
    /// Position in the command list; slot 0 is the default command.
    pub slot: usize,
    pub command: String,
    pub hour: u32,
    pub minute: u32,
    #[serde(serialize_with = "serialize_tz")]
    pub timezone: Tz,
}

impl ScheduledJob {
    /// Slot 0 with no default deletion configured carries an empty command.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.command.is_empty()
    }

    /// Next daily run strictly after `now`.
    ///
    /// Local times skipped by a DST jump roll over to the following day.
    #[must_use]
    pub fn next_run_after(&self, now: DateTime<Utc>) -> Option<DateTime<Tz>> {
        let local_today = now.with_timezone(&self.timezone).date_naive();
        (0..=2u64).find_map(|offset| {
            let day = local_today.checked_add_days(Days::new(offset))?;
            let naive = day.and_hms_opt(self.hour, self.minute, 0)?;
            self.timezone
                .from_local_datetime(&naive)
                .earliest()
                .filter(|candidate| candidate.with_timezone(&Utc) > now)
        })
    }

    /// The crontab line for this job.
    ///
    /// cron reads an unescaped `%` as a newline, so the timestring's `%` are escaped.
    #[must_use]
    pub fn crontab_line(&self) -> String {
        if self.is_placeholder() {
            return format!(
                "# {} {} * * * (slot {}: no default delete policy configured)",
                self.minute, self.hour, self.slot
            );
        }
        format!(
            "{} {} * * * {}",
            self.minute,
            self.hour,
            self.command.replace('%', r"\%")
        )
    }
}

fn serialize_tz<S: Serializer>(tz: &Tz, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(tz.name())
}

/// Pair every command with the validated run time and timezone, keeping order.
#[must_use]
pub fn schedule_jobs(config: &ValidatedConfig, commands: Vec<String>) -> Vec<ScheduledJob> {
    commands
        .into_iter()
        .enumerate()
        .map(|(slot, command)| ScheduledJob {
            slot,
            command,
            hour: config.run_hour(),
            minute: config.run_minute(),
            timezone: config.timezone(),
        })
        .collect()
}

/// Render jobs as crontab text, emitting `CRON_TZ=` whenever the zone changes.
#[must_use]
pub fn render_crontab(jobs: &[ScheduledJob]) -> String {
    let mut lines = vec!["# curator retention jobs, generated by curator-cron".to_string()];
    let mut current_tz: Option<Tz> = None;
    for job in jobs {
        if current_tz != Some(job.timezone) {
            lines.push(format!("CRON_TZ={}", job.timezone.name()));
            current_tz = Some(job.timezone);
        }
        lines.push(job.crontab_line());
    }
    let mut text = lines.join("\n");
    text.push('\n');
    text
}
