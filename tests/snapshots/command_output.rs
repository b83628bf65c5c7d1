use insta::assert_snapshot;

use curator_cron::command::{CommandBuilder, resolve_pattern};
use curator_cron::config::Settings;
use curator_cron::policy::{ValidatedConfig, parse_str, validate};
use curator_cron::schedule::{render_crontab, schedule_jobs};
use curator_cron::test_utils::fixtures::SAMPLE_POLICY;

fn validated(yaml: &str, settings: &Settings) -> ValidatedConfig {
    validate(parse_str(yaml).unwrap(), settings).unwrap()
}

#[test]
fn sample_policy_commands() {
    let settings = Settings::default();
    let config = validated(SAMPLE_POLICY, &settings);
    let commands = CommandBuilder::new(&config, &settings)
        .build_cmd_list()
        .unwrap();

    assert_snapshot!(commands.join("\n"), @r"
    /usr/bin/curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete indices --timestring %Y.%m.%d --older-than 30 --time-unit days --exclude '^\.searchguard\..*$' --exclude '^\.kibana\..*$' --exclude '^project\.app\..*$' --exclude '^logs-(dev|qa)\..*$'
    /usr/bin/curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete indices --timestring %Y.%m.%d --older-than 7 --time-unit days --regex '^project\.app\..*$'
    /usr/bin/curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete --disk-space 5 indices --regex '^project\.app\..*$'
    /usr/bin/curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete indices --timestring %Y.%m.%d --older-than 1 --time-unit months --regex '^logs-(dev|qa)\..*$'
    /usr/bin/curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete --disk-space 20 indices --regex '^logs-(dev|qa)\..*$'
    ");
}

#[test]
fn crontab_for_short_connection() {
    let settings = Settings {
        curator_bin: "curator".to_string(),
        ..Settings::default()
    };
    let yaml = "
.defaults:
  delete: {unit: days, count: 30}
  runhour: 23
  runminute: 5
  timezone: Europe/Prague
web-01:
  delete: {unit: weeks, count: 2, size_unit: gigabytes, quota: 8}
";
    let config = validated(yaml, &settings);
    let commands = CommandBuilder::new(&config, &settings)
        .build_cmd_list()
        .unwrap();
    let crontab = render_crontab(&schedule_jobs(&config, commands));

    assert_snapshot!(crontab, @r"
    # curator retention jobs, generated by curator-cron
    CRON_TZ=Europe/Prague
    5 23 * * * curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete indices --timestring \%Y.\%m.\%d --older-than 30 --time-unit days --exclude '^\.searchguard\..*$' --exclude '^\.kibana\..*$' --exclude '^project\.web-01\..*$'
    5 23 * * * curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete indices --timestring \%Y.\%m.\%d --older-than 2 --time-unit weeks --regex '^project\.web-01\..*$'
    5 23 * * * curator --loglevel INFO --host localhost --port 9200 --use_ssl --certificate /etc/ca --client-cert /etc/cert --client-key /etc/key --timeout 30 delete --disk-space 8 indices --regex '^project\.web-01\..*$'
    ");
}

#[test]
fn placeholder_slot_in_crontab() {
    let settings = Settings::default();
    let yaml = "
.defaults:
  runhour: 4
billing:
  delete: {unit: days, count: 90, size_unit: gigabytes, quota: 50}
";
    let config = validated(yaml, &settings);
    let commands = CommandBuilder::new(&config, &settings)
        .build_cmd_list()
        .unwrap();
    let crontab = render_crontab(&schedule_jobs(&config, commands));
    let head: Vec<_> = crontab.lines().take(3).collect();

    assert_snapshot!(head.join("\n"), @r"
    # curator retention jobs, generated by curator-cron
    CRON_TZ=UTC
    # 0 4 * * * (slot 0: no default delete policy configured)
    ");
}

#[test]
fn resolved_patterns() {
    let yaml = r"
app:
  delete: {unit: days, count: 1, size_unit: gigabytes, quota: 1}
'^\.operations\..*$':
  raw_regex: true
  delete: {unit: days, count: 1, size_unit: gigabytes, quota: 1}
a-b-c:
  delete: {unit: days, count: 1, size_unit: gigabytes, quota: 1}
";
    let config = validated(yaml, &Settings::default());
    let patterns: Vec<String> = config
        .entries()
        .iter()
        .map(|entry| format!("{} => {}", entry.name, resolve_pattern(entry)))
        .collect();

    assert_snapshot!(patterns.join("\n"), @r"
    app => ^project\.app\..*$
    ^\.operations\..*$ => ^\.operations\..*$
    a-b-c => ^project\.a-b-c\..*$
    ");
}
