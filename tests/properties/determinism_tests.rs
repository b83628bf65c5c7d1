use std::collections::BTreeSet;

use proptest::prelude::*;

use curator_cron::command::{CommandBuilder, escape_regex_literal};
use curator_cron::config::Settings;
use curator_cron::policy::{parse_str, validate};

fn policy_yaml(default_days: Option<u32>, projects: &BTreeSet<String>, count: u32, quota: u32) -> String {
    let mut yaml = String::new();
    if let Some(days) = default_days {
        yaml.push_str(&format!(".defaults:\n  delete:\n    unit: days\n    count: {days}\n"));
    }
    for name in projects {
        yaml.push_str(&format!(
            "{name}:\n  delete:\n    unit: weeks\n    count: {count}\n    size_unit: gigabytes\n    quota: {quota}\n"
        ));
    }
    yaml
}

fn build(yaml: &str) -> Vec<String> {
    let settings = Settings::default();
    let validated = validate(parse_str(yaml).unwrap(), &settings).unwrap();
    CommandBuilder::new(&validated, &settings)
        .build_cmd_list()
        .unwrap()
}

proptest! {
    #[test]
    fn test_build_is_deterministic(
        default_days in proptest::option::of(1u32..400),
        projects in prop::collection::btree_set("[a-z][a-z0-9-]{0,10}[0-9]", 1..6),
        count in 1u32..60,
        quota in 1u32..500,
    ) {
        let yaml = policy_yaml(default_days, &projects, count, quota);
        prop_assert_eq!(build(&yaml), build(&yaml));
    }

    #[test]
    fn test_two_commands_per_project_after_the_default(
        default_days in proptest::option::of(1u32..400),
        projects in prop::collection::btree_set("[a-z][a-z0-9-]{0,10}[0-9]", 1..6),
    ) {
        let commands = build(&policy_yaml(default_days, &projects, 3, 10));
        prop_assert_eq!(commands.len(), 1 + 2 * projects.len());
        prop_assert_eq!(commands[0].is_empty(), default_days.is_none());
        for command in &commands[1..] {
            prop_assert!(command.starts_with("/usr/bin/curator --loglevel INFO"));
        }
    }

    #[test]
    fn test_default_command_excludes_every_project(
        projects in prop::collection::btree_set("[a-z][a-z0-9-]{0,10}[0-9]", 1..6),
    ) {
        let commands = build(&policy_yaml(Some(30), &projects, 3, 10));
        for name in &projects {
            let pattern = format!("'^project\\.{}\\..*$'", escape_regex_literal(name));
            let exclude = format!("--exclude {pattern}");
            let regex = format!("--regex {pattern}");
            prop_assert!(commands[0].contains(&exclude));
            prop_assert!(commands.iter().skip(1).any(|c| c.ends_with(&regex)));
        }
    }

    #[test]
    fn test_entry_order_follows_the_file(
        projects in prop::collection::btree_set("[a-z][a-z0-9-]{0,10}[0-9]", 2..6),
    ) {
        let commands = build(&policy_yaml(None, &projects, 3, 10));
        for (i, name) in projects.iter().enumerate() {
            let needle = format!("project\\.{}\\.", escape_regex_literal(name));
            prop_assert!(commands[1 + 2 * i].contains(&needle));
            prop_assert!(commands[2 + 2 * i].contains(&needle));
        }
    }
}
