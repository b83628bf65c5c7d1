use std::path::PathBuf;

use clap::Parser;

use curator_cron::cli::{Cli, Commands, OutputFormat};

fn parse_cli(args: &[&str]) -> Cli {
    let mut argv = vec!["curator-cron"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv)
}

fn parse(args: &[&str]) -> Commands {
    parse_cli(args).command
}

#[test]
fn parse_generate_defaults() {
    match parse(&["generate"]) {
        Commands::Generate(args) => assert!(!args.numbered),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_generate_numbered() {
    match parse(&["generate", "--numbered"]) {
        Commands::Generate(args) => assert!(args.numbered),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_validate_patterns() {
    match parse(&["validate", "--patterns"]) {
        Commands::Validate(args) => assert!(args.patterns),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_schedule_next() {
    match parse(&["schedule", "--next"]) {
        Commands::Schedule(args) => assert!(args.next),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn parse_global_config_after_subcommand() {
    let cli = parse_cli(&["generate", "-c", "/etc/curator/policy.yaml"]);
    assert_eq!(cli.config, Some(PathBuf::from("/etc/curator/policy.yaml")));
}

#[test]
fn parse_verbosity_counts() {
    let cli = parse_cli(&["-vv", "validate"]);
    assert_eq!(cli.verbose, 2);
    assert!(!cli.quiet);
}

#[test]
fn robot_overrides_format() {
    let cli = parse_cli(&["--format", "human", "--robot", "generate"]);
    assert_eq!(cli.output_format(), OutputFormat::Json);
}

#[test]
fn format_defaults_to_human() {
    assert_eq!(parse_cli(&["generate"]).output_format(), OutputFormat::Human);
    assert_eq!(
        parse_cli(&["--format", "json", "generate"]).output_format(),
        OutputFormat::Json
    );
}

#[test]
fn subcommand_is_required() {
    assert!(Cli::try_parse_from(["curator-cron"]).is_err());
}

#[test]
fn unknown_subcommand_is_rejected() {
    assert!(Cli::try_parse_from(["curator-cron", "install"]).is_err());
}
