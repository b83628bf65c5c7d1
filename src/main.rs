//! curator-cron - Turn retention policies into scheduled curator commands.

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use curator_cron::Result;
use curator_cron::app::AppContext;
use curator_cron::cli::Cli;
use curator_cron::cli::output::robot_error;
use curator_cron::config::{ScriptLogLevel, Settings};

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = Settings::from_env().and_then(|settings| {
        init_tracing(&cli, settings.script_log_level);
        run(&cli, settings)
    });

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            if cli.robot {
                // Robot mode: JSON error output to stdout
                let response = robot_error(e.code(), e.to_string());
                println!("{}", serde_json::to_string(&response).unwrap_or_default());
            } else {
                eprintln!("Error: {e}");
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli, settings: Settings) -> Result<()> {
    let ctx = AppContext::from_cli(cli, settings);
    curator_cron::cli::commands::run(&ctx, &cli.command)
}

fn init_tracing(cli: &Cli, level: ScriptLogLevel) {
    if cli.quiet {
        return;
    }

    let filter = match cli.verbose {
        0 => format!("warn,curator_cron={}", level.filter_directive()),
        1 => "info,curator_cron=debug".to_string(),
        _ => "trace".to_string(),
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    if cli.robot {
        // JSON logging for robot mode
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(env_filter)
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
