use clap::{error::ErrorKind, CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use webcheck::cli::Cli;
use webcheck::config_generator::print_icinga_command_config_if_env_and_exit;
use webcheck::{Runner, Severity, Status};

const LOG_ENV: &str = "WEBCHECK_LOG";

fn main() {
    init_logging();

    Runner::new()
        .on_error(|e: &anyhow::Error| match e.downcast_ref::<clap::Error>() {
            Some(_) => Severity::Unknown,
            None => Severity::Critical,
        })
        .safe_run(run)
        .print_and_exit()
}

fn run() -> anyhow::Result<Status> {
    print_icinga_command_config_if_env_and_exit("webcheck", &Cli::command())?;

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let rendered = e.to_string();
            let reason = rendered.lines().next().unwrap_or_default();
            let reason = reason.strip_prefix("error: ").unwrap_or(reason).to_owned();
            return Err(anyhow::Error::new(e).context(format!("invalid arguments: {reason}")));
        }
    };

    Ok(cli.probe().run())
}

/// Diagnostics go to stderr: stdout carries nothing but the status line.
fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
