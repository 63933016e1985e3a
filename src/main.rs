use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;
use rlstats::command::Commands;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Log level: off, error, warn, info, debug or trace. RUST_LOG overrides it
    #[arg(long = "log-level", global = true, default_value = "info")]
    log_level: LevelFilter,

    #[command(subcommand)]
    command: Commands,
}

fn main() -> ExitCode {
    let mut cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .parse_default_env()
        .init();

    log::debug!("Running {:?}", cli.command);
    if let Err(e) = cli.command.try_execute() {
        eprintln!("Error: {:#}", e);
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}
