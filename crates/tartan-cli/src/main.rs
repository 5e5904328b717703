//! Tartan CLI - transform HR provider records with path mapping tables
//!
//! This is the main entry point for the `tartan` command, providing
//! commands to transform records, read single paths, and validate tables.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::Config;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

#[tokio::main]
async fn main() {
    let cli = Cli::parse_args();

    // Configuration feeds the logging setup, so it is loaded first
    let config = match Config::load_with_file(cli.config.as_deref()) {
        Ok(config) => config,
        Err(e) => exit_with(&e, !cli.no_color),
    };

    let use_color = cli.use_color() && config.output.color;
    control::set_override(use_color);

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    match run(cli, config, use_color).await {
        Ok(()) => process::exit(0),
        Err(e) => exit_with(&e, use_color),
    }
}

fn exit_with(e: &error::Error, use_color: bool) -> ! {
    eprintln!("{}", error::format_error(e, use_color));

    if e.should_show_help() {
        eprintln!("\nFor more information, try '--help'");
    }

    process::exit(e.exit_code());
}

/// Main application logic
#[instrument(skip_all, fields(command = ?cli.command))]
async fn run(cli: Cli, config: Config, use_color: bool) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    let mut output = OutputWriter::new(cli.output, use_color, cli.quiet);

    tracing::info!(
        verbosity = cli.verbosity_level(),
        config_file = ?Config::resolve_path(cli.config.as_deref()),
        "Executing command"
    );

    match cli.command {
        Commands::Transform(args) => handlers::handle_transform(args, &config, &mut output).await,
        Commands::Get(args) => handlers::handle_get(args, &mut output).await,
        Commands::Validate(args) => handlers::handle_validate(args, &mut output).await,
        Commands::Config(args) => {
            handlers::handle_config(args, cli.config.as_deref(), &config, &mut output)
        }
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    let verbosity = cli.verbosity_level();
    let mut logging_config = LoggingConfig::from_verbosity(verbosity);

    logging_config.apply_settings(&config.logging, verbosity);
    logging_config.merge_with_env();

    // Quiet mode only logs errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        let cli = Cli::parse_from(["tartan", "-vv", "validate", "table.json"]);
        assert_eq!(cli.verbosity_level(), 2);

        let cli = Cli::parse_from(["tartan", "--quiet", "validate", "table.json"]);
        assert_eq!(cli.verbosity_level(), 0);

        let cli = Cli::parse_from(["tartan", "transform", "employees.json", "--pretty"]);
        assert!(matches!(cli.command, Commands::Transform(ref args) if args.pretty));
    }
}
