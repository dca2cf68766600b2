//! jsongrind CLI - Command-line interface for grammar-driven JSON parser fuzzing
//!
//! This is the main entry point for the jsongrind CLI application, providing
//! commands for fuzzing parser executables, sampling generated documents, and
//! checking the generator against the reference parser.

mod cli;
mod config;
mod error;
mod handlers;
mod logging;
mod output;

use cli::{Cli, Commands};
use colored::control;
use config::FileConfig;
use error::Result;
use logging::{timing::Timer, LoggingConfig};
use output::OutputWriter;
use std::process;
use tracing::instrument;

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Initialize logging
    if let Err(e) = init_logging(&cli) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    // Run the application
    let result = run(cli);

    // Handle the result
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!(
                "{}",
                error::format_error(&e, control::SHOULD_COLORIZE.should_colorize())
            );

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
#[instrument(skip(cli), fields(command = ?cli.command))]
fn run(cli: Cli) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    // Load configuration
    let config = {
        tracing::debug!("Loading configuration");
        FileConfig::load_with_file(cli.config.as_deref())?
    };

    // Create output writer
    let mut output = OutputWriter::new(cli.use_color(), cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Run(args) => handlers::handle_run(args, &config, &mut output),
        Commands::Sample(args) => handlers::handle_sample(args, &config, &mut output),
        Commands::Selfcheck(args) => handlers::handle_selfcheck(args, &config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli) -> Result<()> {
    // Create logging configuration from CLI args and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());

    // Apply environment overrides
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
    }

    logging::init_logging(logging_config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn test_cli_parsing() {
        // Test verbose flag
        let cli = Cli::parse_from(["jsongrind", "-vv", "sample"]);
        assert_eq!(cli.verbosity_level(), 2);

        // Test quiet flag
        let cli = Cli::parse_from(["jsongrind", "--quiet", "sample"]);
        assert_eq!(cli.verbosity_level(), 0);

        // Selfcheck takes the shared grammar flags
        let cli = Cli::parse_from(["jsongrind", "selfcheck", "--max-fuel", "4", "-n", "100"]);
        match cli.command {
            Commands::Selfcheck(args) => {
                assert_eq!(args.max_fuel, Some(4));
                assert_eq!(args.examples, Some(100));
            }
            other => panic!("expected selfcheck command, got {other:?}"),
        }
    }
}
