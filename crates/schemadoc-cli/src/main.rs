//! Schemadoc CLI - render OpenAPI / JSON Schema entities into markdown
//!
//! This is the main entry point for the schemadoc application, providing
//! commands for rendering schema tables and body sections, merging reference
//! graphs and printing examples.
//!
//! Copyright (c) 2025 Specado Team
//! Licensed under the Apache-2.0 license

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

fn main() {
    // Parse command-line arguments
    let cli = Cli::parse_args();

    // Set up colored output
    control::set_override(cli.use_color());

    // Run the application
    let result = run(cli);

    // Handle the result
    match result {
        Ok(()) => {
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}", error::format_error(&e, control::SHOULD_COLORIZE.should_colorize()));

            if e.should_show_help() {
                eprintln!("\nFor more information, try '--help'");
            }

            process::exit(e.exit_code());
        }
    }
}

/// Main application logic
fn run(cli: Cli) -> Result<()> {
    // Configuration comes first: it carries the logging section
    let config = Config::load_with_file(cli.config.as_deref())?;

    if let Err(e) = init_logging(&cli, &config) {
        eprintln!("Failed to initialize logging: {}", e);
    }

    if !config.output.color {
        control::set_override(false);
    }

    execute(cli, &config)
}

#[instrument(skip(cli, config), fields(command = ?cli.command))]
fn execute(cli: Cli, config: &Config) -> Result<()> {
    let _timer = Timer::new("cli_execution");

    // Create output writer
    let use_color = control::SHOULD_COLORIZE.should_colorize();
    let mut output = OutputWriter::new(use_color, cli.quiet);

    tracing::info!(
        command = ?cli.command,
        verbosity = cli.verbosity_level(),
        "Executing command"
    );

    // Handle the subcommand
    match cli.command {
        Commands::Render(args) => handlers::handle_render(args, config, &mut output),
        Commands::Body(args) => handlers::handle_body(args, config, &mut output),
        Commands::Merge(args) => handlers::handle_merge(args, config, &mut output),
        Commands::Example(args) => handlers::handle_example(args, config, &mut output),
        Commands::Completions(args) => handlers::handle_completions(args),
    }
}

/// Initialize the logging system
fn init_logging(cli: &Cli, config: &Config) -> Result<()> {
    // Create logging configuration from CLI args, the config file and environment
    let mut logging_config = LoggingConfig::from_verbosity(cli.verbosity_level());
    logging_config.apply_settings(&config.logging, cli.verbosity_level());
    logging_config.merge_with_env();

    // If quiet mode, only log errors
    if cli.quiet {
        logging_config.level = "error".to_string();
        logging_config.console = false;
    }

    logging::init_logging(logging_config)
}
