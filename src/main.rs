// ABOUTME: Entry point for the cloudformer CLI application.
// ABOUTME: Parses arguments and dispatches to appropriate command handlers.

mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use cloudformer::config::{self, Config};
use cloudformer::error::Result;
use cloudformer::output::{Output, OutputMode};
use std::env;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };

    match run(cli, mode).await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(e) => {
            Output::new(mode).error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Run the selected command. `Ok(false)` means it ran but did not succeed.
async fn run(cli: Cli, mode: OutputMode) -> Result<bool> {
    let output = Output::new(mode);

    let command = match cli.command {
        Commands::Init {
            stack,
            region,
            force,
        } => {
            let cwd = env::current_dir()?;
            config::init_config(&cwd, stack.as_deref(), region.as_deref(), force)?;
            output.success(&format!("Created {}", config::CONFIG_FILENAME));
            return Ok(true);
        }
        command => command,
    };

    let config = load_config(cli.env.as_deref())?;

    match command {
        Commands::Apply => commands::apply(config, output).await,
        Commands::Delete => commands::delete(config, output).await,
        Commands::Status => commands::status(config, output).await,
        Commands::Events => commands::events(config, output).await,
        Commands::Outputs => commands::outputs(config, output).await,
        Commands::Validate => commands::validate(config, output).await,
        // Handled above
        Commands::Init { .. } => Ok(true),
    }
}

/// Discover the config in the working directory and apply environment overrides.
fn load_config(environment: Option<&str>) -> Result<Config> {
    let cwd = env::current_dir()?;
    let config = Config::discover(&cwd)?;

    // Apply environment overrides if specified
    match environment {
        Some(name) => config.for_environment(name),
        None => Ok(config),
    }
}
