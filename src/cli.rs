// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: Defines all subcommands and their arguments.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "cloudformer")]
#[command(about = "Create, update and watch infrastructure stacks from a template")]
#[command(version)]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print final results (for CI)
    #[arg(short, long, global = true, conflicts_with = "json")]
    pub quiet: bool,

    /// Print JSON lines instead of text
    #[arg(long, global = true)]
    pub json: bool,

    /// Environment overrides to apply (defined in config)
    #[arg(short, long, global = true)]
    pub env: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new cloudformer.yml configuration file
    Init {
        /// Stack name
        #[arg(long)]
        stack: Option<String>,

        /// Region
        #[arg(long)]
        region: Option<String>,

        /// Overwrite an existing configuration file
        #[arg(long)]
        force: bool,
    },

    /// Create the stack, or update it if it already exists
    Apply,

    /// Delete the stack
    Delete,

    /// Show stack status
    Status,

    /// Show the stack's full event log
    Events,

    /// Show the stack's outputs
    Outputs,

    /// Validate the template without deploying
    Validate,
}
