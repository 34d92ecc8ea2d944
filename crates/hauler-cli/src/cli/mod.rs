//! CLI for the hauler download manager.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use hauler_core::config;

use commands::{run_config, run_plan};

/// Top-level CLI for the hauler download manager.
#[derive(Debug, Parser)]
#[command(name = "hauler")]
#[command(about = "hauler: segmented download manager", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Assemble a download task and print the finished plan as JSON.
    Plan(PlanArgs),

    /// Show the config path and resolved contents.
    Config,
}

#[derive(Debug, Args)]
pub struct PlanArgs {
    /// Direct HTTP/HTTPS URL, or an HLS manifest URL with --hls.
    pub url: String,

    /// Destination file path (must name a file, not a directory).
    #[arg(long)]
    pub path: Option<String>,

    /// Overwrite the destination even if the path is already taken.
    #[arg(long)]
    pub force: bool,

    /// Prefer the server-supplied file name (Content-Disposition).
    #[arg(long)]
    pub server_name: bool,

    /// Extra request header. Repeatable.
    #[arg(long = "header", value_name = "NAME:VALUE")]
    pub headers: Vec<String>,

    /// Extra request parameter. Repeatable.
    #[arg(long = "param", value_name = "NAME=VALUE")]
    pub params: Vec<String>,

    /// Treat the URL as a segmented-stream (HLS) manifest.
    #[arg(long)]
    pub hls: bool,

    /// Preferred stream variant bandwidth in bits per second.
    #[arg(long, value_name = "BITS_PER_SEC")]
    pub bandwidth: Option<u64>,

    /// Skip stream parts that keep failing instead of failing the task.
    #[arg(long)]
    pub ignore_failed_parts: bool,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Plan(args) => run_plan(&cfg, &args)?,
            CliCommand::Config => run_config(&cfg)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
