// SPDX-License-Identifier: MIT OR Apache-2.0
#![deny(unsafe_code)]
mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::warn;
use tracing_subscriber::EnvFilter;
use xfer_config::{XferConfig, load_config, merge_configs, validate_config};
use xfer_ssh::{CancellationToken, Tool};

#[derive(Parser, Debug)]
#[command(name = "xfer", version, about = "Locate and run the ssh and scp clients")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug logging.
    #[arg(long, global = true)]
    debug: bool,

    /// TOML config file with transport defaults.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Search only this directory for the client (overrides MUTAGEN_SSH_PATH).
    #[arg(long, global = true)]
    search_path: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the executable that would be invoked for a tool.
    Locate {
        #[arg(value_enum)]
        tool: ToolArg,
    },

    /// Run a tool with the configured transport flags prepended.
    Exec {
        #[arg(value_enum)]
        tool: ToolArg,

        /// Enable compression.
        #[arg(long)]
        compress: bool,

        /// Connection timeout in seconds.
        #[arg(long, value_parser = clap::value_parser!(u32).range(1..=3600))]
        timeout: Option<u32>,

        /// Print the command instead of running it.
        #[arg(long)]
        dry_run: bool,

        /// With --dry-run, print JSON instead of a command line.
        #[arg(long, requires = "dry_run")]
        json: bool,

        /// Arguments passed to the tool verbatim.
        #[arg(last = true)]
        args: Vec<String>,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ToolArg {
    Ssh,
    Scp,
}

impl From<ToolArg> for Tool {
    fn from(v: ToolArg) -> Self {
        match v {
            ToolArg::Ssh => Tool::Ssh,
            ToolArg::Scp => Tool::Scp,
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            if let Some(hint) = commands::hint(&err) {
                eprintln!("hint: {hint}");
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let mut config = load_config(cli.config.as_deref()).context("load config")?;

    if let Commands::Exec {
        compress, timeout, ..
    } = &cli.command
    {
        let overlay = XferConfig {
            log_level: None,
            compression: compress.then_some(true),
            connect_timeout_secs: *timeout,
        };
        config = merge_configs(config, overlay);
    }

    let warnings = validate_config(&config).context("invalid config")?;
    init_tracing(cli.debug, config.log_level.as_deref());
    for warning in &warnings {
        warn!(target: "xfer", "{warning}");
    }

    let resolver = commands::resolver(cli.search_path);

    match cli.command {
        Commands::Locate { tool } => {
            let path = commands::locate(&resolver, tool.into())?;
            println!("{}", path.display());
            Ok(ExitCode::SUCCESS)
        }
        Commands::Exec {
            tool,
            dry_run,
            json,
            args,
            ..
        } => {
            let tool = Tool::from(tool);
            let cancel = (!dry_run).then(CancellationToken::new);
            let descriptor = commands::prepare(&resolver, tool, &config, args, cancel)?;
            if dry_run {
                println!("{}", commands::render_dry_run(tool, &descriptor, json)?);
                return Ok(ExitCode::SUCCESS);
            }
            commands::run(descriptor).await
        }
    }
}

fn init_tracing(debug: bool, level: Option<&str>) {
    let filter = if debug {
        EnvFilter::new("xfer=debug,xfer_ssh=debug")
    } else {
        let level = level.unwrap_or("info");
        EnvFilter::new(format!("xfer={level},xfer_ssh={level}"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
