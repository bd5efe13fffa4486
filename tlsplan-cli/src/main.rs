//! Tlsplan CLI - Command line interface for tlsplan
//!
//! Inspect real-world traffic-light plans shipped with the LuST scenario.

mod commands;

use std::process::ExitCode;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser, Subcommand};
use tlsplan_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{to_stdout, write_config, write_version, SummaryArgs};

const EXAMPLES: &str = "\
Examples:
  tlsplan
  tlsplan --id -10130 --id -10156 --phases";

/// Inspect real-world TLS plans included with the LuST scenario
#[derive(Parser, Debug)]
#[command(name = "tlsplan")]
#[command(author, version, about, long_about = None, after_help = EXAMPLES)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    summary: SummaryArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Show version information
    Version,

    /// Show current configuration
    Config,
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Logs go to stderr so stdout carries only the report
    let default_level = if cli.verbose { "info" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    // Load configuration with overrides
    let config = Config::load_with_overrides(cli.summary.tll_path.clone(), cli.summary.phases)?;

    if cli.verbose {
        tracing::info!(
            tll_path = %config.source.tll_path.display(),
            show_phases = config.report.show_phases,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Version) => {
            to_stdout(write_version)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Commands::Config) => {
            let config_path = Config::default_config_path();
            to_stdout(|out| write_config(&config, config_path.as_deref(), out))?;
            Ok(ExitCode::SUCCESS)
        }
        None => {
            let tll_path = &config.source.tll_path;
            if !tll_path.exists() {
                Cli::command()
                    .error(
                        ErrorKind::ValueValidation,
                        format!(
                            "Traffic light definition not found at {}. Run download_lust_scenario.sh first.",
                            tll_path.display()
                        ),
                    )
                    .exit();
            }

            let status = cli.summary.execute(cli.verbose, &config)?;
            Ok(ExitCode::from(status))
        }
    }
}
