//! Subgist main entry point
//!
//! This is the command-line interface for the subscription merger.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::sync::Arc;
use subgist::config::{load_config_file_with_hash, ConfigSource, EnvSource, Layered};
use subgist::schedule::{run_interval, select_mode, Mode};
use subgist::{Orchestrator, Server};
use tracing_subscriber::EnvFilter;

/// Subgist: merge subscription links and publish them to a Gist
///
/// Links are read from REMOTE_SOURCE_URL (falling back to SOURCE_FILE),
/// merged by the conversion service at BASE_URL and uploaded to GIST_ID.
/// All settings come from the environment, optionally layered over a
/// TOML file given with --config.
#[derive(Parser, Debug)]
#[command(name = "subgist")]
#[command(version)]
#[command(about = "Merge subscription links and publish them to a Gist", long_about = None)]
struct Cli {
    /// TOML file with default settings; environment variables take precedence
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, conflicts_with = "verbose", global = true)]
    quiet: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the pipeline once, or in a loop when RUN_INTERVAL_SECONDS is set
    ///
    /// Without a subcommand, a set CRON_SCHEDULE starts the server instead.
    Run {
        /// Run a single time even if an interval or cron schedule is configured
        #[arg(long)]
        once: bool,
    },

    /// Serve the HTTP trigger on WEB_PORT, with cron runs when CRON_SCHEDULE is set
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    setup_logging(cli.verbose, cli.quiet);

    let source = build_source(cli.config.as_deref())?;
    let orchestrator = Orchestrator::new(source)?;

    let resolved = orchestrator.resolve_config();
    for warning in &resolved.warnings {
        tracing::warn!("{}", warning);
    }

    let (serve, force_once) = match cli.command {
        Some(Command::Serve) => (true, false),
        Some(Command::Run { once }) => (false, once),
        None => (false, false),
    };

    match select_mode(&resolved.config.schedule, serve, force_once) {
        Mode::Once => {
            let outcome = orchestrator.run().await;
            if outcome.success {
                tracing::info!("{}", outcome.message);
            } else {
                tracing::error!("{}", outcome.message);
            }
        }
        Mode::Interval(interval) => {
            tracing::info!("Running every {}s", interval.as_secs());
            run_interval(&orchestrator, interval, None).await;
        }
        Mode::Serve { port, cron } => {
            let server = Server::new(Arc::new(orchestrator), port, cron.as_deref());
            server.serve().await?;
        }
    }

    Ok(())
}

/// Environment first, then the optional config file
fn build_source(config: Option<&std::path::Path>) -> anyhow::Result<impl ConfigSource> {
    let mut layered = Layered::new().push(EnvSource);

    if let Some(path) = config {
        tracing::info!("Loading configuration from: {}", path.display());
        match load_config_file_with_hash(path) {
            Ok((file, hash)) => {
                tracing::info!("Configuration loaded successfully (hash: {})", hash);
                layered = layered.push(file);
            }
            Err(e) => {
                tracing::error!("Failed to load configuration: {}", e);
                return Err(e.into());
            }
        }
    }

    Ok(layered)
}

/// Sets up the logging/tracing subscriber based on verbosity level
fn setup_logging(verbose: u8, quiet: bool) {
    let filter = if quiet {
        // Only show errors
        EnvFilter::new("error")
    } else {
        match verbose {
            0 => EnvFilter::new("subgist=info,warn"),
            1 => EnvFilter::new("subgist=debug,info"),
            2 => EnvFilter::new("subgist=trace,debug"),
            _ => EnvFilter::new("trace"),
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .init();
}
