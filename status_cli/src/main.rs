mod commands;
mod ui;

use clap::{Parser, Subcommand};
use commands::check::CheckArgs;
use std::path::PathBuf;
use tracing::Level;

#[derive(Parser)]
#[command(name = "status-page")]
#[command(about = "Terminal status page for a service healthcheck endpoint", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable quiet mode (errors only)
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Request the healthcheck once and render the result
    Check {
        /// View config file (YAML, TOML, or JSON)
        #[arg(short, long)]
        config: Option<PathBuf>,

        /// API base URL, overrides NEXT_PUBLIC_API_BASE_URL
        #[arg(short, long)]
        base_url: Option<String>,

        /// Origin used to resolve a relative request URL
        #[arg(short, long)]
        origin: Option<String>,

        /// Title rendered above the status
        #[arg(short, long)]
        title: Option<String>,

        /// Render the error message once instead of twice
        #[arg(long)]
        single_error: bool,

        /// Print the settled view state as JSON
        #[arg(long)]
        json: bool,
    },

    /// Validate a view config file
    Validate {
        /// Path to config file
        config_file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else if cli.quiet {
        Level::ERROR
    } else {
        Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Check {
            config,
            base_url,
            origin,
            title,
            single_error,
            json,
        } => {
            let healthy = commands::check::execute(CheckArgs {
                config,
                base_url,
                origin,
                title,
                single_error,
                json,
            })
            .await?;

            if !healthy {
                std::process::exit(1);
            }
        }

        Commands::Validate { config_file } => {
            commands::validate::execute(config_file).await?;
        }
    }

    Ok(())
}
