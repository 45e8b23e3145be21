use std::io;

use clap::{Parser, Subcommand};
use label_roller_cli::{
    commands::{
        auth_cmd::{self, AuthCommands},
        create_manager,
        delete_cmd::{self, DeleteArgs},
        pull_cmd::{self, PullArgs},
        push_cmd::{self, PushArgs},
        rename_cmd::{self, RenameArgs},
    },
    config::AppConfig,
    errors::Error,
};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Environment variable holding the log filter, e.g. `label_roller_core=debug`
const LOG_ENV: &str = "LABEL_ROLLER_LOG";

#[cfg(test)]
#[path = "main_tests.rs"]
mod tests;

/// LabelRoller CLI: Synchronize GitHub issue labels from a label file
#[derive(Parser)]
#[command(name = "label-roller")]
#[command(about = "Synchronize GitHub issue labels from a label file", long_about = None)]
struct Cli {
    /// Path to the configuration file
    #[arg(long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage GitHub credentials
    #[command(subcommand)]
    Auth(AuthCommands),

    /// Delete a label, the GitHub default labels, or both
    Delete(DeleteArgs),

    /// Print the labels of a repository as JSON
    Pull(PullArgs),

    /// Synchronize labels from a JSON file onto repositories
    Push(PushArgs),

    /// Rename a label, keeping its color and description
    Rename(RenameArgs),

    /// Show the CLI version
    Version,
}

async fn run(cli: Cli) -> Result<(), Error> {
    let config_path = cli.config.as_deref();

    match &cli.command {
        Commands::Auth(cmd) => auth_cmd::execute(cmd, config_path).await,
        Commands::Delete(args) => {
            let manager = create_manager(&AppConfig::load_or_default(config_path)?)?;
            delete_cmd::execute(&manager, args, io::stdout().lock()).await
        }
        Commands::Pull(args) => {
            let manager = create_manager(&AppConfig::load_or_default(config_path)?)?;
            pull_cmd::execute(&manager, args, io::stdout().lock()).await
        }
        Commands::Push(args) => {
            let manager = create_manager(&AppConfig::load_or_default(config_path)?)?;
            push_cmd::execute(&manager, args, io::stdin().lock(), io::stdout().lock()).await
        }
        Commands::Rename(args) => {
            let manager = create_manager(&AppConfig::load_or_default(config_path)?)?;
            rename_cmd::execute(&manager, args, io::stdout().lock()).await
        }
        Commands::Version => {
            // Print version info from baked-in value
            println!(
                "label-roller version {}",
                option_env!("LABEL_ROLLER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    // Logs go to stderr so that pull output on stdout stays valid JSON
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("off")))
        .init();

    let cli = Cli::parse();
    debug!("Starting label-roller");

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
