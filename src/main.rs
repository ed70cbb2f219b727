mod commands;
mod google;
mod logging;
mod settings;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Result;
use bcscal_core::ReconcileOptions;
use clap::{Parser, Subcommand};

use commands::Workspace;
use settings::Settings;

#[derive(Parser)]
#[command(name = "bcscal")]
#[command(about = "Publish the class catalog to Google Calendar")]
struct Cli {
    /// Enable debug logging
    #[arg(long, global = true)]
    debug: bool,

    /// Settings file (defaults to ~/.config/bcscal/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Authenticate with Google Calendar
    Auth,
    /// Insert every catalog item, replacing overlapping events bcscal created
    Sync {
        /// Only operate on this category
        #[arg(short, long)]
        category: Option<String>,

        /// Keep existing events even when they overlap a new one
        #[arg(long)]
        no_override: bool,

        /// Log the changes instead of applying them
        #[arg(long)]
        dry_run: bool,
    },
    /// Delete all upcoming events bcscal created for a category
    Prune {
        category: String,

        /// Log the changes instead of applying them
        #[arg(long)]
        dry_run: bool,
    },
    /// List catalog categories and their target calendars
    Categories,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.debug);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Auth => commands::auth::run().await,
        Commands::Sync {
            category,
            no_override,
            dry_run,
        } => {
            let workspace = Workspace::load(&settings)?;
            let categories = workspace.catalog.select(category.as_deref())?;
            let calendar = commands::connect_default(dry_run).await?;
            let options = ReconcileOptions {
                timezone: workspace.timezone,
                override_existing: !no_override,
            };
            commands::sync::run(calendar.as_ref(), &categories, options).await?;
            Ok(())
        }
        Commands::Prune { category, dry_run } => {
            let workspace = Workspace::load(&settings)?;
            let category = workspace.catalog.get(&category)?;
            let calendar = commands::connect_default(dry_run).await?;
            let options = ReconcileOptions {
                timezone: workspace.timezone,
                override_existing: true,
            };
            commands::prune::run(calendar.as_ref(), category, options).await?;
            Ok(())
        }
        Commands::Categories => {
            let workspace = Workspace::load(&settings)?;
            let calendar = commands::connect_default(false).await?;
            commands::categories::run(calendar.as_ref(), &workspace.catalog).await
        }
    }
}
