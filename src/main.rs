//! Show Organizer CLI
//!
//! A command-line tool for putting TV show folders into media-server order.

use clap::Parser;
use show_organizer::cli::{
    args::{Cli, Commands},
    commands::{execute, organize, plan},
};
use show_organizer::models::config;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let cli = Cli::parse();

    // Initialize logging
    init_logging(cli.verbose);

    let config = config::load_config();
    let cancel = spawn_cancel_listener();

    // Run the appropriate command
    match cli.command {
        Commands::Plan {
            input,
            output,
            output_file,
        } => {
            plan::plan(&input, &output, output_file.as_deref(), &config).await?;
        }

        Commands::Organize {
            input,
            output,
            dry_run,
        } => {
            organize::organize(&input, &output, dry_run, &config, cancel).await?;
        }

        Commands::Execute { plan_file } => {
            execute::execute_plan(&plan_file, &config, cancel).await?;
        }
    }

    Ok(())
}

/// Initialize the logging system.
fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("show_organizer=debug")
    } else {
        EnvFilter::new("show_organizer=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).without_time())
        .with(filter)
        .init();
}

/// Set the returned flag on Ctrl-C. Moves stop between files.
fn spawn_cancel_listener() -> Arc<AtomicBool> {
    let cancel = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&cancel);

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("Interrupt received, finishing the current file");
            flag.store(true, Ordering::SeqCst);
        }
    });

    cancel
}
