// smartstore/src/main.rs

mod cli;
mod commands;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging (Tracing)
    // RUST_LOG=info smartstore run ... pour voir les détails
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Prepare { project_dir, today } => commands::prepare::execute(project_dir, today)?,
        Commands::Load { project_dir } => commands::load::execute(project_dir).await?,
        Commands::Run { project_dir, today } => commands::run::execute(project_dir, today).await?,
        Commands::Scrub {
            input,
            output,
            fill,
            dedupe,
            normalize_text,
            renames,
            date_column,
        } => commands::scrub::execute(
            input,
            output,
            smartstore_core::application::ScrubOptions {
                fill,
                dedupe,
                normalize_text,
                renames,
                date_column,
            },
        )?,
        Commands::Inspect {
            project_dir,
            db_path,
            table,
            limit,
        } => {
            if let Err(report) = commands::inspect::execute(project_dir, db_path, table, limit) {
                eprintln!("{:?}", report);
                std::process::exit(1);
            }
        }
        Commands::Clean { project_dir } => commands::clean::execute(project_dir)?,
    }

    Ok(())
}
