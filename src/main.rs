//! Murmur CLI entry point.

use anyhow::Result;
use clap::Parser;
use murmur::cli::{commands, Cli, Commands};
use murmur::config::Settings;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let settings = match &cli.config {
        Some(path) => Settings::load_from(Some(&std::path::PathBuf::from(path)))?,
        None => Settings::load()?,
    };

    // Initialize logging
    let log_level = match cli.verbose {
        0 => "warn".to_string(),
        1 => settings.general.log_level.clone(),
        2 => "debug".to_string(),
        _ => "trace".to_string(),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("murmur={}", log_level)),
        ))
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    std::fs::create_dir_all(settings.data_dir())?;

    match &cli.command {
        Commands::Ask {
            corpus,
            query,
            k,
            model,
        } => {
            commands::run_ask(corpus, query, *k, model.clone(), settings).await?;
        }

        Commands::Search { corpus, query, k } => {
            commands::run_search(corpus, query, *k, settings).await?;
        }

        Commands::Corpus { action } => {
            commands::run_corpus(action, settings).await?;
        }

        Commands::History { action } => {
            commands::run_history(action, settings).await?;
        }

        Commands::Keys { action } => {
            commands::run_keys(action, settings).await?;
        }

        Commands::Models => {
            commands::run_models(settings).await?;
        }

        Commands::Config { action } => {
            commands::run_config(action, cli.config.as_deref(), settings)?;
        }
    }

    Ok(())
}
