mod cli;
mod commands;
mod config;
mod overlay;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    sapirag_core::init_logging();

    // Parse CLI args
    let cli = Cli::parse();

    // Handle init command early (doesn't need config)
    if let Commands::Init { path } = &cli.command {
        return commands::init::run_init(path);
    }

    // Load config, --url wins over file and environment
    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(url) = cli.url {
        config.server.base_url = url;
    }

    match cli.command {
        Commands::Init { .. } => {
            // Already handled above
            unreachable!()
        }
        Commands::Workspaces { action } => {
            commands::workspaces::execute(action, &config).await?;
        }
        Commands::Files { action } => {
            commands::files::execute(action, &config).await?;
        }
        Commands::Upload { workspace, path } => {
            commands::upload::execute(workspace, path, &config).await?;
        }
        Commands::Search {
            workspace,
            file,
            mode,
            query,
        } => {
            commands::search::execute(workspace, file, mode, query, &config).await?;
        }
        Commands::Ask {
            workspace,
            file,
            mode,
            question,
        } => {
            commands::ask::execute(workspace, file, mode, question, &config).await?;
        }
        Commands::Shell => {
            commands::shell::execute(&config).await?;
        }
    }

    Ok(())
}
