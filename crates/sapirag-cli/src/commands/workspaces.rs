use crate::cli::WorkspaceCommands;
use crate::commands::{open_app, print_message};
use crate::config::Config;
use anyhow::Result;
use sapirag_core::names;
use tracing::info;

pub async fn execute(action: WorkspaceCommands, config: &Config) -> Result<()> {
    let mut app = open_app(config)?;

    match action {
        WorkspaceCommands::List => {
            app.refresh_workspaces().await?;
            let workspaces = app.state().workspaces();
            if workspaces.is_empty() {
                println!("No workspaces.");
            } else {
                for ws in workspaces {
                    println!("{}", ws);
                }
            }
        }
        WorkspaceCommands::Create { name } => {
            let message = app.create_workspace(&name).await?;
            info!(name = %name, "Workspace created");
            print_message(message);
        }
        WorkspaceCommands::Delete { workspace } => {
            app.enter_workspace(&names::to_display(&workspace));
            let message = app.delete_workspace().await?;
            print_message(message);
        }
    }

    Ok(())
}
