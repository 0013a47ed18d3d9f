use crate::cli::FileCommands;
use crate::commands::{confirmer, open_app, print_message, target};
use crate::config::Config;
use anyhow::Result;
use sapirag_core::names;

pub async fn execute(action: FileCommands, config: &Config) -> Result<()> {
    let mut app = open_app(config)?;

    match action {
        FileCommands::List { workspace } => {
            app.select_workspace(&names::to_display(&workspace)).await?;
            let files = app.state().files();
            if files.is_empty() {
                println!("No PDFs in {}.", names::to_canonical(&workspace));
            } else {
                for f in files {
                    println!("{}", f);
                }
            }
        }
        FileCommands::Delete {
            workspace,
            filename,
            yes,
        } => {
            target(&mut app, &workspace, Some(&filename))?;
            let confirm = confirmer(config, yes);
            let message = app.delete_file(confirm.as_ref()).await?;
            print_message(message);
        }
    }

    Ok(())
}
