use crate::commands::{open_app, print_message};
use crate::config::Config;
use anyhow::Result;
use sapirag_core::names;
use std::path::PathBuf;

pub async fn execute(workspace: String, path: PathBuf, config: &Config) -> Result<()> {
    let mut app = open_app(config)?;
    app.enter_workspace(&names::to_display(&workspace));

    let outcome = app.upload_path(&path).await?;
    println!("✅ Uploaded: {}", outcome.filename);
    print_message(outcome.message);
    Ok(())
}
