use crate::cli::ModeArg;
use crate::commands::{open_app, target};
use crate::config::Config;
use anyhow::Result;

pub async fn execute(
    workspace: String,
    file: Option<String>,
    mode: ModeArg,
    query: Vec<String>,
    config: &Config,
) -> Result<()> {
    let mut app = open_app(config)?;
    target(&mut app, &workspace, file.as_deref())?;
    app.set_search_mode(mode.into());

    app.search(&query.join(" ")).await?;

    let rendered = app.render_results();
    if rendered.is_empty() {
        println!("No results.");
    } else {
        print!("{}", rendered);
    }
    Ok(())
}
