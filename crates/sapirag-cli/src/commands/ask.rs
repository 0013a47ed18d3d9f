use crate::cli::ModeArg;
use crate::commands::{open_app, target};
use crate::config::Config;
use anyhow::Result;

pub async fn execute(
    workspace: String,
    file: Option<String>,
    mode: ModeArg,
    question: Vec<String>,
    config: &Config,
) -> Result<()> {
    let mut app = open_app(config)?;
    target(&mut app, &workspace, file.as_deref())?;
    app.set_rag_mode(mode.into());

    app.ask(&question.join(" ")).await?;
    print!("{}", app.render_answer());
    Ok(())
}
