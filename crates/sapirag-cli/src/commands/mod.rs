pub mod ask;
pub mod files;
pub mod init;
pub mod search;
pub mod shell;
pub mod upload;
pub mod workspaces;

use crate::config::Config;
use crate::overlay;
use anyhow::Result;
use sapirag_core::{App, AppError, AssumeYes, Confirm, HttpApi, Scope};
use std::io::{self, BufRead, Write};
use std::sync::Arc;

/// Build an app over the configured server with the loader overlay attached
pub fn open_app(config: &Config) -> Result<App> {
    Ok(app_over(config.build_api()?))
}

/// Wrap an already-built client in an app and attach the loader overlay
pub fn app_over(api: HttpApi) -> App {
    let app = App::new(Arc::new(api));
    overlay::spawn(app.loader().subscribe());
    app
}

/// Point a one-shot command at a workspace and optional file
pub fn target(app: &mut App, workspace: &str, file: Option<&str>) -> Result<()> {
    app.enter_workspace(&sapirag_core::names::to_display(workspace));
    match file {
        Some(f) => {
            app.set_scope(Scope::File);
            app.select_file(f)?;
        }
        None => app.set_scope(Scope::Workspace),
    }
    Ok(())
}

/// Asks on stdin; anything but y/yes declines
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{} [y/N] ", prompt);
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut answer = String::new();
        if io::stdin().lock().read_line(&mut answer).is_err() {
            return false;
        }
        matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
    }
}

/// Confirmation policy from config and `--yes`
pub fn confirmer(config: &Config, assume_yes: bool) -> Box<dyn Confirm> {
    if assume_yes || !config.ui.confirm_deletes {
        Box::new(AssumeYes)
    } else {
        Box::new(StdinConfirm)
    }
}

/// Print a server message, if it sent one
pub fn print_message(message: Option<String>) {
    if let Some(msg) = message {
        println!("{}", msg.trim());
    }
}

/// One-line description of an error for the shell
pub fn describe(err: &AppError) -> String {
    match err {
        AppError::Rejected(r) => format!("⚠ {}", r),
        other => format!("Error: {}", other),
    }
}
