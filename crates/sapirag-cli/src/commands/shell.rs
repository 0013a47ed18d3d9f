use crate::commands::{app_over, confirmer, describe, print_message};
use crate::config::Config;
use anyhow::Result;
use sapirag_core::{App, AppError, Mode, Scope};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use tracing::info;

const HELP: &str = "\
Commands:
  workspaces            refresh and list workspaces
  use <workspace>       select a workspace and load its PDFs
  create <name>         create a workspace
  drop                  delete the selected workspace
  files                 refresh and list PDFs in the selected workspace
  open <file>           make a PDF the active file
  scope file|workspace  search one file or the whole workspace
  upload <path>         upload a PDF and generate its embeddings
  rm                    delete the active file
  mode <mode>           search mode: keyword, semantic or hybrid
  rag-mode <mode>       retrieval mode used by ask
  search <query>        run a search
  ask <question>        ask a question
  results               show the last results
  answer                show the last answer
  status                show the current selection
  help                  show this help
  exit                  leave the shell";

/// One parsed shell line
#[derive(Debug, PartialEq)]
pub enum ShellCommand {
    Workspaces,
    Use(String),
    Create(String),
    Drop,
    Files,
    Open(String),
    Scope(Scope),
    Upload(PathBuf),
    Remove,
    Mode(Mode),
    RagMode(Mode),
    Search(String),
    Ask(String),
    Results,
    Answer,
    Status,
    Help,
    Exit,
}

/// Parse one input line. Empty lines parse to `Ok(None)`.
pub fn parse_command(line: &str) -> Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (verb, rest) = match line.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (line, ""),
    };

    let needs_arg = |what: &str| {
        if rest.is_empty() {
            Err(format!("usage: {} <{}>", verb, what))
        } else {
            Ok(rest.to_string())
        }
    };

    let cmd = match verb.to_lowercase().as_str() {
        "workspaces" | "ws" => ShellCommand::Workspaces,
        "use" => ShellCommand::Use(needs_arg("workspace")?),
        "create" => ShellCommand::Create(needs_arg("name")?),
        "drop" => ShellCommand::Drop,
        "files" | "ls" => ShellCommand::Files,
        "open" => ShellCommand::Open(needs_arg("file")?),
        "scope" => ShellCommand::Scope(needs_arg("file|workspace")?.parse()?),
        "upload" => ShellCommand::Upload(PathBuf::from(needs_arg("path")?)),
        "rm" => ShellCommand::Remove,
        "mode" => ShellCommand::Mode(needs_arg("mode")?.parse()?),
        "rag-mode" => ShellCommand::RagMode(needs_arg("mode")?.parse()?),
        // Blank queries reach the app so it can reject them itself
        "search" => ShellCommand::Search(rest.to_string()),
        "ask" => ShellCommand::Ask(rest.to_string()),
        "results" => ShellCommand::Results,
        "answer" => ShellCommand::Answer,
        "status" => ShellCommand::Status,
        "help" | "?" => ShellCommand::Help,
        "exit" | "quit" => ShellCommand::Exit,
        other => return Err(format!("unknown command '{}', try 'help'", other)),
    };
    Ok(Some(cmd))
}

pub async fn execute(config: &Config) -> Result<()> {
    let api = config.build_api()?;
    let base_url = api.base_url().to_string();
    let mut app = app_over(api);
    info!(url = %base_url, "Starting shell session");

    println!("SapiRAG [{}] - Type 'help' for commands, 'exit' to quit", base_url);
    println!("---");

    if let Err(e) = app.init().await {
        eprintln!("{}", describe(&e));
    }
    print_workspaces(&app);

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("{}> ", prompt(&app));
        stdout.flush()?;

        let mut input = String::new();
        if stdin.lock().read_line(&mut input)? == 0 {
            break;
        }

        let cmd = match parse_command(&input) {
            Ok(Some(cmd)) => cmd,
            Ok(None) => continue,
            Err(msg) => {
                eprintln!("{}", msg);
                continue;
            }
        };

        if cmd == ShellCommand::Exit {
            break;
        }

        if let Err(e) = dispatch(&mut app, cmd, config).await {
            eprintln!("{}", describe(&e));
        }
    }

    Ok(())
}

async fn dispatch(app: &mut App, cmd: ShellCommand, config: &Config) -> Result<(), AppError> {
    match cmd {
        ShellCommand::Workspaces => {
            app.refresh_workspaces().await?;
            print_workspaces(app);
        }
        ShellCommand::Use(name) => {
            app.select_workspace(&sapirag_core::names::to_display(&name)).await?;
            print_files(app);
        }
        ShellCommand::Create(name) => {
            print_message(app.create_workspace(&name).await?);
        }
        ShellCommand::Drop => {
            print_message(app.delete_workspace().await?);
        }
        ShellCommand::Files => {
            app.refresh_files().await?;
            print_files(app);
        }
        ShellCommand::Open(file) => app.select_file(&file)?,
        ShellCommand::Scope(scope) => app.set_scope(scope),
        ShellCommand::Upload(path) => {
            let outcome = app.upload_path(&path).await?;
            println!("✅ Uploaded: {}", outcome.filename);
            print_message(outcome.message);
        }
        ShellCommand::Remove => {
            let confirm = confirmer(config, false);
            print_message(app.delete_file(confirm.as_ref()).await?);
        }
        ShellCommand::Mode(mode) => app.set_search_mode(mode),
        ShellCommand::RagMode(mode) => app.set_rag_mode(mode),
        ShellCommand::Search(query) => {
            app.search(&query).await?;
            print_results(app);
        }
        ShellCommand::Ask(question) => {
            app.ask(&question).await?;
            print!("{}", app.render_answer());
        }
        ShellCommand::Results => print_results(app),
        ShellCommand::Answer => print!("{}", app.render_answer()),
        ShellCommand::Status => print_status(app),
        ShellCommand::Help => println!("{}", HELP),
        ShellCommand::Exit => {}
    }
    Ok(())
}

fn prompt(app: &App) -> String {
    let state = app.state();
    match (state.selected_workspace(), state.scope()) {
        ("", _) => String::new(),
        (ws, Scope::Workspace) => format!("{}/*", ws),
        (ws, Scope::File) => format!("{}/{}", ws, state.active_file()),
    }
}

fn print_workspaces(app: &App) {
    let workspaces = app.state().workspaces();
    if workspaces.is_empty() {
        println!("No workspaces.");
    }
    for ws in workspaces {
        println!("  {}", ws);
    }
}

fn print_files(app: &App) {
    let state = app.state();
    if state.files().is_empty() {
        println!("No PDFs.");
    }
    for f in state.files() {
        let marker = if f == state.active_file() { "*" } else { " " };
        println!(" {} {}", marker, f);
    }
}

fn print_results(app: &App) {
    let rendered = app.render_results();
    if rendered.is_empty() {
        println!("No results.");
    } else {
        print!("{}", rendered);
    }
}

fn print_status(app: &App) {
    let state = app.state();
    let or_none = |s: &str| if s.is_empty() { "(none)".to_string() } else { s.to_string() };
    println!("Workspace:   {}", or_none(state.selected_workspace()));
    println!(
        "Scope:       {}",
        match state.scope() {
            Scope::File => "file",
            Scope::Workspace => "workspace",
        }
    );
    let file_note = if state.file_selection_enabled() { "" } else { " (disabled)" };
    println!("Active file: {}{}", or_none(state.active_file()), file_note);
    println!("Search mode: {}", state.search_mode().label());
    println!("RAG mode:    {}", state.rag_mode().label());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_line_is_none() {
        assert_eq!(parse_command("   \n").unwrap(), None);
    }

    #[test]
    fn test_parse_arguments_keep_spaces() {
        assert_eq!(
            parse_command("search  revenue by quarter \n").unwrap(),
            Some(ShellCommand::Search("revenue by quarter".into()))
        );
        assert_eq!(
            parse_command("open Annual Report.pdf").unwrap(),
            Some(ShellCommand::Open("Annual Report.pdf".into()))
        );
    }

    #[test]
    fn test_search_without_query_still_parses() {
        assert_eq!(
            parse_command("search").unwrap(),
            Some(ShellCommand::Search(String::new()))
        );
    }

    #[test]
    fn test_parse_modes_and_scope() {
        assert_eq!(
            parse_command("mode semantic").unwrap(),
            Some(ShellCommand::Mode(Mode::Semantic))
        );
        assert_eq!(
            parse_command("rag-mode hybrid").unwrap(),
            Some(ShellCommand::RagMode(Mode::Hybrid))
        );
        assert_eq!(
            parse_command("scope all").unwrap(),
            Some(ShellCommand::Scope(Scope::Workspace))
        );
        assert!(parse_command("mode fuzzy").is_err());
    }

    #[test]
    fn test_missing_argument_is_error() {
        let err = parse_command("use").unwrap_err();
        assert!(err.contains("usage: use"));
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_command("frobnicate").is_err());
        assert_eq!(parse_command("QUIT").unwrap(), Some(ShellCommand::Exit));
    }
}
