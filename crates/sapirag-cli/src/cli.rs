use clap::{Parser, Subcommand, ValueEnum};
use sapirag_core::Mode;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// List workspaces
    List,
    /// Create a workspace (name is lower-cased and prefixed)
    Create {
        /// New workspace name
        name: String,
    },
    /// Delete a workspace and every document in it
    Delete {
        /// Workspace name, with or without the "workspace-" prefix
        workspace: String,
    },
}

#[derive(Subcommand)]
pub enum FileCommands {
    /// List PDFs in a workspace
    List {
        /// Workspace name, with or without the "workspace-" prefix
        workspace: String,
    },
    /// Delete a PDF and its index entries
    Delete {
        workspace: String,
        filename: String,
        /// Skip the confirmation prompt
        #[arg(long, short)]
        yes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq)]
pub enum ModeArg {
    /// Lexical keyword matching
    Keyword,
    /// Vector similarity
    Semantic,
    /// Keyword and vector results combined
    Hybrid,
}

impl From<ModeArg> for Mode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Keyword => Mode::Keyword,
            ModeArg::Semantic => Mode::Semantic,
            ModeArg::Hybrid => Mode::Hybrid,
        }
    }
}

#[derive(Parser)]
#[command(name = "sapirag")]
#[command(about = "SapiRAG - search and question answering over PDF workspaces", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Server base URL (overrides config and SAPIRAG_URL)
    #[arg(long, global = true)]
    pub url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new config file
    Init {
        /// Path for new config file
        #[arg(default_value = "sapirag.toml")]
        path: PathBuf,
    },
    /// Manage workspaces
    Workspaces {
        #[command(subcommand)]
        action: WorkspaceCommands,
    },
    /// Manage PDFs inside a workspace
    Files {
        #[command(subcommand)]
        action: FileCommands,
    },
    /// Upload a PDF and generate its embeddings
    Upload {
        workspace: String,
        /// Local PDF to upload
        path: PathBuf,
    },
    /// Search a file or a whole workspace
    Search {
        workspace: String,
        /// Restrict to one file (default: whole workspace)
        #[arg(long)]
        file: Option<String>,
        #[arg(long, default_value = "keyword", value_enum)]
        mode: ModeArg,
        /// Search query
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Ask a question answered from the indexed documents
    Ask {
        workspace: String,
        /// Restrict to one file (default: whole workspace)
        #[arg(long)]
        file: Option<String>,
        #[arg(long, default_value = "semantic", value_enum)]
        mode: ModeArg,
        /// Question text
        #[arg(required = true, num_args = 1..)]
        question: Vec<String>,
    },
    /// Interactive session
    Shell,
}
