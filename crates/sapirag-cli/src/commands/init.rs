use anyhow::Result;
use std::path::Path;

pub const DEFAULT_CONFIG: &str = r#"# SapiRAG client configuration

[server]
base_url = "http://127.0.0.1:8000"
connect_timeout_secs = 10
# request_timeout_secs = 120

[rag]
# "hosted" uses /rag/rag, "local" uses /rag/rag-ollama
backend = "hosted"

[ui]
confirm_deletes = true
"#;

/// Initialize a new config file
pub fn run_init(path: &Path) -> Result<()> {
    if path.exists() {
        anyhow::bail!("Config already exists at {:?}", path);
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, DEFAULT_CONFIG)?;
    println!("Created config at {:?}", path);
    Ok(())
}
