//! Workspace name conversion between the display form (`workspace-legal`)
//! listed by the server and the canonical form (`legal`) that every other
//! endpoint expects.

/// Prefix carried by every workspace bucket name.
pub const WORKSPACE_PREFIX: &str = "workspace-";

/// Strip the display prefix. Names without it are already canonical.
pub fn to_canonical(display: &str) -> &str {
    display.strip_prefix(WORKSPACE_PREFIX).unwrap_or(display)
}

/// Add the display prefix unless it is already present.
pub fn to_display(name: &str) -> String {
    if name.starts_with(WORKSPACE_PREFIX) {
        name.to_string()
    } else {
        format!("{}{}", WORKSPACE_PREFIX, name)
    }
}

/// Bucket name submitted when creating a workspace from user input.
pub fn bucket_name_for(raw: &str) -> String {
    format!("{}{}", WORKSPACE_PREFIX, raw.trim().to_lowercase())
}
