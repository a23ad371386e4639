//! Identifier utilities

use uuid::Uuid;

/// Generate a new identifier (UUIDv4, hyphenated)
pub fn generate() -> String {
    Uuid::new_v4().to_string()
}

/// Build the shareable link for a project
///
/// Trailing slashes on `base_url` are ignored.
pub fn share_url(base_url: &str, project_id: &str) -> String {
    format!("{}/project/{}", base_url.trim_end_matches('/'), project_id)
}
