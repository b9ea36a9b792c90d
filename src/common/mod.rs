//! Common utilities shared by the CLI and the scenario runner

pub mod config;
pub mod error;
pub mod logging;
pub mod paths;

pub use error::{Error, Result};

/// Shorten a response body for inclusion in failure messages
pub fn truncate_body(body: &str, max: usize) -> String {
    let trimmed = body.trim();
    if trimmed.chars().count() > max {
        let cut: String = trimmed.chars().take(max).collect();
        format!("{}...", cut)
    } else {
        trimmed.to_string()
    }
}
