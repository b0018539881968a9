//! Tool handlers. Each one turns typed arguments into docker invocations and
//! shapes the output into text for the MCP client.

pub mod compose;
pub mod compose_logs;
pub mod container_events;
pub mod container_exec;
pub mod container_health;
pub mod container_inspect;
pub mod container_stats;
pub mod get_logs;
pub mod list_containers;
pub mod log_diff;
pub mod restart_service;
pub mod search_logs;

use crate::error::{Result, ToolError};

// Build an argument vector from string slices
pub(crate) fn cmd(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

// Only the empty string is missing; whitespace can be a meaningful pattern
pub(crate) fn require(value: &str, message: &str) -> Result<()> {
    if value.is_empty() {
        return Err(ToolError::InvalidArgument(message.to_string()));
    }
    Ok(())
}

// Zero or missing counts fall back to the tool's default
pub(crate) fn or_default(value: Option<u32>, default: u32) -> u32 {
    match value {
        Some(v) if v > 0 => v,
        _ => default,
    }
}

pub(crate) fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}
