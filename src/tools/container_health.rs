use crate::docker::types::{HealthConfig, HealthState};
use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, require};
use rmcp::schemars;
use serde::Deserialize;
use tracing::debug;

const NO_HEALTHCHECK: &str = "No healthcheck configured for this container.";

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ContainerHealthArgs {
    /// Container name or ID to check health for
    pub container: String,
}

// Go templates print these when the field is unset
fn is_absent(raw: &str) -> bool {
    matches!(raw, "" | "null" | "<nil>" | "<no value>")
}

async fn inspect_field(exec: &dyn Executor, template: &str, container: &str) -> Result<String> {
    let out = exec
        .exec(&cmd(&["inspect", "--format", template, container]))
        .await
        .map_err(|e| ToolError::docker("failed to inspect container", e))?;
    Ok(out.trim().to_string())
}

pub async fn handle(exec: &dyn Executor, args: ContainerHealthArgs) -> Result<String> {
    require(&args.container, "container name or ID is required")?;

    let state_raw = inspect_field(exec, "{{json .State.Health}}", &args.container).await?;
    let config_raw = inspect_field(exec, "{{json .Config.Healthcheck}}", &args.container).await?;

    if is_absent(&state_raw) && is_absent(&config_raw) {
        return Ok(NO_HEALTHCHECK.to_string());
    }

    let mut out = String::new();

    if !is_absent(&config_raw) {
        match serde_json::from_str::<HealthConfig>(&config_raw) {
            Ok(config) => write_config(&mut out, &config),
            Err(e) => debug!("Ignoring unparsable healthcheck config: {}", e),
        }
    }

    if !is_absent(&state_raw) {
        match serde_json::from_str::<HealthState>(&state_raw) {
            Ok(state) => write_state(&mut out, &state),
            Err(e) => debug!("Ignoring unparsable health state: {}", e),
        }
    }

    if out.is_empty() {
        return Ok(NO_HEALTHCHECK.to_string());
    }
    Ok(out)
}

fn write_config(out: &mut String, config: &HealthConfig) {
    out.push_str("Health Check Configuration:\n");
    if !config.test.is_empty() {
        out.push_str(&format!("  Test:     {}\n", config.test.join(" ")));
    }
    if config.interval > 0 {
        out.push_str(&format!("  Interval: {}\n", format_nanoseconds(config.interval)));
    }
    if config.timeout > 0 {
        out.push_str(&format!("  Timeout:  {}\n", format_nanoseconds(config.timeout)));
    }
    if config.retries > 0 {
        out.push_str(&format!("  Retries:  {}\n", config.retries));
    }
    out.push('\n');
}

fn write_state(out: &mut String, state: &HealthState) {
    out.push_str(&format!("Current Status: {}\n", state.status));
    out.push_str(&format!("Failing Streak: {}\n", state.failing_streak));

    if state.log.is_empty() {
        return;
    }
    out.push_str(&format!(
        "\nRecent Health Check Results ({} entries):\n",
        state.log.len(),
    ));
    for (i, entry) in state.log.iter().enumerate() {
        out.push_str(&format!("  [{}] Exit Code: {}\n", i + 1, entry.exit_code));
        out.push_str(&format!("      Start:     {}\n", entry.start));
        out.push_str(&format!("      End:       {}\n", entry.end));
        if !entry.output.is_empty() {
            out.push_str(&format!("      Output:    {}\n", entry.output.trim()));
        }
    }
}

/// Whole seconds as "45s", "2m" or "1m30s".
pub fn format_nanoseconds(ns: i64) -> String {
    let seconds = ns / 1_000_000_000;
    if seconds < 60 {
        return format!("{seconds}s");
    }
    match (seconds / 60, seconds % 60) {
        (minutes, 0) => format!("{minutes}m"),
        (minutes, rest) => format!("{minutes}m{rest}s"),
    }
}
