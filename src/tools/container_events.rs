use crate::docker::types::DockerEvent;
use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, non_empty};
use rmcp::schemars;
use serde::Deserialize;

const DEFAULT_SINCE: &str = "1h";
const DEFAULT_UNTIL: &str = "now";

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ContainerEventsArgs {
    /// Filter events by container name or ID
    #[serde(default)]
    pub container: Option<String>,
    /// Show events since this time (default: 1h)
    #[serde(default)]
    pub since: Option<String>,
    /// Show events until this time (default: now)
    #[serde(default)]
    pub until: Option<String>,
    /// Filter by event type: start, stop, die, restart, oom, kill, pause, unpause, ...
    #[serde(default)]
    pub event_type: Option<String>,
}

pub async fn handle(exec: &dyn Executor, args: ContainerEventsArgs) -> Result<String> {
    let since = non_empty(&args.since).unwrap_or(DEFAULT_SINCE);
    let until = non_empty(&args.until).unwrap_or(DEFAULT_UNTIL);
    let container = non_empty(&args.container);
    let event_type = non_empty(&args.event_type);

    let mut cmd_args = cmd(&["events", "--filter", "type=container"]);
    if let Some(container) = container {
        cmd_args.extend(cmd(&["--filter", &format!("container={container}")]));
    }
    if let Some(event_type) = event_type {
        cmd_args.extend(cmd(&["--filter", &format!("event={event_type}")]));
    }
    // --until is what stops docker events from streaming forever
    cmd_args.extend(cmd(&["--since", since, "--until", until, "--format", "{{json .}}"]));

    let output = exec
        .exec(&cmd_args)
        .await
        .map_err(|e| ToolError::docker("failed to get events", e))?;

    let output = output.trim();
    if output.is_empty() {
        return Ok("No events found in the specified time range.".to_string());
    }

    let mut out = String::from("=== Container Events ===\n");
    if let Some(container) = container {
        out.push_str(&format!("Container: {container}\n"));
    }
    out.push_str(&format!("Time range: {since} to {until}\n"));
    if let Some(event_type) = event_type {
        out.push_str(&format!("Event filter: {event_type}\n"));
    }
    out.push('\n');

    for line in output.lines().map(str::trim).filter(|l| !l.is_empty()) {
        match serde_json::from_str::<DockerEvent>(line) {
            Ok(event) => {
                out.push_str(&format!("{}\n", format_event(&event)));
            }
            Err(_) => {
                out.push_str(&format!("  (unparsed) {line}\n"));
            }
        }
    }

    Ok(out)
}

pub fn format_event(event: &DockerEvent) -> String {
    let name = match event.actor.attributes.get("name") {
        Some(name) if !name.is_empty() => name.clone(),
        _ => event.actor.id.chars().take(12).collect(),
    };
    let action = if event.action.is_empty() {
        &event.status
    } else {
        &event.action
    };

    // Attributes come out sorted by key
    let attrs: Vec<String> = event
        .actor
        .attributes
        .iter()
        .filter(|(k, _)| k.as_str() != "name")
        .map(|(k, v)| format!("{k}={v}"))
        .collect();

    let mut line = format!("  [{}] {}: {}", event.time, name, action);
    if !attrs.is_empty() {
        line.push_str(&format!(" ({})", attrs.join(", ")));
    }
    line
}
