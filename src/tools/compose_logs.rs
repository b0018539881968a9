use crate::docker::types::{parse_json_lines, ContainerSummary, COMPOSE_PROJECT_LABEL};
use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, non_empty, or_default, require};
use rmcp::schemars;
use serde::Deserialize;
use tracing::debug;

const DEFAULT_TAIL: u32 = 100;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ComposeLogsArgs {
    /// Compose project name
    pub project: String,
    /// Number of lines to show from the end of each container's logs (default 100)
    #[serde(default)]
    pub tail: Option<u32>,
    /// Show logs since timestamp (e.g. 2021-01-01T00:00:00Z) or relative (e.g. 42m)
    #[serde(default)]
    pub since: Option<String>,
    /// Show timestamps in log output
    #[serde(default)]
    pub timestamps: bool,
}

// All containers (including stopped) carrying the project label
pub(crate) fn project_filter(project: &str) -> String {
    format!("label={COMPOSE_PROJECT_LABEL}={project}")
}

pub(crate) async fn project_containers(
    exec: &dyn Executor,
    project: &str,
) -> Result<Vec<ContainerSummary>> {
    let output = exec
        .exec(&cmd(&["ps", "-a", "--format", "{{json .}}", "--filter", &project_filter(project)]))
        .await
        .map_err(|e| {
            ToolError::docker(format!("failed to list containers for project {project:?}"), e)
        })?;
    parse_json_lines(&output, "container JSON")
}

pub async fn handle(exec: &dyn Executor, args: ComposeLogsArgs) -> Result<String> {
    require(&args.project, "project is required")?;

    let containers = project_containers(exec, &args.project).await?;
    if containers.is_empty() {
        return Err(ToolError::NotFound(format!(
            "no containers found for Compose project {:?}",
            args.project
        )));
    }

    let tail = or_default(args.tail, DEFAULT_TAIL);
    let mut out = String::new();
    for c in &containers {
        let service = c.compose_service().unwrap_or_else(|| c.names.clone());

        let mut cmd_args = cmd(&["logs", "--tail", &tail.to_string()]);
        if let Some(since) = non_empty(&args.since) {
            cmd_args.extend(cmd(&["--since", since]));
        }
        if args.timestamps {
            cmd_args.push("--timestamps".to_string());
        }
        cmd_args.push(c.id.clone());

        // One broken container does not hide the rest of the project
        match exec.exec_combined(&cmd_args).await {
            Ok(logs) => {
                for line in logs.split('\n').filter(|l| !l.is_empty()) {
                    out.push_str(&format!("[{service}] {line}\n"));
                }
            }
            Err(e) => {
                debug!("Fetching logs for {} failed: {}", c.id, e);
                out.push_str(&format!("[{service}] error fetching logs: {e}\n"));
            }
        }
    }

    Ok(out)
}
