/*
 * Compose project lifecycle
 *
 * Compose needs the project's directory to find its compose file. Instead of
 * asking the caller for it, the directory is recovered from the
 * com.docker.compose.project.working_dir label of an existing container, so a
 * project can only be driven after it has been started once by hand.
 */
use crate::docker::types::{ContainerSummary, COMPOSE_WORKING_DIR_LABEL};
use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::compose_logs::project_filter;
use crate::tools::{cmd, require};
use rmcp::schemars;
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ComposeUpArgs {
    /// Compose project name
    pub project: String,
    /// Specific services to start (default: all)
    #[serde(default)]
    pub services: Vec<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ComposeDownArgs {
    /// Compose project name
    pub project: String,
    /// Remove named volumes declared in the volumes section
    #[serde(default)]
    pub remove_volumes: bool,
}

pub async fn discover_work_dir(exec: &dyn Executor, project: &str) -> Result<String> {
    let output = exec
        .exec(&cmd(&["ps", "-a", "--format", "{{json .}}", "--filter", &project_filter(project)]))
        .await
        .map_err(|e| {
            ToolError::docker(format!("failed to list containers for project {project:?}"), e)
        })?;

    // Any container of the project carries the label; later records are never decoded
    let first = output.lines().map(str::trim).find(|line| !line.is_empty());
    let first = first.ok_or_else(|| {
        ToolError::NotFound(format!(
            "no containers found for project {project:?}: cannot determine working directory. \
             Start the project manually first"
        ))
    })?;
    let first: ContainerSummary =
        serde_json::from_str(first).map_err(|e| ToolError::parse("container JSON", e))?;

    let format = format!("{{{{index .Config.Labels \"{COMPOSE_WORKING_DIR_LABEL}\"}}}}");
    let work_dir = exec
        .exec(&cmd(&["inspect", "--format", &format, &first.id]))
        .await
        .map_err(|e| ToolError::docker(format!("failed to inspect container {}", first.id), e))?;

    let work_dir = work_dir.trim();
    if work_dir.is_empty() {
        return Err(ToolError::NotFound(format!(
            "container {} has no {COMPOSE_WORKING_DIR_LABEL} label",
            first.id
        )));
    }

    debug!("Project {} lives in {}", project, work_dir);
    Ok(work_dir.to_string())
}

fn compose_args(work_dir: &str, project: &str) -> Vec<String> {
    cmd(&["compose", "--project-directory", work_dir, "-p", project])
}

pub async fn up(exec: &dyn Executor, args: ComposeUpArgs) -> Result<String> {
    require(&args.project, "project is required")?;
    let work_dir = discover_work_dir(exec, &args.project).await?;

    let mut cmd_args = compose_args(&work_dir, &args.project);
    cmd_args.extend(cmd(&["up", "-d"]));
    cmd_args.extend(args.services.iter().cloned());

    let output = exec
        .exec_combined(&cmd_args)
        .await
        .map_err(|e| ToolError::docker("compose up failed", e))?;

    Ok(format!(
        "Compose project {:?} started (workdir: {})\n{}",
        args.project, work_dir, output
    ))
}

pub async fn down(exec: &dyn Executor, args: ComposeDownArgs) -> Result<String> {
    require(&args.project, "project is required")?;
    let work_dir = discover_work_dir(exec, &args.project).await?;

    let mut cmd_args = compose_args(&work_dir, &args.project);
    cmd_args.push("down".to_string());
    if args.remove_volumes {
        cmd_args.push("--volumes".to_string());
    }

    let output = exec
        .exec_combined(&cmd_args)
        .await
        .map_err(|e| ToolError::docker("compose down failed", e))?;

    Ok(format!(
        "Compose project {:?} stopped (workdir: {})\n{}",
        args.project, work_dir, output
    ))
}
