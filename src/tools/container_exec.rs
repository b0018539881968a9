use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, non_empty, require};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ContainerExecArgs {
    /// Container name or ID
    pub container: String,
    /// Command to execute inside the container (run via sh -c, so pipes and redirects work)
    pub command: String,
    /// Run the command as a specific user
    #[serde(default)]
    pub user: Option<String>,
    /// Working directory inside the container
    #[serde(default)]
    pub workdir: Option<String>,
}

pub async fn handle(exec: &dyn Executor, args: ContainerExecArgs) -> Result<String> {
    require(&args.container, "container name or ID is required")?;
    require(&args.command, "command is required")?;

    let mut cmd_args = cmd(&["exec"]);
    if let Some(user) = non_empty(&args.user) {
        cmd_args.extend(cmd(&["--user", user]));
    }
    if let Some(workdir) = non_empty(&args.workdir) {
        cmd_args.extend(cmd(&["--workdir", workdir]));
    }
    cmd_args.extend(cmd(&[&args.container, "sh", "-c", &args.command]));

    exec.exec_combined(&cmd_args)
        .await
        .map_err(|e| ToolError::docker("exec failed", e))
}
