use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, or_default, require};
use rmcp::schemars;
use serde::Deserialize;

const DEFAULT_TIMEOUT_SECS: u32 = 10;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct RestartServiceArgs {
    /// Container name or ID to restart
    pub container: String,
    /// Seconds to wait before killing the container (default 10)
    #[serde(default)]
    pub timeout: Option<u32>,
}

pub async fn handle(exec: &dyn Executor, args: RestartServiceArgs) -> Result<String> {
    require(&args.container, "container name or ID is required")?;

    let timeout = or_default(args.timeout, DEFAULT_TIMEOUT_SECS);
    exec.exec(&cmd(&["restart", "--time", &timeout.to_string(), &args.container]))
        .await
        .map_err(|e| ToolError::docker("restart failed", e))?;

    Ok(format!("Successfully restarted container {}", args.container))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::MockDocker;

    #[tokio::test]
    async fn default_grace_period() {
        let mut mock = MockDocker::new();
        mock.on("restart --time 10 web", "web\n");
        let out = handle(
            &mock,
            RestartServiceArgs {
                container: "web".to_string(),
                timeout: None,
            },
        )
        .await
        .unwrap();
        assert_eq!(out, "Successfully restarted container web");
    }

    #[tokio::test]
    async fn custom_grace_period() {
        let mut mock = MockDocker::new();
        mock.on("restart --time 30 web", "web\n");
        handle(
            &mock,
            RestartServiceArgs {
                container: "web".to_string(),
                timeout: Some(30),
            },
        )
        .await
        .unwrap();
        assert_eq!(mock.calls().len(), 1);
    }

    #[tokio::test]
    async fn unknown_container() {
        let mut mock = MockDocker::new();
        mock.on_error("restart --time 10 ghost", "No such container: ghost");
        let err = handle(
            &mock,
            RestartServiceArgs {
                container: "ghost".to_string(),
                timeout: None,
            },
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("No such container: ghost"));
    }
}
