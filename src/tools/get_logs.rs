use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, non_empty, or_default, require};
use rmcp::schemars;
use serde::Deserialize;

const DEFAULT_TAIL: u32 = 100;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetLogsArgs {
    /// Container name or ID
    pub container: String,
    /// Number of lines to show from the end of the logs (default 100)
    #[serde(default)]
    pub tail: Option<u32>,
    /// Show logs since timestamp (e.g. 2024-01-01T00:00:00) or relative (e.g. 1h)
    #[serde(default)]
    pub since: Option<String>,
    /// Show logs until timestamp (e.g. 2024-01-01T00:00:00) or relative (e.g. 1h)
    #[serde(default)]
    pub until: Option<String>,
    /// Show timestamps in log output
    #[serde(default)]
    pub timestamps: bool,
}

pub async fn handle(exec: &dyn Executor, args: GetLogsArgs) -> Result<String> {
    require(&args.container, "container name or ID is required")?;

    let tail = or_default(args.tail, DEFAULT_TAIL);
    let mut cmd_args = cmd(&["logs", "--tail", &tail.to_string()]);
    if let Some(since) = non_empty(&args.since) {
        cmd_args.extend(cmd(&["--since", since]));
    }
    if let Some(until) = non_empty(&args.until) {
        cmd_args.extend(cmd(&["--until", until]));
    }
    if args.timestamps {
        cmd_args.push("--timestamps".to_string());
    }
    cmd_args.push(args.container.clone());

    let output = exec.exec_combined(&cmd_args).await.map_err(|e| {
        ToolError::docker(
            format!("failed to get logs for container {:?}", args.container),
            e,
        )
    })?;

    if output.is_empty() {
        return Ok("No log output.".to_string());
    }
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::MockDocker;

    fn args(container: &str) -> GetLogsArgs {
        GetLogsArgs {
            container: container.to_string(),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn default_tail() {
        let mut mock = MockDocker::new();
        mock.on("logs --tail 100 web", "line1\nline2\n");
        assert_eq!(handle(&mock, args("web")).await.unwrap(), "line1\nline2\n");
    }

    #[tokio::test]
    async fn all_options_in_order() {
        let mut mock = MockDocker::new();
        mock.on(
            "logs --tail 20 --since 1h --until 10m --timestamps web",
            "2024-01-01T00:00:00Z hello",
        );
        let out = handle(
            &mock,
            GetLogsArgs {
                container: "web".to_string(),
                tail: Some(20),
                since: Some("1h".to_string()),
                until: Some("10m".to_string()),
                timestamps: true,
            },
        )
        .await
        .unwrap();
        assert!(out.contains("hello"));
    }

    #[tokio::test]
    async fn empty_output_placeholder() {
        let mut mock = MockDocker::new();
        mock.on("logs --tail 100 quiet", "");
        assert_eq!(handle(&mock, args("quiet")).await.unwrap(), "No log output.");
    }

    #[tokio::test]
    async fn container_is_required() {
        let mock = MockDocker::new();
        let err = handle(&mock, args("")).await.unwrap_err();
        assert!(matches!(err, ToolError::InvalidArgument(_)));
        assert!(mock.calls().is_empty());
    }

    #[tokio::test]
    async fn missing_container_error_names_it() {
        let mut mock = MockDocker::new();
        mock.on_error("logs --tail 100 ghost", "No such container: ghost");
        let err = handle(&mock, args("ghost")).await.unwrap_err();
        assert!(err
            .to_string()
            .starts_with("failed to get logs for container \"ghost\""));
    }
}
