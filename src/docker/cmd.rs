use crate::error::DockerError;
use async_trait::async_trait;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

// Executor abstracts docker cli execution so tool handlers can be tested
// without a docker daemon
#[async_trait]
pub trait Executor: Send + Sync {
    // Run "docker <args>" and return stdout.
    // A non-zero exit is an error carrying stderr.
    async fn exec(&self, args: &[String]) -> Result<String, DockerError>;

    // Run "docker <args>" and return stdout followed by stderr.
    // "docker logs" writes to both streams.
    async fn exec_combined(&self, args: &[String]) -> Result<String, DockerError>;
}

// DockerCmd executes docker cli commands as child processes
#[derive(Debug, Clone)]
pub struct DockerCmd {
    // Path to the docker binary
    binary: String,
    // Docker context passed as --context
    context: Option<String>,
    // Daemon socket passed as --host
    host: Option<String>,
    // Upper bound for a single invocation
    timeout: Duration,
}

impl Default for DockerCmd {
    fn default() -> Self {
        Self::new()
    }
}

impl DockerCmd {
    // Create a new DockerCmd instance with default settings
    pub fn new() -> Self {
        Self {
            binary: "docker".to_string(),
            context: None,
            host: None,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    // Create a new DockerCmd with custom settings
    pub fn with_config(
        binary: String,
        context: Option<String>,
        host: Option<String>,
        timeout: Duration,
    ) -> Self {
        Self {
            binary,
            context,
            host,
            timeout,
        }
    }

    // Global flags placed before the subcommand
    fn global_args(&self) -> Vec<String> {
        let mut args = Vec::new();
        if let Some(context) = &self.context {
            args.push("--context".to_string());
            args.push(context.clone());
        }
        if let Some(host) = &self.host {
            args.push("--host".to_string());
            args.push(host.clone());
        }
        args
    }

    async fn run(&self, args: &[String]) -> Result<Output, DockerError> {
        let mut cmd = Command::new(&self.binary);
        cmd.args(self.global_args())
            .args(args)
            .stdin(Stdio::null())
            .kill_on_drop(true);

        debug!("Running {} {}", self.binary, args.join(" "));

        match tokio::time::timeout(self.timeout, cmd.output()).await {
            Ok(output) => Ok(output?),
            Err(_) => Err(DockerError::Timeout {
                subcommand: subcommand(args),
                secs: self.timeout.as_secs(),
            }),
        }
    }
}

#[async_trait]
impl Executor for DockerCmd {
    async fn exec(&self, args: &[String]) -> Result<String, DockerError> {
        let output = self.run(args).await?;
        if !output.status.success() {
            return Err(DockerError::Failed {
                subcommand: subcommand(args),
                status: output.status.to_string(),
                output: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }

    async fn exec_combined(&self, args: &[String]) -> Result<String, DockerError> {
        let output = self.run(args).await?;
        let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
        combined.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(DockerError::Failed {
                subcommand: subcommand(args),
                status: output.status.to_string(),
                output: combined.trim().to_string(),
            });
        }
        Ok(combined)
    }
}

fn subcommand(args: &[String]) -> String {
    args.first().cloned().unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_flags_precede_subcommand() {
        let cmd = DockerCmd::with_config(
            "docker".to_string(),
            Some("orbstack".to_string()),
            Some("unix:///var/run/docker.sock".to_string()),
            Duration::from_secs(5),
        );
        assert_eq!(
            cmd.global_args(),
            vec![
                "--context",
                "orbstack",
                "--host",
                "unix:///var/run/docker.sock"
            ]
        );
        assert!(DockerCmd::new().global_args().is_empty());
    }

    #[tokio::test]
    async fn missing_binary_is_a_spawn_error() {
        let cmd = DockerCmd::with_config(
            "/nonexistent/docker-binary".to_string(),
            None,
            None,
            Duration::from_secs(5),
        );
        let err = cmd.exec(&["ps".to_string()]).await.unwrap_err();
        assert!(matches!(err, DockerError::Spawn(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn combined_output_includes_stderr() {
        // "sh -c" stands in for the docker binary
        let cmd = DockerCmd::with_config("sh".to_string(), None, None, Duration::from_secs(5));
        let out = cmd
            .exec_combined(&["-c".to_string(), "echo out; echo err >&2".to_string()])
            .await
            .unwrap();
        assert_eq!(out, "out\nerr\n");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn non_zero_exit_carries_stderr() {
        let cmd = DockerCmd::with_config("sh".to_string(), None, None, Duration::from_secs(5));
        let err = cmd
            .exec(&["-c".to_string(), "echo boom >&2; exit 3".to_string()])
            .await
            .unwrap_err();
        match err {
            DockerError::Failed {
                subcommand, output, ..
            } => {
                assert_eq!(subcommand, "-c");
                assert_eq!(output, "boom");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn slow_command_times_out() {
        let cmd = DockerCmd::with_config("sleep".to_string(), None, None, Duration::from_millis(100));
        let err = cmd.exec(&["5".to_string()]).await.unwrap_err();
        assert!(matches!(err, DockerError::Timeout { .. }));
    }
}
