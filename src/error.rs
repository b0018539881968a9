use thiserror::Error;

// Failure of a single docker invocation
#[derive(Error, Debug)]
pub enum DockerError {
    #[error("failed to spawn docker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("docker {subcommand}: timed out after {secs}s")]
    Timeout { subcommand: String, secs: u64 },

    #[error("docker {subcommand}: {status}: {output}")]
    Failed {
        subcommand: String,
        status: String,
        output: String,
    },
}

// Failure of a tool call. The Display text is what the MCP client sees.
#[derive(Error, Debug)]
pub enum ToolError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("{context}: {source}")]
    Docker {
        context: String,
        #[source]
        source: DockerError,
    },

    #[error("failed to parse {what}: {source}")]
    Parse {
        what: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid regex pattern {pattern:?}: {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("{0}")]
    NotFound(String),
}

impl ToolError {
    pub fn docker(context: impl Into<String>, source: DockerError) -> Self {
        ToolError::Docker {
            context: context.into(),
            source,
        }
    }

    pub fn parse(what: &'static str, source: serde_json::Error) -> Self {
        ToolError::Parse { what, source }
    }
}

pub type Result<T> = std::result::Result<T, ToolError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn docker_error_keeps_context_and_cause() {
        let err = ToolError::docker(
            "restart failed",
            DockerError::Failed {
                subcommand: "restart".to_string(),
                status: "exit status: 1".to_string(),
                output: "No such container: web".to_string(),
            },
        );
        assert_eq!(
            err.to_string(),
            "restart failed: docker restart: exit status: 1: No such container: web"
        );
    }

    #[test]
    fn invalid_pattern_quotes_the_pattern() {
        let source = regex::Regex::new("[unclosed").unwrap_err();
        let err = ToolError::InvalidPattern {
            pattern: "[unclosed".to_string(),
            source,
        };
        assert!(err.to_string().starts_with("invalid regex pattern \"[unclosed\""));
    }
}
