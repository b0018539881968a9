use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::logs::render_with_context;
use crate::tools::{cmd, non_empty, or_default, require};
use regex::Regex;
use rmcp::schemars;
use serde::Deserialize;

const DEFAULT_TAIL: u32 = 1000;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchLogsArgs {
    /// Container name or ID
    pub container: String,
    /// Regex pattern to search for in logs
    pub pattern: String,
    /// Number of log lines to fetch before filtering (default 1000)
    #[serde(default)]
    pub tail: Option<u32>,
    /// Show logs since timestamp (e.g. 2024-01-01T00:00:00) or relative (e.g. 1h)
    #[serde(default)]
    pub since: Option<String>,
    /// Show timestamps in log output
    #[serde(default)]
    pub timestamps: bool,
    /// Number of lines of context around each match (like grep -C)
    #[serde(default)]
    pub context_lines: usize,
}

pub async fn handle(exec: &dyn Executor, args: SearchLogsArgs) -> Result<String> {
    require(&args.container, "container name or ID is required")?;
    require(&args.pattern, "pattern is required")?;

    let re = Regex::new(&args.pattern).map_err(|source| ToolError::InvalidPattern {
        pattern: args.pattern.clone(),
        source,
    })?;

    let tail = or_default(args.tail, DEFAULT_TAIL);
    let mut cmd_args = cmd(&["logs", "--tail", &tail.to_string()]);
    if let Some(since) = non_empty(&args.since) {
        cmd_args.extend(cmd(&["--since", since]));
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

    let lines: Vec<&str> = output.trim_end_matches('\n').split('\n').collect();
    let matches: Vec<usize> = lines
        .iter()
        .enumerate()
        .filter(|(_, line)| re.is_match(line))
        .map(|(i, _)| i)
        .collect();

    if matches.is_empty() {
        return Ok(format!(
            "No matches found for pattern {:?} in {} log lines.",
            args.pattern,
            lines.len()
        ));
    }

    let body = if args.context_lines > 0 {
        render_with_context(&lines, &matches, args.context_lines)
    } else {
        matches
            .iter()
            .map(|&i| lines[i])
            .collect::<Vec<_>>()
            .join("\n")
    };

    Ok(format!(
        "Found {} matches for pattern {:?}:\n\n{}",
        matches.len(),
        args.pattern,
        body
    ))
}
