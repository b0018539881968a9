use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::logs::diff;
use crate::tools::{cmd, require};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct LogDiffArgs {
    /// Container name or ID
    pub container: String,
    /// Start of period 1 (RFC3339 or relative, e.g. 2h)
    pub period1_start: String,
    /// End of period 1 (RFC3339 or relative, e.g. 1h)
    pub period1_end: String,
    /// Start of period 2 (RFC3339 or relative, e.g. 1h)
    pub period2_start: String,
    /// End of period 2 (RFC3339 or relative, e.g. now)
    pub period2_end: String,
}

async fn fetch_logs(exec: &dyn Executor, container: &str, since: &str, until: &str) -> Result<String> {
    exec.exec_combined(&cmd(&["logs", "--since", since, "--until", until, container]))
        .await
        .map_err(|e| ToolError::docker(format!("failed to fetch logs from {since} to {until}"), e))
}

fn write_section<T: ToString>(out: &mut String, title: &str, lines: &[T]) {
    out.push_str(&format!("--- {title} ---\n"));
    if lines.is_empty() {
        out.push_str("  (none)\n");
    }
    for line in lines {
        out.push_str(&format!("  {}\n", line.to_string()));
    }
}

pub async fn handle(exec: &dyn Executor, args: LogDiffArgs) -> Result<String> {
    require(&args.container, "container name or ID is required")?;
    for (value, name) in [
        (&args.period1_start, "period1_start"),
        (&args.period1_end, "period1_end"),
        (&args.period2_start, "period2_start"),
        (&args.period2_end, "period2_end"),
    ] {
        require(value, &format!("{name} is required"))?;
    }

    let first = fetch_logs(exec, &args.container, &args.period1_start, &args.period1_end).await?;
    let second = fetch_logs(exec, &args.container, &args.period2_start, &args.period2_end).await?;
    let result = diff(&first, &second);

    let mut out = String::new();
    out.push_str(&format!("=== Log Diff: {} ===\n", args.container));
    out.push_str(&format!("Period 1: {} to {}\n", args.period1_start, args.period1_end));
    out.push_str(&format!("Period 2: {} to {}\n\n", args.period2_start, args.period2_end));

    write_section(&mut out, "Only in Period 1", &result.only_in_first);
    out.push('\n');
    write_section(&mut out, "Only in Period 2", &result.only_in_second);
    out.push('\n');
    write_section(&mut out, "Count Changes", &result.changed);
    out.push('\n');
    write_section(&mut out, "Common (unchanged)", &result.unchanged);

    Ok(out)
}
