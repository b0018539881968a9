use crate::docker::types::{parse_json_lines, StatsEntry};
use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, non_empty};
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ContainerStatsArgs {
    /// Container name or ID (all running containers when empty)
    #[serde(default)]
    pub container: Option<String>,
}

pub async fn handle(exec: &dyn Executor, args: ContainerStatsArgs) -> Result<String> {
    let mut cmd_args = cmd(&["stats", "--no-stream", "--format", "{{json .}}"]);
    if let Some(container) = non_empty(&args.container) {
        cmd_args.push(container.to_string());
    }

    let output = exec
        .exec(&cmd_args)
        .await
        .map_err(|e| ToolError::docker("failed to get container stats", e))?;

    let entries: Vec<StatsEntry> = parse_json_lines(&output, "stats JSON")?;
    if entries.is_empty() {
        return Ok("No running containers found.".to_string());
    }
    Ok(format_stats_table(&entries))
}

fn format_row(cols: [&str; 7]) -> String {
    format!(
        "{:<20} {:<10} {:<25} {:<10} {:<25} {:<25} {:<6}",
        cols[0], cols[1], cols[2], cols[3], cols[4], cols[5], cols[6]
    )
}

pub fn format_stats_table(entries: &[StatsEntry]) -> String {
    let header = format_row([
        "CONTAINER",
        "CPU %",
        "MEM USAGE",
        "MEM %",
        "NET I/O",
        "BLOCK I/O",
        "PIDS",
    ]);

    let mut out = String::new();
    out.push_str(&format!("{header}\n"));
    out.push_str(&format!("{}\n", "-".repeat(header.len())));
    for e in entries {
        let name = if e.name.is_empty() { &e.container } else { &e.name };
        out.push_str(&format!(
            "{}\n",
            format_row([
                name,
                &e.cpu_perc,
                &e.mem_usage,
                &e.mem_perc,
                &e.net_io,
                &e.block_io,
                &e.pids,
            ]),
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::MockDocker;

    const STATS_LINE: &str = r#"{"BlockIO":"1.2MB / 0B","CPUPerc":"0.15%","Container":"abc123","ID":"abc123","MemPerc":"1.20%","MemUsage":"24MiB / 2GiB","Name":"web","NetIO":"3kB / 1kB","PIDs":"4"}"#;

    #[tokio::test]
    async fn renders_table_for_one_container() {
        let mut mock = MockDocker::new();
        mock.on("stats --no-stream --format {{json .}} web", STATS_LINE);

        let out = handle(
            &mock,
            ContainerStatsArgs {
                container: Some("web".to_string()),
            },
        )
        .await
        .unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].starts_with("CONTAINER            CPU %"));
        assert!(lines[1].chars().all(|c| c == '-'));
        assert_eq!(lines[1].len(), lines[0].len());
        assert!(lines[2].starts_with("web                  0.15%"));
        assert!(lines[2].contains("24MiB / 2GiB"));
    }

    #[test]
    fn name_falls_back_to_container_field() {
        let entry = StatsEntry {
            container: "abc123".to_string(),
            ..Default::default()
        };
        let out = format_stats_table(&[entry]);
        assert!(out.lines().nth(2).unwrap().starts_with("abc123 "));
    }

    #[tokio::test]
    async fn no_running_containers() {
        let mut mock = MockDocker::new();
        mock.on("stats --no-stream --format {{json .}}", "");
        let out = handle(&mock, ContainerStatsArgs::default()).await.unwrap();
        assert_eq!(out, "No running containers found.");
    }

    #[tokio::test]
    async fn malformed_json_is_an_error() {
        let mut mock = MockDocker::new();
        mock.on("stats --no-stream --format {{json .}}", "{not json");
        let err = handle(&mock, ContainerStatsArgs::default()).await.unwrap_err();
        assert!(matches!(err, ToolError::Parse { .. }));
    }
}
