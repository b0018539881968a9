use crate::docker::types::{parse_json_lines, ContainerSummary};
use crate::docker::Executor;
use crate::error::{Result, ToolError};
use crate::tools::{cmd, non_empty};
use rmcp::schemars;
use serde::Deserialize;
use std::collections::BTreeMap;

const STANDALONE: &str = "(standalone)";

#[derive(Debug, Deserialize, schemars::JsonSchema)]
pub struct ListContainersArgs {
    /// Show stopped containers too (default true)
    #[serde(default = "default_all")]
    pub all: bool,
    /// Filter by Compose project name
    #[serde(default)]
    pub project: Option<String>,
}

fn default_all() -> bool {
    true
}

impl Default for ListContainersArgs {
    fn default() -> Self {
        Self {
            all: true,
            project: None,
        }
    }
}

pub async fn handle(exec: &dyn Executor, args: ListContainersArgs) -> Result<String> {
    let mut cmd_args = cmd(&["ps"]);
    if args.all {
        cmd_args.push("-a".to_string());
    }
    cmd_args.extend(cmd(&["--format", "{{json .}}"]));

    let output = exec
        .exec(&cmd_args)
        .await
        .map_err(|e| ToolError::docker("failed to list containers", e))?;

    let containers: Vec<ContainerSummary> = parse_json_lines(&output, "container JSON")?;
    let filter = non_empty(&args.project);

    // Compose projects sorted by name, standalone containers last
    let mut projects: BTreeMap<String, Vec<ContainerSummary>> = BTreeMap::new();
    let mut standalone = Vec::new();
    for c in containers {
        let project = c.compose_project();
        if filter.is_some() && project.as_deref() != filter {
            continue;
        }
        match project {
            Some(p) => projects.entry(p).or_default().push(c),
            None => standalone.push(c),
        }
    }

    if projects.is_empty() && standalone.is_empty() {
        return Ok(match filter {
            Some(p) => format!("No containers found for project {p:?}."),
            None => "No containers found.".to_string(),
        });
    }

    let groups = projects
        .iter()
        .map(|(name, cs)| (name.as_str(), cs))
        .chain((!standalone.is_empty()).then_some((STANDALONE, &standalone)));

    let mut out = String::new();
    for (i, (name, cs)) in groups.enumerate() {
        if i > 0 {
            out.push('\n');
        }
        out.push_str(&format!("=== {name} ===\n"));
        for c in cs {
            out.push_str(&format!(
                "  {:<15} {:<25} {:<10} {}\n",
                c.names, c.image, c.state, c.status,
            ));
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::MockDocker;

    const PS_ALL: &str = "ps -a --format {{json .}}";

    fn ps_output() -> String {
        [
            r#"{"ID":"1","Names":"shop-web-1","Image":"nginx","State":"running","Status":"Up 1 hour","Labels":"com.docker.compose.project=shop,com.docker.compose.service=web"}"#,
            r#"{"ID":"2","Names":"redis","Image":"redis:7","State":"exited","Status":"Exited (0) 2 days ago","Labels":""}"#,
            r#"{"ID":"3","Names":"api-app-1","Image":"api:dev","State":"running","Status":"Up 5 minutes","Labels":"com.docker.compose.project=api"}"#,
        ]
        .join("\n")
    }

    #[tokio::test]
    async fn groups_by_project_with_standalone_last() {
        let mut mock = MockDocker::new();
        mock.on(PS_ALL, &ps_output());

        let out = handle(&mock, ListContainersArgs::default()).await.unwrap();

        let api = out.find("=== api ===").unwrap();
        let shop = out.find("=== shop ===").unwrap();
        let solo = out.find("=== (standalone) ===").unwrap();
        assert!(api < shop && shop < solo);
        assert!(out.contains("  shop-web-1      nginx"));
        assert!(out.contains("Exited (0) 2 days ago"));
    }

    #[tokio::test]
    async fn running_only_omits_all_flag() {
        let mut mock = MockDocker::new();
        mock.on("ps --format {{json .}}", &ps_output());

        let args = ListContainersArgs {
            all: false,
            project: None,
        };
        handle(&mock, args).await.unwrap();
        assert_eq!(mock.calls()[0], vec!["ps", "--format", "{{json .}}"]);
    }

    #[tokio::test]
    async fn project_filter() {
        let mut mock = MockDocker::new();
        mock.on(PS_ALL, &ps_output());

        let args = ListContainersArgs {
            all: true,
            project: Some("shop".to_string()),
        };
        let out = handle(&mock, args).await.unwrap();
        assert!(out.contains("=== shop ==="));
        assert!(!out.contains("api-app-1"));
        assert!(!out.contains("(standalone)"));
    }

    #[tokio::test]
    async fn unknown_project_and_empty_output() {
        let mut mock = MockDocker::new();
        mock.on(PS_ALL, &ps_output());
        let args = ListContainersArgs {
            all: true,
            project: Some("nope".to_string()),
        };
        assert_eq!(
            handle(&mock, args).await.unwrap(),
            "No containers found for project \"nope\"."
        );

        let mut mock = MockDocker::new();
        mock.on(PS_ALL, "\n");
        assert_eq!(
            handle(&mock, ListContainersArgs::default()).await.unwrap(),
            "No containers found."
        );
    }

    #[tokio::test]
    async fn docker_failure_is_wrapped() {
        let mut mock = MockDocker::new();
        mock.on_error(PS_ALL, "Cannot connect to the Docker daemon");
        let err = handle(&mock, ListContainersArgs::default())
            .await
            .unwrap_err();
        let msg = err.to_string();
        assert!(msg.starts_with("failed to list containers"));
        assert!(msg.contains("Cannot connect to the Docker daemon"));
    }

    #[test]
    fn missing_all_defaults_to_true() {
        let args: ListContainersArgs = serde_json::from_str("{}").unwrap();
        assert!(args.all);
    }
}
