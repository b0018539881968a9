/*
 * Docker MCP Service Implementation
 *
 * This service provides tools to inspect and operate Docker containers and
 * Compose projects through the docker CLI.
 *
 * Current Supported Tool Interfaces:
 * - list_containers: List containers grouped by Compose project
 * - get_logs: Fetch a container's logs
 * - search_logs: Regex search over a container's logs with optional context
 * - compose_logs: Merged logs of every container in a Compose project
 * - container_exec: Run a shell command inside a container
 * - restart_service: Restart a container
 * - container_stats: One-shot CPU / memory / IO usage
 * - container_inspect: Env, ports, volumes, networks or the full inspect JSON
 * - container_health: Healthcheck configuration and recent results
 * - log_diff: Compare a container's logs between two time windows
 * - compose_up: Start a Compose project
 * - compose_down: Stop a Compose project
 * - container_events: Bounded container event history
 */

use crate::docker::Executor;
use crate::error::ToolError;
use crate::tools::compose::{self, ComposeDownArgs, ComposeUpArgs};
use crate::tools::compose_logs::{self, ComposeLogsArgs};
use crate::tools::container_events::{self, ContainerEventsArgs};
use crate::tools::container_exec::{self, ContainerExecArgs};
use crate::tools::container_health::{self, ContainerHealthArgs};
use crate::tools::container_inspect::{self, ContainerInspectArgs};
use crate::tools::container_stats::{self, ContainerStatsArgs};
use crate::tools::get_logs::{self, GetLogsArgs};
use crate::tools::list_containers::{self, ListContainersArgs};
use crate::tools::log_diff::{self, LogDiffArgs};
use crate::tools::restart_service::{self, RestartServiceArgs};
use crate::tools::search_logs::{self, SearchLogsArgs};
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{CallToolResult, Content, Implementation, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ErrorData as McpError, ServerHandler,
};
use std::sync::Arc;
use tracing::{debug, warn};

const INSTRUCTIONS: &str = "This server exposes Docker and Docker Compose operations. \
Use list_containers to discover containers and Compose projects, get_logs / search_logs / \
compose_logs / log_diff to read logs, container_inspect / container_health / container_stats / \
container_events to diagnose, and container_exec / restart_service / compose_up / compose_down to act.";

#[derive(Clone)]
pub struct Server {
    executor: Arc<dyn Executor>,
    tool_router: ToolRouter<Server>,
}

// Tool failures are reported to the client as error results, not protocol errors
fn respond(tool: &'static str, result: Result<String, ToolError>) -> Result<CallToolResult, McpError> {
    match result {
        Ok(text) => Ok(CallToolResult::success(vec![Content::text(text)])),
        Err(e) => {
            warn!(tool, error = %e, "Tool call failed");
            Ok(CallToolResult::error(vec![Content::text(e.to_string())]))
        }
    }
}

#[tool_router]
impl Server {
    pub fn new(executor: Arc<dyn Executor>) -> Self {
        Self {
            executor,
            tool_router: Self::tool_router(),
        }
    }

    #[tool(
        description = "List Docker containers, grouped by Compose project. Shows container name, image, state, and status."
    )]
    async fn list_containers(
        &self,
        Parameters(args): Parameters<ListContainersArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Listing containers: {:?}", args);
        respond(
            "list_containers",
            list_containers::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(description = "Get logs from a Docker container. Uses combined stdout and stderr output.")]
    async fn get_logs(
        &self,
        Parameters(args): Parameters<GetLogsArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Getting logs: {:?}", args);
        respond("get_logs", get_logs::handle(self.executor.as_ref(), args).await)
    }

    #[tool(
        description = "Search Docker container logs using a regex pattern. Fetches logs then filters matching lines, with optional context lines around matches."
    )]
    async fn search_logs(
        &self,
        Parameters(args): Parameters<SearchLogsArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Searching logs: {:?}", args);
        respond(
            "search_logs",
            search_logs::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(
        description = "Get logs for all containers in a Docker Compose project, merged and prefixed with service names."
    )]
    async fn compose_logs(
        &self,
        Parameters(args): Parameters<ComposeLogsArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Getting compose logs: {:?}", args);
        respond(
            "compose_logs",
            compose_logs::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(
        description = "Execute a command inside a running container. The command is run via sh -c, so pipes and redirects are supported."
    )]
    async fn container_exec(
        &self,
        Parameters(args): Parameters<ContainerExecArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Executing in container {}: {}", args.container, args.command);
        respond(
            "container_exec",
            container_exec::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(description = "Restart a container, waiting for a graceful stop before killing it.")]
    async fn restart_service(
        &self,
        Parameters(args): Parameters<RestartServiceArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Restarting container: {}", args.container);
        respond(
            "restart_service",
            restart_service::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(
        description = "Get resource usage statistics for containers (CPU, memory, network, block I/O, PIDs). Optionally specify a container name/ID or leave empty for all running containers."
    )]
    async fn container_stats(
        &self,
        Parameters(args): Parameters<ContainerStatsArgs>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "container_stats",
            container_stats::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(
        description = "Get detailed container information. Optionally filter by section: env, ports, volumes, network, or all (default)."
    )]
    async fn container_inspect(
        &self,
        Parameters(args): Parameters<ContainerInspectArgs>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "container_inspect",
            container_inspect::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(
        description = "Get health check configuration and status for a container, including recent check results and failing streak."
    )]
    async fn container_health(
        &self,
        Parameters(args): Parameters<ContainerHealthArgs>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "container_health",
            container_health::handle(self.executor.as_ref(), args).await,
        )
    }

    #[tool(
        description = "Compare container logs between two time periods. Useful for debugging regressions by identifying what changed in log output."
    )]
    async fn log_diff(
        &self,
        Parameters(args): Parameters<LogDiffArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Diffing logs: {:?}", args);
        respond("log_diff", log_diff::handle(self.executor.as_ref(), args).await)
    }

    #[tool(
        description = "Start a Docker Compose project. Discovers the project's working directory from existing containers and runs docker compose up -d."
    )]
    async fn compose_up(
        &self,
        Parameters(args): Parameters<ComposeUpArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Compose up: {:?}", args);
        respond("compose_up", compose::up(self.executor.as_ref(), args).await)
    }

    #[tool(
        description = "Stop a Docker Compose project. Discovers the project's working directory from existing containers and runs docker compose down."
    )]
    async fn compose_down(
        &self,
        Parameters(args): Parameters<ComposeDownArgs>,
    ) -> Result<CallToolResult, McpError> {
        debug!("Compose down: {:?}", args);
        respond("compose_down", compose::down(self.executor.as_ref(), args).await)
    }

    #[tool(
        description = "Get container event history (start/stop/die/restart/OOM etc). Always passes --until so the call never streams."
    )]
    async fn container_events(
        &self,
        Parameters(args): Parameters<ContainerEventsArgs>,
    ) -> Result<CallToolResult, McpError> {
        respond(
            "container_events",
            container_events::handle(self.executor.as_ref(), args).await,
        )
    }
}

#[tool_handler]
impl ServerHandler for Server {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::docker::mock::MockDocker;

    fn server(mock: MockDocker) -> Server {
        Server::new(Arc::new(mock))
    }

    fn text(result: &CallToolResult) -> String {
        let value = serde_json::to_value(result).unwrap();
        value["content"][0]["text"].as_str().unwrap().to_string()
    }

    #[test]
    fn registers_every_tool() {
        let server = server(MockDocker::new());
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|t| t.name.to_string())
            .collect();
        names.sort();
        assert_eq!(
            names,
            vec![
                "compose_down",
                "compose_logs",
                "compose_up",
                "container_events",
                "container_exec",
                "container_health",
                "container_inspect",
                "container_stats",
                "get_logs",
                "list_containers",
                "log_diff",
                "restart_service",
                "search_logs",
            ]
        );
    }

    #[test]
    fn argument_schemas_are_published() {
        let server = server(MockDocker::new());
        let search = server
            .tool_router
            .list_all()
            .into_iter()
            .find(|t| t.name == "search_logs")
            .unwrap();
        let properties = search.input_schema.get("properties").unwrap();
        assert!(properties.get("pattern").is_some());
        assert!(properties.get("context_lines").is_some());
    }

    #[tokio::test]
    async fn success_is_text_content() {
        let mut mock = MockDocker::new();
        mock.on("restart --time 10 web", "web\n");
        let result = server(mock)
            .restart_service(Parameters(RestartServiceArgs {
                container: "web".to_string(),
                timeout: None,
            }))
            .await
            .unwrap();

        assert_ne!(result.is_error, Some(true));
        assert_eq!(text(&result), "Successfully restarted container web");
    }

    #[tokio::test]
    async fn handler_error_is_an_error_result() {
        let result = server(MockDocker::new())
            .get_logs(Parameters(GetLogsArgs::default()))
            .await
            .unwrap();

        assert_eq!(result.is_error, Some(true));
        assert_eq!(text(&result), "container name or ID is required");
    }

    #[test]
    fn advertises_tools_capability() {
        let info = server(MockDocker::new()).get_info();
        assert!(info.capabilities.tools.is_some());
        assert!(info.instructions.unwrap().contains("list_containers"));
    }
}
