use crate::docker::DockerCmd;
use clap::{Parser, ValueEnum};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    /// MCP over stdin/stdout
    Stdio,
    /// MCP over streamable HTTP at /mcp
    Http,
}

/// MCP server exposing Docker and Docker Compose operations as tools
#[derive(Debug, Parser)]
#[command(name = "mcp-docker", version, about)]
pub struct Config {
    /// Path to the docker binary
    #[arg(long, env = "MCP_DOCKER_BIN", default_value = "docker")]
    pub docker_bin: String,

    /// Docker context to use for every command
    #[arg(long, env = "MCP_DOCKER_CONTEXT")]
    pub context: Option<String>,

    /// Daemon socket to connect to
    #[arg(long, env = "MCP_DOCKER_HOST")]
    pub host: Option<String>,

    /// Upper bound in seconds for a single docker invocation
    #[arg(long, env = "MCP_DOCKER_TIMEOUT", default_value_t = 60)]
    pub timeout_secs: u64,

    #[arg(long, env = "MCP_DOCKER_TRANSPORT", value_enum, default_value_t = Transport::Stdio)]
    pub transport: Transport,

    /// Listen address for the http transport
    #[arg(long, env = "MCP_DOCKER_BIND", default_value = "127.0.0.1:8000")]
    pub bind: SocketAddr,

    /// Log filter used when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

impl Config {
    pub fn docker_cmd(&self) -> DockerCmd {
        DockerCmd::with_config(
            self.docker_bin.clone(),
            self.context.clone(),
            self.host.clone(),
            Duration::from_secs(self.timeout_secs),
        )
    }
}
