mod config;
mod docker;
mod error;
mod logs;
mod service;
mod tools;

use anyhow::Result;
use clap::Parser;
use config::{Config, Transport};
use rmcp::transport::stdio;
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use rmcp::ServiceExt;
use service::Server;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::parse();

    // Logs go to stderr; stdout carries the MCP stream on the stdio transport
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .init();

    info!("Starting MCP docker server");
    info!(
        "Using {} (context: {:?}, host: {:?}, timeout: {}s)",
        config.docker_bin, config.context, config.host, config.timeout_secs
    );

    let server = Server::new(Arc::new(config.docker_cmd()));

    match config.transport {
        Transport::Stdio => serve_stdio(server).await,
        Transport::Http => serve_http(server, config.bind).await,
    }
}

async fn serve_stdio(server: Server) -> Result<()> {
    info!("Starting MCP server on stdio");
    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("Failed to start MCP server: {:?}", e);
    })?;

    info!("MCP server running");
    let reason = service.waiting().await?;
    info!("MCP server stopped: {:?}", reason);
    Ok(())
}

async fn serve_http(server: Server, bind: SocketAddr) -> Result<()> {
    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );
    let router = axum::Router::new().nest_service("/mcp", service);

    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("MCP server listening on http://{}/mcp", bind);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
        })
        .await?;

    info!("MCP server stopped");
    Ok(())
}
