//! unreal-mcp: Blueprint editing tools for MCP clients.
//!
//! # Usage
//!
//! ```bash
//! # Serve MCP over stdio against the editor on 127.0.0.1:55557
//! unreal-mcp
//!
//! # Editor on another machine, verbose logs
//! UNREAL_MCP_HOST=192.168.1.20 unreal-mcp --log-level debug
//!
//! # One-shot smoke test against a running editor
//! unreal-mcp print-string --message "Hello"
//! ```

mod cli;
mod config;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use unreal_blueprint_tools::{register_blueprint_tools, PrintStringWorkflow};
use unreal_engine_link::config::load_dotenv;
use unreal_engine_link::{EngineConfig, EngineSession};
use unreal_mcp::{McpServer, StdioTransport};
use unreal_tool_runtime::ToolRegistry;

use crate::cli::{CliArgs, Command};
use crate::config::{resolve_engine_config, FileConfig};

const DEFAULT_INSTRUCTIONS: &str = "Tools edit Blueprint graphs in a running Unreal Editor. \
    Node-creating tools return result.node_id; pass it unchanged to later calls. \
    Call compile_blueprint after editing a graph.";

#[tokio::main]
async fn main() -> Result<()> {
    load_dotenv();
    let args = CliArgs::parse();
    init_tracing(args.log_level.as_deref());

    let file = FileConfig::load(args.config.as_deref()).context("failed to load configuration")?;
    let engine = resolve_engine_config(&file, &args)?;
    info!(
        address = %engine.address(),
        reconnect = %engine.reconnect,
        read_timeout_ms = engine.read_timeout_ms,
        "engine listener configured"
    );

    match args.command() {
        Command::Serve => serve(engine, &file).await,
        Command::PrintString {
            blueprint,
            parent_class,
            graph,
            message,
        } => {
            let workflow = PrintStringWorkflow {
                blueprint_name: blueprint,
                parent_class,
                graph,
                message,
            };
            print_string(engine, workflow).await
        }
        Command::Tools => {
            let registry = build_registry(Arc::new(EngineSession::new(engine)))?;
            for definition in registry.list() {
                println!("{}\t{}", definition.name, definition.description);
            }
            Ok(())
        }
    }
}

/// Logs go to stderr; stdout carries the MCP stream.
fn init_tracing(level: Option<&str>) {
    let filter = match level {
        Some(level) => EnvFilter::new(level),
        None => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn build_registry(session: Arc<EngineSession>) -> Result<ToolRegistry> {
    let mut registry = ToolRegistry::new();
    register_blueprint_tools(&mut registry, session).context("failed to register tools")?;
    Ok(registry)
}

async fn serve(engine: EngineConfig, file: &FileConfig) -> Result<()> {
    let session = Arc::new(EngineSession::new(engine));
    let registry = build_registry(Arc::clone(&session))?;

    let mut server = McpServer::new(registry).with_instructions(
        file.server
            .instructions
            .clone()
            .unwrap_or_else(|| DEFAULT_INSTRUCTIONS.to_string()),
    );
    if let Some(name) = &file.server.name {
        server = server.with_name(name.clone());
    }

    let mut transport = StdioTransport::stdio();
    tokio::select! {
        result = server.run(&mut transport) => result.context("MCP server failed")?,
        _ = shutdown_signal() => info!("shutdown signal received"),
    }

    session.disconnect().await;
    Ok(())
}

async fn print_string(engine: EngineConfig, workflow: PrintStringWorkflow) -> Result<()> {
    let session = EngineSession::new(engine);
    let report = workflow
        .run(&session)
        .await
        .with_context(|| format!("workflow {} failed", workflow.run_description()))?;

    info!(
        print_node = %report.print_node_id,
        event_node = %report.event_node_id,
        "blueprint ready"
    );
    println!("{}", serde_json::to_string_pretty(&report.nodes)?);
    session.disconnect().await;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = tokio::signal::ctrl_c();

    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut sigterm) => {
                tokio::select! {
                    _ = ctrl_c => {},
                    _ = sigterm.recv() => {},
                }
            }
            Err(e) => {
                warn!(error = %e, "failed to register SIGTERM handler");
                ctrl_c.await.ok();
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = ctrl_c.await {
            warn!(error = %e, "failed to listen for ctrl_c");
        }
    }
}
