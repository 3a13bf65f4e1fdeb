use std::path::PathBuf;

use clap::{Parser, Subcommand};
use unreal_engine_link::ReconnectPolicy;

/// MCP server exposing Unreal Editor Blueprint graph editing as tools.
///
/// Speaks MCP over stdio and forwards each tool call to the editor's
/// command listener over TCP.
#[derive(Parser, Debug)]
#[command(name = "unreal-mcp", version, about)]
pub struct CliArgs {
    /// Config file (default: ~/.config/unreal-mcp/config.toml)
    #[arg(long, global = true, env = "UNREAL_MCP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Editor listener host
    #[arg(long, global = true, env = "UNREAL_MCP_HOST")]
    pub host: Option<String>,

    /// Editor listener port
    #[arg(long, global = true, env = "UNREAL_MCP_PORT")]
    pub port: Option<u16>,

    /// Connect timeout in milliseconds
    #[arg(long, global = true, env = "UNREAL_MCP_CONNECT_TIMEOUT_MS")]
    pub connect_timeout_ms: Option<u64>,

    /// Per-read timeout in milliseconds (0 = wait forever)
    #[arg(long, global = true, env = "UNREAL_MCP_READ_TIMEOUT_MS")]
    pub read_timeout_ms: Option<u64>,

    /// What to do after the editor drops the connection: on_drop or never
    #[arg(long, global = true, env = "UNREAL_MCP_RECONNECT")]
    pub reconnect: Option<ReconnectPolicy>,

    /// Log filter, e.g. "debug" or "unreal_engine_link=trace" (overrides RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Serve MCP over stdio (default)
    Serve,

    /// Build a Blueprint that prints a string on BeginPlay, then exit
    PrintString {
        #[arg(long, default_value = "BP_PrintString")]
        blueprint: String,

        #[arg(long, default_value = "Actor")]
        parent_class: String,

        #[arg(long, default_value = "EventGraph")]
        graph: String,

        #[arg(long, default_value = "Hello, Unreal MCP!")]
        message: String,
    },

    /// List the tools this server exposes
    Tools,
}

impl CliArgs {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Serve)
    }
}
