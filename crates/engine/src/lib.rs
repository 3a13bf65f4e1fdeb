//! Client side of the Unreal editor's Blueprint command listener.
//!
//! The listener speaks an unframed JSON-over-TCP protocol: the client writes
//! one `{"type": ..., "params": {...}}` object and the editor answers with a
//! single JSON value. There is no length prefix and no delimiter, so the
//! response is considered complete as soon as the bytes received so far parse.
//!
//! # Architecture
//!
//! - **config**: listener address, timeouts, buffer ceiling, reconnect policy
//! - **command**: the request envelope and its encoding
//! - **framer**: incremental "parse until it parses" response detection
//! - **connection**: a single TCP connection performing one exchange at a time
//! - **session**: owns at most one connection, reconnects after drops, and
//!   serializes callers
//! - **error**: unified error type
//!
//! ```no_run
//! use unreal_engine_link::{CommandSink, EngineConfig, EngineSession};
//!
//! # async fn example() {
//! let session = EngineSession::new(EngineConfig::default());
//! let mut params = serde_json::Map::new();
//! params.insert("blueprint_name".into(), "BP_Test".into());
//! let response = session.send_command("compile_blueprint", params).await;
//! # }
//! ```

pub mod config;
pub mod command;
pub mod framer;
pub mod connection;
pub mod session;
pub mod error;

pub use config::{EngineConfig, ReconnectPolicy};
pub use command::CommandEnvelope;
pub use framer::{read_response, Frame, ResponseFramer};
pub use connection::EngineConnection;
pub use session::{CommandSink, EngineSession};
pub use error::EngineError;
