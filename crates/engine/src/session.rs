//! Session owning the (at most one) live connection to the editor.

use async_trait::async_trait;
use serde_json::{Map, Value};
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::command::CommandEnvelope;
use crate::config::{EngineConfig, ReconnectPolicy};
use crate::connection::EngineConnection;
use crate::error::EngineError;

/// Anything that can deliver a command to the editor and return its reply.
///
/// Implemented by [`EngineSession`]; tool tests substitute recording fakes.
#[async_trait]
pub trait CommandSink: Send + Sync {
    async fn send_command(
        &self,
        command: &str,
        params: Map<String, Value>,
    ) -> Result<Value, EngineError>;
}

#[derive(Debug, Default)]
struct SessionState {
    connection: Option<EngineConnection>,
    /// A connection existed and was discarded after a failure.
    dropped: bool,
}

/// Lazily connects, reuses the connection across commands while it stays
/// usable, and discards it after any failed exchange.
///
/// A cached connection that the editor closed while idle is replaced before
/// the command is written, so an editor restart costs no failed call.
///
/// Exchanges are serialized through an async mutex: concurrent callers queue
/// instead of interleaving bytes on the socket. A failed exchange is never
/// retried; the next command reconnects when the policy allows it.
#[derive(Debug)]
pub struct EngineSession {
    config: EngineConfig,
    state: Mutex<SessionState>,
}

impl EngineSession {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            config,
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub async fn is_connected(&self) -> bool {
        self.state.lock().await.connection.is_some()
    }

    /// Reuse the live connection if it is still usable, or open a new one.
    ///
    /// Fails with [`EngineError::Connect`] when the listener is unreachable,
    /// or when a previous connection was dropped under [`ReconnectPolicy::Never`].
    pub async fn ensure_connected(&self) -> Result<(), EngineError> {
        let mut state = self.state.lock().await;
        self.connection_mut(&mut state).await.map(|_| ())
    }

    /// Close the live connection, if any. The next command reconnects.
    pub async fn disconnect(&self) {
        let mut state = self.state.lock().await;
        if state.connection.take().is_some() {
            info!(address = %self.config.address(), "disconnected from editor listener");
        }
    }

    async fn connection_mut<'a>(
        &self,
        state: &'a mut SessionState,
    ) -> Result<&'a mut EngineConnection, EngineError> {
        if let Some(connection) = state.connection.take() {
            if connection.is_usable() {
                return Ok(state.connection.insert(connection));
            }
            warn!(address = %self.config.address(), "cached editor connection is stale");
            state.dropped = true;
        }

        if state.dropped && self.config.reconnect == ReconnectPolicy::Never {
            return Err(EngineError::Connect {
                address: self.config.address(),
                reason: "connection was dropped and reconnect policy is 'never'".into(),
            });
        }
        let connection = EngineConnection::connect(&self.config).await?;
        info!(
            address = %connection.address(),
            reconnect = state.dropped,
            "connected to editor listener"
        );
        Ok(state.connection.insert(connection))
    }

    fn discard(&self, state: &mut SessionState, reason: &str) {
        if state.connection.take().is_some() {
            warn!(address = %self.config.address(), reason, "dropping editor connection");
            state.dropped = true;
        }
    }
}

#[async_trait]
impl CommandSink for EngineSession {
    async fn send_command(
        &self,
        command: &str,
        params: Map<String, Value>,
    ) -> Result<Value, EngineError> {
        let envelope = CommandEnvelope::new(command, params);
        let mut state = self.state.lock().await;

        let connection = self.connection_mut(&mut state).await?;
        let result = connection.exchange(&envelope).await;

        match result {
            Ok(frame) => {
                if frame.trailing_bytes > 0 {
                    warn!(
                        command,
                        trailing_bytes = frame.trailing_bytes,
                        "editor sent data past the response"
                    );
                    self.discard(&mut state, "pipelined response data");
                }
                Ok(frame.value)
            }
            Err(EngineError::Encode(e)) => Err(EngineError::Encode(e)),
            Err(e) => {
                self.discard(&mut state, &e.to_string());
                Err(e)
            }
        }
    }
}
