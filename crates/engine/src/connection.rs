use std::io;

use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tracing::{debug, instrument, warn};

use crate::command::CommandEnvelope;
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::framer::{read_response, Frame};

/// A single TCP connection to the editor listener.
///
/// Performs one request/response exchange at a time; callers that share a
/// connection must serialize access (see [`EngineSession`](crate::EngineSession)).
#[derive(Debug)]
pub struct EngineConnection {
    stream: TcpStream,
    address: String,
    config: EngineConfig,
}

impl EngineConnection {
    /// Open a connection, bounded by the configured connect timeout.
    #[instrument(skip_all, fields(address = %config.address()))]
    pub async fn connect(config: &EngineConfig) -> Result<Self, EngineError> {
        let address = config.address();
        let limit = config.connect_timeout();

        let stream = match tokio::time::timeout(limit, TcpStream::connect(&address)).await {
            Ok(Ok(stream)) => stream,
            Ok(Err(e)) => {
                return Err(EngineError::Connect {
                    address,
                    reason: e.to_string(),
                })
            }
            Err(_) => {
                return Err(EngineError::Connect {
                    address,
                    reason: format!("timed out after {limit:?}"),
                })
            }
        };
        stream.set_nodelay(true)?;

        debug!("connected to editor listener");
        Ok(Self {
            stream,
            address,
            config: config.clone(),
        })
    }

    pub fn address(&self) -> &str {
        &self.address
    }

    /// Whether an idle connection can carry the next command.
    ///
    /// Between exchanges the editor never writes, so a non-blocking read
    /// must report `WouldBlock`. EOF means the peer closed its side; any
    /// byte means the stream is out of step with our requests.
    pub fn is_usable(&self) -> bool {
        let mut scratch = [0u8; 1];
        match self.stream.try_read(&mut scratch) {
            Err(e) if e.kind() == io::ErrorKind::WouldBlock => true,
            Ok(0) => {
                debug!(address = %self.address, "editor closed the idle connection");
                false
            }
            Ok(_) => {
                warn!(address = %self.address, "unsolicited data on idle connection");
                false
            }
            Err(e) => {
                debug!(address = %self.address, error = %e, "idle connection failed");
                false
            }
        }
    }

    /// Write one command and read back its framed response.
    #[instrument(skip_all, fields(command = %envelope.command))]
    pub async fn exchange(&mut self, envelope: &CommandEnvelope) -> Result<Frame, EngineError> {
        let bytes = envelope.encode()?;
        debug!(bytes = bytes.len(), "sending command");

        let limit = self.config.write_timeout();
        let write = async {
            self.stream.write_all(&bytes).await?;
            self.stream.flush().await?;
            Ok::<_, io::Error>(())
        };
        tokio::time::timeout(limit, write)
            .await
            .map_err(|_| EngineError::WriteTimeout(limit))??;

        read_response(
            &mut self.stream,
            self.config.chunk_size,
            self.config.max_response_bytes,
            self.config.read_timeout(),
        )
        .await
    }
}
