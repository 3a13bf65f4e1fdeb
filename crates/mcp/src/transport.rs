//! Line-oriented message transports.
//!
//! MCP over stdio is newline-delimited JSON: one message per line, no
//! embedded newlines. Stdout belongs to the protocol, so logs go to stderr.

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;

use crate::error::McpError;

#[async_trait]
pub trait McpTransport: Send {
    /// Next non-empty message, or `None` once the peer has closed.
    async fn receive(&mut self) -> Result<Option<String>, McpError>;

    async fn send(&mut self, message: &str) -> Result<(), McpError>;
}

/// Newline-delimited JSON over any reader/writer pair.
pub struct LineTransport<R, W> {
    reader: R,
    writer: W,
}

/// The transport MCP hosts launch us with.
pub type StdioTransport = LineTransport<BufReader<tokio::io::Stdin>, tokio::io::Stdout>;

impl StdioTransport {
    pub fn stdio() -> Self {
        LineTransport::new(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
    }
}

impl<R, W> LineTransport<R, W> {
    pub fn new(reader: R, writer: W) -> Self {
        Self { reader, writer }
    }
}

#[async_trait]
impl<R, W> McpTransport for LineTransport<R, W>
where
    R: AsyncBufRead + Unpin + Send,
    W: AsyncWrite + Unpin + Send,
{
    async fn receive(&mut self) -> Result<Option<String>, McpError> {
        let mut line = String::new();
        loop {
            line.clear();
            if self.reader.read_line(&mut line).await? == 0 {
                return Ok(None);
            }
            let trimmed = line.trim();
            if !trimmed.is_empty() {
                return Ok(Some(trimmed.to_string()));
            }
        }
    }

    async fn send(&mut self, message: &str) -> Result<(), McpError> {
        self.writer.write_all(message.as_bytes()).await?;
        self.writer.write_all(b"\n").await?;
        self.writer.flush().await?;
        Ok(())
    }
}

/// In-memory transport pair for tests.
pub struct ChannelTransport {
    rx: mpsc::Receiver<String>,
    tx: mpsc::Sender<String>,
}

impl ChannelTransport {
    /// Two connected ends: what one sends, the other receives.
    pub fn pair() -> (Self, Self) {
        let (tx_a, rx_b) = mpsc::channel(32);
        let (tx_b, rx_a) = mpsc::channel(32);
        (Self { rx: rx_a, tx: tx_a }, Self { rx: rx_b, tx: tx_b })
    }
}

#[async_trait]
impl McpTransport for ChannelTransport {
    async fn receive(&mut self) -> Result<Option<String>, McpError> {
        Ok(self.rx.recv().await)
    }

    async fn send(&mut self, message: &str) -> Result<(), McpError> {
        self.tx.send(message.to_string()).await.map_err(|e| {
            McpError::Transport(std::io::Error::new(std::io::ErrorKind::BrokenPipe, e))
        })
    }
}
