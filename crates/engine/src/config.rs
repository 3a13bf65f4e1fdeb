use std::env;
use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::EngineError;

/// Port the editor-side plugin listens on.
pub const DEFAULT_PORT: u16 = 55557;

/// Load .env file (silently ignores if missing).
pub fn load_dotenv() {
    dotenvy::dotenv().ok();
}

fn env_opt(key: &str) -> Option<String> {
    env::var(key).ok().filter(|s| !s.is_empty())
}

fn override_with<T>(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &'static str,
    field: &mut T,
    ignored: &mut Vec<&'static str>,
) where
    T: FromStr,
    T::Err: fmt::Display,
{
    let Some(raw) = lookup(key) else {
        return;
    };
    match raw.trim().parse() {
        Ok(value) => *field = value,
        Err(e) => {
            warn!(key, value = %raw, error = %e, "ignoring unparsable override");
            ignored.push(key);
        }
    }
}

// ── Reconnect policy ────────────────────────────────────────────────

/// What the session does after a connection has been dropped.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReconnectPolicy {
    /// Open a fresh connection on the next command.
    #[default]
    OnDrop,
    /// Stay disconnected; every later command fails to connect.
    Never,
}

impl FromStr for ReconnectPolicy {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "on_drop" | "on-drop" | "ondrop" => Ok(ReconnectPolicy::OnDrop),
            "never" => Ok(ReconnectPolicy::Never),
            other => Err(EngineError::InvalidConfig(format!(
                "unknown reconnect policy '{other}', expected one of: on_drop, never"
            ))),
        }
    }
}

impl fmt::Display for ReconnectPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReconnectPolicy::OnDrop => f.write_str("on_drop"),
            ReconnectPolicy::Never => f.write_str("never"),
        }
    }
}

// ── Engine config ───────────────────────────────────────────────────

/// Where the editor listener lives and how long to wait on it.
///
/// Usually built from defaults, an optional `[engine]` TOML table, and
/// `UNREAL_MCP_*` environment overrides, in that order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Upper bound on each socket read; 0 waits forever.
    #[serde(default = "default_read_timeout_ms")]
    pub read_timeout_ms: u64,

    #[serde(default = "default_write_timeout_ms")]
    pub write_timeout_ms: u64,

    /// Bytes requested per socket read.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    /// Ceiling on a single buffered response.
    #[serde(default = "default_max_response_bytes")]
    pub max_response_bytes: usize,

    #[serde(default)]
    pub reconnect: ReconnectPolicy,
}

fn default_host() -> String {
    "127.0.0.1".into()
}

fn default_port() -> u16 {
    DEFAULT_PORT
}

fn default_connect_timeout_ms() -> u64 {
    5_000
}

fn default_read_timeout_ms() -> u64 {
    60_000
}

fn default_write_timeout_ms() -> u64 {
    10_000
}

fn default_chunk_size() -> usize {
    4096
}

fn default_max_response_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            connect_timeout_ms: default_connect_timeout_ms(),
            read_timeout_ms: default_read_timeout_ms(),
            write_timeout_ms: default_write_timeout_ms(),
            chunk_size: default_chunk_size(),
            max_response_bytes: default_max_response_bytes(),
            reconnect: ReconnectPolicy::default(),
        }
    }
}

impl EngineConfig {
    /// Defaults with environment overrides applied (call `load_dotenv()` first).
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.apply_env_overrides();
        config
    }

    /// Config pointing at an explicit listener, other settings default.
    pub fn for_address(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
            ..Self::default()
        }
    }

    /// Override fields from `UNREAL_MCP_*` environment variables.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides(env_opt);
    }

    /// Override fields from any key lookup.
    ///
    /// Unparsable values leave the field unchanged and are logged; the keys
    /// that were ignored are returned.
    pub fn apply_overrides(&mut self, lookup: impl Fn(&str) -> Option<String>) -> Vec<&'static str> {
        let mut ignored = Vec::new();

        if let Some(host) = lookup("UNREAL_MCP_HOST") {
            self.host = host;
        }
        override_with(&lookup, "UNREAL_MCP_PORT", &mut self.port, &mut ignored);
        override_with(
            &lookup,
            "UNREAL_MCP_CONNECT_TIMEOUT_MS",
            &mut self.connect_timeout_ms,
            &mut ignored,
        );
        override_with(&lookup, "UNREAL_MCP_READ_TIMEOUT_MS", &mut self.read_timeout_ms, &mut ignored);
        override_with(&lookup, "UNREAL_MCP_WRITE_TIMEOUT_MS", &mut self.write_timeout_ms, &mut ignored);
        override_with(&lookup, "UNREAL_MCP_CHUNK_SIZE", &mut self.chunk_size, &mut ignored);
        override_with(
            &lookup,
            "UNREAL_MCP_MAX_RESPONSE_BYTES",
            &mut self.max_response_bytes,
            &mut ignored,
        );
        override_with(&lookup, "UNREAL_MCP_RECONNECT", &mut self.reconnect, &mut ignored);

        ignored
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.host.trim().is_empty() {
            return Err(EngineError::InvalidConfig("host must not be empty".into()));
        }
        if self.port == 0 {
            return Err(EngineError::InvalidConfig("port must be non-zero".into()));
        }
        if self.chunk_size == 0 {
            return Err(EngineError::InvalidConfig("chunk_size must be non-zero".into()));
        }
        if self.max_response_bytes < self.chunk_size {
            return Err(EngineError::InvalidConfig(format!(
                "max_response_bytes ({}) must be at least chunk_size ({})",
                self.max_response_bytes, self.chunk_size
            )));
        }
        Ok(())
    }

    /// `host:port` of the listener.
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    pub fn read_timeout(&self) -> Option<Duration> {
        (self.read_timeout_ms > 0).then(|| Duration::from_millis(self.read_timeout_ms))
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_millis(self.write_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.address(), "127.0.0.1:55557");
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.reconnect, ReconnectPolicy::OnDrop);
        config.validate().unwrap();
    }

    #[test]
    fn test_overrides() {
        let mut config = EngineConfig::default();
        config.apply_overrides(lookup(&[
            ("UNREAL_MCP_HOST", "10.0.0.5"),
            ("UNREAL_MCP_PORT", "6000"),
            ("UNREAL_MCP_READ_TIMEOUT_MS", "0"),
            ("UNREAL_MCP_RECONNECT", "never"),
        ]));
        assert_eq!(config.address(), "10.0.0.5:6000");
        assert_eq!(config.read_timeout(), None);
        assert_eq!(config.reconnect, ReconnectPolicy::Never);
    }

    #[test]
    fn test_unparsable_overrides_are_ignored() {
        let mut config = EngineConfig::default();
        let ignored = config.apply_overrides(lookup(&[
            ("UNREAL_MCP_PORT", "not-a-port"),
            ("UNREAL_MCP_READ_TIMEOUT_MS", "-5"),
            ("UNREAL_MCP_CHUNK_SIZE", "8k"),
            ("UNREAL_MCP_RECONNECT", "sometimes"),
            ("UNREAL_MCP_CONNECT_TIMEOUT_MS", "250"),
        ]));
        assert_eq!(
            ignored,
            vec![
                "UNREAL_MCP_PORT",
                "UNREAL_MCP_READ_TIMEOUT_MS",
                "UNREAL_MCP_CHUNK_SIZE",
                "UNREAL_MCP_RECONNECT",
            ]
        );
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.read_timeout(), Some(Duration::from_secs(60)));
        assert_eq!(config.chunk_size, 4096);
        assert_eq!(config.reconnect, ReconnectPolicy::OnDrop);
        assert_eq!(config.connect_timeout_ms, 250);
    }

    #[test]
    fn test_write_timeout_and_chunk_size_overrides() {
        let mut config = EngineConfig::default();
        let ignored = config.apply_overrides(lookup(&[
            ("UNREAL_MCP_WRITE_TIMEOUT_MS", "1500"),
            ("UNREAL_MCP_CHUNK_SIZE", " 512 "),
        ]));
        assert!(ignored.is_empty());
        assert_eq!(config.write_timeout(), Duration::from_millis(1500));
        assert_eq!(config.chunk_size, 512);
    }

    #[test]
    fn test_partial_toml_table_uses_defaults() {
        let config: EngineConfig = toml::from_str("port = 7000\nreconnect = \"never\"\n").unwrap();
        assert_eq!(config.port, 7000);
        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.max_response_bytes, 16 * 1024 * 1024);
        assert_eq!(config.reconnect, ReconnectPolicy::Never);
    }

    #[test]
    fn test_validate_rejects_bad_values() {
        let mut config = EngineConfig::default();
        config.port = 0;
        assert!(matches!(config.validate(), Err(EngineError::InvalidConfig(_))));

        let mut config = EngineConfig::default();
        config.max_response_bytes = 16;
        assert!(config.validate().is_err());
    }
}
