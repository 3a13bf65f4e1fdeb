use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;
use unreal_engine_link::EngineConfig;

use crate::cli::CliArgs;

/// Contents of `config.toml`. Every section is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileConfig {
    #[serde(default)]
    pub engine: EngineConfig,

    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ServerSection {
    /// Name reported in `initialize`.
    #[serde(default)]
    pub name: Option<String>,

    /// Usage hints reported in `initialize`.
    #[serde(default)]
    pub instructions: Option<String>,
}

impl FileConfig {
    /// `~/.config/unreal-mcp/config.toml`
    pub fn default_config_path() -> Result<PathBuf> {
        Ok(dirs::config_dir()
            .context("could not determine user config directory")?
            .join("unreal-mcp")
            .join("config.toml"))
    }

    /// Load an explicit path, or the default path if present.
    ///
    /// A missing explicit file is an error; a missing default file is not.
    /// The file is never written.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => match Self::default_config_path() {
                Ok(path) => (path, false),
                Err(e) => {
                    debug!(error = %e, "no config directory, using defaults");
                    return Ok(Self::default());
                }
            },
        };

        if !required && !path.exists() {
            debug!(path = %path.display(), "config file not found, using defaults");
            return Ok(Self::default());
        }

        debug!(path = %path.display(), "loading config");
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;
        toml::from_str(&content).with_context(|| format!("failed to parse config: {}", path.display()))
    }
}

/// Defaults, then the file, then `UNREAL_MCP_*` variables, then flags.
pub fn resolve_engine_config(file: &FileConfig, args: &CliArgs) -> Result<EngineConfig> {
    let mut config = file.engine.clone();
    config.apply_env_overrides();

    if let Some(host) = &args.host {
        config.host = host.clone();
    }
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(ms) = args.connect_timeout_ms {
        config.connect_timeout_ms = ms;
    }
    if let Some(ms) = args.read_timeout_ms {
        config.read_timeout_ms = ms;
    }
    if let Some(policy) = args.reconnect {
        config.reconnect = policy;
    }

    config.validate().context("invalid engine configuration")?;
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use std::io::Write;
    use unreal_engine_link::ReconnectPolicy;

    fn write_config(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_partial_engine_table() {
        let file = write_config(
            r#"
            [engine]
            port = 6100
            read_timeout_ms = 0

            [server]
            instructions = "Always compile."
            "#,
        );
        let config = FileConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.engine.port, 6100);
        assert_eq!(config.engine.read_timeout(), None);
        assert_eq!(config.engine.host, "127.0.0.1");
        assert_eq!(config.server.instructions.as_deref(), Some("Always compile."));
        assert!(config.server.name.is_none());
    }

    #[test]
    fn test_missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(FileConfig::load(Some(&missing)).is_err());
    }

    #[test]
    fn test_malformed_file_names_the_path() {
        let file = write_config("[engine\nport = ");
        let err = FileConfig::load(Some(file.path())).unwrap_err();
        assert!(format!("{err:#}").contains("failed to parse config"));
    }

    #[test]
    fn test_flags_override_file() {
        let file = FileConfig {
            engine: EngineConfig::for_address("10.0.0.5", 7000),
            ..FileConfig::default()
        };
        let args = CliArgs::try_parse_from([
            "unreal-mcp",
            "--host",
            "192.168.1.20",
            "--reconnect",
            "never",
        ])
        .unwrap();
        let config = resolve_engine_config(&file, &args).unwrap();
        assert_eq!(config.host, "192.168.1.20");
        assert_eq!(config.reconnect, ReconnectPolicy::Never);
    }

    #[test]
    fn test_invalid_result_is_rejected() {
        let file = FileConfig::default();
        let args = CliArgs::try_parse_from(["unreal-mcp", "--port", "0"]).unwrap();
        assert!(resolve_engine_config(&file, &args).is_err());
    }
}
