//! Configuration management.

use anyhow::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::output::OutputFormat;

/// Overrides the config file location
pub const CONFIG_PATH_ENV: &str = "SENTINEL_CONFIG";

/// Default block explorer transaction link prefix
pub const DEFAULT_EXPLORER_URL: &str = "https://polygonscan.com/tx/";

/// Keys accepted by `sentinel config set`
pub const KEYS: &[(&str, &str)] = &[
    ("rpc_url", "JSON-RPC endpoint of the signing node"),
    ("contract_address", "Kill-switch contract address (0x...)"),
    ("device_id", "Default device identifier"),
    ("explorer_url", "Transaction link prefix of the block explorer"),
    ("output_format", "Default output format (pretty/json/yaml)"),
    ("explain_by_default", "Always explain commands (true/false)"),
];

/// CLI configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// JSON-RPC endpoint.
    pub rpc_url: Option<String>,

    /// Kill-switch contract address.
    pub contract_address: Option<String>,

    /// Default device identifier.
    pub device_id: Option<String>,

    /// Block explorer transaction link prefix.
    pub explorer_url: Option<String>,

    /// Default output format.
    pub output_format: Option<OutputFormat>,

    /// Always show explanations (as if --explain was passed).
    #[serde(default)]
    pub explain_by_default: bool,
}

impl Config {
    /// Get the config file path.
    pub fn path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_PATH_ENV) {
            return Ok(PathBuf::from(path));
        }

        let dirs = ProjectDirs::from("io", "sentinelchain", "sentinel")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Load configuration from the default location.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::path()?)
    }

    /// Load configuration from `path`, or defaults if it does not exist.
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Invalid config file {}: {e}", path.display()))?;

        Ok(config)
    }

    /// Save configuration to the default location.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::path()?)
    }

    /// Save configuration to `path`.
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;

        Ok(())
    }

    /// Set `key` from its string form.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "rpc_url" | "rpc" => self.rpc_url = Some(value.to_string()),
            "contract_address" | "contract" => {
                let address: sentinelchain::Address = value.parse()?;
                self.contract_address = Some(address.to_string());
            }
            "device_id" | "device" => {
                if value.trim().is_empty() {
                    anyhow::bail!("device_id must not be empty");
                }
                self.device_id = Some(value.to_string());
            }
            "explorer_url" | "explorer" => self.explorer_url = Some(value.to_string()),
            "output_format" | "output" => self.output_format = Some(value.parse()?),
            "explain_by_default" | "explain" => self.explain_by_default = value.parse()?,
            _ => {
                let available: Vec<String> = KEYS
                    .iter()
                    .map(|(k, desc)| format!("  {k:<20} - {desc}"))
                    .collect();
                anyhow::bail!(
                    "Unknown config key: {}\n\nAvailable keys:\n{}",
                    key,
                    available.join("\n")
                );
            }
        }
        Ok(())
    }

    /// Explorer link prefix, falling back to the default.
    pub fn explorer_url(&self) -> &str {
        self.explorer_url.as_deref().unwrap_or(DEFAULT_EXPLORER_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = TempDir::new().unwrap();
        let config = Config::load_from(&dir.path().join("config.toml")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.explorer_url(), DEFAULT_EXPLORER_URL);
    }

    #[test]
    fn test_save_and_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.set("rpc_url", "http://127.0.0.1:8545").unwrap();
        config
            .set("contract", "0x5FbDB2315678afecb367f032d93F642f64180aa3")
            .unwrap();
        config.set("device", "DEVICE_042").unwrap();
        config.set("output", "json").unwrap();
        config.set("explain", "true").unwrap();
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.contract_address.as_deref(),
            Some("0x5fbdb2315678afecb367f032d93f642f64180aa3")
        );
        assert_eq!(loaded.output_format, Some(OutputFormat::Json));
        assert!(loaded.explain_by_default);
    }

    #[test]
    fn test_set_rejects_bad_values() {
        let mut config = Config::default();
        assert!(config.set("contract_address", "0x1234").is_err());
        assert!(config.set("device_id", "  ").is_err());
        assert!(config.set("output_format", "csv").is_err());
        assert!(config.set("explain_by_default", "maybe").is_err());

        let err = config.set("api_key", "x").unwrap_err().to_string();
        assert!(err.contains("Unknown config key"));
        assert!(err.contains("rpc_url"));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_invalid_file_is_reported() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "rpc_url = [").unwrap();

        let err = Config::load_from(&path).unwrap_err().to_string();
        assert!(err.contains("Invalid config file"));
    }
}
