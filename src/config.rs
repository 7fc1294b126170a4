//! Viewer configuration
//!
//! The viewer needs to know:
//! - Where the transfer history API lives
//! - Which JSON-RPC node to use for balance reads and account discovery
//! - Which token contract to read and how to display it
//!
//! The file is read from `~/.transferview/config.toml` when present. It is
//! never written; a missing file means defaults.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::models::DEFAULT_LIMIT;
use crate::wallet::is_valid_address;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base URL of the transfer history API (without the `/api/...` path).
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// JSON-RPC endpoint used for `eth_call`, `eth_accounts` and `eth_chainId`.
    #[serde(default = "default_rpc_url")]
    pub rpc_url: String,

    /// ERC-20 contract whose `balanceOf` is polled.
    #[serde(default = "default_token_contract")]
    pub token_contract: String,

    #[serde(default = "default_token_decimals")]
    pub token_decimals: u8,

    #[serde(default = "default_token_symbol")]
    pub token_symbol: String,

    /// Rows requested per page.
    #[serde(default = "default_page_limit")]
    pub page_limit: u32,

    #[serde(default = "default_balance_poll_interval_ms")]
    pub balance_poll_interval_ms: u64,
}

fn default_api_base_url() -> String {
    "http://localhost:3001".to_string()
}

fn default_rpc_url() -> String {
    "http://localhost:8545".to_string()
}

fn default_token_contract() -> String {
    "0x0000000000000000000000000000000000000000".to_string()
}

fn default_token_decimals() -> u8 {
    18
}

fn default_token_symbol() -> String {
    "TOKEN".to_string()
}

fn default_page_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_balance_poll_interval_ms() -> u64 {
    10_000
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: default_api_base_url(),
            rpc_url: default_rpc_url(),
            token_contract: default_token_contract(),
            token_decimals: default_token_decimals(),
            token_symbol: default_token_symbol(),
            page_limit: default_page_limit(),
            balance_poll_interval_ms: default_balance_poll_interval_ms(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, falling back to defaults.
    pub fn load() -> Result<Self, ConfigError> {
        let config_path = Self::config_path()?;
        Self::load_from(&config_path)
    }

    /// Load configuration from an explicit path. A missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            log::info!("📝 No config at {}, using defaults", path.display());
            return Ok(Config::default());
        }

        log::info!("📁 Loading config from: {}", path.display());
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        log::info!(
            "✅ Config loaded: api={}, rpc={}, token={}",
            config.api_base_url,
            config.rpc_url,
            config.token_contract
        );
        Ok(config)
    }

    /// Get config file path
    fn config_path() -> Result<PathBuf, ConfigError> {
        let mut path = Self::data_dir()?;
        path.push("config.toml");
        Ok(path)
    }

    /// Get base data directory
    pub fn data_dir() -> Result<PathBuf, ConfigError> {
        let mut path = dirs::home_dir().ok_or(ConfigError::NoHomeDir)?;
        path.push(".transferview");
        Ok(path)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for url in [&self.api_base_url, &self.rpc_url] {
            if !url.starts_with("http://") && !url.starts_with("https://") {
                return Err(ConfigError::InvalidEndpoint(url.clone()));
            }
        }

        if !is_valid_address(&self.token_contract) {
            return Err(ConfigError::InvalidContract(self.token_contract.clone()));
        }

        if self.page_limit == 0 {
            return Err(ConfigError::InvalidValue("page_limit must be > 0".into()));
        }

        if self.balance_poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue(
                "balance_poll_interval_ms must be > 0".into(),
            ));
        }

        Ok(())
    }

    pub fn balance_poll_interval(&self) -> Duration {
        Duration::from_millis(self.balance_poll_interval_ms)
    }
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Home directory not found")]
    NoHomeDir,

    #[error("Invalid endpoint: {0} (must start with http:// or https://)")]
    InvalidEndpoint(String),

    #[error("Invalid token contract address: {0}")]
    InvalidContract(String),

    #[error("Invalid value: {0}")]
    InvalidValue(String),
}
