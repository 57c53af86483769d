//! # Configuration Management Module
//!
//! Loads and validates the toolkit configuration from a TOML file.
//!
//! ## Configuration Structure
//!
//! - [`AdminConfig`] - Command behaviour (message prefix, output caps, global currency and treasury)
//! - [`HostConfig`] - Where the economy snapshot lives
//! - [`LoggingConfig`] - Log level, log file and audit file
//!
//! ## Usage
//!
//! ```rust,no_run
//! use econadmin::config::Config;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load("econadmin.toml").await?;
//!     println!("Prefix: {}", config.admin.message_prefix);
//!
//!     Config::create_default("econadmin.toml").await?;
//!     Ok(())
//! }
//! ```
//!
//! ## Configuration File Format
//!
//! ```toml
//! [admin]
//! message_prefix = "[EA]"
//! global_currency = "Gold"
//! treasury_account = "Gold - Treasury"
//! new_player_gift = 500
//! list_limit = 100
//! preview_limit = 30
//! balance_limit = 20
//!
//! [host]
//! snapshot = "data/economy.json"
//!
//! [logging]
//! level = "info"
//! file = "econadmin.log"
//! audit_file = "econadmin-audit.log"
//! ```
//!
//! The global currency is a plain value handed to the command processor; nothing
//! in the crate reads it from shared state.

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use tokio::fs;

use crate::error::EconAdminError;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminConfig {
    /// Prefix on every status line sent to the admin.
    #[serde(default = "default_message_prefix")]
    pub message_prefix: String,
    /// Server-wide currency managed by the `ea-gc` commands.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub global_currency: Option<String>,
    /// Bank account holding minted global currency. Blank means
    /// `"<global_currency> - Treasury"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treasury_account: Option<String>,
    /// Default amount for `ea-gc gift`; 0 disables the default.
    #[serde(default)]
    pub new_player_gift: u64,
    /// Rows shown by `ea-accounts` and `ea-currencies`.
    #[serde(default = "default_list_limit")]
    pub list_limit: usize,
    /// Rows shown by `ea-preview`.
    #[serde(default = "default_preview_limit")]
    pub preview_limit: usize,
    /// Holdings shown by `ea-balance`.
    #[serde(default = "default_balance_limit")]
    pub balance_limit: usize,
}

fn default_message_prefix() -> String {
    "[EA]".to_string()
}

fn default_list_limit() -> usize {
    100
}

fn default_preview_limit() -> usize {
    30
}

fn default_balance_limit() -> usize {
    20
}

impl Default for AdminConfig {
    fn default() -> Self {
        Self {
            message_prefix: default_message_prefix(),
            global_currency: None,
            treasury_account: None,
            new_player_gift: 0,
            list_limit: default_list_limit(),
            preview_limit: default_preview_limit(),
            balance_limit: default_balance_limit(),
        }
    }
}

impl AdminConfig {
    /// Name of the treasury account, if a global currency is configured.
    pub fn treasury_name(&self) -> Option<String> {
        let currency = self.global_currency.as_deref()?;
        match self.treasury_account.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => Some(format!("{} - Treasury", currency)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    /// JSON economy snapshot loaded into the in-memory host.
    pub snapshot: String,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            snapshot: "data/economy.json".to_string(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub file: Option<String>,
    /// Receives every record logged with target `audit` (balance changes).
    #[serde(default)]
    pub audit_file: Option<String>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: Some("econadmin.log".to_string()),
            audit_file: Some("econadmin-audit.log".to_string()),
        }
    }
}

impl LoggingConfig {
    /// Parse `level`, defaulting to Info for unknown names.
    pub fn level_filter(&self) -> log::LevelFilter {
        self.level.parse().unwrap_or_else(|_| {
            eprintln!("Invalid log level '{}', defaulting to info", self.level);
            log::LevelFilter::Info
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub host: HostConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from a file
    pub async fn load(path: &str) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| anyhow!("Failed to read config file {}: {}", path, e))?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| anyhow!("Failed to parse config file {}: {}", path, e))?;

        config.validate()?;
        Ok(config)
    }

    /// Create a default configuration file
    pub async fn create_default(path: &str) -> Result<()> {
        let config = Config::default();
        let content = toml::to_string_pretty(&config)
            .map_err(|e| anyhow!("Failed to serialize default config: {}", e))?;

        fs::write(path, content)
            .await
            .map_err(|e| anyhow!("Failed to write config file {}: {}", path, e))?;

        Ok(())
    }

    /// Reject values the command layer cannot work with.
    pub fn validate(&self) -> Result<(), EconAdminError> {
        let admin = &self.admin;
        if admin.message_prefix.trim().is_empty() {
            return Err(EconAdminError::InvalidConfig(
                "admin.message_prefix must not be empty".to_string(),
            ));
        }
        for (key, value) in [
            ("list_limit", admin.list_limit),
            ("preview_limit", admin.preview_limit),
            ("balance_limit", admin.balance_limit),
        ] {
            if value == 0 {
                return Err(EconAdminError::InvalidConfig(format!(
                    "admin.{} must be at least 1",
                    key
                )));
            }
        }
        if matches!(&admin.global_currency, Some(name) if name.trim().is_empty()) {
            return Err(EconAdminError::InvalidConfig(
                "admin.global_currency must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}
