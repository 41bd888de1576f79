//! # evt-config
//!
//! Layered configuration loading for the evt client using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`EVT_*` prefix, `__` as separator)
//! 2. Project-level `.evt/config.toml`
//! 3. User-level `~/.config/evt/config.toml`
//! 4. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `EVT_API__BASE_URL` -> `api.base_url`,
//! `EVT_MANAGE__POLL_INTERVAL_MS` -> `manage.poll_interval_ms`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use evt_config::EvtConfig;
//!
//! let config = EvtConfig::load_with_dotenv().expect("config");
//! println!("GraphQL endpoint: {}", config.api.graphql_url());
//! ```

mod api;
mod error;
mod manage;
mod session;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use manage::ManageConfig;
pub use session::SessionConfig;

use figment::{
    Figment, Provider,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct EvtConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
    #[serde(default)]
    pub manage: ManageConfig,
}

impl EvtConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Load with `.env` support, merging `overrides` over every other source.
    ///
    /// The CLI passes its flag values through here.
    pub fn load_with_overrides(overrides: impl Provider) -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::from_figment(&Self::figment().merge(overrides))
    }

    /// Extract and validate a config from an arbitrary figment.
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain.
    ///
    /// Public so callers can add providers on top.
    #[must_use]
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".evt/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed("EVT_").split("__"))
    }

    /// Reject values no component can work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.base_url".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        if self.manage.poll_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                field: "manage.poll_interval_ms".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("evt").join("config.toml"))
    }

    /// Walks up from `CARGO_MANIFEST_DIR` (if set) looking for `.env`, then
    /// falls back to the current directory. Missing files are ignored.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
