//! # Service Configuration
//!
//! All configuration comes from the environment. Both provider tokens and
//! both base URLs are required: a screening service that silently runs
//! without one of its intelligence providers would hand out falsely clean
//! verdicts, so absence is fatal at boot.

use std::net::SocketAddr;

use pelorus_intel::{KplerConfig, LloydsConfig};

/// Default bind address when `PELORUS_BIND_ADDR` is not set.
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Startup configuration errors. All fatal.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required environment variable is missing or empty.
    #[error("missing required configuration: {0}")]
    MissingVar(&'static str),

    /// A value is present but unusable.
    #[error("invalid configuration {name}: {detail}")]
    Invalid {
        /// Variable name.
        name: &'static str,
        /// What is wrong with it.
        detail: String,
    },
}

/// Validated service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Intelligence-A client configuration.
    pub lloyds: LloydsConfig,
    /// Intelligence-B client configuration.
    pub kpler: KplerConfig,
    /// Postgres connection string.
    pub database_url: String,
    /// HTTP bind address.
    pub bind_addr: SocketAddr,
}

fn required(name: &'static str) -> Result<String, ConfigError> {
    match std::env::var(name) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(ConfigError::MissingVar(name)),
    }
}

impl Config {
    /// Load and validate configuration from the environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        let lloyds = LloydsConfig::new(
            required("PELORUS_LLOYDS_BASE_URL")?,
            required("PELORUS_LLOYDS_TOKEN")?,
        );
        let kpler = KplerConfig::new(
            required("PELORUS_KPLER_BASE_URL")?,
            required("PELORUS_KPLER_RISKS_URL")?,
            required("PELORUS_KPLER_TOKEN")?,
        );
        let database_url = required("DATABASE_URL")?;

        let bind_addr = std::env::var("PELORUS_BIND_ADDR")
            .unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
            .parse()
            .map_err(|e| ConfigError::Invalid {
                name: "PELORUS_BIND_ADDR",
                detail: format!("{e}"),
            })?;

        Ok(Self {
            lloyds,
            kpler,
            database_url,
            bind_addr,
        })
    }
}
