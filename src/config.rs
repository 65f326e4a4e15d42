//! Configuration for emuctl.
//!
//! Everything is optional: with no environment set at all, the client
//! falls back to discovery and then to the conventional local port.

use std::path::PathBuf;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Main configuration for the client.
#[derive(Debug, Default)]
pub struct Config {
    pub grpc: GrpcConfig,
    pub discovery: DiscoveryConfig,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            grpc: GrpcConfig::from_env()?,
            discovery: DiscoveryConfig::from_env(),
        })
    }
}

/// Emulator gRPC endpoint configuration.
#[derive(Debug, Default)]
pub struct GrpcConfig {
    /// Full `host:port` endpoint (`EMUCTL_GRPC_ADDR`). Wins over
    /// everything except the `--addr` flag.
    pub addr: Option<String>,

    /// Port on localhost (`EMUCTL_GRPC_PORT`); ignored when `addr` is set.
    pub port: Option<u16>,

    /// Bearer token attached to every call (`EMUCTL_GRPC_TOKEN`).
    pub token: Option<SecretString>,
}

impl GrpcConfig {
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            addr: optional_env("EMUCTL_GRPC_ADDR"),
            port: optional_env("EMUCTL_GRPC_PORT")
                .map(|s| s.parse())
                .transpose()
                .map_err(|e| ConfigError::InvalidValue {
                    key: "EMUCTL_GRPC_PORT".to_string(),
                    message: format!("must be a port number: {e}"),
                })?,
            token: optional_env("EMUCTL_GRPC_TOKEN").map(SecretString::from),
        })
    }
}

/// Emulator discovery configuration.
#[derive(Debug, Default)]
pub struct DiscoveryConfig {
    /// Override for the `avd/running` directory (`EMUCTL_DISCOVERY_DIR`).
    pub dir: Option<PathBuf>,
}

impl DiscoveryConfig {
    fn from_env() -> Self {
        Self {
            dir: optional_env("EMUCTL_DISCOVERY_DIR").map(PathBuf::from),
        }
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
