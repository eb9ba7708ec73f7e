//! Service configuration.
//!
//! Everything environment-derived is collected here once at startup and
//! handed to `AppState`; adapters never read env vars mid-request.

use serde::Deserialize;

/// Whether outbound adapters perform real network calls or return simulated
/// values. An explicit flag, not a credential-presence check, so tests can
/// force either path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LaunchMode {
    Live,
    Simulated,
}

impl LaunchMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LaunchMode::Live => "live",
            LaunchMode::Simulated => "simulated",
        }
    }
}

/// Configuration for the launch service.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "defaults::bind_address")]
    pub bind_address: String,

    #[serde(default = "defaults::mode")]
    pub mode: LaunchMode,

    /// Base URL of the pinning API (Pinata-compatible).
    #[serde(default = "defaults::pinning_api_url")]
    pub pinning_api_url: String,

    /// Bearer token for the pinning API. Required in live mode.
    #[serde(default = "defaults::pinning_token")]
    pub pinning_token: Option<String>,

    /// HTTP gateway prefix used to resolve `ipfs://` URIs.
    #[serde(default = "defaults::ipfs_gateway")]
    pub ipfs_gateway: String,

    #[serde(default = "defaults::ethereum_rpc_url")]
    pub ethereum_rpc_url: String,

    #[serde(default = "defaults::polygon_rpc_url")]
    pub polygon_rpc_url: String,

    /// Maximum accepted upload size in bytes.
    #[serde(default = "defaults::max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Config {
    /// Reject configurations that cannot work at runtime.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.mode == LaunchMode::Live && self.pinning_token.is_none() {
            return Err(crate::Error::Config(
                "live mode requires a pinning token (MINILAUNCH_PINNING_TOKEN or PINATA_JWT)"
                    .to_string(),
            ));
        }
        if self.max_upload_bytes == 0 {
            return Err(crate::Error::Config(
                "max_upload_bytes must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind_address: defaults::bind_address(),
            mode: defaults::mode(),
            pinning_api_url: defaults::pinning_api_url(),
            pinning_token: defaults::pinning_token(),
            ipfs_gateway: defaults::ipfs_gateway(),
            ethereum_rpc_url: defaults::ethereum_rpc_url(),
            polygon_rpc_url: defaults::polygon_rpc_url(),
            max_upload_bytes: defaults::max_upload_bytes(),
        }
    }
}

mod defaults {
    use super::LaunchMode;

    pub fn bind_address() -> String {
        "0.0.0.0:3050".into()
    }

    pub fn mode() -> LaunchMode {
        LaunchMode::Simulated
    }

    pub fn pinning_api_url() -> String {
        "https://api.pinata.cloud".into()
    }

    /// Falls back to the conventional PINATA_JWT env var so existing
    /// deployments keep working without a config file.
    pub fn pinning_token() -> Option<String> {
        std::env::var("PINATA_JWT").ok().filter(|t| !t.is_empty())
    }

    pub fn ipfs_gateway() -> String {
        "https://ipfs.io/ipfs/".into()
    }

    pub fn ethereum_rpc_url() -> String {
        std::env::var("ETHEREUM_RPC_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "https://eth-mainnet.g.alchemy.com/v2/demo".into())
    }

    pub fn polygon_rpc_url() -> String {
        std::env::var("POLYGON_RPC_URL")
            .ok()
            .filter(|u| !u.is_empty())
            .unwrap_or_else(|| "https://polygon-mainnet.g.alchemy.com/v2/demo".into())
    }

    pub fn max_upload_bytes() -> usize {
        10 * 1024 * 1024
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_simulated() {
        let config = Config::default();
        assert_eq!(config.mode, LaunchMode::Simulated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_live_mode_requires_token() {
        let config = Config {
            mode: LaunchMode::Live,
            pinning_token: None,
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_live_mode_with_token_is_valid() {
        let config = Config {
            mode: LaunchMode::Live,
            pinning_token: Some("jwt".into()),
            ..Config::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_mode_deserializes_lowercase() {
        let mode: LaunchMode = serde_json::from_str("\"live\"").unwrap();
        assert_eq!(mode, LaunchMode::Live);
    }
}
