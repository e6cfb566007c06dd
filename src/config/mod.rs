//! Configuration for the wallet SDK.
//!
//! Groups network selection, storage location, and logging options into a
//! single serde-friendly structure with builder-style setters.

use crate::core::constants;
use serde::{Deserialize, Serialize};

/// Default network configuration
pub const DEFAULT_NETWORK: &str = constants::DEFAULT_NETWORK;
pub const DEFAULT_CHAIN_ENDPOINT: &str = constants::DEFAULT_ENDPOINT;

/// Network endpoints mapping
pub fn get_network_endpoint(network: &str) -> &'static str {
    match network {
        constants::NETWORK_MAINNET => constants::MAINNET_ENDPOINT,
        constants::NETWORK_SEPOLIA | "testnet" => constants::SEPOLIA_ENDPOINT,
        constants::NETWORK_LOCAL => constants::LOCAL_ENDPOINT,
        _ => DEFAULT_CHAIN_ENDPOINT,
    }
}

/// Network configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    pub network: String,
    pub chain_endpoint: String,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            network: DEFAULT_NETWORK.to_string(),
            chain_endpoint: DEFAULT_CHAIN_ENDPOINT.to_string(),
        }
    }
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory for the file-backed store. The default is already resolved
    /// against the home directory; no shell-style expansion happens later.
    pub storage_dir: String,
    /// Storage key under which the encrypted vault is kept
    pub vault_key: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            storage_dir: crate::storage::default_store_path()
                .to_string_lossy()
                .into_owned(),
            vault_key: constants::VAULT_STORAGE_KEY.to_string(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    pub debug: bool,
    pub trace: bool,
}

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    pub network: NetworkConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl Config {
    /// Create new config with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Create config for a specific network
    pub fn for_network(network: &str) -> Self {
        Self {
            network: NetworkConfig {
                network: network.to_string(),
                chain_endpoint: get_network_endpoint(network).to_string(),
            },
            ..Default::default()
        }
    }

    /// Set network (endpoint resolves from the known-network table)
    pub fn with_network(mut self, network: &str) -> Self {
        self.network.network = network.to_string();
        self.network.chain_endpoint = get_network_endpoint(network).to_string();
        self
    }

    /// Set chain endpoint directly
    pub fn with_chain_endpoint(mut self, endpoint: &str) -> Self {
        self.network.chain_endpoint = endpoint.to_string();
        self
    }

    /// Set the storage directory
    pub fn with_storage_dir(mut self, dir: impl Into<String>) -> Self {
        self.storage.storage_dir = dir.into();
        self
    }

    /// Enable debug logging
    pub fn with_debug(mut self, debug: bool) -> Self {
        self.logging.debug = debug;
        self
    }
}
