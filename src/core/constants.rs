//! Core constants for the Ethereum wallet SDK

/// Wei per ETH conversion factor (1 ETH = 10^18 wei)
pub const WEI_PER_ETH: u128 = 1_000_000_000_000_000_000;

/// Compile-time assertion that WEI_PER_ETH is exactly 1e18
/// This prevents accidental modification of this critical constant
#[allow(dead_code)]
const _: () = assert!(WEI_PER_ETH == 10u128.pow(18), "WEI_PER_ETH must equal 10^18");

/// Storage key under which the encrypted vault blob is persisted.
/// Exactly one vault exists per storage scope; re-creation overwrites it.
pub const VAULT_STORAGE_KEY: &str = "encrypted_wallet";

/// Current vault blob format version
pub const VAULT_VERSION: u32 = 1;

/// Maximum entries returned by a recent-transactions query
pub const RECENT_TX_LIMIT: usize = 10;

/// Gas price tier percentages (integer arithmetic, truncating)
pub const GAS_TIER_SLOW_PERCENT: u64 = 80;
pub const GAS_TIER_FAST_PERCENT: u64 = 120;

/// Network names
pub const NETWORK_MAINNET: &str = "mainnet";
pub const NETWORK_SEPOLIA: &str = "sepolia";
pub const NETWORK_LOCAL: &str = "local";

/// Default network
pub const DEFAULT_NETWORK: &str = NETWORK_MAINNET;

/// Network endpoints
pub const MAINNET_ENDPOINT: &str = "https://eth.llamarpc.com";
pub const SEPOLIA_ENDPOINT: &str = "https://rpc.sepolia.org";
pub const LOCAL_ENDPOINT: &str = "http://127.0.0.1:8545";

/// Default endpoint
pub const DEFAULT_ENDPOINT: &str = MAINNET_ENDPOINT;
