//! # ethwallet-rs
//!
//! A Rust SDK for building Ethereum wallet applications: locally-encrypted
//! key storage, a two-step transaction staging flow, and trait seams for the
//! blockchain connectivity layer.
//!
//! The SDK owns two things:
//!
//! - **[`wallet::WalletVault`]**: password-gated encryption-at-rest for a
//!   wallet's private key (Argon2id + NaCl secretbox), persisted through a
//!   pluggable key-value store.
//! - **[`stager::TransactionStager`]**: the prepare/confirm/cancel state
//!   machine for sending value, with slow/medium/fast gas price tiers
//!   derived from a fresh base estimate.
//!
//! Chain interaction (gas quotes, broadcast, balances, ENS, tokens) is
//! consumed through the [`provider`] traits and supplied by the embedding
//! application.

pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod provider;
pub mod session;
pub mod stager;
pub mod storage;
pub mod wallet;

pub use config::{Config, LoggingConfig as ConfigLoggingConfig, NetworkConfig, StorageConfig};

// Re-export logging module
pub use logging::{init_default_logging, init_logging, is_initialized, LogFormat, LoggingConfig};

// Re-export wallet module for key management
pub use wallet::{EncryptedVault, IdentityError, VaultError, WalletIdentity, WalletVault};

// Re-export transaction staging
pub use stager::{
    parse_eth_amount, GasPriceTier, GasTiers, PreparedTransaction, StagerError, TransactionStager,
};

// Re-export storage backends
pub use storage::{default_store_path, FileStore, KeyValueStore, MemoryStore, StoreError};

// Re-export collaborator interfaces and chain data types
pub use provider::{
    Broadcaster, ChainReader, GasEstimator, NftCollection, NftToken, ProviderError,
    SubmissionHandle, TokenDetails, TokenReader, TransactionReceipt, TransactionRecord,
    TransferRequest,
};

// Re-export session layer
pub use session::{SessionError, WalletSession, WalletSnapshot};

// Re-export unified error type and result alias
pub use errors::{EthWalletError, EthWalletResult};
