//! Collaborator interfaces to the blockchain connectivity layer.
//!
//! This crate owns no RPC plumbing. Everything that touches the chain
//! (gas estimation, broadcast, confirmation, balance/ENS/history/token
//! lookups) is consumed through the traits below, implemented by an
//! injected provider (or by in-memory doubles in tests).
//!
//! All traits are object-safe so callers can hold `Arc<dyn …>` collaborators.

use alloy::primitives::{Address, B256, U256};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported by provider collaborators.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("gas estimation failed: {0}")]
    Estimation(String),

    #[error("broadcast rejected: {0}")]
    Broadcast(String),

    #[error("confirmation failed: {0}")]
    Confirmation(String),

    #[error("chain query failed: {0}")]
    Query(String),
}

/// A value transfer ready for signing and broadcast.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TransferRequest {
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
    /// Gas price in wei, already resolved to the user's chosen tier.
    pub gas_price: U256,
}

/// Opaque reference returned when a broadcast is accepted.
///
/// Holds the transaction hash; used to later await on-chain confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmissionHandle(pub B256);

impl SubmissionHandle {
    pub fn tx_hash(&self) -> B256 {
        self.0
    }
}

/// Receipt for a transaction that has been included on chain.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionReceipt {
    pub tx_hash: B256,
    pub block_number: u64,
    pub gas_used: u64,
}

/// A historical transaction involving the wallet address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub hash: B256,
    pub from: Address,
    pub to: Option<Address>,
    /// Amount in wei.
    pub value: U256,
    pub block_number: u64,
    pub timestamp: DateTime<Utc>,
}

/// ERC-20 token metadata plus the holder's balance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenDetails {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub decimals: u8,
    /// Balance formatted in the token's own decimals.
    pub balance: String,
}

/// A single NFT owned by the wallet address.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftToken {
    pub token_id: U256,
    pub token_uri: String,
}

/// An ERC-721 collection and the holder's tokens within it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NftCollection {
    pub address: Address,
    pub name: String,
    pub symbol: String,
    pub tokens: Vec<NftToken>,
}

/// Quotes a base gas price for a transfer.
///
/// The quote is congestion-dependent and must be taken at the moment of user
/// intent; the stager derives the slow/medium/fast tiers from it.
#[async_trait]
pub trait GasEstimator: Send + Sync {
    /// Base gas price in wei for a transfer of `value` to `to`.
    async fn estimate_gas_price(&self, to: Address, value: U256) -> Result<U256, ProviderError>;
}

/// Signs and submits transfers, then tracks them to confirmation.
///
/// The implementation holds the signing capability; this crate never sees
/// the key used for transaction signing at this seam.
#[async_trait]
pub trait Broadcaster: Send + Sync {
    /// Sign and broadcast the transfer. Returns as soon as the node accepts
    /// the submission. Once accepted, the submission is irrevocable.
    async fn send(&self, request: TransferRequest) -> Result<SubmissionHandle, ProviderError>;

    /// Suspend until the submitted transaction is included on chain.
    async fn await_confirmation(
        &self,
        handle: SubmissionHandle,
    ) -> Result<TransactionReceipt, ProviderError>;
}

/// Read-only chain lookups consumed by the dashboard surface.
#[async_trait]
pub trait ChainReader: Send + Sync {
    /// Native balance in wei.
    async fn balance(&self, address: Address) -> Result<U256, ProviderError>;

    /// Reverse ENS lookup; `None` when no name is registered.
    async fn lookup_ens(&self, address: Address) -> Result<Option<String>, ProviderError>;

    /// Transactions involving `address` from the most recent blocks,
    /// newest first, at most `limit` entries.
    async fn recent_transactions(
        &self,
        address: Address,
        limit: usize,
    ) -> Result<Vec<TransactionRecord>, ProviderError>;
}

/// Read-only token and NFT metadata lookups.
#[async_trait]
pub trait TokenReader: Send + Sync {
    async fn token_details(
        &self,
        token: Address,
        holder: Address,
    ) -> Result<TokenDetails, ProviderError>;

    async fn nft_collection(
        &self,
        token: Address,
        holder: Address,
    ) -> Result<NftCollection, ProviderError>;
}
