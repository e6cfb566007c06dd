//! Wallet session: the explicit owner of the unlocked identity.
//!
//! Exactly one session exists per running application, owned by the
//! top-level controller and passed by reference into vault and stager calls.
//! There is no ambient global "current wallet"; locking the session drops
//! the identity and everything downstream loses signing capability at once.

use crate::errors::EthWalletError;
use crate::provider::{ChainReader, TokenDetails, TokenReader, TransactionReceipt, TransactionRecord};
use crate::stager::{GasPriceTier, TransactionStager};
use crate::wallet::{WalletIdentity, WalletVault};
use alloy::primitives::{Address, U256};
use serde::Serialize;
use thiserror::Error;

/// Errors that can occur at the session boundary.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation that needs the unlocked identity was attempted while
    /// the session is locked.
    #[error("wallet is locked")]
    Locked,

    /// `unlock` was called but no vault has ever been persisted.
    #[error("no wallet vault persisted; create a wallet first")]
    VaultAbsent,
}

/// Read-only dashboard view of the unlocked wallet.
///
/// Individual lookups that fail degrade to empty fields with a warning;
/// a partially populated snapshot beats no snapshot.
#[derive(Debug, Clone, Serialize)]
pub struct WalletSnapshot {
    pub address: Address,
    /// Native balance in wei.
    pub balance: U256,
    pub ens_name: Option<String>,
    pub transactions: Vec<TransactionRecord>,
    pub tokens: Vec<TokenDetails>,
}

/// The session holding the unlocked wallet identity, if any.
#[derive(Debug, Default)]
pub struct WalletSession {
    identity: Option<WalletIdentity>,
}

impl WalletSession {
    /// Create a locked session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether an identity is currently unlocked.
    pub fn is_unlocked(&self) -> bool {
        self.identity.is_some()
    }

    /// The unlocked identity, if any.
    pub fn identity(&self) -> Option<&WalletIdentity> {
        self.identity.as_ref()
    }

    /// The unlocked wallet's address.
    pub fn address(&self) -> Result<Address, SessionError> {
        self.identity
            .as_ref()
            .map(|id| id.address())
            .ok_or(SessionError::Locked)
    }

    /// Attach an already-unlocked identity, replacing any previous one.
    pub fn attach(&mut self, identity: WalletIdentity) {
        tracing::info!(address = %identity.address(), "session unlocked");
        self.identity = Some(identity);
    }

    /// Drop the identity. Signing capability is gone until the next unlock.
    pub fn lock(&mut self) {
        if self.identity.take().is_some() {
            tracing::info!("session locked");
        }
    }

    /// Create a brand-new wallet: generate, encrypt under `password`,
    /// persist (overwriting any previous vault), and unlock the session.
    ///
    /// Returns the new wallet's address.
    pub fn create(
        &mut self,
        vault: &WalletVault,
        password: &str,
    ) -> Result<Address, EthWalletError> {
        let identity = vault.create_wallet()?;
        let blob = vault.encrypt(&identity, password)?;
        vault.persist(&blob)?;
        let address = identity.address();
        self.attach(identity);
        Ok(address)
    }

    /// Unlock the session from the persisted vault.
    ///
    /// Fails with [`SessionError::VaultAbsent`] when nothing was ever
    /// persisted, and with [`crate::wallet::VaultError::InvalidPassword`]
    /// on a wrong password; the session stays locked in both cases.
    pub fn unlock(
        &mut self,
        vault: &WalletVault,
        password: &str,
    ) -> Result<Address, EthWalletError> {
        let blob = vault.load()?.ok_or(SessionError::VaultAbsent)?;
        let identity = vault.decrypt(&blob, password)?;
        let address = identity.address();
        self.attach(identity);
        Ok(address)
    }

    /// Fetch the dashboard view: balance, ENS name, recent transactions,
    /// and details for each watched token.
    ///
    /// Per-field failures are logged and degrade to empty values; only a
    /// locked session fails the whole call.
    pub async fn snapshot(
        &self,
        chain: &dyn ChainReader,
        tokens: &dyn TokenReader,
        watched_tokens: &[Address],
    ) -> Result<WalletSnapshot, SessionError> {
        let address = self.address()?;

        let (balance_res, ens_res) =
            futures::join!(chain.balance(address), chain.lookup_ens(address));

        let balance = balance_res.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "balance query failed");
            U256::ZERO
        });
        let ens_name = ens_res.unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ENS lookup failed");
            None
        });

        let transactions = chain
            .recent_transactions(address, crate::core::constants::RECENT_TX_LIMIT)
            .await
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "transaction history query failed");
                Vec::new()
            });

        let mut token_details = Vec::with_capacity(watched_tokens.len());
        for token in watched_tokens {
            match tokens.token_details(*token, address).await {
                Ok(details) => token_details.push(details),
                Err(e) => tracing::warn!(token = %token, error = %e, "token lookup failed"),
            }
        }

        Ok(WalletSnapshot {
            address,
            balance,
            ens_name,
            transactions,
            tokens: token_details,
        })
    }

    /// Confirm the stager's prepared transaction at the chosen tier.
    ///
    /// A prepared transaction may only be confirmed while an unlocked
    /// identity is present; otherwise this fails with
    /// [`SessionError::Locked`] and the prepared transaction stays staged.
    pub async fn confirm_transfer(
        &self,
        stager: &mut TransactionStager,
        tier: GasPriceTier,
    ) -> Result<TransactionReceipt, EthWalletError> {
        if !self.is_unlocked() {
            return Err(SessionError::Locked.into());
        }
        Ok(stager.confirm(tier).await?)
    }
}
