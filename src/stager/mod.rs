//! Two-step transaction staging: prepare, then confirm or cancel.
//!
//! The stager separates "what to send" from "at what price". `prepare`
//! parses the recipient and amount, quotes a fresh base gas price, and holds
//! a single pending transaction with its three price tiers; `confirm`
//! resolves the chosen tier and hands the transfer to the broadcaster.
//!
//! State machine: `Idle -> Prepared -> (confirm -> Idle) | (cancel -> Idle)`.
//! At most one transaction is ever pending; preparing again replaces it
//! (last-prepare-wins). The pending slot is cleared the moment a confirm is
//! attempted, success or failure, so nothing half-sent ever lingers.

pub mod gas;

pub use gas::{GasPriceTier, GasTiers};

use crate::provider::{Broadcaster, GasEstimator, TransactionReceipt, TransferRequest};
use alloy::primitives::{
    utils::{parse_ether, UnitsError},
    Address, U256,
};
use std::sync::Arc;
use thiserror::Error;

/// Errors that can occur while staging or submitting a transaction.
#[derive(Debug, Error)]
pub enum StagerError {
    /// The amount string is not a non-negative decimal number.
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    /// The gas estimator could not produce a base estimate (this includes a
    /// malformed recipient address). The stager stays in its previous state.
    #[error("gas estimation failed: {0}")]
    Estimation(String),

    /// `confirm` was called with no prepared transaction. Guard against
    /// programmer error; unreachable through a well-behaved UI flow.
    #[error("no transaction prepared")]
    NotPrepared,

    /// The broadcaster rejected the submission. Nothing was sent; the user
    /// may retry from scratch.
    #[error("broadcast failed: {0}")]
    Broadcast(String),

    /// The submission was accepted but the confirmation wait failed. The
    /// transaction is irrevocably in flight; only its receipt is unknown.
    #[error("confirmation failed for {tx_hash}: {reason}")]
    Confirmation {
        tx_hash: alloy::primitives::B256,
        reason: String,
    },
}

/// A transaction awaiting user confirmation.
///
/// Exists only between `prepare` and `confirm`/`cancel`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreparedTransaction {
    pub to: Address,
    /// Amount in wei.
    pub value: U256,
    pub tiers: GasTiers,
}

/// Coordinates the prepare/confirm/cancel flow for sending value.
///
/// Collaborators do the actual work: the estimator quotes gas, the
/// broadcaster signs, submits, and tracks. This type only owns the staging
/// state and the tier arithmetic.
///
/// One stager serves one logical session; all calls suspend until their
/// collaborator completes. The pending slot is already Idle while a
/// confirmation is being awaited, so a caller that runs `confirm` as a
/// background task may begin a new `prepare` immediately after submission.
pub struct TransactionStager {
    estimator: Arc<dyn GasEstimator>,
    broadcaster: Arc<dyn Broadcaster>,
    pending: Option<PreparedTransaction>,
}

impl std::fmt::Debug for TransactionStager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransactionStager")
            .field("pending", &self.pending)
            .finish_non_exhaustive()
    }
}

impl TransactionStager {
    pub fn new(estimator: Arc<dyn GasEstimator>, broadcaster: Arc<dyn Broadcaster>) -> Self {
        Self {
            estimator,
            broadcaster,
            pending: None,
        }
    }

    /// Whether a transaction is currently prepared.
    pub fn is_prepared(&self) -> bool {
        self.pending.is_some()
    }

    /// The currently prepared transaction, if any.
    pub fn pending(&self) -> Option<&PreparedTransaction> {
        self.pending.as_ref()
    }

    /// Stage a transfer of `amount` ETH (decimal string) to `to`.
    ///
    /// Parses the amount into wei, asks the estimator for a fresh base gas
    /// price, computes the three tiers, and stores the result as the pending
    /// transaction. A previously prepared transaction is replaced without
    /// ceremony. On any failure the staging state is left untouched.
    ///
    /// # Errors
    /// - [`StagerError::InvalidAmount`]: non-numeric or negative amount
    /// - [`StagerError::Estimation`]: malformed recipient, or the estimator
    ///   could not produce a quote
    pub async fn prepare(
        &mut self,
        to: &str,
        amount: &str,
    ) -> Result<PreparedTransaction, StagerError> {
        let to: Address = to
            .trim()
            .parse()
            .map_err(|e| StagerError::Estimation(format!("invalid recipient address: {}", e)))?;
        let value = parse_eth_amount(amount)?;

        let base = self
            .estimator
            .estimate_gas_price(to, value)
            .await
            .map_err(|e| StagerError::Estimation(e.to_string()))?;

        if self.pending.is_some() {
            tracing::debug!("replacing previously prepared transaction");
        }

        let prepared = PreparedTransaction {
            to,
            value,
            tiers: GasTiers::from_base(base),
        };
        self.pending = Some(prepared);
        tracing::debug!(to = %to, value = %value, base_gas_price = %base, "transaction prepared");
        Ok(prepared)
    }

    /// Discard the prepared transaction, if any. No-op when Idle.
    pub fn cancel(&mut self) {
        if self.pending.take().is_some() {
            tracing::debug!("prepared transaction discarded");
        }
    }

    /// Submit the prepared transaction at the chosen tier and await its
    /// on-chain confirmation.
    ///
    /// The pending slot is cleared as soon as confirmation is attempted,
    /// success or failure. Once the broadcaster accepts the submission it is
    /// irrevocable; a later confirmation failure means only that the receipt
    /// is unknown, not that the transfer was undone.
    ///
    /// # Errors
    /// - [`StagerError::NotPrepared`]: no transaction is staged
    /// - [`StagerError::Broadcast`]: the submission was rejected outright
    /// - [`StagerError::Confirmation`]: accepted, but the wait failed
    pub async fn confirm(
        &mut self,
        tier: GasPriceTier,
    ) -> Result<TransactionReceipt, StagerError> {
        let prepared = self.pending.take().ok_or(StagerError::NotPrepared)?;

        let request = TransferRequest {
            to: prepared.to,
            value: prepared.value,
            gas_price: prepared.tiers.price(tier),
        };

        let handle = self
            .broadcaster
            .send(request)
            .await
            .map_err(|e| StagerError::Broadcast(e.to_string()))?;
        tracing::info!(tx_hash = %handle.tx_hash(), tier = %tier, "transaction submitted");

        let receipt = self
            .broadcaster
            .await_confirmation(handle)
            .await
            .map_err(|e| StagerError::Confirmation {
                tx_hash: handle.tx_hash(),
                reason: e.to_string(),
            })?;
        tracing::info!(
            tx_hash = %receipt.tx_hash,
            block_number = receipt.block_number,
            "transaction confirmed"
        );
        Ok(receipt)
    }
}

/// Parse a decimal ETH amount string into wei.
///
/// Accepts only non-negative decimals (`"1"`, `"0.0001"`). Anything else
/// (signs, exponents, stray characters, more than 18 fractional digits) is
/// an [`StagerError::InvalidAmount`].
pub fn parse_eth_amount(amount: &str) -> Result<U256, StagerError> {
    let trimmed = amount.trim();

    // parse_ether would wrap a negative value into a huge unsigned number,
    // so syntax is checked here before delegating.
    let valid_syntax = !trimmed.is_empty()
        && trimmed.chars().any(|c| c.is_ascii_digit())
        && trimmed.chars().all(|c| c.is_ascii_digit() || c == '.')
        && trimmed.chars().filter(|&c| c == '.').count() <= 1;
    if !valid_syntax {
        return Err(StagerError::InvalidAmount(amount.to_string()));
    }

    parse_ether(trimmed).map_err(|e: UnitsError| {
        StagerError::InvalidAmount(format!("{}: {}", amount, e))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::constants::WEI_PER_ETH;

    #[test]
    fn test_parse_whole_eth() {
        assert_eq!(parse_eth_amount("1").unwrap(), U256::from(WEI_PER_ETH));
        assert_eq!(
            parse_eth_amount("2.5").unwrap(),
            U256::from(WEI_PER_ETH * 5 / 2)
        );
    }

    #[test]
    fn test_parse_fractional_eth() {
        // 0.0001 ETH = 10^14 wei
        assert_eq!(
            parse_eth_amount("0.0001").unwrap(),
            U256::from(100_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_zero() {
        assert_eq!(parse_eth_amount("0").unwrap(), U256::ZERO);
    }

    #[test]
    fn test_parse_trims_whitespace() {
        assert_eq!(parse_eth_amount(" 1 ").unwrap(), U256::from(WEI_PER_ETH));
    }

    #[test]
    fn test_parse_rejects_negative() {
        assert!(matches!(
            parse_eth_amount("-1"),
            Err(StagerError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_rejects_garbage() {
        for bad in ["abc", "", ".", "1.2.3", "1e18", "+1", "0x10"] {
            assert!(
                matches!(parse_eth_amount(bad), Err(StagerError::InvalidAmount(_))),
                "expected InvalidAmount for {:?}",
                bad
            );
        }
    }

    #[test]
    fn test_parse_rejects_sub_wei_precision() {
        // 19 fractional digits cannot be represented in wei
        assert!(matches!(
            parse_eth_amount("0.0000000000000000001"),
            Err(StagerError::InvalidAmount(_))
        ));
    }
}
