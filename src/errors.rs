//! Unified error type for the wallet SDK.
//!
//! Each module defines its own `thiserror` enum close to the code that
//! raises it; this module folds them into one [`EthWalletError`] so
//! application boundaries (the UI toast layer, typically) can handle a
//! single type. Every variant is recoverable by a fresh user action except
//! [`crate::wallet::VaultError::KeyGeneration`], which is fatal. No error is
//! retried automatically anywhere in the SDK.

use thiserror::Error;

pub use crate::provider::ProviderError;
pub use crate::session::SessionError;
pub use crate::stager::StagerError;
pub use crate::storage::StoreError;
pub use crate::wallet::{IdentityError, VaultError};

/// Unified error type covering all SDK operations.
#[derive(Debug, Error)]
pub enum EthWalletError {
    #[error(transparent)]
    Vault(#[from] VaultError),

    #[error(transparent)]
    Stager(#[from] StagerError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Session(#[from] SessionError),
}

/// Result alias using the unified error type.
pub type EthWalletResult<T> = Result<T, EthWalletError>;
