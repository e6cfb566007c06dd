//! Wallet identity: a secp256k1 key held in memory for the current session.
//!
//! The identity exists only between unlock (or creation) and lock. It is
//! never serialized and never persisted in plaintext; the at-rest form is the
//! encrypted vault blob produced by [`crate::wallet::vault`].

use alloy::primitives::{Address, B256};
use alloy::signers::local::PrivateKeySigner;
use alloy::signers::{Signature, SignerSync};
use thiserror::Error;
use zeroize::Zeroize;

/// Errors that can occur during identity operations.
#[derive(Debug, Error)]
pub enum IdentityError {
    #[error("entropy source failed: {0}")]
    Entropy(String),

    #[error("invalid private key")]
    InvalidPrivateKey,

    #[error("signing failed: {0}")]
    Signing(String),
}

/// A wallet identity: the private key and its derived address.
///
/// # Security Note
///
/// The underlying `PrivateKeySigner` does not implement `Zeroize`, so the key
/// material may remain in memory after this struct is dropped. Raw key
/// buffers handled by this module are zeroized as soon as the signer has been
/// constructed from them. Keep identities short-lived and drop them when the
/// session locks.
pub struct WalletIdentity {
    signer: PrivateKeySigner,
    address: Address,
}

impl Clone for WalletIdentity {
    fn clone(&self) -> Self {
        Self {
            signer: self.signer.clone(),
            address: self.address,
        }
    }
}

impl std::fmt::Debug for WalletIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Never expose key material in debug output
        f.debug_struct("WalletIdentity")
            .field("address", &self.address)
            .field("signer", &"[REDACTED]")
            .finish()
    }
}

impl WalletIdentity {
    fn from_signer(signer: PrivateKeySigner) -> Self {
        let address = signer.address();
        Self { signer, address }
    }

    /// Generate a fresh identity from OS entropy.
    ///
    /// Fails with [`IdentityError::Entropy`] when the host cannot produce
    /// random bytes. This is fatal and never expected under normal host
    /// conditions.
    pub fn generate() -> Result<Self, IdentityError> {
        use rand::rngs::OsRng;
        use rand::TryRngCore;

        let mut seed = [0u8; 32];
        OsRng
            .try_fill_bytes(&mut seed)
            .map_err(|e| IdentityError::Entropy(e.to_string()))?;

        let result = PrivateKeySigner::from_slice(&seed);
        seed.zeroize();

        // A uniformly random 32-byte value is outside the curve order with
        // probability ~2^-128; treat it as an entropy failure.
        let signer = result.map_err(|e| IdentityError::Entropy(e.to_string()))?;
        Ok(Self::from_signer(signer))
    }

    /// Restore an identity from raw private key bytes (32 bytes).
    ///
    /// Used when decrypting a vault; any malformed input maps to
    /// [`IdentityError::InvalidPrivateKey`] without detail, since the caller
    /// cannot distinguish a wrong password from corrupted ciphertext anyway.
    pub fn from_private_key(bytes: &[u8]) -> Result<Self, IdentityError> {
        let signer =
            PrivateKeySigner::from_slice(bytes).map_err(|_| IdentityError::InvalidPrivateKey)?;
        Ok(Self::from_signer(signer))
    }

    /// The wallet's address (safe to share).
    pub fn address(&self) -> Address {
        self.address
    }

    /// The raw 32-byte private key.
    ///
    /// WARNING: This exposes the private key. Only the vault encryption path
    /// should call this, and it must zeroize the buffer after use.
    pub fn private_key_bytes(&self) -> B256 {
        self.signer.to_bytes()
    }

    /// Sign an arbitrary message (EIP-191 personal message format).
    pub fn sign_message(&self, message: &[u8]) -> Result<Signature, IdentityError> {
        self.signer
            .sign_message_sync(message)
            .map_err(|e| IdentityError::Signing(e.to_string()))
    }

    /// Verify a message signature against an expected signer address.
    ///
    /// Pure and stateless: recovers the signer from the signature and
    /// compares canonical 20-byte addresses, which makes the comparison
    /// independent of hex-string casing.
    pub fn verify_message(message: &[u8], signature: &Signature, address: Address) -> bool {
        signature
            .recover_address_from_msg(message)
            .map(|recovered| recovered == address)
            .unwrap_or(false)
    }
}
