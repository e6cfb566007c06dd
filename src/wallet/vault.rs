//! Encryption-at-rest for wallet private keys.
//!
//! A wallet identity is turned into an opaque string blob gated by a user
//! password, and back. The blob is JSON with the following structure:
//!
//! ```json
//! {
//!     "crypto": {
//!         "cipher": "secretbox",
//!         "ciphertext": "<base64-encoded encrypted private key>",
//!         "cipherparams": {"nonce": "<base64-encoded 24-byte nonce>"},
//!         "kdf": "argon2id",
//!         "kdfparams": {
//!             "salt": "<base64-encoded 16-byte salt>",
//!             "n": 65536,
//!             "r": 1,
//!             "p": 4
//!         }
//!     },
//!     "version": 1
//! }
//! ```
//!
//! The password never touches the cipher directly: it is stretched through
//! Argon2id with a random per-vault salt before keying XSalsa20-Poly1305.
//! Wrong password and corrupted ciphertext are indistinguishable and both
//! surface as [`VaultError::InvalidPassword`].

use crate::core::constants::{VAULT_STORAGE_KEY, VAULT_VERSION};
use crate::storage::{KeyValueStore, StoreError};
use crate::wallet::identity::{IdentityError, WalletIdentity};
use argon2::{Argon2, Params, Version};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use crypto_secretbox::{
    aead::{Aead, KeyInit},
    XSalsa20Poly1305,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;
use zeroize::Zeroize;

/// Default Argon2id parameters
const ARGON2_TIME_COST: u32 = 1;
const ARGON2_MEMORY_COST: u32 = 65536; // 64 MiB
const ARGON2_PARALLELISM: u32 = 4;

/// Errors that can occur during vault operations.
#[derive(Debug, Error)]
pub enum VaultError {
    #[error("key generation failed: {0}")]
    KeyGeneration(String),

    #[error("decryption failed: wrong password or corrupted vault")]
    InvalidPassword,

    #[error("invalid vault format: {0}")]
    InvalidFormat(String),

    #[error("unsupported vault version: {0}")]
    UnsupportedVersion(u32),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("key derivation failed: {0}")]
    KeyDerivationFailed(String),

    #[error("signing failed: {0}")]
    Signing(String),

    #[error("storage error: {0}")]
    Store(#[from] StoreError),
}

/// The persisted ciphertext form of a wallet's private key.
///
/// Opaque to everything except [`WalletVault::decrypt`]; safe to log lengths
/// of, store, and copy around.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncryptedVault(String);

impl EncryptedVault {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl From<String> for EncryptedVault {
    fn from(blob: String) -> Self {
        Self(blob)
    }
}

impl std::fmt::Display for EncryptedVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// KDF parameters embedded in the vault blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct KdfParams {
    salt: String,
    #[serde(rename = "n")]
    memory_cost: u32,
    #[serde(rename = "r")]
    time_cost: u32,
    #[serde(rename = "p")]
    parallelism: u32,
}

/// Cipher parameters embedded in the vault blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CipherParams {
    nonce: String,
}

/// Crypto section of the vault blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct CryptoData {
    cipher: String,
    ciphertext: String,
    cipherparams: CipherParams,
    kdf: String,
    kdfparams: KdfParams,
}

/// The complete vault blob structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct VaultJson {
    crypto: CryptoData,
    version: u32,
}

/// Turns wallet identities into storage-safe ciphertext and back, gating
/// access by a user password.
///
/// The vault holds no decrypted state: every unlock requires the password
/// again, and the resulting [`WalletIdentity`] lives only with the caller
/// (typically the session object).
pub struct WalletVault {
    store: Arc<dyn KeyValueStore>,
}

impl std::fmt::Debug for WalletVault {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WalletVault").finish_non_exhaustive()
    }
}

impl WalletVault {
    /// Create a vault over the given key-value store.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Generate a fresh wallet identity.
    ///
    /// Entropy failure is fatal: it is surfaced to the caller and never
    /// retried here.
    pub fn create_wallet(&self) -> Result<WalletIdentity, VaultError> {
        let identity = WalletIdentity::generate().map_err(|e| match e {
            IdentityError::Entropy(msg) => VaultError::KeyGeneration(msg),
            other => VaultError::KeyGeneration(other.to_string()),
        })?;
        tracing::info!(address = %identity.address(), "generated new wallet identity");
        Ok(identity)
    }

    /// Encrypt an identity's private key under a password.
    ///
    /// No password length or complexity validation happens here; minimum
    /// length is enforced at the input boundary by the caller.
    pub fn encrypt(
        &self,
        identity: &WalletIdentity,
        password: &str,
    ) -> Result<EncryptedVault, VaultError> {
        let mut salt = [0u8; 16];
        let mut nonce = [0u8; 24];

        use rand::rngs::OsRng;
        use rand::TryRngCore;
        let mut rng = OsRng;
        rng.try_fill_bytes(&mut salt)
            .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;
        rng.try_fill_bytes(&mut nonce)
            .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;

        let mut key = derive_key(
            password,
            &salt,
            ARGON2_MEMORY_COST,
            ARGON2_TIME_COST,
            ARGON2_PARALLELISM,
        )?;

        let cipher = XSalsa20Poly1305::new_from_slice(&key)
            .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;

        let mut plaintext = identity.private_key_bytes().0;
        let encrypt_result = cipher.encrypt(nonce.as_ref().into(), plaintext.as_slice());
        plaintext.zeroize();
        key.zeroize();

        let ciphertext =
            encrypt_result.map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;

        let json = VaultJson {
            crypto: CryptoData {
                cipher: "secretbox".to_string(),
                ciphertext: BASE64.encode(&ciphertext),
                cipherparams: CipherParams {
                    nonce: BASE64.encode(nonce),
                },
                kdf: "argon2id".to_string(),
                kdfparams: KdfParams {
                    salt: BASE64.encode(salt),
                    memory_cost: ARGON2_MEMORY_COST,
                    time_cost: ARGON2_TIME_COST,
                    parallelism: ARGON2_PARALLELISM,
                },
            },
            version: VAULT_VERSION,
        };

        let blob = serde_json::to_string(&json)
            .map_err(|e| VaultError::EncryptionFailed(e.to_string()))?;
        Ok(EncryptedVault(blob))
    }

    /// Decrypt a vault blob back into a wallet identity.
    ///
    /// A wrong password and a corrupted ciphertext both yield
    /// [`VaultError::InvalidPassword`]; the two cases are deliberately
    /// indistinguishable. A blob that is not a well-formed vault container at
    /// all yields [`VaultError::InvalidFormat`].
    pub fn decrypt(
        &self,
        vault: &EncryptedVault,
        password: &str,
    ) -> Result<WalletIdentity, VaultError> {
        let json: VaultJson = serde_json::from_str(vault.as_str())
            .map_err(|e| VaultError::InvalidFormat(e.to_string()))?;

        if json.version > VAULT_VERSION {
            return Err(VaultError::UnsupportedVersion(json.version));
        }

        let ciphertext = BASE64
            .decode(&json.crypto.ciphertext)
            .map_err(|e| VaultError::InvalidFormat(e.to_string()))?;
        let nonce_bytes = BASE64
            .decode(&json.crypto.cipherparams.nonce)
            .map_err(|e| VaultError::InvalidFormat(e.to_string()))?;
        let salt_bytes = BASE64
            .decode(&json.crypto.kdfparams.salt)
            .map_err(|e| VaultError::InvalidFormat(e.to_string()))?;

        if nonce_bytes.len() != 24 {
            return Err(VaultError::InvalidFormat(format!(
                "invalid nonce length: expected 24, got {}",
                nonce_bytes.len()
            )));
        }
        if salt_bytes.len() != 16 {
            return Err(VaultError::InvalidFormat(format!(
                "invalid salt length: expected 16, got {}",
                salt_bytes.len()
            )));
        }

        let mut salt = [0u8; 16];
        salt.copy_from_slice(&salt_bytes);

        // Use the parameters the blob was written with, not the current
        // defaults; old vaults stay readable across parameter bumps.
        let kdf = &json.crypto.kdfparams;
        let mut key = derive_key(password, &salt, kdf.memory_cost, kdf.time_cost, kdf.parallelism)?;
        let cipher = XSalsa20Poly1305::new_from_slice(&key)
            .map_err(|e| VaultError::KeyDerivationFailed(e.to_string()))?;

        let decrypt_result = cipher.decrypt(nonce_bytes.as_slice().into(), ciphertext.as_ref());
        key.zeroize();

        let mut plaintext = decrypt_result.map_err(|_| VaultError::InvalidPassword)?;
        let identity_result = WalletIdentity::from_private_key(&plaintext);
        plaintext.zeroize();

        // A decrypted payload that is not a well-formed private key is
        // treated the same as a wrong password.
        identity_result.map_err(|_| VaultError::InvalidPassword)
    }

    /// Persist a vault blob under the well-known storage key.
    ///
    /// The slot is a singleton: an existing vault is overwritten, never
    /// merged. Last write wins.
    pub fn persist(&self, vault: &EncryptedVault) -> Result<(), VaultError> {
        self.store.set(VAULT_STORAGE_KEY, vault.as_str())?;
        tracing::debug!(bytes = vault.as_str().len(), "vault persisted");
        Ok(())
    }

    /// Load the persisted vault blob, if any.
    ///
    /// Returns `Ok(None)` when no vault has ever been persisted; absence is
    /// not an error. Callers must check for presence before attempting
    /// `decrypt`.
    pub fn load(&self) -> Result<Option<EncryptedVault>, VaultError> {
        Ok(self.store.get(VAULT_STORAGE_KEY)?.map(EncryptedVault))
    }

    /// Sign a message with the identity's key (EIP-191).
    pub fn sign(
        &self,
        identity: &WalletIdentity,
        message: &[u8],
    ) -> Result<alloy::signers::Signature, VaultError> {
        identity
            .sign_message(message)
            .map_err(|e| VaultError::Signing(e.to_string()))
    }

    /// Verify a message signature against an address. Pure and stateless.
    pub fn verify(
        message: &[u8],
        signature: &alloy::signers::Signature,
        address: alloy::primitives::Address,
    ) -> bool {
        WalletIdentity::verify_message(message, signature, address)
    }
}

/// Derive a 32-byte encryption key from a password using Argon2id.
///
/// Encryption passes the current default parameters; decryption passes the
/// parameters recorded in the blob being opened.
fn derive_key(
    password: &str,
    salt: &[u8; 16],
    memory_cost: u32,
    time_cost: u32,
    parallelism: u32,
) -> Result<[u8; 32], VaultError> {
    let params = Params::new(memory_cost, time_cost, parallelism, Some(32))
        .map_err(|e| VaultError::KeyDerivationFailed(e.to_string()))?;

    let argon2 = Argon2::new(argon2::Algorithm::Argon2id, Version::V0x13, params);

    let mut key = [0u8; 32];
    argon2
        .hash_password_into(password.as_bytes(), salt, &mut key)
        .map_err(|e| VaultError::KeyDerivationFailed(e.to_string()))?;

    Ok(key)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn vault() -> WalletVault {
        WalletVault::new(Arc::new(MemoryStore::new()))
    }

    #[test]
    fn test_encrypt_decrypt_roundtrip() {
        let vault = vault();
        let identity = vault.create_wallet().unwrap();

        let blob = vault.encrypt(&identity, "hunter2").unwrap();
        let restored = vault.decrypt(&blob, "hunter2").unwrap();

        assert_eq!(identity.address(), restored.address());
        assert_eq!(identity.private_key_bytes(), restored.private_key_bytes());
    }

    #[test]
    fn test_wrong_password() {
        let vault = vault();
        let identity = vault.create_wallet().unwrap();

        let blob = vault.encrypt(&identity, "correct_password").unwrap();
        let result = vault.decrypt(&blob, "wrong_password");

        assert!(matches!(result, Err(VaultError::InvalidPassword)));
    }

    #[test]
    fn test_corrupted_ciphertext() {
        let vault = vault();
        let identity = vault.create_wallet().unwrap();

        let blob = vault.encrypt(&identity, "pw").unwrap();
        let mut json: serde_json::Value = serde_json::from_str(blob.as_str()).unwrap();
        let tampered = BASE64.encode([0u8; 48]);
        json["crypto"]["ciphertext"] = serde_json::Value::String(tampered);

        let corrupted = EncryptedVault::from(json.to_string());
        assert!(matches!(
            vault.decrypt(&corrupted, "pw"),
            Err(VaultError::InvalidPassword)
        ));
    }

    #[test]
    fn test_malformed_blob() {
        let vault = vault();
        let blob = EncryptedVault::from("not json at all".to_string());
        assert!(matches!(
            vault.decrypt(&blob, "pw"),
            Err(VaultError::InvalidFormat(_))
        ));
    }

    #[test]
    fn test_unsupported_version() {
        let vault = vault();
        let identity = vault.create_wallet().unwrap();

        let blob = vault.encrypt(&identity, "pw").unwrap();
        let mut json: serde_json::Value = serde_json::from_str(blob.as_str()).unwrap();
        json["version"] = serde_json::Value::from(99);

        let future_blob = EncryptedVault::from(json.to_string());
        assert!(matches!(
            vault.decrypt(&future_blob, "pw"),
            Err(VaultError::UnsupportedVersion(99))
        ));
    }

    #[test]
    fn test_decrypt_honors_embedded_kdf_params() {
        // A blob written under older, weaker parameters must still open:
        // decryption derives the key from the blob's kdfparams, not the
        // current defaults.
        let vault = vault();
        let identity = vault.create_wallet().unwrap();

        let (memory_cost, time_cost, parallelism) = (8192u32, 2u32, 1u32);
        assert_ne!(
            (memory_cost, time_cost, parallelism),
            (ARGON2_MEMORY_COST, ARGON2_TIME_COST, ARGON2_PARALLELISM)
        );

        let salt = [7u8; 16];
        let nonce = [9u8; 24];
        let key = derive_key("pw", &salt, memory_cost, time_cost, parallelism).unwrap();
        let cipher = XSalsa20Poly1305::new_from_slice(&key).unwrap();
        let ciphertext = cipher
            .encrypt(nonce.as_ref().into(), identity.private_key_bytes().as_slice())
            .unwrap();

        let blob = serde_json::json!({
            "crypto": {
                "cipher": "secretbox",
                "ciphertext": BASE64.encode(&ciphertext),
                "cipherparams": { "nonce": BASE64.encode(nonce) },
                "kdf": "argon2id",
                "kdfparams": {
                    "salt": BASE64.encode(salt),
                    "n": memory_cost,
                    "r": time_cost,
                    "p": parallelism,
                },
            },
            "version": 1,
        });

        let restored = vault
            .decrypt(&EncryptedVault::from(blob.to_string()), "pw")
            .unwrap();
        assert_eq!(restored.address(), identity.address());

        // Wrong password still fails under foreign parameters
        assert!(matches!(
            vault.decrypt(&EncryptedVault::from(blob.to_string()), "nope"),
            Err(VaultError::InvalidPassword)
        ));
    }

    #[test]
    fn test_encrypt_is_salted() {
        // Same identity and password must not produce identical blobs
        let vault = vault();
        let identity = vault.create_wallet().unwrap();

        let a = vault.encrypt(&identity, "pw").unwrap();
        let b = vault.encrypt(&identity, "pw").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_persist_and_load() {
        let vault = vault();
        assert!(vault.load().unwrap().is_none());

        let identity = vault.create_wallet().unwrap();
        let blob = vault.encrypt(&identity, "pw").unwrap();
        vault.persist(&blob).unwrap();

        let loaded = vault.load().unwrap().unwrap();
        assert_eq!(loaded, blob);
    }

    #[test]
    fn test_persist_overwrites() {
        let vault = vault();
        let first = vault.create_wallet().unwrap();
        let second = vault.create_wallet().unwrap();

        vault.persist(&vault.encrypt(&first, "pw").unwrap()).unwrap();
        let second_blob = vault.encrypt(&second, "pw").unwrap();
        vault.persist(&second_blob).unwrap();

        let loaded = vault.load().unwrap().unwrap();
        let restored = vault.decrypt(&loaded, "pw").unwrap();
        assert_eq!(restored.address(), second.address());
    }

    #[test]
    fn test_sign_verify_via_vault() {
        let vault = vault();
        let identity = vault.create_wallet().unwrap();
        let message = b"login challenge";

        let signature = vault.sign(&identity, message).unwrap();
        assert!(WalletVault::verify(message, &signature, identity.address()));
        assert!(!WalletVault::verify(
            b"other message",
            &signature,
            identity.address()
        ));
    }
}
