//! Wallet management: identities in memory, encrypted vaults at rest.
//!
//! - **Identity**: a secp256k1 key plus its address, alive only for the
//!   current session ([`identity`])
//! - **Vault**: the password-gated, Argon2id + NaCl-secretbox encrypted
//!   at-rest form of the private key, persisted through a key-value store
//!   ([`vault`])
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use ethwallet_rs::storage::MemoryStore;
//! use ethwallet_rs::wallet::WalletVault;
//!
//! let vault = WalletVault::new(Arc::new(MemoryStore::new()));
//!
//! // Create, encrypt, persist
//! let identity = vault.create_wallet().unwrap();
//! let blob = vault.encrypt(&identity, "password").unwrap();
//! vault.persist(&blob).unwrap();
//!
//! // Later: load and unlock with the password
//! let blob = vault.load().unwrap().expect("no vault persisted");
//! let unlocked = vault.decrypt(&blob, "password").unwrap();
//! assert_eq!(unlocked.address(), identity.address());
//! ```
//!
//! ## Security Notes
//!
//! - Vaults use Argon2id for key derivation (memory-hard, resistant to GPU
//!   attacks) and XSalsa20-Poly1305 (NaCl secretbox) for encryption.
//! - Derived keys and raw private-key buffers are zeroed from memory with
//!   the `zeroize` crate as soon as they have been consumed.
//! - The vault caches no plaintext: unlocking always requires the password.

pub mod identity;
pub mod vault;

pub use identity::{IdentityError, WalletIdentity};
pub use vault::{EncryptedVault, VaultError, WalletVault};
