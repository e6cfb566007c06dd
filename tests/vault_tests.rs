//! Integration tests for the wallet vault: the encryption-at-rest contract
//! and its persistence through the key-value store.

use ethwallet_rs::storage::{FileStore, KeyValueStore, MemoryStore};
use ethwallet_rs::wallet::{EncryptedVault, VaultError, WalletIdentity, WalletVault};
use std::sync::Arc;
use tempfile::tempdir;

fn memory_vault() -> WalletVault {
    WalletVault::new(Arc::new(MemoryStore::new()))
}

#[test]
fn round_trip_preserves_identity() {
    let vault = memory_vault();
    let identity = vault.create_wallet().unwrap();

    let blob = vault.encrypt(&identity, "correct horse battery staple").unwrap();
    let restored = vault.decrypt(&blob, "correct horse battery staple").unwrap();

    assert_eq!(restored.address(), identity.address());
    assert_eq!(restored.private_key_bytes(), identity.private_key_bytes());
}

#[test]
fn round_trip_with_awkward_passwords() {
    let vault = memory_vault();
    let identity = vault.create_wallet().unwrap();

    for password in ["", "a", "päss wörd 🔑", "\0\0\0", &"x".repeat(1024)] {
        let blob = vault.encrypt(&identity, password).unwrap();
        let restored = vault.decrypt(&blob, password).unwrap();
        assert_eq!(restored.address(), identity.address());
    }
}

#[test]
fn wrong_password_is_rejected() {
    let vault = memory_vault();
    let identity = vault.create_wallet().unwrap();

    let blob = vault.encrypt(&identity, "password-one").unwrap();
    assert!(matches!(
        vault.decrypt(&blob, "password-two"),
        Err(VaultError::InvalidPassword)
    ));
}

#[test]
fn corrupted_blob_and_wrong_password_are_indistinguishable() {
    let vault = memory_vault();
    let identity = vault.create_wallet().unwrap();
    let blob = vault.encrypt(&identity, "pw").unwrap();

    // Flip bytes inside the ciphertext while keeping the container valid
    let mut json: serde_json::Value = serde_json::from_str(blob.as_str()).unwrap();
    let ciphertext = json["crypto"]["ciphertext"].as_str().unwrap();
    let mut raw = {
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD.decode(ciphertext).unwrap()
    };
    raw[0] ^= 0xff;
    json["crypto"]["ciphertext"] = serde_json::Value::String({
        use base64::{engine::general_purpose::STANDARD, Engine};
        STANDARD.encode(&raw)
    });

    let corrupted = EncryptedVault::from(json.to_string());
    assert!(matches!(
        vault.decrypt(&corrupted, "pw"),
        Err(VaultError::InvalidPassword)
    ));
}

#[test]
fn load_on_empty_storage_is_absent_not_error() {
    let vault = memory_vault();
    assert!(vault.load().unwrap().is_none());
}

#[test]
fn persisted_vault_survives_reload() {
    let dir = tempdir().unwrap();
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());

    let address = {
        let vault = WalletVault::new(store.clone());
        let identity = vault.create_wallet().unwrap();
        let blob = vault.encrypt(&identity, "pw").unwrap();
        vault.persist(&blob).unwrap();
        identity.address()
    };

    // New vault over a new store handle: simulates app restart
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let vault = WalletVault::new(store);
    let blob = vault.load().unwrap().expect("vault should have persisted");
    let restored = vault.decrypt(&blob, "pw").unwrap();
    assert_eq!(restored.address(), address);
}

#[test]
fn recreating_wallet_overwrites_vault() {
    let vault = memory_vault();

    let first = vault.create_wallet().unwrap();
    vault.persist(&vault.encrypt(&first, "pw").unwrap()).unwrap();

    let second = vault.create_wallet().unwrap();
    vault.persist(&vault.encrypt(&second, "pw").unwrap()).unwrap();

    let loaded = vault.load().unwrap().unwrap();
    let restored = vault.decrypt(&loaded, "pw").unwrap();
    assert_eq!(restored.address(), second.address());
    assert_ne!(restored.address(), first.address());
}

#[test]
fn vault_blob_is_opaque_json_container() {
    let vault = memory_vault();
    let identity = vault.create_wallet().unwrap();
    let blob = vault.encrypt(&identity, "pw").unwrap();

    let json: serde_json::Value = serde_json::from_str(blob.as_str()).unwrap();
    assert_eq!(json["version"], 1);
    assert_eq!(json["crypto"]["cipher"], "secretbox");
    assert_eq!(json["crypto"]["kdf"], "argon2id");

    // The private key must never appear in the blob
    let key_hex = hex::encode(identity.private_key_bytes());
    assert!(!blob.as_str().contains(&key_hex));
}

#[test]
fn sign_and_verify_through_vault() {
    let vault = memory_vault();
    let identity = vault.create_wallet().unwrap();
    let message = b"prove you own this address";

    let signature = vault.sign(&identity, message).unwrap();
    assert!(WalletVault::verify(message, &signature, identity.address()));

    // A signature from a different wallet does not verify
    let other = vault.create_wallet().unwrap();
    let other_sig = vault.sign(&other, message).unwrap();
    assert!(!WalletVault::verify(message, &other_sig, identity.address()));
}

#[test]
fn decrypted_identity_can_sign() {
    // The full create, encrypt, decrypt, sign flow
    let vault = memory_vault();
    let identity = vault.create_wallet().unwrap();
    let blob = vault.encrypt(&identity, "pw").unwrap();

    let unlocked = vault.decrypt(&blob, "pw").unwrap();
    let message = b"signed after unlock";
    let signature = unlocked.sign_message(message).unwrap();
    assert!(WalletIdentity::verify_message(
        message,
        &signature,
        identity.address()
    ));
}
