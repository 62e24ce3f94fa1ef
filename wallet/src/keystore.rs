//! Delegated key storage keyed by identity subject.
//!
//! The delegated key is derived deterministically from the identity-provider
//! subject id and cached so repeat logins reuse the same address. The store is
//! an explicit interface injected into the signing flow rather than ambient
//! global state; backends are a JSON file (desktop) and an in-memory map
//! (tests, short-lived sessions).
//!
//! Lifecycle: created on first login for a subject, reused on later logins,
//! replaced when the subject changes, and discarded when the stored record no
//! longer derives its own recorded address (corruption or tampering).

use crate::error::WalletError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tanda_crypto::{derive_address, keypair_for_subject, keypair_from_private};
use tanda_types::{Address, KeyPair, PrivateKey, Timestamp};
use tracing::{debug, warn};

/// A cached delegated key record.
///
/// Secret and public key are base64-encoded; `address` is recorded alongside
/// so corruption is detectable without re-deriving on every read.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredKey {
    pub secret_key: String,
    pub public_key: String,
    pub address: Address,
    pub created_at: u64,
    pub subject: String,
}

impl StoredKey {
    pub fn from_keypair(keypair: &KeyPair, subject: &str, now: Timestamp) -> Self {
        Self {
            secret_key: keypair.private.to_base64(),
            public_key: keypair.public.to_base64(),
            address: derive_address(&keypair.public),
            created_at: now.as_millis(),
            subject: subject.to_string(),
        }
    }
}

/// Key storage interface, one record per identity subject.
///
/// Reads and writes are synchronous; there is no cross-process coordination.
/// Two concurrent writers race with last-write-wins semantics.
pub trait KeyStore {
    fn get(&self, subject: &str) -> Result<Option<StoredKey>, WalletError>;
    fn put(&self, subject: &str, key: StoredKey) -> Result<(), WalletError>;
    fn clear(&self, subject: &str) -> Result<(), WalletError>;
}

/// In-memory key store.
#[derive(Default)]
pub struct MemoryKeyStore {
    inner: Mutex<HashMap<String, StoredKey>>,
}

impl MemoryKeyStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn locked(&self) -> Result<std::sync::MutexGuard<'_, HashMap<String, StoredKey>>, WalletError> {
        self.inner
            .lock()
            .map_err(|_| WalletError::Key("key store lock poisoned".to_string()))
    }
}

impl KeyStore for MemoryKeyStore {
    fn get(&self, subject: &str) -> Result<Option<StoredKey>, WalletError> {
        Ok(self.locked()?.get(subject).cloned())
    }

    fn put(&self, subject: &str, key: StoredKey) -> Result<(), WalletError> {
        self.locked()?.insert(subject.to_string(), key);
        Ok(())
    }

    fn clear(&self, subject: &str) -> Result<(), WalletError> {
        self.locked()?.remove(subject);
        Ok(())
    }
}

/// File-backed key store: a single JSON file mapping subject to record.
pub struct FileKeyStore {
    path: PathBuf,
}

impl FileKeyStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_map(&self) -> Result<HashMap<String, StoredKey>, WalletError> {
        if !self.path.exists() {
            return Ok(HashMap::new());
        }
        let json = std::fs::read_to_string(&self.path)
            .map_err(|e| WalletError::Key(format!("failed to read key store file: {e}")))?;
        serde_json::from_str(&json)
            .map_err(|e| WalletError::Key(format!("invalid key store JSON: {e}")))
    }

    fn write_map(&self, map: &HashMap<String, StoredKey>) -> Result<(), WalletError> {
        let json = serde_json::to_string_pretty(map)
            .map_err(|e| WalletError::Key(format!("key store serialization failed: {e}")))?;
        std::fs::write(&self.path, json)
            .map_err(|e| WalletError::Key(format!("failed to write key store file: {e}")))
    }
}

impl KeyStore for FileKeyStore {
    fn get(&self, subject: &str) -> Result<Option<StoredKey>, WalletError> {
        Ok(self.read_map()?.get(subject).cloned())
    }

    fn put(&self, subject: &str, key: StoredKey) -> Result<(), WalletError> {
        let mut map = self.read_map()?;
        map.insert(subject.to_string(), key);
        self.write_map(&map)
    }

    fn clear(&self, subject: &str) -> Result<(), WalletError> {
        let mut map = self.read_map()?;
        if map.remove(subject).is_some() {
            self.write_map(&map)?;
        }
        Ok(())
    }
}

/// Load the signing key cached for `subject`, verifying integrity.
///
/// A record whose secret fails to decode, or whose derived address differs
/// from its recorded address, is treated as absent: the record is cleared and
/// `Ok(None)` is returned so the caller re-authenticates.
pub fn load_signing_key<K: KeyStore>(
    store: &K,
    subject: &str,
) -> Result<Option<KeyPair>, WalletError> {
    let Some(record) = store.get(subject)? else {
        return Ok(None);
    };

    let Some(private) = PrivateKey::from_base64(&record.secret_key) else {
        warn!(subject, "cached key record is corrupt; clearing");
        store.clear(subject)?;
        return Ok(None);
    };

    let keypair = keypair_from_private(private);
    let derived = derive_address(&keypair.public);
    if derived != record.address {
        warn!(
            subject,
            stored = %record.address,
            derived = %derived,
            "cached key does not derive its recorded address; clearing"
        );
        store.clear(subject)?;
        return Ok(None);
    }

    Ok(Some(keypair))
}

/// Get the delegated key for `subject`, deriving and caching a fresh one if
/// no valid record exists. The derivation is deterministic, so a re-login
/// after a cleared record lands on the same address.
pub fn get_or_create_key<K: KeyStore>(store: &K, subject: &str) -> Result<KeyPair, WalletError> {
    if let Some(keypair) = load_signing_key(store, subject)? {
        debug!(subject, "loaded cached delegated key");
        return Ok(keypair);
    }

    let keypair = keypair_for_subject(subject);
    store.put(
        subject,
        StoredKey::from_keypair(&keypair, subject, Timestamp::now()),
    )?;
    debug!(subject, address = %derive_address(&keypair.public), "derived new delegated key");
    Ok(keypair)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tanda_crypto::generate_keypair;

    #[test]
    fn memory_store_roundtrip() {
        let store = MemoryKeyStore::new();
        let kp = generate_keypair();
        let record = StoredKey::from_keypair(&kp, "sub-1", Timestamp::new(1000));
        store.put("sub-1", record.clone()).unwrap();

        let loaded = store.get("sub-1").unwrap().unwrap();
        assert_eq!(loaded.address, record.address);
        assert_eq!(loaded.subject, "sub-1");

        store.clear("sub-1").unwrap();
        assert!(store.get("sub-1").unwrap().is_none());
    }

    #[test]
    fn get_or_create_is_stable_per_subject() {
        let store = MemoryKeyStore::new();
        let kp1 = get_or_create_key(&store, "alice").unwrap();
        let kp2 = get_or_create_key(&store, "alice").unwrap();
        assert_eq!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn different_subjects_get_different_keys() {
        let store = MemoryKeyStore::new();
        let kp1 = get_or_create_key(&store, "alice").unwrap();
        let kp2 = get_or_create_key(&store, "bob").unwrap();
        assert_ne!(kp1.public.0, kp2.public.0);
    }

    #[test]
    fn tampered_address_treated_as_absent() {
        let store = MemoryKeyStore::new();
        let kp = generate_keypair();
        let mut record = StoredKey::from_keypair(&kp, "alice", Timestamp::new(0));
        record.address = Address::new([0xBB; 32]);
        store.put("alice", record).unwrap();

        assert!(load_signing_key(&store, "alice").unwrap().is_none());
        // The bad record was cleared.
        assert!(store.get("alice").unwrap().is_none());
    }

    #[test]
    fn corrupt_secret_treated_as_absent() {
        let store = MemoryKeyStore::new();
        let kp = generate_keypair();
        let mut record = StoredKey::from_keypair(&kp, "alice", Timestamp::new(0));
        record.secret_key = "not-base64!!".to_string();
        store.put("alice", record).unwrap();

        assert!(load_signing_key(&store, "alice").unwrap().is_none());
        assert!(store.get("alice").unwrap().is_none());
    }

    #[test]
    fn file_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path().join("keys.json"));

        let kp = get_or_create_key(&store, "alice").unwrap();
        let reloaded = load_signing_key(&store, "alice").unwrap().unwrap();
        assert_eq!(kp.public.0, reloaded.public.0);
    }

    #[test]
    fn file_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyStore::new(dir.path().join("nonexistent.json"));
        assert!(store.get("anyone").unwrap().is_none());
    }

    #[test]
    fn file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("keys.json");

        let kp = get_or_create_key(&FileKeyStore::new(&path), "alice").unwrap();
        let again = get_or_create_key(&FileKeyStore::new(&path), "alice").unwrap();
        assert_eq!(kp.public.0, again.public.0);
    }

    #[test]
    fn stored_record_wire_names_are_camel_case() {
        let kp = generate_keypair();
        let record = StoredKey::from_keypair(&kp, "alice", Timestamp::new(42));
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains("\"secretKey\""));
        assert!(json.contains("\"publicKey\""));
        assert!(json.contains("\"createdAt\""));
    }
}
