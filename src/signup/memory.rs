//! In-process signup store

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

use super::store::{count_key, meta_key, signups_key, SignupMetadata, SignupStore, StoreError};

#[derive(Debug, Default)]
struct Data {
    lists: HashMap<String, Vec<String>>,
    counters: HashMap<String, i64>,
    hashes: HashMap<String, HashMap<String, String>>,
}

/// Keeps lists, counters and hashes in memory under the same keys the
/// hosted store uses
#[derive(Debug, Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Contents of a list key
    pub fn list(&self, key: &str) -> Vec<String> {
        self.lock().lists.get(key).cloned().unwrap_or_default()
    }

    /// Value of a counter key, zero when unset
    pub fn counter(&self, key: &str) -> i64 {
        self.lock().counters.get(key).copied().unwrap_or(0)
    }

    /// Fields of a hash key
    pub fn hash(&self, key: &str) -> HashMap<String, String> {
        self.lock().hashes.get(key).cloned().unwrap_or_default()
    }

    /// Number of keys of any kind
    pub fn key_count(&self) -> usize {
        let data = self.lock();
        data.lists.len() + data.counters.len() + data.hashes.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Data> {
        // A panic mid-update leaves plain collections behind, still usable
        self.data.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[async_trait]
impl SignupStore for MemoryStore {
    async fn list_emails(&self, site: &str) -> Result<Vec<String>, StoreError> {
        Ok(self.list(&signups_key(site)))
    }

    async fn append_email(&self, site: &str, email: &str) -> Result<(), StoreError> {
        self.lock()
            .lists
            .entry(signups_key(site))
            .or_default()
            .push(email.to_string());
        Ok(())
    }

    async fn increment_count(&self, site: &str) -> Result<i64, StoreError> {
        let mut data = self.lock();
        let counter = data.counters.entry(count_key(site)).or_insert(0);
        *counter += 1;
        Ok(*counter)
    }

    async fn write_metadata(&self, email: &str, meta: &SignupMetadata) -> Result<(), StoreError> {
        let mut data = self.lock();
        let hash = data.hashes.entry(meta_key(email)).or_default();
        for (field, value) in meta.fields() {
            hash.insert(field.to_string(), value);
        }
        Ok(())
    }
}
