// Storage abstraction over the platform key-value store
//
// The app persists a handful of small JSON documents under fixed keys;
// the backend only needs get/put/remove. Sled backs the real thing,
// MemoryStorage backs tests and the in-memory context.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

/// Unified storage trait for the app's key-value persistence.
#[cfg_attr(test, mockall::automock)]
pub trait StorageBackend: Send + Sync {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), String>;
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String>;
    fn remove(&self, key: &str) -> Result<(), String>;
    fn flush(&self) -> Result<(), String>;
}

/// In-memory storage useful for testing and the simulated harness
#[derive(Clone, Default)]
pub struct MemoryStorage {
    data: Arc<RwLock<HashMap<String, Vec<u8>>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl StorageBackend for MemoryStorage {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), String> {
        self.data
            .write()
            .unwrap()
            .insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
        Ok(self.data.read().unwrap().get(key).cloned())
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.data.write().unwrap().remove(key);
        Ok(())
    }

    fn flush(&self) -> Result<(), String> {
        Ok(())
    }
}

pub struct SledStorage {
    db: sled::Db,
}

impl SledStorage {
    pub fn new(path: &str) -> std::result::Result<Self, String> {
        let db = sled::open(path).map_err(|e| e.to_string())?;
        Ok(Self { db })
    }
}

impl StorageBackend for SledStorage {
    fn put(&self, key: &str, value: &[u8]) -> Result<(), String> {
        self.db.insert(key, value).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, String> {
        let value = self.db.get(key).map_err(|e| e.to_string())?;
        Ok(value.map(|ivec| ivec.to_vec()))
    }

    fn remove(&self, key: &str) -> Result<(), String> {
        self.db.remove(key).map_err(|e| e.to_string())?;
        Ok(())
    }

    fn flush(&self) -> Result<(), String> {
        self.db.flush().map_err(|e| e.to_string())?;
        Ok(())
    }
}
