// Push token persistence, a single key-value entry

use crate::store::backend::StorageBackend;
use crate::CoreError;
use std::sync::Arc;

const PUSH_TOKEN_KEY: &str = "@fcm_token";

#[derive(Clone)]
pub struct PushTokenStore {
    backend: Arc<dyn StorageBackend>,
}

impl PushTokenStore {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    pub fn save(&self, token: &str) -> Result<(), CoreError> {
        self.backend
            .put(PUSH_TOKEN_KEY, token.as_bytes())
            .map_err(CoreError::Storage)
    }

    pub fn get(&self) -> Result<Option<String>, CoreError> {
        let raw = self.backend.get(PUSH_TOKEN_KEY).map_err(CoreError::Storage)?;
        match raw {
            Some(bytes) => String::from_utf8(bytes)
                .map(Some)
                .map_err(|e| CoreError::Internal(e.to_string())),
            None => Ok(None),
        }
    }

    pub fn clear(&self) -> Result<(), CoreError> {
        self.backend
            .remove(PUSH_TOKEN_KEY)
            .map_err(CoreError::Storage)
    }

    pub fn exists(&self) -> bool {
        matches!(self.get(), Ok(Some(token)) if !token.is_empty())
    }
}
