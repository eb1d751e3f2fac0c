// Scanned barcode history
//
// One JSON array under a single key, newest first, capped at 50 entries.

use crate::store::backend::StorageBackend;
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BARCODE_HISTORY_KEY: &str = "@barcode_history";
const MAX_HISTORY_SIZE: usize = 50;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarcodeRecord {
    /// Derived from the capture timestamp in milliseconds.
    pub id: String,
    pub value: String,
    pub symbology: String,
    pub scanned_at: u64,
}

#[derive(Clone)]
pub struct BarcodeHistory {
    backend: Arc<dyn StorageBackend>,
}

impl BarcodeHistory {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Prepend a scan result, trimming the history to the 50 newest entries.
    pub fn save(&self, value: &str, symbology: &str) -> Result<BarcodeRecord, CoreError> {
        let scanned_at = crate::current_timestamp();
        let record = BarcodeRecord {
            id: crate::current_timestamp_millis().to_string(),
            value: value.to_string(),
            symbology: symbology.to_string(),
            scanned_at,
        };

        let mut history = self.history()?;
        history.truncate(MAX_HISTORY_SIZE - 1);
        history.insert(0, record.clone());

        let encoded =
            serde_json::to_vec(&history).map_err(|e| CoreError::Internal(e.to_string()))?;
        self.backend
            .put(BARCODE_HISTORY_KEY, &encoded)
            .map_err(CoreError::Storage)?;

        Ok(record)
    }

    /// Newest-first list of scanned barcodes.
    pub fn history(&self) -> Result<Vec<BarcodeRecord>, CoreError> {
        let raw = self
            .backend
            .get(BARCODE_HISTORY_KEY)
            .map_err(CoreError::Storage)?;

        match raw {
            Some(data) => {
                serde_json::from_slice(&data).map_err(|e| CoreError::Internal(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn last_scanned(&self) -> Result<Option<BarcodeRecord>, CoreError> {
        Ok(self.history()?.into_iter().next())
    }

    pub fn clear(&self) -> Result<(), CoreError> {
        self.backend
            .remove(BARCODE_HISTORY_KEY)
            .map_err(CoreError::Storage)
    }

    pub fn count(&self) -> usize {
        self.history().map(|h| h.len()).unwrap_or(0)
    }
}
