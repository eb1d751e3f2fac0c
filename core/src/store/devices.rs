// Paired printer device persistence
//
// One JSON array under a single key, keyed by address with upsert semantics.

use crate::store::backend::StorageBackend;
use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

const BLUETOOTH_DEVICES_KEY: &str = "@bluetooth_devices";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceRecord {
    pub address: String,
    pub name: String,
    pub last_connected: Option<u64>,
    pub paired: bool,
}

#[derive(Clone)]
pub struct DeviceRegistry {
    backend: Arc<dyn StorageBackend>,
}

impl DeviceRegistry {
    pub fn new(backend: Arc<dyn StorageBackend>) -> Self {
        Self { backend }
    }

    /// Insert or replace the record with the same address.
    pub fn save(&self, device: DeviceRecord) -> Result<(), CoreError> {
        let mut devices = self.all()?;
        match devices.iter_mut().find(|d| d.address == device.address) {
            Some(existing) => *existing = device,
            None => devices.push(device),
        }
        self.write(&devices)
    }

    pub fn get(&self, address: &str) -> Result<Option<DeviceRecord>, CoreError> {
        Ok(self.all()?.into_iter().find(|d| d.address == address))
    }

    pub fn all(&self) -> Result<Vec<DeviceRecord>, CoreError> {
        let raw = self
            .backend
            .get(BLUETOOTH_DEVICES_KEY)
            .map_err(CoreError::Storage)?;

        match raw {
            Some(data) => {
                serde_json::from_slice(&data).map_err(|e| CoreError::Internal(e.to_string()))
            }
            None => Ok(Vec::new()),
        }
    }

    pub fn remove(&self, address: &str) -> Result<(), CoreError> {
        let devices: Vec<DeviceRecord> = self
            .all()?
            .into_iter()
            .filter(|d| d.address != address)
            .collect();
        self.write(&devices)
    }

    /// Stamp the device with the current time; no-op when the address is unknown.
    pub fn touch_last_connected(&self, address: &str) -> Result<(), CoreError> {
        if let Some(mut device) = self.get(address)? {
            device.last_connected = Some(crate::current_timestamp());
            self.save(device)?;
        }
        Ok(())
    }

    fn write(&self, devices: &[DeviceRecord]) -> Result<(), CoreError> {
        let encoded =
            serde_json::to_vec(devices).map_err(|e| CoreError::Internal(e.to_string()))?;
        self.backend
            .put(BLUETOOTH_DEVICES_KEY, &encoded)
            .map_err(CoreError::Storage)
    }
}
