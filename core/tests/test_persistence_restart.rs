// Sled-backed state must survive a close-and-reopen cycle.

use fieldsync_core::store::backend::{SledStorage, StorageBackend};
use fieldsync_core::store::barcodes::BarcodeHistory;
use fieldsync_core::store::devices::{DeviceRecord, DeviceRegistry};
use fieldsync_core::store::token::PushTokenStore;
use std::sync::Arc;
use tempfile::TempDir;

fn open(dir: &TempDir) -> Arc<dyn StorageBackend> {
    let path = dir.path().to_string_lossy().to_string();
    Arc::new(SledStorage::new(&path).unwrap())
}

#[test]
fn barcode_history_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let history = BarcodeHistory::new(open(&dir));
        history.save("111", "ean-13").unwrap();
        history.save("222", "qr").unwrap();
        history.save("333", "code-128").unwrap();
    }

    let history = BarcodeHistory::new(open(&dir));
    let all = history.history().unwrap();
    assert_eq!(all.len(), 3);
    assert_eq!(all[0].value, "333");
    assert_eq!(all[2].value, "111");
}

#[test]
fn device_registry_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let registry = DeviceRegistry::new(open(&dir));
        registry
            .save(DeviceRecord {
                address: "AA:BB:CC:DD:EE:FF".to_string(),
                name: "RPP02N".to_string(),
                last_connected: Some(1_700_000_000),
                paired: true,
            })
            .unwrap();
    }

    let registry = DeviceRegistry::new(open(&dir));
    let device = registry.get("AA:BB:CC:DD:EE:FF").unwrap().unwrap();
    assert_eq!(device.name, "RPP02N");
    assert_eq!(device.last_connected, Some(1_700_000_000));
    assert!(device.paired);
}

#[test]
fn push_token_survives_restart() {
    let dir = TempDir::new().unwrap();

    {
        let store = PushTokenStore::new(open(&dir));
        store.save("token-xyz").unwrap();
    }

    let store = PushTokenStore::new(open(&dir));
    assert_eq!(store.get().unwrap().as_deref(), Some("token-xyz"));
}

#[test]
fn cleared_history_stays_cleared() {
    let dir = TempDir::new().unwrap();

    {
        let history = BarcodeHistory::new(open(&dir));
        history.save("111", "ean-13").unwrap();
        history.clear().unwrap();
    }

    let history = BarcodeHistory::new(open(&dir));
    assert!(history.history().unwrap().is_empty());
}
