// Store module: persistence adapters over the key-value backend

pub mod backend;
pub mod barcodes;
pub mod devices;
pub mod posts;
pub mod token;

pub use backend::{MemoryStorage, StorageBackend};
pub use barcodes::{BarcodeHistory, BarcodeRecord};
pub use devices::{DeviceRecord, DeviceRegistry};
pub use posts::{Post, PostEvent, PostStore};
pub use token::PushTokenStore;
