// Fieldsync Core: the device services spine
//
// Everything the app does off-screen lives here: startup sequencing,
// background sync, push plumbing, printer control, barcode scanning,
// and the small persisted histories behind them. Platform SDKs sit
// behind the traits in `platform`; the rest is concrete.

pub mod app;
pub mod notify;
pub mod platform;
pub mod printing;
pub mod scanning;
pub mod store;
pub mod sync;

use thiserror::Error;

pub use app::context::{PlatformAdapters, ServiceContext};
pub use app::init::{AppInitializer, InitOutcome};
pub use notify::{MessageDelegate, MessageHandler, NotificationCenter};
pub use platform::permissions::PermissionStatus;
pub use printing::PrinterUseCase;
pub use scanning::{ScanSession, ScannerUseCase};
pub use store::backend::{MemoryStorage, SledStorage, StorageBackend};
pub use sync::BackgroundSync;

// ============================================================================
// ERROR TYPES
// ============================================================================

#[derive(Debug, Error, Clone)]
pub enum CoreError {
    #[error("Storage error: {0}")]
    Storage(String),
    #[error("Platform error: {0}")]
    Platform(String),
    #[error("Initialization failed: {0}")]
    Initialization(String),
    #[error("No device connected")]
    NoDeviceConnected,
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<anyhow::Error> for CoreError {
    fn from(err: anyhow::Error) -> Self {
        CoreError::Internal(err.to_string())
    }
}

/// Seconds since the unix epoch.
pub(crate) fn current_timestamp() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

/// Milliseconds since the unix epoch. Barcode ids derive from this.
pub(crate) fn current_timestamp_millis() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
