// Service context: one place that owns every store and use case
//
// Platform adapters come in as a bundle of trait objects; the context
// builds the stores on a shared storage backend and wires the use
// cases on top. Everything hands out Arcs, so the context itself is
// cheap to share.

use crate::notify::{MessageHandler, NotificationCenter};
use crate::platform::background::BackgroundScheduler;
use crate::platform::messaging::PushMessaging;
use crate::platform::notifications::Notifier;
use crate::platform::permissions::PermissionGateway;
use crate::platform::printer::PrinterPort;
use crate::platform::scanner::CodeScanner;
use crate::printing::PrinterUseCase;
use crate::scanning::ScannerUseCase;
use crate::store::backend::{MemoryStorage, SledStorage, StorageBackend};
use crate::store::barcodes::BarcodeHistory;
use crate::store::devices::DeviceRegistry;
use crate::store::posts::PostStore;
use crate::store::token::PushTokenStore;
use crate::sync::BackgroundSync;
use crate::CoreError;
use std::sync::Arc;

/// Everything the host platform must provide.
#[derive(Clone)]
pub struct PlatformAdapters {
    pub messaging: Arc<dyn PushMessaging>,
    pub notifier: Arc<dyn Notifier>,
    pub permissions: Arc<dyn PermissionGateway>,
    pub printer: Arc<dyn PrinterPort>,
    pub scanner: Arc<dyn CodeScanner>,
    pub scheduler: Arc<dyn BackgroundScheduler>,
}

pub struct ServiceContext {
    pub adapters: PlatformAdapters,
    pub token_store: PushTokenStore,
    pub posts: PostStore,
    pub devices: DeviceRegistry,
    pub barcodes: BarcodeHistory,
    pub background_sync: Arc<BackgroundSync>,
    pub printer: Arc<PrinterUseCase>,
    pub scanner: Arc<ScannerUseCase>,
    pub notifications: Arc<NotificationCenter>,
    pub messages: Arc<MessageHandler>,
}

impl ServiceContext {
    pub fn new(adapters: PlatformAdapters, backend: Arc<dyn StorageBackend>) -> Self {
        crate::app::init_logging();

        let token_store = PushTokenStore::new(Arc::clone(&backend));
        let posts = PostStore::new(Arc::clone(&backend));
        let devices = DeviceRegistry::new(Arc::clone(&backend));
        let barcodes = BarcodeHistory::new(backend);

        let background_sync = Arc::new(BackgroundSync::new(
            Arc::clone(&adapters.scheduler),
            posts.clone(),
        ));
        let printer = Arc::new(PrinterUseCase::new(
            Arc::clone(&adapters.printer),
            devices.clone(),
        ));
        let scanner = Arc::new(ScannerUseCase::new(
            Arc::clone(&adapters.scanner),
            barcodes.clone(),
        ));
        let notifications = Arc::new(NotificationCenter::new(
            Arc::clone(&adapters.notifier),
            Arc::clone(&adapters.permissions),
        ));
        let messages = Arc::new(MessageHandler::new(
            Arc::clone(&adapters.messaging),
            Arc::clone(&notifications),
            token_store.clone(),
        ));

        Self {
            adapters,
            token_store,
            posts,
            devices,
            barcodes,
            background_sync,
            printer,
            scanner,
            notifications,
            messages,
        }
    }

    /// Context backed by an on-disk sled database at `path`.
    pub fn with_storage(adapters: PlatformAdapters, path: &str) -> Result<Self, CoreError> {
        let backend = SledStorage::new(path).map_err(CoreError::Storage)?;
        Ok(Self::new(adapters, Arc::new(backend)))
    }

    /// Context on a throwaway in-memory backend. Test and demo use.
    pub fn in_memory(adapters: PlatformAdapters) -> Self {
        Self::new(adapters, Arc::new(MemoryStorage::new()))
    }
}
