// Scanner use case: permission, scanning session, persisted detections
//
// Each detection is persisted to the barcode history and then handed to
// the caller's callback. Stopping a session always unsubscribes before
// telling the adapter to stop, so a late detection can never fire after
// state says "not scanning".

use crate::platform::permissions::PermissionStatus;
use crate::platform::scanner::{CodeScanner, DetectionCallback};
use crate::platform::SubscriptionId;
use crate::store::barcodes::{BarcodeHistory, BarcodeRecord};
use crate::CoreError;
use std::sync::Arc;

pub type BarcodeCallback = Arc<dyn Fn(BarcodeRecord) + Send + Sync>;

pub struct ScannerUseCase {
    scanner: Arc<dyn CodeScanner>,
    history: BarcodeHistory,
}

impl ScannerUseCase {
    pub fn new(scanner: Arc<dyn CodeScanner>, history: BarcodeHistory) -> Self {
        Self { scanner, history }
    }

    pub async fn request_permission_with_feedback(&self) -> Result<PermissionStatus, CoreError> {
        let code = self.scanner.request_permission().await?;
        let status = PermissionStatus::from_authorization(code);
        if !status.is_granted() {
            tracing::warn!(%status, "camera permission not granted");
        }
        Ok(status)
    }

    /// Availability and permission queried together, screen-init style.
    pub async fn check_availability_and_permission(
        &self,
    ) -> Result<(bool, PermissionStatus), CoreError> {
        let (available, code) =
            tokio::join!(self.scanner.is_available(), self.scanner.check_permission());
        Ok((available?, PermissionStatus::from_authorization(code?)))
    }

    /// Start scanning. Each detection is persisted, then forwarded to
    /// `on_barcode`; a persist failure is logged and the detection is
    /// dropped rather than surfaced half-saved.
    pub async fn start_session(&self, on_barcode: BarcodeCallback) -> Result<ScanSession, CoreError> {
        self.scanner.start().await?;

        let history = self.history.clone();
        let callback: DetectionCallback = Arc::new(move |detection| {
            match history.save(&detection.value, &detection.symbology) {
                Ok(record) => on_barcode(record),
                Err(e) => tracing::error!(error = %e, "failed to save barcode result"),
            }
        });
        let subscription = self.scanner.subscribe(callback);

        Ok(ScanSession {
            scanner: Arc::clone(&self.scanner),
            subscription,
        })
    }

    /// History read failures degrade to an empty list; the screen just
    /// shows nothing rather than an error.
    pub fn history(&self) -> Vec<BarcodeRecord> {
        self.history.history().unwrap_or_else(|e| {
            tracing::error!(error = %e, "failed to read barcode history");
            Vec::new()
        })
    }

    pub fn last_scanned(&self) -> Result<Option<BarcodeRecord>, CoreError> {
        self.history.last_scanned()
    }

    pub fn clear_history(&self) -> Result<(), CoreError> {
        self.history.clear()
    }
}

/// A live scanning session. Dropping it without calling [`stop`] leaks
/// the platform subscription until the adapter is stopped elsewhere.
pub struct ScanSession {
    scanner: Arc<dyn CodeScanner>,
    subscription: SubscriptionId,
}

impl ScanSession {
    /// Unsubscribe first, then stop the platform scanner. Order matters:
    /// the callback must be gone before state flips to "not scanning".
    pub async fn stop(self) -> Result<(), CoreError> {
        self.scanner.unsubscribe(self.subscription);
        self.scanner.stop().await
    }
}
