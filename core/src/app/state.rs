// UI state reducers
//
// Pure functions over plain state structs. The host UI dispatches
// actions and re-renders from the returned state; nothing here touches
// an adapter or a store.

use crate::platform::messaging::PushMessage;
use crate::platform::permissions::PermissionStatus;
use crate::platform::printer::DiscoveredPrinter;
use crate::store::barcodes::BarcodeRecord;

/// Push messages kept in UI state. Older ones just fall off.
pub const MAX_RECENT_MESSAGES: usize = 3;

/// Scans shown on the scanner screen before older ones fall off.
pub const MAX_RECENT_SCANS: usize = 10;

// ============================================================================
// APP
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InitPhase {
    #[default]
    Uninitialized,
    Initializing,
    Ready,
    InitError(String),
}

#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub phase: InitPhase,
    pub push_token: Option<String>,
    pub permission_status: Option<PermissionStatus>,
    /// Newest first, at most [`MAX_RECENT_MESSAGES`].
    pub recent_messages: Vec<PushMessage>,
    pub syncing: bool,
    pub last_sync_error: Option<String>,
}

#[derive(Debug, Clone)]
pub enum AppAction {
    InitStarted,
    InitSucceeded {
        push_token: Option<String>,
        permission_status: Option<PermissionStatus>,
    },
    InitFailed(String),
    MessageReceived(PushMessage),
    TokenRefreshed(String),
    PermissionUpdated(PermissionStatus),
    SyncStarted,
    SyncSucceeded,
    SyncFailed(String),
}

pub fn reduce_app(mut state: AppState, action: AppAction) -> AppState {
    match action {
        AppAction::InitStarted => {
            state.phase = InitPhase::Initializing;
        }
        AppAction::InitSucceeded {
            push_token,
            permission_status,
        } => {
            state.phase = InitPhase::Ready;
            state.push_token = push_token;
            state.permission_status = permission_status;
        }
        AppAction::InitFailed(reason) => {
            state.phase = InitPhase::InitError(reason);
        }
        AppAction::MessageReceived(message) => {
            state.recent_messages.insert(0, message);
            state.recent_messages.truncate(MAX_RECENT_MESSAGES);
        }
        AppAction::TokenRefreshed(token) => {
            state.push_token = Some(token);
        }
        AppAction::PermissionUpdated(status) => {
            state.permission_status = Some(status);
        }
        AppAction::SyncStarted => {
            state.syncing = true;
            state.last_sync_error = None;
        }
        AppAction::SyncSucceeded => {
            state.syncing = false;
        }
        AppAction::SyncFailed(reason) => {
            state.syncing = false;
            state.last_sync_error = Some(reason);
        }
    }
    state
}

// ============================================================================
// SCANNER
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ScanPhase {
    #[default]
    Idle,
    Scanning,
    /// A detection dialog is on screen; scanning has been stopped.
    DialogShown,
}

#[derive(Debug, Clone, Default)]
pub struct ScannerState {
    pub init: InitPhase,
    pub phase: ScanPhase,
    pub available: bool,
    pub permission: Option<PermissionStatus>,
    /// Newest first, at most [`MAX_RECENT_SCANS`].
    pub scanned: Vec<BarcodeRecord>,
    /// The record the dialog is showing, while in [`ScanPhase::DialogShown`].
    pub pending: Option<BarcodeRecord>,
}

#[derive(Debug, Clone)]
pub enum ScannerAction {
    InitStarted,
    InitSucceeded {
        available: bool,
        permission: PermissionStatus,
    },
    InitFailed(String),
    ScanStarted,
    ScanStopped,
    CodeDetected(BarcodeRecord),
    DialogDismissed,
    HistoryLoaded(Vec<BarcodeRecord>),
    HistoryCleared,
}

/// Scanner screen reducer. Out-of-phase actions are dropped: a start
/// before the screen is ready, a detection that races a stop, or a
/// second start, changes nothing.
pub fn reduce_scanner(mut state: ScannerState, action: ScannerAction) -> ScannerState {
    match action {
        ScannerAction::InitStarted => {
            state.init = InitPhase::Initializing;
        }
        ScannerAction::InitSucceeded {
            available,
            permission,
        } => {
            state.init = InitPhase::Ready;
            state.available = available;
            state.permission = Some(permission);
        }
        ScannerAction::InitFailed(reason) => {
            state.init = InitPhase::InitError(reason);
        }
        ScannerAction::ScanStarted => {
            if state.init == InitPhase::Ready && state.phase == ScanPhase::Idle {
                state.phase = ScanPhase::Scanning;
            }
        }
        ScannerAction::ScanStopped => {
            if state.phase == ScanPhase::Scanning {
                state.phase = ScanPhase::Idle;
            }
        }
        ScannerAction::CodeDetected(record) => {
            if state.phase == ScanPhase::Scanning {
                state.scanned.insert(0, record.clone());
                state.scanned.truncate(MAX_RECENT_SCANS);
                state.pending = Some(record);
                state.phase = ScanPhase::DialogShown;
            }
        }
        ScannerAction::DialogDismissed => {
            if state.phase == ScanPhase::DialogShown {
                state.pending = None;
                state.phase = ScanPhase::Idle;
            }
        }
        ScannerAction::HistoryLoaded(records) => {
            state.scanned = records;
            state.scanned.truncate(MAX_RECENT_SCANS);
        }
        ScannerAction::HistoryCleared => {
            state.scanned.clear();
        }
    }
    state
}

// ============================================================================
// PRINTER
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct PrinterState {
    pub init: InitPhase,
    pub enabled: bool,
    pub devices: Vec<DiscoveredPrinter>,
    pub connected: Option<DiscoveredPrinter>,
    pub scanning: bool,
    pub printing: bool,
    pub last_error: Option<String>,
}

impl PrinterState {
    /// Hex color for the connection indicator.
    pub fn status_color(&self) -> &'static str {
        if self.connected.is_some() {
            "#4CAF50"
        } else {
            "#9E9E9E"
        }
    }
}

#[derive(Debug, Clone)]
pub enum PrinterAction {
    InitStarted,
    InitSucceeded { enabled: bool },
    InitFailed(String),
    EnabledChecked(bool),
    DeviceScanStarted,
    DevicesFound(Vec<DiscoveredPrinter>),
    DeviceScanFailed(String),
    Connected(DiscoveredPrinter),
    Disconnected,
    PrintStarted,
    PrintSucceeded,
    PrintFailed(String),
}

pub fn reduce_printer(mut state: PrinterState, action: PrinterAction) -> PrinterState {
    match action {
        PrinterAction::InitStarted => {
            state.init = InitPhase::Initializing;
        }
        PrinterAction::InitSucceeded { enabled } => {
            state.init = InitPhase::Ready;
            state.enabled = enabled;
        }
        PrinterAction::InitFailed(reason) => {
            state.init = InitPhase::InitError(reason);
        }
        PrinterAction::EnabledChecked(enabled) => {
            state.enabled = enabled;
        }
        PrinterAction::DeviceScanStarted => {
            state.scanning = true;
            state.last_error = None;
        }
        PrinterAction::DevicesFound(devices) => {
            state.devices = devices;
            state.scanning = false;
        }
        PrinterAction::DeviceScanFailed(reason) => {
            state.scanning = false;
            state.last_error = Some(reason);
        }
        PrinterAction::Connected(device) => {
            state.connected = Some(device);
        }
        PrinterAction::Disconnected => {
            state.connected = None;
        }
        PrinterAction::PrintStarted => {
            state.printing = true;
            state.last_error = None;
        }
        PrinterAction::PrintSucceeded => {
            state.printing = false;
        }
        PrinterAction::PrintFailed(reason) => {
            state.printing = false;
            state.last_error = Some(reason);
        }
    }
    state
}
