// Notification/camera permission mirror
//
// The native SDK is the source of truth; this is a read-through mapping
// of its authorization codes. No transitions are enforced here.

use crate::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Raw authorization codes as the messaging SDK reports them.
pub mod authorization {
    pub const NOT_DETERMINED: i32 = -1;
    pub const DENIED: i32 = 0;
    pub const AUTHORIZED: i32 = 1;
    pub const PROVISIONAL: i32 = 2;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PermissionStatus {
    Granted,
    Denied,
    Blocked,
    Provisional,
}

impl PermissionStatus {
    /// Total mapping from platform authorization codes; anything
    /// unrecognized is treated as Blocked.
    pub fn from_authorization(code: i32) -> Self {
        match code {
            authorization::AUTHORIZED => PermissionStatus::Granted,
            authorization::PROVISIONAL => PermissionStatus::Provisional,
            authorization::DENIED | authorization::NOT_DETERMINED => PermissionStatus::Denied,
            _ => PermissionStatus::Blocked,
        }
    }

    pub fn is_granted(&self) -> bool {
        matches!(self, PermissionStatus::Granted)
    }

    /// UI accent color for the permission badge.
    pub fn status_color(&self) -> &'static str {
        match self {
            PermissionStatus::Granted => "#4CAF50",
            PermissionStatus::Denied => "#F44336",
            PermissionStatus::Blocked => "#FF9800",
            PermissionStatus::Provisional => "#9E9E9E",
        }
    }
}

impl std::fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
            Self::Blocked => write!(f, "blocked"),
            Self::Provisional => write!(f, "provisional"),
        }
    }
}

/// Adapter over the platform permission dialogs. Both calls return raw
/// authorization codes; mapping happens at the caller via
/// [`PermissionStatus::from_authorization`].
#[async_trait]
pub trait PermissionGateway: Send + Sync {
    /// May pop the system permission dialog.
    async fn request_notification_permission(&self) -> Result<i32, CoreError>;
    /// Never pops a dialog, only reads current state.
    async fn check_notification_permission(&self) -> Result<i32, CoreError>;
}
