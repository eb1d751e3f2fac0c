// Platform module: trait seams over the native SDKs
//
// One adapter per capability: push messaging, local notifications,
// permission queries, the thermal printer, the code scanner, and the
// background-fetch scheduler. The device app wires real SDK bridges in
// here; tests and the CLI harness wire simulated ones.

pub mod background;
pub mod messaging;
pub mod notifications;
pub mod permissions;
pub mod printer;
pub mod scanner;

pub use background::{BackgroundScheduler, FetchConfig, TaskHandler, FETCH_TASK_ID};
pub use messaging::{PushMessage, PushMessaging, PushNotificationBody};
pub use notifications::{NotificationPriority, NotificationRequest, Notifier};
pub use permissions::{PermissionGateway, PermissionStatus};
pub use printer::{DiscoveredPrinter, PrintOptions, PrinterPort};
pub use scanner::{CodeScanner, Detection};

/// Handle returned by callback subscriptions; pass it back to unsubscribe.
pub type SubscriptionId = u64;
