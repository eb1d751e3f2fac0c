// Thermal printer adapter
//
// The underlying printer library has no open-connection primitive:
// you enumerate paired devices and fire print jobs at an address.
// "Connected" is client-side bookkeeping in the use case above this.

use crate::CoreError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscoveredPrinter {
    pub name: String,
    pub address: String,
    pub paired: bool,
}

/// Fixed job parameters for the 80mm receipt printer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrintOptions {
    pub auto_cut: bool,
    pub open_cashbox: bool,
    pub feed_mm: u32,
    pub dpi: u32,
    pub width_mm: u32,
    pub chars_per_line: u32,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            auto_cut: true,
            open_cashbox: false,
            feed_mm: 20,
            dpi: 203,
            width_mm: 80,
            chars_per_line: 42,
        }
    }
}

#[async_trait]
pub trait PrinterPort: Send + Sync {
    /// The library offers no enable call; this only reports state.
    async fn is_enabled(&self) -> Result<bool, CoreError>;

    /// Enumerate paired printer devices.
    async fn list_devices(&self) -> Result<Vec<DiscoveredPrinter>, CoreError>;

    /// Send a payload to the printer at `address`.
    async fn print(
        &self,
        address: &str,
        payload: &str,
        options: &PrintOptions,
    ) -> Result<(), CoreError>;
}
