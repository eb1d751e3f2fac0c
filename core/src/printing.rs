// Printer use case: scan, remember a device, send print jobs
//
// The printer library has no open-connection primitive, so "connect"
// means: the address showed up in the latest enumeration, remember it.
// Printing requires that remembered device and nothing else.

use crate::platform::printer::{DiscoveredPrinter, PrintOptions, PrinterPort};
use crate::store::devices::{DeviceRecord, DeviceRegistry};
use crate::CoreError;
use parking_lot::RwLock;
use std::sync::Arc;

const RULE: &str = "================================";
const THIN_RULE: &str = "--------------------------------";

#[derive(Debug, Clone)]
pub struct ReceiptItem {
    pub name: String,
    pub price: String,
}

#[derive(Debug, Clone)]
pub struct Receipt {
    pub header: String,
    pub items: Vec<ReceiptItem>,
    pub subtotal: String,
    pub tax: String,
    pub total: String,
    pub footer: String,
}

pub struct PrinterUseCase {
    printer: Arc<dyn PrinterPort>,
    devices: DeviceRegistry,
    connected: RwLock<Option<DiscoveredPrinter>>,
    options: PrintOptions,
}

impl PrinterUseCase {
    pub fn new(printer: Arc<dyn PrinterPort>, devices: DeviceRegistry) -> Self {
        Self {
            printer,
            devices,
            connected: RwLock::new(None),
            options: PrintOptions::default(),
        }
    }

    pub async fn is_enabled(&self) -> Result<bool, CoreError> {
        self.printer.is_enabled().await
    }

    /// Enumerate paired printers and persist each discovery.
    pub async fn scan_and_save_devices(&self) -> Result<Vec<DiscoveredPrinter>, CoreError> {
        let found = self.enumerate().await?;

        for device in &found {
            self.devices.save(DeviceRecord {
                address: device.address.clone(),
                name: device.name.clone(),
                last_connected: None,
                paired: device.paired,
            })?;
        }

        Ok(found)
    }

    /// Verify the address is present in a fresh enumeration and remember
    /// it as the connected device. Returns false (no state change) when
    /// the address is not found.
    pub async fn connect(&self, address: &str) -> Result<bool, CoreError> {
        let found = self.enumerate().await?;

        let Some(device) = found.into_iter().find(|d| d.address == address) else {
            return Ok(false);
        };

        self.devices.save(DeviceRecord {
            address: device.address.clone(),
            name: device.name.clone(),
            last_connected: Some(crate::current_timestamp()),
            paired: true,
        })?;

        *self.connected.write() = Some(device);
        Ok(true)
    }

    /// Forget the remembered device. The library has nothing to tear down.
    pub fn disconnect(&self) {
        *self.connected.write() = None;
    }

    pub fn is_connected(&self) -> bool {
        self.connected.read().is_some()
    }

    pub fn connected_device(&self) -> Option<DiscoveredPrinter> {
        self.connected.read().clone()
    }

    pub fn saved_devices(&self) -> Result<Vec<DeviceRecord>, CoreError> {
        self.devices.all()
    }

    pub async fn print_text(&self, text: &str) -> Result<(), CoreError> {
        self.print_payload(format!("{text}\n\n\n")).await
    }

    pub async fn print_test_receipt(&self) -> Result<(), CoreError> {
        let receipt = test_receipt();
        self.print_payload(format_receipt(&receipt)).await
    }

    /// The printer module has no native QR support; the code goes out
    /// as centered text.
    pub async fn print_qr_receipt(&self, content: &str) -> Result<(), CoreError> {
        let mut payload = String::new();
        payload.push_str("<C>QR Code Receipt</C>\n");
        payload.push_str(&format!("<C>{RULE}</C>\n"));
        payload.push_str(&format!("<C>QR Code: {content}</C>\n"));
        payload.push_str(&format!("<C>{RULE}</C>\n"));
        payload.push_str("<C>Scan QR code for more info</C>\n\n\n");
        self.print_payload(payload).await
    }

    async fn print_payload(&self, payload: String) -> Result<(), CoreError> {
        let device = self
            .connected
            .read()
            .clone()
            .ok_or(CoreError::NoDeviceConnected)?;
        self.printer
            .print(&device.address, &payload, &self.options)
            .await
    }

    async fn enumerate(&self) -> Result<Vec<DiscoveredPrinter>, CoreError> {
        if !self.printer.is_enabled().await? {
            return Err(CoreError::Platform(
                "Bluetooth is not enabled. Please enable Bluetooth in settings.".to_string(),
            ));
        }
        self.printer.list_devices().await
    }
}

/// Render a receipt with the `<C>`/`<B>` markup the printer module
/// understands: 20/8 item columns, right-aligned money lines.
pub fn format_receipt(receipt: &Receipt) -> String {
    let mut buffer = String::new();
    buffer.push_str(&format!("<C>{}</C>\n", receipt.header));
    buffer.push_str(&format!("<C>{RULE}</C>\n"));

    for item in &receipt.items {
        buffer.push_str(&format!("{:<20} {:>8}\n", item.name, item.price));
    }

    buffer.push_str(&format!("{THIN_RULE}\n"));
    buffer.push_str(&format!("Subtotal: {:>20}\n", receipt.subtotal));
    buffer.push_str(&format!("Tax: {:>25}\n", receipt.tax));
    buffer.push_str(&format!("{THIN_RULE}\n"));
    buffer.push_str(&format!("<B>TOTAL: {:>22}</B>\n", receipt.total));
    buffer.push_str(&format!("\n<C>{}</C>\n\n\n", receipt.footer));
    buffer
}

fn test_receipt() -> Receipt {
    Receipt {
        header: format!(
            "THERMAL PRINTER TEST\n{}\nRPP02N Bluetooth Printer",
            crate::current_timestamp()
        ),
        items: vec![
            ReceiptItem {
                name: "Test Item 1".to_string(),
                price: "$10.00".to_string(),
            },
            ReceiptItem {
                name: "Test Item 2".to_string(),
                price: "$15.50".to_string(),
            },
            ReceiptItem {
                name: "Test Item 3".to_string(),
                price: "$8.75".to_string(),
            },
        ],
        subtotal: "$34.25".to_string(),
        tax: "$3.43".to_string(),
        total: "$37.68".to_string(),
        footer: "Thank you for your purchase!".to_string(),
    }
}
