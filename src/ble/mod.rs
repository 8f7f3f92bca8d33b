//! Bluetooth Low Energy input transport.
//!
//! This module drives the Nordic SoftDevice S140 in **Central** role:
//!
//! 1. **Scanner** - finds the first peripheral advertising the
//!    HID-over-GATT Profile (HOGP).
//! 2. **Link** - connects, secures the link (RAM-only bonding) and keeps
//!    reconnecting after drops.
//! 3. **HID Client** - discovers the HID service, requests boot protocol
//!    and forwards every report notification to the input task.
//!
//! Advertising-data parsing lives in the library
//! (`hidterm::ble::adv_parser`) so it can be tested on the host.

pub mod hid_client;
pub mod link;
pub mod scanner;

use defmt::Format;
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Sender;
use heapless::String;
use hidterm::config::REPORT_CHANNEL_DEPTH;
use hidterm::hid::HidReport;
use nrf_softdevice::ble::Address;

/// Producer side of the report channel feeding the input task.
pub type ReportSender = Sender<'static, CriticalSectionRawMutex, HidReport, REPORT_CHANNEL_DEPTH>;

/// The peripheral picked by the scanner.
#[derive(Clone, Format)]
pub struct DiscoveredDevice {
    /// BLE address.
    pub address: Address,
    /// Human-readable name (truncated to 32 bytes for `heapless::String`).
    pub name: String<32>,
    /// Received Signal Strength Indicator (dBm).
    pub rssi: i8,
}
