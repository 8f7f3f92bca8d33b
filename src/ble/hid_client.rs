//! BLE GATT HID Client - subscribes to HID Report notifications on a
//! connected peripheral.
//!
//! After the link is secured, this module:
//! 1. Discovers the HID Service (UUID 0x1812).
//! 2. Requests Boot Protocol so reports have the fixed 8-byte keyboard /
//!    3-4 byte mouse layout the decoders expect.
//! 3. Enables CCCD notifications on the HID Report characteristic.
//! 4. Classifies each notification and forwards it to the input task.

use defmt::{debug, info, warn};
use hidterm::hid;
use hidterm::BleError;
use nrf_softdevice::ble::{gatt_client, Connection};

use crate::ble::ReportSender;

/// The two HID service characteristics hidterm touches.
#[nrf_softdevice::gatt_client(uuid = "1812")]
pub struct HidServiceClient {
    /// Input report; one notification per keyboard or mouse report.
    #[characteristic(uuid = "2a4d", read, notify)]
    pub hid_report: [u8; 20],

    /// 0 selects boot protocol, 1 report protocol.
    #[characteristic(uuid = "2a4e", read, write)]
    pub protocol_mode: u8,
}

/// Boot Protocol value for the Protocol Mode characteristic.
const BOOT_PROTOCOL: u8 = 0;

/// Find the HID service, switch it to boot protocol and enable report
/// notifications.
pub async fn discover_and_subscribe(conn: &Connection) -> Result<HidServiceClient, BleError> {
    info!("looking for HID service");

    let client: HidServiceClient = gatt_client::discover(conn)
        .await
        .map_err(|_| BleError::HidServiceNotFound)?;

    match client.protocol_mode_write(&BOOT_PROTOCOL).await {
        Ok(_) => debug!("boot protocol selected"),
        Err(_) => warn!("peer refused boot protocol, decoding anyway"),
    }

    client
        .hid_report_cccd_write(true)
        .await
        .map_err(|_| BleError::NotifyFailed)?;

    info!("report notifications enabled");
    Ok(client)
}

/// Forward notifications until the connection drops.
///
/// Each report is classified and handed to `report_tx` without blocking;
/// if the input task is behind, the report is dropped.
pub async fn run_notification_loop(conn: &Connection, client: &HidServiceClient, report_tx: &ReportSender) {
    let _ = gatt_client::run(conn, client, |event| match event {
        HidServiceClientEvent::HidReportNotification(data) => {
            match hid::classify_notification(&data) {
                Some(report) => {
                    if report_tx.try_send(report).is_err() {
                        warn!("report channel full, dropping report");
                    }
                }
                None => warn!("unclassified notification ({} bytes)", data.len()),
            }
        }
    })
    .await;

    info!("HID link closed");
}
