//! BLE GAP scanner - finds one HID peripheral.
//!
//! Uses the SoftDevice Central-role scanning API.  The first
//! advertisement carrying the HID Service UUID (0x1812) ends the scan.

use defmt::{info, warn};
use heapless::String;
use hidterm::ble::adv_parser::{is_hid_peripheral, local_name};
use hidterm::config::BLE_SCAN_TIMEOUT;
use hidterm::BleError;
use nrf_softdevice::ble::{central, Address};
use nrf_softdevice::Softdevice;

use crate::ble::DiscoveredDevice;

/// Scan until a HID peripheral shows up or `BLE_SCAN_TIMEOUT` elapses.
pub async fn find_hid_peripheral(sd: &Softdevice) -> Result<DiscoveredDevice, BleError> {
    info!("BLE scan starting");

    let config = central::ScanConfig {
        // Active scan to retrieve scan-response data (device names).
        active: true,
        timeout: BLE_SCAN_TIMEOUT,
        ..Default::default()
    };

    let result = central::scan(sd, &config, |params| {
        // SAFETY: the SoftDevice guarantees `p_data` points at `len` valid
        // bytes for the duration of the callback.
        let data =
            unsafe { core::slice::from_raw_parts(params.data.p_data, params.data.len as usize) };

        if !is_hid_peripheral(data) {
            return None;
        }
        Some(DiscoveredDevice {
            address: Address::from_raw(params.peer_addr),
            name: local_name(data).unwrap_or_else(|| {
                let mut s = String::new();
                let _ = s.push_str("Unknown");
                s
            }),
            rssi: params.rssi,
        })
    })
    .await;

    match result {
        Ok(device) => {
            info!("Found: {} (RSSI {})", device.name.as_str(), device.rssi);
            Ok(device)
        }
        Err(e) => {
            warn!("BLE scan ended without a HID peripheral: {}", e);
            Err(BleError::ScanFailed)
        }
    }
}
