//! BLE link manager: one HID peripheral at a time.
//!
//! Scan, connect with link encryption, subscribe, forward reports, and
//! start over when the link drops.  Bonding keys live in RAM only, so a
//! power cycle forgets every peer.

use core::cell::RefCell;

use defmt::{info, warn};
use embassy_time::{Duration, Timer};
use heapless::Vec;
use hidterm::config::{
    BLE_CONN_INTERVAL_MAX, BLE_CONN_INTERVAL_MIN, BLE_MAX_BONDS, BLE_RETRY_DELAY_MS,
    BLE_SECURITY_POLLS, BLE_SLAVE_LATENCY, BLE_SUP_TIMEOUT,
};
use hidterm::BleError;
use nrf_softdevice::ble::security::{IoCapabilities, SecurityHandler};
use nrf_softdevice::ble::{
    central, Connection, EncryptError, EncryptionInfo, IdentityKey, MasterId, SecurityMode,
};
use nrf_softdevice::raw;
use nrf_softdevice::Softdevice;
use static_cell::StaticCell;

use crate::ble::{hid_client, scanner, DiscoveredDevice, ReportSender};

struct PeerBond {
    master_id: MasterId,
    key: EncryptionInfo,
    peer_id: IdentityKey,
}

/// RAM-only bond store; the oldest bond is evicted when full.
struct Bonder {
    peers: RefCell<Vec<PeerBond, BLE_MAX_BONDS>>,
}

impl Bonder {
    fn new() -> Self {
        Self {
            peers: RefCell::new(Vec::new()),
        }
    }
}

impl SecurityHandler for Bonder {
    fn io_capabilities(&self) -> IoCapabilities {
        IoCapabilities::None
    }

    fn can_bond(&self, _conn: &Connection) -> bool {
        true
    }

    fn on_bonded(&self, _conn: &Connection, master_id: MasterId, key: EncryptionInfo, peer_id: IdentityKey) {
        let mut peers = self.peers.borrow_mut();
        if let Some(existing) = peers.iter_mut().find(|p| p.master_id == master_id) {
            existing.key = key;
            existing.peer_id = peer_id;
            return;
        }

        if peers.is_full() {
            peers.remove(0);
        }

        let _ = peers.push(PeerBond {
            master_id,
            key,
            peer_id,
        });
    }

    fn get_key(&self, _conn: &Connection, master_id: MasterId) -> Option<EncryptionInfo> {
        self.peers
            .borrow()
            .iter()
            .find_map(|p| (p.master_id == master_id).then_some(p.key))
    }

    fn get_peripheral_key(&self, conn: &Connection) -> Option<(MasterId, EncryptionInfo)> {
        self.peers.borrow().iter().find_map(|p| {
            p.peer_id
                .is_match(conn.peer_address())
                .then_some((p.master_id, p.key))
        })
    }

    fn on_security_update(&self, _conn: &Connection, mode: SecurityMode) {
        info!("BLE security mode updated: {}", mode);
    }
}

/// Scan, connect and forward reports forever.
pub async fn run(sd: &'static Softdevice, report_tx: &ReportSender) -> ! {
    static BONDER: StaticCell<Bonder> = StaticCell::new();
    let bonder: &'static Bonder = BONDER.init(Bonder::new());

    loop {
        let result = match scanner::find_hid_peripheral(sd).await {
            Ok(device) => connect_and_run(sd, bonder, &device, report_tx).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => info!("BLE link closed"),
            Err(e) => warn!("BLE link failed: {}", e),
        }
        Timer::after(Duration::from_millis(BLE_RETRY_DELAY_MS)).await;
    }
}

async fn wait_for_secure_link(conn: &Connection) -> bool {
    for _ in 0..BLE_SECURITY_POLLS {
        match conn.security_mode() {
            SecurityMode::NoAccess | SecurityMode::Open => Timer::after(Duration::from_millis(200)).await,
            _ => return true,
        }
    }
    false
}

async fn connect_and_run(
    sd: &'static Softdevice,
    bonder: &'static Bonder,
    device: &DiscoveredDevice,
    report_tx: &ReportSender,
) -> Result<(), BleError> {
    info!("connecting to {}", device.name.as_str());

    let whitelist = [&device.address];
    let conn_cfg = central::ConnectConfig {
        scan_config: central::ScanConfig {
            whitelist: Some(&whitelist),
            ..Default::default()
        },
        conn_params: raw::ble_gap_conn_params_t {
            min_conn_interval: BLE_CONN_INTERVAL_MIN,
            max_conn_interval: BLE_CONN_INTERVAL_MAX,
            slave_latency: BLE_SLAVE_LATENCY,
            conn_sup_timeout: BLE_SUP_TIMEOUT,
        },
        ..Default::default()
    };

    let conn = central::connect_with_security(sd, &conn_cfg, bonder)
        .await
        .map_err(|_| BleError::ConnectFailed)?;

    let secure_ok = match conn.encrypt() {
        Ok(()) => wait_for_secure_link(&conn).await,
        Err(EncryptError::PeerKeysNotFound) => {
            if conn.request_pairing().is_ok() {
                wait_for_secure_link(&conn).await
            } else {
                false
            }
        }
        Err(_) => false,
    };

    if !secure_ok {
        warn!("failed to secure BLE link");
        let _ = conn.disconnect();
        return Err(BleError::SecurityFailed);
    }

    let client = hid_client::discover_and_subscribe(&conn).await?;
    info!("connected to {}", device.name.as_str());
    crate::KEYBOARD_MOUNTED.signal(());

    hid_client::run_notification_loop(&conn, &client, report_tx).await;

    Ok(())
}
