//! Unified error type for hidterm.
//!
//! We avoid `alloc` - all error variants carry only fixed-size data.
//! Implements `defmt::Format` (behind the `defmt` feature) for efficient
//! on-target logging.

use core::fmt;

/// Top-level error type used across the library and firmware.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    // Decoding
    /// A bounded event queue was full; the item was dropped.
    QueueFull,

    /// A keycode outside the physical key range `0..=127` was decoded.
    KeycodeOutOfRange(u8),

    // BLE
    /// The BLE transport failed (embedded builds only).
    Ble(BleError),
}

/// Subset of BLE failures we propagate (keeps the enum `Copy`-friendly).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BleError {
    /// Scan could not start or timed out without finding a HID peripheral.
    ScanFailed,
    /// Connection attempt failed.
    ConnectFailed,
    /// Pairing or link encryption did not complete.
    SecurityFailed,
    /// The peripheral does not expose an HID service.
    HidServiceNotFound,
    /// Enabling report notifications failed.
    NotifyFailed,
}

// Convenience conversions

impl From<BleError> for Error {
    fn from(e: BleError) -> Self {
        Error::Ble(e)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::QueueFull => f.write_str("event queue full"),
            Error::KeycodeOutOfRange(code) => write!(f, "keycode {code:#04x} out of range"),
            Error::Ble(e) => write!(f, "ble: {e:?}"),
        }
    }
}
