//! Application-wide constants and compile-time configuration.
//!
//! All hardware pin assignments, timing parameters, and buffer sizes
//! live here so they can be tuned in one place.

// Event queues

/// Capacity of the decoded-key queue (16-bit codes).
pub const KEY_QUEUE_CAPACITY: usize = 32;

/// Capacity of the mouse event queue.
pub const MOUSE_QUEUE_CAPACITY: usize = 32;

/// Depth of the report channel between the BLE task and the input task.
pub const REPORT_CHANNEL_DEPTH: usize = 16;

// Pointer tracking

/// Virtual screen the pointer position is clamped to.
pub const SCREEN_WIDTH: i16 = 1024;
pub const SCREEN_HEIGHT: i16 = 768;

/// Wheel position range (`0..WHEEL_RANGE`).
pub const WHEEL_RANGE: i16 = 256;

// Terminal output

/// Bytes buffered per UART write. Large enough for a full key queue
/// rendered in debug mode (`key = xxxx\n` per entry).
pub const TERMINAL_TX_BUFFER: usize = 512;

/// Heartbeat LED toggle period (ms). One full blink per second.
pub const HEARTBEAT_PERIOD_MS: u64 = 500;

// BLE

/// Scan timeout before giving up and retrying (in 10 ms units). 1000 = 10 s.
pub const BLE_SCAN_TIMEOUT: u16 = 1000;

/// Delay before rescanning after a failed scan or dropped link (ms).
pub const BLE_RETRY_DELAY_MS: u64 = 1000;

/// BLE connection interval range (in 1.25 ms units).
/// 6 = 7.5 ms (lowest latency for HID).
pub const BLE_CONN_INTERVAL_MIN: u16 = 6;
pub const BLE_CONN_INTERVAL_MAX: u16 = 12;

/// BLE slave latency (number of connection events the peripheral can skip).
pub const BLE_SLAVE_LATENCY: u16 = 0;

/// BLE supervision timeout (in 10 ms units). 400 = 4 s.
pub const BLE_SUP_TIMEOUT: u16 = 400;

/// Number of 200 ms polls to wait for the link to become encrypted.
pub const BLE_SECURITY_POLLS: u8 = 25;

/// Bonds kept in RAM (oldest evicted first).
pub const BLE_MAX_BONDS: usize = 4;

// GPIO pin assignments (nRF52840-DK defaults)
//
// These are logical names; the concrete `embassy_nrf::peripherals::*`
// pins are picked in `main.rs`.  Adjust for your custom PCB.
//
//   UART TX        → P0.06  (J-Link VCOM, 115200 8N1)
//   UART RX        → P0.08
//   LED1 heartbeat → P0.13
//   LED2 Num Lock  → P0.14
//   LED3 Caps Lock → P0.15
//   LED4 Scroll    → P0.16
//
// LEDs on the DK are active-low.
