//! Host-testable core of hidterm.
//!
//! Decodes HID keyboard and mouse reports into terminal byte streams:
//! layout tables, VT100 / TVI950 escape tables, bounded event queues and
//! the dispatch layer that ties them together.  Nothing here touches
//! hardware.
//!
//! Usage: `cargo test --lib` (unit) or `cargo test` (unit + integration)
//!
//! Note: The embedded binary uses main.rs with #![no_std] and #![no_main]
//! and links against this library for all decoding.

#![cfg_attr(not(test), no_std)]

#[macro_use]
mod fmt;

pub mod config;
pub mod dispatch;
pub mod error;
pub mod hid;
pub mod keyboard;
pub mod mouse;
pub mod queue;

// Internal module paths for the BLE helpers that do not need the SoftDevice
#[path = "ble/adv_parser.rs"]
mod ble_adv_parser_impl;

pub mod ble {
    pub mod adv_parser {
        pub use crate::ble_adv_parser_impl::*;
    }
}

pub use dispatch::{Dispatcher, LockLeds, Pointer, Position};
pub use error::{BleError, Error};
pub use keyboard::{DecoderState, Language, TerminalMode};
pub use mouse::MouseEvent;

// ═══════════════════════════════════════════════════════════════════════════
// Unit Tests
// ═══════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::ble::adv_parser::*;
    use super::*;

    // ════════════════════════════════════════════════════════════════════════
    // Error Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn error_display() {
        assert_eq!(Error::QueueFull.to_string(), "event queue full");
        assert_eq!(
            Error::KeycodeOutOfRange(0xE0).to_string(),
            "keycode 0xe0 out of range"
        );
        assert_eq!(
            Error::from(BleError::HidServiceNotFound).to_string(),
            "ble: HidServiceNotFound"
        );
    }

    // ════════════════════════════════════════════════════════════════════════
    // Mouse Decoder Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn mouse_decode_queues_one_event_verbatim() {
        let mut queue = queue::MouseQueue::new();
        let event = MouseEvent::new(-3, 7, 1, true, false, true);
        mouse::decode(&mut queue, event).unwrap();
        assert_eq!(queue.len(), 1);
        assert_eq!(queue.pop(), Some(event));
    }

    #[test]
    fn mouse_decode_reports_full_queue() {
        let mut queue = queue::MouseQueue::new();
        for _ in 0..queue.capacity() {
            mouse::decode(&mut queue, MouseEvent::default()).unwrap();
        }
        assert_eq!(
            mouse::decode(&mut queue, MouseEvent::default()),
            Err(Error::QueueFull)
        );
        assert_eq!(queue.len(), config::MOUSE_QUEUE_CAPACITY);
        assert_eq!(queue.dropped(), 1);
    }

    // ════════════════════════════════════════════════════════════════════════
    // Advertising Parser Tests
    // ════════════════════════════════════════════════════════════════════════

    #[test]
    fn ble_adv_parser_detects_hid_uuid() {
        let ad_data = [0x02, 0x01, 0x06, 0x05, 0x03, 0x0F, 0x18, 0x12, 0x18];
        assert!(is_hid_peripheral(&ad_data));
    }

    #[test]
    fn ble_adv_parser_rejects_non_hid_uuid() {
        let ad_data = [0x03, 0x03, 0x0F, 0x18];
        assert!(!is_hid_peripheral(&ad_data));
        assert!(has_service_uuid16(&ad_data, 0x180F));
    }

    #[test]
    fn ble_adv_parser_handles_malformed_lengths() {
        assert!(!is_hid_peripheral(&[0x00]));
        assert!(!is_hid_peripheral(&[0x05, 0x03, 0x12]));
        assert_eq!(structures(&[0x05, 0x03, 0x12]).count(), 0);
    }

    #[test]
    fn ble_adv_parser_walks_every_structure() {
        let ad_data = [0x02, 0x01, 0x06, 0x03, 0x09, b'K', b'b'];
        let types: Vec<u8> = structures(&ad_data).map(|ad| ad.ad_type).collect();
        assert_eq!(types, [0x01, 0x09]);
    }

    #[test]
    fn ble_adv_parser_extracts_name() {
        let named = [0x05, 0x09, b'M', b'o', b'u', b's'];
        assert_eq!(local_name(&named).unwrap().as_str(), "Mous");

        let unnamed = [0x02, 0x01, 0x06];
        assert!(local_name(&unnamed).is_none());
    }

    #[test]
    fn ble_adv_parser_name_is_truncated_to_capacity() {
        let mut ad_data = [0u8; 40];
        ad_data[0] = 35;
        ad_data[1] = 0x09;
        for b in &mut ad_data[2..36] {
            *b = b'X';
        }
        let name = local_name(&ad_data).unwrap();
        assert_eq!(name.len(), 32);
    }
}
